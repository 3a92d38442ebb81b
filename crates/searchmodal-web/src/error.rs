#![forbid(unsafe_code)]

use std::fmt;

use searchmodal_widgets::ModalConfigError;

/// Errors from mounting a search modal element.
#[derive(Debug)]
pub enum MountError {
    /// The configuration JSON failed to parse or validate.
    Config(ModalConfigError),
    /// The host element is not owned by a document.
    NoDocument,
    /// The created `dialog` element is not an `HTMLDialogElement`.
    MissingDialog,
    /// A DOM call rejected the shadow tree construction.
    Dom(String),
}

impl fmt::Display for MountError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Config(e) => write!(f, "invalid search modal config: {e}"),
            Self::NoDocument => f.write_str("host element has no owner document"),
            Self::MissingDialog => f.write_str("dialog element does not support showModal"),
            Self::Dom(msg) => write!(f, "DOM error: {msg}"),
        }
    }
}

impl std::error::Error for MountError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Config(e) => Some(e),
            _ => None,
        }
    }
}

impl From<ModalConfigError> for MountError {
    fn from(err: ModalConfigError) -> Self {
        Self::Config(err)
    }
}

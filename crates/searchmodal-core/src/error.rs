#![forbid(unsafe_code)]

//! Error types shared by every host.

use std::fmt;

/// Which presenter operation failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterOp {
    Present,
    Dismiss,
}

impl fmt::Display for PresenterOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Present => f.write_str("present"),
            Self::Dismiss => f.write_str("dismiss"),
        }
    }
}

/// The native modal primitive rejected a present or dismiss call.
///
/// There is no local recovery: the error travels back to whoever caused the
/// transition (a click handler, a property write) and on to the host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PresenterError {
    op: PresenterOp,
    message: String,
}

impl PresenterError {
    /// Create an error for `op` with a host-supplied message.
    pub fn new(op: PresenterOp, message: impl Into<String>) -> Self {
        Self {
            op,
            message: message.into(),
        }
    }

    /// The failed operation.
    #[must_use]
    pub const fn op(&self) -> PresenterOp {
        self.op
    }

    /// Host-supplied detail.
    #[must_use]
    pub fn message(&self) -> &str {
        &self.message
    }
}

impl fmt::Display for PresenterError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "modal {} failed: {}", self.op, self.message)
    }
}

impl std::error::Error for PresenterError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_names_operation() {
        let err = PresenterError::new(PresenterOp::Present, "InvalidStateError");
        assert_eq!(err.to_string(), "modal present failed: InvalidStateError");
        assert_eq!(err.op(), PresenterOp::Present);
        assert_eq!(err.message(), "InvalidStateError");
    }
}

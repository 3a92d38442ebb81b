#![forbid(unsafe_code)]

//! The search modal widget.
//!
//! A toggle button opens a native modal dialog hosting an embedded search
//! element; outside clicks, backdrop clicks, the search element's close
//! signal and property writes close it again. [`SearchModal`] owns the
//! `open` flag and keeps three side effects consistent with it: the modal
//! primitive's presentation, the body scroll-lock, and a window click
//! listener that exists only while the widget is attached.

pub mod search_modal;

pub use search_modal::{
    ClickHandler, CloseSignal, DEFAULT_ICON_REF, ModalConfigError, OutsideClickMonitor,
    PresentationBridge, SearchModal, SearchModalBuilder, SearchModalConfig,
};

#![forbid(unsafe_code)]

//! Core: click propagation, host collaborator seams, and attribute parsing
//! for the searchmodal widget.
//!
//! # Role in searchmodal
//! `searchmodal-core` is the platform-neutral vocabulary. It says what a
//! click is and in which order surfaces see it, what the native modal
//! primitive, the scroll-lock target and the window must offer, and how HTML
//! attributes map to properties. It performs no side effects itself.
//!
//! # How it fits in the system
//! `searchmodal-widgets` drives these seams from its state machine;
//! `searchmodal-web` implements them over the browser DOM; the
//! [`testing`] module (feature `test-helpers`) implements them in memory.

pub mod attribute;
pub mod error;
pub mod event;
pub mod host;
#[cfg(any(test, feature = "test-helpers"))]
pub mod testing;

pub use attribute::{AttributeChange, OBSERVED_ATTRIBUTES, parse_attribute};
pub use error::{PresenterError, PresenterOp};
pub use event::{ClickEvent, ClickOutcome, ClickPath, ClickRegion, Propagation};
pub use host::{
    BodyProvider, IconDisplay, ListenerRegistration, ModalPresenter, ScrollLockTarget,
    WindowClickListener, WindowTarget,
};

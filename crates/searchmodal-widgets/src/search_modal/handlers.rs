#![forbid(unsafe_code)]

//! Click-handler factories.
//!
//! | Handler | Stops propagation | Writes `open` |
//! |---------|-------------------|---------------|
//! | trigger | yes | `true` |
//! | backdrop | yes | `false` |
//! | content | yes | no |
//! | close signal | n/a | `false` |
//! | window (monitor) | n/a | `false` |
//!
//! Propagation is stopped before the state write, so an outer handler never
//! sees a click an inner one claimed. Each handler opens its own update
//! cycle; when a host dispatches a whole click inside one cycle the handlers
//! nest into it.

use std::rc::{Rc, Weak};

use searchmodal_core::{PresenterError, Propagation, WindowClickListener};

use super::ModalInner;

/// Handler attached to one click surface.
pub type ClickHandler = Rc<dyn Fn(&dyn Propagation) -> Result<(), PresenterError>>;

/// Handler for the embedded search element's close request.
pub type CloseSignal = Rc<dyn Fn() -> Result<(), PresenterError>>;

pub(super) fn trigger(inner: &Rc<ModalInner>) -> ClickHandler {
    let inner = Rc::clone(inner);
    Rc::new(move |event: &dyn Propagation| {
        event.stop_propagation();
        inner.set_open(true, "trigger")
    })
}

pub(super) fn backdrop(inner: &Rc<ModalInner>) -> ClickHandler {
    let inner = Rc::clone(inner);
    Rc::new(move |event: &dyn Propagation| {
        event.stop_propagation();
        inner.set_open(false, "backdrop")
    })
}

pub(super) fn content() -> ClickHandler {
    Rc::new(|event: &dyn Propagation| {
        event.stop_propagation();
        Ok(())
    })
}

pub(super) fn close_signal(inner: &Rc<ModalInner>) -> CloseSignal {
    let inner = Rc::clone(inner);
    Rc::new(move || inner.set_open(false, "close-signal"))
}

/// The window holds this listener, so it keeps only a weak reference.
pub(super) fn window(inner: &Rc<ModalInner>) -> WindowClickListener {
    let inner: Weak<ModalInner> = Rc::downgrade(inner);
    Rc::new(move || match inner.upgrade() {
        Some(inner) => inner.set_open(false, "window"),
        None => Ok(()),
    })
}

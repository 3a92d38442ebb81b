#![forbid(unsafe_code)]

//! Presentation bridge: `open` transitions to modal and scroll-lock effects.
//!
//! # Invariants
//!
//! 1. The bridge remembers the last value it applied. An application equal
//!    to it is a no-op, so present/dismiss calls track value changes rather
//!    than writes.
//! 2. The body is resolved through the [`BodyProvider`] on every effective
//!    application and never cached.
//! 3. Opening sets the configured `overflow` value; closing removes the
//!    inline override instead of writing a guessed prior value.
//!
//! # Failure Modes
//!
//! - **Body missing**: the scroll-lock step is skipped; logged at `trace`.
//! - **Presenter fails**: the applied value is left unchanged, the body is
//!   not touched, and the error is returned. Nothing is retried.

use std::cell::{Cell, RefCell};

use searchmodal_core::{BodyProvider, ModalPresenter, PresenterError};
use tracing::{debug, trace};

/// Applies `open` to the modal primitive and the scroll-lock target.
pub struct PresentationBridge {
    presenter: Box<dyn ModalPresenter>,
    body: RefCell<BodyProvider>,
    overflow: String,
    applied: Cell<bool>,
    pending_error: RefCell<Option<PresenterError>>,
}

impl PresentationBridge {
    /// Create a bridge in the dismissed state.
    pub fn new(
        presenter: impl ModalPresenter + 'static,
        body: BodyProvider,
        overflow: impl Into<String>,
    ) -> Self {
        Self {
            presenter: Box::new(presenter),
            body: RefCell::new(body),
            overflow: overflow.into(),
            applied: Cell::new(false),
            pending_error: RefCell::new(None),
        }
    }

    /// Last value successfully applied.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.applied.get()
    }

    /// Replace the body resolver. Takes effect on the next application.
    pub fn set_body_provider(&self, provider: BodyProvider) {
        *self.body.borrow_mut() = provider;
    }

    /// Bring the modal and the body in line with `open`.
    pub fn apply(&self, open: bool) -> Result<(), PresenterError> {
        if self.applied.get() == open {
            trace!(open, "presentation unchanged");
            return Ok(());
        }

        if open {
            self.presenter.present()?;
        } else {
            self.presenter.dismiss()?;
        }
        self.applied.set(open);

        let target = self.body.borrow().resolve();
        match target {
            Some(body) if open => body.lock_overflow(&self.overflow),
            Some(body) => body.clear_overflow(),
            None => trace!(open, "no body resolved; scroll lock skipped"),
        }
        debug!(open, "modal presentation applied");
        Ok(())
    }

    /// Variant of [`apply`](Self::apply) for deferred notification callbacks,
    /// which cannot return errors. The first failure is kept until
    /// [`take_error`](Self::take_error).
    pub fn apply_deferred(&self, open: bool) {
        if let Err(err) = self.apply(open) {
            debug!(error = %err, "modal presentation failed");
            self.pending_error.borrow_mut().get_or_insert(err);
        }
    }

    /// Take the failure recorded by [`apply_deferred`](Self::apply_deferred).
    pub fn take_error(&self) -> Option<PresenterError> {
        self.pending_error.borrow_mut().take()
    }
}

impl std::fmt::Debug for PresentationBridge {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PresentationBridge")
            .field("applied", &self.applied.get())
            .field("overflow", &self.overflow)
            .finish_non_exhaustive()
    }
}

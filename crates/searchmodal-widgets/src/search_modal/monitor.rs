#![forbid(unsafe_code)]

//! Outside-click monitor.
//!
//! Two states: **armed** (one click listener installed on the window) and
//! **disarmed** (none). Attaching arms, detaching disarms. The listener is
//! held as a [`ListenerRegistration`], so disarming, or dropping the
//! monitor, removes it exactly once.
//!
//! ```text
//!            arm(window)
//! Disarmed ───────────────▶ Armed
//!    ▲                        │
//!    └──────── disarm() ──────┘
//! ```
//!
//! Arming while armed and disarming while disarmed are no-ops, which is what
//! keeps listeners from piling up across repeated attach/detach cycles.

use std::rc::Rc;

use searchmodal_core::{ListenerRegistration, PresenterError, WindowClickListener, WindowTarget};
use tracing::debug;

struct Armed {
    listener: WindowClickListener,
    _registration: ListenerRegistration,
}

/// Lifecycle object owning the window click listener.
#[derive(Default)]
pub struct OutsideClickMonitor {
    armed: Option<Armed>,
}

impl OutsideClickMonitor {
    /// A disarmed monitor.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.armed.is_some()
    }

    /// Install `listener` on `window`.
    ///
    /// Returns `false`, leaving the existing listener in place, if already
    /// armed.
    pub fn arm(&mut self, window: &dyn WindowTarget, listener: WindowClickListener) -> bool {
        if self.armed.is_some() {
            debug!("outside-click monitor already armed");
            return false;
        }
        let registration = window.listen_click(Rc::clone(&listener));
        self.armed = Some(Armed {
            listener,
            _registration: registration,
        });
        debug!("outside-click monitor armed");
        true
    }

    /// Remove the listener. Returns `false` if nothing was installed.
    pub fn disarm(&mut self) -> bool {
        match self.armed.take() {
            Some(_) => {
                debug!("outside-click monitor disarmed");
                true
            }
            None => false,
        }
    }

    /// Run the installed listener as if a click reached the window.
    ///
    /// Does nothing while disarmed.
    pub fn deliver(&self) -> Result<(), PresenterError> {
        match self.armed.as_ref() {
            Some(armed) => (armed.listener)(),
            None => Ok(()),
        }
    }
}

impl std::fmt::Debug for OutsideClickMonitor {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("OutsideClickMonitor")
            .field("armed", &self.is_armed())
            .finish()
    }
}

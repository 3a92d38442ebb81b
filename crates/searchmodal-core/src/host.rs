#![forbid(unsafe_code)]

//! Host collaborator traits.
//!
//! The search modal never touches a platform API directly. Everything it
//! drives is reached through one of these seams, so the same state machine
//! runs against the browser DOM (`searchmodal-web`) and against the headless
//! doubles in [`crate::testing`].
//!
//! | Seam | Browser implementation |
//! |------|------------------------|
//! | [`ModalPresenter`] | `<dialog>` `showModal()` / `close()` |
//! | [`ScrollLockTarget`] | `document.body.style.overflow` |
//! | [`BodyProvider`] | `() => document.body`, replaceable |
//! | [`WindowTarget`] | `window.addEventListener("click", ..)` |
//! | [`IconDisplay`] | icon element `href` attribute |

use std::fmt;
use std::rc::Rc;

use crate::error::PresenterError;

/// The native modal primitive.
///
/// `present` makes the element top-layer, captures focus and makes the rest
/// of the document inert; `dismiss` reverses that. Failures are not retried.
pub trait ModalPresenter {
    /// Show the modal.
    fn present(&self) -> Result<(), PresenterError>;

    /// Hide the modal.
    fn dismiss(&self) -> Result<(), PresenterError>;
}

impl<P: ModalPresenter + ?Sized> ModalPresenter for Rc<P> {
    fn present(&self) -> Result<(), PresenterError> {
        (**self).present()
    }

    fn dismiss(&self) -> Result<(), PresenterError> {
        (**self).dismiss()
    }
}

impl<P: ModalPresenter + ?Sized> ModalPresenter for Box<P> {
    fn present(&self) -> Result<(), PresenterError> {
        (**self).present()
    }

    fn dismiss(&self) -> Result<(), PresenterError> {
        (**self).dismiss()
    }
}

/// Element whose scrolling is suppressed while the modal is open.
pub trait ScrollLockTarget {
    /// Apply an inline `overflow` override.
    fn lock_overflow(&self, value: &str);

    /// Remove the inline `overflow` override entirely.
    fn clear_overflow(&self);
}

/// Resolves the current scroll-lock target.
///
/// Called on every presentation change; the result is never cached because
/// the target may not exist yet, or may be replaced, between calls.
pub struct BodyProvider {
    resolve: Box<dyn Fn() -> Option<Rc<dyn ScrollLockTarget>>>,
}

impl BodyProvider {
    /// Wrap a resolver function.
    pub fn new(resolve: impl Fn() -> Option<Rc<dyn ScrollLockTarget>> + 'static) -> Self {
        Self {
            resolve: Box::new(resolve),
        }
    }

    /// A provider that always resolves to `target`.
    pub fn fixed(target: Rc<dyn ScrollLockTarget>) -> Self {
        Self::new(move || Some(Rc::clone(&target)))
    }

    /// A provider that never resolves; scroll locking is skipped.
    #[must_use]
    pub fn none() -> Self {
        Self::new(|| None)
    }

    /// Resolve the target now.
    #[must_use]
    pub fn resolve(&self) -> Option<Rc<dyn ScrollLockTarget>> {
        (self.resolve)()
    }
}

impl Default for BodyProvider {
    fn default() -> Self {
        Self::none()
    }
}

impl fmt::Debug for BodyProvider {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("BodyProvider").finish_non_exhaustive()
    }
}

/// Callback registered on the window for every click that reaches it.
pub type WindowClickListener = Rc<dyn Fn() -> Result<(), PresenterError>>;

/// Window-level event registration.
pub trait WindowTarget {
    /// Register `listener` for click events reaching the window.
    ///
    /// The listener stays installed until the returned registration drops.
    fn listen_click(&self, listener: WindowClickListener) -> ListenerRegistration;
}

/// RAII handle for one window listener.
///
/// Dropping it runs the removal exactly once.
#[must_use = "dropping the registration removes the listener"]
pub struct ListenerRegistration {
    remove: Option<Box<dyn FnOnce()>>,
}

impl ListenerRegistration {
    /// Create a registration whose drop runs `remove`.
    pub fn new(remove: impl FnOnce() + 'static) -> Self {
        Self {
            remove: Some(Box::new(remove)),
        }
    }

    /// Remove the listener now.
    pub fn remove(mut self) {
        self.run_remove();
    }

    fn run_remove(&mut self) {
        if let Some(remove) = self.remove.take() {
            remove();
        }
    }
}

impl Drop for ListenerRegistration {
    fn drop(&mut self) {
        self.run_remove();
    }
}

impl fmt::Debug for ListenerRegistration {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ListenerRegistration")
            .field("active", &self.remove.is_some())
            .finish()
    }
}

/// Icon collaborator; receives the icon reference unchanged.
pub trait IconDisplay {
    /// Show the icon found at `source`.
    fn show_icon(&self, source: &str);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct Style(RefCell<Option<String>>);

    impl ScrollLockTarget for Style {
        fn lock_overflow(&self, value: &str) {
            *self.0.borrow_mut() = Some(value.to_string());
        }

        fn clear_overflow(&self) {
            *self.0.borrow_mut() = None;
        }
    }

    #[test]
    fn registration_removes_exactly_once() {
        let removed = Rc::new(Cell::new(0u32));
        let removed_clone = Rc::clone(&removed);
        let registration = ListenerRegistration::new(move || {
            removed_clone.set(removed_clone.get() + 1);
        });
        registration.remove();
        assert_eq!(removed.get(), 1);
    }

    #[test]
    fn registration_removes_on_drop() {
        let removed = Rc::new(Cell::new(false));
        let removed_clone = Rc::clone(&removed);
        {
            let _registration = ListenerRegistration::new(move || removed_clone.set(true));
            assert!(!removed.get());
        }
        assert!(removed.get());
    }

    #[test]
    fn provider_resolves_fresh_each_call() {
        let calls = Rc::new(Cell::new(0u32));
        let calls_clone = Rc::clone(&calls);
        let provider = BodyProvider::new(move || {
            calls_clone.set(calls_clone.get() + 1);
            None
        });
        assert!(provider.resolve().is_none());
        assert!(provider.resolve().is_none());
        assert_eq!(calls.get(), 2);
    }

    #[test]
    fn fixed_provider_returns_same_target() {
        let style = Rc::new(Style(RefCell::new(None)));
        let provider = BodyProvider::fixed(style.clone());
        let target = provider.resolve().expect("fixed provider resolves");
        target.lock_overflow("hidden");
        assert_eq!(style.0.borrow().as_deref(), Some("hidden"));
    }

    #[test]
    fn default_provider_resolves_nothing() {
        assert!(BodyProvider::default().resolve().is_none());
    }
}

#![forbid(unsafe_code)]

//! Search modal component.
//!
//! [`SearchModal`] is the state holder. It owns two observables, `open` and
//! `icon_ref`, and wires them to their effects:
//!
//! ```text
//! click / property write / close signal / window click
//!            │
//!            ▼
//!     update cycle (BatchScope) ── open.set(..)
//!            │ cycle closes
//!            ▼
//!   PresentationBridge::apply ── present()/dismiss() + body overflow
//! ```
//!
//! # Invariants
//!
//! 1. When an entry point returns, `open` and the presented state agree
//!    (unless the presenter failed, in which case the error is returned).
//! 2. Present/dismiss calls equal the number of value changes of `open`.
//! 3. The outside-click monitor is armed iff the component is attached.
//!
//! # Failure Modes
//!
//! - **Presenter error**: returned from the entry point that caused the
//!   transition. `open` keeps the written value; the bridge does not retry.
//! - **Presenter error inside a caller-opened [`BatchScope`]**: logged and
//!   dropped; group writes with [`SearchModal::batch`] to receive it.
//! - **No window at attach**: logged; the monitor stays disarmed.
//!
//! Construction never touches the presenter. The first reconciliation
//! happens on [`attach`](SearchModal::attach), so a modal configured with
//! `open = true` is presented when it first joins the document.

mod bridge;
mod config;
mod handlers;
mod monitor;

pub use bridge::PresentationBridge;
pub use config::{
    DEFAULT_ICON_REF, DEFAULT_SCROLL_LOCK_OVERFLOW, DEFAULT_TRIGGER_LABEL, ModalConfigError,
    SearchModalConfig,
};
pub use handlers::{ClickHandler, CloseSignal};
pub use monitor::OutsideClickMonitor;

use std::cell::RefCell;
use std::rc::Rc;

use searchmodal_core::{
    AttributeChange, BodyProvider, ClickEvent, ClickOutcome, ClickPath, ClickRegion, IconDisplay,
    ModalPresenter, PresenterError, WindowTarget, parse_attribute,
};
use searchmodal_runtime::reactive::batch;
use searchmodal_runtime::{BatchScope, Observable, Subscription};
use tracing::{debug, trace, warn};

pub(crate) struct ModalInner {
    open: Observable<bool>,
    icon_ref: Observable<String>,
    bridge: Rc<PresentationBridge>,
    config: SearchModalConfig,
}

impl ModalInner {
    /// Run `f` inside one update cycle and report any presentation failure
    /// once the outermost cycle has flushed.
    ///
    /// A failure left over from a cycle opened by someone else (a raw
    /// [`BatchScope`] around an entry point) belongs to no caller of this
    /// cycle; it is logged and dropped when a root cycle starts.
    fn cycle<R>(&self, f: impl FnOnce() -> Result<R, PresenterError>) -> Result<R, PresenterError> {
        if !batch::is_batching()
            && let Some(stale) = self.bridge.take_error()
        {
            warn!(error = %stale, "dropping presentation failure from a foreign update cycle");
        }
        let result = {
            let _cycle = BatchScope::new();
            f()
        };
        if batch::is_batching() {
            // An enclosing cycle flushes and reports.
            return result;
        }
        let pending = self.bridge.take_error();
        let value = result?;
        match pending {
            Some(err) => Err(err),
            None => Ok(value),
        }
    }

    fn set_open(&self, open: bool, via: &'static str) -> Result<(), PresenterError> {
        self.cycle(|| {
            if self.open.set(open) {
                debug!(open, via, "search modal open changed");
            } else {
                trace!(open, via, "search modal open unchanged");
            }
            Ok(())
        })
    }
}

/// Builder for [`SearchModal`].
pub struct SearchModalBuilder {
    presenter: Box<dyn ModalPresenter>,
    config: SearchModalConfig,
    body: BodyProvider,
    icon: Option<Rc<dyn IconDisplay>>,
}

impl SearchModalBuilder {
    /// Use `config` instead of the defaults.
    #[must_use]
    pub fn config(mut self, config: SearchModalConfig) -> Self {
        self.config = config;
        self
    }

    /// Resolver for the scroll-lock target. Defaults to none.
    #[must_use]
    pub fn body_provider(mut self, body: BodyProvider) -> Self {
        self.body = body;
        self
    }

    /// Collaborator that renders the icon reference.
    #[must_use]
    pub fn icon_display(mut self, icon: Rc<dyn IconDisplay>) -> Self {
        self.icon = Some(icon);
        self
    }

    /// Validate the configuration and create the component.
    pub fn build(self) -> Result<SearchModal, ModalConfigError> {
        let config = self.config.validated()?;
        let bridge = Rc::new(PresentationBridge::new(
            self.presenter,
            self.body,
            config.scroll_lock_overflow.clone(),
        ));
        let inner = Rc::new(ModalInner {
            open: Observable::new(config.open),
            icon_ref: Observable::new(config.icon_ref.clone()),
            bridge: Rc::clone(&bridge),
            config,
        });

        let mut subscriptions = Vec::with_capacity(2);
        subscriptions.push(
            inner
                .open
                .subscribe(move |open: &bool| bridge.apply_deferred(*open)),
        );
        if let Some(icon) = self.icon {
            inner.icon_ref.with(|source| icon.show_icon(source));
            subscriptions.push(
                inner
                    .icon_ref
                    .subscribe(move |source: &String| icon.show_icon(source)),
            );
        }

        Ok(SearchModal {
            inner,
            monitor: RefCell::new(OutsideClickMonitor::new()),
            _subscriptions: subscriptions,
        })
    }
}

/// The search modal state holder.
///
/// `open` and `icon_ref` are the only externally mutable state. Every
/// mutation path (the four click handlers, the window monitor and the
/// setters) goes through one update cycle and applies the presentation
/// before returning.
pub struct SearchModal {
    inner: Rc<ModalInner>,
    monitor: RefCell<OutsideClickMonitor>,
    _subscriptions: Vec<Subscription>,
}

impl SearchModal {
    /// Start building a modal around `presenter`.
    pub fn builder(presenter: impl ModalPresenter + 'static) -> SearchModalBuilder {
        SearchModalBuilder {
            presenter: Box::new(presenter),
            config: SearchModalConfig::default(),
            body: BodyProvider::none(),
            icon: None,
        }
    }

    /// Configuration the modal was built with.
    #[must_use]
    pub fn config(&self) -> &SearchModalConfig {
        &self.inner.config
    }

    #[must_use]
    pub fn open(&self) -> bool {
        self.inner.open.get()
    }

    /// Write `open`. Writing the current value is a no-op.
    ///
    /// Applies immediately, attached or not.
    pub fn set_open(&self, open: bool) -> Result<(), PresenterError> {
        self.inner.set_open(open, "property")
    }

    #[must_use]
    pub fn icon_ref(&self) -> String {
        self.inner.icon_ref.get()
    }

    /// Write the icon reference. The value is opaque and passed through
    /// unchanged.
    pub fn set_icon_ref(&self, icon_ref: impl Into<String>) {
        let _cycle = BatchScope::new();
        if !self.inner.icon_ref.set(icon_ref.into()) {
            trace!("icon reference unchanged");
        }
    }

    /// Restore the configured icon reference.
    pub fn reset_icon_ref(&self) {
        self.set_icon_ref(self.inner.config.icon_ref.clone());
    }

    /// Whether the modal primitive is currently presented.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.inner.bridge.is_presented()
    }

    /// Redirect the scroll lock to another element.
    pub fn set_body_provider(&self, provider: BodyProvider) {
        self.inner.bridge.set_body_provider(provider);
    }

    /// Group several writes into one update cycle. Only the final `open`
    /// value reaches the presenter.
    pub fn batch<R>(
        &self,
        f: impl FnOnce(&Self) -> Result<R, PresenterError>,
    ) -> Result<R, PresenterError> {
        self.inner.cycle(|| f(self))
    }

    /// The component joined the document.
    ///
    /// Arms the outside-click monitor on `window` (a no-op if already armed)
    /// and reconciles the presentation with `open`. With no window the
    /// monitor stays disarmed.
    pub fn attach(&self, window: Option<&dyn WindowTarget>) -> Result<(), PresenterError> {
        match window {
            Some(window) => {
                self.monitor
                    .borrow_mut()
                    .arm(window, handlers::window(&self.inner));
            }
            None => debug!("no window; outside-click monitor stays disarmed"),
        }
        self.inner
            .cycle(|| self.inner.bridge.apply(self.inner.open.get()))
    }

    /// The component left the document. Removes the window listener.
    pub fn detach(&self) {
        self.monitor.borrow_mut().disarm();
    }

    #[must_use]
    pub fn is_armed(&self) -> bool {
        self.monitor.borrow().is_armed()
    }

    /// Handler for the toggle button.
    #[must_use]
    pub fn trigger_handler(&self) -> ClickHandler {
        handlers::trigger(&self.inner)
    }

    /// Handler for the dialog surface outside the content box.
    #[must_use]
    pub fn backdrop_handler(&self) -> ClickHandler {
        handlers::backdrop(&self.inner)
    }

    /// Handler for the content wrapper.
    #[must_use]
    pub fn content_handler(&self) -> ClickHandler {
        handlers::content()
    }

    /// Handler for the embedded search element's close request.
    #[must_use]
    pub fn close_signal(&self) -> CloseSignal {
        handlers::close_signal(&self.inner)
    }

    /// Handler owned by `region`; `None` for clicks outside the component.
    #[must_use]
    pub fn handler(&self, region: ClickRegion) -> Option<ClickHandler> {
        match region {
            ClickRegion::Trigger => Some(self.trigger_handler()),
            ClickRegion::Content => Some(self.content_handler()),
            ClickRegion::Backdrop => Some(self.backdrop_handler()),
            ClickRegion::Outside => None,
        }
    }

    /// Deliver a synthetic click originating in `origin`.
    ///
    /// The click walks its [`ClickPath`] in one update cycle; if no handler
    /// stops it, it reaches the window, which here means this component's
    /// monitor (when armed).
    pub fn dispatch_click(&self, origin: ClickRegion) -> Result<ClickOutcome, PresenterError> {
        let event = ClickEvent::new();
        self.inner.cycle(|| {
            let outcome = ClickPath::from_origin(origin).dispatch(&event, |stage, event| {
                match self.handler(stage) {
                    Some(handler) => handler(event),
                    None => Ok(()),
                }
            })?;
            if outcome.reaches_window() {
                self.monitor.borrow().deliver()?;
            }
            Ok(outcome)
        })
    }

    /// Apply an attribute mutation. Returns `false` for attributes the
    /// component does not observe.
    pub fn apply_attribute(&self, name: &str, value: Option<&str>) -> Result<bool, PresenterError> {
        match parse_attribute(name, value) {
            Some(AttributeChange::Open(open)) => {
                self.inner.set_open(open, "attribute")?;
                Ok(true)
            }
            Some(AttributeChange::IconRef(Some(icon_ref))) => {
                self.set_icon_ref(icon_ref);
                Ok(true)
            }
            Some(AttributeChange::IconRef(None)) => {
                self.reset_icon_ref();
                Ok(true)
            }
            None => Ok(false),
        }
    }
}

impl std::fmt::Debug for SearchModal {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("SearchModal")
            .field("open", &self.open())
            .field("icon_ref", &self.icon_ref())
            .field("presented", &self.is_presented())
            .field("armed", &self.is_armed())
            .finish()
    }
}

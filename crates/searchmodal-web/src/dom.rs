#![forbid(unsafe_code)]

//! DOM implementations of the host seams. Only compiled on `wasm32`.

use std::rc::Rc;

use searchmodal_core::{
    BodyProvider, IconDisplay, ListenerRegistration, ModalPresenter, PresenterError, PresenterOp,
    Propagation, ScrollLockTarget, WindowClickListener, WindowTarget,
};
use tracing::{debug, warn};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Element, Event, EventTarget, HtmlDialogElement, HtmlElement, Window};

use crate::element_core::{ICON_SOURCE_ATTRIBUTE, OVERFLOW_PROPERTY};

pub(crate) type DomListener = Closure<dyn FnMut(Event) -> Result<(), JsValue>>;

/// Best-effort message for a thrown JS value.
pub(crate) fn js_message(value: &JsValue) -> String {
    if let Some(err) = value.dyn_ref::<js_sys::Error>() {
        return String::from(err.message());
    }
    value.as_string().unwrap_or_else(|| format!("{value:?}"))
}

pub(crate) fn presenter_error_to_js(err: &PresenterError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

/// `<dialog>` as the native modal primitive.
pub(crate) struct DialogPresenter {
    dialog: HtmlDialogElement,
}

impl DialogPresenter {
    pub(crate) fn new(dialog: HtmlDialogElement) -> Self {
        Self { dialog }
    }
}

impl ModalPresenter for DialogPresenter {
    fn present(&self) -> Result<(), PresenterError> {
        self.dialog
            .show_modal()
            .map_err(|e| PresenterError::new(PresenterOp::Present, js_message(&e)))
    }

    fn dismiss(&self) -> Result<(), PresenterError> {
        self.dialog.close();
        Ok(())
    }
}

/// Inline style of an element used as the scroll-lock target.
pub(crate) struct DomScrollLock {
    element: HtmlElement,
}

impl ScrollLockTarget for DomScrollLock {
    fn lock_overflow(&self, value: &str) {
        if let Err(e) = self.element.style().set_property(OVERFLOW_PROPERTY, value) {
            warn!(error = %js_message(&e), "failed to lock body overflow");
        }
    }

    fn clear_overflow(&self) {
        if let Err(e) = self.element.style().remove_property(OVERFLOW_PROPERTY) {
            warn!(error = %js_message(&e), "failed to clear body overflow");
        }
    }
}

/// Always resolves `element`.
pub(crate) fn element_provider(element: HtmlElement) -> BodyProvider {
    BodyProvider::new(move || {
        Some(Rc::new(DomScrollLock {
            element: element.clone(),
        }) as Rc<dyn ScrollLockTarget>)
    })
}

/// Resolves `document.body` fresh on every call.
pub(crate) fn document_body_provider() -> BodyProvider {
    BodyProvider::new(|| {
        let body = web_sys::window()?.document()?.body()?;
        Some(Rc::new(DomScrollLock { element: body }) as Rc<dyn ScrollLockTarget>)
    })
}

/// The global `window`.
pub(crate) struct DomWindow {
    window: Window,
}

impl DomWindow {
    pub(crate) fn current() -> Option<Self> {
        web_sys::window().map(|window| Self { window })
    }
}

impl WindowTarget for DomWindow {
    fn listen_click(&self, listener: WindowClickListener) -> ListenerRegistration {
        let target: EventTarget = self.window.clone().into();
        match listen(target, "click", dom_listener(move |_event| listener())) {
            Some(listener) => ListenerRegistration::new(move || drop(listener)),
            None => ListenerRegistration::new(|| {}),
        }
    }
}

/// Icon element whose `href` receives the icon reference.
pub(crate) struct DomIcon {
    element: Element,
}

impl DomIcon {
    pub(crate) fn new(element: Element) -> Self {
        Self { element }
    }
}

impl IconDisplay for DomIcon {
    fn show_icon(&self, source: &str) {
        if let Err(e) = self.element.set_attribute(ICON_SOURCE_ATTRIBUTE, source) {
            warn!(error = %js_message(&e), "failed to set icon source");
        }
    }
}

/// A browser event seen as a [`Propagation`] target.
pub(crate) struct DomEvent<'a>(pub(crate) &'a Event);

impl Propagation for DomEvent<'_> {
    fn stop_propagation(&self) {
        self.0.stop_propagation();
    }
}

/// An installed DOM listener. Dropping it removes the listener.
pub(crate) struct ElementListener {
    target: EventTarget,
    event: &'static str,
    callback: DomListener,
}

impl Drop for ElementListener {
    fn drop(&mut self) {
        if let Err(e) = self
            .target
            .remove_event_listener_with_callback(self.event, self.callback.as_ref().unchecked_ref())
        {
            warn!(event = self.event, error = %js_message(&e), "failed to remove listener");
        }
    }
}

/// Install `callback` for `event` on `target`.
///
/// Returns `None`, after logging, if the browser rejected the registration.
pub(crate) fn listen(
    target: EventTarget,
    event: &'static str,
    callback: DomListener,
) -> Option<ElementListener> {
    match target.add_event_listener_with_callback(event, callback.as_ref().unchecked_ref()) {
        Ok(()) => {
            debug!(event, "dom listener installed");
            Some(ElementListener {
                target,
                event,
                callback,
            })
        }
        Err(e) => {
            warn!(event, error = %js_message(&e), "failed to install listener");
            None
        }
    }
}

/// Wrap a fallible handler as a DOM listener closure.
pub(crate) fn dom_listener(
    mut handler: impl FnMut(&Event) -> Result<(), PresenterError> + 'static,
) -> DomListener {
    Closure::new(move |event: Event| handler(&event).map_err(|e| presenter_error_to_js(&e)))
}

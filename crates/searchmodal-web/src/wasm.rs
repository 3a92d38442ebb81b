#![forbid(unsafe_code)]

//! `wasm-bindgen` exports for the search modal element.
//!
//! This module builds the shadow tree described in
//! [`super::element_core`], wires its listeners to the handlers of a
//! [`SearchModal`], and exposes the custom-element lifecycle to JavaScript.
//! Only compiled on `wasm32` targets.

use std::rc::Rc;

use js_sys::{Array, Reflect};
use searchmodal_core::{ClickRegion, OBSERVED_ATTRIBUTES, WindowTarget};
use searchmodal_widgets::SearchModal;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{Document, Element, HtmlDialogElement, HtmlElement, ShadowRootInit, ShadowRootMode};

use super::dom::{
    DialogPresenter, DomEvent, DomIcon, DomListener, DomWindow, ElementListener,
    document_body_provider, dom_listener, element_provider, js_message, listen,
    presenter_error_to_js,
};
use super::element_core::{
    CONTENT_ID, CONTENT_TAG, DIALOG_TAG, ICON_TAG, Part, SEARCH_TAG, TRIGGER_TAG, icon_attributes,
    parse_config, trigger_attributes,
};
use crate::error::MountError;

fn console_error(msg: &str) {
    let global = js_sys::global();
    let Ok(console) = Reflect::get(&global, &"console".into()) else {
        return;
    };
    let Ok(error) = Reflect::get(&console, &"error".into()) else {
        return;
    };
    let Ok(error_fn) = error.dyn_into::<js_sys::Function>() else {
        return;
    };
    let _ = error_fn.call1(&console, &JsValue::from_str(msg));
}

fn install_panic_hook() {
    use std::sync::Once;

    static ONCE: Once = Once::new();
    ONCE.call_once(|| {
        std::panic::set_hook(Box::new(|info| {
            let msg = if let Some(loc) = info.location() {
                format!(
                    "panic at {}:{}:{}: {info}",
                    loc.file(),
                    loc.line(),
                    loc.column()
                )
            } else {
                format!("panic: {info}")
            };
            console_error(&msg);
        }));
    });
}

fn mount_error_to_js(err: &MountError) -> JsValue {
    js_sys::Error::new(&err.to_string()).into()
}

fn dom_error(value: JsValue) -> MountError {
    MountError::Dom(js_message(&value))
}

fn create(document: &Document, tag: &str) -> Result<Element, MountError> {
    document.create_element(tag).map_err(dom_error)
}

fn set_attributes(element: &Element, attrs: &[(&'static str, String)]) -> Result<(), MountError> {
    for (name, value) in attrs {
        element.set_attribute(name, value).map_err(dom_error)?;
    }
    Ok(())
}

struct ShadowTree {
    trigger: Element,
    icon: Element,
    dialog: HtmlDialogElement,
    content: Element,
    search: Element,
}

impl ShadowTree {
    fn build(
        host: &HtmlElement,
        trigger_attrs: &[(&'static str, String)],
        icon_ref: &str,
    ) -> Result<Self, MountError> {
        let document = host.owner_document().ok_or(MountError::NoDocument)?;
        let root = host
            .attach_shadow(&ShadowRootInit::new(ShadowRootMode::Open))
            .map_err(dom_error)?;

        let trigger = create(&document, TRIGGER_TAG)?;
        set_attributes(&trigger, trigger_attrs)?;
        let icon = create(&document, ICON_TAG)?;
        set_attributes(&icon, &icon_attributes(icon_ref))?;
        trigger.append_child(&icon).map_err(dom_error)?;

        let dialog = create(&document, DIALOG_TAG)?
            .dyn_into::<HtmlDialogElement>()
            .map_err(|_| MountError::MissingDialog)?;
        let content = create(&document, CONTENT_TAG)?;
        content.set_id(CONTENT_ID);
        let search = create(&document, SEARCH_TAG)?;
        content.append_child(&search).map_err(dom_error)?;
        dialog.append_child(&content).map_err(dom_error)?;

        root.append_child(&trigger).map_err(dom_error)?;
        root.append_child(&dialog).map_err(dom_error)?;

        Ok(Self {
            trigger,
            icon,
            dialog,
            content,
            search,
        })
    }

    fn part(&self, part: Part) -> &Element {
        match part {
            Part::Trigger => &self.trigger,
            Part::Dialog | Part::DialogClose => &self.dialog,
            Part::Content => &self.content,
            Part::Search => &self.search,
        }
    }
}

/// The search modal element, driven by a custom-element shim.
#[wasm_bindgen]
pub struct SearchModalElement {
    modal: SearchModal,
    _listeners: Vec<ElementListener>,
}

#[wasm_bindgen]
impl SearchModalElement {
    /// Build the shadow tree inside `host` and wire it up.
    ///
    /// `config_json` is an optional partial `SearchModalConfig` document.
    /// The modal is not presented until [`connected`](Self::connected).
    pub fn mount(
        host: HtmlElement,
        config_json: Option<String>,
    ) -> Result<SearchModalElement, JsValue> {
        install_panic_hook();
        Self::mount_inner(&host, config_json.as_deref()).map_err(|e| mount_error_to_js(&e))
    }

    /// `connectedCallback`: arm the window listener and reconcile.
    pub fn connected(&self) -> Result<(), JsValue> {
        let window = DomWindow::current();
        self.modal
            .attach(window.as_ref().map(|w| w as &dyn WindowTarget))
            .map_err(|e| presenter_error_to_js(&e))
    }

    /// `disconnectedCallback`: remove the window listener.
    pub fn disconnected(&self) {
        self.modal.detach();
    }

    #[wasm_bindgen(getter)]
    pub fn open(&self) -> bool {
        self.modal.open()
    }

    #[wasm_bindgen(js_name = setOpen)]
    pub fn set_open(&self, open: bool) -> Result<(), JsValue> {
        self.modal
            .set_open(open)
            .map_err(|e| presenter_error_to_js(&e))
    }

    #[wasm_bindgen(getter = iconSrc)]
    pub fn icon_src(&self) -> String {
        self.modal.icon_ref()
    }

    #[wasm_bindgen(js_name = setIconSrc)]
    pub fn set_icon_src(&self, icon_src: String) {
        self.modal.set_icon_ref(icon_src);
    }

    /// Redirect the scroll lock to `element`; `None` restores
    /// `document.body`.
    #[wasm_bindgen(js_name = setBodyElement)]
    pub fn set_body_element(&self, element: Option<HtmlElement>) {
        let provider = match element {
            Some(element) => element_provider(element),
            None => document_body_provider(),
        };
        self.modal.set_body_provider(provider);
    }

    /// `attributeChangedCallback`. Returns whether the attribute is observed.
    #[wasm_bindgen(js_name = attributeChanged)]
    pub fn attribute_changed(
        &self,
        name: &str,
        _old_value: Option<String>,
        new_value: Option<String>,
    ) -> Result<bool, JsValue> {
        self.modal
            .apply_attribute(name, new_value.as_deref())
            .map_err(|e| presenter_error_to_js(&e))
    }

    /// Names for the shim's `static observedAttributes`.
    #[wasm_bindgen(js_name = observedAttributes)]
    pub fn observed_attributes() -> Array {
        OBSERVED_ATTRIBUTES
            .iter()
            .map(|name| JsValue::from_str(name))
            .collect()
    }
}

impl SearchModalElement {
    fn mount_inner(host: &HtmlElement, config_json: Option<&str>) -> Result<Self, MountError> {
        let config = parse_config(config_json)?;
        let tree = ShadowTree::build(host, &trigger_attributes(&config), &config.icon_ref)?;

        let modal = SearchModal::builder(DialogPresenter::new(tree.dialog.clone()))
            .config(config)
            .body_provider(document_body_provider())
            .icon_display(Rc::new(DomIcon::new(tree.icon.clone())))
            .build()?;

        let mut listeners = Vec::with_capacity(Part::ALL.len());
        for part in Part::ALL {
            let callback = match part.region() {
                Some(region) => click_listener(&modal, region),
                // The search element's "close" and the dialog's own close
                // (Escape) both end in `open = false`.
                None => {
                    let close = modal.close_signal();
                    dom_listener(move |_event| close())
                }
            };
            listeners.extend(listen(tree.part(part).clone().into(), part.event(), callback));
        }

        Ok(Self {
            modal,
            _listeners: listeners,
        })
    }
}

fn click_listener(modal: &SearchModal, region: ClickRegion) -> DomListener {
    let handler = modal.handler(region);
    dom_listener(move |event| match handler.as_ref() {
        Some(handler) => handler(&DomEvent(event)),
        None => Ok(()),
    })
}

#![forbid(unsafe_code)]

//! Browser host for the search modal.
//!
//! [`SearchModalElement`] is a `wasm-bindgen` export driven by a thin
//! custom-element shim on the JavaScript side: the shim forwards
//! `connectedCallback`, `disconnectedCallback` and `attributeChangedCallback`
//! and exposes the `open` / `iconSrc` properties. Everything else (shadow
//! tree, click wiring, `<dialog>` presentation, body scroll lock, window
//! listener lifetime) happens here, on top of `searchmodal-widgets`.

#[cfg(target_arch = "wasm32")]
mod dom;
#[cfg(target_arch = "wasm32")]
mod wasm;

#[cfg(target_arch = "wasm32")]
pub use wasm::SearchModalElement;

// Element core is used by the wasm module and by native tests.
#[cfg(any(target_arch = "wasm32", test))]
mod element_core;

mod error;

pub use error::MountError;

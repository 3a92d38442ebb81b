#![forbid(unsafe_code)]

//! searchmodal runtime
//!
//! Change tracking and update cycles for the search modal.
//!
//! # Key Components
//!
//! - [`Observable`] - shared value with change notification
//! - [`Subscription`] - RAII unsubscribe guard
//! - [`BatchScope`] - one update cycle; coalesces notifications
//!
//! # Role in searchmodal
//! `searchmodal-runtime` is what turns "a property was written" into "the
//! presentation bridge ran once". Widgets keep their externally visible state
//! in observables and open a `BatchScope` around every entry point, so side
//! effects are applied exactly once per cycle, before control returns to the
//! host event loop.

pub mod reactive;

pub use reactive::{BatchScope, Observable, Subscription};

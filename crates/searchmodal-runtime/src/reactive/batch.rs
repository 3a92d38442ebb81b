#![forbid(unsafe_code)]

//! Update cycles: batch coalescing for [`Observable`](super::Observable)
//! notifications.
//!
//! A [`BatchScope`] marks one update cycle. Values written inside it are
//! visible immediately through `get()`, but subscriber callbacks are queued
//! and run once, with the latest value, when the outermost scope drops.
//!
//! ```ignore
//! let open = Observable::new(false);
//! {
//!     let _cycle = BatchScope::new();
//!     open.set(true);   // deferred
//!     open.set(false);  // deferred, replaces the queued callback
//! }                     // subscribers run once and see `false`
//! ```
//!
//! # Invariants
//!
//! 1. Nested scopes are supported: only the outermost scope flushes.
//! 2. Flush calls deferred callbacks in the order they were first enqueued.
//! 3. The cycle is closed before callbacks run, so writes made by a callback
//!    are delivered immediately instead of being queued into a dead cycle.
//!
//! # Failure Modes
//!
//! - **Callback panics during flush**: Remaining callbacks are still called.
//!   The first panic is re-raised after all callbacks have been attempted.

use std::cell::RefCell;

use tracing::debug_span;
use web_time::Instant;

type DeferredNotify = Box<dyn FnOnce()>;

struct DeferredEntry {
    key: usize,
    notify: DeferredNotify,
}

struct BatchContext {
    depth: u32,
    deferred: Vec<DeferredEntry>,
}

thread_local! {
    static BATCH_CTX: RefCell<Option<BatchContext>> = const { RefCell::new(None) };
}

/// Returns true if an update cycle is open on this thread.
pub fn is_batching() -> bool {
    BATCH_CTX.with(|ctx| ctx.borrow().is_some())
}

/// Queue `f` for the end of the current cycle, or run it now if none is open.
/// A later call with the same `key` replaces the queued callback while
/// keeping its original queue position.
///
/// Returns `true` if the call was deferred.
pub fn defer_or_run_keyed(key: usize, f: impl FnOnce() + 'static) -> bool {
    let notify: DeferredNotify = Box::new(f);
    let immediate = BATCH_CTX.with(|ctx| {
        let mut guard = ctx.borrow_mut();
        let Some(batch) = guard.as_mut() else {
            return Some(notify);
        };
        match batch.deferred.iter_mut().find(|entry| entry.key == key) {
            Some(entry) => entry.notify = notify,
            None => batch.deferred.push(DeferredEntry { key, notify }),
        }
        None
    });

    match immediate {
        Some(notify) => {
            notify();
            false
        }
        None => true,
    }
}

fn flush(deferred: Vec<DeferredEntry>) {
    if deferred.is_empty() {
        return;
    }

    let started = Instant::now();
    let span = debug_span!(
        "reactive.flush",
        callbacks = deferred.len(),
        duration_us = tracing::field::Empty
    );
    let _entered = span.enter();

    let mut first_panic: Option<Box<dyn std::any::Any + Send>> = None;
    for entry in deferred {
        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(entry.notify));
        if let Err(payload) = result
            && first_panic.is_none()
        {
            first_panic = Some(payload);
        }
    }

    let duration_us = u64::try_from(started.elapsed().as_micros()).unwrap_or(u64::MAX);
    span.record("duration_us", duration_us);

    if let Some(payload) = first_panic {
        std::panic::resume_unwind(payload);
    }
}

/// RAII guard for one update cycle.
///
/// While a `BatchScope` is alive, observable notifications are deferred.
/// When the outermost scope drops, the deferred notifications fire.
pub struct BatchScope {
    _cycle: (),
}

impl BatchScope {
    /// Open a cycle, or nest inside the one already open.
    #[must_use]
    pub fn new() -> Self {
        BATCH_CTX.with(|ctx| {
            let mut guard = ctx.borrow_mut();
            match guard.as_mut() {
                Some(batch) => batch.depth += 1,
                None => {
                    *guard = Some(BatchContext {
                        depth: 1,
                        deferred: Vec::new(),
                    });
                }
            }
        });
        Self { _cycle: () }
    }
}

impl Default for BatchScope {
    fn default() -> Self {
        Self::new()
    }
}

impl Drop for BatchScope {
    fn drop(&mut self) {
        let finished = BATCH_CTX.with(|ctx| {
            let mut guard = ctx.borrow_mut();
            let batch = guard.as_mut()?;
            batch.depth -= 1;
            if batch.depth == 0 {
                guard.take().map(|batch| batch.deferred)
            } else {
                None
            }
        });

        if let Some(deferred) = finished {
            flush(deferred);
        }
    }
}

impl std::fmt::Debug for BatchScope {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let depth = BATCH_CTX.with(|ctx| ctx.borrow().as_ref().map_or(0, |b| b.depth));
        f.debug_struct("BatchScope").field("depth", &depth).finish()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reactive::Observable;
    use std::cell::Cell;
    use std::rc::Rc;

    #[test]
    fn batch_defers_notifications() {
        let obs = Observable::new(false);
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = obs.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        {
            let _cycle = BatchScope::new();
            obs.set(true);
            assert_eq!(count.get(), 0);
            assert!(obs.get(), "value is visible inside the cycle");
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn repeated_writes_coalesce_to_one_callback() {
        let obs = Observable::new(0u32);
        let seen = Rc::new(RefCell::new(Vec::new()));
        let seen_clone = Rc::clone(&seen);
        let _sub = obs.subscribe(move |v| seen_clone.borrow_mut().push(*v));

        {
            let _cycle = BatchScope::new();
            obs.set(1);
            obs.set(2);
            obs.set(3);
        }

        assert_eq!(*seen.borrow(), vec![3]);
    }

    #[test]
    fn nested_batch_only_outermost_flushes() {
        let obs = Observable::new(0u32);
        let count = Rc::new(Cell::new(0u32));
        let count_clone = Rc::clone(&count);
        let _sub = obs.subscribe(move |_| count_clone.set(count_clone.get() + 1));

        {
            let _outer = BatchScope::new();
            obs.set(1);
            {
                let _inner = BatchScope::new();
                obs.set(2);
            }
            assert_eq!(count.get(), 0);
        }
        assert_eq!(count.get(), 1);
    }

    #[test]
    fn is_batching_flag() {
        assert!(!is_batching());
        {
            let _cycle = BatchScope::new();
            assert!(is_batching());
        }
        assert!(!is_batching());
    }

    #[test]
    fn defer_or_run_without_batch_runs_now() {
        let ran = Rc::new(Cell::new(false));
        let ran_clone = Rc::clone(&ran);
        assert!(!defer_or_run_keyed(0, move || ran_clone.set(true)));
        assert!(ran.get());
    }

    #[test]
    fn keyed_entries_keep_first_enqueue_order() {
        let order = Rc::new(RefCell::new(Vec::new()));
        let o1 = Rc::clone(&order);
        let o2 = Rc::clone(&order);
        let o3 = Rc::clone(&order);

        {
            let _cycle = BatchScope::new();
            assert!(defer_or_run_keyed(1, move || o1.borrow_mut().push("first-old")));
            assert!(defer_or_run_keyed(2, move || o2.borrow_mut().push("second")));
            assert!(defer_or_run_keyed(1, move || o3.borrow_mut().push("first-new")));
        }

        assert_eq!(*order.borrow(), vec!["first-new", "second"]);
    }

    #[test]
    fn writes_from_flushed_callbacks_are_not_lost() {
        let source = Observable::new(0u32);
        let mirror = Observable::new(0u32);
        let mirror_clone = mirror.clone();
        let _sub = source.subscribe(move |v| {
            mirror_clone.set(*v + 1);
        });
        let mirror_seen = Rc::new(Cell::new(0u32));
        let mirror_seen_clone = Rc::clone(&mirror_seen);
        let _mirror_sub = mirror.subscribe(move |v| mirror_seen_clone.set(*v));

        {
            let _cycle = BatchScope::new();
            source.set(10);
        }

        assert_eq!(mirror.get(), 11);
        assert_eq!(mirror_seen.get(), 11);
        assert!(!is_batching());
    }

    #[test]
    fn panicking_callback_does_not_starve_others() {
        let ran = Rc::new(Cell::new(false));
        let ran_clone = Rc::clone(&ran);

        let result = std::panic::catch_unwind(std::panic::AssertUnwindSafe(|| {
            let _cycle = BatchScope::new();
            defer_or_run_keyed(1, || panic!("boom"));
            defer_or_run_keyed(2, move || ran_clone.set(true));
        }));

        assert!(result.is_err());
        assert!(ran.get());
        assert!(!is_batching());
    }
}

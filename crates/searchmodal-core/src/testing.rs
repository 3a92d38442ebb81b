#![forbid(unsafe_code)]

//! Headless collaborator doubles.
//!
//! Available with the `test-helpers` feature. Every double is a cheap
//! `Clone` handle over shared state, so a test can hand one clone to the
//! component and keep another to inspect what happened.

use std::cell::{Cell, RefCell};
use std::rc::{Rc, Weak};

use crate::error::{PresenterError, PresenterOp};
use crate::host::{
    IconDisplay, ListenerRegistration, ModalPresenter, ScrollLockTarget, WindowClickListener,
    WindowTarget,
};

/// One recorded presenter call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PresenterCall {
    Present,
    Dismiss,
}

#[derive(Default)]
struct PresenterLog {
    calls: RefCell<Vec<PresenterCall>>,
    presented: Cell<bool>,
    failing: Cell<Option<PresenterOp>>,
}

/// Presenter that records calls and can be told to fail.
#[derive(Clone, Default)]
pub struct RecordingPresenter {
    log: Rc<PresenterLog>,
}

impl RecordingPresenter {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Every call so far, in order. Failed calls are recorded too.
    #[must_use]
    pub fn calls(&self) -> Vec<PresenterCall> {
        self.log.calls.borrow().clone()
    }

    #[must_use]
    pub fn present_count(&self) -> usize {
        self.count(PresenterCall::Present)
    }

    #[must_use]
    pub fn dismiss_count(&self) -> usize {
        self.count(PresenterCall::Dismiss)
    }

    /// Whether the last successful call was `present`.
    #[must_use]
    pub fn is_presented(&self) -> bool {
        self.log.presented.get()
    }

    /// Make every subsequent `op` call fail; `None` restores success.
    pub fn fail_on(&self, op: Option<PresenterOp>) {
        self.log.failing.set(op);
    }

    fn count(&self, call: PresenterCall) -> usize {
        self.log.calls.borrow().iter().filter(|c| **c == call).count()
    }

    fn record(&self, call: PresenterCall, op: PresenterOp) -> Result<(), PresenterError> {
        self.log.calls.borrow_mut().push(call);
        if self.log.failing.get() == Some(op) {
            return Err(PresenterError::new(op, "headless presenter failure"));
        }
        self.log.presented.set(op == PresenterOp::Present);
        Ok(())
    }
}

impl ModalPresenter for RecordingPresenter {
    fn present(&self) -> Result<(), PresenterError> {
        self.record(PresenterCall::Present, PresenterOp::Present)
    }

    fn dismiss(&self) -> Result<(), PresenterError> {
        self.record(PresenterCall::Dismiss, PresenterOp::Dismiss)
    }
}

impl std::fmt::Debug for RecordingPresenter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RecordingPresenter")
            .field("calls", &self.log.calls.borrow())
            .field("presented", &self.log.presented.get())
            .finish()
    }
}

/// In-memory stand-in for `document.body`'s inline style.
#[derive(Debug, Default)]
pub struct HeadlessBody {
    overflow: RefCell<Option<String>>,
    writes: Cell<usize>,
}

impl HeadlessBody {
    #[must_use]
    pub fn new() -> Rc<Self> {
        Rc::new(Self::default())
    }

    /// Current inline `overflow` override, if any.
    #[must_use]
    pub fn overflow(&self) -> Option<String> {
        self.overflow.borrow().clone()
    }

    /// Number of lock/clear calls received.
    #[must_use]
    pub fn writes(&self) -> usize {
        self.writes.get()
    }
}

impl ScrollLockTarget for HeadlessBody {
    fn lock_overflow(&self, value: &str) {
        *self.overflow.borrow_mut() = Some(value.to_owned());
        self.writes.set(self.writes.get() + 1);
    }

    fn clear_overflow(&self) {
        *self.overflow.borrow_mut() = None;
        self.writes.set(self.writes.get() + 1);
    }
}

#[derive(Default)]
struct WindowState {
    next_id: u64,
    listeners: Vec<(u64, WindowClickListener)>,
    added: usize,
    removed: usize,
}

/// Window double that keeps registered click listeners in a list.
#[derive(Clone, Default)]
pub struct HeadlessWindow {
    state: Rc<RefCell<WindowState>>,
}

impl HeadlessWindow {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Deliver a click to every listener currently installed.
    pub fn click(&self) -> Result<(), PresenterError> {
        let listeners: Vec<WindowClickListener> = self
            .state
            .borrow()
            .listeners
            .iter()
            .map(|(_, listener)| Rc::clone(listener))
            .collect();
        for listener in listeners {
            listener()?;
        }
        Ok(())
    }

    #[must_use]
    pub fn listener_count(&self) -> usize {
        self.state.borrow().listeners.len()
    }

    #[must_use]
    pub fn added_count(&self) -> usize {
        self.state.borrow().added
    }

    #[must_use]
    pub fn removed_count(&self) -> usize {
        self.state.borrow().removed
    }
}

impl WindowTarget for HeadlessWindow {
    fn listen_click(&self, listener: WindowClickListener) -> ListenerRegistration {
        let id = {
            let mut state = self.state.borrow_mut();
            let id = state.next_id;
            state.next_id += 1;
            state.added += 1;
            state.listeners.push((id, listener));
            id
        };
        let weak: Weak<RefCell<WindowState>> = Rc::downgrade(&self.state);
        ListenerRegistration::new(move || {
            if let Some(state) = weak.upgrade() {
                let mut state = state.borrow_mut();
                state.listeners.retain(|(lid, _)| *lid != id);
                state.removed += 1;
            }
        })
    }
}

impl std::fmt::Debug for HeadlessWindow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let state = self.state.borrow();
        f.debug_struct("HeadlessWindow")
            .field("listeners", &state.listeners.len())
            .field("added", &state.added)
            .field("removed", &state.removed)
            .finish()
    }
}

/// Icon double recording every source it was asked to show.
#[derive(Debug, Clone, Default)]
pub struct RecordingIcon {
    sources: Rc<RefCell<Vec<String>>>,
}

impl RecordingIcon {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    #[must_use]
    pub fn sources(&self) -> Vec<String> {
        self.sources.borrow().clone()
    }

    /// Most recent source, if any.
    #[must_use]
    pub fn current(&self) -> Option<String> {
        self.sources.borrow().last().cloned()
    }
}

impl IconDisplay for RecordingIcon {
    fn show_icon(&self, source: &str) {
        self.sources.borrow_mut().push(source.to_owned());
    }
}

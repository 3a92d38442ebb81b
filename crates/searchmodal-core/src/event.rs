#![forbid(unsafe_code)]

//! Click events and explicit propagation paths.
//!
//! The search modal owns three click surfaces, nested like this:
//!
//! ```text
//! window
//! ├── trigger button
//! └── dialog (backdrop surface)
//!     └── content wrapper
//!         └── embedded search element
//! ```
//!
//! Instead of relying on incidental DOM bubbling order, each click origin
//! maps to a fixed [`ClickPath`]: the ordered list of component surfaces a
//! click visits before it reaches the window. Handlers run in that order and
//! may call [`Propagation::stop_propagation`]; once stopped, no later stage
//! (including the window) sees the click.
//!
//! # Design Notes
//!
//! - The window is never a stage of the path. It is the implicit last stop,
//!   reported through [`ClickOutcome::reaches_window`].
//! - A DOM host gets the same ordering for free from real bubbling, and calls
//!   the same handlers with the browser event as the [`Propagation`] target.

use std::cell::Cell;

/// Anything that can stop an in-flight click from bubbling further.
pub trait Propagation {
    /// Prevent outer handlers (and the window) from seeing this click.
    fn stop_propagation(&self);
}

/// A click surface owned by the search modal, or a point outside it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ClickRegion {
    /// The toggle button.
    Trigger,
    /// The content wrapper inside the dialog.
    Content,
    /// The dialog surface outside the content box (the dimmed backdrop).
    Backdrop,
    /// Anywhere else in the document.
    Outside,
}

impl ClickRegion {
    /// All regions, in declaration order.
    pub const ALL: [Self; 4] = [Self::Trigger, Self::Content, Self::Backdrop, Self::Outside];

    /// Stable lowercase name, used in logs.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Trigger => "trigger",
            Self::Content => "content",
            Self::Backdrop => "backdrop",
            Self::Outside => "outside",
        }
    }
}

impl std::fmt::Display for ClickRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered component surfaces a click visits, innermost first.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ClickPath {
    origin: ClickRegion,
    stages: &'static [ClickRegion],
}

impl ClickPath {
    /// Path for a click that originates in `origin`.
    #[must_use]
    pub const fn from_origin(origin: ClickRegion) -> Self {
        let stages: &'static [ClickRegion] = match origin {
            ClickRegion::Trigger => &[ClickRegion::Trigger],
            ClickRegion::Content => &[ClickRegion::Content, ClickRegion::Backdrop],
            ClickRegion::Backdrop => &[ClickRegion::Backdrop],
            ClickRegion::Outside => &[],
        };
        Self { origin, stages }
    }

    /// Component stages in bubbling order.
    #[must_use]
    pub const fn stages(&self) -> &'static [ClickRegion] {
        self.stages
    }

    /// Walk the path, calling `handler` per stage until propagation stops.
    ///
    /// A handler error aborts the walk and is returned as-is.
    pub fn dispatch<E>(
        &self,
        event: &ClickEvent,
        mut handler: impl FnMut(ClickRegion, &ClickEvent) -> Result<(), E>,
    ) -> Result<ClickOutcome, E> {
        let mut visited = Vec::with_capacity(self.stages.len());
        for &stage in self.stages {
            if event.is_propagation_stopped() {
                break;
            }
            visited.push(stage);
            handler(stage, event)?;
        }
        Ok(ClickOutcome {
            origin: self.origin,
            visited,
            stopped: event.is_propagation_stopped(),
        })
    }
}

/// A synthetic click used by headless hosts and tests.
#[derive(Debug, Default)]
pub struct ClickEvent {
    stopped: Cell<bool>,
}

impl ClickEvent {
    /// A fresh click whose propagation has not been stopped.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Whether some handler stopped propagation.
    #[must_use]
    pub fn is_propagation_stopped(&self) -> bool {
        self.stopped.get()
    }
}

impl Propagation for ClickEvent {
    fn stop_propagation(&self) {
        self.stopped.set(true);
    }
}

/// What happened while a click walked its [`ClickPath`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClickOutcome {
    /// Where the click started.
    pub origin: ClickRegion,
    /// Stages whose handler ran, in order.
    pub visited: Vec<ClickRegion>,
    /// Whether a handler stopped propagation.
    pub stopped: bool,
}

impl ClickOutcome {
    /// Whether the click keeps bubbling up to the window.
    #[must_use]
    pub const fn reaches_window(&self) -> bool {
        !self.stopped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn stop_at(target: ClickRegion) -> impl FnMut(ClickRegion, &ClickEvent) -> Result<(), ()> {
        move |stage: ClickRegion, event: &ClickEvent| {
            if stage == target {
                event.stop_propagation();
            }
            Ok(())
        }
    }

    #[test]
    fn content_path_is_content_then_backdrop() {
        let path = ClickPath::from_origin(ClickRegion::Content);
        assert_eq!(
            path.stages(),
            &[ClickRegion::Content, ClickRegion::Backdrop]
        );
    }

    #[test]
    fn outside_path_has_no_component_stages() {
        let path = ClickPath::from_origin(ClickRegion::Outside);
        assert!(path.stages().is_empty());

        let outcome = path
            .dispatch(&ClickEvent::new(), |_, _| Ok::<(), ()>(()))
            .unwrap();
        assert!(outcome.visited.is_empty());
        assert!(outcome.reaches_window());
    }

    #[test]
    fn stopping_at_content_skips_backdrop() {
        let path = ClickPath::from_origin(ClickRegion::Content);
        let outcome = path
            .dispatch(&ClickEvent::new(), stop_at(ClickRegion::Content))
            .unwrap();
        assert_eq!(outcome.visited, vec![ClickRegion::Content]);
        assert!(!outcome.reaches_window());
    }

    #[test]
    fn unstopped_click_visits_every_stage() {
        let path = ClickPath::from_origin(ClickRegion::Content);
        let outcome = path
            .dispatch(&ClickEvent::new(), |_, _| Ok::<(), ()>(()))
            .unwrap();
        assert_eq!(outcome.visited, path.stages().to_vec());
        assert!(outcome.reaches_window());
    }

    #[test]
    fn handler_error_aborts_walk() {
        let path = ClickPath::from_origin(ClickRegion::Content);
        let mut seen = Vec::new();
        let result = path.dispatch(&ClickEvent::new(), |stage, _| {
            seen.push(stage);
            Err("boom")
        });
        assert_eq!(result, Err("boom"));
        assert_eq!(seen, vec![ClickRegion::Content]);
    }

    #[test]
    fn already_stopped_event_visits_nothing() {
        let event = ClickEvent::new();
        event.stop_propagation();
        let outcome = ClickPath::from_origin(ClickRegion::Trigger)
            .dispatch(&event, |_, _| Ok::<(), ()>(()))
            .unwrap();
        assert!(outcome.visited.is_empty());
        assert!(outcome.stopped);
    }

    #[test]
    fn region_names_are_stable() {
        let names: Vec<_> = ClickRegion::ALL.iter().map(ToString::to_string).collect();
        assert_eq!(names, ["trigger", "content", "backdrop", "outside"]);
    }
}

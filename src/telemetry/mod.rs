//! Observability hooks
//!
//! The manager reports each applied transition to its observers after the
//! state change is complete. Observers get a shared reference to the event and
//! nothing else, so they cannot alter the stack, and a manager with no
//! observers (or no-op ones) behaves identically.

pub mod metrics;

pub use metrics::{MetricsSnapshot, StackMetrics};

use crate::window::WindowId;
use log::{debug, log_enabled, Level};
use serde::Serialize;
use std::fmt;
use std::sync::Arc;

/// What happened to a window
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum StackEventKind {
    Opened,
    Restored,
    Refocused,
    Closed,
    Minimized,
    Maximized,
    Unmaximized,
    Focused,
    Moved,
    Resized,
}

impl StackEventKind {
    pub const ALL: [StackEventKind; 10] = [
        StackEventKind::Opened,
        StackEventKind::Restored,
        StackEventKind::Refocused,
        StackEventKind::Closed,
        StackEventKind::Minimized,
        StackEventKind::Maximized,
        StackEventKind::Unmaximized,
        StackEventKind::Focused,
        StackEventKind::Moved,
        StackEventKind::Resized,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StackEventKind::Opened => "opened",
            StackEventKind::Restored => "restored",
            StackEventKind::Refocused => "refocused",
            StackEventKind::Closed => "closed",
            StackEventKind::Minimized => "minimized",
            StackEventKind::Maximized => "maximized",
            StackEventKind::Unmaximized => "unmaximized",
            StackEventKind::Focused => "focused",
            StackEventKind::Moved => "moved",
            StackEventKind::Resized => "resized",
        }
    }

    /// Whether this transition consumed a fresh z-index
    pub fn brings_to_front(&self) -> bool {
        matches!(
            self,
            StackEventKind::Opened
                | StackEventKind::Restored
                | StackEventKind::Refocused
                | StackEventKind::Focused
        )
    }
}

/// A transition that was applied to the stack
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct StackEvent {
    pub kind: StackEventKind,
    pub window: WindowId,
    /// Z-index assigned by this transition, for front-ing transitions
    pub z_index: Option<u64>,
    /// Number of tracked windows after the transition
    pub window_count: usize,
}

/// Receives stack events
///
/// Implementations must not panic; a failing backend should swallow its own
/// errors. Call order relative to other observers is unspecified.
pub trait StackObserver: Send + Sync {
    fn observe(&self, event: &StackEvent);
}

impl<T: StackObserver + ?Sized> StackObserver for Arc<T> {
    fn observe(&self, event: &StackEvent) {
        (**self).observe(event)
    }
}

/// Adapts a closure into an observer
pub struct FnObserver<F>(pub F);

impl<F> StackObserver for FnObserver<F>
where
    F: Fn(&StackEvent) + Send + Sync,
{
    fn observe(&self, event: &StackEvent) {
        (self.0)(event)
    }
}

impl<F> fmt::Debug for FnObserver<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("FnObserver")
    }
}

/// Writes each event as a structured `log` record
#[derive(Debug, Default, Clone, Copy)]
pub struct LogObserver;

impl LogObserver {
    pub const TARGET: &'static str = "panestack::events";
}

impl StackObserver for LogObserver {
    fn observe(&self, event: &StackEvent) {
        if !log_enabled!(target: Self::TARGET, Level::Debug) {
            return;
        }
        match serde_json::to_string(event) {
            Ok(line) => debug!(target: Self::TARGET, "{}", line),
            Err(e) => debug!(target: Self::TARGET, "{:?} (unserializable: {})", event, e),
        }
    }
}

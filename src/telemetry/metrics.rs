//! In-memory stack metrics
//!
//! Counters per event kind, a gauge of tracked windows, and a bounded
//! distribution of the window count seen at each open.

use super::{StackEvent, StackEventKind, StackObserver};
use parking_lot::Mutex;
use serde::Serialize;
use std::collections::{BTreeMap, VecDeque};

/// Metrics collector, shareable behind an `Arc`
#[derive(Debug)]
pub struct StackMetrics {
    inner: Mutex<MetricsState>,
}

#[derive(Debug)]
struct MetricsState {
    counters: BTreeMap<&'static str, u64>,
    open_windows: usize,
    peak_windows: usize,
    /// Window count right after each open, oldest first
    open_distribution: VecDeque<usize>,
    history_size: usize,
}

/// Point-in-time copy of the collected metrics
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MetricsSnapshot {
    pub counters: BTreeMap<&'static str, u64>,
    pub open_windows: usize,
    pub peak_windows: usize,
    pub mean_windows_at_open: f64,
    pub max_windows_at_open: usize,
    pub samples: usize,
}

impl StackMetrics {
    /// Create a collector keeping at most `history_size` distribution samples
    pub fn new(history_size: usize) -> Self {
        Self {
            inner: Mutex::new(MetricsState {
                counters: BTreeMap::new(),
                open_windows: 0,
                peak_windows: 0,
                open_distribution: VecDeque::with_capacity(history_size.min(1024)),
                history_size: history_size.max(1),
            }),
        }
    }

    pub fn counter(&self, kind: StackEventKind) -> u64 {
        self.inner
            .lock()
            .counters
            .get(kind.as_str())
            .copied()
            .unwrap_or(0)
    }

    pub fn open_windows(&self) -> usize {
        self.inner.lock().open_windows
    }

    pub fn snapshot(&self) -> MetricsSnapshot {
        let state = self.inner.lock();
        let samples = state.open_distribution.len();
        let mean = if samples == 0 {
            0.0
        } else {
            state.open_distribution.iter().sum::<usize>() as f64 / samples as f64
        };

        MetricsSnapshot {
            counters: state.counters.clone(),
            open_windows: state.open_windows,
            peak_windows: state.peak_windows,
            mean_windows_at_open: mean,
            max_windows_at_open: state.open_distribution.iter().copied().max().unwrap_or(0),
            samples,
        }
    }

    pub fn reset(&self) {
        let mut state = self.inner.lock();
        state.counters.clear();
        state.open_distribution.clear();
        state.peak_windows = state.open_windows;
    }
}

impl Default for StackMetrics {
    fn default() -> Self {
        Self::new(256)
    }
}

impl StackObserver for StackMetrics {
    fn observe(&self, event: &StackEvent) {
        let mut state = self.inner.lock();
        *state.counters.entry(event.kind.as_str()).or_insert(0) += 1;

        state.open_windows = event.window_count;
        state.peak_windows = state.peak_windows.max(event.window_count);

        if event.kind == StackEventKind::Opened {
            if state.open_distribution.len() >= state.history_size {
                state.open_distribution.pop_front();
            }
            state.open_distribution.push_back(event.window_count);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::WindowId;

    fn event(kind: StackEventKind, window_count: usize) -> StackEvent {
        StackEvent {
            kind,
            window: WindowId::from("w"),
            z_index: None,
            window_count,
        }
    }

    #[test]
    fn test_counters_and_gauge() {
        let metrics = StackMetrics::default();
        metrics.observe(&event(StackEventKind::Opened, 1));
        metrics.observe(&event(StackEventKind::Opened, 2));
        metrics.observe(&event(StackEventKind::Focused, 2));
        metrics.observe(&event(StackEventKind::Closed, 1));

        assert_eq!(metrics.counter(StackEventKind::Opened), 2);
        assert_eq!(metrics.counter(StackEventKind::Focused), 1);
        assert_eq!(metrics.counter(StackEventKind::Minimized), 0);
        assert_eq!(metrics.open_windows(), 1);

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.peak_windows, 2);
        assert_eq!(snapshot.samples, 2);
        assert!((snapshot.mean_windows_at_open - 1.5).abs() < f64::EPSILON);
        assert_eq!(snapshot.max_windows_at_open, 2);
    }

    #[test]
    fn test_distribution_is_bounded() {
        let metrics = StackMetrics::new(3);
        for count in 1..=5 {
            metrics.observe(&event(StackEventKind::Opened, count));
        }

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.samples, 3);
        // Only 3, 4 and 5 remain
        assert!((snapshot.mean_windows_at_open - 4.0).abs() < f64::EPSILON);
    }

    #[test]
    fn test_reset_keeps_gauge() {
        let metrics = StackMetrics::default();
        metrics.observe(&event(StackEventKind::Opened, 1));
        metrics.observe(&event(StackEventKind::Opened, 2));
        metrics.observe(&event(StackEventKind::Closed, 1));
        metrics.reset();

        let snapshot = metrics.snapshot();
        assert!(snapshot.counters.is_empty());
        assert_eq!(snapshot.open_windows, 1);
        assert_eq!(snapshot.peak_windows, 1);
        assert_eq!(snapshot.samples, 0);
    }
}

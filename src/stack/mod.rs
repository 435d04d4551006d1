//! Window stacking state manager
//!
//! [`WindowStackManager`] owns the tracked windows and the z-index counter and
//! applies every transition on them. Operations are total: a transition that
//! names an unknown window is a no-op and reports `false` (or `None`).
//!
//! Front-ing transitions (open, restore, focus, activate) all go through one
//! private transition, `bring_to_front`, which advances the counter, focuses
//! the target and unfocuses everything else inside a single `&mut self` call,
//! so no window is ever observable as focused under a stale z-index.
//!
//! ```
//! use panestack::stack::WindowStackManager;
//! use panestack::window::WindowSpec;
//!
//! let mut stack = WindowStackManager::new(100);
//! stack.open(WindowSpec::new("a", "Chat"));
//! stack.open(WindowSpec::new("b", "Notes"));
//! stack.focus(&"a".into());
//!
//! assert_eq!(stack.focused_id().map(|id| id.as_str()), Some("a"));
//! assert_eq!(stack.top_z_index(), 103);
//! ```

use crate::config::StackConfig;
use crate::error::{StackError, StackResult};
use crate::telemetry::{StackEvent, StackEventKind, StackObserver};
use crate::window::{Window, WindowId, WindowSpec};
use log::debug;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

/// Default base z-index, above the page chrome layer
pub const DEFAULT_BASE_Z_INDEX: u64 = 100;

/// Which branch an open request took
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum OpenOutcome {
    /// No window had the id; a new one was added
    Created,
    /// The window existed minimized and was brought back
    Restored,
    /// The window existed and was visible; it was focused and raised
    Refocused,
}

/// Result of a taskbar activation
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Activation {
    Restored,
    Minimized,
    Focused,
}

/// Owned, read-only copy of the stack state handed to the UI layer
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StackSnapshot {
    pub windows: Vec<Window>,
    pub top_z_index: u64,
}

impl StackSnapshot {
    pub fn get(&self, id: &WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| &w.id == id)
    }
}

pub struct WindowStackManager {
    /// Tracked windows, in insertion order; z-order is carried by `z_index`
    windows: Vec<Window>,

    /// Last z-index handed out
    top_z_index: u64,

    observers: Vec<Box<dyn StackObserver>>,
}

impl WindowStackManager {
    /// Create an empty manager whose first front-ing transition yields `base_z_index + 1`
    pub fn new(base_z_index: u64) -> Self {
        Self {
            windows: Vec::new(),
            top_z_index: base_z_index,
            observers: Vec::new(),
        }
    }

    pub fn from_config(config: &StackConfig) -> Self {
        Self::new(config.base_z_index)
    }

    /// Register an observer for applied transitions
    pub fn add_observer<O>(&mut self, observer: O)
    where
        O: StackObserver + 'static,
    {
        self.observers.push(Box::new(observer));
    }

    // === Transitions ===

    /// Open a window, or bring an already tracked one back to the front
    ///
    /// Precedence when the id is already tracked: a minimized window is
    /// restored; a visible one is refocused. Either way the existing record
    /// keeps its title, icon and geometry and the rest of `spec` is ignored.
    /// Afterwards the window is the only focused one and holds the highest
    /// z-index.
    pub fn open(&mut self, spec: WindowSpec) -> OpenOutcome {
        match self.position(&spec.id) {
            Some(idx) => {
                let was_minimized = self.windows[idx].is_minimized;
                let z_index = self.bring_to_front(idx, true);
                let (outcome, kind) = if was_minimized {
                    (OpenOutcome::Restored, StackEventKind::Restored)
                } else {
                    (OpenOutcome::Refocused, StackEventKind::Refocused)
                };
                debug!("Re-opened window {} ({:?}, z={})", spec.id, outcome, z_index);
                self.emit(kind, &spec.id, Some(z_index));
                outcome
            }
            None => {
                let z_index = self.next_z_index();
                for window in &mut self.windows {
                    window.is_focused = false;
                }
                let id = spec.id.clone();
                self.windows.push(Window::from_spec(spec, z_index));
                debug!("Opened window {} (z={})", id, z_index);
                self.emit(StackEventKind::Opened, &id, Some(z_index));
                OpenOutcome::Created
            }
        }
    }

    /// Remove a window; focus is not handed to any other window
    pub fn close(&mut self, id: &WindowId) -> Option<Window> {
        let idx = self.position(id)?;
        let window = self.windows.remove(idx);
        debug!("Closed window {}", id);
        self.emit(StackEventKind::Closed, id, None);
        Some(window)
    }

    /// Hide a window and drop its focus, leaving its z-index alone
    pub fn minimize(&mut self, id: &WindowId) -> bool {
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        window.is_minimized = true;
        window.is_focused = false;
        debug!("Minimized window {}", id);
        self.emit(StackEventKind::Minimized, id, None);
        true
    }

    /// Toggle the maximized flag
    pub fn maximize(&mut self, id: &WindowId) -> bool {
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        window.is_maximized = !window.is_maximized;
        let kind = if window.is_maximized {
            StackEventKind::Maximized
        } else {
            StackEventKind::Unmaximized
        };
        debug!("Window {} {}", id, kind.as_str());
        self.emit(kind, id, None);
        true
    }

    /// Un-minimize, focus and raise a window
    pub fn restore(&mut self, id: &WindowId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let z_index = self.bring_to_front(idx, true);
        debug!("Restored window {} (z={})", id, z_index);
        self.emit(StackEventKind::Restored, id, Some(z_index));
        true
    }

    /// Focus and raise a window without touching its minimized or maximized flags
    ///
    /// An unknown id consumes no z-index.
    pub fn focus(&mut self, id: &WindowId) -> bool {
        let Some(idx) = self.position(id) else {
            return false;
        };
        let z_index = self.bring_to_front(idx, false);
        debug!("Focused window {} (z={})", id, z_index);
        self.emit(StackEventKind::Focused, id, Some(z_index));
        true
    }

    pub fn update_position(&mut self, id: &WindowId, x: i32, y: i32) -> bool {
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        window.set_position(x, y);
        self.emit(StackEventKind::Moved, id, None);
        true
    }

    pub fn update_size(&mut self, id: &WindowId, width: u32, height: u32) -> bool {
        let Some(window) = self.window_mut(id) else {
            return false;
        };
        window.set_size(width, height);
        self.emit(StackEventKind::Resized, id, None);
        true
    }

    /// Taskbar click: restore a minimized window, minimize the focused one,
    /// focus anything else
    pub fn activate(&mut self, id: &WindowId) -> Option<Activation> {
        let (minimized, focused) = self.get(id).map(|w| (w.is_minimized, w.is_focused))?;
        if minimized {
            self.restore(id);
            Some(Activation::Restored)
        } else if focused {
            self.minimize(id);
            Some(Activation::Minimized)
        } else {
            self.focus(id);
            Some(Activation::Focused)
        }
    }

    // === Queries ===

    pub fn get(&self, id: &WindowId) -> Option<&Window> {
        self.windows.iter().find(|w| &w.id == id)
    }

    pub fn contains(&self, id: &WindowId) -> bool {
        self.position(id).is_some()
    }

    pub fn len(&self) -> usize {
        self.windows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.windows.is_empty()
    }

    /// All windows in insertion order
    pub fn windows(&self) -> &[Window] {
        &self.windows
    }

    pub fn top_z_index(&self) -> u64 {
        self.top_z_index
    }

    pub fn focused(&self) -> Option<&Window> {
        self.windows.iter().find(|w| w.is_focused)
    }

    pub fn focused_id(&self) -> Option<&WindowId> {
        self.focused().map(|w| &w.id)
    }

    /// Visible windows from bottom to top, the order to draw them in
    pub fn render_order(&self) -> Vec<&Window> {
        let mut visible: Vec<&Window> = self.windows.iter().filter(|w| w.is_visible()).collect();
        visible.sort_by_key(|w| w.z_index);
        visible
    }

    /// The visible window drawn above all others
    pub fn topmost(&self) -> Option<&Window> {
        self.windows
            .iter()
            .filter(|w| w.is_visible())
            .max_by_key(|w| w.z_index)
    }

    /// Minimized windows, lowest z-index first
    pub fn minimized(&self) -> Vec<&Window> {
        let mut hidden: Vec<&Window> = self.windows.iter().filter(|w| w.is_minimized).collect();
        hidden.sort_by_key(|w| w.z_index);
        hidden
    }

    pub fn snapshot(&self) -> StackSnapshot {
        StackSnapshot {
            windows: self.windows.clone(),
            top_z_index: self.top_z_index,
        }
    }

    /// Verify the state invariants, reporting the first one that fails
    pub fn check_invariants(&self) -> StackResult<()> {
        let focused = self.windows.iter().filter(|w| w.is_focused).count();
        if focused > 1 {
            return Err(StackError::InvariantViolated(format!(
                "{} windows are focused",
                focused
            )));
        }

        let mut ids = HashSet::with_capacity(self.windows.len());
        let mut z_indices = HashSet::with_capacity(self.windows.len());
        for window in &self.windows {
            if !ids.insert(&window.id) {
                return Err(StackError::InvariantViolated(format!(
                    "window id {} is tracked twice",
                    window.id
                )));
            }
            if !z_indices.insert(window.z_index) {
                return Err(StackError::InvariantViolated(format!(
                    "z-index {} is shared by more than one window",
                    window.z_index
                )));
            }
            if window.z_index > self.top_z_index {
                return Err(StackError::InvariantViolated(format!(
                    "window {} has z-index {} above the counter {}",
                    window.id, window.z_index, self.top_z_index
                )));
            }
        }

        Ok(())
    }

    // === Internals ===

    fn position(&self, id: &WindowId) -> Option<usize> {
        self.windows.iter().position(|w| &w.id == id)
    }

    fn window_mut(&mut self, id: &WindowId) -> Option<&mut Window> {
        self.windows.iter_mut().find(|w| &w.id == id)
    }

    fn next_z_index(&mut self) -> u64 {
        self.top_z_index += 1;
        self.top_z_index
    }

    /// The one front-ing transition: focus `idx` exclusively and give it a
    /// fresh z-index, optionally clearing its minimized flag
    fn bring_to_front(&mut self, idx: usize, unminimize: bool) -> u64 {
        let z_index = self.next_z_index();
        for (i, window) in self.windows.iter_mut().enumerate() {
            window.is_focused = i == idx;
            if i == idx {
                window.z_index = z_index;
                if unminimize {
                    window.is_minimized = false;
                }
            }
        }
        z_index
    }

    fn emit(&self, kind: StackEventKind, id: &WindowId, z_index: Option<u64>) {
        if self.observers.is_empty() {
            return;
        }
        let event = StackEvent {
            kind,
            window: id.clone(),
            z_index,
            window_count: self.windows.len(),
        };
        for observer in &self.observers {
            observer.observe(&event);
        }
    }
}

impl Default for WindowStackManager {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_Z_INDEX)
    }
}

impl fmt::Debug for WindowStackManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("WindowStackManager")
            .field("windows", &self.windows)
            .field("top_z_index", &self.top_z_index)
            .field("observers", &self.observers.len())
            .finish()
    }
}

//! Window data model
//!
//! A [`Window`] is the stack's record of one open panel: descriptive metadata
//! the core never interprets, caller-supplied geometry, and the stacking and
//! visibility flags the manager maintains.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Opaque, stable window identifier
///
/// Unique among the windows currently tracked by one manager. Once a window is
/// closed its id is free and a later open treats it as brand new.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct WindowId(String);

impl WindowId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for WindowId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for WindowId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

impl From<String> for WindowId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

/// Request to open a window
///
/// Geometry is taken as given; the core neither validates nor clamps it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WindowSpec {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Accepted for wire compatibility; an open always yields a visible window
    #[serde(default)]
    pub is_minimized: bool,
    #[serde(default)]
    pub is_maximized: bool,
}

impl WindowSpec {
    /// Spec with the given id and title, no icon, placed at the origin
    pub fn new(id: impl Into<WindowId>, title: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            title: title.into(),
            icon: String::new(),
            x: 0,
            y: 0,
            width: 640,
            height: 480,
            is_minimized: false,
            is_maximized: false,
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn at(mut self, x: i32, y: i32) -> Self {
        self.x = x;
        self.y = y;
        self
    }

    pub fn sized(mut self, width: u32, height: u32) -> Self {
        self.width = width;
        self.height = height;
        self
    }

    pub fn maximized(mut self, maximized: bool) -> Self {
        self.is_maximized = maximized;
        self
    }
}

/// One tracked window
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Window {
    pub id: WindowId,
    pub title: String,
    pub icon: String,
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
    /// Stacking order, higher is more in front
    pub z_index: u64,
    pub is_focused: bool,
    /// Hidden but retained
    pub is_minimized: bool,
    pub is_maximized: bool,
}

impl Window {
    /// Build a fresh, focused window from an open request
    pub(crate) fn from_spec(spec: WindowSpec, z_index: u64) -> Self {
        Self {
            id: spec.id,
            title: spec.title,
            icon: spec.icon,
            x: spec.x,
            y: spec.y,
            width: spec.width,
            height: spec.height,
            z_index,
            is_focused: true,
            is_minimized: false,
            is_maximized: spec.is_maximized,
        }
    }

    pub fn set_position(&mut self, x: i32, y: i32) {
        self.x = x;
        self.y = y;
    }

    pub fn set_size(&mut self, width: u32, height: u32) {
        self.width = width;
        self.height = height;
    }

    /// Whether the UI should draw this window at all
    pub fn is_visible(&self) -> bool {
        !self.is_minimized
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_window_id_round_trips_as_plain_string() {
        let id = WindowId::new("chat");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"chat\"");
        assert_eq!(id.to_string(), "chat");
    }

    #[test]
    fn test_spec_optional_flags_default_to_false() {
        let json = r#"{"id":"a","title":"A","icon":"a.png","x":-20,"y":5,"width":300,"height":200}"#;
        let spec: WindowSpec = serde_json::from_str(json).unwrap();

        assert_eq!(spec.id, WindowId::from("a"));
        assert_eq!(spec.x, -20);
        assert!(!spec.is_minimized);
        assert!(!spec.is_maximized);
    }

    #[test]
    fn test_from_spec_is_focused_and_visible() {
        let spec = WindowSpec::new("a", "A").maximized(true);
        let window = Window::from_spec(spec, 101);

        assert_eq!(window.z_index, 101);
        assert!(window.is_focused);
        assert!(window.is_visible());
        assert!(window.is_maximized);
    }

    #[test]
    fn test_window_serializes_camel_case() {
        let window = Window::from_spec(WindowSpec::new("a", "A"), 101);
        let json = serde_json::to_value(&window).unwrap();

        assert_eq!(json["zIndex"], 101);
        assert_eq!(json["isFocused"], true);
        assert_eq!(json["isMinimized"], false);
    }
}

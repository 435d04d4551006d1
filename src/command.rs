//! Command surface for driving a manager with JSON messages
//!
//! Each [`StackCommand`] mirrors one manager transition. Scripts are JSON
//! lines: one command object per line, blank lines and `#` comments skipped.
//!
//! ```text
//! {"op":"open","id":"chat","title":"Chat","width":420}
//! {"op":"minimize","id":"chat"}
//! {"op":"updatePosition","id":"chat","x":-30,"y":12}
//! ```

use crate::config::WindowDefaults;
use crate::error::{StackError, StackResult};
use crate::stack::{Activation, OpenOutcome, WindowStackManager};
use crate::window::WindowId;
use log::trace;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "op", rename_all = "camelCase")]
pub enum StackCommand {
    /// Open or re-front a window; missing geometry comes from the configured defaults
    #[serde(rename_all = "camelCase")]
    Open {
        id: WindowId,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        title: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        icon: Option<String>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        x: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        y: Option<i32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        width: Option<u32>,
        #[serde(default, skip_serializing_if = "Option::is_none")]
        height: Option<u32>,
        #[serde(default)]
        is_maximized: bool,
    },
    Close {
        id: WindowId,
    },
    Minimize {
        id: WindowId,
    },
    Maximize {
        id: WindowId,
    },
    Restore {
        id: WindowId,
    },
    Focus {
        id: WindowId,
    },
    UpdatePosition {
        id: WindowId,
        x: i32,
        y: i32,
    },
    UpdateSize {
        id: WindowId,
        width: u32,
        height: u32,
    },
    Activate {
        id: WindowId,
    },
}

/// What a command did
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CommandOutcome {
    pub op: &'static str,
    pub id: WindowId,
    /// False when the id matched no window and the command was a no-op
    pub applied: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub open: Option<OpenOutcome>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub activation: Option<Activation>,
}

impl CommandOutcome {
    fn new(op: &'static str, id: WindowId, applied: bool) -> Self {
        Self {
            op,
            id,
            applied,
            open: None,
            activation: None,
        }
    }
}

impl StackCommand {
    pub fn id(&self) -> &WindowId {
        match self {
            StackCommand::Open { id, .. }
            | StackCommand::Close { id }
            | StackCommand::Minimize { id }
            | StackCommand::Maximize { id }
            | StackCommand::Restore { id }
            | StackCommand::Focus { id }
            | StackCommand::UpdatePosition { id, .. }
            | StackCommand::UpdateSize { id, .. }
            | StackCommand::Activate { id } => id,
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            StackCommand::Open { .. } => "open",
            StackCommand::Close { .. } => "close",
            StackCommand::Minimize { .. } => "minimize",
            StackCommand::Maximize { .. } => "maximize",
            StackCommand::Restore { .. } => "restore",
            StackCommand::Focus { .. } => "focus",
            StackCommand::UpdatePosition { .. } => "updatePosition",
            StackCommand::UpdateSize { .. } => "updateSize",
            StackCommand::Activate { .. } => "activate",
        }
    }

    /// Apply the command to `manager`
    pub fn apply(self, manager: &mut WindowStackManager, defaults: &WindowDefaults) -> CommandOutcome {
        let op = self.name();
        trace!("Applying {} to window {}", op, self.id());

        match self {
            StackCommand::Open {
                id,
                title,
                icon,
                x,
                y,
                width,
                height,
                is_maximized,
            } => {
                let spec = defaults
                    .complete(id.clone(), title, icon, (x, y), (width, height), manager.len())
                    .maximized(is_maximized);
                let outcome = manager.open(spec);
                CommandOutcome {
                    open: Some(outcome),
                    ..CommandOutcome::new(op, id, true)
                }
            }
            StackCommand::Close { id } => {
                let applied = manager.close(&id).is_some();
                CommandOutcome::new(op, id, applied)
            }
            StackCommand::Minimize { id } => {
                let applied = manager.minimize(&id);
                CommandOutcome::new(op, id, applied)
            }
            StackCommand::Maximize { id } => {
                let applied = manager.maximize(&id);
                CommandOutcome::new(op, id, applied)
            }
            StackCommand::Restore { id } => {
                let applied = manager.restore(&id);
                CommandOutcome::new(op, id, applied)
            }
            StackCommand::Focus { id } => {
                let applied = manager.focus(&id);
                CommandOutcome::new(op, id, applied)
            }
            StackCommand::UpdatePosition { id, x, y } => {
                let applied = manager.update_position(&id, x, y);
                CommandOutcome::new(op, id, applied)
            }
            StackCommand::UpdateSize { id, width, height } => {
                let applied = manager.update_size(&id, width, height);
                CommandOutcome::new(op, id, applied)
            }
            StackCommand::Activate { id } => {
                let activation = manager.activate(&id);
                CommandOutcome {
                    activation,
                    ..CommandOutcome::new(op, id, activation.is_some())
                }
            }
        }
    }
}

/// Parse a JSON-lines script into commands
pub fn parse_script(text: &str) -> StackResult<Vec<StackCommand>> {
    let mut commands = Vec::new();
    for (idx, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }
        let command = serde_json::from_str(line).map_err(|e| StackError::InvalidCommand {
            line: idx + 1,
            reason: e.to_string(),
        })?;
        commands.push(command);
    }
    Ok(commands)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn id(s: &str) -> WindowId {
        WindowId::from(s)
    }

    #[test]
    fn test_parse_script_skips_blanks_and_comments() {
        let script = r#"
# open two windows
{"op":"open","id":"chat","title":"Chat"}

{"op":"focus","id":"chat"}
{"op":"updatePosition","id":"chat","x":-30,"y":12}
"#;
        let commands = parse_script(script).unwrap();

        assert_eq!(commands.len(), 3);
        assert_eq!(commands[0].name(), "open");
        assert_eq!(commands[1], StackCommand::Focus { id: id("chat") });
        assert_eq!(
            commands[2],
            StackCommand::UpdatePosition {
                id: id("chat"),
                x: -30,
                y: 12
            }
        );
    }

    #[test]
    fn test_parse_script_reports_line() {
        let script = "{\"op\":\"open\",\"id\":\"a\"}\n\n{\"op\":\"teleport\",\"id\":\"a\"}\n";
        match parse_script(script) {
            Err(StackError::InvalidCommand { line, .. }) => assert_eq!(line, 3),
            other => panic!("expected invalid command, got {:?}", other),
        }
    }

    #[test]
    fn test_open_uses_defaults_for_missing_geometry() {
        let mut manager = WindowStackManager::default();
        let defaults = WindowDefaults::default();

        let outcome = StackCommand::Open {
            id: id("a"),
            title: None,
            icon: None,
            x: None,
            y: Some(7),
            width: Some(300),
            height: None,
            is_maximized: true,
        }
        .apply(&mut manager, &defaults);

        assert!(outcome.applied);
        assert_eq!(outcome.open, Some(OpenOutcome::Created));
        let a = manager.get(&id("a")).unwrap();
        assert_eq!(a.title, "a");
        assert_eq!((a.x, a.y), (defaults.x, 7));
        assert_eq!((a.width, a.height), (300, defaults.height));
        assert!(a.is_maximized);
    }

    #[test]
    fn test_second_open_cascades() {
        let mut manager = WindowStackManager::default();
        let defaults = WindowDefaults::default();

        for name in ["a", "b"] {
            let command: StackCommand =
                serde_json::from_str(&format!(r#"{{"op":"open","id":"{}"}}"#, name)).unwrap();
            command.apply(&mut manager, &defaults);
        }

        let b = manager.get(&id("b")).unwrap();
        assert_eq!(b.x, defaults.x + defaults.cascade_offset);
        assert_eq!(b.y, defaults.y + defaults.cascade_offset);
    }

    #[test]
    fn test_unmatched_commands_report_not_applied() {
        let mut manager = WindowStackManager::default();
        let defaults = WindowDefaults::default();

        for command in [
            StackCommand::Close { id: id("x") },
            StackCommand::Minimize { id: id("x") },
            StackCommand::Maximize { id: id("x") },
            StackCommand::Restore { id: id("x") },
            StackCommand::Focus { id: id("x") },
            StackCommand::Activate { id: id("x") },
            StackCommand::UpdateSize {
                id: id("x"),
                width: 1,
                height: 1,
            },
        ] {
            let outcome = command.apply(&mut manager, &defaults);
            assert!(!outcome.applied, "{} should be a no-op", outcome.op);
        }
        assert!(manager.is_empty());
        assert_eq!(manager.top_z_index(), 100);
    }

    #[test]
    fn test_outcome_json_shape() {
        let mut manager = WindowStackManager::default();
        let defaults = WindowDefaults::default();
        StackCommand::Open {
            id: id("a"),
            title: None,
            icon: None,
            x: None,
            y: None,
            width: None,
            height: None,
            is_maximized: false,
        }
        .apply(&mut manager, &defaults);

        let outcome = StackCommand::Activate { id: id("a") }.apply(&mut manager, &defaults);
        let json = serde_json::to_value(&outcome).unwrap();

        assert_eq!(json["op"], "activate");
        assert_eq!(json["applied"], true);
        assert_eq!(json["activation"], "minimized");
        assert!(json.get("open").is_none());
    }

    #[test]
    fn test_open_accepts_camel_case_flag() {
        let command: StackCommand =
            serde_json::from_str(r#"{"op":"open","id":"a","isMaximized":true}"#).unwrap();
        match command {
            StackCommand::Open { is_maximized, .. } => assert!(is_maximized),
            other => panic!("unexpected {:?}", other),
        }
    }
}

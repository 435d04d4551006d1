//! # panestack
//!
//! Window-stacking state for desktop-like web UIs: which panels are open,
//! where they sit, which one has focus and how they overlap.
//!
//! ## Architecture
//!
//! - `window`: the window record and open requests
//! - `stack`: the state manager and every transition on it
//! - `scope`: the explicit container hosts pass the manager around in
//! - `command`: JSON command surface mirroring the transitions
//! - `telemetry`: fire-and-forget observers (structured logs, metrics)
//! - `config`: TOML configuration
//!
//! ## Usage
//!
//! ```rust
//! use panestack::{StackScope, WindowSpec, WindowStackManager};
//!
//! fn main() -> anyhow::Result<()> {
//!     let scope = StackScope::provide(WindowStackManager::default());
//!     let stack = scope.handle()?;
//!
//!     stack.update(|m| m.open(WindowSpec::new("chat", "Chat").at(40, 40)));
//!     let snapshot = stack.snapshot();
//!     assert_eq!(snapshot.windows.len(), 1);
//!     Ok(())
//! }
//! ```

pub mod command;
pub mod config;
pub mod error;
pub mod scope;
pub mod stack;
pub mod telemetry;
pub mod window;

pub use command::{parse_script, CommandOutcome, StackCommand};
pub use config::PanestackConfig;
pub use error::{StackError, StackResult};
pub use scope::{StackHandle, StackScope};
pub use stack::{Activation, OpenOutcome, StackSnapshot, WindowStackManager};
pub use telemetry::{LogObserver, StackEvent, StackEventKind, StackMetrics, StackObserver};
pub use window::{Window, WindowId, WindowSpec};

/// Version information for panestack
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
pub const DESCRIPTION: &str = env!("CARGO_PKG_DESCRIPTION");

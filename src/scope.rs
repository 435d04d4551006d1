//! Explicit manager scope
//!
//! The host builds a [`StackScope`] around one [`WindowStackManager`] and passes
//! it to whatever needs the stack. Nothing is global: two scopes never share
//! state, and each test can build its own.
//!
//! Reaching for the stack through a scope with no manager installed is a
//! programming error and is reported loudly as [`StackError::NoActiveScope`].

use crate::command::{CommandOutcome, StackCommand};
use crate::config::WindowDefaults;
use crate::error::{StackError, StackResult};
use crate::stack::{StackSnapshot, WindowStackManager};
use log::error;
use parking_lot::RwLock;
use std::sync::Arc;

/// Shared handle to one manager
///
/// Every call takes the lock once for the whole transition, so the z-index
/// counter and the window list always change together.
#[derive(Debug, Clone)]
pub struct StackHandle {
    inner: Arc<RwLock<WindowStackManager>>,
}

impl StackHandle {
    pub fn new(manager: WindowStackManager) -> Self {
        Self {
            inner: Arc::new(RwLock::new(manager)),
        }
    }

    /// Run one transition (or a batch that must be seen as one) under the write lock
    pub fn update<R>(&self, f: impl FnOnce(&mut WindowStackManager) -> R) -> R {
        let mut manager = self.inner.write();
        f(&mut manager)
    }

    pub fn read<R>(&self, f: impl FnOnce(&WindowStackManager) -> R) -> R {
        let manager = self.inner.read();
        f(&manager)
    }

    pub fn dispatch(&self, command: StackCommand, defaults: &WindowDefaults) -> CommandOutcome {
        self.update(|manager| command.apply(manager, defaults))
    }

    pub fn snapshot(&self) -> StackSnapshot {
        self.read(WindowStackManager::snapshot)
    }

    /// Whether two handles point at the same manager
    pub fn same_manager(&self, other: &StackHandle) -> bool {
        Arc::ptr_eq(&self.inner, &other.inner)
    }
}

/// Container a host passes to stack consumers
#[derive(Debug, Clone, Default)]
pub struct StackScope {
    handle: Option<StackHandle>,
}

impl StackScope {
    /// A scope with no manager; every access fails
    pub fn empty() -> Self {
        Self { handle: None }
    }

    /// A scope owning a fresh handle around `manager`
    pub fn provide(manager: WindowStackManager) -> Self {
        Self {
            handle: Some(StackHandle::new(manager)),
        }
    }

    pub fn with_handle(handle: StackHandle) -> Self {
        Self {
            handle: Some(handle),
        }
    }

    pub fn is_active(&self) -> bool {
        self.handle.is_some()
    }

    /// The stack handle, or [`StackError::NoActiveScope`] outside an active scope
    pub fn handle(&self) -> StackResult<&StackHandle> {
        self.handle.as_ref().ok_or_else(|| {
            error!("Window stack accessed outside an active manager scope");
            StackError::NoActiveScope
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::window::{WindowId, WindowSpec};

    #[test]
    fn test_empty_scope_fails_loudly() {
        let scope = StackScope::empty();
        assert!(!scope.is_active());
        assert_eq!(scope.handle().unwrap_err(), StackError::NoActiveScope);

        let scope = StackScope::default();
        assert!(scope.handle().is_err());
    }

    #[test]
    fn test_provided_scope_shares_one_manager() {
        let scope = StackScope::provide(WindowStackManager::default());
        let consumer = scope.clone();

        scope
            .handle()
            .unwrap()
            .update(|m| m.open(WindowSpec::new("a", "A")));

        let handle = consumer.handle().unwrap();
        assert!(handle.same_manager(scope.handle().unwrap()));
        assert_eq!(handle.read(|m| m.len()), 1);
        assert_eq!(handle.snapshot().top_z_index, 101);
    }

    #[test]
    fn test_separate_scopes_are_isolated() {
        let first = StackScope::provide(WindowStackManager::default());
        let second = StackScope::provide(WindowStackManager::default());

        first
            .handle()
            .unwrap()
            .update(|m| m.open(WindowSpec::new("a", "A")));

        assert!(second.handle().unwrap().read(|m| m.is_empty()));
        assert!(!first
            .handle()
            .unwrap()
            .same_manager(second.handle().unwrap()));
    }

    #[test]
    fn test_dispatch_through_handle() {
        let handle = StackHandle::new(WindowStackManager::default());
        let defaults = WindowDefaults::default();

        handle.dispatch(
            StackCommand::Focus {
                id: WindowId::from("missing"),
            },
            &defaults,
        );

        assert_eq!(handle.snapshot().top_z_index, 100);
    }
}

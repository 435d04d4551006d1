//! Error types for the window stack
//!
//! Unknown window ids are not errors anywhere in this crate: every stack
//! operation degrades to a no-op for them. The variants here cover misuse of
//! the surrounding plumbing instead.

use thiserror::Error;

/// Errors raised by the stack plumbing
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StackError {
    /// The stack interface was reached without a manager installed in the scope
    #[error("window stack used outside an active manager scope")]
    NoActiveScope,

    /// A state invariant does not hold
    #[error("stack invariant violated: {0}")]
    InvariantViolated(String),

    /// A command line could not be decoded
    #[error("invalid command on line {line}: {reason}")]
    InvalidCommand {
        /// 1-based line number in the script
        line: usize,
        /// Decoder message
        reason: String,
    },
}

/// Result type alias for stack plumbing
pub type StackResult<T> = Result<T, StackError>;

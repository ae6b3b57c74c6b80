//! Error types for review-queue.

use thiserror::Error;

/// Result type alias using QueueError.
pub type Result<T> = std::result::Result<T, QueueError>;

/// Result type alias using ParseError.
pub type ParseResult<T> = std::result::Result<T, ParseError>;

/// Errors raised by queue operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum QueueError {
    #[error("queue exhausted: no items to review")]
    Exhausted,

    #[error("corrupt queue state: {0}")]
    CorruptState(#[from] Corruption),
}

/// Structural violation found while checking persisted queue state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum Corruption {
    #[error("item {index} links to {next}, but only {len} items exist")]
    NextOutOfRange { index: usize, next: usize, len: usize },

    #[error("current index {current} is out of range for {len} items")]
    CurrentOutOfRange { current: usize, len: usize },

    #[error("item {index} links to itself")]
    SelfLink { index: usize },

    #[error("item {index} has weight 0")]
    ZeroWeight { index: usize },

    #[error("chain revisits item {index}")]
    Cycle { index: usize },

    #[error("expected exactly one tail, found {tails}")]
    TailCount { tails: usize },

    #[error("chain reaches {reachable} of {len} items")]
    Unreachable { reachable: usize, len: usize },
}

/// Errors that can occur while parsing a markdown deck.
#[derive(Debug, Error)]
pub enum ParseError {
    #[error("missing question at line {line}")]
    MissingQuestion { line: usize },

    #[error("missing answer at line {line}")]
    MissingAnswer { line: usize },

    #[error("empty field at line {line}")]
    EmptyField { line: usize },
}

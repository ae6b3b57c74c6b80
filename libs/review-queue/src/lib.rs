//! Self-adjusting review queue for spaced repetition.
//!
//! Provides:
//! - An index-linked queue that reinserts correctly answered items at a
//!   doubling distance (Leitner-style spacing without a clock)
//! - Markdown deck parser supplying a new queue's questions
//! - Typed-answer grading (exact, case-insensitive, Levenshtein fuzzy)
//! - Shared types (Item, QueueState, Question, Review, etc.)

pub mod error;
pub mod grading;
pub mod parser;
pub mod queue;
pub mod types;

pub use error::{Corruption, ParseError, ParseResult, QueueError, Result};
pub use grading::{grade, levenshtein_distance, normalized_similarity, Grade, DEFAULT_FUZZY_THRESHOLD};
pub use parser::parse;
pub use queue::{Order, ReviewQueue};
pub use types::{Item, MatchingMode, MissPolicy, Question, QueueState, Review, ReviewStats};

//! Core types for the review queue.

use serde::{Deserialize, Serialize};

/// A question/answer pair, the content the queue schedules.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Question {
    pub prompt: String,
    pub answer: String,
}

impl Question {
    pub fn new(prompt: impl Into<String>, answer: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
            answer: answer.into(),
        }
    }
}

/// One slot in the queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Item<C> {
    pub content: C,
    /// Current spacing interval, starts at 1 and doubles on each correct answer.
    pub weight: u32,
    /// Slot of the following item, `None` for the tail.
    pub next: Option<usize>,
}

impl<C> Item<C> {
    pub fn new(content: C, next: Option<usize>) -> Self {
        Self {
            content,
            weight: 1,
            next,
        }
    }
}

/// Answer counters kept alongside the chain.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReviewStats {
    pub correct: u32,
    pub incorrect: u32,
}

impl ReviewStats {
    pub fn total(&self) -> u32 {
        self.correct + self.incorrect
    }
}

/// Persisted form of a queue.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QueueState<C> {
    pub items: Vec<Item<C>>,
    pub current: Option<usize>,
    #[serde(default)]
    pub correct: u32,
    #[serde(default)]
    pub incorrect: u32,
}

impl<C> QueueState<C> {
    pub fn stats(&self) -> ReviewStats {
        ReviewStats {
            correct: self.correct,
            incorrect: self.incorrect,
        }
    }
}

/// What an incorrect answer does to the cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MissPolicy {
    /// Keep presenting the missed item.
    Hold,
    /// Move on, relinking the missed item directly behind its successor.
    Advance,
}

impl Default for MissPolicy {
    fn default() -> Self {
        Self::Hold
    }
}

impl MissPolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Hold => "hold",
            Self::Advance => "advance",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "hold" => Some(Self::Hold),
            "advance" => Some(Self::Advance),
            _ => None,
        }
    }
}

/// Matching mode for typed answers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MatchingMode {
    Exact,
    CaseInsensitive,
    Fuzzy,
}

impl Default for MatchingMode {
    fn default() -> Self {
        Self::Fuzzy
    }
}

impl MatchingMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Exact => "exact",
            Self::CaseInsensitive => "case_insensitive",
            Self::Fuzzy => "fuzzy",
        }
    }

    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "exact" => Some(Self::Exact),
            "case_insensitive" => Some(Self::CaseInsensitive),
            "fuzzy" => Some(Self::Fuzzy),
            _ => None,
        }
    }
}

/// Outcome of a single `record_answer` call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Review {
    /// Slot of the item that was answered.
    pub index: usize,
    pub correct: bool,
    /// Weight after the answer.
    pub weight: u32,
    /// Reviews until the item comes up again (0 means it is up next).
    pub due_in: usize,
}

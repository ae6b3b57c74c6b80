//! Grading of typed answers into the correct/incorrect signal the queue takes.

use crate::types::MatchingMode;
use serde::{Deserialize, Serialize};

/// Default similarity a fuzzy match must reach.
pub const DEFAULT_FUZZY_THRESHOLD: f64 = 0.8;

/// Result of grading a typed answer against the expected one.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Grade {
    pub correct: bool,
    /// Similarity score between 0.0 and 1.0.
    pub similarity: f64,
    pub mode: MatchingMode,
    pub typed_normalized: String,
    pub expected_normalized: String,
}

/// Grade `typed` against `expected`.
///
/// Whitespace is collapsed in every mode; `threshold` only applies to
/// [`MatchingMode::Fuzzy`].
pub fn grade(typed: &str, expected: &str, mode: MatchingMode, threshold: f64) -> Grade {
    let typed_normalized = normalize_whitespace(typed);
    let expected_normalized = normalize_whitespace(expected);

    let (correct, similarity) = match mode {
        MatchingMode::Exact => exact(typed_normalized == expected_normalized),
        MatchingMode::CaseInsensitive => {
            exact(typed_normalized.to_lowercase() == expected_normalized.to_lowercase())
        }
        MatchingMode::Fuzzy => {
            let similarity = normalized_similarity(
                &typed_normalized.to_lowercase(),
                &expected_normalized.to_lowercase(),
            );
            (similarity >= threshold, similarity)
        }
    };

    Grade {
        correct,
        similarity,
        mode,
        typed_normalized,
        expected_normalized,
    }
}

fn exact(matched: bool) -> (bool, f64) {
    (matched, if matched { 1.0 } else { 0.0 })
}

fn normalize_whitespace(s: &str) -> String {
    s.split_whitespace().collect::<Vec<_>>().join(" ")
}

/// Edit distance between two strings, counted in chars.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();

    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Similarity in `0.0..=1.0` derived from the edit distance.
pub fn normalized_similarity(a: &str, b: &str) -> f64 {
    let longest = a.chars().count().max(b.chars().count());
    if longest == 0 {
        return 1.0;
    }
    1.0 - levenshtein_distance(a, b) as f64 / longest as f64
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn levenshtein_basics() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("café", "cafe"), 1);
    }

    #[test]
    fn exact_mode_requires_same_case() {
        assert!(grade("Paris", "Paris", MatchingMode::Exact, 0.8).correct);
        assert!(!grade("paris", "Paris", MatchingMode::Exact, 0.8).correct);
    }

    #[test]
    fn whitespace_is_collapsed() {
        let result = grade("  New   York ", "New York", MatchingMode::Exact, 0.8);
        assert!(result.correct);
        assert_eq!(result.typed_normalized, "New York");
    }

    #[test]
    fn case_insensitive_mode() {
        assert!(grade("PARIS", "Paris", MatchingMode::CaseInsensitive, 0.8).correct);
        assert!(!grade("Pari", "Paris", MatchingMode::CaseInsensitive, 0.8).correct);
    }

    #[test]
    fn fuzzy_mode_tolerates_typos() {
        let result = grade("Pariss", "Paris", MatchingMode::Fuzzy, DEFAULT_FUZZY_THRESHOLD);
        assert!(result.correct);
        assert!(result.similarity < 1.0);

        let result = grade("London", "Paris", MatchingMode::Fuzzy, DEFAULT_FUZZY_THRESHOLD);
        assert!(!result.correct);
    }

    #[test]
    fn empty_answer_never_matches_non_empty() {
        assert!(!grade("", "Paris", MatchingMode::Fuzzy, DEFAULT_FUZZY_THRESHOLD).correct);
    }
}

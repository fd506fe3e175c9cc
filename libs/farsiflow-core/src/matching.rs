//! Answer matching for quiz mode.

use crate::types::Word;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Classification of a typed answer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AnswerStatus {
    Correct,
    Almost,
    Wrong,
}

/// Result of evaluating a typed answer against a word.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Evaluation {
    pub status: AnswerStatus,
    /// Display text of the matched variant (exact or closest).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub best_match: Option<String>,
    /// Edit distance to `best_match`.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub distance: Option<usize>,
}

impl Evaluation {
    fn wrong() -> Self {
        Self {
            status: AnswerStatus::Wrong,
            best_match: None,
            distance: None,
        }
    }
}

/// Accepted Swedish answers for a word, deduplicated by normalized form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AcceptedAnswers {
    /// Original text, for feedback.
    pub display: Vec<String>,
    /// Normalized text, for comparison. Same order as `display`.
    pub normalized: Vec<String>,
}

impl AcceptedAnswers {
    pub fn for_word(word: &Word) -> Self {
        let variants = word
            .sv
            .split('/')
            .chain(word.alt.iter().map(String::as_str));

        let mut seen = HashSet::new();
        let mut answers = Self::default();
        for variant in variants {
            let trimmed = variant.trim();
            if trimmed.is_empty() {
                continue;
            }
            let normalized = normalize_answer(trimmed);
            if seen.insert(normalized.clone()) {
                answers.display.push(trimmed.to_string());
                answers.normalized.push(normalized);
            }
        }
        answers
    }

    pub fn is_empty(&self) -> bool {
        self.normalized.is_empty()
    }

    /// Variants joined for display, e.g. `bil / automobil`.
    pub fn joined(&self) -> String {
        self.display.join(" / ")
    }
}

/// Evaluate a typed answer against the word's accepted Swedish variants.
///
/// Never fails: a word without accepted answers always evaluates as wrong,
/// and empty input is wrong rather than almost.
pub fn evaluate(input: &str, word: &Word) -> Evaluation {
    evaluate_against(input, &AcceptedAnswers::for_word(word))
}

/// Evaluate against a precomputed answer set.
pub fn evaluate_against(input: &str, answers: &AcceptedAnswers) -> Evaluation {
    if answers.is_empty() {
        return Evaluation::wrong();
    }

    let user = normalize_answer(input);
    if let Some(i) = answers.normalized.iter().position(|a| *a == user) {
        return Evaluation {
            status: AnswerStatus::Correct,
            best_match: Some(answers.display[i].clone()),
            distance: Some(0),
        };
    }
    if user.is_empty() {
        return Evaluation::wrong();
    }

    let mut best: Option<(usize, usize)> = None;
    for (i, candidate) in answers.normalized.iter().enumerate() {
        let distance = levenshtein_distance(&user, candidate);
        if distance > fuzzy_threshold(candidate.chars().count()) {
            continue;
        }
        if best.map_or(true, |(_, d)| distance < d) {
            best = Some((i, distance));
        }
    }

    match best {
        Some((i, distance)) => Evaluation {
            status: AnswerStatus::Almost,
            best_match: Some(answers.display[i].clone()),
            distance: Some(distance),
        },
        None => Evaluation::wrong(),
    }
}

/// Maximum edit distance still counted as "almost" for a variant length.
pub fn fuzzy_threshold(length: usize) -> usize {
    if length < 8 {
        2
    } else {
        3
    }
}

/// Trim, lowercase and collapse internal whitespace.
pub fn normalize_answer(s: &str) -> String {
    s.split_whitespace()
        .collect::<Vec<_>>()
        .join(" ")
        .to_lowercase()
}

/// Calculate Levenshtein distance between two strings.
pub fn levenshtein_distance(a: &str, b: &str) -> usize {
    let a_chars: Vec<char> = a.chars().collect();
    let b_chars: Vec<char> = b.chars().collect();

    let m = a_chars.len();
    let n = b_chars.len();

    if m == 0 {
        return n;
    }
    if n == 0 {
        return m;
    }

    // Two rows instead of the full matrix
    let mut prev = (0..=n).collect::<Vec<_>>();
    let mut curr = vec![0; n + 1];

    for i in 1..=m {
        curr[0] = i;

        for j in 1..=n {
            let cost = if a_chars[i - 1] == b_chars[j - 1] {
                0
            } else {
                1
            };

            curr[j] = (prev[j] + 1) // deletion
                .min(curr[j - 1] + 1) // insertion
                .min(prev[j - 1] + cost); // substitution
        }

        std::mem::swap(&mut prev, &mut curr);
    }

    prev[n]
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn word(sv: &str) -> Word {
        Word::new("w", "fa", sv)
    }

    #[test]
    fn test_levenshtein_distance() {
        assert_eq!(levenshtein_distance("", ""), 0);
        assert_eq!(levenshtein_distance("abc", "abc"), 0);
        assert_eq!(levenshtein_distance("abc", ""), 3);
        assert_eq!(levenshtein_distance("", "abc"), 3);
        assert_eq!(levenshtein_distance("kitten", "sitting"), 3);
        assert_eq!(levenshtein_distance("kat", "katt"), 1);
        assert_eq!(levenshtein_distance("hälsa", "halsa"), 1);
    }

    #[test]
    fn test_normalize_answer() {
        assert_eq!(normalize_answer("  En   Stor\tKatt "), "en stor katt");
        assert_eq!(normalize_answer(""), "");
    }

    #[test]
    fn exact_match_is_correct() {
        assert_eq!(evaluate("katt", &word("katt")).status, AnswerStatus::Correct);
        assert_eq!(evaluate("  KATT ", &word("katt")).status, AnswerStatus::Correct);
    }

    #[test]
    fn near_miss_is_almost() {
        let result = evaluate("kat", &word("katt"));
        assert_eq!(result.status, AnswerStatus::Almost);
        assert_eq!(result.best_match.as_deref(), Some("katt"));
        assert_eq!(result.distance, Some(1));
    }

    #[test]
    fn unrelated_is_wrong() {
        assert_eq!(evaluate("hund", &word("katt")).status, AnswerStatus::Wrong);
    }

    #[test]
    fn empty_input_is_never_almost() {
        // "" is within distance 2 of "ab" but must still be wrong
        assert_eq!(evaluate("", &word("katt")).status, AnswerStatus::Wrong);
        assert_eq!(evaluate("   ", &word("ab")).status, AnswerStatus::Wrong);
    }

    #[test]
    fn any_slash_variant_is_correct() {
        assert_eq!(evaluate("bil", &word("bil/automobil")).status, AnswerStatus::Correct);
        assert_eq!(
            evaluate("automobil", &word("bil / automobil")).status,
            AnswerStatus::Correct
        );
    }

    #[test]
    fn alternates_are_accepted() {
        let mut w = word("katt");
        w.alt = vec!["kisse".to_string()];
        assert_eq!(evaluate("Kisse", &w).status, AnswerStatus::Correct);
    }

    #[test]
    fn no_accepted_answers_is_wrong() {
        assert_eq!(evaluate("katt", &word("")).status, AnswerStatus::Wrong);
        assert_eq!(evaluate("", &word(" / ")).status, AnswerStatus::Wrong);
    }

    #[test]
    fn threshold_grows_with_length() {
        assert_eq!(fuzzy_threshold(7), 2);
        assert_eq!(fuzzy_threshold(8), 3);
        // 3 edits: wrong for a short word, almost for a long one
        assert_eq!(evaluate("kxxx", &word("katt")).status, AnswerStatus::Wrong);
        assert_eq!(
            evaluate("automxxxl", &word("automobil")).status,
            AnswerStatus::Almost
        );
    }

    #[test]
    fn closest_variant_is_reported() {
        let result = evaluate("automobik", &word("automat/automobil"));
        assert_eq!(result.status, AnswerStatus::Almost);
        assert_eq!(result.best_match.as_deref(), Some("automobil"));
    }

    #[test]
    fn accepted_answers_dedupe_by_normalized_form() {
        let mut w = word("Bil / bil /automobil");
        w.alt = vec!["BIL".to_string(), "  ".to_string(), "kärra".to_string()];
        let answers = AcceptedAnswers::for_word(&w);
        assert_eq!(answers.display, vec!["Bil", "automobil", "kärra"]);
        assert_eq!(answers.normalized, vec!["bil", "automobil", "kärra"]);
        assert_eq!(answers.joined(), "Bil / automobil / kärra");
    }
}

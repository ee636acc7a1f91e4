//! Symptom detection in free text.
//!
//! Detection lowercases the text and checks every vocabulary label against it. Two modes:
//! - [`DetectionMode::Substring`]: a label matches anywhere, including inside a longer word
//!   ("headaches" contains "headache").
//! - [`DetectionMode::Word`]: a label matches only when bounded by non-alphanumeric
//!   characters or the ends of the text.
//!
//! Results always follow vocabulary order, so detection is deterministic.

use crate::{HealthError, HealthResult};
use healthai_types::Symptom;
use serde::{Deserialize, Serialize};
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DetectionMode {
    #[default]
    Substring,
    Word,
}

impl DetectionMode {
    pub fn as_str(self) -> &'static str {
        match self {
            DetectionMode::Substring => "substring",
            DetectionMode::Word => "word",
        }
    }
}

impl std::fmt::Display for DetectionMode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for DetectionMode {
    type Err = HealthError;

    fn from_str(s: &str) -> HealthResult<Self> {
        match s.trim().to_ascii_lowercase().as_str() {
            "substring" => Ok(DetectionMode::Substring),
            "word" | "word-boundary" => Ok(DetectionMode::Word),
            _ => Err(HealthError::InvalidDetectionMode(s.to_string())),
        }
    }
}

/// Return the vocabulary labels found in `text`, in vocabulary order.
pub fn detect_symptoms<'a>(
    text: &str,
    vocabulary: &'a [Symptom],
    mode: DetectionMode,
) -> Vec<&'a Symptom> {
    let lowered = text.to_lowercase();
    if lowered.trim().is_empty() {
        return Vec::new();
    }

    vocabulary
        .iter()
        .filter(|label| contains_label(&lowered, label.as_str(), mode))
        .collect()
}

/// Whether any keyword occurs in the already-lowercased `text`.
pub fn contains_any_keyword(text: &str, keywords: &[String], mode: DetectionMode) -> bool {
    keywords.iter().any(|k| contains_label(text, k, mode))
}

fn contains_label(haystack: &str, needle: &str, mode: DetectionMode) -> bool {
    match mode {
        DetectionMode::Substring => haystack.contains(needle),
        DetectionMode::Word => haystack.match_indices(needle).any(|(start, m)| {
            let before = haystack[..start].chars().next_back();
            let after = haystack[start + m.len()..].chars().next();
            !before.is_some_and(char::is_alphanumeric) && !after.is_some_and(char::is_alphanumeric)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn vocab(labels: &[&str]) -> Vec<Symptom> {
        labels.iter().map(|l| Symptom::new(l).unwrap()).collect()
    }

    fn labels<'a>(found: &[&'a Symptom]) -> Vec<&'a str> {
        found.iter().map(|s| s.as_str()).collect()
    }

    #[test]
    fn substring_detection_is_case_insensitive() {
        let v = vocab(&["fever", "cough"]);
        let found = detect_symptoms("High FEVER and a Cough", &v, DetectionMode::Substring);
        assert_eq!(labels(&found), vec!["fever", "cough"]);
    }

    #[test]
    fn results_follow_vocabulary_order() {
        let v = vocab(&["nausea", "headache"]);
        let found = detect_symptoms("headache then nausea", &v, DetectionMode::Substring);
        assert_eq!(labels(&found), vec!["nausea", "headache"]);
    }

    #[test]
    fn substring_matches_inside_longer_words() {
        let v = vocab(&["headache", "rash"]);
        let found = detect_symptoms("frequent headaches, crashing", &v, DetectionMode::Substring);
        assert_eq!(labels(&found), vec!["headache", "rash"]);
    }

    #[test]
    fn word_mode_requires_boundaries() {
        let v = vocab(&["headache", "rash"]);
        let found = detect_symptoms("frequent headaches, crashing", &v, DetectionMode::Word);
        assert!(found.is_empty());

        let found = detect_symptoms("a headache; a rash.", &v, DetectionMode::Word);
        assert_eq!(labels(&found), vec!["headache", "rash"]);
    }

    #[test]
    fn word_mode_checks_every_occurrence() {
        let v = vocab(&["rash"]);
        let found = detect_symptoms("crashing into a rash", &v, DetectionMode::Word);
        assert_eq!(labels(&found), vec!["rash"]);
    }

    #[test]
    fn blank_text_detects_nothing() {
        let v = vocab(&["fever"]);
        assert!(detect_symptoms("   ", &v, DetectionMode::Substring).is_empty());
    }

    #[test]
    fn keyword_check_honours_mode() {
        let keywords = vec!["hi".to_string()];
        assert!(contains_any_keyword("this is fine", &keywords, DetectionMode::Substring));
        assert!(!contains_any_keyword("this is fine", &keywords, DetectionMode::Word));
        assert!(contains_any_keyword("hi there", &keywords, DetectionMode::Word));
    }

    #[test]
    fn parses_modes() {
        assert_eq!("Substring".parse::<DetectionMode>().unwrap(), DetectionMode::Substring);
        assert_eq!("word-boundary".parse::<DetectionMode>().unwrap(), DetectionMode::Word);
        assert!(matches!(
            "fuzzy".parse::<DetectionMode>(),
            Err(HealthError::InvalidDetectionMode(_))
        ));
    }
}

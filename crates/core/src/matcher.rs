//! Symptom matching and condition ranking.
//!
//! [`analyse`] is a pure function over its request and the catalogue: it builds the effective
//! symptom set, scores every condition by overlap and returns the best few. Nothing here
//! logs above `debug` or touches state, so it can be called from any surface and tested
//! without one.
//!
//! ```text
//! match_ratio          = matched / total_condition_symptoms
//! adjusted_confidence  = clamp(round(base_confidence * match_ratio * 1.2), 30, 95)
//! ```
//!
//! Ranking is by raw overlap count, descending. Ties keep catalogue order.

use crate::constants::{
    CONFIDENCE_BOOST, MAX_ADJUSTED_CONFIDENCE, MIN_ADJUSTED_CONFIDENCE, TOP_RESULTS,
};
use crate::detection::{detect_symptoms, DetectionMode};
use crate::{HealthError, HealthResult};
use catalogue::{Catalogue, Condition};
use healthai_types::Symptom;
use serde::{Deserialize, Serialize};

/// One analysis request.
///
/// `age` and `gender` are carried for display and never influence scoring.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AnalysisRequest {
    /// Free-text description, possibly empty.
    #[serde(default)]
    pub text: String,
    /// Labels ticked on the checklist, possibly empty.
    #[serde(default)]
    pub selected: Vec<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl AnalysisRequest {
    pub fn new(text: impl Into<String>, selected: Vec<String>) -> Self {
        Self {
            text: text.into(),
            selected,
            age: None,
            gender: None,
        }
    }

    fn has_input(&self) -> bool {
        !self.text.trim().is_empty() || self.selected.iter().any(|s| !s.trim().is_empty())
    }
}

/// A condition that overlapped the effective symptom set.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ScoredCondition {
    pub condition: Condition,
    /// Number of the condition's symptoms present in the effective set.
    pub score: usize,
    /// The overlapping symptoms, in the condition's declared order.
    pub matched_symptoms: Vec<Symptom>,
    /// Percentage in `[30, 95]`.
    pub adjusted_confidence: u8,
}

/// Union of the selected labels and the vocabulary labels found in the text.
///
/// Selected labels come first in the order given, then detected labels in vocabulary order.
/// Duplicates are dropped and blank selections ignored. Selected labels outside the
/// vocabulary are kept; they can still match a condition's own symptom list.
pub fn effective_symptoms(
    request: &AnalysisRequest,
    vocabulary: &[Symptom],
    mode: DetectionMode,
) -> Vec<Symptom> {
    let mut effective: Vec<Symptom> = Vec::new();

    for label in &request.selected {
        if let Ok(symptom) = Symptom::new(label) {
            if !effective.contains(&symptom) {
                effective.push(symptom);
            }
        }
    }

    for detected in detect_symptoms(&request.text, vocabulary, mode) {
        if !effective.contains(detected) {
            effective.push(detected.clone());
        }
    }

    effective
}

/// Compute the clamped, adjusted confidence for a partial match.
pub fn adjusted_confidence(base_confidence: u8, matched: usize, total: usize) -> u8 {
    if total == 0 {
        return MIN_ADJUSTED_CONFIDENCE;
    }
    let ratio = matched as f64 / total as f64;
    let raw = (f64::from(base_confidence) * ratio * CONFIDENCE_BOOST).round();
    raw.clamp(
        f64::from(MIN_ADJUSTED_CONFIDENCE),
        f64::from(MAX_ADJUSTED_CONFIDENCE),
    ) as u8
}

/// Score every condition against the request and return the top matches.
///
/// # Errors
///
/// Returns [`HealthError::EmptySymptoms`] when the text is blank and nothing is selected.
/// An empty `Ok` vector means the input was valid but nothing matched.
pub fn analyse(
    request: &AnalysisRequest,
    catalogue: &Catalogue,
    mode: DetectionMode,
) -> HealthResult<Vec<ScoredCondition>> {
    if !request.has_input() {
        return Err(HealthError::EmptySymptoms);
    }

    let effective = effective_symptoms(request, catalogue.vocabulary(), mode);
    tracing::debug!(
        symptoms = ?effective.iter().map(Symptom::as_str).collect::<Vec<_>>(),
        age = request.age.as_deref().unwrap_or(""),
        gender = request.gender.as_deref().unwrap_or(""),
        "effective symptom set"
    );

    let mut scored: Vec<ScoredCondition> = catalogue
        .conditions()
        .iter()
        .filter_map(|condition| score_condition(condition, &effective))
        .collect();

    // Stable: equal scores keep catalogue order.
    scored.sort_by(|a, b| b.score.cmp(&a.score));
    scored.truncate(TOP_RESULTS);

    Ok(scored)
}

fn score_condition(condition: &Condition, effective: &[Symptom]) -> Option<ScoredCondition> {
    let matched_symptoms: Vec<Symptom> = condition
        .symptoms
        .iter()
        .filter(|s| effective.contains(s))
        .cloned()
        .collect();

    if matched_symptoms.is_empty() {
        return None;
    }

    let score = matched_symptoms.len();
    Some(ScoredCondition {
        adjusted_confidence: adjusted_confidence(
            condition.base_confidence,
            score,
            condition.symptoms.len(),
        ),
        condition: condition.clone(),
        score,
        matched_symptoms,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalogue() -> Catalogue {
        Catalogue::embedded().expect("embedded catalogue")
    }

    fn names(results: &[ScoredCondition]) -> Vec<&str> {
        results.iter().map(|r| r.condition.name.as_str()).collect()
    }

    fn selected(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|l| l.to_string()).collect()
    }

    #[test]
    fn empty_text_and_selection_is_rejected() {
        let err = analyse(&AnalysisRequest::default(), &catalogue(), DetectionMode::Substring)
            .expect_err("empty input must fail");
        assert!(matches!(err, HealthError::EmptySymptoms));

        let blank = AnalysisRequest::new("   ", selected(&[" "]));
        assert!(analyse(&blank, &catalogue(), DetectionMode::Substring).is_err());
    }

    #[test]
    fn checklist_only_ranks_common_cold() {
        let request = AnalysisRequest::new("", selected(&["runny nose", "sneezing", "cough"]));
        let results = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();

        let cold = results
            .iter()
            .find(|r| r.condition.name.as_str() == "Common Cold")
            .expect("Common Cold in top 3");
        assert_eq!(cold.score, 3);
        assert_eq!(cold.adjusted_confidence, 51);
        assert_eq!(results[0].condition.name.as_str(), "Common Cold");
    }

    #[test]
    fn free_text_ranks_migraine_first() {
        let request = AnalysisRequest::new(
            "I have a severe headache and nausea and sensitivity to light",
            vec![],
        );
        let results = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();

        assert_eq!(results[0].condition.name.as_str(), "Migraine");
        assert_eq!(results[0].score, 2);
        let matched: Vec<&str> = results[0].matched_symptoms.iter().map(|s| s.as_str()).collect();
        assert_eq!(matched, vec!["nausea", "sensitivity to light"]);
        assert!(results[1..].iter().all(|r| r.score < results[0].score));
    }

    #[test]
    fn no_overlap_returns_empty() {
        let request = AnalysisRequest::new("", selected(&["insomnia"]));
        let results = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();
        assert!(results.is_empty());

        let request = AnalysisRequest::new("my elbow feels odd", vec![]);
        assert!(analyse(&request, &catalogue(), DetectionMode::Substring)
            .unwrap()
            .is_empty());
    }

    #[test]
    fn effective_set_is_a_union_of_text_and_checklist() {
        let request = AnalysisRequest::new("I have a fever", selected(&["cough"]));
        let effective = effective_symptoms(&request, catalogue().vocabulary(), DetectionMode::Substring);
        let labels: Vec<&str> = effective.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["cough", "fever"]);

        let results = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();
        assert_eq!(names(&results), vec!["Common Cold", "Influenza (Flu)", "Gastroenteritis"]);
        assert_eq!(results[2].matched_symptoms[0].as_str(), "fever");
    }

    #[test]
    fn duplicates_across_sources_count_once() {
        let request = AnalysisRequest::new("cough cough", selected(&["Cough", "cough "]));
        let effective = effective_symptoms(&request, catalogue().vocabulary(), DetectionMode::Substring);
        assert_eq!(effective.len(), 1);
    }

    #[test]
    fn ties_keep_catalogue_order() {
        let request = AnalysisRequest::new("", selected(&["headache"]));
        let results = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();
        assert_eq!(names(&results), vec!["Common Cold", "Influenza (Flu)"]);
    }

    #[test]
    fn results_are_capped_at_three() {
        let request = AnalysisRequest::new(
            "fever, cough, nausea, fatigue, dizziness and a headache",
            vec![],
        );
        let results = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();
        assert_eq!(results.len(), TOP_RESULTS);
        assert!(results.windows(2).all(|w| w[0].score >= w[1].score));
    }

    #[test]
    fn ordering_is_deterministic() {
        let request = AnalysisRequest::new("fever and nausea with fatigue", selected(&["cough"]));
        let first = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();
        let second = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn selected_labels_outside_vocabulary_still_match() {
        let request = AnalysisRequest::new("", selected(&["High Fever"]));
        let results = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();
        assert_eq!(names(&results), vec!["Influenza (Flu)"]);
    }

    #[test]
    fn adjusted_confidence_stays_in_bounds() {
        for condition in catalogue().conditions() {
            let total = condition.symptoms.len();
            for matched in 1..=total {
                let c = adjusted_confidence(condition.base_confidence, matched, total);
                assert!(
                    (MIN_ADJUSTED_CONFIDENCE..=MAX_ADJUSTED_CONFIDENCE).contains(&c),
                    "{} with {matched}/{total} gave {c}",
                    condition.name
                );
            }
        }

        assert_eq!(adjusted_confidence(100, 5, 5), MAX_ADJUSTED_CONFIDENCE);
        assert_eq!(adjusted_confidence(10, 1, 7), MIN_ADJUSTED_CONFIDENCE);
        assert_eq!(adjusted_confidence(0, 1, 1), MIN_ADJUSTED_CONFIDENCE);
        assert_eq!(adjusted_confidence(88, 2, 5), 42);
    }

    #[test]
    fn word_mode_ignores_partial_words() {
        // "headaches" only matches "headache" in substring mode.
        let request = AnalysisRequest::new("recurring headaches", vec![]);
        let substring = analyse(&request, &catalogue(), DetectionMode::Substring).unwrap();
        assert!(!substring.is_empty());

        let word = analyse(&request, &catalogue(), DetectionMode::Word).unwrap();
        assert!(word.is_empty());
    }
}

//! Condition table, symptom vocabulary and treatment plans.
//!
//! Responsibilities:
//! - Define the domain-level condition and treatment types
//! - Define the strict wire model for the `conditions`, `vocabulary` and `treatments` keys
//! - Validate labels, confidences and uniqueness while translating

use crate::{CatalogueError, CatalogueResult};
use healthai_types::{NonEmptyText, Symptom};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;

/// Upper bound for a condition's base confidence, in percent.
pub const MAX_BASE_CONFIDENCE: u8 = 100;

// ============================================================================
// Public domain-level types
// ============================================================================

/// A named ailment with its associated symptom labels and guidance text.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Condition {
    /// Unique condition name.
    pub name: NonEmptyText,

    /// Declared symptoms, in table order. Never empty, no duplicates.
    pub symptoms: Vec<Symptom>,

    /// Base confidence in percent (0-100).
    pub base_confidence: u8,

    pub description: String,

    /// Recommended actions shown alongside a match.
    pub treatment: String,

    /// Free-form severity label, for example "mild to moderate".
    pub severity: String,
}

/// The three recommendation lists making up a treatment plan.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct TreatmentPlan {
    pub medications: Vec<String>,
    pub home_remedies: Vec<String>,
    pub lifestyle: Vec<String>,
}

/// A treatment plan dedicated to one condition.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NamedTreatmentPlan {
    pub condition: NonEmptyText,
    pub plan: TreatmentPlan,
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ConditionWire {
    pub name: String,
    pub symptoms: Vec<String>,
    pub confidence: u8,
    pub description: String,
    pub treatment: String,
    pub severity: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct TreatmentsWire {
    #[serde(default)]
    pub plans: Vec<TreatmentPlanWire>,
    pub fallback: PlanListsWire,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct TreatmentPlanWire {
    pub condition: String,
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub home_remedies: Vec<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct PlanListsWire {
    #[serde(default)]
    pub medications: Vec<String>,
    #[serde(default)]
    pub home_remedies: Vec<String>,
    #[serde(default)]
    pub lifestyle: Vec<String>,
}

// ============================================================================
// Translation helpers
// ============================================================================

pub(crate) fn conditions_from_wire(wire: Vec<ConditionWire>) -> CatalogueResult<Vec<Condition>> {
    let mut seen = HashSet::new();
    let mut conditions = Vec::with_capacity(wire.len());

    for (index, c) in wire.into_iter().enumerate() {
        let name = NonEmptyText::new(&c.name).map_err(|_| {
            CatalogueError::InvalidInput(format!("conditions.{index}.name cannot be empty"))
        })?;

        if !seen.insert(name.as_str().to_owned()) {
            return Err(CatalogueError::InvalidInput(format!(
                "duplicate condition name '{name}'"
            )));
        }

        if c.confidence > MAX_BASE_CONFIDENCE {
            return Err(CatalogueError::InvalidInput(format!(
                "condition '{name}' has confidence {} (maximum is {MAX_BASE_CONFIDENCE})",
                c.confidence
            )));
        }

        if c.symptoms.is_empty() {
            return Err(CatalogueError::InvalidInput(format!(
                "condition '{name}' declares no symptoms"
            )));
        }

        let symptoms = symptom_list(&c.symptoms, &format!("condition '{name}'"))?;

        conditions.push(Condition {
            name,
            symptoms,
            base_confidence: c.confidence,
            description: c.description,
            treatment: c.treatment,
            severity: c.severity,
        });
    }

    Ok(conditions)
}

pub(crate) fn conditions_to_wire(conditions: &[Condition]) -> Vec<ConditionWire> {
    conditions
        .iter()
        .map(|c| ConditionWire {
            name: c.name.to_string(),
            symptoms: c.symptoms.iter().map(|s| s.to_string()).collect(),
            confidence: c.base_confidence,
            description: c.description.clone(),
            treatment: c.treatment.clone(),
            severity: c.severity.clone(),
        })
        .collect()
}

pub(crate) fn vocabulary_from_wire(wire: &[String]) -> CatalogueResult<Vec<Symptom>> {
    if wire.is_empty() {
        return Err(CatalogueError::InvalidInput(
            "vocabulary cannot be empty".into(),
        ));
    }
    symptom_list(wire, "vocabulary")
}

pub(crate) fn treatments_from_wire(
    wire: TreatmentsWire,
) -> CatalogueResult<(Vec<NamedTreatmentPlan>, TreatmentPlan)> {
    let mut seen = HashSet::new();
    let mut plans = Vec::with_capacity(wire.plans.len());

    for p in wire.plans {
        let condition = NonEmptyText::new(&p.condition).map_err(|_| {
            CatalogueError::InvalidInput("treatment plan condition cannot be empty".into())
        })?;
        if !seen.insert(condition.as_str().to_owned()) {
            return Err(CatalogueError::InvalidInput(format!(
                "duplicate treatment plan for '{condition}'"
            )));
        }
        plans.push(NamedTreatmentPlan {
            condition,
            plan: TreatmentPlan {
                medications: p.medications,
                home_remedies: p.home_remedies,
                lifestyle: p.lifestyle,
            },
        });
    }

    let fallback = TreatmentPlan {
        medications: wire.fallback.medications,
        home_remedies: wire.fallback.home_remedies,
        lifestyle: wire.fallback.lifestyle,
    };

    Ok((plans, fallback))
}

pub(crate) fn treatments_to_wire(
    plans: &[NamedTreatmentPlan],
    fallback: &TreatmentPlan,
) -> TreatmentsWire {
    TreatmentsWire {
        plans: plans
            .iter()
            .map(|p| TreatmentPlanWire {
                condition: p.condition.to_string(),
                medications: p.plan.medications.clone(),
                home_remedies: p.plan.home_remedies.clone(),
                lifestyle: p.plan.lifestyle.clone(),
            })
            .collect(),
        fallback: PlanListsWire {
            medications: fallback.medications.clone(),
            home_remedies: fallback.home_remedies.clone(),
            lifestyle: fallback.lifestyle.clone(),
        },
    }
}

/// Parse a list of labels into symptoms, rejecting blanks and duplicates.
fn symptom_list(labels: &[String], context: &str) -> CatalogueResult<Vec<Symptom>> {
    let mut seen = HashSet::new();
    let mut symptoms = Vec::with_capacity(labels.len());

    for label in labels {
        let symptom = Symptom::new(label).map_err(|_| {
            CatalogueError::InvalidInput(format!("{context} contains an empty symptom label"))
        })?;
        if !seen.insert(symptom.clone()) {
            return Err(CatalogueError::InvalidInput(format!(
                "{context} repeats symptom '{symptom}'"
            )));
        }
        symptoms.push(symptom);
    }

    Ok(symptoms)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn wire(name: &str, symptoms: &[&str], confidence: u8) -> ConditionWire {
        ConditionWire {
            name: name.into(),
            symptoms: symptoms.iter().map(|s| s.to_string()).collect(),
            confidence,
            description: "d".into(),
            treatment: "t".into(),
            severity: "mild".into(),
        }
    }

    #[test]
    fn normalises_symptom_labels() {
        let conditions =
            conditions_from_wire(vec![wire("Cold", &["Runny Nose", " cough"], 80)]).unwrap();
        let labels: Vec<&str> = conditions[0].symptoms.iter().map(|s| s.as_str()).collect();
        assert_eq!(labels, vec!["runny nose", "cough"]);
    }

    #[test]
    fn rejects_duplicate_condition_names() {
        let err = conditions_from_wire(vec![wire("Cold", &["cough"], 80), wire("Cold", &["fever"], 60)])
            .expect_err("duplicate names rejected");
        assert!(err.to_string().contains("duplicate condition name 'Cold'"));
    }

    #[test]
    fn rejects_confidence_over_one_hundred() {
        let err = conditions_from_wire(vec![wire("Cold", &["cough"], 101)]).unwrap_err();
        assert!(err.to_string().contains("maximum is 100"));
    }

    #[test]
    fn rejects_condition_without_symptoms() {
        let err = conditions_from_wire(vec![wire("Cold", &[], 50)]).unwrap_err();
        assert!(err.to_string().contains("declares no symptoms"));
    }

    #[test]
    fn rejects_repeated_symptom_within_condition() {
        let err = conditions_from_wire(vec![wire("Cold", &["cough", "Cough"], 50)]).unwrap_err();
        assert!(err.to_string().contains("repeats symptom 'cough'"));
    }

    #[test]
    fn rejects_repeated_vocabulary_label() {
        let err = vocabulary_from_wire(&["fever".into(), "FEVER".into()]).unwrap_err();
        assert!(matches!(err, CatalogueError::InvalidInput(_)));
    }

    #[test]
    fn rejects_empty_vocabulary() {
        assert!(vocabulary_from_wire(&[]).is_err());
    }
}

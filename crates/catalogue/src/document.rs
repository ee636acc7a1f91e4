//! The catalogue document: parse, validate and render the whole reference-data file.

use crate::chat::{self, ChatResponses, ChatWire};
use crate::conditions::{self, Condition, ConditionWire, NamedTreatmentPlan, TreatmentPlan, TreatmentsWire};
use crate::guidance::{self, ChartSeries, ChartSeriesWire, Guidance, GuidanceWire};
use crate::schedule::{self, Appointment, AppointmentWire, Medication, MedicationWire};
use crate::{CatalogueError, CatalogueResult};
use healthai_types::{NonEmptyText, Symptom};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// The catalogue shipped with the binary.
pub const EMBEDDED_CATALOGUE: &str = include_str!("../data/catalogue.yaml");

// ============================================================================
// Public domain-level types
// ============================================================================

/// Immutable reference data for the whole application.
///
/// Build one at startup with [`Catalogue::embedded`] or [`Catalogue::load`] and share it
/// (typically behind an `Arc`). There is no way to mutate a catalogue after construction.
#[derive(Clone, Debug, PartialEq)]
pub struct Catalogue {
    conditions: Vec<Condition>,
    vocabulary: Vec<Symptom>,
    treatment_plans: Vec<NamedTreatmentPlan>,
    fallback_plan: TreatmentPlan,
    tips: Vec<NonEmptyText>,
    appointments: Vec<Appointment>,
    medications: Vec<Medication>,
    chat: ChatResponses,
    guidance: Guidance,
    analytics: Vec<ChartSeries>,
}

impl Catalogue {
    /// Parse the embedded catalogue.
    ///
    /// # Errors
    ///
    /// Only fails if the embedded YAML itself is broken, which the crate tests rule out.
    pub fn embedded() -> CatalogueResult<Self> {
        Self::parse(EMBEDDED_CATALOGUE)
    }

    /// Read and parse a catalogue file.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError::Io`] if the file cannot be read, otherwise any error from
    /// [`Catalogue::parse`].
    pub fn load(path: &Path) -> CatalogueResult<Self> {
        let text = std::fs::read_to_string(path)?;
        let catalogue = Self::parse(&text)?;
        tracing::info!(
            "loaded catalogue from {} ({} conditions, {} vocabulary labels)",
            path.display(),
            catalogue.conditions.len(),
            catalogue.vocabulary.len()
        );
        Ok(catalogue)
    }

    /// Parse a catalogue from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `conditions[2].confidence`) to the failing field when the YAML does not match the wire
    /// schema.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if:
    /// - the YAML does not match the wire schema or contains unknown keys,
    /// - a label, name, date or time is invalid,
    /// - names or labels that must be unique repeat,
    /// - a treatment plan names a condition that is not in the table,
    /// - there are no conditions or no health tips.
    pub fn parse(yaml_text: &str) -> CatalogueResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, CatalogueWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(CatalogueError::Translation(format!(
                    "catalogue schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Render the catalogue as YAML text.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogueError`] if serialisation fails.
    pub fn render(&self) -> CatalogueResult<String> {
        Ok(serde_yaml::to_string(&domain_to_wire(self))?)
    }

    pub fn conditions(&self) -> &[Condition] {
        &self.conditions
    }

    /// Look up a condition by exact name.
    pub fn condition(&self, name: &str) -> Option<&Condition> {
        self.conditions.iter().find(|c| c.name.as_str() == name)
    }

    /// The closed symptom vocabulary, in catalogue order.
    pub fn vocabulary(&self) -> &[Symptom] {
        &self.vocabulary
    }

    /// The dedicated treatment plan for a condition, if one exists.
    pub fn treatment_plan(&self, condition: &str) -> Option<&TreatmentPlan> {
        self.treatment_plans
            .iter()
            .find(|p| p.condition.as_str() == condition)
            .map(|p| &p.plan)
    }

    /// The plan used for conditions without a dedicated entry.
    pub fn fallback_plan(&self) -> &TreatmentPlan {
        &self.fallback_plan
    }

    /// Health tips. Never empty.
    pub fn tips(&self) -> &[NonEmptyText] {
        &self.tips
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn medications(&self) -> &[Medication] {
        &self.medications
    }

    pub fn chat(&self) -> &ChatResponses {
        &self.chat
    }

    pub fn guidance(&self) -> &Guidance {
        &self.guidance
    }

    pub fn analytics(&self) -> &[ChartSeries] {
        &self.analytics
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

/// Wire representation of the catalogue file.
#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
struct CatalogueWire {
    conditions: Vec<ConditionWire>,
    vocabulary: Vec<String>,
    treatments: TreatmentsWire,
    tips: Vec<String>,
    #[serde(default)]
    appointments: Vec<AppointmentWire>,
    #[serde(default)]
    medications: Vec<MedicationWire>,
    chat: ChatWire,
    guidance: GuidanceWire,
    #[serde(default)]
    analytics: Vec<ChartSeriesWire>,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn wire_to_domain(wire: CatalogueWire) -> CatalogueResult<Catalogue> {
    let conditions = conditions::conditions_from_wire(wire.conditions)?;
    if conditions.is_empty() {
        return Err(CatalogueError::InvalidInput(
            "catalogue must declare at least one condition".into(),
        ));
    }

    let vocabulary = conditions::vocabulary_from_wire(&wire.vocabulary)?;

    let (treatment_plans, fallback_plan) = conditions::treatments_from_wire(wire.treatments)?;
    if let Some(orphan) = treatment_plans
        .iter()
        .find(|p| !conditions.iter().any(|c| c.name == p.condition))
    {
        return Err(CatalogueError::InvalidInput(format!(
            "treatment plan refers to unknown condition '{}'",
            orphan.condition
        )));
    }

    let tips = wire
        .tips
        .iter()
        .enumerate()
        .map(|(index, tip)| {
            NonEmptyText::new(tip).map_err(|e| {
                CatalogueError::InvalidInput(format!("tips.{index}: {e}"))
            })
        })
        .collect::<CatalogueResult<Vec<_>>>()?;
    if tips.is_empty() {
        return Err(CatalogueError::InvalidInput(
            "catalogue must contain at least one health tip".into(),
        ));
    }

    Ok(Catalogue {
        conditions,
        vocabulary,
        treatment_plans,
        fallback_plan,
        tips,
        appointments: schedule::appointments_from_wire(wire.appointments)?,
        medications: schedule::medications_from_wire(wire.medications)?,
        chat: chat::chat_from_wire(wire.chat)?,
        guidance: guidance::guidance_from_wire(wire.guidance),
        analytics: guidance::analytics_from_wire(wire.analytics)?,
    })
}

fn domain_to_wire(catalogue: &Catalogue) -> CatalogueWire {
    CatalogueWire {
        conditions: conditions::conditions_to_wire(&catalogue.conditions),
        vocabulary: catalogue.vocabulary.iter().map(|s| s.to_string()).collect(),
        treatments: conditions::treatments_to_wire(
            &catalogue.treatment_plans,
            &catalogue.fallback_plan,
        ),
        tips: catalogue.tips.iter().map(|t| t.to_string()).collect(),
        appointments: schedule::appointments_to_wire(&catalogue.appointments),
        medications: schedule::medications_to_wire(&catalogue.medications),
        chat: chat::chat_to_wire(&catalogue.chat),
        guidance: guidance::guidance_to_wire(&catalogue.guidance),
        analytics: guidance::analytics_to_wire(&catalogue.analytics),
    }
}

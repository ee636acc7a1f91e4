//! Reference-data boundary for HealthAI.
//!
//! This crate provides **wire models** and **translation helpers** for the static catalogue
//! the application runs on:
//! - the condition table and the closed symptom vocabulary
//! - treatment plans, health tips, appointments and medications
//! - canned chat responses, guidance text and analytics series
//!
//! The catalogue is YAML. A default copy is embedded in the binary and can be replaced by a
//! file at startup. Once loaded, a [`Catalogue`] is immutable.
//!
//! Parsing is strict: unknown keys are rejected and schema errors name the offending path.

pub mod chat;
pub mod conditions;
pub mod document;
pub mod guidance;
pub mod schedule;

// Re-export facades
pub use document::{Catalogue, EMBEDDED_CATALOGUE};

// Re-export public domain-level types
pub use chat::{ChatResponses, KeywordResponse};
pub use conditions::{Condition, NamedTreatmentPlan, TreatmentPlan};
pub use guidance::{ChartKind, ChartPoint, ChartSeries, Guidance, NoMatchGuidance};
pub use schedule::{Appointment, Medication};

/// Errors returned by the `catalogue` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum CatalogueError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`CatalogueError`].
pub type CatalogueResult<T> = Result<T, CatalogueError>;

//! Appointment and medication listings.
//!
//! Dates are ISO 8601 calendar dates (`YYYY-MM-DD`). Times of day use the 12-hour clock as
//! shown to the user (`9:15 AM`, `2:30 PM`).

use crate::{CatalogueError, CatalogueResult};
use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};

const DATE_FORMAT: &str = "%Y-%m-%d";
const CLOCK_PARSE_FORMAT: &str = "%I:%M %p";
const CLOCK_RENDER_FORMAT: &str = "%-I:%M %p";

// ============================================================================
// Public domain-level types
// ============================================================================

/// A scheduled appointment with a provider.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Appointment {
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub provider: String,
    /// Kind of visit, for example "Follow-up".
    pub kind: String,
}

/// A medication the user takes on a schedule.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Medication {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    /// Times of day, never empty.
    pub times: Vec<NaiveTime>,
}

impl Appointment {
    /// Time of day in the 12-hour display form.
    pub fn time_label(&self) -> String {
        format_clock_time(self.time)
    }
}

impl Medication {
    /// All times of day joined with ", ", for example `8:00 AM, 8:00 PM`.
    pub fn times_label(&self) -> String {
        self.times
            .iter()
            .map(|t| format_clock_time(*t))
            .collect::<Vec<_>>()
            .join(", ")
    }
}

/// Parse a 12-hour clock time such as `2:30 PM`.
pub fn parse_clock_time(value: &str) -> CatalogueResult<NaiveTime> {
    NaiveTime::parse_from_str(value.trim(), CLOCK_PARSE_FORMAT)
        .map_err(|e| CatalogueError::Translation(format!("invalid time '{value}': {e}")))
}

/// Render a time of day in the 12-hour display form.
pub fn format_clock_time(time: NaiveTime) -> String {
    time.format(CLOCK_RENDER_FORMAT).to_string()
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct AppointmentWire {
    pub date: String,
    pub time: String,
    pub provider: String,
    #[serde(rename = "type")]
    pub kind: String,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct MedicationWire {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: Vec<String>,
}

// ============================================================================
// Translation helpers
// ============================================================================

pub(crate) fn appointments_from_wire(
    wire: Vec<AppointmentWire>,
) -> CatalogueResult<Vec<Appointment>> {
    wire.into_iter()
        .map(|a| {
            let date = NaiveDate::parse_from_str(a.date.trim(), DATE_FORMAT).map_err(|e| {
                CatalogueError::Translation(format!("invalid appointment date '{}': {e}", a.date))
            })?;
            Ok(Appointment {
                date,
                time: parse_clock_time(&a.time)?,
                provider: a.provider,
                kind: a.kind,
            })
        })
        .collect()
}

pub(crate) fn appointments_to_wire(appointments: &[Appointment]) -> Vec<AppointmentWire> {
    appointments
        .iter()
        .map(|a| AppointmentWire {
            date: a.date.format(DATE_FORMAT).to_string(),
            time: a.time_label(),
            provider: a.provider.clone(),
            kind: a.kind.clone(),
        })
        .collect()
}

pub(crate) fn medications_from_wire(wire: Vec<MedicationWire>) -> CatalogueResult<Vec<Medication>> {
    wire.into_iter()
        .map(|m| {
            if m.times.is_empty() {
                return Err(CatalogueError::InvalidInput(format!(
                    "medication '{}' has no times",
                    m.name
                )));
            }
            let times = m
                .times
                .iter()
                .map(|t| parse_clock_time(t))
                .collect::<CatalogueResult<Vec<_>>>()?;
            Ok(Medication {
                name: m.name,
                dosage: m.dosage,
                frequency: m.frequency,
                times,
            })
        })
        .collect()
}

pub(crate) fn medications_to_wire(medications: &[Medication]) -> Vec<MedicationWire> {
    medications
        .iter()
        .map(|m| MedicationWire {
            name: m.name.clone(),
            dosage: m.dosage.clone(),
            frequency: m.frequency.clone(),
            times: m.times.iter().map(|t| format_clock_time(*t)).collect(),
        })
        .collect()
}

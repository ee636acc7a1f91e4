//! Guidance text and analytics series.

use crate::{CatalogueError, CatalogueResult};
use serde::{Deserialize, Serialize};

// ============================================================================
// Public domain-level types
// ============================================================================

/// Fixed advisory text shown around analysis results and treatment plans.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct Guidance {
    pub disclaimer: String,
    pub general_recommendations: Vec<String>,
    pub no_match: NoMatchGuidance,
    pub treatment_reminders: Vec<String>,
}

/// Shown instead of results when no condition matched.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct NoMatchGuidance {
    pub message: String,
    pub suggestions: Vec<String>,
}

/// How a series is drawn.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Doughnut,
}

/// A static dataset for the analytics view.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartSeries {
    /// Stable identifier, for example `symptom_severity`.
    pub id: String,
    pub title: String,
    pub kind: ChartKind,
    pub points: Vec<ChartPoint>,
    /// Fixed upper bound of the value axis, if any.
    pub max: Option<f64>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct ChartPoint {
    pub label: String,
    pub value: f64,
}

impl ChartSeries {
    /// Largest value on the axis: the fixed maximum, else the largest point.
    pub fn axis_max(&self) -> f64 {
        self.max.unwrap_or_else(|| {
            self.points
                .iter()
                .map(|p| p.value)
                .fold(0.0_f64, f64::max)
        })
    }

    /// Sum of all point values. Doughnut slices are drawn as shares of this.
    pub fn total(&self) -> f64 {
        self.points.iter().map(|p| p.value).sum()
    }
}

// ============================================================================
// Wire types
// ============================================================================

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct GuidanceWire {
    pub disclaimer: String,
    pub general_recommendations: Vec<String>,
    pub no_match: NoMatchWire,
    pub treatment_reminders: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub(crate) struct NoMatchWire {
    pub message: String,
    pub suggestions: Vec<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq)]
#[serde(deny_unknown_fields)]
pub(crate) struct ChartSeriesWire {
    pub id: String,
    pub title: String,
    pub chart: ChartKind,
    pub labels: Vec<String>,
    pub values: Vec<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max: Option<f64>,
}

// ============================================================================
// Translation helpers
// ============================================================================

pub(crate) fn guidance_from_wire(wire: GuidanceWire) -> Guidance {
    Guidance {
        disclaimer: wire.disclaimer,
        general_recommendations: wire.general_recommendations,
        no_match: NoMatchGuidance {
            message: wire.no_match.message,
            suggestions: wire.no_match.suggestions,
        },
        treatment_reminders: wire.treatment_reminders,
    }
}

pub(crate) fn guidance_to_wire(guidance: &Guidance) -> GuidanceWire {
    GuidanceWire {
        disclaimer: guidance.disclaimer.clone(),
        general_recommendations: guidance.general_recommendations.clone(),
        no_match: NoMatchWire {
            message: guidance.no_match.message.clone(),
            suggestions: guidance.no_match.suggestions.clone(),
        },
        treatment_reminders: guidance.treatment_reminders.clone(),
    }
}

pub(crate) fn analytics_from_wire(wire: Vec<ChartSeriesWire>) -> CatalogueResult<Vec<ChartSeries>> {
    wire.into_iter()
        .map(|s| {
            if s.labels.len() != s.values.len() {
                return Err(CatalogueError::InvalidInput(format!(
                    "analytics series '{}' has {} labels but {} values",
                    s.id,
                    s.labels.len(),
                    s.values.len()
                )));
            }
            if s.values.iter().any(|v| !v.is_finite() || *v < 0.0) {
                return Err(CatalogueError::InvalidInput(format!(
                    "analytics series '{}' contains a negative or non-finite value",
                    s.id
                )));
            }
            let points = s
                .labels
                .into_iter()
                .zip(s.values)
                .map(|(label, value)| ChartPoint { label, value })
                .collect();
            Ok(ChartSeries {
                id: s.id,
                title: s.title,
                kind: s.chart,
                points,
                max: s.max,
            })
        })
        .collect()
}

pub(crate) fn analytics_to_wire(series: &[ChartSeries]) -> Vec<ChartSeriesWire> {
    series
        .iter()
        .map(|s| ChartSeriesWire {
            id: s.id.clone(),
            title: s.title.clone(),
            chart: s.kind,
            labels: s.points.iter().map(|p| p.label.clone()).collect(),
            values: s.points.iter().map(|p| p.value).collect(),
            max: s.max,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn series(labels: &[&str], values: &[f64], max: Option<f64>) -> ChartSeriesWire {
        ChartSeriesWire {
            id: "s".into(),
            title: "S".into(),
            chart: ChartKind::Bar,
            labels: labels.iter().map(|l| l.to_string()).collect(),
            values: values.to_vec(),
            max,
        }
    }

    #[test]
    fn rejects_mismatched_labels_and_values() {
        let err = analytics_from_wire(vec![series(&["Mon", "Tue"], &[1.0], None)]).unwrap_err();
        assert!(err.to_string().contains("2 labels but 1 values"));
    }

    #[test]
    fn axis_max_prefers_fixed_maximum() {
        let fixed = analytics_from_wire(vec![series(&["Mon"], &[4.0], Some(10.0))]).unwrap();
        assert_eq!(fixed[0].axis_max(), 10.0);

        let derived = analytics_from_wire(vec![series(&["a", "b"], &[3.0, 7.0], None)]).unwrap();
        assert_eq!(derived[0].axis_max(), 7.0);
        assert_eq!(derived[0].total(), 10.0);
    }

    #[test]
    fn rejects_negative_values() {
        assert!(analytics_from_wire(vec![series(&["a"], &[-1.0], None)]).is_err());
    }
}

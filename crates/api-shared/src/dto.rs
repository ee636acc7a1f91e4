//! JSON request and response bodies.
//!
//! Core view types stay free of API concerns; these mirror them with OpenAPI schemas and
//! convert with `From`.

use catalogue::{ChartSeries, Condition};
use healthai_core::chat::ChatReply;
use healthai_core::matcher::AnalysisRequest;
use healthai_core::treatment::TreatmentPlanView;
use healthai_core::views::{
    AppointmentItem, ChecklistItem, DashboardView, MedicationItem, PredictionOutcome, ResultCard,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub ok: bool,
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppointmentRes {
    pub kind: String,
    pub provider: String,
    /// ISO date, `YYYY-MM-DD`.
    pub date: String,
    /// 12-hour clock, for example `10:00 AM`.
    pub time: String,
    pub status: String,
}

impl From<AppointmentItem> for AppointmentRes {
    fn from(item: AppointmentItem) -> Self {
        Self {
            kind: item.kind,
            provider: item.provider,
            date: item.date,
            time: item.time,
            status: item.status,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AppointmentsRes {
    pub appointments: Vec<AppointmentRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicationRes {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: String,
}

impl From<MedicationItem> for MedicationRes {
    fn from(item: MedicationItem) -> Self {
        Self {
            name: item.name,
            dosage: item.dosage,
            frequency: item.frequency,
            times: item.times,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct MedicationsRes {
    pub medications: Vec<MedicationRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DashboardRes {
    pub daily_tip: String,
    pub next_appointment: Option<AppointmentRes>,
    pub medication_count: usize,
}

impl From<DashboardView> for DashboardRes {
    fn from(view: DashboardView) -> Self {
        Self {
            daily_tip: view.daily_tip,
            next_appointment: view.next_appointment.map(AppointmentRes::from),
            medication_count: view.medication_count,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChecklistItemRes {
    pub id: String,
    pub value: String,
    pub label: String,
}

impl From<ChecklistItem> for ChecklistItemRes {
    fn from(item: ChecklistItem) -> Self {
        Self {
            id: item.id,
            value: item.value,
            label: item.label,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct SymptomsRes {
    /// Every label the matcher recognises.
    pub vocabulary: Vec<String>,
    /// The subset offered as checkboxes.
    pub checklist: Vec<ChecklistItemRes>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConditionRes {
    pub name: String,
    pub symptoms: Vec<String>,
    pub base_confidence: u8,
    pub description: String,
    pub severity: String,
}

impl From<&Condition> for ConditionRes {
    fn from(condition: &Condition) -> Self {
        Self {
            name: condition.name.to_string(),
            symptoms: condition.symptoms.iter().map(|s| s.to_string()).collect(),
            base_confidence: condition.base_confidence,
            description: condition.description.clone(),
            severity: condition.severity.clone(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConditionsRes {
    pub conditions: Vec<ConditionRes>,
}

/// Symptom analysis input. At least one of `text` and `symptoms` must be non-blank.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyseReq {
    #[serde(default)]
    pub text: String,
    /// Labels ticked on the checklist.
    #[serde(default)]
    pub symptoms: Vec<String>,
    #[serde(default)]
    pub age: Option<String>,
    #[serde(default)]
    pub gender: Option<String>,
}

impl From<AnalyseReq> for AnalysisRequest {
    fn from(req: AnalyseReq) -> Self {
        let mut request = AnalysisRequest::new(req.text, req.symptoms);
        request.age = req.age;
        request.gender = req.gender;
        request
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ConditionMatchRes {
    pub name: String,
    pub score: usize,
    pub adjusted_confidence: u8,
    pub confidence_label: String,
    pub description: String,
    pub recommended_actions: String,
    pub severity: String,
    pub matched_symptoms: Vec<String>,
}

impl From<ResultCard> for ConditionMatchRes {
    fn from(card: ResultCard) -> Self {
        Self {
            name: card.name,
            score: card.score,
            adjusted_confidence: card.adjusted_confidence,
            confidence_label: card.confidence_label,
            description: card.description,
            recommended_actions: card.recommended_actions,
            severity: card.severity,
            matched_symptoms: card.matched_symptoms,
        }
    }
}

/// Analysis outcome. `matched` is false when no condition shares a symptom with the input;
/// `message` and `suggestions` are then filled instead of `results`.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct AnalyseRes {
    pub matched: bool,
    pub disclaimer: Option<String>,
    pub results: Vec<ConditionMatchRes>,
    pub recommendations: Vec<String>,
    pub message: Option<String>,
    pub suggestions: Vec<String>,
}

impl From<PredictionOutcome> for AnalyseRes {
    fn from(outcome: PredictionOutcome) -> Self {
        match outcome {
            PredictionOutcome::Matches {
                disclaimer,
                results,
                recommendations,
            } => Self {
                matched: true,
                disclaimer: Some(disclaimer),
                results: results.into_iter().map(ConditionMatchRes::from).collect(),
                recommendations,
                message: None,
                suggestions: Vec::new(),
            },
            PredictionOutcome::NoMatch {
                message,
                suggestions,
            } => Self {
                matched: false,
                disclaimer: None,
                results: Vec::new(),
                recommendations: Vec::new(),
                message: Some(message),
                suggestions,
            },
        }
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatReq {
    #[serde(default)]
    pub message: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ChatRes {
    /// Which rule answered: `fever`, `symptom_mention`, `greeting`, `help`, `thanks` or
    /// `default`.
    pub kind: String,
    pub reply: String,
    pub symptoms: Vec<String>,
}

impl From<ChatReply> for ChatRes {
    fn from(reply: ChatReply) -> Self {
        Self {
            kind: reply.kind.as_str().to_string(),
            reply: reply.text,
            symptoms: reply.symptoms.iter().map(|s| s.to_string()).collect(),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct TreatmentRes {
    pub condition: String,
    pub medications: Vec<String>,
    pub home_remedies: Vec<String>,
    pub lifestyle: Vec<String>,
    pub is_fallback: bool,
    pub reminders: Vec<String>,
}

impl From<TreatmentPlanView> for TreatmentRes {
    fn from(view: TreatmentPlanView) -> Self {
        Self {
            condition: view.condition,
            medications: view.plan.medications,
            home_remedies: view.plan.home_remedies,
            lifestyle: view.plan.lifestyle,
            is_fallback: view.is_fallback,
            reminders: view.reminders,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartPointRes {
    pub label: String,
    pub value: f64,
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ChartSeriesRes {
    pub id: String,
    pub title: String,
    /// `line`, `bar` or `doughnut`.
    pub chart: String,
    pub points: Vec<ChartPointRes>,
    pub max: Option<f64>,
}

impl From<ChartSeries> for ChartSeriesRes {
    fn from(series: ChartSeries) -> Self {
        let chart = match series.kind {
            catalogue::ChartKind::Line => "line",
            catalogue::ChartKind::Bar => "bar",
            catalogue::ChartKind::Doughnut => "doughnut",
        };
        Self {
            id: series.id,
            title: series.title,
            chart: chart.to_string(),
            points: series
                .points
                .into_iter()
                .map(|p| ChartPointRes {
                    label: p.label,
                    value: p.value,
                })
                .collect(),
            max: series.max,
        }
    }
}

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AnalyticsRes {
    pub series: Vec<ChartSeriesRes>,
}

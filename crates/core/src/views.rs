//! Declarative views.
//!
//! Each builder turns a data snapshot (catalogue plus session) into a plain value that a
//! surface can print or serialise. Builders never mutate anything; re-rendering means
//! calling them again.

use crate::chat::ChatMessage;
use crate::constants::CHECKLIST_SIZE;
use crate::matcher::ScoredCondition;
use crate::session::{Module, Profile, Session, Theme};
use crate::treatment::TreatmentPlanView;
use catalogue::{Appointment, Catalogue, ChartSeries, Medication};
use serde::Serialize;

/// The rendered content of one module.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(tag = "module", rename_all = "snake_case")]
pub enum View {
    Dashboard(DashboardView),
    Chat(ChatView),
    Prediction(PredictionView),
    Treatment(TreatmentView),
    Analytics(AnalyticsView),
    Profile(ProfileView),
    Appointments(AppointmentsView),
    Medications(MedicationsView),
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct DashboardView {
    pub daily_tip: String,
    pub next_appointment: Option<AppointmentItem>,
    pub medication_count: usize,
    pub theme: Theme,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChatView {
    pub messages: Vec<ChatMessage>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ChecklistItem {
    /// Stable element id, `symptom-<index>`.
    pub id: String,
    /// Value submitted when checked.
    pub value: String,
    pub label: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct PredictionView {
    pub checklist: Vec<ChecklistItem>,
    pub pending: bool,
    /// `None` until the first analysis completes.
    pub outcome: Option<PredictionOutcome>,
}

/// What the result area shows after an analysis.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PredictionOutcome {
    Matches {
        disclaimer: String,
        results: Vec<ResultCard>,
        recommendations: Vec<String>,
    },
    NoMatch {
        message: String,
        suggestions: Vec<String>,
    },
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ResultCard {
    pub name: String,
    pub score: usize,
    pub adjusted_confidence: u8,
    /// For example `51% match`.
    pub confidence_label: String,
    pub description: String,
    pub recommended_actions: String,
    pub severity: String,
    pub matched_symptoms: Vec<String>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct TreatmentView {
    /// Condition names offered for selection.
    pub conditions: Vec<String>,
    pub plan: Option<TreatmentPlanView>,
}

#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct AnalyticsView {
    pub series: Vec<ChartSeries>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct ProfileView {
    pub profile: Profile,
    pub theme: Theme,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppointmentItem {
    pub kind: String,
    pub provider: String,
    pub date: String,
    pub time: String,
    pub status: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct AppointmentsView {
    pub items: Vec<AppointmentItem>,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MedicationItem {
    pub name: String,
    pub dosage: String,
    pub frequency: String,
    pub times: String,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct MedicationsView {
    pub items: Vec<MedicationItem>,
}

const UPCOMING: &str = "Upcoming";

/// Render the session's current module.
pub fn render(session: &Session, catalogue: &Catalogue) -> View {
    match session.module() {
        Module::Dashboard => View::Dashboard(dashboard(
            catalogue,
            session.daily_tip(),
            session.theme(),
        )),
        Module::Chat => View::Chat(ChatView {
            messages: session.transcript().messages().to_vec(),
        }),
        Module::Prediction => View::Prediction(PredictionView {
            checklist: checklist(catalogue),
            pending: session.is_analysis_pending(),
            outcome: session.prediction().map(|r| prediction_outcome(r, catalogue)),
        }),
        Module::Treatment => View::Treatment(TreatmentView {
            conditions: condition_names(catalogue),
            plan: session.treatment().cloned(),
        }),
        Module::Analytics => View::Analytics(analytics(catalogue)),
        Module::Profile => View::Profile(ProfileView {
            profile: session.profile().clone(),
            theme: session.theme(),
        }),
        Module::Appointments => View::Appointments(appointments(catalogue)),
        Module::Medications => View::Medications(medications(catalogue)),
    }
}

pub fn dashboard(catalogue: &Catalogue, daily_tip: &str, theme: Theme) -> DashboardView {
    let next_appointment = catalogue
        .appointments()
        .iter()
        .min_by_key(|a| (a.date, a.time))
        .map(appointment_item);

    DashboardView {
        daily_tip: daily_tip.to_string(),
        next_appointment,
        medication_count: catalogue.medications().len(),
        theme,
    }
}

/// The symptom checklist: the first vocabulary labels, capitalised for display.
pub fn checklist(catalogue: &Catalogue) -> Vec<ChecklistItem> {
    catalogue
        .vocabulary()
        .iter()
        .take(CHECKLIST_SIZE)
        .enumerate()
        .map(|(index, symptom)| ChecklistItem {
            id: format!("symptom-{index}"),
            value: symptom.to_string(),
            label: symptom.display_label(),
        })
        .collect()
}

/// Turn ranked results into what the result area shows.
pub fn prediction_outcome(results: &[ScoredCondition], catalogue: &Catalogue) -> PredictionOutcome {
    let guidance = catalogue.guidance();

    if results.is_empty() {
        return PredictionOutcome::NoMatch {
            message: guidance.no_match.message.clone(),
            suggestions: guidance.no_match.suggestions.clone(),
        };
    }

    PredictionOutcome::Matches {
        disclaimer: guidance.disclaimer.clone(),
        results: results.iter().map(result_card).collect(),
        recommendations: guidance.general_recommendations.clone(),
    }
}

pub fn condition_names(catalogue: &Catalogue) -> Vec<String> {
    catalogue
        .conditions()
        .iter()
        .map(|c| c.name.to_string())
        .collect()
}

pub fn analytics(catalogue: &Catalogue) -> AnalyticsView {
    AnalyticsView {
        series: catalogue.analytics().to_vec(),
    }
}

pub fn appointments(catalogue: &Catalogue) -> AppointmentsView {
    AppointmentsView {
        items: catalogue.appointments().iter().map(appointment_item).collect(),
    }
}

pub fn medications(catalogue: &Catalogue) -> MedicationsView {
    MedicationsView {
        items: catalogue.medications().iter().map(medication_item).collect(),
    }
}

fn result_card(scored: &ScoredCondition) -> ResultCard {
    ResultCard {
        name: scored.condition.name.to_string(),
        score: scored.score,
        adjusted_confidence: scored.adjusted_confidence,
        confidence_label: format!("{}% match", scored.adjusted_confidence),
        description: scored.condition.description.clone(),
        recommended_actions: scored.condition.treatment.clone(),
        severity: scored.condition.severity.clone(),
        matched_symptoms: scored
            .matched_symptoms
            .iter()
            .map(|s| s.to_string())
            .collect(),
    }
}

fn appointment_item(appointment: &Appointment) -> AppointmentItem {
    AppointmentItem {
        kind: appointment.kind.clone(),
        provider: appointment.provider.clone(),
        date: appointment.date.format("%Y-%m-%d").to_string(),
        time: appointment.time_label(),
        status: UPCOMING.to_string(),
    }
}

fn medication_item(medication: &Medication) -> MedicationItem {
    MedicationItem {
        name: medication.name.clone(),
        dosage: medication.dosage.clone(),
        frequency: medication.frequency.clone(),
        times: medication.times_label(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::detection::DetectionMode;
    use crate::matcher::{analyse, AnalysisRequest};

    fn catalogue() -> Catalogue {
        Catalogue::embedded().unwrap()
    }

    #[test]
    fn checklist_offers_first_sixteen_labels() {
        let items = checklist(&catalogue());
        assert_eq!(items.len(), CHECKLIST_SIZE);
        assert_eq!(items[0].id, "symptom-0");
        assert_eq!(items[0].value, "fever");
        assert_eq!(items[3].label, "Runny nose");
        assert_eq!(items[15].value, "stomach cramps");
    }

    #[test]
    fn matches_render_cards_with_disclaimer() {
        let catalogue = catalogue();
        let request = AnalysisRequest::new("", vec!["runny nose".into(), "sneezing".into()]);
        let results = analyse(&request, &catalogue, DetectionMode::Substring).unwrap();

        match prediction_outcome(&results, &catalogue) {
            PredictionOutcome::Matches {
                disclaimer,
                results,
                recommendations,
            } => {
                assert!(disclaimer.starts_with("Medical Disclaimer"));
                assert_eq!(results[0].name, "Common Cold");
                assert_eq!(results[0].confidence_label, "34% match");
                assert_eq!(results[0].matched_symptoms, vec!["runny nose", "sneezing"]);
                assert_eq!(recommendations.len(), 4);
            }
            other => panic!("expected matches, got {other:?}"),
        }
    }

    #[test]
    fn empty_results_render_fallback() {
        match prediction_outcome(&[], &catalogue()) {
            PredictionOutcome::NoMatch { message, suggestions } => {
                assert!(message.starts_with("No strong matches"));
                assert_eq!(suggestions.len(), 3);
            }
            other => panic!("expected no match, got {other:?}"),
        }
    }

    #[test]
    fn dashboard_shows_earliest_appointment() {
        let view = dashboard(&catalogue(), "Drink water", Theme::Dark);
        let next = view.next_appointment.expect("appointment");
        assert_eq!(next.provider, "Dr. Smith");
        assert_eq!(next.time, "10:00 AM");
        assert_eq!(view.medication_count, 3);
        assert_eq!(view.theme, Theme::Dark);
    }

    #[test]
    fn render_follows_session_module() {
        let catalogue = catalogue();
        let mut session = Session::new("tip");

        assert!(matches!(render(&session, &catalogue), View::Dashboard(_)));

        session.switch_module(Module::Prediction);
        match render(&session, &catalogue) {
            View::Prediction(view) => {
                assert!(view.outcome.is_none());
                assert!(!view.pending);
            }
            other => panic!("expected prediction view, got {other:?}"),
        }

        session.switch_module(Module::Medications);
        match render(&session, &catalogue) {
            View::Medications(view) => assert_eq!(view.items[2].times, "8:00 AM, 8:00 PM"),
            other => panic!("expected medications view, got {other:?}"),
        }
    }

    #[test]
    fn views_serialise_with_module_tag() {
        let view = View::Appointments(appointments(&catalogue()));
        let json = serde_json::to_value(&view).unwrap();
        assert_eq!(json["module"], "appointments");
        assert_eq!(json["items"][1]["time"], "2:30 PM");
        assert_eq!(json["items"][1]["status"], "Upcoming");
    }
}

//! Plain-text rendering of core views for the terminal.

use catalogue::{ChartKind, ChartSeries, Condition};
use healthai_core::chat::{ChatMessage, ChatReply, Sender};
use healthai_core::treatment::TreatmentPlanView;
use healthai_core::views::{
    AnalyticsView, AppointmentsView, ChecklistItem, DashboardView, MedicationsView,
    PredictionOutcome, PredictionView, ProfileView, TreatmentView, View,
};

const BAR_WIDTH: usize = 30;

pub fn view(view: &View) -> String {
    match view {
        View::Dashboard(v) => dashboard(v),
        View::Chat(v) => transcript(&v.messages),
        View::Prediction(v) => prediction(v),
        View::Treatment(v) => treatment_view(v),
        View::Analytics(v) => analytics(v),
        View::Profile(v) => profile(v),
        View::Appointments(v) => appointments(v),
        View::Medications(v) => medications(v),
    }
}

pub fn dashboard(view: &DashboardView) -> String {
    let mut lines = vec![
        "Dashboard".to_string(),
        format!("  Daily tip: {}", view.daily_tip),
    ];
    match &view.next_appointment {
        Some(a) => lines.push(format!(
            "  Next appointment: {} with {} on {} at {}",
            a.kind, a.provider, a.date, a.time
        )),
        None => lines.push("  Next appointment: none".to_string()),
    }
    lines.push(format!("  Medications: {}", view.medication_count));
    lines.push(format!("  Theme: {}", view.theme.as_str()));
    lines.join("\n")
}

pub fn checklist(items: &[ChecklistItem]) -> String {
    items
        .iter()
        .map(|i| format!("  [ ] {}", i.label))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn conditions(conditions: &[Condition]) -> String {
    conditions
        .iter()
        .map(|c| format!("  {} ({})", c.name, c.severity))
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn prediction(view: &PredictionView) -> String {
    let mut lines = vec!["Disease prediction".to_string(), checklist(&view.checklist)];
    if view.pending {
        lines.push("Analysing symptoms...".to_string());
    }
    if let Some(outcome) = &view.outcome {
        lines.push(prediction_outcome(outcome));
    }
    lines.join("\n")
}

pub fn prediction_outcome(outcome: &PredictionOutcome) -> String {
    match outcome {
        PredictionOutcome::Matches {
            disclaimer,
            results,
            recommendations,
        } => {
            let mut lines = vec![disclaimer.clone(), String::new()];
            for card in results {
                lines.push(format!("{} - {}", card.name, card.confidence_label));
                lines.push(format!("  {}", card.description));
                lines.push(format!("  Recommended actions: {}", card.recommended_actions));
                lines.push(format!(
                    "  Matching symptoms: {}",
                    card.matched_symptoms.join(", ")
                ));
                lines.push(String::new());
            }
            lines.push("General recommendations:".to_string());
            lines.extend(recommendations.iter().map(|r| format!("  - {r}")));
            lines.join("\n")
        }
        PredictionOutcome::NoMatch {
            message,
            suggestions,
        } => {
            let mut lines = vec![message.clone()];
            lines.extend(suggestions.iter().map(|s| format!("  - {s}")));
            lines.join("\n")
        }
    }
}

pub fn chat_reply(reply: &ChatReply) -> String {
    format!("Assistant: {}", reply.text)
}

pub fn transcript(messages: &[ChatMessage]) -> String {
    if messages.is_empty() {
        return "No messages yet.".to_string();
    }
    messages
        .iter()
        .map(|m| {
            let who = match m.sender {
                Sender::User => "You",
                Sender::Assistant => "Assistant",
            };
            format!("[{}] {}: {}", m.time_label(), who, m.text)
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn treatment(view: &TreatmentPlanView) -> String {
    let mut lines = vec![format!("Treatment plan for {}", view.condition)];
    let sections = [
        ("Medications", &view.plan.medications),
        ("Home remedies", &view.plan.home_remedies),
        ("Lifestyle", &view.plan.lifestyle),
    ];
    for (title, items) in sections {
        lines.push(format!("{title}:"));
        lines.extend(items.iter().map(|i| format!("  - {i}")));
    }
    lines.push("Important reminders:".to_string());
    lines.extend(view.reminders.iter().map(|r| format!("  - {r}")));
    lines.join("\n")
}

fn treatment_view(view: &TreatmentView) -> String {
    match &view.plan {
        Some(plan) => treatment(plan),
        None => format!("Select a condition: {}", view.conditions.join(", ")),
    }
}

pub fn analytics(view: &AnalyticsView) -> String {
    view.series
        .iter()
        .map(chart)
        .collect::<Vec<_>>()
        .join("\n\n")
}

fn chart(series: &ChartSeries) -> String {
    let width = series
        .points
        .iter()
        .map(|p| p.label.len())
        .max()
        .unwrap_or(0);
    let mut lines = vec![series.title.clone()];

    match series.kind {
        ChartKind::Doughnut => {
            let total = series.total();
            for p in &series.points {
                let share = if total > 0.0 { p.value / total * 100.0 } else { 0.0 };
                lines.push(format!("  {:<width$}  {:>5.1}%", p.label, share));
            }
        }
        ChartKind::Line | ChartKind::Bar => {
            let max = series.axis_max();
            for p in &series.points {
                let filled = if max > 0.0 {
                    ((p.value / max) * BAR_WIDTH as f64).round() as usize
                } else {
                    0
                };
                lines.push(format!(
                    "  {:<width$}  {:<bar$}  {}",
                    p.label,
                    "#".repeat(filled.min(BAR_WIDTH)),
                    p.value,
                    bar = BAR_WIDTH
                ));
            }
        }
    }
    lines.join("\n")
}

pub fn profile(view: &ProfileView) -> String {
    let show = |v: &Option<String>| v.clone().unwrap_or_else(|| "not set".to_string());
    [
        "Profile".to_string(),
        format!("  Age: {}", show(&view.profile.age)),
        format!("  Gender: {}", show(&view.profile.gender)),
        format!("  Theme: {}", view.theme.as_str()),
    ]
    .join("\n")
}

pub fn appointments(view: &AppointmentsView) -> String {
    view.items
        .iter()
        .map(|a| {
            format!(
                "  {} | {} | {} {} | {}",
                a.kind, a.provider, a.date, a.time, a.status
            )
        })
        .collect::<Vec<_>>()
        .join("\n")
}

pub fn medications(view: &MedicationsView) -> String {
    view.items
        .iter()
        .map(|m| format!("  {} {} | {} | {}", m.name, m.dosage, m.frequency, m.times))
        .collect::<Vec<_>>()
        .join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;
    use healthai_core::views;
    use healthai_core::{analyse, plan_for, AnalysisRequest, Catalogue, DetectionMode, Theme};

    fn catalogue() -> Catalogue {
        Catalogue::embedded().unwrap()
    }

    #[test]
    fn prediction_lists_cards_and_recommendations() {
        let catalogue = catalogue();
        let request = AnalysisRequest::new("", vec!["runny nose".into(), "sneezing".into()]);
        let results = analyse(&request, &catalogue, DetectionMode::Substring).unwrap();
        let text = prediction_outcome(&views::prediction_outcome(&results, &catalogue));

        assert!(text.contains("Common Cold - 34% match"));
        assert!(text.contains("Matching symptoms: runny nose, sneezing"));
        assert!(text.contains("General recommendations:"));
    }

    #[test]
    fn no_match_shows_suggestions() {
        let text = prediction_outcome(&views::prediction_outcome(&[], &catalogue()));
        assert!(text.starts_with("No strong matches"));
        assert_eq!(text.lines().filter(|l| l.starts_with("  - ")).count(), 3);
    }

    #[test]
    fn treatment_has_three_sections_and_reminders() {
        let plan = plan_for("Common Cold", &catalogue()).unwrap();
        let text = treatment(&plan);
        assert!(text.starts_with("Treatment plan for Common Cold"));
        for heading in ["Medications:", "Home remedies:", "Lifestyle:", "Important reminders:"] {
            assert!(text.contains(heading), "missing {heading}");
        }
    }

    #[test]
    fn doughnut_shows_shares() {
        let text = analytics(&views::analytics(&catalogue()));
        assert!(text.contains("Condition Distribution"));
        assert!(text.contains(" 35.0%"));
    }

    #[test]
    fn dashboard_mentions_next_appointment() {
        let text = dashboard(&views::dashboard(&catalogue(), "Walk daily", Theme::Light));
        assert!(text.contains("Daily tip: Walk daily"));
        assert!(text.contains("Annual Check-up with Dr. Smith on 2025-09-20 at 10:00 AM"));
    }
}

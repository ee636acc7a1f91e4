//! Per-user view state.
//!
//! A [`Session`] holds everything that changes while someone uses the application: the
//! active module, the theme, the chat transcript, the last analysis and treatment plan.
//! View builders in [`crate::views`] read it; nothing else holds UI state.
//!
//! Analyses may complete out of order once a surface adds real latency. Each analysis takes
//! an [`AnalysisTicket`] and only the most recent ticket may update the prediction panel.

use crate::chat::{ChatReply, ChatTranscript, Sender};
use crate::matcher::{AnalysisRequest, ScoredCondition};
use crate::treatment::TreatmentPlanView;
use crate::{HealthError, HealthResult};
use catalogue::Catalogue;
use chrono::{DateTime, Local};
use rand::seq::SliceRandom;
use rand::Rng;
use serde::Serialize;
use std::str::FromStr;

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Module {
    #[default]
    Dashboard,
    Chat,
    Prediction,
    Treatment,
    Analytics,
    Profile,
    Appointments,
    Medications,
}

impl Module {
    pub const ALL: [Module; 8] = [
        Module::Dashboard,
        Module::Chat,
        Module::Prediction,
        Module::Treatment,
        Module::Analytics,
        Module::Profile,
        Module::Appointments,
        Module::Medications,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Module::Dashboard => "dashboard",
            Module::Chat => "chat",
            Module::Prediction => "prediction",
            Module::Treatment => "treatment",
            Module::Analytics => "analytics",
            Module::Profile => "profile",
            Module::Appointments => "appointments",
            Module::Medications => "medications",
        }
    }

    /// All module names, comma separated.
    pub fn names() -> String {
        Module::ALL
            .iter()
            .map(|m| m.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl std::fmt::Display for Module {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Module {
    type Err = HealthError;

    fn from_str(s: &str) -> HealthResult<Self> {
        let wanted = s.trim().to_ascii_lowercase();
        Module::ALL
            .into_iter()
            .find(|m| m.as_str() == wanted)
            .ok_or_else(|| HealthError::UnknownModule(s.trim().to_string()))
    }
}

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

impl Theme {
    pub fn as_str(self) -> &'static str {
        match self {
            Theme::Light => "light",
            Theme::Dark => "dark",
        }
    }

    pub fn toggled(self) -> Theme {
        match self {
            Theme::Light => Theme::Dark,
            Theme::Dark => Theme::Light,
        }
    }
}

/// Demographic fields last supplied with an analysis. Never used for scoring.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct Profile {
    pub age: Option<String>,
    pub gender: Option<String>,
}

/// Identifies one analysis. Only the latest ticket may publish results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct AnalysisTicket(u64);

#[derive(Clone, Debug, Default)]
pub struct Session {
    module: Module,
    theme: Theme,
    daily_tip: String,
    profile: Profile,
    transcript: ChatTranscript,
    prediction: Option<Vec<ScoredCondition>>,
    analysis_generation: u64,
    analysis_pending: bool,
    treatment: Option<TreatmentPlanView>,
    analytics_loaded: bool,
}

impl Session {
    /// Start a session on the dashboard with the given daily tip.
    pub fn new(daily_tip: impl Into<String>) -> Self {
        Self {
            daily_tip: daily_tip.into(),
            ..Self::default()
        }
    }

    /// Start a session with a tip chosen at random from the catalogue.
    pub fn start<R: Rng + ?Sized>(catalogue: &Catalogue, rng: &mut R) -> Self {
        Self::new(pick_daily_tip(catalogue, rng))
    }

    pub fn module(&self) -> Module {
        self.module
    }

    pub fn theme(&self) -> Theme {
        self.theme
    }

    pub fn daily_tip(&self) -> &str {
        &self.daily_tip
    }

    pub fn profile(&self) -> &Profile {
        &self.profile
    }

    pub fn transcript(&self) -> &ChatTranscript {
        &self.transcript
    }

    /// Results of the latest completed analysis; `None` before the first one.
    pub fn prediction(&self) -> Option<&[ScoredCondition]> {
        self.prediction.as_deref()
    }

    pub fn is_analysis_pending(&self) -> bool {
        self.analysis_pending
    }

    pub fn treatment(&self) -> Option<&TreatmentPlanView> {
        self.treatment.as_ref()
    }

    /// Whether the analytics series have been loaded at least once.
    pub fn analytics_loaded(&self) -> bool {
        self.analytics_loaded
    }

    pub fn switch_module(&mut self, module: Module) {
        tracing::debug!("switching to module {}", module);
        self.module = module;
        if module == Module::Analytics {
            self.analytics_loaded = true;
        }
    }

    /// Switch by name, as typed by a user.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError::UnknownModule`] and leaves the session unchanged when the
    /// name does not match a module.
    pub fn switch_module_named(&mut self, name: &str) -> HealthResult<Module> {
        match name.parse::<Module>() {
            Ok(module) => {
                self.switch_module(module);
                Ok(module)
            }
            Err(e) => {
                tracing::error!("module {} not found", name.trim());
                Err(e)
            }
        }
    }

    pub fn toggle_theme(&mut self) -> Theme {
        self.theme = self.theme.toggled();
        tracing::debug!("theme switched to {:?}", self.theme);
        self.theme
    }

    /// Register a new analysis and return its ticket.
    ///
    /// Any analysis still in flight is superseded: its results will be discarded when it
    /// completes. The request's demographic fields replace the profile.
    pub fn begin_analysis(&mut self, request: &AnalysisRequest) -> AnalysisTicket {
        self.analysis_generation += 1;
        self.analysis_pending = true;
        self.profile = Profile {
            age: non_blank(request.age.as_deref()),
            gender: non_blank(request.gender.as_deref()),
        };
        AnalysisTicket(self.analysis_generation)
    }

    /// Publish results for `ticket`.
    ///
    /// Returns `false`, leaving the panel untouched, if a newer analysis has begun since.
    pub fn complete_analysis(
        &mut self,
        ticket: AnalysisTicket,
        results: Vec<ScoredCondition>,
    ) -> bool {
        if ticket.0 != self.analysis_generation {
            tracing::debug!(
                "discarding stale analysis {} (latest is {})",
                ticket.0,
                self.analysis_generation
            );
            return false;
        }
        self.prediction = Some(results);
        self.analysis_pending = false;
        true
    }

    pub fn set_treatment(&mut self, plan: TreatmentPlanView) {
        self.treatment = Some(plan);
    }

    pub fn record_user_message(&mut self, text: &str, at: DateTime<Local>) {
        self.transcript.push(Sender::User, text.trim(), at);
    }

    pub fn record_reply(&mut self, reply: &ChatReply, at: DateTime<Local>) {
        self.transcript.push(Sender::Assistant, reply.text.clone(), at);
    }
}

/// Choose one health tip at random.
pub fn pick_daily_tip<R: Rng + ?Sized>(catalogue: &Catalogue, rng: &mut R) -> String {
    catalogue
        .tips()
        .choose(rng)
        .map(|t| t.to_string())
        .unwrap_or_default()
}

fn non_blank(value: Option<&str>) -> Option<String> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .map(str::to_string)
}

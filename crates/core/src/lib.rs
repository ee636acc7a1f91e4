//! # HealthAI Core
//!
//! Core logic for the HealthAI assistant.
//!
//! This crate contains pure operations over the static catalogue:
//! - Symptom detection in free text and condition matching with confidence scoring
//! - The canned chat responder
//! - Treatment plan lookup with a generic fallback
//! - Per-user session state and the declarative views rendered from it
//!
//! **No surface concerns**: HTTP servers, terminal I/O and simulated latency belong in
//! `api-rest` and `cli`. Nothing here sleeps, persists or reaches the network.

pub mod chat;
pub mod config;
pub mod constants;
pub mod detection;
pub mod error;
pub mod matcher;
pub mod session;
pub mod treatment;
pub mod views;

pub use catalogue::{Catalogue, CatalogueError};
pub use chat::{respond, ChatMessage, ChatReply, ReplyKind, Sender};
pub use config::{CoreConfig, Delays};
pub use detection::DetectionMode;
pub use error::{HealthError, HealthResult};
pub use healthai_types::Symptom;
pub use matcher::{analyse, AnalysisRequest, ScoredCondition};
pub use session::{AnalysisTicket, Module, Profile, Session, Theme};
pub use treatment::{plan_for, TreatmentPlanView};
pub use views::View;

//! Constants used throughout the HealthAI core crate.
//!
//! Scoring policy, view sizes, default latencies and environment variable names live here
//! so binaries and tests agree on them.

/// Number of ranked conditions returned by an analysis.
pub const TOP_RESULTS: usize = 3;

/// Lowest adjusted confidence ever reported, in percent.
pub const MIN_ADJUSTED_CONFIDENCE: u8 = 30;

/// Highest adjusted confidence ever reported, in percent.
pub const MAX_ADJUSTED_CONFIDENCE: u8 = 95;

/// Multiplier applied to `base_confidence * match_ratio` before clamping.
pub const CONFIDENCE_BOOST: f64 = 1.2;

/// Number of vocabulary labels offered on the symptom checklist.
pub const CHECKLIST_SIZE: usize = 16;

/// Default simulated latency before analysis results are shown.
pub const DEFAULT_ANALYSIS_DELAY_MS: u64 = 2_000;

/// Default simulated latency before a treatment plan is shown.
pub const DEFAULT_TREATMENT_DELAY_MS: u64 = 1_500;

/// Default simulated latency before a chat reply is shown.
pub const DEFAULT_CHAT_DELAY_MS: u64 = 1_000;

/// Path to a catalogue YAML file replacing the embedded one.
pub const ENV_CATALOGUE: &str = "HEALTHAI_CATALOGUE";

/// Symptom detection mode: `substring` or `word`.
pub const ENV_DETECTION: &str = "HEALTHAI_DETECTION";

pub const ENV_ANALYSIS_DELAY_MS: &str = "HEALTHAI_ANALYSIS_DELAY_MS";
pub const ENV_TREATMENT_DELAY_MS: &str = "HEALTHAI_TREATMENT_DELAY_MS";
pub const ENV_CHAT_DELAY_MS: &str = "HEALTHAI_CHAT_DELAY_MS";

/// HTTP bind address for the REST surface.
pub const ENV_REST_ADDR: &str = "HEALTHAI_REST_ADDR";

pub const DEFAULT_REST_ADDR: &str = "0.0.0.0:3000";

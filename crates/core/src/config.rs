//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into core services. Core code never reads environment variables itself: binaries
//! hand a lookup function to [`CoreConfig::from_lookup`], which keeps request handling and
//! tests independent of process-wide state.

use crate::constants::{
    DEFAULT_ANALYSIS_DELAY_MS, DEFAULT_CHAT_DELAY_MS, DEFAULT_TREATMENT_DELAY_MS,
    ENV_ANALYSIS_DELAY_MS, ENV_CATALOGUE, ENV_CHAT_DELAY_MS, ENV_DETECTION,
    ENV_TREATMENT_DELAY_MS,
};
use crate::detection::DetectionMode;
use crate::{HealthError, HealthResult};
use catalogue::Catalogue;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// Simulated latencies applied by the presentation surfaces.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Delays {
    pub analysis: Duration,
    pub treatment: Duration,
    pub chat: Duration,
}

impl Default for Delays {
    fn default() -> Self {
        Self {
            analysis: Duration::from_millis(DEFAULT_ANALYSIS_DELAY_MS),
            treatment: Duration::from_millis(DEFAULT_TREATMENT_DELAY_MS),
            chat: Duration::from_millis(DEFAULT_CHAT_DELAY_MS),
        }
    }
}

impl Delays {
    pub fn none() -> Self {
        Self {
            analysis: Duration::ZERO,
            treatment: Duration::ZERO,
            chat: Duration::ZERO,
        }
    }
}

/// Core configuration resolved at startup.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct CoreConfig {
    detection: DetectionMode,
    delays: Delays,
    catalogue_path: Option<PathBuf>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError::InvalidInput`] if `catalogue_path` is given but is not a file.
    pub fn new(
        detection: DetectionMode,
        delays: Delays,
        catalogue_path: Option<PathBuf>,
    ) -> HealthResult<Self> {
        if let Some(path) = &catalogue_path {
            if !path.is_file() {
                return Err(HealthError::InvalidInput(format!(
                    "catalogue file does not exist: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            detection,
            delays,
            catalogue_path,
        })
    }

    /// Resolve configuration from `HEALTHAI_*` values supplied by `lookup`.
    ///
    /// Missing or blank values fall back to the defaults.
    pub fn from_lookup<F>(lookup: F) -> HealthResult<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let detection = detection_mode_from_env_value(lookup(ENV_DETECTION))?;
        let delays = Delays {
            analysis: delay_from_env_value(
                ENV_ANALYSIS_DELAY_MS,
                lookup(ENV_ANALYSIS_DELAY_MS),
                DEFAULT_ANALYSIS_DELAY_MS,
            )?,
            treatment: delay_from_env_value(
                ENV_TREATMENT_DELAY_MS,
                lookup(ENV_TREATMENT_DELAY_MS),
                DEFAULT_TREATMENT_DELAY_MS,
            )?,
            chat: delay_from_env_value(
                ENV_CHAT_DELAY_MS,
                lookup(ENV_CHAT_DELAY_MS),
                DEFAULT_CHAT_DELAY_MS,
            )?,
        };
        let catalogue_path = non_blank(lookup(ENV_CATALOGUE)).map(PathBuf::from);

        Self::new(detection, delays, catalogue_path)
    }

    pub fn detection(&self) -> DetectionMode {
        self.detection
    }

    pub fn delays(&self) -> Delays {
        self.delays
    }

    pub fn catalogue_path(&self) -> Option<&Path> {
        self.catalogue_path.as_deref()
    }

    /// Load the configured catalogue, or the embedded one when no file is configured.
    ///
    /// # Errors
    ///
    /// Returns [`HealthError::Catalogue`] if the file cannot be read or is invalid.
    pub fn load_catalogue(&self) -> HealthResult<Catalogue> {
        let catalogue = match &self.catalogue_path {
            Some(path) => Catalogue::load(path)?,
            None => Catalogue::embedded()?,
        };
        Ok(catalogue)
    }
}

impl Default for CoreConfig {
    fn default() -> Self {
        Self {
            detection: DetectionMode::default(),
            delays: Delays::default(),
            catalogue_path: None,
        }
    }
}

/// Parse the detection mode from an optional string value.
///
/// If `value` is `None` or empty/whitespace, returns the default (substring) mode.
pub fn detection_mode_from_env_value(value: Option<String>) -> HealthResult<DetectionMode> {
    non_blank(value)
        .map(|v| v.parse::<DetectionMode>())
        .transpose()
        .map(Option::unwrap_or_default)
}

/// Parse a delay in milliseconds from an optional string value.
pub fn delay_from_env_value(
    name: &str,
    value: Option<String>,
    default_ms: u64,
) -> HealthResult<Duration> {
    let millis = match non_blank(value) {
        Some(v) => v.parse::<u64>().map_err(|_| HealthError::InvalidSetting {
            name: name.to_string(),
            value: v,
        })?,
        None => default_ms,
    };
    Ok(Duration::from_millis(millis))
}

fn non_blank(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_nothing_is_set() {
        let cfg = CoreConfig::from_lookup(lookup_from(&[])).unwrap();
        assert_eq!(cfg, CoreConfig::default());
        assert_eq!(cfg.delays().analysis, Duration::from_millis(2_000));
        assert!(cfg.catalogue_path().is_none());
    }

    #[test]
    fn reads_detection_and_delays() {
        let cfg = CoreConfig::from_lookup(lookup_from(&[
            (ENV_DETECTION, "word"),
            (ENV_ANALYSIS_DELAY_MS, "0"),
            (ENV_CHAT_DELAY_MS, " 250 "),
        ]))
        .unwrap();
        assert_eq!(cfg.detection(), DetectionMode::Word);
        assert_eq!(cfg.delays().analysis, Duration::ZERO);
        assert_eq!(cfg.delays().chat, Duration::from_millis(250));
        assert_eq!(cfg.delays().treatment, Duration::from_millis(1_500));
    }

    #[test]
    fn rejects_non_numeric_delay() {
        let err = CoreConfig::from_lookup(lookup_from(&[(ENV_TREATMENT_DELAY_MS, "soon")]))
            .unwrap_err();
        assert!(err.to_string().contains(ENV_TREATMENT_DELAY_MS));
    }

    #[test]
    fn rejects_unknown_detection_mode() {
        let err = detection_mode_from_env_value(Some("fuzzy".into())).unwrap_err();
        assert!(matches!(err, HealthError::InvalidDetectionMode(_)));
        assert_eq!(
            detection_mode_from_env_value(Some("  ".into())).unwrap(),
            DetectionMode::Substring
        );
    }

    #[test]
    fn rejects_missing_catalogue_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("catalogue.yaml");
        let err = CoreConfig::new(DetectionMode::Substring, Delays::none(), Some(missing))
            .unwrap_err();
        assert!(err.to_string().contains("does not exist"));
    }

    #[test]
    fn loads_catalogue_from_configured_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.yaml");
        let yaml = catalogue::EMBEDDED_CATALOGUE.replace("confidence: 88", "confidence: 90");
        std::fs::write(&path, yaml).unwrap();

        let cfg = CoreConfig::new(DetectionMode::Substring, Delays::none(), Some(path)).unwrap();
        let catalogue = cfg.load_catalogue().unwrap();
        assert_eq!(catalogue.condition("Migraine").unwrap().base_confidence, 90);
    }

    #[test]
    fn invalid_catalogue_file_surfaces_catalogue_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("catalogue.yaml");
        std::fs::write(&path, "conditions: []\n").unwrap();

        let cfg = CoreConfig::new(DetectionMode::Substring, Delays::none(), Some(path)).unwrap();
        assert!(matches!(cfg.load_catalogue(), Err(HealthError::Catalogue(_))));
    }
}

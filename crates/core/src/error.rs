use crate::session::Module;

#[derive(Debug, thiserror::Error)]
pub enum HealthError {
    #[error("invalid input: {0}")]
    InvalidInput(String),
    #[error("Please describe your symptoms or select from the checklist.")]
    EmptySymptoms,
    #[error("Please select a condition.")]
    NoConditionSelected,
    #[error("chat message is empty")]
    EmptyMessage,
    #[error("unknown module '{0}' (expected one of: {modules})", modules = Module::names())]
    UnknownModule(String),
    #[error("invalid detection mode '{0}' (expected 'substring' or 'word')")]
    InvalidDetectionMode(String),
    #[error("invalid value for {name}: {value}")]
    InvalidSetting { name: String, value: String },

    #[error("catalogue error: {0}")]
    Catalogue(#[from] catalogue::CatalogueError),
}

impl HealthError {
    /// Whether the error is the caller's fault (bad or missing input) rather than a failure
    /// of the application.
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            HealthError::InvalidInput(_)
                | HealthError::EmptySymptoms
                | HealthError::NoConditionSelected
                | HealthError::EmptyMessage
                | HealthError::UnknownModule(_)
        )
    }
}

pub type HealthResult<T> = std::result::Result<T, HealthError>;

#[cfg(test)]
mod tests {
    use super::*;
    use catalogue::CatalogueError;

    #[test]
    fn caller_mistakes_are_validation_errors() {
        assert!(HealthError::EmptySymptoms.is_validation());
        assert!(HealthError::UnknownModule("billing".into()).is_validation());
        assert!(!HealthError::InvalidDetectionMode("fuzzy".into()).is_validation());
    }

    #[test]
    fn catalogue_failures_are_not_validation_errors() {
        let err: HealthError = CatalogueError::InvalidInput("tips.0: empty".into()).into();
        assert!(matches!(err, HealthError::Catalogue(_)));
        assert!(!err.is_validation());
        assert!(err.to_string().starts_with("catalogue error:"));
    }
}

use thiserror::Error;

/// Failures raised by the loading, reconciliation and filtering steps.
///
/// None of these escape the pipeline driver: each is recovered at the
/// boundary of the step that produced it and turned into a message.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum AnalysisError {
    #[error("failed to load {file}: {reason}")]
    Load { file: String, reason: String },

    #[error("no keyword ideas file supplied")]
    EmptyInput,

    #[error("invalid {side} pattern '{pattern}': {reason}")]
    InvalidPattern {
        side: PatternSide,
        pattern: String,
        reason: String,
    },

    #[error("keyword reconciliation failed: {0}")]
    Reconciliation(String),
}

/// Which half of an include/exclude pair a pattern came from.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PatternSide {
    Include,
    Exclude,
}

impl std::fmt::Display for PatternSide {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            PatternSide::Include => write!(f, "include"),
            PatternSide::Exclude => write!(f, "exclude"),
        }
    }
}

impl AnalysisError {
    pub fn load(file: &str, reason: impl Into<String>) -> Self {
        AnalysisError::Load {
            file: file.to_string(),
            reason: reason.into(),
        }
    }

    /// Warnings are shown to the user but do not indicate broken input.
    pub fn is_warning(&self) -> bool {
        matches!(self, AnalysisError::EmptyInput)
    }
}

pub type Result<T> = core::result::Result<T, AnalysisError>;

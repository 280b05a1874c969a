//! Unified error handling for digicalc core.
//!
//! Wraps domain, evaluator and application errors behind one type with
//! user-actionable suggestions.

use thiserror::Error;

use crate::application::ApplicationError;
use crate::domain::DomainError;
use crate::evaluator::EvaluationError;

/// Root error type for digicalc core operations.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum CalcError {
    /// The expression could not be evaluated.
    #[error("Evaluation error: {0}")]
    Evaluation(#[from] EvaluationError),

    /// Invalid keys or settings.
    #[error("Domain error: {0}")]
    Domain(#[from] DomainError),

    /// The display surface failed.
    #[error("Application error: {0}")]
    Application(#[from] ApplicationError),
}

impl CalcError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::Evaluation(e) => e.suggestions(),
            Self::Domain(e) => e.suggestions(),
            Self::Application(e) => e.suggestions(),
        }
    }

    /// Get error category for display/styling purposes.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::Evaluation(_) => ErrorCategory::Evaluation,
            Self::Domain(e) => match e.category() {
                crate::domain::ErrorCategory::Validation => ErrorCategory::Validation,
                crate::domain::ErrorCategory::Configuration => ErrorCategory::Configuration,
            },
            Self::Application(e) => e.category(),
        }
    }
}

/// Error categories for UI display.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Evaluation,
    Display,
    Configuration,
    Internal,
}

/// Convenient result type alias.
pub type CalcResult<T> = Result<T, CalcError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn categories_follow_the_source() {
        let err: CalcError = EvaluationError::DivisionByZero.into();
        assert_eq!(err.category(), ErrorCategory::Evaluation);

        let err: CalcError = DomainError::UnknownKey {
            token: "?".into(),
        }
        .into();
        assert_eq!(err.category(), ErrorCategory::Validation);

        let err: CalcError = ApplicationError::DisplayLockError.into();
        assert_eq!(err.category(), ErrorCategory::Internal);
    }
}

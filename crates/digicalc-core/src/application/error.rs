//! Application layer errors.
//!
//! These errors represent failures talking to the display surface, not
//! keypad logic. Illegal key presses are not errors at all, and evaluation
//! failures are `EvaluationError` from `crate::evaluator`.

use thiserror::Error;

use crate::error::ErrorCategory;

/// Errors that occur while driving a display surface.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ApplicationError {
    /// The surface could not render or read its text.
    #[error("Display surface failed: {reason}")]
    DisplayFailed { reason: String },

    /// Shared surface state was poisoned by a panicking writer.
    #[error("Display surface state is unavailable")]
    DisplayLockError,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::DisplayFailed { reason } => vec![
                format!("Rendering failed: {}", reason),
                "Check that the terminal is still attached".into(),
            ],
            Self::DisplayLockError => vec!["This appears to be a bug; please report it".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::DisplayFailed { .. } => ErrorCategory::Display,
            Self::DisplayLockError => ErrorCategory::Internal,
        }
    }
}

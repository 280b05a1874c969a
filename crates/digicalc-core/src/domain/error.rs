// ============================================================================
// domain/error.rs - KEYPAD DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// Raised only when *constructing* domain values (parsing a key token, a
/// digit, a setting name). Key presses themselves never fail: an illegal
/// press is a silent no-op of the state machine.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("unknown key '{token}'")]
    UnknownKey { token: String },

    #[error("digit out of range: {value}")]
    InvalidDigit { value: u8 },

    #[error("invalid value '{value}' for {setting}")]
    InvalidSetting {
        setting: &'static str,
        value: String,
    },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::UnknownKey { token } => vec![
                format!("'{}' is not a calculator key", token),
                "Keys: 0-9  .  +  -  x  /  ^  %  sin  cos  tan  C  DEL  =".into(),
                "Separate keys with spaces, e.g. `1 2 + 3 =`".into(),
            ],
            Self::InvalidDigit { value } => vec![format!("{} is not a single digit", value)],
            Self::InvalidSetting { setting, value } => match *setting {
                "erase behavior" => vec![
                    format!("'{}' is not an erase behavior", value),
                    "Use one of: resync, preserve".into(),
                ],
                "result format" => vec![
                    format!("'{}' is not a result format", value),
                    "Use one of: decimal, compact".into(),
                ],
                _ => vec!["See documentation for more details".into()],
            },
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::UnknownKey { .. } | Self::InvalidDigit { .. } => ErrorCategory::Validation,
            Self::InvalidSetting { .. } => ErrorCategory::Configuration,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
}

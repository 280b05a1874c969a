//! Evaluation errors.
//!
//! Every failure while tokenising, parsing or computing an expression is an
//! [`EvaluationError`]. The keypad shows them all the same way (the error
//! marker); the variants exist for logs and for the CLI.

use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum EvaluationError {
    // ========================================================================
    // Syntax
    // ========================================================================
    #[error("expression is empty")]
    EmptyExpression,

    #[error("malformed number '{text}' at position {offset}")]
    MalformedNumber { text: String, offset: usize },

    #[error("unknown operator '{symbol}' at position {offset}")]
    UnknownOperator { symbol: char, offset: usize },

    #[error("unknown function '{name}' at position {offset}")]
    UnknownFunction { name: String, offset: usize },

    #[error("unexpected '{found}' at position {offset}")]
    UnexpectedToken { found: String, offset: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("unbalanced parentheses")]
    UnbalancedParentheses,

    #[error("expression is nested too deeply (limit {limit})")]
    TooDeep { limit: usize },

    // ========================================================================
    // Arithmetic
    // ========================================================================
    #[error("division by zero")]
    DivisionByZero,

    #[error("operand for factorial has to be an integer, got {operand}")]
    NonIntegerFactorial { operand: f64 },

    #[error("operand for factorial can not be less than zero, got {operand}")]
    NegativeFactorial { operand: f64 },

    #[error("result is not a finite number")]
    NonFinite,
}

impl EvaluationError {
    /// `true` for malformed input, `false` for arithmetic failures.
    pub fn is_syntax(&self) -> bool {
        !matches!(
            self,
            Self::DivisionByZero
                | Self::NonIntegerFactorial { .. }
                | Self::NegativeFactorial { .. }
                | Self::NonFinite
        )
    }

    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::EmptyExpression => vec!["Type an expression first, e.g. 3+4*2".into()],
            Self::UnknownFunction { name, .. } => vec![
                format!("'{}' is not a known function", name),
                "Available functions: sin, cos, tan (radians)".into(),
            ],
            Self::UnknownOperator { symbol: '!', .. } => vec![
                "Factorial is only available on the factorial path".into(),
                "Use `eval --factorial on` or include `!` before evaluating".into(),
            ],
            Self::UnbalancedParentheses => vec!["Check that every '(' has a matching ')'".into()],
            Self::TooDeep { .. } => vec!["Split the expression into smaller steps".into()],
            Self::DivisionByZero => vec!["The divisor of '/' and '%' must not be zero".into()],
            Self::NonIntegerFactorial { .. } | Self::NegativeFactorial { .. } => {
                vec!["Factorial is defined for 0, 1, 2, ... only".into()]
            }
            Self::NonFinite => vec!["The result overflowed or is undefined".into()],
            _ => vec!["Check the expression syntax".into()],
        }
    }
}

//! Expression evaluator.
//!
//! Turns finalized buffer text into an `f64`:
//!
//! ```text
//! "3+4*2" ──tokenize──▶ [3, +, 4, *, 2] ──parse(table)──▶ Expr ──eval──▶ 11.0
//! ```
//!
//! The operator table is fixed when the evaluator is built. The keypad keeps
//! two evaluators around, one without and one with the factorial operator.

pub mod error;
pub mod lexer;
pub mod operators;
pub mod parser;

use tracing::{debug, instrument};

pub use error::EvaluationError;
pub use operators::{
    Associativity, Fixity, FunctionDef, OperatorDef, OperatorTable, factorial, precedence,
};
pub use parser::Expr;

/// Parses and evaluates expressions against one operator table.
#[derive(Debug, Clone)]
pub struct Evaluator {
    table: OperatorTable,
}

impl Evaluator {
    pub fn new(table: OperatorTable) -> Self {
        Self { table }
    }

    /// `+ - * / % ^`, signs, `sin cos tan`.
    pub fn standard() -> Self {
        Self::new(OperatorTable::standard())
    }

    /// The standard table plus postfix `!`.
    pub fn with_factorial() -> Self {
        Self::new(OperatorTable::standard().with_factorial())
    }

    pub fn table(&self) -> &OperatorTable {
        &self.table
    }

    /// Parse without evaluating.
    pub fn parse(&self, expression: &str) -> Result<Expr, EvaluationError> {
        let tokens = lexer::tokenize(expression)?;
        parser::parse(&tokens, &self.table)
    }

    /// Evaluate `expression`; a NaN or infinite result is an error.
    #[instrument(level = "debug", skip(self), fields(factorial = self.table.has_factorial()))]
    pub fn evaluate(&self, expression: &str) -> Result<f64, EvaluationError> {
        let value = self.parse(expression)?.eval()?;
        if !value.is_finite() {
            return Err(EvaluationError::NonFinite);
        }
        debug!(value, "expression evaluated");
        Ok(value)
    }
}

impl Default for Evaluator {
    fn default() -> Self {
        Self::standard()
    }
}

//! Declarative operator table.
//!
//! An [`OperatorTable`] lists every operator and function the parser may
//! use, each with its symbol, fixity, precedence, associativity and
//! evaluation function. Tables are assembled before an evaluator is built
//! and are never mutated afterwards; the factorial extension is simply a
//! second table (`OperatorTable::standard().with_factorial()`).
//!
//! # Precedence (low to high)
//!
//! | Level            | Operators        | Associativity |
//! |------------------|------------------|---------------|
//! | `ADDITION`       | `+` `-`          | left          |
//! | `MULTIPLICATION` | `*` `/` `%`      | left          |
//! | `POWER`          | `^`              | right         |
//! | `FACTORIAL`      | postfix `!`      | -             |
//! | `SIGN`           | prefix `-` `+`   | -             |

use std::fmt;

use super::error::EvaluationError;

pub type UnaryFn = fn(f64) -> Result<f64, EvaluationError>;
pub type BinaryFn = fn(f64, f64) -> Result<f64, EvaluationError>;

pub mod precedence {
    pub const ADDITION: u8 = 10;
    pub const MULTIPLICATION: u8 = 20;
    pub const POWER: u8 = 30;
    pub const FACTORIAL: u8 = POWER + 1;
    pub const SIGN: u8 = 40;
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Fixity {
    Prefix,
    Infix,
    Postfix,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Associativity {
    Left,
    Right,
}

#[derive(Clone, Copy)]
enum Apply {
    Unary(UnaryFn),
    Binary(BinaryFn),
}

/// One row of the operator table.
#[derive(Clone, Copy)]
pub struct OperatorDef {
    symbol: char,
    fixity: Fixity,
    precedence: u8,
    associativity: Associativity,
    apply: Apply,
}

impl OperatorDef {
    pub const fn infix(
        symbol: char,
        precedence: u8,
        associativity: Associativity,
        apply: BinaryFn,
    ) -> Self {
        Self {
            symbol,
            fixity: Fixity::Infix,
            precedence,
            associativity,
            apply: Apply::Binary(apply),
        }
    }

    pub const fn prefix(symbol: char, precedence: u8, apply: UnaryFn) -> Self {
        Self {
            symbol,
            fixity: Fixity::Prefix,
            precedence,
            associativity: Associativity::Right,
            apply: Apply::Unary(apply),
        }
    }

    pub const fn postfix(symbol: char, precedence: u8, apply: UnaryFn) -> Self {
        Self {
            symbol,
            fixity: Fixity::Postfix,
            precedence,
            associativity: Associativity::Left,
            apply: Apply::Unary(apply),
        }
    }

    pub fn symbol(&self) -> char {
        self.symbol
    }

    pub fn fixity(&self) -> Fixity {
        self.fixity
    }

    pub fn precedence(&self) -> u8 {
        self.precedence
    }

    pub fn associativity(&self) -> Associativity {
        self.associativity
    }

    /// Number of operands the operator takes.
    pub fn arity(&self) -> usize {
        match self.apply {
            Apply::Unary(_) => 1,
            Apply::Binary(_) => 2,
        }
    }

    pub(crate) fn apply_unary(&self, operand: f64) -> Result<f64, EvaluationError> {
        match self.apply {
            Apply::Unary(f) => f(operand),
            Apply::Binary(_) => Err(EvaluationError::UnexpectedToken {
                found: self.symbol.to_string(),
                offset: 0,
            }),
        }
    }

    pub(crate) fn apply_binary(&self, lhs: f64, rhs: f64) -> Result<f64, EvaluationError> {
        match self.apply {
            Apply::Binary(f) => f(lhs, rhs),
            Apply::Unary(_) => Err(EvaluationError::UnexpectedToken {
                found: self.symbol.to_string(),
                offset: 0,
            }),
        }
    }
}

impl fmt::Debug for OperatorDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OperatorDef")
            .field("symbol", &self.symbol)
            .field("fixity", &self.fixity)
            .field("precedence", &self.precedence)
            .field("associativity", &self.associativity)
            .finish_non_exhaustive()
    }
}

/// A named single-argument function such as `sin`.
#[derive(Clone, Copy)]
pub struct FunctionDef {
    name: &'static str,
    apply: UnaryFn,
}

impl FunctionDef {
    pub const fn new(name: &'static str, apply: UnaryFn) -> Self {
        Self { name, apply }
    }

    pub fn name(&self) -> &'static str {
        self.name
    }

    pub(crate) fn call(&self, arg: f64) -> Result<f64, EvaluationError> {
        (self.apply)(arg)
    }
}

impl fmt::Debug for FunctionDef {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FunctionDef")
            .field("name", &self.name)
            .finish_non_exhaustive()
    }
}

/// Operators and functions known to one evaluator.
#[derive(Debug, Clone, Default)]
pub struct OperatorTable {
    operators: Vec<OperatorDef>,
    functions: Vec<FunctionDef>,
}

impl OperatorTable {
    /// A table with nothing in it.
    pub fn empty() -> Self {
        Self::default()
    }

    /// Arithmetic, power, modulo, signs and the trigonometric functions.
    pub fn standard() -> Self {
        use precedence::*;

        Self::empty()
            .with_operator(OperatorDef::infix('+', ADDITION, Associativity::Left, add))
            .with_operator(OperatorDef::infix('-', ADDITION, Associativity::Left, subtract))
            .with_operator(OperatorDef::infix('*', MULTIPLICATION, Associativity::Left, multiply))
            .with_operator(OperatorDef::infix('/', MULTIPLICATION, Associativity::Left, divide))
            .with_operator(OperatorDef::infix('%', MULTIPLICATION, Associativity::Left, modulo))
            .with_operator(OperatorDef::infix('^', POWER, Associativity::Right, power))
            .with_operator(OperatorDef::prefix('-', SIGN, negate))
            .with_operator(OperatorDef::prefix('+', SIGN, Ok))
            .with_function(FunctionDef::new("sin", |x| Ok(x.sin())))
            .with_function(FunctionDef::new("cos", |x| Ok(x.cos())))
            .with_function(FunctionDef::new("tan", |x| Ok(x.tan())))
    }

    /// Register the postfix factorial operator `!`.
    pub fn with_factorial(self) -> Self {
        self.with_operator(OperatorDef::postfix(
            '!',
            precedence::FACTORIAL,
            factorial,
        ))
    }

    /// Add an operator; a later definition with the same symbol and fixity
    /// replaces the earlier one.
    pub fn with_operator(mut self, def: OperatorDef) -> Self {
        self.operators
            .retain(|op| !(op.symbol == def.symbol && op.fixity == def.fixity));
        self.operators.push(def);
        self
    }

    pub fn with_function(mut self, def: FunctionDef) -> Self {
        self.functions.retain(|f| f.name != def.name);
        self.functions.push(def);
        self
    }

    pub fn lookup(&self, symbol: char, fixity: Fixity) -> Option<&OperatorDef> {
        self.operators
            .iter()
            .find(|op| op.symbol == symbol && op.fixity == fixity)
    }

    pub fn function(&self, name: &str) -> Option<&FunctionDef> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn operators(&self) -> &[OperatorDef] {
        &self.operators
    }

    pub fn functions(&self) -> &[FunctionDef] {
        &self.functions
    }

    pub fn has_factorial(&self) -> bool {
        self.lookup('!', Fixity::Postfix).is_some()
    }
}

// ── evaluation functions ──────────────────────────────────────────────────────

fn add(a: f64, b: f64) -> Result<f64, EvaluationError> {
    Ok(a + b)
}

fn subtract(a: f64, b: f64) -> Result<f64, EvaluationError> {
    Ok(a - b)
}

fn multiply(a: f64, b: f64) -> Result<f64, EvaluationError> {
    Ok(a * b)
}

fn divide(a: f64, b: f64) -> Result<f64, EvaluationError> {
    if b == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    Ok(a / b)
}

/// Remainder with the sign of the dividend.
fn modulo(a: f64, b: f64) -> Result<f64, EvaluationError> {
    if b == 0.0 {
        return Err(EvaluationError::DivisionByZero);
    }
    Ok(a % b)
}

fn power(a: f64, b: f64) -> Result<f64, EvaluationError> {
    Ok(a.powf(b))
}

fn negate(a: f64) -> Result<f64, EvaluationError> {
    Ok(-a)
}

/// `n!` for a non-negative integral `n`, as an f64 product of `1..=n`.
pub fn factorial(operand: f64) -> Result<f64, EvaluationError> {
    let n = operand as i64;
    if n as f64 != operand {
        return Err(EvaluationError::NonIntegerFactorial { operand });
    }
    if n < 0 {
        return Err(EvaluationError::NegativeFactorial { operand });
    }

    let mut result = 1.0_f64;
    for i in 1..=n {
        result *= i as f64;
        // past 170! the product is infinite; no need to keep multiplying
        if result.is_infinite() {
            break;
        }
    }
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_table_has_no_factorial() {
        let table = OperatorTable::standard();
        assert!(!table.has_factorial());
        assert!(table.with_factorial().has_factorial());
    }

    #[test]
    fn minus_is_both_prefix_and_infix() {
        let table = OperatorTable::standard();
        let infix = table.lookup('-', Fixity::Infix).unwrap();
        let prefix = table.lookup('-', Fixity::Prefix).unwrap();
        assert_eq!(infix.arity(), 2);
        assert_eq!(prefix.arity(), 1);
        assert!(prefix.precedence() > infix.precedence());
    }

    #[test]
    fn precedence_order() {
        let table = OperatorTable::standard().with_factorial();
        let prec = |c, fx| table.lookup(c, fx).unwrap().precedence();
        assert!(prec('+', Fixity::Infix) < prec('*', Fixity::Infix));
        assert_eq!(prec('*', Fixity::Infix), prec('%', Fixity::Infix));
        assert!(prec('*', Fixity::Infix) < prec('^', Fixity::Infix));
        assert!(prec('^', Fixity::Infix) < prec('!', Fixity::Postfix));
        assert_eq!(
            table.lookup('^', Fixity::Infix).unwrap().associativity(),
            Associativity::Right
        );
    }

    #[test]
    fn redefining_replaces_previous_entry() {
        let table = OperatorTable::standard()
            .with_operator(OperatorDef::infix('+', 99, Associativity::Left, |a, b| Ok(a * b)));
        let plus = table.lookup('+', Fixity::Infix).unwrap();
        assert_eq!(plus.precedence(), 99);
        assert_eq!(plus.apply_binary(3.0, 4.0).unwrap(), 12.0);
        assert_eq!(
            table
                .operators()
                .iter()
                .filter(|op| op.symbol() == '+' && op.fixity() == Fixity::Infix)
                .count(),
            1
        );
    }

    #[test]
    fn factorial_values() {
        assert_eq!(factorial(0.0).unwrap(), 1.0);
        assert_eq!(factorial(1.0).unwrap(), 1.0);
        assert_eq!(factorial(5.0).unwrap(), 120.0);
        assert_eq!(factorial(10.0).unwrap(), 3_628_800.0);
        assert!(factorial(171.0).unwrap().is_infinite());
    }

    #[test]
    fn factorial_rejects_bad_operands() {
        assert_eq!(
            factorial(-1.0).unwrap_err(),
            EvaluationError::NegativeFactorial { operand: -1.0 }
        );
        assert_eq!(
            factorial(2.5).unwrap_err(),
            EvaluationError::NonIntegerFactorial { operand: 2.5 }
        );
        assert!(factorial(f64::NAN).is_err());
        assert!(factorial(f64::INFINITY).is_err());
    }

    #[test]
    fn division_and_modulo_by_zero_fail() {
        assert_eq!(divide(5.0, 0.0), Err(EvaluationError::DivisionByZero));
        assert_eq!(modulo(5.0, 0.0), Err(EvaluationError::DivisionByZero));
        assert_eq!(modulo(-7.0, 3.0).unwrap(), -1.0);
    }
}

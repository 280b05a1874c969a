//! Domain value objects: Digit, Operator, Key.
//!
//! # Design
//!
//! These are pure value types — `Copy`, equality-by-value, no identity.
//! They hold NO transition logic; that lives in `machine.rs`. This file's
//! only job is to define the keys, the text they put in the buffer, and their
//! `FromStr` parsers (used by key scripts and key maps).

use crate::domain::error::DomainError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

// ── Digit ────────────────────────────────────────────────────────────────────

/// A single decimal digit, `0..=9`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(try_from = "u8", into = "u8")]
pub struct Digit(u8);

impl Digit {
    pub fn new(value: u8) -> Result<Self, DomainError> {
        if value <= 9 {
            Ok(Self(value))
        } else {
            Err(DomainError::InvalidDigit { value })
        }
    }

    pub const fn value(self) -> u8 {
        self.0
    }

    pub const fn as_char(self) -> char {
        (b'0' + self.0) as char
    }
}

impl TryFrom<u8> for Digit {
    type Error = DomainError;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

impl From<Digit> for u8 {
    fn from(digit: Digit) -> Self {
        digit.0
    }
}

impl fmt::Display for Digit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_char())
    }
}

// ── Operator ─────────────────────────────────────────────────────────────────

/// An operator key on the keypad.
///
/// `as_str` is the text appended to the buffer, which is also what the
/// evaluator understands. `label` is the glyph printed on the key.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Operator {
    Add,
    Subtract,
    Multiply,
    Divide,
    Sin,
    Cos,
    Tan,
    Power,
    Modulo,
}

impl Operator {
    pub const ALL: [Operator; 9] = [
        Self::Add,
        Self::Subtract,
        Self::Multiply,
        Self::Divide,
        Self::Sin,
        Self::Cos,
        Self::Tan,
        Self::Power,
        Self::Modulo,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "-",
            Self::Multiply => "*",
            Self::Divide => "/",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Power => "^",
            Self::Modulo => "%",
        }
    }

    pub const fn label(&self) -> &'static str {
        match self {
            Self::Add => "+",
            Self::Subtract => "\u{2212}",
            Self::Multiply => "\u{00d7}",
            Self::Divide => "\u{00f7}",
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Power => "^",
            Self::Modulo => "%",
        }
    }
}

impl fmt::Display for Operator {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

impl FromStr for Operator {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "+" | "plus" | "add" => Ok(Self::Add),
            "-" | "\u{2212}" | "minus" | "sub" => Ok(Self::Subtract),
            "*" | "x" | "\u{00d7}" | "times" | "mul" => Ok(Self::Multiply),
            "/" | "\u{00f7}" | "div" => Ok(Self::Divide),
            "sin" => Ok(Self::Sin),
            "cos" => Ok(Self::Cos),
            "tan" => Ok(Self::Tan),
            "^" | "pow" => Ok(Self::Power),
            "%" | "mod" => Ok(Self::Modulo),
            _ => Err(DomainError::UnknownKey {
                token: s.to_owned(),
            }),
        }
    }
}

// ── Key ──────────────────────────────────────────────────────────────────────

/// A key press delivered by the display surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(tag = "key", content = "value", rename_all = "lowercase")]
pub enum Key {
    Digit(Digit),
    Operator(Operator),
    Dot,
    Clear,
    Erase,
    Evaluate,
}

impl Key {
    /// Shorthand for a digit key; fails for values above 9.
    pub fn digit(value: u8) -> Result<Self, DomainError> {
        Digit::new(value).map(Self::Digit)
    }

    /// Parse a whitespace-separated key script such as `"1 2 + 3 ="`.
    pub fn parse_script(script: &str) -> Result<Vec<Self>, DomainError> {
        script.split_whitespace().map(str::parse).collect()
    }
}

impl From<Operator> for Key {
    fn from(op: Operator) -> Self {
        Self::Operator(op)
    }
}

impl From<Digit> for Key {
    fn from(digit: Digit) -> Self {
        Self::Digit(digit)
    }
}

impl fmt::Display for Key {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Digit(d) => write!(f, "{d}"),
            Self::Operator(op) => write!(f, "{op}"),
            Self::Dot => f.write_str("."),
            Self::Clear => f.write_str("C"),
            Self::Erase => f.write_str("\u{232b}"),
            Self::Evaluate => f.write_str("="),
        }
    }
}

impl FromStr for Key {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let token = s.trim();
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            if let Some(value) = c.to_digit(10) {
                return Self::digit(value as u8);
            }
        }

        match token.to_lowercase().as_str() {
            "." | "dot" => Ok(Self::Dot),
            "c" | "ac" | "clear" => Ok(Self::Clear),
            "del" | "erase" | "back" | "\u{232b}" => Ok(Self::Erase),
            "=" | "eq" | "equals" | "eval" => Ok(Self::Evaluate),
            _ => token.parse::<Operator>().map(Self::Operator),
        }
    }
}

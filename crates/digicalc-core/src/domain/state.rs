//! Input state: the buffer plus the three validity flags.

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::domain::buffer::InputBuffer;

/// Keypad mode, derived from the flags of an [`InputState`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Mode {
    /// Nothing typed yet.
    Empty,
    /// The last token is a number (or closes an operand).
    EnteringNumber,
    /// The last token is an operator; an operand must follow.
    AwaitingOperand,
    /// The last evaluation failed; the next digit starts over.
    Error,
}

impl Mode {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Empty => "empty",
            Self::EnteringNumber => "entering-number",
            Self::AwaitingOperand => "awaiting-operand",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Buffer and validity flags of one calculator session.
///
/// `dot_used` is true only while the terminal numeric token contains a
/// decimal point. Every operator and every clear resets it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InputState {
    pub(crate) buffer: InputBuffer,
    pub(crate) last_was_numeric: bool,
    pub(crate) in_error: bool,
    pub(crate) dot_used: bool,
}

impl InputState {
    /// Session-start state: empty buffer, all flags false.
    pub fn new() -> Self {
        Self::default()
    }

    /// State for externally supplied buffer text, flags derived from its
    /// trailing token.
    pub fn from_buffer(text: &str) -> Self {
        let mut state = Self {
            buffer: InputBuffer::from(text),
            ..Self::default()
        };
        state.resync_flags();
        state
    }

    pub fn buffer(&self) -> &InputBuffer {
        &self.buffer
    }

    pub fn last_was_numeric(&self) -> bool {
        self.last_was_numeric
    }

    pub fn in_error(&self) -> bool {
        self.in_error
    }

    pub fn dot_used(&self) -> bool {
        self.dot_used
    }

    pub fn mode(&self) -> Mode {
        if self.in_error {
            Mode::Error
        } else if self.last_was_numeric {
            Mode::EnteringNumber
        } else if self.buffer.is_empty() {
            Mode::Empty
        } else {
            Mode::AwaitingOperand
        }
    }

    /// Re-derive `last_was_numeric` and `dot_used` from the buffer text.
    ///
    /// A trailing digit, `.` or `)` ends an operand; anything else (operator
    /// symbol, function name, `!`, `(`) leaves the keypad awaiting one.
    pub(crate) fn resync_flags(&mut self) {
        match self.buffer.last_char() {
            Some(c) if c.is_ascii_digit() || c == '.' => {
                self.last_was_numeric = true;
                self.dot_used = self.buffer.trailing_number().contains('.');
            }
            Some(')') => {
                self.last_was_numeric = true;
                self.dot_used = false;
            }
            _ => {
                self.last_was_numeric = false;
                self.dot_used = false;
            }
        }
    }

    /// A successful evaluation leaves a decimal result on display.
    pub(crate) fn record_result(&mut self) {
        self.dot_used = true;
    }

    pub(crate) fn record_error(&mut self) {
        self.in_error = true;
        self.last_was_numeric = false;
    }
}

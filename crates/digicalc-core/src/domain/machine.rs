//! The keypad state machine.
//!
//! [`transition`] is a pure function of the current [`InputState`] and one
//! [`Key`]. It never evaluates anything: when `=` is legal it returns
//! [`Effect::Evaluate`] with the path to take, and the session runs the
//! evaluator and records the outcome.
//!
//! | Mode              | Digit   | Operator | Dot           | Evaluate            |
//! |-------------------|---------|----------|---------------|---------------------|
//! | `Empty`           | append  | reject   | append `0.`   | reject              |
//! | `EnteringNumber`  | append  | append   | `.` once      | standard path       |
//! | `AwaitingOperand` | append  | reject   | append `0.`   | factorial path if `!` |
//! | `Error`           | replace | reject   | reject        | reject              |
//!
//! Clear always resets. Erase drops the last character of a non-empty buffer.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::domain::{
    error::DomainError,
    key::Key,
    state::{InputState, Mode},
};

/// How Erase treats the flags after dropping a character.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EraseBehavior {
    /// Re-derive the numeric and dot flags from the truncated buffer.
    #[default]
    Resync,
    /// Leave every flag as it was (erasing `.` from `3.` still blocks a dot).
    Preserve,
}

impl EraseBehavior {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Resync => "resync",
            Self::Preserve => "preserve",
        }
    }
}

impl fmt::Display for EraseBehavior {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EraseBehavior {
    type Err = DomainError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "resync" => Ok(Self::Resync),
            "preserve" | "legacy" => Ok(Self::Preserve),
            other => Err(DomainError::InvalidSetting {
                setting: "erase behavior",
                value: other.to_owned(),
            }),
        }
    }
}

/// Which operator table the evaluator should use.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum EvalPath {
    /// No `!` in the buffer and the buffer ends in a number.
    Standard,
    /// The buffer contains `!`; factorial is registered.
    Factorial,
}

/// Change to mirror on the display surface's buffer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BufferEdit {
    Unchanged,
    Append(String),
    Replace(String),
}

/// What the session must do after a transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Effect {
    /// The key changed the state; nothing else to do.
    Accepted,
    /// The key is illegal here and was ignored.
    Rejected,
    /// Buffer and flags were reset; the result text must be cleared too.
    Cleared,
    /// Evaluate the buffer along the given path.
    Evaluate(EvalPath),
}

/// Output of [`transition`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transition {
    pub state: InputState,
    pub edit: BufferEdit,
    pub effect: Effect,
}

impl Transition {
    fn rejected(state: &InputState) -> Self {
        Self {
            state: state.clone(),
            edit: BufferEdit::Unchanged,
            effect: Effect::Rejected,
        }
    }

    fn append(state: InputState, text: &str) -> Self {
        Self {
            state,
            edit: BufferEdit::Append(text.to_owned()),
            effect: Effect::Accepted,
        }
    }
}

/// Apply one key press to `state`.
pub fn transition(state: &InputState, key: Key, erase: EraseBehavior) -> Transition {
    let mode = state.mode();

    match key {
        Key::Digit(digit) => {
            let mut next = state.clone();
            next.last_was_numeric = true;
            if mode == Mode::Error {
                let text = digit.as_char().to_string();
                next.buffer.replace(text.clone());
                next.in_error = false;
                next.dot_used = false;
                Transition {
                    state: next,
                    edit: BufferEdit::Replace(text),
                    effect: Effect::Accepted,
                }
            } else {
                let text = digit.as_char().to_string();
                next.buffer.push_str(&text);
                Transition::append(next, &text)
            }
        }

        Key::Operator(op) => {
            if mode != Mode::EnteringNumber {
                return Transition::rejected(state);
            }
            let mut next = state.clone();
            next.buffer.push_str(op.as_str());
            next.last_was_numeric = false;
            next.dot_used = false;
            Transition::append(next, op.as_str())
        }

        Key::Dot => match mode {
            Mode::Error => Transition::rejected(state),
            Mode::EnteringNumber if state.dot_used => Transition::rejected(state),
            Mode::EnteringNumber => {
                let mut next = state.clone();
                next.buffer.push_str(".");
                next.dot_used = true;
                Transition::append(next, ".")
            }
            Mode::Empty | Mode::AwaitingOperand => {
                let mut next = state.clone();
                next.buffer.push_str("0.");
                next.last_was_numeric = true;
                next.dot_used = true;
                Transition::append(next, "0.")
            }
        },

        Key::Clear => Transition {
            state: InputState::new(),
            edit: BufferEdit::Replace(String::new()),
            effect: Effect::Cleared,
        },

        Key::Erase => {
            if state.buffer.is_empty() {
                return Transition::rejected(state);
            }
            let mut next = state.clone();
            next.buffer.pop();
            if erase == EraseBehavior::Resync && !next.in_error {
                next.resync_flags();
            }
            let text = next.buffer.as_str().to_owned();
            Transition {
                state: next,
                edit: BufferEdit::Replace(text),
                effect: Effect::Accepted,
            }
        }

        Key::Evaluate => {
            let path = match (mode, state.buffer.contains_factorial()) {
                (Mode::EnteringNumber, false) => EvalPath::Standard,
                (Mode::AwaitingOperand, true) => EvalPath::Factorial,
                _ => return Transition::rejected(state),
            };
            Transition {
                state: state.clone(),
                edit: BufferEdit::Unchanged,
                effect: Effect::Evaluate(path),
            }
        }
    }
}

//! The expression text typed so far.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Postfix factorial symbol. Has no key; it only arrives through loaded text.
pub const FACTORIAL_SYMBOL: char = '!';

/// Ordered character sequence representing the expression typed so far.
///
/// Only the state machine mutates it, one key press at a time.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct InputBuffer(String);

impl InputBuffer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn push_str(&mut self, text: &str) {
        self.0.push_str(text);
    }

    pub fn replace(&mut self, text: impl Into<String>) {
        self.0 = text.into();
    }

    /// Remove the last character (not the last token).
    pub fn pop(&mut self) -> Option<char> {
        self.0.pop()
    }

    pub fn last_char(&self) -> Option<char> {
        self.0.chars().next_back()
    }

    pub fn contains_factorial(&self) -> bool {
        self.0.contains(FACTORIAL_SYMBOL)
    }

    /// The terminal numeric token: the trailing run of digits and dots.
    pub fn trailing_number(&self) -> &str {
        let start = self
            .0
            .char_indices()
            .rev()
            .take_while(|(_, c)| c.is_ascii_digit() || *c == '.')
            .last()
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[start..]
    }
}

impl fmt::Display for InputBuffer {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for InputBuffer {
    fn from(text: &str) -> Self {
        Self(text.to_owned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_number_stops_at_operator() {
        assert_eq!(InputBuffer::from("12+3.4").trailing_number(), "3.4");
        assert_eq!(InputBuffer::from("12sin").trailing_number(), "");
        assert_eq!(InputBuffer::from("0.5").trailing_number(), "0.5");
        assert_eq!(InputBuffer::new().trailing_number(), "");
    }

    #[test]
    fn pop_removes_one_character() {
        let mut buffer = InputBuffer::from("3cos");
        assert_eq!(buffer.pop(), Some('s'));
        assert_eq!(buffer.as_str(), "3co");
    }

    #[test]
    fn detects_factorial() {
        assert!(InputBuffer::from("5!").contains_factorial());
        assert!(!InputBuffer::from("5+1").contains_factorial());
    }
}

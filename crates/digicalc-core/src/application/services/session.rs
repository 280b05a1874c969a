//! Calculator session - drives one display surface.
//!
//! The session is the only stateful piece of the core. Each key press:
//! 1. Runs the pure transition function
//! 2. Mirrors the buffer edit on the display surface
//! 3. Evaluates the surface's buffer text when `=` is legal
//!
//! Illegal keys are ignored, never errors. Errors returned from the session
//! come from the display surface itself.

use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument};
use uuid::Uuid;

use crate::{
    application::ports::DisplaySurface,
    domain::{BufferEdit, Effect, EraseBehavior, EvalPath, InputState, Key, ResultFormat, transition},
    error::CalcResult,
    evaluator::{EvaluationError, Evaluator},
};

/// Marker shown in the result field when evaluation fails.
pub const DEFAULT_ERROR_MARKER: &str = "Error";

/// Per-session behaviour knobs, usually filled from the CLI config.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionOptions {
    pub erase: EraseBehavior,
    pub result_format: ResultFormat,
    pub error_marker: String,
}

impl Default for SessionOptions {
    fn default() -> Self {
        Self {
            erase: EraseBehavior::default(),
            result_format: ResultFormat::default(),
            error_marker: DEFAULT_ERROR_MARKER.to_owned(),
        }
    }
}

/// What a single key press did.
#[derive(Debug, Clone, PartialEq)]
pub enum KeyOutcome {
    Accepted,
    /// Illegal in the current mode; nothing changed.
    Rejected,
    Cleared,
    Evaluated(f64),
    /// Evaluation failed; the error marker is on display.
    Failed(EvaluationError),
}

impl KeyOutcome {
    pub fn is_rejected(&self) -> bool {
        matches!(self, Self::Rejected)
    }
}

/// One keypad bound to one display surface.
pub struct CalculatorSession {
    id: Uuid,
    state: InputState,
    display: Box<dyn DisplaySurface>,
    standard: Evaluator,
    extended: Evaluator,
    options: SessionOptions,
}

impl CalculatorSession {
    /// Start a session with default options.
    pub fn new(display: Box<dyn DisplaySurface>) -> Self {
        Self::with_options(display, SessionOptions::default())
    }

    pub fn with_options(display: Box<dyn DisplaySurface>, options: SessionOptions) -> Self {
        let id = Uuid::new_v4();
        debug!(session = %id, erase = %options.erase, "session started");
        Self {
            id,
            state: InputState::new(),
            display,
            standard: Evaluator::standard(),
            extended: Evaluator::with_factorial(),
            options,
        }
    }

    pub fn id(&self) -> Uuid {
        self.id
    }

    pub fn state(&self) -> &InputState {
        &self.state
    }

    pub fn options(&self) -> &SessionOptions {
        &self.options
    }

    /// Apply one key press.
    #[instrument(skip(self), fields(session = %self.id, mode = %self.state.mode()))]
    pub fn press(&mut self, key: Key) -> CalcResult<KeyOutcome> {
        let next = transition(&self.state, key, self.options.erase);

        match &next.edit {
            BufferEdit::Unchanged => {}
            BufferEdit::Append(text) => self.display.append_to_buffer(text)?,
            BufferEdit::Replace(text) => self.display.set_buffer_text(text)?,
        }
        self.state = next.state;

        match next.effect {
            Effect::Accepted => {
                debug!(buffer = %self.state.buffer(), "key accepted");
                Ok(KeyOutcome::Accepted)
            }
            Effect::Rejected => {
                debug!("key rejected");
                Ok(KeyOutcome::Rejected)
            }
            Effect::Cleared => {
                self.display.set_result_text("")?;
                Ok(KeyOutcome::Cleared)
            }
            Effect::Evaluate(path) => self.evaluate(path),
        }
    }

    /// Apply a sequence of key presses, stopping at the first surface failure.
    pub fn press_all<I>(&mut self, keys: I) -> CalcResult<Vec<KeyOutcome>>
    where
        I: IntoIterator<Item = Key>,
    {
        keys.into_iter().map(|key| self.press(key)).collect()
    }

    /// Replace the buffer with externally edited text.
    ///
    /// Flags follow the text's trailing token. This is how `!` enters the
    /// buffer, since no key produces it.
    #[instrument(skip(self), fields(session = %self.id))]
    pub fn load_buffer(&mut self, text: &str) -> CalcResult<()> {
        self.display.set_buffer_text(text)?;
        self.state = InputState::from_buffer(text);
        debug!(mode = %self.state.mode(), "buffer loaded");
        Ok(())
    }

    fn evaluate(&mut self, path: EvalPath) -> CalcResult<KeyOutcome> {
        let text = self.display.buffer_text()?;
        let evaluator = match path {
            EvalPath::Standard => &self.standard,
            EvalPath::Factorial => &self.extended,
        };

        match evaluator.evaluate(&text) {
            Ok(value) => {
                let rendered = self.options.result_format.format(value);
                self.display.set_result_text(&rendered)?;
                self.state.record_result();
                info!(expression = %text, result = %rendered, ?path, "evaluated");
                Ok(KeyOutcome::Evaluated(value))
            }
            Err(err) => {
                self.display.set_result_text(&self.options.error_marker)?;
                self.state.record_error();
                info!(expression = %text, error = %err, ?path, "evaluation failed");
                Ok(KeyOutcome::Failed(err))
            }
        }
    }
}

impl std::fmt::Debug for CalculatorSession {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CalculatorSession")
            .field("id", &self.id)
            .field("state", &self.state)
            .field("options", &self.options)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        application::{ApplicationError, ports::output::MockDisplaySurface},
        domain::{Mode, Operator},
    };
    use mockall::Sequence;

    fn keys(script: &str) -> Vec<Key> {
        Key::parse_script(script).unwrap()
    }

    /// A mock that accepts any buffer edit and serves `buffer` on read.
    fn lenient_display(buffer: &'static str) -> MockDisplaySurface {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().returning(|_| Ok(()));
        display.expect_set_buffer_text().returning(|_| Ok(()));
        display
            .expect_buffer_text()
            .returning(move || Ok(buffer.to_owned()));
        display.expect_set_result_text().returning(|_| Ok(()));
        display
    }

    #[test]
    fn digits_are_appended_to_the_surface() {
        let mut display = MockDisplaySurface::new();
        let mut seq = Sequence::new();
        display
            .expect_append_to_buffer()
            .withf(|text| text == "1")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        display
            .expect_append_to_buffer()
            .withf(|text| text == "+")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_| Ok(()));
        display.expect_set_result_text().never();

        let mut session = CalculatorSession::new(Box::new(display));
        let outcomes = session.press_all(keys("1 +")).unwrap();

        assert_eq!(outcomes, vec![KeyOutcome::Accepted, KeyOutcome::Accepted]);
        assert_eq!(session.state().buffer().as_str(), "1+");
        assert_eq!(session.state().mode(), Mode::AwaitingOperand);
    }

    #[test]
    fn rejected_key_never_touches_the_surface() {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().never();
        display.expect_set_buffer_text().never();

        let mut session = CalculatorSession::new(Box::new(display));
        let outcome = session.press(Key::Operator(Operator::Multiply)).unwrap();

        assert!(outcome.is_rejected());
        assert_eq!(session.state(), &InputState::new());
    }

    #[test]
    fn evaluation_writes_formatted_result() {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().returning(|_| Ok(()));
        display
            .expect_buffer_text()
            .times(1)
            .returning(|| Ok("3+4*2".into()));
        display
            .expect_set_result_text()
            .withf(|text| text == "11.0")
            .times(1)
            .returning(|_| Ok(()));

        let mut session = CalculatorSession::new(Box::new(display));
        let outcomes = session.press_all(keys("3 + 4 × 2 =")).unwrap();

        assert_eq!(outcomes.last(), Some(&KeyOutcome::Evaluated(11.0)));
        assert!(session.state().dot_used());
        assert_eq!(session.state().mode(), Mode::EnteringNumber);
    }

    #[test]
    fn compact_format_drops_trailing_zero() {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().returning(|_| Ok(()));
        display.expect_buffer_text().returning(|| Ok("8".into()));
        display
            .expect_set_result_text()
            .withf(|text| text == "8")
            .times(1)
            .returning(|_| Ok(()));

        let options = SessionOptions {
            result_format: ResultFormat::Compact,
            ..SessionOptions::default()
        };
        let mut session = CalculatorSession::with_options(Box::new(display), options);
        session.press_all(keys("8 =")).unwrap();
    }

    #[test]
    fn evaluation_error_shows_marker_and_enters_error() {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().returning(|_| Ok(()));
        display.expect_buffer_text().returning(|| Ok("5/0".into()));
        display
            .expect_set_result_text()
            .withf(|text| text == "Error")
            .times(1)
            .returning(|_| Ok(()));

        let mut session = CalculatorSession::new(Box::new(display));
        let outcomes = session.press_all(keys("5 / 0 =")).unwrap();

        assert_eq!(
            outcomes.last(),
            Some(&KeyOutcome::Failed(EvaluationError::DivisionByZero))
        );
        assert_eq!(session.state().mode(), Mode::Error);
        assert!(!session.state().last_was_numeric());
    }

    #[test]
    fn custom_error_marker() {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().returning(|_| Ok(()));
        display.expect_buffer_text().returning(|| Ok("1/0".into()));
        display
            .expect_set_result_text()
            .withf(|text| text == "E")
            .times(1)
            .returning(|_| Ok(()));

        let options = SessionOptions {
            error_marker: "E".into(),
            ..SessionOptions::default()
        };
        let mut session = CalculatorSession::with_options(Box::new(display), options);
        session.press_all(keys("1 / 0 =")).unwrap();
    }

    #[test]
    fn digit_after_error_replaces_buffer() {
        let display = lenient_display("5/0");

        let mut session = CalculatorSession::new(Box::new(display));
        session.press_all(keys("5 / 0 =")).unwrap();
        session.press(Key::digit(7).unwrap()).unwrap();

        assert_eq!(session.state().buffer().as_str(), "7");
        assert_eq!(session.state().mode(), Mode::EnteringNumber);
    }

    #[test]
    fn clear_empties_both_fields() {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().returning(|_| Ok(()));
        display
            .expect_set_buffer_text()
            .withf(|text| text.is_empty())
            .times(1)
            .returning(|_| Ok(()));
        display
            .expect_set_result_text()
            .withf(|text| text.is_empty())
            .times(1)
            .returning(|_| Ok(()));

        let mut session = CalculatorSession::new(Box::new(display));
        let outcomes = session.press_all(keys("4 2 C")).unwrap();

        assert_eq!(outcomes.last(), Some(&KeyOutcome::Cleared));
        assert_eq!(session.state(), &InputState::new());
    }

    #[test]
    fn loaded_factorial_buffer_takes_factorial_path() {
        let display = lenient_display("5!");

        let mut session = CalculatorSession::new(Box::new(display));
        session.load_buffer("5!").unwrap();
        assert_eq!(session.state().mode(), Mode::AwaitingOperand);

        let outcome = session.press(Key::Evaluate).unwrap();
        assert_eq!(outcome, KeyOutcome::Evaluated(120.0));
    }

    #[test]
    fn negative_factorial_fails() {
        let display = lenient_display("-1!");
        let mut session = CalculatorSession::new(Box::new(display));
        session.load_buffer("-1!").unwrap();

        let outcome = session.press(Key::Evaluate).unwrap();
        assert!(matches!(outcome, KeyOutcome::Failed(_)));
        assert_eq!(session.state().mode(), Mode::Error);
    }

    #[test]
    fn evaluate_in_awaiting_operand_without_factorial_is_noop() {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().returning(|_| Ok(()));
        display.expect_buffer_text().never();
        display.expect_set_result_text().never();

        let mut session = CalculatorSession::new(Box::new(display));
        let outcomes = session.press_all(keys("3 + =")).unwrap();
        assert_eq!(outcomes.last(), Some(&KeyOutcome::Rejected));
    }

    #[test]
    fn surface_failure_propagates_and_keeps_state() {
        let mut display = MockDisplaySurface::new();
        display.expect_append_to_buffer().returning(|_| {
            Err(ApplicationError::DisplayFailed {
                reason: "closed".into(),
            }
            .into())
        });

        let mut session = CalculatorSession::new(Box::new(display));
        assert!(session.press(Key::digit(1).unwrap()).is_err());
        assert_eq!(session.state(), &InputState::new());
    }

    #[test]
    fn sessions_get_distinct_ids() {
        let a = CalculatorSession::new(Box::new(MockDisplaySurface::new()));
        let b = CalculatorSession::new(Box::new(MockDisplaySurface::new()));
        assert_ne!(a.id(), b.id());
    }
}

//! Integration tests for digicalc-core.

use std::{cell::RefCell, rc::Rc};

use digicalc_core::{
    application::{CalculatorSession, KeyOutcome, SessionOptions},
    domain::{EraseBehavior, InputState, Key, Mode},
    prelude::*,
};

/// Shared-state surface so the test can inspect what the session rendered.
#[derive(Clone, Default)]
struct SharedDisplay {
    inner: Rc<RefCell<(String, String)>>,
}

impl SharedDisplay {
    fn buffer(&self) -> String {
        self.inner.borrow().0.clone()
    }

    fn result(&self) -> String {
        self.inner.borrow().1.clone()
    }
}

impl DisplaySurface for SharedDisplay {
    fn set_buffer_text(&mut self, text: &str) -> CalcResult<()> {
        self.inner.borrow_mut().0 = text.to_owned();
        Ok(())
    }

    fn append_to_buffer(&mut self, text: &str) -> CalcResult<()> {
        self.inner.borrow_mut().0.push_str(text);
        Ok(())
    }

    fn buffer_text(&self) -> CalcResult<String> {
        Ok(self.buffer())
    }

    fn set_result_text(&mut self, text: &str) -> CalcResult<()> {
        self.inner.borrow_mut().1 = text.to_owned();
        Ok(())
    }
}

fn session() -> (CalculatorSession, SharedDisplay) {
    let display = SharedDisplay::default();
    (CalculatorSession::new(Box::new(display.clone())), display)
}

fn run(session: &mut CalculatorSession, script: &str) -> Vec<KeyOutcome> {
    session
        .press_all(Key::parse_script(script).unwrap())
        .unwrap()
}

#[test]
fn test_digit_runs_build_literal_concatenation() {
    let (mut session, display) = session();
    run(&mut session, "1 2 . 5 + 0 7 . 2 5");

    assert_eq!(display.buffer(), "12.5+07.25");
    assert_eq!(session.state().buffer().as_str(), display.buffer());
}

#[test]
fn test_operator_after_clear_is_rejected() {
    let (mut session, display) = session();
    let outcomes = run(&mut session, "9 C + ×");

    assert_eq!(outcomes[2], KeyOutcome::Rejected);
    assert_eq!(outcomes[3], KeyOutcome::Rejected);
    assert_eq!(display.buffer(), "");
    assert_eq!(session.state(), &InputState::new());
}

#[test]
fn test_double_dot_appends_one_dot() {
    let (mut session, display) = session();
    run(&mut session, "3 . . 1");
    assert_eq!(display.buffer(), "3.1");
}

#[test]
fn test_dot_after_operator_appends_leading_zero() {
    let (mut session, display) = session();
    run(&mut session, "7 + . 5 =");

    assert_eq!(display.buffer(), "7+0.5");
    assert_eq!(display.result(), "7.5");
}

#[test]
fn test_precedence_through_the_keypad() {
    let (mut session, display) = session();
    let outcomes = run(&mut session, "3 + 4 × 2 =");

    assert_eq!(outcomes.last(), Some(&KeyOutcome::Evaluated(11.0)));
    assert_eq!(display.result(), "11.0");
}

#[test]
fn test_division_by_zero_shows_error_then_digit_recovers() {
    let (mut session, display) = session();
    run(&mut session, "5 ÷ 0 =");

    assert_eq!(display.result(), "Error");
    assert_eq!(session.state().mode(), Mode::Error);

    // Operators and dots stay blocked until a digit arrives
    let outcomes = run(&mut session, "+ .");
    assert!(outcomes.iter().all(KeyOutcome::is_rejected));

    run(&mut session, "4");
    assert_eq!(display.buffer(), "4");
    assert_eq!(session.state().mode(), Mode::EnteringNumber);
}

#[test]
fn test_factorial_buffer_evaluates() {
    let (mut session, display) = session();
    session.load_buffer("5!").unwrap();
    run(&mut session, "=");
    assert_eq!(display.result(), "120.0");

    session.load_buffer("-1!").unwrap();
    let outcomes = run(&mut session, "=");
    assert!(matches!(outcomes[0], KeyOutcome::Failed(_)));
    assert_eq!(display.result(), "Error");
}

#[test]
fn test_factorial_buffer_ending_in_digit_is_not_evaluated() {
    let (mut session, display) = session();
    session.load_buffer("5!3").unwrap();

    let outcomes = run(&mut session, "=");
    assert_eq!(outcomes, vec![KeyOutcome::Rejected]);
    assert_eq!(display.result(), "");
}

#[test]
fn test_erase() {
    let (mut session, display) = session();
    assert_eq!(run(&mut session, "DEL"), vec![KeyOutcome::Rejected]);

    run(&mut session, "1 2 DEL");
    assert_eq!(display.buffer(), "1");
    assert_eq!(session.state().mode(), Mode::EnteringNumber);
}

#[test]
fn test_erase_behaviours_differ_on_dot() {
    let display = SharedDisplay::default();
    let mut resync = CalculatorSession::new(Box::new(display.clone()));
    run(&mut resync, "3 . DEL .");
    assert_eq!(display.buffer(), "3.");

    let display = SharedDisplay::default();
    let options = SessionOptions {
        erase: EraseBehavior::Preserve,
        ..SessionOptions::default()
    };
    let mut preserve = CalculatorSession::with_options(Box::new(display.clone()), options);
    run(&mut preserve, "3 . DEL .");
    assert_eq!(display.buffer(), "3");
}

#[test]
fn test_result_then_operator_continues_expression() {
    let (mut session, display) = session();
    run(&mut session, "2 ^ 3 = + 1 =");

    assert_eq!(display.buffer(), "2^3+1");
    assert_eq!(display.result(), "9.0");
}

#[test]
fn test_functions_by_juxtaposition() {
    let (mut session, display) = session();
    run(&mut session, "2 cos 0 =");
    assert_eq!(display.result(), "2.0");
}

// ── generated sessions ───────────────────────────────────────────────────────

mod properties {
    use super::*;
    use digicalc_core::domain::Operator;
    use proptest::prelude::*;

    fn any_key() -> impl Strategy<Value = Key> {
        prop_oneof![
            4 => (0u8..=9).prop_map(|d| Key::digit(d).unwrap()),
            2 => prop::sample::select(Operator::ALL.to_vec()).prop_map(Key::Operator),
            1 => Just(Key::Dot),
            1 => Just(Key::Clear),
            1 => Just(Key::Erase),
            1 => Just(Key::Evaluate),
        ]
    }

    proptest! {
        #[test]
        fn prop_display_mirrors_state_buffer(keys in prop::collection::vec(any_key(), 0..40)) {
            let (mut session, display) = session();
            for key in keys {
                session.press(key).unwrap();
                prop_assert_eq!(display.buffer(), session.state().buffer().as_str());
            }
        }
    }
}

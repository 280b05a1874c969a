//! Recording decorator around another display surface.

use std::sync::{Arc, RwLock};

use digicalc_core::{
    application::{ApplicationError, ports::DisplaySurface},
    error::CalcResult,
};
use serde::{Deserialize, Serialize};

/// One call the session made on its display surface.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "call", content = "text", rename_all = "snake_case")]
pub enum SurfaceCall {
    SetBuffer(String),
    Append(String),
    /// Buffer read for evaluation, with the text that was returned.
    ReadBuffer(String),
    SetResult(String),
}

/// Shared handle onto the recorded calls.
#[derive(Debug, Clone, Default)]
pub struct Transcript {
    calls: Arc<RwLock<Vec<SurfaceCall>>>,
}

impl Transcript {
    pub fn calls(&self) -> Vec<SurfaceCall> {
        self.calls.read().map(|c| c.clone()).unwrap_or_default()
    }

    pub fn len(&self) -> usize {
        self.calls.read().map(|c| c.len()).unwrap_or_default()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string_pretty(&self.calls())
    }

    fn record(&self, call: SurfaceCall) -> CalcResult<()> {
        self.calls
            .write()
            .map_err(|_| ApplicationError::DisplayLockError)?
            .push(call);
        Ok(())
    }
}

/// Forwards every call to `inner` and records it.
///
/// Failed calls are not recorded.
#[derive(Debug)]
pub struct TranscriptDisplay<D> {
    inner: D,
    transcript: Transcript,
}

impl<D: DisplaySurface> TranscriptDisplay<D> {
    pub fn new(inner: D) -> Self {
        Self {
            inner,
            transcript: Transcript::default(),
        }
    }

    pub fn transcript(&self) -> Transcript {
        self.transcript.clone()
    }
}

impl<D: DisplaySurface> DisplaySurface for TranscriptDisplay<D> {
    fn set_buffer_text(&mut self, text: &str) -> CalcResult<()> {
        self.inner.set_buffer_text(text)?;
        self.transcript.record(SurfaceCall::SetBuffer(text.to_owned()))
    }

    fn append_to_buffer(&mut self, text: &str) -> CalcResult<()> {
        self.inner.append_to_buffer(text)?;
        self.transcript.record(SurfaceCall::Append(text.to_owned()))
    }

    fn buffer_text(&self) -> CalcResult<String> {
        let text = self.inner.buffer_text()?;
        self.transcript.record(SurfaceCall::ReadBuffer(text.clone()))?;
        Ok(text)
    }

    fn set_result_text(&mut self, text: &str) -> CalcResult<()> {
        self.inner.set_result_text(text)?;
        self.transcript.record(SurfaceCall::SetResult(text.to_owned()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::display::MemoryDisplay;
    use digicalc_core::{application::CalculatorSession, domain::Key};

    fn run(script: &str) -> (MemoryDisplay, Transcript) {
        let memory = MemoryDisplay::new();
        let display = TranscriptDisplay::new(memory.clone());
        let transcript = display.transcript();
        let mut session = CalculatorSession::new(Box::new(display));
        session
            .press_all(Key::parse_script(script).unwrap())
            .unwrap();
        (memory, transcript)
    }

    #[test]
    fn records_calls_in_order() {
        let (memory, transcript) = run("4 ÷ 2 =");

        assert_eq!(
            transcript.calls(),
            vec![
                SurfaceCall::Append("4".into()),
                SurfaceCall::Append("/".into()),
                SurfaceCall::Append("2".into()),
                SurfaceCall::ReadBuffer("4/2".into()),
                SurfaceCall::SetResult("2.0".into()),
            ]
        );
        assert_eq!(memory.result(), "2.0");
    }

    #[test]
    fn rejected_keys_leave_no_trace() {
        let (_, transcript) = run("+ = . .");
        assert_eq!(transcript.calls(), vec![SurfaceCall::Append("0.".into())]);
    }

    #[test]
    fn clear_records_both_fields() {
        let (_, transcript) = run("7 C");
        assert_eq!(
            &transcript.calls()[1..],
            &[
                SurfaceCall::SetBuffer(String::new()),
                SurfaceCall::SetResult(String::new()),
            ]
        );
    }

    #[test]
    fn serializes_as_tagged_json() {
        let (_, transcript) = run("1");
        let json = transcript.to_json().unwrap();
        assert!(json.contains(r#""call": "append""#));
        assert!(json.contains(r#""text": "1""#));
    }
}

//! In-memory display surface for scripted sessions and tests.

use std::sync::{Arc, RwLock};

use digicalc_core::{
    application::{ApplicationError, ports::DisplaySurface},
    error::CalcResult,
};
use tracing::trace;

/// In-memory display surface.
///
/// Clones share the same fields, so a caller can hand one clone to a
/// session and keep another to read what was rendered.
#[derive(Debug, Clone, Default)]
pub struct MemoryDisplay {
    inner: Arc<RwLock<MemoryDisplayInner>>,
}

#[derive(Debug, Default)]
struct MemoryDisplayInner {
    buffer: String,
    result: String,
}

impl MemoryDisplay {
    /// Create an empty display.
    pub fn new() -> Self {
        Self::default()
    }

    /// Current buffer text (testing helper).
    pub fn buffer(&self) -> String {
        self.inner
            .read()
            .map(|inner| inner.buffer.clone())
            .unwrap_or_default()
    }

    /// Current result text.
    pub fn result(&self) -> String {
        self.inner
            .read()
            .map(|inner| inner.result.clone())
            .unwrap_or_default()
    }
}

impl DisplaySurface for MemoryDisplay {
    fn set_buffer_text(&mut self, text: &str) -> CalcResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::DisplayLockError)?;
        trace!(text, "buffer set");
        inner.buffer = text.to_owned();
        Ok(())
    }

    fn append_to_buffer(&mut self, text: &str) -> CalcResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::DisplayLockError)?;
        trace!(text, "buffer appended");
        inner.buffer.push_str(text);
        Ok(())
    }

    fn buffer_text(&self) -> CalcResult<String> {
        let inner = self
            .inner
            .read()
            .map_err(|_| ApplicationError::DisplayLockError)?;
        Ok(inner.buffer.clone())
    }

    fn set_result_text(&mut self, text: &str) -> CalcResult<()> {
        let mut inner = self
            .inner
            .write()
            .map_err(|_| ApplicationError::DisplayLockError)?;
        trace!(text, "result set");
        inner.result = text.to_owned();
        Ok(())
    }
}

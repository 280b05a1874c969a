//! Driven (output) ports - implemented by infrastructure.

use crate::error::CalcResult;

/// Port for the surface that renders the keypad's two text fields.
///
/// Implemented by:
/// - `digicalc_adapters::display::MemoryDisplay` (testing, scripted sessions)
/// - `digicalc_adapters::display::TranscriptDisplay` (records every call)
/// - the terminal keypad in `digicalc-cli`
///
/// ## Design Notes
///
/// - The session mirrors each buffer edit here as it happens
/// - `buffer_text` is read back when evaluating, so the surface is the
///   source of the evaluated text
/// - Rendering may fail (a closed terminal), hence every method is fallible
#[cfg_attr(test, mockall::automock)]
pub trait DisplaySurface {
    /// Replace the whole buffer text.
    fn set_buffer_text(&mut self, text: &str) -> CalcResult<()>;

    /// Append to the buffer text.
    fn append_to_buffer(&mut self, text: &str) -> CalcResult<()>;

    /// Current buffer text.
    fn buffer_text(&self) -> CalcResult<String>;

    /// Replace the result text (a formatted value, an error marker, or empty).
    fn set_result_text(&mut self, text: &str) -> CalcResult<()>;
}

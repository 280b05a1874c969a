//! Terminal display surface for `digicalc pad`.
//!
//! Renders the two keypad fields as the last two lines of the terminal and
//! redraws them in place on every change:
//!
//! ```text
//!   > 3+4*2
//!   = 11.0
//! ```

use std::io;

use console::Term;
use owo_colors::OwoColorize;

use digicalc_core::{
    application::{ApplicationError, ports::DisplaySurface},
    error::CalcResult,
};

/// Number of lines the surface occupies.
const LINES: usize = 2;

pub struct TerminalDisplay {
    term: Term,
    buffer: String,
    result: String,
    error_marker: String,
    color: bool,
}

impl TerminalDisplay {
    /// Draw the empty fields and take over the last two lines.
    pub fn open(term: Term, error_marker: impl Into<String>, color: bool) -> io::Result<Self> {
        let display = Self {
            term,
            buffer: String::new(),
            result: String::new(),
            error_marker: error_marker.into(),
            color,
        };
        display.draw()?;
        Ok(display)
    }

    fn draw(&self) -> io::Result<()> {
        let (buffer_line, result_line) = render_lines(
            &self.buffer,
            &self.result,
            &self.error_marker,
            self.color,
        );
        self.term.write_line(&buffer_line)?;
        self.term.write_line(&result_line)
    }

    fn refresh(&self) -> CalcResult<()> {
        self.term
            .clear_last_lines(LINES)
            .and_then(|()| self.draw())
            .map_err(|e| {
                ApplicationError::DisplayFailed {
                    reason: e.to_string(),
                }
                .into()
            })
    }
}

/// The two display lines, coloured when `color` is set.
fn render_lines(buffer: &str, result: &str, error_marker: &str, color: bool) -> (String, String) {
    let buffer_line = format!("  > {buffer}");
    let result_line = format!("  = {result}");
    if !color {
        return (buffer_line, result_line);
    }

    let result_line = if !result.is_empty() && result == error_marker {
        result_line.red().bold().to_string()
    } else {
        result_line.green().bold().to_string()
    };
    (buffer_line.bold().to_string(), result_line)
}

impl DisplaySurface for TerminalDisplay {
    fn set_buffer_text(&mut self, text: &str) -> CalcResult<()> {
        self.buffer = text.to_owned();
        self.refresh()
    }

    fn append_to_buffer(&mut self, text: &str) -> CalcResult<()> {
        self.buffer.push_str(text);
        self.refresh()
    }

    fn buffer_text(&self) -> CalcResult<String> {
        Ok(self.buffer.clone())
    }

    fn set_result_text(&mut self, text: &str) -> CalcResult<()> {
        self.result = text.to_owned();
        self.refresh()
    }
}

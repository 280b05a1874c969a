//! `digicalc pad` — the interactive terminal keypad.
//!
//! Each terminal key is looked up in the [`KeyMap`] and pressed on a
//! [`CalculatorSession`] drawing to a [`TerminalDisplay`]. Two keys are
//! reserved when left unbound: `q` quits, and `:` opens an edit line whose
//! text replaces the buffer (the only way to enter `!`).

use std::io;

use console::{Key as TermKey, Term};
use tracing::{debug, info, instrument, warn};

use digicalc_adapters::KeyMap;
use digicalc_core::{
    application::{CalculatorSession, KeyOutcome},
    domain::Key,
};

use crate::{
    cli::PadArgs,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    terminal::TerminalDisplay,
};

/// What one terminal key asks the keypad to do.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum PadAction {
    Press(Key),
    Edit,
    Quit,
    Ignore,
}

#[instrument(skip_all)]
pub fn execute(args: PadArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let term = Term::stdout();
    if !term.is_term() {
        return Err(CliError::NotATerminal);
    }

    let keymap = match args.keymap.as_ref().or(config.keypad.keymap.as_ref()) {
        Some(path) => KeyMap::load(path)?,
        None => KeyMap::default(),
    };
    debug!(bindings = keymap.len(), "key map ready");

    output.header("digicalc keypad")?;
    output.print("  Enter or = evaluates, Esc clears, Backspace erases.")?;
    output.print("  ':' edits the buffer directly, q quits.")?;
    output.print("")?;

    let display = TerminalDisplay::open(
        term.clone(),
        &config.display.error_marker,
        output.supports_color(),
    )
    .with_cli_context(|| "drawing the keypad")?;
    let mut session = CalculatorSession::with_options(Box::new(display), config.session_options());
    info!(session = %session.id(), "keypad opened");

    loop {
        let pressed = match term.read_key() {
            Ok(key) => key,
            Err(e) if e.kind() == io::ErrorKind::Interrupted => break,
            Err(e) => return Err(e).with_cli_context(|| "reading a key"),
        };

        match resolve(&keymap, &pressed) {
            PadAction::Press(key) => {
                let outcome = session.press(key)?;
                if let KeyOutcome::Failed(err) = &outcome {
                    debug!(%err, "evaluation failed");
                }
            }
            PadAction::Edit => edit_buffer(&term, &mut session)?,
            PadAction::Quit => break,
            PadAction::Ignore => debug!(?pressed, "unbound key"),
        }
    }

    info!(session = %session.id(), "keypad closed");
    Ok(())
}

/// Read a line below the keypad and load it as the buffer.
fn edit_buffer(term: &Term, session: &mut CalculatorSession) -> CliResult<()> {
    term.write_str(": ").with_cli_context(|| "drawing the edit line")?;
    let line = term
        .read_line()
        .with_cli_context(|| "reading the edit line")?;
    term.clear_last_lines(1)
        .with_cli_context(|| "clearing the edit line")?;

    let text = line.trim();
    if text.is_empty() {
        return Ok(());
    }
    session.load_buffer(text).map_err(|e| {
        warn!(error = %e, "could not load edited buffer");
        CliError::from(e)
    })
}

fn resolve(keymap: &KeyMap, pressed: &TermKey) -> PadAction {
    if let Some(name) = key_name(pressed) {
        if let Some(key) = keymap.lookup(&name) {
            return PadAction::Press(key);
        }
    }

    match pressed {
        TermKey::Char('q') | TermKey::CtrlC => PadAction::Quit,
        TermKey::Char(':') => PadAction::Edit,
        _ => PadAction::Ignore,
    }
}

/// The name a key-map file uses for a terminal key.
fn key_name(pressed: &TermKey) -> Option<String> {
    let name = match pressed {
        TermKey::Char(c) => return Some(c.to_string()),
        TermKey::Enter => "enter",
        TermKey::Backspace => "backspace",
        TermKey::Escape => "escape",
        TermKey::Del => "delete",
        TermKey::Tab => "tab",
        _ => return None,
    };
    Some(name.to_owned())
}

#[cfg(test)]
mod tests {
    use super::*;
    use digicalc_core::domain::Operator;

    #[test]
    fn default_bindings() {
        let map = KeyMap::default();
        assert_eq!(resolve(&map, &TermKey::Char('7')), PadAction::Press(Key::digit(7).unwrap()));
        assert_eq!(resolve(&map, &TermKey::Enter), PadAction::Press(Key::Evaluate));
        assert_eq!(resolve(&map, &TermKey::Backspace), PadAction::Press(Key::Erase));
        assert_eq!(resolve(&map, &TermKey::Escape), PadAction::Press(Key::Clear));
        assert_eq!(
            resolve(&map, &TermKey::Char('x')),
            PadAction::Press(Key::Operator(Operator::Multiply))
        );
    }

    #[test]
    fn reserved_keys_when_unbound() {
        let map = KeyMap::default();
        assert_eq!(resolve(&map, &TermKey::Char('q')), PadAction::Quit);
        assert_eq!(resolve(&map, &TermKey::CtrlC), PadAction::Quit);
        assert_eq!(resolve(&map, &TermKey::Char(':')), PadAction::Edit);
        assert_eq!(resolve(&map, &TermKey::ArrowUp), PadAction::Ignore);
    }

    #[test]
    fn bindings_override_reserved_keys() {
        let mut map = KeyMap::default();
        map.bind("q", Key::Clear);
        assert_eq!(resolve(&map, &TermKey::Char('q')), PadAction::Press(Key::Clear));
    }

    #[test]
    fn tab_has_a_name_but_no_default_binding() {
        assert_eq!(key_name(&TermKey::Tab).as_deref(), Some("tab"));
        assert_eq!(resolve(&KeyMap::default(), &TermKey::Tab), PadAction::Ignore);
    }
}

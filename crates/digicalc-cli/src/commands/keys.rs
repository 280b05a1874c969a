//! `digicalc keys` — replay a key script through a keypad session.

use std::{fs, io, path::Path};

use serde::Serialize;
use tracing::{debug, instrument};

use digicalc_adapters::{MemoryDisplay, SurfaceCall, TranscriptDisplay};
use digicalc_core::{
    application::{CalculatorSession, KeyOutcome},
    domain::{Key, Mode},
    error::CalcError,
};

use crate::{
    cli::{KeysArgs, OutputFormat},
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
};

/// Everything a replay leaves behind.
#[derive(Debug, Serialize)]
struct Replay {
    session: String,
    buffer: String,
    result: String,
    mode: Mode,
    keys: usize,
    rejected: usize,
    transcript: Vec<SurfaceCall>,
}

#[instrument(skip_all)]
pub fn execute(args: KeysArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let script = match &args.file {
        Some(path) => read_script(path)?,
        None => args.keys.join(" "),
    };
    let keys = Key::parse_script(&script).map_err(CalcError::from)?;

    if keys.is_empty() && args.load.is_none() {
        return Err(CliError::InvalidInput {
            message: "no keys to replay".into(),
            source: None,
        });
    }

    let replay = replay(&keys, args.load.as_deref(), &config)?;

    match output.format() {
        OutputFormat::Json => output.json(&replay)?,
        format => {
            output.result(&format!("buffer  {}", replay.buffer))?;
            output.result(&format!("result  {}", replay.result))?;
            if format == OutputFormat::Human && replay.rejected > 0 {
                output.info(&format!(
                    "{} of {} key(s) ignored",
                    replay.rejected, replay.keys
                ))?;
            }
        }
    }

    Ok(())
}

fn replay(keys: &[Key], load: Option<&str>, config: &AppConfig) -> CliResult<Replay> {
    let display = MemoryDisplay::new();
    let recorder = TranscriptDisplay::new(display.clone());
    let transcript = recorder.transcript();

    let mut session = CalculatorSession::with_options(Box::new(recorder), config.session_options());
    if let Some(text) = load {
        session.load_buffer(text)?;
    }
    let outcomes = session.press_all(keys.iter().copied())?;
    let rejected = outcomes.iter().filter(|o| o.is_rejected()).count();

    debug!(
        session = %session.id(),
        keys = keys.len(),
        rejected,
        evaluations = outcomes.iter().filter(|o| matches!(o, KeyOutcome::Evaluated(_))).count(),
        "replay finished"
    );

    Ok(Replay {
        session: session.id().to_string(),
        buffer: display.buffer(),
        result: display.result(),
        mode: session.state().mode(),
        keys: keys.len(),
        rejected,
        transcript: transcript.calls(),
    })
}

fn read_script(path: &Path) -> CliResult<String> {
    match fs::read_to_string(path) {
        Ok(text) => Ok(text),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Err(CliError::FileNotFound {
            path: path.to_path_buf(),
        }),
        Err(e) => Err(e).with_cli_context(|| format!("reading key script '{}'", path.display())),
    }
}

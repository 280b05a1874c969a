//! `digicalc eval` — evaluate an expression without the keypad.

use serde::Serialize;
use tracing::{debug, instrument};

use digicalc_core::{
    domain::{FACTORIAL_SYMBOL, ResultFormat},
    error::CalcError,
    evaluator::Evaluator,
};

use crate::{
    cli::{EvalArgs, FactorialMode, OutputFormat},
    config::AppConfig,
    error::CliResult,
    output::OutputManager,
};

#[derive(Debug, Serialize)]
struct EvalReport<'a> {
    expression: &'a str,
    value: f64,
    display: String,
    factorial: bool,
}

#[instrument(skip_all)]
pub fn execute(args: EvalArgs, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let expression = args.expression.join(" ");
    let evaluator = select_evaluator(&expression, args.factorial);
    let format: ResultFormat = args
        .format
        .map(Into::into)
        .unwrap_or(config.display.result_format);

    debug!(%expression, factorial = evaluator.table().has_factorial(), "evaluating");
    let value = evaluator.evaluate(&expression).map_err(CalcError::from)?;
    let display = format.format(value);

    match output.format() {
        OutputFormat::Json => output.json(&EvalReport {
            expression: &expression,
            value,
            display,
            factorial: evaluator.table().has_factorial(),
        })?,
        _ => output.result(&display)?,
    }

    Ok(())
}

fn select_evaluator(expression: &str, mode: FactorialMode) -> Evaluator {
    let factorial = match mode {
        FactorialMode::Auto => expression.contains(FACTORIAL_SYMBOL),
        FactorialMode::On => true,
        FactorialMode::Off => false,
    };

    if factorial {
        Evaluator::with_factorial()
    } else {
        Evaluator::standard()
    }
}

use std::fs;
use std::path::PathBuf;

use anyhow::{bail, Context};
use colored::Colorize;
use thiserror::Error;

use crate::config::QsimConfig;
use crate::core::computer::Computer;
use crate::core::diagnostics::{print_error, Span};
use crate::core::error::CoreError;
use crate::core::parser::{parse_line_with_diagnostics, ParserError};

/// Why a program stopped. Parse failures never touch the computer; an
/// execution failure may leave effects of the handlers that ran before it.
#[derive(Debug, Error)]
pub enum RunError {
    #[error("line {line}: parse error: {error}")]
    Parse { line: usize, text: String, error: ParserError },
    #[error("line {line}: execution error: {error}")]
    Execute { line: usize, text: String, error: CoreError },
}

pub fn main(input: PathBuf, cfg: &QsimConfig, json: bool) -> anyhow::Result<()> {
    let source = fs::read_to_string(&input)
        .with_context(|| format!("Read program {}", input.display()))?;
    let mut computer = Computer::with_default_handlers(cfg.side, cfg.registers, cfg.trace)
        .context("Create computer")?;
    let origin = input.display().to_string();

    match run_source(&origin, &source, &mut computer) {
        Ok(count) => log::info!("{}: executed {} instructions", origin, count),
        Err(err) => {
            report(&origin, &err);
            bail!("{} stopped at {}", origin, err);
        }
    }

    if json {
        println!("{}", serde_json::to_string_pretty(&computer.snapshot())?);
    } else {
        print!("{}", computer.status());
    }
    Ok(())
}

/// Executes every instruction line of `source`; blank lines and `#` comments
/// are skipped. Returns how many instructions ran.
pub fn run_source(origin: &str, source: &str, computer: &mut Computer) -> Result<usize, RunError> {
    let mut executed = 0;
    for (idx, text) in source.lines().enumerate() {
        let line = idx + 1;
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            continue;
        }
        let (parsed, diagnostics) = parse_line_with_diagnostics(text);
        for diag in &diagnostics {
            eprintln!("{} {}:{}: {}", "warn:".yellow().bold(), origin, line, diag);
        }
        let instruction = parsed.map_err(|error| RunError::Parse { line, text: text.to_string(), error })?;
        computer
            .execute(&instruction)
            .map_err(|error| RunError::Execute { line, text: text.to_string(), error })?;
        executed += 1;
    }
    Ok(executed)
}

fn report(origin: &str, err: &RunError) {
    match err {
        RunError::Parse { line, text, error } => {
            print_error(origin, text, &format!("Parsing error: {}", error.message), Span::single(*line, error.column));
        }
        RunError::Execute { line, text, error } => {
            eprintln!("{} {}:{}: {}", "execution error:".bright_red().bold(), origin, line, error);
            eprintln!("  {} {}", "|".dimmed(), text.trim());
        }
    }
}

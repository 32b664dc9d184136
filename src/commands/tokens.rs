use std::fs;
use std::path::PathBuf;

use anyhow::Context;
use colored::Colorize;

use crate::core::diagnostics::{print_error, Span};
use crate::core::lexer::Lexer;

pub fn main(input: PathBuf) -> anyhow::Result<()> {
    let source = fs::read_to_string(&input)
        .with_context(|| format!("Read {}", input.display()))?;
    let mut lexer = Lexer::new(&source);
    let tokens = lexer.tokenize();

    println!("=== Tokens ===");
    for token in &tokens {
        println!("{}", token);
    }

    let diagnostics = lexer.diagnostics();
    if !diagnostics.is_empty() {
        println!();
        eprintln!("{} {} lexer diagnostic(s)", "warn:".yellow().bold(), diagnostics.len());
        let origin = input.display().to_string();
        for diag in diagnostics {
            let (line, _) = diag.position();
            let text = source.lines().nth(line.saturating_sub(1)).unwrap_or_default();
            print_error(&origin, text, &diag.to_string(), Span::from(diag));
        }
    }
    Ok(())
}

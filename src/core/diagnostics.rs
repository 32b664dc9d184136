// src/core/diagnostics.rs
//! Colored `file:line:col` diagnostics with a caret under the offending column.

use colored::Colorize;

use crate::core::lexer::LexerError;
use crate::core::parser::ParserError;

pub struct Span {
    pub line: usize,
    pub col: usize,
    pub len: usize, // underline length (use 1 if unknown)
}

impl Span {
    pub fn single(line: usize, col: usize) -> Self {
        Self { line, col, len: 1 }
    }
}

impl From<&ParserError> for Span {
    fn from(e: &ParserError) -> Self {
        Span::single(e.line, e.column)
    }
}

impl From<&LexerError> for Span {
    fn from(e: &LexerError) -> Self {
        let (line, col) = e.position();
        Span::single(line, col)
    }
}

/// Renders the diagnostic; `line_text` is the source line the span points into.
pub fn render_error(origin: &str, line_text: &str, title: &str, span: &Span) -> String {
    let ln_str = format!("{:>4}", span.line);
    let gutter = " ".repeat(ln_str.len());
    let underline = " ".repeat(span.col.saturating_sub(1)) + &"^".repeat(span.len.max(1));
    format!(
        "{} {}\n{} {}\n{} {}\n{} {} {}\n{} {} {}\n",
        "error:".bright_red().bold(),
        title.bright_white(),
        "-->".bright_blue(),
        format!("{}:{}:{}", origin, span.line, span.col).bright_white(),
        gutter.dimmed(),
        "|".dimmed(),
        ln_str.dimmed(),
        "|".dimmed(),
        line_text,
        gutter.dimmed(),
        "|".dimmed(),
        underline.bright_red()
    )
}

pub fn print_error(origin: &str, line_text: &str, title: &str, span: Span) {
    eprintln!("{}", render_error(origin, line_text, title, &span));
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn caret_lands_under_column() {
        colored::control::set_override(false);
        let out = render_error("prog.qasm", "SELECT V1 R0 0", "Expected element count", &Span::single(7, 15));
        let caret_line = out.lines().last().unwrap();
        assert_eq!(caret_line.find('^'), Some("     | ".len() + 14));
        assert!(out.contains("prog.qasm:7:15"));
    }
}

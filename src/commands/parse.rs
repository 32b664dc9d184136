use anyhow::bail;

use crate::core::diagnostics::{print_error, Span};
use crate::core::parser::parse_line;

pub fn main(line: &str, json: bool) -> anyhow::Result<()> {
    match parse_line(line) {
        Ok(instruction) => {
            if json {
                println!("{}", serde_json::to_string_pretty(&instruction)?);
            } else {
                println!("{}", instruction);
            }
            Ok(())
        }
        Err(e) => {
            print_error("<line>", line, &format!("Parsing error: {}", e.message), Span::from(&e));
            bail!("invalid instruction");
        }
    }
}

use colored::Colorize;
use std::io::{self, Write};

use crate::config::QsimConfig;
use crate::core::computer::Computer;
use crate::core::parser::parse_line_with_diagnostics;

pub fn start(cfg: &QsimConfig) -> anyhow::Result<()> {
    let mut computer = Computer::with_default_handlers(cfg.side, cfg.registers, cfg.trace)?;
    banner(&computer);

    loop {
        print!("{} {} ", format!("⟦{}⟧", cfg.prompt).bold().cyan(), "›".yellow());
        io::stdout().flush().ok();

        let mut line = String::new();
        if io::stdin().read_line(&mut line)? == 0 {
            println!();
            break;
        }
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        match line {
            "help" | "?" => print_help(),
            "exit" | "quit" => break,
            "status" => print!("{}", computer.status()),
            "regs" => print!("{}", computer.register_info()),
            "vars" => {
                let vars = computer.variables_info();
                if vars.is_empty() {
                    println!("{}", "(no variables)".dimmed());
                } else {
                    print!("{}", vars);
                }
            }
            _ => execute_line(&mut computer, line),
        }
    }
    Ok(())
}

fn execute_line(computer: &mut Computer, line: &str) {
    let (parsed, diagnostics) = parse_line_with_diagnostics(line);
    for diag in &diagnostics {
        eprintln!("{} {}", "warn:".yellow().bold(), diag);
    }
    match parsed {
        Err(e) => eprintln!("{} {}", "parse error:".red().bold(), e),
        Ok(instruction) => match computer.execute(&instruction) {
            Ok(()) => println!("{} {}", "ok".green(), instruction),
            Err(e) => eprintln!("{} {}", "execution error:".bright_red().bold(), e),
        },
    }
}

fn banner(computer: &Computer) {
    println!(
        "{}  {}",
        format!("qsim: {} registers of {} qubits", computer.registers().len(), computer.size()).bold(),
        "type 'help' for commands".dimmed()
    );
}

fn print_help() {
    println!(
        "{}\n\
         {}\n  INITIALIZE R0 [0101...]   # zero or load a register\n  SELECT V1 R0 0 4          # copy cells into a variable\n  APPLY H R1 | MEASURE R0 x | X CONCAT A B | X TENSOR A B | X INVERSE M\n\
         {}\n  status                    # registers and variables\n  regs                      # registers only\n  vars                      # variables only\n  help                      # show this help\n  exit | quit               # leave the shell\n",
        "qsim: quantum assembler shell".bold().cyan(),
        "Instructions:".yellow(),
        "Shell:".yellow(),
    );
}

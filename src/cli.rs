use clap::{ArgAction, Parser, Subcommand};
use std::path::PathBuf;

use crate::config::QsimConfig;

#[derive(Debug, Parser)]
#[command(
    name = "qsim",
    about = "Quantum assembler simulator for .qasm programs",
    version,
    propagate_version = true,
    disable_help_subcommand = true
)]
pub struct QsimCli {
    /// Global: path to config (TOML); default: ~/.qsim/config.toml
    #[arg(long = "config", value_name = "FILE", global = true)]
    pub config: Option<PathBuf>,

    /// Global: number of registers (overrides config)
    #[arg(long = "registers", value_name = "N", global = true)]
    pub registers: Option<usize>,

    /// Global: register side length (overrides config)
    #[arg(long = "side", value_name = "S", global = true)]
    pub side: Option<usize>,

    /// Global: log every executed instruction
    #[arg(long = "trace", action = ArgAction::SetTrue, global = true)]
    pub trace: bool,

    /// Global: more log output (-v info, -vv debug, -vvv trace)
    #[arg(short = 'v', long = "verbose", action = ArgAction::Count, global = true)]
    pub verbose: u8,

    #[command(subcommand)]
    pub cmd: Option<Command>,
}

#[derive(Debug, Subcommand)]
pub enum Command {
    /// Interactive shell (default when no subcommand is given)
    Shell,

    /// Execute a program, one instruction per line
    ///
    /// Examples:
    ///   qsim run demo.qasm
    ///   qsim run demo.qasm --json
    Run {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
        /// Print the final state as JSON instead of the status dump
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },

    /// Print the token stream of a file
    Tokens {
        #[arg(value_name = "INPUT")]
        input: PathBuf,
    },

    /// Parse a single instruction and print it
    Parse {
        #[arg(value_name = "LINE")]
        line: String,
        /// Print the instruction as JSON
        #[arg(long = "json", action = ArgAction::SetTrue)]
        json: bool,
    },
}

impl QsimCli {
    /// Command-line flags win over the config file.
    pub fn apply_overrides(&self, mut cfg: QsimConfig) -> QsimConfig {
        if let Some(n) = self.registers {
            cfg.registers = n;
        }
        if let Some(s) = self.side {
            cfg.side = s;
        }
        if self.trace {
            cfg.trace = true;
        }
        cfg
    }

    pub fn log_filter(&self, cfg: &QsimConfig) -> String {
        match self.verbose {
            0 => cfg.log_level.clone(),
            1 => "info".to_string(),
            2 => "debug".to_string(),
            _ => "trace".to_string(),
        }
    }
}

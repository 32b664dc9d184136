use clap::Parser; // trait import enables QsimCli::parse()

use qsim::cli::{Command, QsimCli};
use qsim::config::{resolve_config_path, QsimConfig};
use qsim::{commands, shell};

fn init_logging(filter: &str) {
    // RUST_LOG wins over the computed default.
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(filter))
        .format_timestamp(None)
        .init();
}

fn main() -> anyhow::Result<()> {
    let args = QsimCli::parse();

    let cfg_path = resolve_config_path(&args.config);
    let cfg = args.apply_overrides(QsimConfig::load(cfg_path.as_deref())?);

    let mut filter = args.log_filter(&cfg);
    if cfg.trace && filter == "warn" {
        filter = "info".to_string();
    }
    init_logging(&filter);
    log::debug!("config {:?} from {:?}", cfg, cfg_path);

    match args.cmd {
        None | Some(Command::Shell) => shell::start(&cfg),
        Some(Command::Run { input, json }) => commands::run::main(input, &cfg, json),
        Some(Command::Tokens { input }) => commands::tokens::main(input),
        Some(Command::Parse { line, json }) => commands::parse::main(&line, json),
    }
}

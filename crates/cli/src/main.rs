//! `worksledger` command-line interface.
//!
//! Runs commands against an in-process ledger, either one-shot via `-c` or
//! interactively.
//!
//! ```bash
//! worksledger -c "initWork w1 blue 35 tom" -c "readWork w1"
//! worksledger --schema resume --caller User1@org1.example.com
//! ```

mod line;
mod repl;

use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::anyhow;
use clap::{value_parser, Arg, ArgAction, ArgMatches, Command};
use tracing_subscriber::EnvFilter;
use worksledger_executor::{Executor, ExecutorConfig, SchemaProfile};

fn cli() -> Command {
    Command::new("worksledger")
        .version(env!("CARGO_PKG_VERSION"))
        .about("Work-record ledger shell")
        .arg(
            Arg::new("config")
                .long("config")
                .value_name("FILE")
                .value_parser(value_parser!(PathBuf))
                .help("TOML configuration file"),
        )
        .arg(
            Arg::new("caller")
                .long("caller")
                .value_name("NAME")
                .help("Caller identity, e.g. User1@org1.example.com"),
        )
        .arg(
            Arg::new("schema")
                .long("schema")
                .value_name("SCHEMA")
                .value_parser(["marbles", "resume"])
                .help("Record schema"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .value_name("LEVEL")
                .help("Log filter when RUST_LOG is unset"),
        )
        .arg(
            Arg::new("command")
                .short('c')
                .long("command")
                .value_name("CMD")
                .action(ArgAction::Append)
                .help("Run a command and exit; repeatable"),
        )
}

/// Config file first, then flag overrides.
fn load_config(matches: &ArgMatches) -> anyhow::Result<ExecutorConfig> {
    let mut config = match matches.get_one::<PathBuf>("config") {
        Some(path) => ExecutorConfig::load(path)?,
        None => ExecutorConfig::default(),
    };
    if let Some(caller) = matches.get_one::<String>("caller") {
        config.caller = Some(caller.clone());
    }
    if let Some(schema) = matches.get_one::<String>("schema") {
        config.schema = schema
            .parse::<SchemaProfile>()
            .map_err(|e| anyhow!("{}", e))?;
    }
    if let Some(level) = matches.get_one::<String>("log-level") {
        config.log_level = level.clone();
    }
    Ok(config)
}

fn init_logging(config: &ExecutorConfig) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(config.log_level.as_str()));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn run() -> anyhow::Result<bool> {
    let matches = cli().get_matches();
    let config = load_config(&matches)?;
    init_logging(&config);

    let executor = Executor::in_memory(config).map_err(|e| anyhow!("{}", e))?;
    tracing::info!(schema = %executor.config().schema, "ledger opened");

    let commands: Vec<&String> = matches
        .get_many::<String>("command")
        .map(|values| values.collect())
        .unwrap_or_default();

    if commands.is_empty() {
        repl::run(&executor).map_err(|e| anyhow!("interactive session failed: {}", e))?;
        return Ok(true);
    }

    let mut all_ok = true;
    for command in commands {
        all_ok &= line::run_line(&executor, command, false);
    }
    Ok(all_ok)
}

fn main() -> ExitCode {
    match run() {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(e) => {
            eprintln!("error: {:#}", e);
            ExitCode::FAILURE
        }
    }
}

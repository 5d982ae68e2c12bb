//! Country registry CLI.

use std::io::{self, IsTerminal};

use anyhow::{Context, Result, anyhow};
use atlas_cli::logging::{LogConfig, LogFormat, init_logging};
use atlas_cli::settings::{DisplaySettings, Settings};
use atlas_ingest::Session;
use clap::{ColorChoice, Parser};
use tracing::level_filters::LevelFilter;
use tracing::{error, info};

mod cli;
mod commands;

use crate::cli::{Cli, Command, LogFormatArg, LogLevelArg};
use crate::commands::{
    run_add, run_config, run_filter, run_menu, run_search, run_sort, run_stats, run_update,
};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let exit_code = match run(cli) {
        Ok(()) => 0,
        Err(error) => {
            error!("{error:#}");
            eprintln!("{error}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run(cli: Cli) -> Result<()> {
    let settings = Settings::load(cli.config.as_deref());
    let mut display = settings.display;
    if let Some(style) = cli.style {
        display.style = style.into();
    }
    let command = cli.command.unwrap_or(Command::Menu);
    if let Command::Config { init } = command {
        return run_config(&settings, cli.config.as_deref(), init);
    }

    let data_path = settings.resolve_data_path(cli.data.as_deref());
    let mut session = Session::open(&data_path)
        .map_err(|error| anyhow!(error.user_message()))
        .with_context(|| format!("open {}", data_path.display()))?;
    info!(path = %data_path.display(), records = session.store().len(), "session opened");

    let (session, outcome) = match command {
        Command::Menu => run_menu(session, display),
        command => {
            let outcome = dispatch(command, &mut session, display);
            (session, outcome)
        }
    };
    let closed = session
        .close()
        .map_err(|error| anyhow!(error.user_message()));
    outcome.and(closed)
}

fn dispatch(command: Command, session: &mut Session, display: DisplaySettings) -> Result<()> {
    match command {
        Command::Add(args) => run_add(session, &args),
        Command::Update(args) => run_update(session, &args),
        Command::Search { pattern } => {
            run_search(session, pattern.as_deref().unwrap_or_default(), display)
        }
        Command::Filter(filter) => run_filter(session, &filter, display),
        Command::Sort(args) => run_sort(session, args.by, args.desc, display),
        Command::Stats { json } => run_stats(session, json, display),
        Command::Menu | Command::Config { .. } => Ok(()),
    }
}

/// Build logging configuration from CLI flags with consistent precedence.
fn log_config_from_cli(cli: &Cli) -> LogConfig {
    let mut config = LogConfig {
        level_filter: cli.verbosity.tracing_level_filter(),
        ..LogConfig::default()
    };
    config.use_env_filter = !(cli.verbosity.is_present() || cli.log_level.is_some());
    if let Some(level) = cli.log_level {
        config.level_filter = match level {
            LogLevelArg::Error => LevelFilter::ERROR,
            LogLevelArg::Warn => LevelFilter::WARN,
            LogLevelArg::Info => LevelFilter::INFO,
            LogLevelArg::Debug => LevelFilter::DEBUG,
            LogLevelArg::Trace => LevelFilter::TRACE,
        };
    }
    config.format = match cli.log_format {
        LogFormatArg::Pretty => LogFormat::Pretty,
        LogFormatArg::Compact => LogFormat::Compact,
        LogFormatArg::Json => LogFormat::Json,
    };
    config.log_file = cli.log_file.clone();
    config.with_ansi = match cli.color.color {
        ColorChoice::Always => true,
        ColorChoice::Never => false,
        ColorChoice::Auto => cli.log_file.is_none() && io::stderr().is_terminal(),
    };
    config
}

//! Library map builder CLI.

use std::io::{self, IsTerminal};

use anyhow::Result;
use clap::{ColorChoice, Parser};
use libmap_cli::config::{FileConfig, RunConfig, load_file_config};
use libmap_cli::logging::{LogConfig, LogFormat, init_logging};
use libmap_cli::pipeline::run_pipeline;
use libmap_output::default_column_map;
use tracing::level_filters::LevelFilter;

mod cli;
mod summary;

use crate::cli::{BuildArgs, Cli, ColumnsArgs, Command, LogFormatArg, LogLevelArg};
use crate::summary::{print_columns, print_summary};

fn main() {
    let cli = Cli::parse();
    cli.color.write_global();
    let log_config = log_config_from_cli(&cli);
    if let Err(error) = init_logging(&log_config) {
        eprintln!("error: failed to initialize logging: {error}");
        std::process::exit(1);
    }
    let result = match &cli.command {
        Command::Build(args) => run_build(args),
        Command::Columns(args) => run_columns(args),
    };
    let exit_code = match result {
        Ok(()) => 0,
        Err(error) => {
            eprintln!("error: {error:#}");
            1
        }
    };
    std::process::exit(exit_code);
}

fn run_build(args: &BuildArgs) -> Result<()> {
    let file = match &args.config {
        Some(path) => load_file_config(path)?,
        None => FileConfig::default(),
    };
    let config = RunConfig::resolve(file, args.overrides())?;
    let output = run_pipeline(&config, args.dry_run)?;
    print_summary(&output.summary);
    Ok(())
}

fn run_columns(args: &ColumnsArgs) -> Result<()> {
    let map = match &args.config {
        Some(path) => load_file_config(path)?
            .output
            .columns
            .unwrap_or_else(default_column_map),
        None => default_column_map(),
    };
    print_columns(&map);
    Ok(())
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

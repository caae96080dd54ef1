//! CLI argument definitions for the library map builder.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use libmap_cli::config::ConfigOverrides;
use libmap_model::GeoLevel;

#[derive(Parser)]
#[command(
    name = "libmap",
    version,
    about = "Link public library survey records to Census demographics",
    long_about = "Link public library survey records to Census demographics.\n\n\
                  Joins each library to income, race, ethnicity and age extracts by\n\
                  county (or tract) and ZIP, computes usage metrics and optional county\n\
                  election lean, and writes a compact {cols, rows} JSON document."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Command,

    /// Adjust log verbosity (-v for info, -vv for debug, -q for errors only).
    #[command(flatten)]
    pub verbosity: Verbosity<WarnLevel>,

    /// Control ANSI color output (auto, always, never).
    #[command(flatten)]
    pub color: Color,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

    /// Log output format (pretty for human, json for machine parsing).
    #[arg(
        long = "log-format",
        value_enum,
        default_value = "pretty",
        global = true
    )]
    pub log_format: LogFormatArg,

    /// Write logs to a file instead of stderr.
    #[arg(long = "log-file", value_name = "PATH", global = true)]
    pub log_file: Option<PathBuf>,
}

#[derive(Subcommand)]
pub enum Command {
    /// Load, link and project the sources into the output document.
    Build(BuildArgs),

    /// List the output columns and the frame columns they come from.
    Columns(ColumnsArgs),
}

#[derive(Parser)]
pub struct BuildArgs {
    /// TOML file with inputs and output settings; flags override it.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Public library survey CSV (outlet or administrative entity file).
    #[arg(long = "library", value_name = "CSV")]
    pub library: Option<PathBuf>,

    /// Median household income extracts (repeatable, one per geography).
    #[arg(long = "income", value_name = "CSV", num_args = 1..)]
    pub income: Vec<PathBuf>,

    /// Race extracts (repeatable).
    #[arg(long = "race", value_name = "CSV", num_args = 1..)]
    pub race: Vec<PathBuf>,

    /// Hispanic or Latino origin extracts (repeatable).
    #[arg(long = "ethnicity", value_name = "CSV", num_args = 1..)]
    pub ethnicity: Vec<PathBuf>,

    /// Age profile extracts (repeatable, optional).
    #[arg(long = "age", value_name = "CSV", num_args = 1..)]
    pub age: Vec<PathBuf>,

    /// County presidential returns CSV.
    #[arg(long = "election", value_name = "CSV")]
    pub election: Option<PathBuf>,

    /// Election year to aggregate.
    #[arg(long = "year", value_name = "YEAR")]
    pub year: Option<i64>,

    /// Geography tried first for city libraries.
    #[arg(long = "fine-geography", value_enum)]
    pub fine_geography: Option<FineGeographyArg>,

    /// Output JSON path.
    #[arg(long = "output", short = 'o', value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Run every stage and print the summary without writing output.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

impl BuildArgs {
    pub fn overrides(&self) -> ConfigOverrides {
        ConfigOverrides {
            library: self.library.clone(),
            income: self.income.clone(),
            race: self.race.clone(),
            ethnicity: self.ethnicity.clone(),
            age: self.age.clone(),
            election: self.election.clone(),
            year: self.year,
            output: self.output.clone(),
            fine_geography: self.fine_geography.map(GeoLevel::from),
        }
    }
}

#[derive(Parser)]
pub struct ColumnsArgs {
    /// Show the column map from this config file instead of the default.
    #[arg(long = "config", value_name = "FILE")]
    pub config: Option<PathBuf>,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum FineGeographyArg {
    County,
    Tract,
}

impl From<FineGeographyArg> for GeoLevel {
    fn from(value: FineGeographyArg) -> Self {
        match value {
            FineGeographyArg::County => GeoLevel::County,
            FineGeographyArg::Tract => GeoLevel::Tract,
        }
    }
}

/// CLI log level choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

/// CLI log format choices.
#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

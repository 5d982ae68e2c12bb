//! CLI argument definitions for the country registry.

use std::path::PathBuf;

use atlas_core::parse_nonnegative_integer;
use atlas_model::SortField;
use clap::{Args, Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;

use atlas_cli::settings::OutputStyle;

#[derive(Parser)]
#[command(
    name = "atlas",
    version,
    about = "Country registry backed by a CSV file",
    long_about = "Add, update, search, filter, sort and summarize country records \
                  stored in a CSV file.\n\n\
                  Without a subcommand the interactive menu is started."
)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// CSV data file (overrides the settings file).
    #[arg(long, value_name = "PATH", global = true)]
    pub data: Option<PathBuf>,

    /// Settings file to use instead of the platform default.
    #[arg(long, value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// How record lists are printed (overrides the settings file).
    #[arg(long, value_enum, global = true)]
    pub style: Option<StyleArg>,

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
    /// Start the interactive menu (the default).
    Menu,

    /// Add a country and save the data file.
    Add(AddArgs),

    /// Change the population and/or area of a country.
    Update(UpdateArgs),

    /// List countries whose name contains a pattern.
    Search {
        /// Case-insensitive substring; omit it to list everything.
        pattern: Option<String>,
    },

    /// List countries matching a continent or a numeric range.
    #[command(subcommand)]
    Filter(FilterCommand),

    /// List all countries in order.
    Sort(SortArgs),

    /// Show extrema, averages and counts per continent.
    Stats {
        /// Print the statistics as JSON.
        #[arg(long)]
        json: bool,
    },

    /// Show the effective settings.
    Config {
        /// Write the effective settings to the settings file.
        #[arg(long)]
        init: bool,
    },
}

#[derive(Args)]
pub struct AddArgs {
    pub name: String,
    /// Non-negative integer; `.` and `,` are accepted as group separators.
    pub population: String,
    /// Positive integer in km².
    pub area: String,
    pub continent: String,
}

#[derive(Args)]
pub struct UpdateArgs {
    pub name: String,
    #[arg(long)]
    pub population: Option<String>,
    #[arg(long)]
    pub area: Option<String>,
}

#[derive(Subcommand)]
pub enum FilterCommand {
    /// Countries on a continent (case-insensitive exact match).
    Continent { name: String },
    /// Countries whose population lies within the bounds.
    Population(RangeArgs),
    /// Countries whose area lies within the bounds.
    Area(RangeArgs),
}

#[derive(Args)]
pub struct RangeArgs {
    /// Inclusive lower bound.
    #[arg(long, value_parser = parse_bound)]
    pub min: Option<u64>,
    /// Inclusive upper bound.
    #[arg(long, value_parser = parse_bound)]
    pub max: Option<u64>,
}

#[derive(Args)]
pub struct SortArgs {
    /// Sort key: name, population or area (Spanish spellings accepted).
    #[arg(long, default_value = "name", value_parser = parse_sort_field)]
    pub by: SortField,
    /// Largest first.
    #[arg(long)]
    pub desc: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StyleArg {
    Lines,
    Table,
}

impl From<StyleArg> for OutputStyle {
    fn from(style: StyleArg) -> Self {
        match style {
            StyleArg::Lines => Self::Lines,
            StyleArg::Table => Self::Table,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

fn parse_bound(value: &str) -> Result<u64, String> {
    parse_nonnegative_integer(value)
        .ok_or_else(|| format!("'{value}' is not a non-negative integer"))
}

fn parse_sort_field(value: &str) -> Result<SortField, String> {
    Ok(SortField::parse_lenient(value))
}

//! Command line arguments for `drais-import`.

use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use clap_verbosity_flag::{Verbosity, WarnLevel};
use colorchoice_clap::Color;
use roster_cli::bindings::parse_field_binding;
use roster_model::FieldKey;

#[derive(Parser)]
#[command(
    name = "drais-import",
    version,
    about = "Import a student roster spreadsheet",
    long_about = "Import a student roster from .xlsx, .xls or .csv.\n\n\
                  Columns are matched to the student fields, every row is \
                  validated, and valid rosters are committed in batches."
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

    /// Settings file (defaults to $DRAIS_IMPORT_CONFIG, then built-in values).
    #[arg(long = "config", value_name = "PATH", global = true)]
    pub config: Option<PathBuf>,

    /// Explicit log level (overrides -v/-q flags).
    #[arg(long = "log-level", value_enum, global = true)]
    pub log_level: Option<LogLevelArg>,

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

    /// Include student names and phone numbers in log output.
    #[arg(long = "log-data", global = true)]
    pub log_data: bool,
}

#[derive(Subcommand)]
pub enum Command {
    /// List the student fields and the column names recognised for each.
    Fields,

    /// Write an empty roster template (.csv or .xlsx).
    Template(TemplateArgs),

    /// Map, validate and commit a roster file.
    Import(ImportArgs),
}

#[derive(Parser)]
pub struct TemplateArgs {
    #[arg(value_name = "PATH")]
    pub path: PathBuf,
}

#[derive(Parser)]
pub struct ImportArgs {
    /// Roster file (.xlsx, .xls or .csv).
    #[arg(value_name = "FILE")]
    pub file: PathBuf,

    /// Bind a field to a column, overriding the suggestion. Repeatable.
    #[arg(long = "map", value_name = "FIELD=COLUMN", value_parser = parse_field_binding)]
    pub map: Vec<(FieldKey, String)>,

    /// Class codes that exist for this school (comma separated).
    #[arg(long = "classes", value_name = "CODES", value_delimiter = ',')]
    pub classes: Vec<String>,

    /// Write imported students to this CSV file.
    #[arg(long = "output", value_name = "PATH")]
    pub output: Option<PathBuf>,

    /// Map and validate only; commit nothing.
    #[arg(long = "dry-run")]
    pub dry_run: bool,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogLevelArg {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

#[derive(Clone, Copy, ValueEnum)]
pub enum LogFormatArg {
    Pretty,
    Compact,
    Json,
}

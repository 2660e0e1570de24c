//! CLI argument parsing using clap derive API
//!
//! Purely declarative: no side effects or I/O happen here.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand, ValueEnum};

/// callaudit -- finds inbound and outbound integration points in Apex sources.
///
/// Use `callaudit <COMMAND> --help` for subcommand details.
#[derive(Parser, Debug)]
#[command(name = "callaudit", version, about, long_about = None)]
pub struct Cli {
    /// Path to the callaudit.toml configuration file (missing file = defaults).
    #[arg(short, long, global = true, default_value = "callaudit.toml")]
    pub config: PathBuf,

    /// Override log level (trace, debug, info, warn, error).
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Output format.
    #[arg(long, global = true, default_value = "text")]
    pub output: OutputFormat,

    #[command(subcommand)]
    pub command: Commands,
}

/// Supported output formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    /// Human-readable table / text output.
    Text,
    /// Machine-readable JSON.
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Scan a project for call-ins and call-outs.
    Audit(AuditArgs),

    /// Inspect or validate catcher definitions.
    Catchers(CatchersArgs),

    /// Manage configuration.
    Config(ConfigArgs),
}

impl Commands {
    /// Log level implied by command flags, if any.
    ///
    /// `--debug` wins over `--verbose`.
    pub fn log_level_hint(&self) -> Option<&'static str> {
        match self {
            Commands::Audit(args) if args.debug => Some("trace"),
            Commands::Audit(args) if args.verbose => Some("debug"),
            _ => None,
        }
    }
}

// ---- audit ----

#[derive(Args, Debug)]
pub struct AuditArgs {
    /// Project root to scan (overrides scan.root).
    #[arg(short, long)]
    pub project: Option<PathBuf>,

    /// Verbose logging (debug level).
    #[arg(short, long)]
    pub verbose: bool,

    /// Trace logging.
    #[arg(long)]
    pub debug: bool,

    /// Catcher definition file (overrides scan.catchers_path).
    #[arg(long)]
    pub catchers: Option<PathBuf>,

    /// Report output directory (overrides report.output_dir).
    #[arg(long)]
    pub report_dir: Option<PathBuf>,

    /// Report file format; repeat for several (csv, json).
    #[arg(long = "format")]
    pub formats: Vec<String>,

    /// Print results only; do not write report files.
    #[arg(long)]
    pub no_export: bool,
}

// ---- catchers ----

#[derive(Args, Debug)]
pub struct CatchersArgs {
    #[command(subcommand)]
    pub action: CatchersAction,
}

#[derive(Subcommand, Debug)]
pub enum CatchersAction {
    /// List the effective catcher set.
    List {
        /// Catcher definition file (default: scan.catchers_path or built-in set).
        #[arg(long)]
        catchers: Option<PathBuf>,
    },
    /// Compile a catcher definition file and report errors.
    Validate {
        /// Path to the catcher TOML file.
        path: PathBuf,
    },
}

// ---- config ----

#[derive(Args, Debug)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub action: ConfigAction,
}

#[derive(Subcommand, Debug)]
pub enum ConfigAction {
    /// Validate the configuration file.
    Validate,
    /// Show the effective configuration.
    Show {
        /// Show only a specific section (general, scan, report).
        #[arg(long)]
        section: Option<String>,
    },
}

use clap::{Args as ClapArgs, Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

/// Command line arguments for BaseCmd
#[derive(Parser, Debug)]
#[command(
    name = "basecmd",
    version = env!("CARGO_PKG_VERSION"),
    about = "Console commands with built-in console and file logging",
    long_about = "Runs console commands that each get their own logger, writing to the console and to a per-command log file with configurable line formats."
)]
pub struct Args {
    /// Enable verbose diagnostics
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Suppress diagnostics
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<String>,

    /// Output format
    #[arg(short, long, value_enum, default_value = "text", global = true)]
    pub output: OutputFormat,

    #[command(flatten)]
    pub logging: LoggingArgs,

    /// Command to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Per-run overrides of the command logging settings
#[derive(ClapArgs, Debug, Default, Clone)]
pub struct LoggingArgs {
    /// Directory log files are written to
    #[arg(long, global = true)]
    pub log_dir: Option<PathBuf>,

    /// Explicit log filename instead of the derived one
    #[arg(long, global = true)]
    pub log_file: Option<String>,

    /// Extension appended to derived log filenames
    #[arg(long, global = true)]
    pub log_extension: Option<String>,

    /// Minimum severity written by the command logger
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    /// Disable logging to the console
    #[arg(long, global = true)]
    pub no_console_log: bool,

    /// Disable logging to a file
    #[arg(long, global = true)]
    pub no_file_log: bool,

    /// Console line format ("default" for the library format)
    #[arg(long, global = true)]
    pub console_format: Option<String>,

    /// File line format ("default" for the library format)
    #[arg(long, global = true)]
    pub file_format: Option<String>,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Greet someone and log it
    Hello {
        /// Who to greet
        #[arg(default_value = "World")]
        name: String,
    },
    /// Write a message through the command logger
    Log {
        /// Message to log
        message: String,
        /// Severity of the message
        #[arg(short, long, default_value = "warning")]
        level: String,
    },
    /// Configuration management commands
    Config(ConfigArgs),
    /// Display version information
    Version,
}

/// Output format options
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq)]
pub enum OutputFormat {
    /// Human-readable text output
    Text,
    /// JSON output
    Json,
    /// TOML output
    Toml,
}

/// Configuration management arguments
#[derive(ClapArgs, Debug)]
pub struct ConfigArgs {
    /// Configuration subcommand
    #[command(subcommand)]
    pub command: ConfigCommand,
}

/// Configuration subcommands
#[derive(Subcommand, Debug)]
pub enum ConfigCommand {
    /// Show current configuration
    Show,
    /// Validate configuration
    Validate {
        /// Configuration file path
        file: Option<String>,
    },
    /// Create default configuration
    Init {
        /// Project directory to create `.basecmd/config.toml` in
        #[arg(short = 'd', long)]
        dir: Option<String>,
        /// Global configuration
        #[arg(short, long)]
        global: bool,
    },
    /// Print configuration file locations
    Path,
}

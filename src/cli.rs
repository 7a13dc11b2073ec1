//! Command-line configuration

use std::path::PathBuf;

use clap::{Args, Parser};

/// Log output format.
#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub(crate) enum LogFormat {
    /// Compact, human-readable logs.
    Compact,

    /// Structured JSON logs.
    Json,
}

/// Logging settings.
#[derive(Debug, Args)]
pub(crate) struct LoggingConfig {
    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, env = "RUST_LOG", default_value = "warn")]
    pub(crate) log_level: String,

    /// Log format (compact, json)
    #[arg(long, env = "LOG_FORMAT", value_enum, default_value_t = LogFormat::Compact)]
    pub(crate) log_format: LogFormat,
}

/// Plan how to cut stock boards into courses for a wall.
#[derive(Debug, Parser)]
#[command(name = "wallboards", version, about, long_about = None)]
pub(crate) struct Cli {
    /// Wall configuration file (YAML)
    #[arg(
        short,
        long,
        env = "WALLBOARDS_CONFIG",
        default_value = "fixtures/walls/default.yml"
    )]
    pub(crate) config: PathBuf,

    /// Number of courses to pack instead of wall height / board width
    #[arg(long)]
    pub(crate) courses: Option<usize>,

    /// Logging output settings.
    #[command(flatten)]
    pub(crate) logging: LoggingConfig,
}

//! CLI command and subcommand definitions

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Go-link redirector CLI
#[derive(Parser, Debug)]
#[command(name = "golinks")]
#[command(version, about = "Go-link redirector", long_about = None)]
pub struct Cli {
    /// Settings file path (falls back to $GOLINKS_SETTINGS, then
    /// ~/.config/golinks/settings.toml)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Clone, clap::ValueEnum)]
pub enum OutputFormat {
    /// Human-readable output
    Table,
    /// JSON output
    Json,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Show the configuration state
    Status,

    /// Validate and save the base URL
    Set {
        /// Absolute base URL that go-links expand against
        url: String,
    },

    /// Keyword entry: expand text against the base URL and navigate
    Open {
        /// Text typed after the keyword trigger
        text: String,
    },

    /// Action-icon click: opens the options surface
    Click,

    /// Evaluate the installed redirect rule against a request URL
    Resolve {
        /// Request URL, e.g. http://go/eng/wiki
        url: String,
    },

    /// List installed dynamic redirect rules
    Rules {
        /// Output format
        #[arg(short, long, value_enum, default_value = "table")]
        format: OutputFormat,
    },

    /// Follow the settings store and keep the redirect rule reconciled
    Watch,

    /// Generate shell completion scripts
    Completion {
        /// Shell to generate completions for
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

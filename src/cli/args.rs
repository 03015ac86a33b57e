//! Command line argument parsing for the Screenrack CLI using clap.

use std::net::SocketAddr;
use std::path::PathBuf;

use clap::{Parser, Subcommand, ValueEnum};
use serde::{Deserialize, Serialize};

use crate::config::ScreenrackConfig;
use crate::error::Result;

/// Screenrack - hybrid semantic and OCR keyword search over screenshots
#[derive(Parser, Debug, Clone)]
#[command(name = "screenrack")]
#[command(about = "Hybrid semantic and OCR keyword search over a folder of screenshots")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct ScreenrackArgs {
    /// Increase log verbosity (-v info, -vv debug)
    #[arg(short, long, action = clap::ArgAction::Count, global = true)]
    pub verbose: u8,

    /// Only log errors (overrides verbose)
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Output format
    #[arg(short = 'f', long = "format", default_value = "human", global = true)]
    pub output_format: OutputFormat,

    /// Pretty-print JSON output
    #[arg(long, global = true)]
    pub pretty: bool,

    /// Configuration file (JSON)
    #[arg(short, long, env = "SCREENRACK_CONFIG", global = true)]
    pub config: Option<PathBuf>,

    /// Directory holding the screenshots
    #[arg(long, env = "SCREENRACK_SCREENSHOTS_DIR", global = true)]
    pub screenshots_dir: Option<PathBuf>,

    /// Corpus snapshot file
    #[arg(long, env = "SCREENRACK_STORE_PATH", global = true)]
    pub store_path: Option<PathBuf>,

    /// Base URL of the embedding service
    #[arg(long, env = "SCREENRACK_EMBEDDER_URL", global = true)]
    pub embedder_url: Option<String>,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

impl ScreenrackArgs {
    /// Get the effective verbosity level
    pub fn verbosity(&self) -> u8 {
        if self.quiet {
            0
        } else {
            self.verbose.saturating_add(1)
        }
    }

    /// Load the configuration file, then apply flag and environment overrides.
    pub fn load_config(&self) -> Result<ScreenrackConfig> {
        let mut config = ScreenrackConfig::load(self.config.as_deref())?;
        if let Some(dir) = &self.screenshots_dir {
            config.paths.screenshots_dir = dir.clone();
        }
        if let Some(path) = &self.store_path {
            config.paths.store_path = path.clone();
        }
        if let Some(url) = &self.embedder_url {
            config.embedder.base_url = url.clone();
        }
        if let Command::Serve(serve) = &self.command
            && let Some(bind) = serve.bind
        {
            config.server.bind = bind;
        }
        config.validate()?;
        Ok(config)
    }
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Run the HTTP query service
    Serve(ServeArgs),

    /// Index new screenshots
    Index(IndexArgs),

    /// Run a hybrid search from the command line
    Search(SearchArgs),

    /// Show the number of indexed screenshots
    Count,
}

/// Arguments for the query service
#[derive(Parser, Debug, Clone)]
pub struct ServeArgs {
    /// Address to listen on
    #[arg(short, long, env = "SCREENRACK_BIND")]
    pub bind: Option<SocketAddr>,

    /// Start even if the embedding service does not answer its health probe
    #[arg(long)]
    pub skip_health_check: bool,
}

/// Arguments for indexing
#[derive(Parser, Debug, Clone)]
pub struct IndexArgs {
    /// Directory to scan (defaults to the configured screenshots directory)
    #[arg(value_name = "DIR")]
    pub dir: Option<PathBuf>,
}

/// Arguments for searching
#[derive(Parser, Debug, Clone)]
pub struct SearchArgs {
    /// Query string
    #[arg(value_name = "QUERY")]
    pub query: String,

    /// Maximum number of results to return
    #[arg(short, long)]
    pub limit: Option<usize>,
}

/// Output formats for CLI
#[derive(ValueEnum, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Human-readable format
    Human,
    /// JSON format
    Json,
}

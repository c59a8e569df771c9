//! CLI commands and argument parsing

use clap::{Parser, Subcommand};
use std::path::PathBuf;

/// Paginated table CLI
#[derive(Parser, Debug)]
#[command(name = "paged-table")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Configuration file (YAML)
    #[arg(short = 'C', long, global = true)]
    pub config: Option<PathBuf>,

    /// Output format
    #[arg(short, long, global = true, default_value = "pretty")]
    pub format: OutputFormat,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// CLI subcommands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the mock query endpoint
    Serve {
        /// Port to listen on (overrides config)
        #[arg(short, long)]
        port: Option<u16>,

        /// Number of generated rows (overrides config)
        #[arg(long)]
        rows: Option<usize>,

        /// Artificial response delay in milliseconds (overrides config)
        #[arg(long)]
        latency_ms: Option<u64>,
    },

    /// Fetch one page through the table controller
    Query {
        /// Initial location query string, e.g. "page=2&filters[status]=active"
        #[arg(long, default_value = "")]
        url: String,

        /// Endpoint base URL (overrides config)
        #[arg(long)]
        base_url: Option<String>,

        /// Go to page
        #[arg(long)]
        page: Option<u32>,

        /// Page size
        #[arg(long)]
        page_size: Option<u32>,

        /// Search term
        #[arg(short, long)]
        q: Option<String>,

        /// Sort as key:asc or key:desc
        #[arg(long)]
        sort: Option<String>,

        /// Filter as name=value (repeatable)
        #[arg(long = "filter")]
        filters: Vec<String>,

        /// Drop filters carried by --url before applying --filter
        #[arg(long)]
        clear_filters: bool,
    },

    /// Print a compacted pager
    Pager {
        /// Current page
        #[arg(long, default_value = "1")]
        current: u32,

        /// Total number of pages
        #[arg(long)]
        total: u32,

        /// Most buttons shown before compacting (overrides config)
        #[arg(long)]
        max: Option<usize>,
    },
}

/// Output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum OutputFormat {
    /// JSON output
    Json,
    /// Human-readable output
    Pretty,
}

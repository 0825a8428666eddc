//! CLI type definitions: command enums and argument structs.

use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};

#[derive(Parser)]
#[command(name = "gcd-talker")]
#[command(about = "Look up comic metadata in a local Grand Comics Database dump", long_about = None)]
pub(crate) struct Cli {
    /// Path to the GCD SQLite dump (overrides GCD_TALKER_DB and the settings file)
    #[arg(long, global = true)]
    pub db: Option<PathBuf>,

    /// Only show warnings and errors (suppress normal output)
    #[arg(long, global = true)]
    pub quiet: bool,

    /// Enable verbose/debug logging (timestamps + debug-level messages)
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Write log output to a file (ANSI codes stripped)
    #[arg(long, global = true)]
    pub logfile: Option<PathBuf>,

    /// Print results as JSON instead of formatted text
    #[arg(long, global = true)]
    pub json: bool,

    /// Bypass the result cache
    #[arg(long, global = true)]
    pub no_cache: bool,

    /// Fetch cover URLs from comics.org for this run
    #[arg(long, global = true)]
    pub covers: bool,

    #[command(subcommand)]
    pub command: Commands,
}

/// Series selection for issue lookups.
#[derive(Args, Clone)]
pub(crate) struct IssueTarget {
    /// GCD issue ID
    #[arg(long, conflicts_with_all = ["series_id", "number"])]
    pub issue_id: Option<String>,

    /// GCD series ID (with --number)
    #[arg(long, requires = "number")]
    pub series_id: Option<String>,

    /// Issue number within the series (with --series-id)
    #[arg(long, requires = "series_id")]
    pub number: Option<String>,
}

#[derive(Subcommand)]
pub(crate) enum Commands {
    /// Test access to the GCD database
    Status {
        /// Database file to test instead of the configured one
        path: Option<PathBuf>,
    },

    /// Search series by name, best matches first
    Search {
        /// Series name
        name: String,

        /// Only series running in this year
        #[arg(short, long)]
        year: Option<i32>,

        /// Only series containing this issue number
        #[arg(short, long)]
        issue: Option<String>,

        /// Exact, case-sensitive name match
        #[arg(long)]
        literal: bool,
    },

    /// Show one series
    Series {
        /// GCD series ID
        series_id: String,
    },

    /// List every issue of a series
    Issues {
        /// GCD series ID
        series_id: String,
    },

    /// Show full metadata for one issue
    Issue {
        #[command(flatten)]
        target: IssueTarget,
    },

    /// Find an issue number across candidate series (auto-tag matching)
    Match {
        /// Candidate series IDs (e.g., 123,456)
        #[arg(value_delimiter = ',', required = true)]
        series_ids: Vec<String>,

        /// Issue number to match
        #[arg(short, long)]
        number: String,

        /// Only issues with a key date in this year
        #[arg(short, long)]
        year: Option<i32>,
    },

    /// Answer one JSON request (argument or stdin) with a JSON response
    Request {
        /// Request JSON; read from stdin when omitted
        json: Option<String>,
    },

    /// Manage talker settings
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Manage the result cache
    Cache {
        #[command(subcommand)]
        action: CacheAction,
    },

    /// Show information about the data source
    Info,
}

#[derive(Subcommand)]
pub(crate) enum ConfigAction {
    /// Show the effective settings and where the database path comes from
    Show,

    /// Print the settings file path
    Path,

    /// Set one setting in the settings file
    Set {
        /// Setting name (e.g., db_file, nn_is_issue_one, currency)
        key: String,

        /// New value (empty to clear db_file)
        value: String,
    },
}

#[derive(Subcommand)]
pub(crate) enum CacheAction {
    /// Print the cache location and entry counts
    Path,

    /// Remove every cached entry
    Clear,
}

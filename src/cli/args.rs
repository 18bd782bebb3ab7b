//! Command line argument parsing for the Glossa CLI using clap.

use clap::{Args, Parser, Subcommand};

/// Glossa - multilingual query expansion and stem filtering
#[derive(Parser, Debug, Clone)]
#[command(name = "glossa")]
#[command(about = "Multilingual query expansion and stem filtering for search queries")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(long_about = None)]
pub struct GlossaArgs {
    /// Verbosity level (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Pretty-print JSON output
    #[arg(long)]
    pub pretty: bool,

    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Command,
}

/// Available CLI commands
#[derive(Subcommand, Debug, Clone)]
pub enum Command {
    /// Expand a query through the translation service
    Expand(ExpandArgs),

    /// Remove stems from an expanded query tree
    Filter(FilterArgs),
}

/// Arguments for query expansion
#[derive(Args, Debug, Clone)]
pub struct ExpandArgs {
    /// Query text to expand
    pub query: String,

    /// Base URL of the translation service
    #[arg(
        long,
        env = "GLOSSA_TRANSLATOR_URL",
        default_value = "http://translator:5000"
    )]
    pub translator_url: String,

    /// Indexed field the query clause targets
    #[arg(long, default_value = "default")]
    pub field: String,

    /// Restrict expansion to a single language code
    #[arg(long)]
    pub language: Option<String>,

    /// Add synonym equivalence classes
    #[arg(long)]
    pub synonyms: bool,

    /// Translation request timeout in seconds
    #[arg(long, default_value_t = 10)]
    pub timeout: u64,
}

/// Arguments for stem filtering
#[derive(Args, Debug, Clone)]
pub struct FilterArgs {
    /// File holding the query tree as JSON, or "-" for stdin
    pub tree: String,

    /// Stem filter rules as a JSON array, e.g.
    /// '[{"language":"fr","stems":["chaussur"]}]'
    #[arg(long)]
    pub filters: String,
}

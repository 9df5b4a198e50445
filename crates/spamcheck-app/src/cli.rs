use clap::{Parser, Subcommand, ValueEnum};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "spamcheck")]
#[command(author, version, about = "Email spam detector with an interactive web UI")]
#[command(propagate_version = true)]
pub struct Cli {
    /// Configuration file path
    #[arg(short, long, default_value = "spamcheck.yaml", global = true)]
    pub config: String,

    /// Model artifact path
    #[arg(long, env = "SPAMCHECK_MODEL", global = true)]
    pub model: Option<PathBuf>,

    /// Vectorizer artifact path
    #[arg(long, env = "SPAMCHECK_VECTORIZER", global = true)]
    pub vectorizer: Option<PathBuf>,

    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Start the web UI
    Serve {
        /// Listen port
        #[arg(short, long)]
        port: Option<u16>,

        /// Listen address
        #[arg(short, long)]
        address: Option<String>,
    },

    /// Classify one email from the argument or stdin
    Predict {
        /// Email text (read from stdin when omitted)
        text: Option<String>,

        /// Output format
        #[arg(short, long, value_enum, default_value_t = OutputFormat::Text)]
        format: OutputFormat,
    },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}

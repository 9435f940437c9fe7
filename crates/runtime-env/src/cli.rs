//! CLI argument definitions.

use clap::{Parser, Subcommand};

use domain::EnvKey;

/// Inspect the runtime environment served by the backend
#[derive(Parser, Debug)]
#[command(name = "runtime-env")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    pub verbose: bool,

    /// Backend base URL (empty for same-origin)
    #[arg(long, global = true, env = "RUNTIME_ENV_BACKEND_URL")]
    pub backend_url: Option<String>,

    /// Origin used for same-origin requests
    #[arg(long, global = true, env = "RUNTIME_ENV_ORIGIN")]
    pub origin: Option<String>,

    #[command(subcommand)]
    pub command: Commands,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Fetch and print every known key
    Show(ShowArgs),

    /// Fetch and print a single key
    Get(GetArgs),

    /// List known key names
    Keys,
}

/// Arguments for the show command
#[derive(Parser, Debug)]
pub struct ShowArgs {
    /// Print the mapping as JSON
    #[arg(long)]
    pub json: bool,

    /// Print secret values instead of masking them
    #[arg(long)]
    pub reveal: bool,
}

/// Arguments for the get command
#[derive(Parser, Debug)]
pub struct GetArgs {
    /// Key name (e.g., "VITE_AWS_REGION")
    pub key: EnvKey,
}

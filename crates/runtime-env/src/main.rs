//! Runtime environment inspector - CLI entry point.

use clap::Parser;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use common::AppResult;
use runtime_env::{
    cli::{Cli, Commands},
    commands, RuntimeEnvCache, RuntimeEnvConfig,
};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Initialize tracing (verbose mode sets debug level)
    init_tracing(cli.verbose);

    let mut config = RuntimeEnvConfig::from_env();
    if let Some(backend_url) = cli.backend_url {
        config.http.base_url = backend_url;
    }
    if let Some(origin) = cli.origin {
        config.http.origin = Some(origin);
    }
    tracing::debug!("Configuration loaded: {:?}", config);

    let result = run(cli.command, config).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {}", e.user_message());
        std::process::exit(1);
    }
}

/// Dispatch a command
async fn run(command: Commands, config: RuntimeEnvConfig) -> AppResult<()> {
    match command {
        Commands::Show(args) => {
            let cache = RuntimeEnvCache::from_config(&config)?;
            commands::show::execute(args, &cache).await
        }
        Commands::Get(args) => {
            let cache = RuntimeEnvCache::from_config(&config)?;
            commands::get::execute(args, &cache).await
        }
        Commands::Keys => {
            commands::keys::execute();
            Ok(())
        }
    }
}

/// Initialize tracing subscriber
fn init_tracing(verbose: bool) {
    let filter = if verbose {
        "debug".to_string()
    } else {
        std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string())
    };

    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(tracing_subscriber::EnvFilter::new(filter))
        .init();
}

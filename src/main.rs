use std::sync::Arc;

use clap::Parser;
use tracing::{debug, error};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use askdiary::{
    cli::{execute_command, AppContext, Cli},
    clock::SystemClock,
    config::{Config, LogFormat},
    provider::ProviderClient,
    storage::SqliteStore,
    templates::TemplateCatalog,
};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Load configuration
    let config = match Config::from_env() {
        Ok(c) => c,
        Err(e) => {
            eprintln!("Configuration error: {}", e);
            std::process::exit(1);
        }
    };

    // Initialize logging
    init_logging(&config);

    debug!(version = env!("CARGO_PKG_VERSION"), "AskDiary starting");

    // Initialize storage
    let store = match SqliteStore::new(&config.database).await {
        Ok(s) => {
            debug!(path = %config.database.path.display(), "Database initialized");
            s
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize database");
            return Err(e.into());
        }
    };

    // Initialize provider client
    let provider = match ProviderClient::new(&config.provider, config.request.clone()) {
        Ok(c) => {
            debug!(base_url = %config.provider.base_url, "Provider client initialized");
            c
        }
        Err(e) => {
            error!(error = %e, "Failed to initialize provider client");
            return Err(e.into());
        }
    };

    let ctx = AppContext {
        config,
        store: Arc::new(store),
        catalog: TemplateCatalog::builtin(),
        generator: Arc::new(provider),
        clock: Arc::new(SystemClock),
    };

    let result = execute_command(cli.command, &ctx).await;
    if result.exit_code != 0 {
        eprintln!("{}", result.message);
        std::process::exit(result.exit_code);
    }

    println!("{}", result.message);
    Ok(())
}

/// Initialize tracing/logging
fn init_logging(config: &Config) {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.logging.level));

    match config.logging.format {
        LogFormat::Json => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().json().with_writer(std::io::stderr))
                .init();
        }
        LogFormat::Pretty => {
            tracing_subscriber::registry()
                .with(env_filter)
                .with(fmt::layer().with_writer(std::io::stderr))
                .init();
        }
    }
}

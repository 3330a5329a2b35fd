//! Vantage - AI shopping search in the terminal
//!
//! Describe a product, get direct product pages with prices, and keep the
//! good ones in a per-user cart.

use std::sync::Arc;

use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};
use vantage_net::{Dispatcher, GeminiClient};

mod commands;
mod config;
mod render;
mod shell;
mod state;
mod viewmodel;

fn main() {
    // Logs go to stderr so they don't interleave with the screen
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")))
        .init();

    tracing::info!("Starting Vantage");

    let config = match config::AppConfig::load() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!("Failed to load configuration: {}", e);
            std::process::exit(1);
        }
    };

    let data_dir = match config.data_dir() {
        Ok(dir) => dir,
        Err(e) => {
            tracing::error!("Failed to resolve data directory: {}", e);
            std::process::exit(1);
        }
    };

    let app_state = match state::AppState::open(&data_dir) {
        Ok(state) => state,
        Err(e) => {
            tracing::error!("Failed to initialize application: {}", e);
            std::process::exit(1);
        }
    };
    tracing::info!(data_dir = %app_state.data_dir().display(), "Database opened");

    let runtime = match tokio::runtime::Runtime::new() {
        Ok(runtime) => runtime,
        Err(e) => {
            tracing::error!("Failed to create tokio runtime: {}", e);
            std::process::exit(1);
        }
    };

    let dispatcher = match config.gemini_config().map(GeminiClient::new) {
        Some(Ok(client)) => Some(Arc::new(Dispatcher::new(client))),
        Some(Err(e)) => {
            tracing::error!("Failed to create Gemini client: {}", e);
            None
        }
        None => {
            tracing::warn!(
                "{} is not set; searches will fail until it is configured",
                config::API_KEY_ENV
            );
            None
        }
    };

    let (mut shell, outcomes) =
        shell::Shell::new(&app_state.accounts, dispatcher, config.favicon_size);

    let stdin = tokio::io::BufReader::new(tokio::io::stdin());
    let outcome = runtime.block_on(shell.run(stdin, outcomes));
    // The stdin reader blocks on a pool thread until the next line arrives
    runtime.shutdown_background();

    if let Err(e) = outcome {
        tracing::error!("Terminal input failed: {}", e);
        std::process::exit(1);
    }
}

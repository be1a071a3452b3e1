mod catalog;
mod config;
mod routes;
mod services;
mod state;

use std::net::SocketAddr;
use std::process::ExitCode;

use tracing_subscriber::EnvFilter;

use crate::config::ServerConfig;
use crate::services::board::Board;

#[tokio::main]
async fn main() -> ExitCode {
    // A missing .env is the normal case outside local development.
    if let Err(e) = dotenvy::dotenv() {
        if !e.not_found() {
            eprintln!("failed to load .env: {e}");
        }
    }

    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .init();

    let config = match ServerConfig::from_env() {
        Ok(config) => config,
        Err(e) => {
            tracing::error!(error = %e, "invalid configuration");
            return ExitCode::FAILURE;
        }
    };

    let words = match catalog::load(config.words_file.as_deref()) {
        Ok(words) => words,
        Err(e) => {
            tracing::error!(error = %e, "failed to load word catalog");
            return ExitCode::FAILURE;
        }
    };
    let board = Board::new(words, config.board);
    let dimensions = board.dimensions();
    tracing::info!(
        words = board.words().len(),
        placed = board.placed_count(),
        width = dimensions.width,
        height = dimensions.height,
        padding = dimensions.padding,
        "board initialized"
    );

    let state = state::AppState::new(board, config.client_channel_capacity);
    let app = routes::app(state);

    let addr = SocketAddr::new(config.bind_addr, config.port);
    let listener = match tokio::net::TcpListener::bind(addr).await {
        Ok(listener) => listener,
        Err(e) => {
            tracing::error!(%addr, error = %e, "failed to bind");
            return ExitCode::FAILURE;
        }
    };

    tracing::info!(%addr, "magnets listening");
    if let Err(e) = axum::serve(listener, app).await {
        tracing::error!(error = %e, "server failed");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

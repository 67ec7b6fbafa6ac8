//! Binary entrypoint for the music shop HTTP server.
//!
//! Reads configuration from environment variables (see [`ServerConfig`]):
//! - `MUSICSHOP_DB_PATH`: SQLite database file path (default: "musicshop.db")
//! - `MUSICSHOP_HOST`: listen address (default: "0.0.0.0")
//! - `MUSICSHOP_PORT`: listen port (default: "3001")

use std::process;

use musicshop_server::config::ServerConfig;
use musicshop_server::router::build_router;
use musicshop_server::state::AppState;

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt::init();

    if let Err(message) = run().await {
        tracing::error!("{}", message);
        process::exit(1);
    }
}

async fn run() -> Result<(), String> {
    let config = ServerConfig::from_env().map_err(|e| e.to_string())?;

    let state = AppState::new(&config.db_path)
        .map_err(|e| format!("failed to initialize application state: {}", e))?;
    tracing::info!("using database {}", config.db_path);

    let app = build_router(state);

    let addr = config.addr();
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .map_err(|e| format!("failed to bind {}: {}", addr, e))?;
    tracing::info!("music shop server starting on {}", addr);

    axum::serve(listener, app)
        .await
        .map_err(|e| format!("server error: {}", e))
}

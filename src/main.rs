use astra::Server;
use omd_listings::config::load_config;
use omd_listings::db::{init_db, Database};
use omd_listings::responses::error_to_response;
use omd_listings::router::handle;
use omd_listings::state::AppState;
use std::net::SocketAddr;
use tracing_subscriber::EnvFilter;

fn main() {
    // 1. Configuration (before logging, so it can pick the log level)
    let (config, config_path) = match load_config() {
        Ok(loaded) => loaded,
        Err(e) => {
            eprintln!("Configuration error: {e}");
            std::process::exit(1);
        }
    };

    // 2. Logging; RUST_LOG wins over the configured level
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(&config.logging.level)),
        )
        .init();

    match &config_path {
        Some(path) => tracing::info!("Loaded config from {}", path.display()),
        None => tracing::info!("Using default configuration"),
    }

    // 3. Database
    let db = Database::new(config.database.path.clone());
    if let Err(e) = init_db(&db, &config.database.schema) {
        tracing::error!("Database initialization failed: {e}");
        std::process::exit(1);
    }

    // 4. Server
    let addr: SocketAddr = match config.server.bind.parse() {
        Ok(addr) => addr,
        Err(e) => {
            tracing::error!("Invalid bind address {:?}: {e}", config.server.bind);
            std::process::exit(1);
        }
    };

    if let Some(seed) = config.ordering.seed {
        tracing::warn!(seed, "listing order is seeded; every request returns the same order");
    }

    let state = AppState::new(db, config.ordering.clone());
    let server = Server::bind(&addr).max_workers(config.server.max_workers);
    tracing::info!("Starting server at http://{addr}");

    let result = server.serve(move |req, _info| match handle(req, &state) {
        Ok(resp) => resp,
        Err(err) => error_to_response(err),
    });

    if let Err(e) = result {
        tracing::error!("Server ended with error: {e}");
        std::process::exit(1);
    }

    tracing::info!("Server shut down cleanly.");
}

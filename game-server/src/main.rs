use std::sync::Arc;

use anyhow::{Context, Result};
use tokio::signal;
use tracing::info;

use game_core::{GameRng, WordCatalog};
use game_persistence::{JsonFileStore, MemoryStore, StateStore};
use game_server::{config::Config, create_routes, game_manager::GameManager};

#[tokio::main]
async fn main() -> Result<()> {
    // Initialize tracing
    tracing_subscriber::fmt::init();

    info!("Starting Bluff Dictionary server...");

    let config = Config::from_env()?;

    let rng = match config.shuffle_seed {
        Some(seed) => {
            info!("Using fixed shuffle seed {}", seed);
            GameRng::new(seed)
        }
        None => GameRng::from_entropy(),
    };

    let catalog = match &config.words_file {
        Some(path) => {
            info!("Loading words from {}", path.display());
            WordCatalog::from_file(path)?
        }
        None => {
            info!("Using the built-in word catalog");
            WordCatalog::with_default_words()
        }
    };

    let store: Arc<dyn StateStore> = match &config.state_file {
        Some(path) => {
            info!("Saving game state to {}", path.display());
            Arc::new(JsonFileStore::new(path.clone()))
        }
        None => {
            info!("STATE_FILE is empty, game state will not survive a restart");
            Arc::new(MemoryStore::new())
        }
    };

    let game_manager = Arc::new(GameManager::new(catalog, store, config.max_teams, rng));
    game_manager.restore().await;

    let routes = create_routes(game_manager);

    let ip: std::net::IpAddr = config
        .host
        .parse()
        .with_context(|| format!("Invalid HOST: {}", config.host))?;

    info!("Server starting on {}:{}", config.host, config.port);

    let (addr, server) =
        warp::serve(routes).try_bind_with_graceful_shutdown((ip, config.port), shutdown_signal())?;

    info!(
        "Server started successfully on {}. Press Ctrl+C to stop.",
        addr
    );
    server.await;
    info!("Server shutdown complete.");
    Ok(())
}

async fn shutdown_signal() {
    // Wait for SIGINT (Ctrl+C) or SIGTERM
    #[cfg(unix)]
    {
        let mut sigint = match signal::unix::signal(signal::unix::SignalKind::interrupt()) {
            Ok(sigint) => sigint,
            Err(e) => {
                tracing::error!("Failed to listen for SIGINT: {}", e);
                return std::future::pending().await;
            }
        };
        let mut sigterm = match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(sigterm) => sigterm,
            Err(e) => {
                tracing::error!("Failed to listen for SIGTERM: {}", e);
                return std::future::pending().await;
            }
        };

        tokio::select! {
            _ = sigint.recv() => {
                info!("Received SIGINT, shutting down gracefully...");
            }
            _ = sigterm.recv() => {
                info!("Received SIGTERM, shutting down gracefully...");
            }
        }
    }

    #[cfg(not(unix))]
    {
        if let Err(e) = signal::ctrl_c().await {
            tracing::error!("Failed to listen for ctrl+c: {}", e);
            return std::future::pending().await;
        }
        info!("Received Ctrl+C, shutting down gracefully...");
    }
}

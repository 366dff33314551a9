//! LRU Cache Server - A network-accessible in-memory cache
//!
//! Bounded capacity with least-recently-used eviction and per-entry TTL expiry.

use anyhow::Context;
use clap::Parser;
use tokio::{signal, task::JoinHandle};
use tracing::{info, warn, Level};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use lru_cache_server::{create_router, server, spawn_cleanup_task, AppState, Config};

/// Main entry point for the cache server.
///
/// # Startup Sequence
/// 1. Parse configuration from flags and environment variables
/// 2. Initialize tracing subscriber for logging
/// 3. Create the cache engine with configured capacity and default TTL
/// 4. Start the optional TTL cleanup task
/// 5. Create Axum router with all endpoints
/// 6. Start HTTP server on the configured address
/// 7. Handle graceful shutdown on SIGINT/SIGTERM, bounded by the shutdown timeout
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let config = Config::parse();

    // RUST_LOG overrides the configured level when set
    let level = config
        .tracing_level()
        .unwrap_or(Level::WARN)
        .as_str()
        .to_ascii_lowercase();
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| {
                format!("lru_cache_server={level},tower_http={level}").into()
            }),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    if config.tracing_level().is_none() {
        warn!(
            "Unknown log level: {}. Using default level `warn`",
            config.log_level
        );
    }

    info!(
        "Configuration loaded: cache_size={}, default_cache_ttl={:?}, server_host_port={}, cleanup_interval={:?}, shutdown_timeout={:?}",
        config.cache_size,
        config.default_cache_ttl,
        config.server_host_port,
        config.cleanup_interval,
        config.shutdown_timeout
    );

    let state = AppState::from_config(&config);
    info!("Cache engine initialized");

    let cleanup_handle = if config.cleanup_enabled() {
        info!("Background cleanup task started");
        Some(spawn_cleanup_task(state.cache.clone(), config.cleanup_interval))
    } else {
        None
    };

    let app = create_router(state);

    let listener = tokio::net::TcpListener::bind(&config.server_host_port)
        .await
        .with_context(|| format!("failed to bind {}", config.server_host_port))?;
    info!("Starting server on {}", config.server_host_port);

    server::serve(
        listener,
        app,
        shutdown_signal(cleanup_handle),
        config.shutdown_timeout,
    )
    .await
    .context("HTTP server error")?;

    info!("Server shutdown complete");
    Ok(())
}

/// Waits for shutdown signal (Ctrl+C or SIGTERM).
///
/// On shutdown signal, aborts the cleanup task; in-flight requests then get
/// until the shutdown timeout to drain.
async fn shutdown_signal(cleanup_handle: Option<JoinHandle<()>>) {
    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("Failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating shutdown...");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating shutdown...");
        }
    }

    if let Some(handle) = cleanup_handle {
        handle.abort();
        warn!("Cleanup task aborted");
    }
}

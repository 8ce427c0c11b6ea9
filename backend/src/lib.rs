//! Food Share Hub backend.
//!
//! Donors post food items; requesters browse and book them. Write routes are
//! gated by a signed session cookie issued from `/jwt`. Every handler is a
//! thin translation from HTTP to one or two calls on the configured
//! `adapters::StoreAdapter`.

pub mod api;
pub mod auth;
pub mod config;
pub mod database;
pub mod errors;
pub mod middleware;
pub mod services;
pub mod state;

use std::net::SocketAddr;

use axum::{middleware::from_fn_with_state, routing::get, Router};
use tokio::{net::TcpListener, signal};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

use crate::auth::{auth_router, require_session, SessionKeys};
use crate::config::{AppConfig, ConfigError};
use crate::errors::AppResult;
use crate::state::AppState;

/// Assembles every route with CORS and request tracing applied.
///
/// Food writes and all booking routes sit behind `require_session`; the
/// session, liveness and browsing routes do not.
pub fn build_router(state: AppState, cors_origin: &str) -> Result<Router, ConfigError> {
    let protected = Router::new()
        .merge(api::food::routes::protected_food_router())
        .merge(api::booking::routes::booking_router())
        .route_layer(from_fn_with_state(state.clone(), require_session));

    let app = Router::new()
        .route("/", get(root_handler))
        .merge(auth_router())
        .merge(api::food::routes::public_food_router())
        .merge(protected)
        .layer(middleware::cors_layer(cors_origin)?)
        .layer(middleware::trace_layer())
        .with_state(state);

    Ok(app)
}

async fn root_handler() -> &'static str {
    "Food Share Hub is Running"
}

pub fn init_tracing() {
    let env_filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| "info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();
}

/// Loads configuration, opens the store and serves until Ctrl+C or SIGTERM.
pub async fn start_server() -> AppResult<()> {
    init_tracing();

    info!("Loading configuration...");
    let config = AppConfig::from_env()?;
    let store = database::connect_store(&config.store).await?;
    let state = AppState::new(store, SessionKeys::new(config.access_token_secret.as_bytes()));
    let app = build_router(state, &config.cors_origin)?;

    let address = SocketAddr::from(([0, 0, 0, 0], config.port));
    let listener = TcpListener::bind(address).await?;
    info!("Food Share Hub is Running on port: {}", config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match signal::ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                warn!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal::unix::signal(signal::unix::SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                warn!("Failed to install terminate handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {},
        _ = terminate => {},
    }
}

//! Documentation of the dish footprint dashboard backend.
//!
//! # General Infrastructure
//! - Browser dashboard runs on its own dev origin (default `http://localhost:3000`)
//! - This server listens on `0.0.0.0:$PORT` (default 3001) and only accepts that origin cross-origin
//! - Dishes and bills live as CSV files under `$PUBLIC_DIR/data`
//! - Everything else under `$PUBLIC_DIR` is served as-is, including the read-only `data/ingredients.csv`
//!
//!
//!
//! # Routes
//!
//! | Method | Path | Response |
//! |---|---|---|
//! | GET | `/api/dishes` | every dish |
//! | POST | `/api/dishes` | `{success, message}` |
//! | GET | `/api/bills` | every bill, checked out or not |
//! | POST | `/api/bills` | `{success, message}` |
//! | PUT | `/api/bills/{billName}` | `{success, message, bill}`, 404 if no such bill |
//!
//! Failures come back as `{error, details}`. Missing required fields on creation are a 500,
//! not a 400. The dashboard only checks `response.ok`.
//!
//!
//!
//! # Notes
//!
//! ## Flat files
//! Each request reads the whole file, and each write rewrites it. There is no locking, so two
//! writers racing on the same collection are last-writer-wins and a reader can catch a half-written
//! file. Fine for a single-user local tool.
//!
//! ## Duplicate bill names
//! Nothing stops two bills sharing a name. Checkout flips the first one in file order.
//!
//!
//!
//! # Setup
//!
//! Run the server.
//! ```sh
//! cargo run -p server
//! ```
//!
//! With request logs.
//! ```sh
//! RUST_LOG=server=debug,bank=debug,tower_http=debug cargo run -p server
//! ```
//!
//! Different port and data location.
//! ```sh
//! PORT=4000 PUBLIC_DIR=/srv/dashboard cargo run -p server
//! ```
use std::{sync::Arc, time::Duration};

use anyhow::{Context, Error};
use axum::{
    Router,
    http::{HeaderValue, Method, header::CONTENT_TYPE},
    routing::{get, put},
};

use signal::{
    ctrl_c,
    unix::{SignalKind, signal},
};
use tokio::{net::TcpListener, signal};
use tower_http::{
    cors::{AllowOrigin, CorsLayer},
    services::ServeDir,
    trace::TraceLayer,
};
use tracing::{error, info};
use tracing_subscriber::{EnvFilter, fmt};

pub mod config;
pub mod error;
pub mod routes;
pub mod state;
pub mod utils;

use config::Config;
use routes::{
    bills_handler, checkout_handler, dishes_handler, save_bill_handler, save_dish_handler,
};
use state::State;

pub async fn start_server() -> Result<(), Error> {
    fmt().with_env_filter(EnvFilter::from_default_env()).init();

    info!("Loading config...");
    let config = Config::load()?;

    info!("Initializing state...");
    let state = State::new(config)?;

    info!("Starting server...");
    let app = build_router(state.clone())?;

    let address = format!("0.0.0.0:{}", state.config.port);
    info!("Binding to {address}");

    let listener = TcpListener::bind(&address)
        .await
        .with_context(|| format!("bind {address}"))?;
    info!("Server running on http://localhost:{}", state.config.port);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    info!("Server shut down");
    Ok(())
}

pub fn build_router(state: Arc<State>) -> Result<Router, Error> {
    let origin: HeaderValue = state
        .config
        .cors_origin
        .parse()
        .with_context(|| format!("invalid CORS origin {}", state.config.cors_origin))?;

    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list([origin]))
        .allow_methods([Method::GET, Method::POST, Method::PUT])
        .allow_headers([CONTENT_TYPE])
        .max_age(Duration::from_secs(60 * 60));

    let public = ServeDir::new(&state.config.public_dir);

    Ok(Router::new()
        .route("/api/dishes", get(dishes_handler).post(save_dish_handler))
        .route("/api/bills", get(bills_handler).post(save_bill_handler))
        .route("/api/bills/{bill_name}", put(checkout_handler))
        .fallback_service(public)
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state))
}

async fn shutdown_signal() {
    let ctrl_c = async {
        match ctrl_c().await {
            Ok(()) => info!("Received Ctrl+C, shutting down"),
            Err(e) => {
                error!("Failed to install Ctrl+C handler: {e}");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match signal(SignalKind::terminate()) {
            Ok(mut stream) => {
                stream.recv().await;
                info!("Received terminate signal, shutting down");
            }
            Err(e) => {
                error!("Failed to install signal handler: {e}");
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

//! Worksheet Backend · arithmetic and German conjugation practice sheets
//!
//! - Axum HTTP + WebSocket API over the `worksheet_backend` library
//! - Static presentation layer fallback (./static/index.html)
//!
//! Important env variables:
//!   PORT                   : u16 (default 3000)
//!   WORKSHEET_CONFIG_PATH  : path to TOML config (limits, feedback texts, verb table path)
//!   LOG_LEVEL              : tracing filter, e.g. "debug" or full directives
//!   LOG_FORMAT             : "pretty" (default) or "json"

mod config;
mod logic;
mod protocol;
mod routes;
mod state;
mod telemetry;

use std::{net::SocketAddr, sync::Arc};
use tokio::net::TcpListener;
use tracing::info;

use crate::routes::build_router;
use crate::state::AppState;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    telemetry::init_tracing();

    // Verb table + feedback texts, read-only for the lifetime of the server.
    let state = Arc::new(AppState::from_env()?);

    let app = build_router(state);

    let addr: SocketAddr = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse::<u16>().ok())
        .map(|port| SocketAddr::from(([0, 0, 0, 0], port)))
        .unwrap_or_else(|| SocketAddr::from(([0, 0, 0, 0], 3000)));

    let listener = TcpListener::bind(addr).await?;
    info!(target: "worksheet_backend", %addr, "HTTP server listening");
    axum::serve(listener, app).await?;
    Ok(())
}

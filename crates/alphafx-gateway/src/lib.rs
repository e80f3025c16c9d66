//! alphafx-gateway - HTTP and WebSocket boundary for the engine.
//!
//! A thin axum layer: handlers decode payloads, call the engine, and
//! encode responses. No trading logic lives here.
//!
//! Routes:
//!
//! - `POST /internal/ingest_price` - submit one tick
//! - `GET /prices` - latest stored tick for a pair
//! - `GET /status` - per-pair pipeline snapshot
//! - `GET /history` - recent trades across all pairs
//! - `GET /ws/feed` - WebSocket stream of price updates and trades

mod config;
mod error;
mod server;
mod types;

pub use config::GatewayConfig;
pub use error::{GatewayError, GatewayResult};
pub use server::{create_router, run_server, AppState};
pub use types::{IngestAck, IngestRequest, PriceResponse};

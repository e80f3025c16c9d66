//! Request and response payloads.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Body of `POST /internal/ingest_price`.
#[derive(Debug, Deserialize)]
pub struct IngestRequest {
    pub pair: String,
    pub price: f64,
    /// Observation time; the server clock is used when absent.
    #[serde(default)]
    pub ts: Option<DateTime<Utc>>,
}

/// Success body for an accepted tick.
#[derive(Debug, Serialize)]
pub struct IngestAck {
    pub pair: String,
    pub accepted: bool,
}

/// Query string for the pair-scoped read endpoints.
#[derive(Debug, Deserialize)]
pub struct PairQuery {
    #[serde(default = "default_pair")]
    pub pair: String,
}

fn default_pair() -> String {
    "EURUSD".to_string()
}

/// Query string for `/history`.
#[derive(Debug, Deserialize)]
pub struct HistoryQuery {
    pub limit: Option<usize>,
}

/// Body of `GET /prices`.
#[derive(Debug, Serialize)]
pub struct PriceResponse {
    pub pair: String,
    pub price: f64,
    pub ts: DateTime<Utc>,
}

/// Uniform error body for non-2xx responses.
#[derive(Debug, Serialize)]
pub struct ErrorBody {
    pub error: String,
}

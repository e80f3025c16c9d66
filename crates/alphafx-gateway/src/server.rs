//! HTTP server implementation using axum.

use std::net::SocketAddr;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use axum::extract::ws::{Message, WebSocket, WebSocketUpgrade};
use axum::extract::{Query, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::{get, post};
use axum::Router;
use chrono::Utc;
use futures_util::stream::StreamExt;
use futures_util::SinkExt;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use tracing::{debug, info, warn};

use alphafx_core::Pair;
use alphafx_engine::{Engine, EngineError};
use alphafx_persistence::PriceStore;

use crate::config::GatewayConfig;
use crate::error::GatewayResult;
use crate::types::{ErrorBody, HistoryQuery, IngestAck, IngestRequest, PairQuery, PriceResponse};

/// Caps concurrent feed connections.
struct FeedLimiter {
    active: AtomicUsize,
    max: usize,
}

impl FeedLimiter {
    fn new(max: usize) -> Self {
        Self {
            active: AtomicUsize::new(0),
            max,
        }
    }

    fn acquire(&self) -> Option<FeedSlot<'_>> {
        let max = self.max;
        self.active
            .fetch_update(Ordering::AcqRel, Ordering::Acquire, |n| {
                (n < max).then_some(n + 1)
            })
            .ok()
            .map(|_| FeedSlot { limiter: self })
    }

    fn active_count(&self) -> usize {
        self.active.load(Ordering::Relaxed)
    }
}

struct FeedSlot<'a> {
    limiter: &'a FeedLimiter,
}

impl Drop for FeedSlot<'_> {
    fn drop(&mut self) {
        self.limiter.active.fetch_sub(1, Ordering::Release);
    }
}

/// Shared application state for axum handlers.
#[derive(Clone)]
pub struct AppState {
    engine: Engine,
    limiter: Arc<FeedLimiter>,
    config: GatewayConfig,
}

impl AppState {
    pub fn new(engine: Engine, config: GatewayConfig) -> Self {
        Self {
            engine,
            limiter: Arc::new(FeedLimiter::new(config.max_connections)),
            config,
        }
    }
}

/// Create the axum router.
pub fn create_router(state: AppState) -> Router {
    Router::new()
        .route("/internal/ingest_price", post(ingest_price))
        .route("/prices", get(get_price))
        .route("/status", get(get_status))
        .route("/history", get(get_history))
        .route("/ws/feed", get(ws_feed))
        .with_state(state)
}

fn error_response(status: StatusCode, message: impl Into<String>) -> Response {
    (
        status,
        Json(ErrorBody {
            error: message.into(),
        }),
    )
        .into_response()
}

/// Accept one tick and queue it into the pipeline.
async fn ingest_price(State(state): State<AppState>, Json(req): Json<IngestRequest>) -> Response {
    let price = match Decimal::from_f64(req.price) {
        Some(price) => price,
        None => {
            return error_response(
                StatusCode::UNPROCESSABLE_ENTITY,
                "price is not a finite number",
            )
        }
    };
    let observed_at = req.ts.unwrap_or_else(Utc::now);

    match state.engine.ingest(&req.pair, price, observed_at).await {
        Ok(()) => (
            StatusCode::CREATED,
            Json(IngestAck {
                pair: req.pair,
                accepted: true,
            }),
        )
            .into_response(),
        Err(e @ EngineError::MalformedTick(_)) => {
            debug!(pair = %req.pair, error = %e, "Rejected malformed tick");
            error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string())
        }
        Err(e) => {
            warn!(pair = %req.pair, error = %e, "Tick ingestion failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

/// Latest stored tick for a pair.
async fn get_price(State(state): State<AppState>, Query(query): Query<PairQuery>) -> Response {
    let pair = match Pair::parse(&query.pair) {
        Ok(pair) => pair,
        Err(e) => return error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    };

    match state.engine.store().get_latest_price(&pair) {
        Ok(Some(tick)) => Json(PriceResponse {
            pair: tick.pair.to_string(),
            price: tick.price.to_f64_lossy(),
            ts: tick.observed_at,
        })
        .into_response(),
        Ok(None) => error_response(StatusCode::NOT_FOUND, format!("No prices for {pair}")),
        Err(e) => {
            warn!(%pair, error = %e, "Price lookup failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

/// Per-pair pipeline snapshot.
async fn get_status(State(state): State<AppState>, Query(query): Query<PairQuery>) -> Response {
    match state.engine.get_status(&query.pair) {
        Ok(Some(status)) => Json(status).into_response(),
        Ok(None) => error_response(
            StatusCode::NOT_FOUND,
            format!("No pipeline for {}", query.pair),
        ),
        Err(e) => error_response(StatusCode::UNPROCESSABLE_ENTITY, e.to_string()),
    }
}

/// Recent trades across all pairs, newest first.
async fn get_history(State(state): State<AppState>, Query(query): Query<HistoryQuery>) -> Response {
    let limit = query.limit.unwrap_or(state.config.history_limit);
    match state.engine.store().get_trade_history(limit) {
        Ok(trades) => Json(trades).into_response(),
        Err(e) => {
            warn!(error = %e, "Trade history lookup failed");
            error_response(StatusCode::SERVICE_UNAVAILABLE, e.to_string())
        }
    }
}

/// WebSocket upgrade handler for the live feed.
async fn ws_feed(State(state): State<AppState>, ws: WebSocketUpgrade) -> Response {
    if state.limiter.active_count() >= state.config.max_connections {
        warn!(
            active = state.limiter.active_count(),
            max = state.config.max_connections,
            "Feed connection limit reached"
        );
        return (StatusCode::SERVICE_UNAVAILABLE, "Too many connections").into_response();
    }

    ws.on_upgrade(move |socket| handle_feed_connection(socket, state))
}

/// Bridge one engine subscription onto a WebSocket.
async fn handle_feed_connection(socket: WebSocket, state: AppState) {
    // The pre-upgrade check raced other upgrades; this one is binding.
    let _slot = match state.limiter.acquire() {
        Some(slot) => slot,
        None => {
            warn!("Feed connection limit reached during upgrade");
            return;
        }
    };

    let mut subscription = match state.engine.subscribe().await {
        Ok(subscription) => subscription,
        Err(e) => {
            warn!(error = %e, "Could not subscribe feed client");
            return;
        }
    };

    info!(
        connections = state.limiter.active_count(),
        "New feed connection"
    );

    let (mut sender, mut receiver) = socket.split();

    // Drain client frames so close and ping are noticed.
    let mut incoming_task = tokio::spawn(async move {
        while let Some(result) = receiver.next().await {
            match result {
                Ok(Message::Close(_)) => {
                    debug!("Feed client sent close frame");
                    break;
                }
                Err(e) => {
                    debug!(error = %e, "Feed receive error");
                    break;
                }
                _ => {}
            }
        }
    });

    loop {
        tokio::select! {
            event = subscription.recv() => {
                match event {
                    Some(event) => {
                        let json = match serde_json::to_string(&event) {
                            Ok(json) => json,
                            Err(e) => {
                                warn!(error = %e, "Could not encode event");
                                continue;
                            }
                        };
                        if sender.send(Message::Text(json.into())).await.is_err() {
                            debug!("Feed client disconnected");
                            break;
                        }
                    }
                    None => {
                        debug!("Event hub closed, dropping feed connection");
                        break;
                    }
                }
            }
            _ = &mut incoming_task => {
                break;
            }
        }
    }

    info!(
        connections = state.limiter.active_count().saturating_sub(1),
        "Feed connection closed"
    );
}

/// Run the gateway HTTP server until the listener fails.
pub async fn run_server(engine: Engine, config: GatewayConfig) -> GatewayResult<()> {
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    let app = create_router(AppState::new(engine, config.clone()));

    info!(port = config.port, "Starting gateway server");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use alphafx_engine::EngineConfig;
    use alphafx_persistence::MemoryStore;
    use std::time::Duration;

    fn test_state() -> AppState {
        let store = Arc::new(MemoryStore::new()) as Arc<dyn PriceStore>;
        let engine = Engine::new(EngineConfig::default(), store).unwrap();
        AppState::new(engine, GatewayConfig::default())
    }

    fn ingest_request(pair: &str, price: f64) -> Json<IngestRequest> {
        Json(IngestRequest {
            pair: pair.to_string(),
            price,
            ts: None,
        })
    }

    #[tokio::test]
    async fn test_ingest_then_read_latest_price() {
        let state = test_state();
        let mut sub = state.engine.subscribe().await.unwrap();

        let resp = ingest_price(State(state.clone()), ingest_request("EURUSD", 1.08)).await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        // The tick is durable once its event is observable.
        let event = tokio::time::timeout(Duration::from_secs(5), sub.recv())
            .await
            .expect("timed out waiting for event")
            .expect("hub closed");
        assert!(matches!(event, alphafx_core::Event::PriceUpdate { .. }));

        let resp = get_price(
            State(state),
            Query(PairQuery {
                pair: "EURUSD".to_string(),
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_ingest_rejects_bad_payloads() {
        let state = test_state();

        let resp = ingest_price(State(state.clone()), ingest_request("EURUSD", f64::NAN)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = ingest_price(State(state.clone()), ingest_request("EURUSD", -1.0)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);

        let resp = ingest_price(State(state), ingest_request("", 1.08)).await;
        assert_eq!(resp.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_unknown_pair_reads_are_not_found() {
        let state = test_state();

        let resp = get_price(
            State(state.clone()),
            Query(PairQuery {
                pair: "USDJPY".to_string(),
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        let resp = get_status(
            State(state),
            Query(PairQuery {
                pair: "USDJPY".to_string(),
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_history_starts_empty() {
        let state = test_state();
        let resp = get_history(State(state), Query(HistoryQuery { limit: None })).await;
        assert_eq!(resp.status(), StatusCode::OK);
    }
}

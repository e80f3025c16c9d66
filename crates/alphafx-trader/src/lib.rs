//! AlphaFX standalone binary.
//!
//! Wires the in-memory store, the engine, the HTTP/WebSocket gateway,
//! and an optional random-walk tick simulator into one process.

pub mod app;
pub mod config;
pub mod error;
pub mod logging;
pub mod simulator;

pub use app::Application;
pub use config::AppConfig;
pub use error::{AppError, AppResult};

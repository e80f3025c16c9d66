//! Rolling statistics and SMA crossover detection.
//!
//! Provides:
//! - `RollingWindow`: fixed-capacity ring buffer with O(1) push and mean
//! - `SignalDetector`: edge-triggered short/long SMA crossover detection
//! - `SignalConfig`: window sizing

pub mod config;
pub mod detector;
pub mod error;
pub mod window;

pub use config::SignalConfig;
pub use detector::{Crossover, SignalDetector};
pub use error::{SignalError, SignalResult};
pub use window::RollingWindow;

//! Instrument pair identifier.

use crate::error::{CoreError, Result};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Validated instrument pair symbol (e.g. "EURUSD").
///
/// Normalized to uppercase at construction so "eurusd" and "EURUSD"
/// key the same pipeline state.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Pair(String);

impl Pair {
    /// Parse and normalize a pair symbol.
    ///
    /// Rejects empty or whitespace-only input and symbols containing
    /// non-alphanumeric characters.
    pub fn parse(raw: &str) -> Result<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(CoreError::EmptyPair);
        }
        if !trimmed.chars().all(|c| c.is_ascii_alphanumeric()) {
            return Err(CoreError::InvalidPair(trimmed.to_string()));
        }
        Ok(Self(trimmed.to_ascii_uppercase()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Pair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl AsRef<str> for Pair {
    fn as_ref(&self) -> &str {
        &self.0
    }
}

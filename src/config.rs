//! Tracker configuration

use crate::currency::{Currency, CurrencyPair};
use crate::error::{Result, TrackerError};
use std::time::Duration;

/// Configuration for a tracking run
#[derive(Debug, Clone)]
pub struct TrackerConfig {
    /// Tracked pairs, in polling order
    pub pairs: Vec<CurrencyPair>,
    /// Target cadence of the poll loop
    pub poll_interval: Duration,
    /// Length of one aggregation window
    pub window_length: Duration,
    /// Total run duration before the final flush
    pub run_duration: Duration,
    /// Credential for the quote source
    pub api_key: String,
}

impl TrackerConfig {
    /// Check startup invariants; the process must not proceed on error
    pub fn validate(&self) -> Result<()> {
        if self.pairs.is_empty() {
            return Err(TrackerError::ConfigError(
                "No currency pairs configured".to_string(),
            ));
        }
        if self.api_key.is_empty() {
            return Err(TrackerError::ConfigError(
                "Missing quote source API key".to_string(),
            ));
        }
        if self.poll_interval.is_zero() {
            return Err(TrackerError::ConfigError(
                "Poll interval must be non-zero".to_string(),
            ));
        }
        if self.window_length.is_zero() {
            return Err(TrackerError::ConfigError(
                "Window length must be non-zero".to_string(),
            ));
        }
        Ok(())
    }
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            pairs: vec![
                CurrencyPair::new(Currency::EUR, Currency::USD),
                CurrencyPair::new(Currency::GBP, Currency::INR),
                CurrencyPair::new(Currency::CHF, Currency::JPY),
            ],
            poll_interval: Duration::from_secs(1),
            window_length: Duration::from_secs(360),
            run_duration: Duration::from_secs(5 * 3600),
            api_key: String::new(),
        }
    }
}

//! Core types and constants

use crate::currency::CurrencyPair;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Timestamp type used throughout the library
pub type Timestamp = DateTime<Utc>;

/// Conversion rate type
pub type Rate = f64;

/// A single observed conversion rate for a tracked pair
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Observation {
    pub pair: CurrencyPair,
    pub rate: Rate,
    /// Timestamp reported by the quote provider
    pub source_timestamp: Timestamp,
    /// Timestamp at which we recorded the observation
    pub ingestion_timestamp: Timestamp,
}

impl Observation {
    /// Create a new observation, stamping the ingestion time with the current clock
    pub fn new(pair: CurrencyPair, rate: Rate, source_timestamp: Timestamp) -> Self {
        Self {
            pair,
            rate,
            source_timestamp,
            ingestion_timestamp: Utc::now(),
        }
    }
}

/// Per-window summary record emitted at rollover
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WindowSummary {
    pub pair: CurrencyPair,
    pub max_rate: Rate,
    pub min_rate: Rate,
    pub mean_rate: Rate,
    pub volatility: f64,
    /// Normalized price-jump rate for the window
    pub fractal_dimension: f64,
    /// Source timestamp of the window's first observation, absent if the
    /// window saw no successful fetch
    pub window_start: Option<Timestamp>,
    pub emitted_at: Timestamp,
}

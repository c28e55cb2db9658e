//! # FX Tracker
//!
//! A streaming foreign-exchange rate tracker. It polls conversion rates for
//! a fixed set of currency pairs, accumulates per-window statistics online,
//! derives Keltner channel bands from each window's volatility, and scores
//! how often the following window's rates jump out of those bands.
//!
//! ## Example
//!
//! ```rust,no_run
//! use fx_tracker::prelude::*;
//!
//! #[tokio::main]
//! async fn main() -> Result<()> {
//!     let config = TrackerConfig {
//!         api_key: std::env::var("POLYGON_API_KEY").unwrap_or_default(),
//!         ..TrackerConfig::default()
//!     };
//!
//!     let source = PolygonQuoteSource::new(config.api_key.clone())?;
//!     let samples = MemorySampleStore::new();
//!     let summaries = MemorySummaryStore::new();
//!
//!     let mut tracker = Tracker::new(
//!         config,
//!         source,
//!         Box::new(samples),
//!         Box::new(summaries),
//!     )?;
//!     tracker.run().await
//! }
//! ```

pub mod channel;
pub mod config;
pub mod currency;
pub mod error;
pub mod source;
pub mod stats;
pub mod store;
pub mod tracker;
pub mod types;

pub mod prelude {
    //! Commonly used types and traits
    pub use crate::channel::ChannelBands;
    pub use crate::config::TrackerConfig;
    pub use crate::currency::{Currency, CurrencyPair};
    pub use crate::error::{Result, TrackerError};
    pub use crate::source::{PolygonQuoteSource, QuoteSource, ScriptedQuoteSource};
    pub use crate::stats::WindowStats;
    pub use crate::store::{
        MemorySampleStore, MemorySummaryStore, SampleStore, SqliteSampleStore,
        SqliteSummaryStore, SummaryStore,
    };
    pub use crate::tracker::Tracker;
    pub use crate::types::{Observation, Rate, Timestamp, WindowSummary};
}

#[cfg(test)]
mod tests {
    #[test]
    fn test_lib_compile() {
        // Smoke test to ensure library compiles
    }
}

//! Sample and summary persistence
//!
//! Both stores are capability interfaces over interchangeable backends: a
//! relational table per pair (SQLite) or a document-style collection per
//! pair (in-memory). The tracker core never branches on backend identity.
//!
//! # Components
//!
//! - **sqlite**: durable rusqlite-backed stores
//! - **memory**: in-memory stores for tests and ephemeral runs

pub mod memory;
pub mod sqlite;

pub use memory::{MemorySampleStore, MemorySummaryStore};
pub use sqlite::{SqliteSampleStore, SqliteSummaryStore};

use crate::currency::CurrencyPair;
use crate::error::Result;
use crate::types::{Observation, Rate, WindowSummary};

/// Append-only log of raw observations, one collection per pair
///
/// Collections are truncated at the end of each aggregation window.
pub trait SampleStore {
    /// Append one observation to its pair's collection
    fn append(&mut self, observation: &Observation) -> Result<()>;

    /// Read back all raw rates for a pair, in insertion order
    fn read_rates(&self, pair: &CurrencyPair) -> Result<Vec<Rate>>;

    /// Delete all of a pair's observations, leaving other pairs untouched
    fn clear(&mut self, pair: &CurrencyPair) -> Result<()>;
}

/// Append-only log of per-window summary records, one collection per pair
pub trait SummaryStore {
    /// Append one window summary to its pair's collection
    fn append(&mut self, summary: &WindowSummary) -> Result<()>;

    /// Read back all summaries for a pair, in emission order
    fn read_all(&self, pair: &CurrencyPair) -> Result<Vec<WindowSummary>>;
}

//! SQLite-backed sample and summary stores
//!
//! One table per tracked pair, created up front from the configured pair
//! set. Raw samples and window summaries live in separate database files so
//! the high-churn sample log can be truncated without touching summaries.

use super::{SampleStore, SummaryStore};
use crate::currency::CurrencyPair;
use crate::error::{Result, TrackerError};
use crate::types::{Observation, Rate, Timestamp, WindowSummary};
use rusqlite::{params, Connection};
use std::path::Path;

/// SQLite store for raw observations
pub struct SqliteSampleStore {
    conn: Connection,
}

impl SqliteSampleStore {
    /// Create or open the sample database at path
    pub fn new(db_path: &Path, pairs: &[CurrencyPair]) -> Result<Self> {
        let conn = Connection::open(db_path)
            .map_err(|e| TrackerError::StoreError(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn, pairs)
    }

    /// Create in-memory sample database (for testing)
    pub fn new_in_memory(pairs: &[CurrencyPair]) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            TrackerError::StoreError(format!("Failed to create in-memory database: {}", e))
        })?;
        Self::with_connection(conn, pairs)
    }

    fn with_connection(conn: Connection, pairs: &[CurrencyPair]) -> Result<Self> {
        for pair in pairs {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        rate REAL NOT NULL,
                        source_timestamp TEXT NOT NULL,
                        ingestion_timestamp TEXT NOT NULL
                    )",
                    pair.collection_name()
                ),
                [],
            )
            .map_err(|e| {
                TrackerError::StoreError(format!(
                    "Failed to create sample table for {}: {}",
                    pair, e
                ))
            })?;
        }

        Ok(Self { conn })
    }
}

impl SampleStore for SqliteSampleStore {
    fn append(&mut self, observation: &Observation) -> Result<()> {
        self.conn
            .execute(
                &format!(
                    "INSERT INTO {} (rate, source_timestamp, ingestion_timestamp)
                     VALUES (?1, ?2, ?3)",
                    observation.pair.collection_name()
                ),
                params![
                    observation.rate,
                    observation.source_timestamp,
                    observation.ingestion_timestamp,
                ],
            )
            .map_err(|e| {
                TrackerError::StoreError(format!(
                    "Failed to insert sample for {}: {}",
                    observation.pair, e
                ))
            })?;

        Ok(())
    }

    fn read_rates(&self, pair: &CurrencyPair) -> Result<Vec<Rate>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT rate FROM {} ORDER BY rowid",
                pair.collection_name()
            ))
            .map_err(|e| TrackerError::StoreError(format!("Failed to prepare query: {}", e)))?;

        let rates = stmt
            .query_map([], |row| row.get::<_, f64>(0))
            .map_err(|e| TrackerError::StoreError(format!("Failed to query samples: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::StoreError(format!("Failed to collect samples: {}", e)))?;

        Ok(rates)
    }

    fn clear(&mut self, pair: &CurrencyPair) -> Result<()> {
        self.conn
            .execute(&format!("DELETE FROM {}", pair.collection_name()), [])
            .map_err(|e| {
                TrackerError::StoreError(format!("Failed to clear samples for {}: {}", pair, e))
            })?;

        log::debug!("Cleared sample collection {}", pair.collection_name());
        Ok(())
    }
}

/// SQLite store for window summaries
pub struct SqliteSummaryStore {
    conn: Connection,
}

impl SqliteSummaryStore {
    /// Create or open the summary database at path
    pub fn new(db_path: &Path, pairs: &[CurrencyPair]) -> Result<Self> {
        let conn = Connection::open(db_path)
            .map_err(|e| TrackerError::StoreError(format!("Failed to open database: {}", e)))?;
        Self::with_connection(conn, pairs)
    }

    /// Create in-memory summary database (for testing)
    pub fn new_in_memory(pairs: &[CurrencyPair]) -> Result<Self> {
        let conn = Connection::open_in_memory().map_err(|e| {
            TrackerError::StoreError(format!("Failed to create in-memory database: {}", e))
        })?;
        Self::with_connection(conn, pairs)
    }

    fn with_connection(conn: Connection, pairs: &[CurrencyPair]) -> Result<Self> {
        for pair in pairs {
            conn.execute(
                &format!(
                    "CREATE TABLE IF NOT EXISTS {} (
                        max_rate REAL NOT NULL,
                        min_rate REAL NOT NULL,
                        mean_rate REAL NOT NULL,
                        volatility REAL NOT NULL,
                        jump_metric REAL NOT NULL,
                        data_timestamp TEXT,
                        entry_timestamp TEXT NOT NULL
                    )",
                    pair.summary_collection_name()
                ),
                [],
            )
            .map_err(|e| {
                TrackerError::StoreError(format!(
                    "Failed to create summary table for {}: {}",
                    pair, e
                ))
            })?;
        }

        Ok(Self { conn })
    }
}

impl SummaryStore for SqliteSummaryStore {
    fn append(&mut self, summary: &WindowSummary) -> Result<()> {
        self.conn
            .execute(
                &format!(
                    "INSERT INTO {} (max_rate, min_rate, mean_rate, volatility,
                                     jump_metric, data_timestamp, entry_timestamp)
                     VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7)",
                    summary.pair.summary_collection_name()
                ),
                params![
                    summary.max_rate,
                    summary.min_rate,
                    summary.mean_rate,
                    summary.volatility,
                    summary.fractal_dimension,
                    summary.window_start,
                    summary.emitted_at,
                ],
            )
            .map_err(|e| {
                TrackerError::StoreError(format!(
                    "Failed to insert summary for {}: {}",
                    summary.pair, e
                ))
            })?;

        Ok(())
    }

    fn read_all(&self, pair: &CurrencyPair) -> Result<Vec<WindowSummary>> {
        let mut stmt = self
            .conn
            .prepare(&format!(
                "SELECT max_rate, min_rate, mean_rate, volatility, jump_metric,
                        data_timestamp, entry_timestamp
                 FROM {} ORDER BY rowid",
                pair.summary_collection_name()
            ))
            .map_err(|e| TrackerError::StoreError(format!("Failed to prepare query: {}", e)))?;

        let pair = *pair;
        let summaries = stmt
            .query_map([], |row| {
                Ok(WindowSummary {
                    pair,
                    max_rate: row.get(0)?,
                    min_rate: row.get(1)?,
                    mean_rate: row.get(2)?,
                    volatility: row.get(3)?,
                    fractal_dimension: row.get(4)?,
                    window_start: row.get::<_, Option<Timestamp>>(5)?,
                    emitted_at: row.get(6)?,
                })
            })
            .map_err(|e| TrackerError::StoreError(format!("Failed to query summaries: {}", e)))?
            .collect::<std::result::Result<Vec<_>, _>>()
            .map_err(|e| TrackerError::StoreError(format!("Failed to collect summaries: {}", e)))?;

        Ok(summaries)
    }
}

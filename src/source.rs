//! Quote source integrations
//!
//! A quote source resolves one conversion rate per tracked pair per poll
//! tick. The production source is the polygon.io currency conversion
//! endpoint; `ScriptedQuoteSource` replays canned quotes for tests.

use crate::currency::CurrencyPair;
use crate::error::{Result, TrackerError};
use crate::types::{Rate, Timestamp};
use chrono::{TimeZone, Utc};
use reqwest::Client;
use serde::Deserialize;
use std::collections::VecDeque;
use std::future::Future;
use std::sync::Mutex;
use std::time::Duration;

const POLYGON_BASE_URL: &str = "https://api.polygon.io/v1/conversion";
const FETCH_TIMEOUT_SECS: u64 = 10;

/// One successful quote for a pair
#[derive(Debug, Clone, Copy)]
pub struct Quote {
    pub rate: Rate,
    /// Timestamp reported by the provider for the underlying price
    pub timestamp: Timestamp,
}

/// Trait for rate-quote providers
pub trait QuoteSource: Send + Sync {
    /// Fetch the current conversion rate for a pair
    fn fetch(&self, pair: &CurrencyPair) -> impl Future<Output = Result<Quote>> + Send;

    /// Get the source name
    fn name(&self) -> &str;
}

/// polygon.io currency conversion source
pub struct PolygonQuoteSource {
    api_key: String,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ConversionResponse {
    converted: f64,
    last: LastQuote,
}

#[derive(Debug, Deserialize)]
struct LastQuote {
    /// Epoch milliseconds of the quoted price
    timestamp: i64,
}

impl PolygonQuoteSource {
    /// Create a new polygon.io source
    ///
    /// The client carries the bounded fetch timeout, so no single poll can
    /// stall the loop past it.
    pub fn new(api_key: String) -> Result<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(FETCH_TIMEOUT_SECS))
            .build()
            .map_err(|e| TrackerError::FetchError(format!("Failed to create HTTP client: {}", e)))?;

        Ok(Self { api_key, client })
    }
}

impl QuoteSource for PolygonQuoteSource {
    async fn fetch(&self, pair: &CurrencyPair) -> Result<Quote> {
        let url = format!(
            "{}/{}/{}?amount=1&precision=4&apiKey={}",
            POLYGON_BASE_URL,
            pair.base.code(),
            pair.quote.code(),
            self.api_key
        );

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| TrackerError::FetchError(format!("HTTP request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(TrackerError::FetchError(format!(
                "Quote source returned error for {}: {}",
                pair,
                response.status()
            )));
        }

        let data: ConversionResponse = response
            .json()
            .await
            .map_err(|e| TrackerError::FetchError(format!("JSON parse error: {}", e)))?;

        let timestamp = Utc
            .timestamp_millis_opt(data.last.timestamp)
            .single()
            .ok_or_else(|| {
                TrackerError::ParseError(format!(
                    "Unrepresentable quote timestamp: {}",
                    data.last.timestamp
                ))
            })?;

        Ok(Quote {
            rate: data.converted,
            timestamp,
        })
    }

    fn name(&self) -> &str {
        "polygon"
    }
}

/// Deterministic replay source for tests
///
/// Quotes are consumed per pair in FIFO order; an exhausted script reports
/// a fetch error, which the poll loop treats as a skipped tick.
pub struct ScriptedQuoteSource {
    quotes: Mutex<hashbrown::HashMap<CurrencyPair, VecDeque<Quote>>>,
}

impl ScriptedQuoteSource {
    /// Create an empty scripted source
    pub fn new() -> Self {
        Self {
            quotes: Mutex::new(hashbrown::HashMap::new()),
        }
    }

    /// Queue a quote for a pair
    pub fn enqueue(&self, pair: CurrencyPair, rate: Rate, timestamp: Timestamp) {
        let mut quotes = self.quotes.lock().unwrap();
        quotes
            .entry(pair)
            .or_default()
            .push_back(Quote { rate, timestamp });
    }

    /// Queue the same sequence of rates for a pair, one per tick
    pub fn enqueue_rates(&self, pair: CurrencyPair, rates: &[Rate], timestamp: Timestamp) {
        for &rate in rates {
            self.enqueue(pair, rate, timestamp);
        }
    }

    /// Number of quotes still queued for a pair
    pub fn remaining(&self, pair: &CurrencyPair) -> usize {
        let quotes = self.quotes.lock().unwrap();
        quotes.get(pair).map(|q| q.len()).unwrap_or(0)
    }
}

impl Default for ScriptedQuoteSource {
    fn default() -> Self {
        Self::new()
    }
}

impl QuoteSource for ScriptedQuoteSource {
    async fn fetch(&self, pair: &CurrencyPair) -> Result<Quote> {
        let mut quotes = self.quotes.lock().unwrap();
        quotes
            .get_mut(pair)
            .and_then(|queue| queue.pop_front())
            .ok_or_else(|| {
                TrackerError::FetchError(format!("No scripted quote left for {}", pair))
            })
    }

    fn name(&self) -> &str {
        "scripted"
    }
}

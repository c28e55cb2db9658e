//! In-memory sample and summary stores
//!
//! Document-style collections keyed by pair, held in shared maps. Clones
//! share the same underlying storage, so tests can keep a handle while the
//! tracker owns the store.

use super::{SampleStore, SummaryStore};
use crate::currency::CurrencyPair;
use crate::error::Result;
use crate::types::{Observation, Rate, WindowSummary};
use hashbrown::HashMap;
use std::sync::{Arc, RwLock};

/// In-memory store for raw observations
#[derive(Debug, Clone, Default)]
pub struct MemorySampleStore {
    samples: Arc<RwLock<HashMap<CurrencyPair, Vec<Observation>>>>,
}

impl MemorySampleStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of pairs with at least one stored observation
    pub fn num_pairs(&self) -> usize {
        let samples = self.samples.read().unwrap();
        samples.values().filter(|v| !v.is_empty()).count()
    }

    /// Total stored observations across all pairs
    pub fn num_entries(&self) -> usize {
        let samples = self.samples.read().unwrap();
        samples.values().map(|v| v.len()).sum()
    }
}

impl SampleStore for MemorySampleStore {
    fn append(&mut self, observation: &Observation) -> Result<()> {
        let mut samples = self.samples.write().unwrap();
        samples
            .entry(observation.pair)
            .or_default()
            .push(observation.clone());
        Ok(())
    }

    fn read_rates(&self, pair: &CurrencyPair) -> Result<Vec<Rate>> {
        let samples = self.samples.read().unwrap();
        Ok(samples
            .get(pair)
            .map(|v| v.iter().map(|obs| obs.rate).collect())
            .unwrap_or_default())
    }

    fn clear(&mut self, pair: &CurrencyPair) -> Result<()> {
        let mut samples = self.samples.write().unwrap();
        if let Some(collection) = samples.get_mut(pair) {
            collection.clear();
        }
        Ok(())
    }
}

/// In-memory store for window summaries
#[derive(Debug, Clone, Default)]
pub struct MemorySummaryStore {
    summaries: Arc<RwLock<HashMap<CurrencyPair, Vec<WindowSummary>>>>,
}

impl MemorySummaryStore {
    /// Create an empty store
    pub fn new() -> Self {
        Self::default()
    }

    /// Total stored summaries across all pairs
    pub fn num_entries(&self) -> usize {
        let summaries = self.summaries.read().unwrap();
        summaries.values().map(|v| v.len()).sum()
    }
}

impl SummaryStore for MemorySummaryStore {
    fn append(&mut self, summary: &WindowSummary) -> Result<()> {
        let mut summaries = self.summaries.write().unwrap();
        summaries
            .entry(summary.pair)
            .or_default()
            .push(summary.clone());
        Ok(())
    }

    fn read_all(&self, pair: &CurrencyPair) -> Result<Vec<WindowSummary>> {
        let summaries = self.summaries.read().unwrap();
        Ok(summaries.get(pair).cloned().unwrap_or_default())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::currency::Currency;
    use chrono::Utc;

    #[test]
    fn test_append_and_read() {
        let mut store = MemorySampleStore::new();
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD);
        let ts = Utc::now();

        store.append(&Observation::new(pair, 1.08, ts)).unwrap();
        store.append(&Observation::new(pair, 1.09, ts)).unwrap();

        assert_eq!(store.read_rates(&pair).unwrap(), vec![1.08, 1.09]);
        assert_eq!(store.num_pairs(), 1);
        assert_eq!(store.num_entries(), 2);
    }

    #[test]
    fn test_clear_is_per_pair() {
        let mut store = MemorySampleStore::new();
        let eur_usd = CurrencyPair::new(Currency::EUR, Currency::USD);
        let chf_jpy = CurrencyPair::new(Currency::CHF, Currency::JPY);
        let ts = Utc::now();

        store.append(&Observation::new(eur_usd, 1.08, ts)).unwrap();
        store.append(&Observation::new(chf_jpy, 171.4, ts)).unwrap();

        store.clear(&eur_usd).unwrap();

        assert!(store.read_rates(&eur_usd).unwrap().is_empty());
        assert_eq!(store.read_rates(&chf_jpy).unwrap(), vec![171.4]);
    }

    #[test]
    fn test_clones_share_storage() {
        let mut store = MemorySampleStore::new();
        let handle = store.clone();
        let pair = CurrencyPair::new(Currency::GBP, Currency::INR);

        store
            .append(&Observation::new(pair, 104.2, Utc::now()))
            .unwrap();

        assert_eq!(handle.read_rates(&pair).unwrap(), vec![104.2]);
    }

    #[test]
    fn test_summary_store() {
        let mut store = MemorySummaryStore::new();
        let pair = CurrencyPair::new(Currency::EUR, Currency::USD);

        let summary = WindowSummary {
            pair,
            max_rate: 1.09,
            min_rate: 1.08,
            mean_rate: 1.085,
            volatility: 0.0092,
            fractal_dimension: 200.0,
            window_start: Some(Utc::now()),
            emitted_at: Utc::now(),
        };
        store.append(&summary).unwrap();

        let read = store.read_all(&pair).unwrap();
        assert_eq!(read.len(), 1);
        assert_eq!(read[0].mean_rate, 1.085);
        assert_eq!(store.num_entries(), 1);
    }
}

//! Integration tests for the full tracking run
//!
//! Drives `Tracker::run` end to end over a scripted quote source and shared
//! in-memory stores, with millisecond-scale cadence so several windows close
//! within the test budget.

use fx_tracker::config::TrackerConfig;
use fx_tracker::currency::{Currency, CurrencyPair};
use fx_tracker::source::ScriptedQuoteSource;
use fx_tracker::store::{MemorySampleStore, MemorySummaryStore, SampleStore, SummaryStore};
use fx_tracker::tracker::Tracker;
use chrono::Utc;
use std::time::Duration;

fn short_config(pairs: Vec<CurrencyPair>) -> TrackerConfig {
    TrackerConfig {
        pairs,
        poll_interval: Duration::from_millis(5),
        window_length: Duration::from_millis(50),
        run_duration: Duration::from_millis(200),
        api_key: "test-key".to_string(),
    }
}

#[tokio::test]
async fn test_full_run_emits_summaries_for_all_pairs() {
    let eur_usd = CurrencyPair::new(Currency::EUR, Currency::USD);
    let chf_jpy = CurrencyPair::new(Currency::CHF, Currency::JPY);

    let source = ScriptedQuoteSource::new();
    let ts = Utc::now();
    for i in 0..200 {
        source.enqueue(eur_usd, 1.08 + (i % 7) as f64 * 0.001, ts);
        source.enqueue(chf_jpy, 171.0 + (i % 5) as f64 * 0.1, ts);
    }

    let samples = MemorySampleStore::new();
    let summaries = MemorySummaryStore::new();

    let mut tracker = Tracker::new(
        short_config(vec![eur_usd, chf_jpy]),
        source,
        Box::new(samples.clone()),
        Box::new(summaries.clone()),
    )
    .unwrap();

    tracker.run().await.unwrap();

    // The final flush guarantees at least one summary per tracked pair even
    // if scheduling jitter swallowed every steady rollover
    for pair in [eur_usd, chf_jpy] {
        let emitted = summaries.read_all(&pair).unwrap();
        assert!(
            !emitted.is_empty(),
            "expected at least one summary for {}",
            pair
        );
        for summary in &emitted {
            assert!(summary.fractal_dimension >= 0.0);
            assert!(summary.max_rate >= summary.min_rate);
        }

        // Sample collections are truncated on shutdown
        assert!(samples.read_rates(&pair).unwrap().is_empty());
    }
}

#[tokio::test]
async fn test_run_survives_total_fetch_failure() {
    let pair = CurrencyPair::new(Currency::EUR, Currency::USD);

    // Empty script: every fetch fails and every tick is skipped
    let source = ScriptedQuoteSource::new();
    let summaries = MemorySummaryStore::new();

    let mut tracker = Tracker::new(
        short_config(vec![pair]),
        source,
        Box::new(MemorySampleStore::new()),
        Box::new(summaries.clone()),
    )
    .unwrap();

    tracker.run().await.unwrap();

    // The flush still reports the (empty) final window
    let emitted = summaries.read_all(&pair).unwrap();
    assert!(!emitted.is_empty());
    let last = emitted.last().unwrap();
    assert_eq!(last.mean_rate, 0.0);
    assert_eq!(last.volatility, 0.0);
    assert_eq!(last.fractal_dimension, 0.0);
    assert_eq!(last.window_start, None);
}

#[tokio::test]
async fn test_summaries_are_emitted_in_order() {
    let pair = CurrencyPair::new(Currency::GBP, Currency::INR);

    let source = ScriptedQuoteSource::new();
    let ts = Utc::now();
    for i in 0..200 {
        source.enqueue(pair, 104.0 + (i % 3) as f64 * 0.05, ts);
    }

    let summaries = MemorySummaryStore::new();
    let mut tracker = Tracker::new(
        short_config(vec![pair]),
        source,
        Box::new(MemorySampleStore::new()),
        Box::new(summaries.clone()),
    )
    .unwrap();

    tracker.run().await.unwrap();

    let emitted = summaries.read_all(&pair).unwrap();
    for window in emitted.windows(2) {
        assert!(window[0].emitted_at <= window[1].emitted_at);
    }
}

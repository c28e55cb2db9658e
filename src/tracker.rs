//! Poll loop and window rollover state machine
//!
//! The tracker drives one fetch per pair per tick, folds successful quotes
//! into per-pair window statistics and the sample store, and closes the
//! window once the configured length has elapsed. Bands built from a closing
//! window always score the *following* window's samples, so every summary is
//! judged against the previous window's channel, never its own.

use crate::channel::{count_jumps, fractal_dimension, ChannelBands};
use crate::config::TrackerConfig;
use crate::currency::CurrencyPair;
use crate::error::Result;
use crate::source::{Quote, QuoteSource};
use crate::stats::WindowStats;
use crate::store::{SampleStore, SummaryStore};
use crate::types::{Observation, Timestamp, WindowSummary};
use chrono::Utc;
use hashbrown::HashMap;
use std::time::Instant;

/// Rollover phase of the tracking run
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum WindowPhase {
    /// First window since start; no bands exist yet
    Warmup,
    /// Bands from the previous window are held and ready to score
    Steady,
}

/// Per-pair state owned by the tracker
#[derive(Debug, Default)]
struct PairSlot {
    stats: WindowStats,
    /// Channel built at the previous rollover; empty during warmup
    bands: ChannelBands,
}

/// Streaming FX tracker
pub struct Tracker<S: QuoteSource> {
    config: TrackerConfig,
    source: S,
    samples: Box<dyn SampleStore>,
    summaries: Box<dyn SummaryStore>,
    slots: HashMap<CurrencyPair, PairSlot>,
    phase: WindowPhase,
    /// Wall-clock instant the current window opened
    window_opened: Timestamp,
}

impl<S: QuoteSource> Tracker<S> {
    /// Create a tracker; fails fast on invalid configuration
    pub fn new(
        config: TrackerConfig,
        source: S,
        samples: Box<dyn SampleStore>,
        summaries: Box<dyn SummaryStore>,
    ) -> Result<Self> {
        config.validate()?;

        let slots = config
            .pairs
            .iter()
            .map(|&pair| (pair, PairSlot::default()))
            .collect();

        Ok(Self {
            config,
            source,
            samples,
            summaries,
            slots,
            phase: WindowPhase::Warmup,
            window_opened: Utc::now(),
        })
    }

    /// Run the poll loop for the configured duration, then flush
    ///
    /// Fetch errors skip the affected pair for the tick; store errors abort
    /// the run. Store handles are released when the tracker is dropped, on
    /// every exit path.
    pub async fn run(&mut self) -> Result<()> {
        let started = Instant::now();
        self.window_opened = Utc::now();

        log::info!(
            "Tracking {} pairs via {} (tick {:?}, window {:?}, duration {:?})",
            self.config.pairs.len(),
            self.source.name(),
            self.config.poll_interval,
            self.config.window_length,
            self.config.run_duration
        );

        loop {
            let tick_started = Instant::now();
            self.poll_pairs().await?;

            // Tick budget net of fetch time; skip the sleep entirely once
            // fetching is slower than the cadence
            let fetch_elapsed = tick_started.elapsed();
            if fetch_elapsed < self.config.poll_interval {
                tokio::time::sleep(self.config.poll_interval - fetch_elapsed).await;
            }

            self.maybe_rollover(Utc::now())?;

            if started.elapsed() >= self.config.run_duration {
                break;
            }
        }

        self.flush(Utc::now())
    }

    /// Fetch one quote per pair and fold successes into window state
    async fn poll_pairs(&mut self) -> Result<()> {
        for pair in self.config.pairs.clone() {
            let fetched = self.source.fetch(&pair).await;
            match fetched {
                Ok(quote) => self.record(pair, quote)?,
                Err(e) => log::warn!("Skipping {} this tick: {}", pair, e),
            }
        }
        Ok(())
    }

    fn record(&mut self, pair: CurrencyPair, quote: Quote) -> Result<()> {
        let observation = Observation::new(pair, quote.rate, quote.timestamp);
        self.samples.append(&observation)?;

        if let Some(slot) = self.slots.get_mut(&pair) {
            slot.stats.update(quote.rate);
            if slot.stats.first_timestamp.is_none() {
                slot.stats.first_timestamp = Some(quote.timestamp);
            }
            log::debug!(
                "{} -> {} ({} samples this window)",
                pair,
                quote.rate,
                slot.stats.count
            );
        }

        Ok(())
    }

    /// Close the window if its length has elapsed; returns whether it did
    fn maybe_rollover(&mut self, now: Timestamp) -> Result<bool> {
        let elapsed = (now - self.window_opened).to_std().unwrap_or_default();
        if elapsed < self.config.window_length {
            return Ok(false);
        }

        self.rollover(now)?;
        Ok(true)
    }

    fn rollover(&mut self, now: Timestamp) -> Result<()> {
        match self.phase {
            WindowPhase::Warmup => {
                // No bands exist yet, so the first window is never scored;
                // it only seeds the channel for the next one
                log::info!("First window closed; building initial bands");
                for pair in self.config.pairs.clone() {
                    self.samples.clear(&pair)?;
                    if let Some(slot) = self.slots.get_mut(&pair) {
                        slot.bands = ChannelBands::build(slot.stats.mean, slot.stats.volatility);
                        slot.stats.reset();
                    }
                }
                self.phase = WindowPhase::Steady;
            }
            WindowPhase::Steady => {
                for pair in self.config.pairs.clone() {
                    self.close_window(pair, now)?;
                }
            }
        }

        self.window_opened = now;
        Ok(())
    }

    /// Score and summarize one pair's just-finished window, then re-arm it
    fn close_window(&mut self, pair: CurrencyPair, now: Timestamp) -> Result<()> {
        let rates = self.samples.read_rates(&pair)?;

        if let Some(slot) = self.slots.get_mut(&pair) {
            // Scored against the bands held since the previous rollover
            let jumps = count_jumps(&rates, &slot.bands);
            let fd = fractal_dimension(jumps, slot.stats.range());

            let summary = WindowSummary {
                pair,
                max_rate: slot.stats.max,
                min_rate: slot.stats.min,
                mean_rate: slot.stats.mean,
                volatility: slot.stats.volatility,
                fractal_dimension: fd,
                window_start: slot.stats.first_timestamp,
                emitted_at: now,
            };
            self.summaries.append(&summary)?;

            log::info!(
                "{}: window closed with {} jumps over {} samples, fd {:.6}",
                pair,
                jumps,
                rates.len(),
                fd
            );

            self.samples.clear(&pair)?;

            // The just-closed window's statistics become the channel for the
            // next window
            slot.bands = ChannelBands::build(slot.stats.mean, slot.stats.volatility);
            slot.stats.reset();
        }

        Ok(())
    }

    /// Emit a final summary for every tracked pair and truncate samples
    ///
    /// Every tracked pair is flushed, not just the last one polled. During
    /// warmup no bands exist, so the metric degenerates to zero.
    fn flush(&mut self, now: Timestamp) -> Result<()> {
        log::info!(
            "Run complete; flushing {} pairs",
            self.config.pairs.len()
        );

        for pair in self.config.pairs.clone() {
            let rates = self.samples.read_rates(&pair)?;

            if let Some(slot) = self.slots.get_mut(&pair) {
                let jumps = count_jumps(&rates, &slot.bands);
                let fd = fractal_dimension(jumps, slot.stats.range());

                let summary = WindowSummary {
                    pair,
                    max_rate: slot.stats.max,
                    min_rate: slot.stats.min,
                    mean_rate: slot.stats.mean,
                    volatility: slot.stats.volatility,
                    fractal_dimension: fd,
                    window_start: slot.stats.first_timestamp,
                    emitted_at: now,
                };
                self.summaries.append(&summary)?;
                self.samples.clear(&pair)?;
            }
        }

        Ok(())
    }
}

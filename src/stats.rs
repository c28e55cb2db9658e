//! Online per-window statistics accumulator
//!
//! One `WindowStats` lives per tracked pair and is updated once per observed
//! rate. Mean and volatility are recomputed on every update so callers can
//! read them at any point in the window without a finalize step.

use crate::types::{Rate, Timestamp};

/// Running statistics for the current aggregation window of one pair
#[derive(Debug, Clone)]
pub struct WindowStats {
    pub count: u64,
    pub sum: f64,
    pub max: f64,
    pub min: f64,
    pub mean: f64,
    /// Relative spread of the window: (max - min) / mean, 0 while mean is 0
    pub volatility: f64,
    /// Source timestamp of the window's first observation
    pub first_timestamp: Option<Timestamp>,
}

impl WindowStats {
    /// Create empty statistics for a fresh window
    pub fn new() -> Self {
        Self {
            count: 0,
            sum: 0.0,
            max: f64::NEG_INFINITY,
            min: f64::INFINITY,
            mean: 0.0,
            volatility: 0.0,
            first_timestamp: None,
        }
    }

    /// Fold one observed rate into the running statistics
    ///
    /// Accepts any finite rate as-is; no domain validation happens here.
    pub fn update(&mut self, rate: Rate) {
        self.sum += rate;
        self.count += 1;
        self.max = self.max.max(rate);
        self.min = self.min.min(rate);
        self.mean = self.sum / self.count as f64;
        self.volatility = if self.mean != 0.0 {
            (self.max - self.min) / self.mean
        } else {
            0.0
        };
    }

    /// Window price range (max - min), 0 for an empty window
    pub fn range(&self) -> f64 {
        if self.count == 0 {
            0.0
        } else {
            self.max - self.min
        }
    }

    /// Reset to the initial state at window rollover
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}

impl Default for WindowStats {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use proptest::prelude::*;

    #[test]
    fn test_empty_window() {
        let stats = WindowStats::new();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.volatility, 0.0);
        assert_eq!(stats.range(), 0.0);
        assert!(stats.first_timestamp.is_none());
    }

    #[test]
    fn test_single_update() {
        let mut stats = WindowStats::new();
        stats.update(1.25);

        assert_eq!(stats.count, 1);
        assert_eq!(stats.max, 1.25);
        assert_eq!(stats.min, 1.25);
        assert_eq!(stats.mean, 1.25);
        assert_eq!(stats.volatility, 0.0);
        assert_eq!(stats.range(), 0.0);
    }

    #[test]
    fn test_running_mean_and_volatility() {
        let mut stats = WindowStats::new();
        for rate in [100.0, 102.0, 98.0, 100.0] {
            stats.update(rate);
        }

        assert_eq!(stats.count, 4);
        assert_eq!(stats.max, 102.0);
        assert_eq!(stats.min, 98.0);
        assert_relative_eq!(stats.mean, 100.0);
        assert_relative_eq!(stats.volatility, 4.0 / 100.0);
        assert_relative_eq!(stats.range(), 4.0);
    }

    #[test]
    fn test_zero_and_negative_rates_accepted() {
        // No domain validation in the accumulator; a mean of exactly zero
        // must not divide
        let mut stats = WindowStats::new();
        stats.update(-1.0);
        stats.update(1.0);

        assert_eq!(stats.mean, 0.0);
        assert_eq!(stats.volatility, 0.0);
        assert_eq!(stats.range(), 2.0);
    }

    #[test]
    fn test_reset() {
        let mut stats = WindowStats::new();
        stats.update(1.1);
        stats.first_timestamp = Some(chrono::Utc::now());

        stats.reset();
        assert_eq!(stats.count, 0);
        assert_eq!(stats.max, f64::NEG_INFINITY);
        assert_eq!(stats.min, f64::INFINITY);
        assert!(stats.first_timestamp.is_none());
    }

    proptest! {
        #[test]
        fn prop_count_matches_updates(rates in prop::collection::vec(0.0001f64..10_000.0, 1..200)) {
            let mut stats = WindowStats::new();
            for &rate in &rates {
                stats.update(rate);
            }

            prop_assert_eq!(stats.count, rates.len() as u64);
            prop_assert!(stats.max >= stats.min);
            // Summation rounding can push the mean a few ulps past the
            // extremes, so compare with a relative tolerance
            let tol = 1e-9 * stats.max.abs().max(1.0);
            prop_assert!(stats.mean >= stats.min - tol && stats.mean <= stats.max + tol);
        }
    }
}

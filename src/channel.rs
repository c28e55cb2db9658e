//! Keltner channel bands and price-jump scoring
//!
//! A channel is a ladder of 100 symmetric threshold levels around a window's
//! mean, spaced by a fixed fraction of the window's volatility. Jump scoring
//! replays a window's raw rates against a previously built channel and counts
//! how many of them escaped the tightest band pair; the count normalized by
//! the window's price range gives the fractal dimension metric.

use crate::types::Rate;

/// Number of band levels on each side of the mean
pub const BAND_COUNT: usize = 100;

/// Volatility fraction separating adjacent band levels
pub const BAND_STEP: f64 = 0.025;

/// Raw fractal dimension above this is rescaled once by the same amount
pub const FD_RESCALE_THRESHOLD: f64 = 100_000.0;

/// Threshold ladder built from one window's mean and volatility
///
/// Level `n` (0-based) sits `(n + 1) * BAND_STEP * volatility` away from the
/// mean, so index 0 is the tightest band pair. With zero volatility every
/// level collapses to the mean and any deviation scores as a jump.
#[derive(Debug, Clone, Default)]
pub struct ChannelBands {
    pub upper: Vec<f64>,
    pub lower: Vec<f64>,
}

impl ChannelBands {
    /// Build the channel for a window's closing statistics
    pub fn build(mean: f64, volatility: f64) -> Self {
        let upper = (1..=BAND_COUNT)
            .map(|n| mean + n as f64 * BAND_STEP * volatility)
            .collect();
        let lower = (1..=BAND_COUNT)
            .map(|n| mean - n as f64 * BAND_STEP * volatility)
            .collect();
        Self { upper, lower }
    }

    /// Whether the channel has been built yet
    pub fn is_empty(&self) -> bool {
        self.upper.is_empty()
    }
}

/// Count rates that escaped the channel
///
/// Each rate scans band pairs from the tightest outward and counts as one
/// jump on the first strict breach, regardless of how many wider bands it
/// also escapes.
pub fn count_jumps(rates: &[Rate], bands: &ChannelBands) -> u64 {
    let mut jumps = 0;
    for &rate in rates {
        for (ub, lb) in bands.upper.iter().zip(bands.lower.iter()) {
            if rate > *ub || rate < *lb {
                jumps += 1;
                break;
            }
        }
    }
    jumps
}

/// Normalize a jump count into the fractal dimension metric
///
/// The jump count is divided by the window's price range; a zero range
/// (flat or empty window) yields 0. A result above `FD_RESCALE_THRESHOLD`
/// is divided by the threshold exactly once, which is a rescale rather
/// than a true bound.
pub fn fractal_dimension(jumps: u64, range: f64) -> f64 {
    let fd = if range != 0.0 {
        jumps as f64 / range
    } else {
        0.0
    };

    if fd > FD_RESCALE_THRESHOLD {
        fd / FD_RESCALE_THRESHOLD
    } else {
        fd
    }
}

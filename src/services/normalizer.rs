//! Signal normalization.
//!
//! Maps the provider's free-text recommendation and its vote tally onto a
//! [`Signal`] with a confidence percentage.

use crate::types::{Signal, VoteCounts};

/// Confidence reported for a HOLD when no votes were cast.
const EMPTY_HOLD_CONFIDENCE: f64 = 50.0;

/// Result of normalizing a provider recommendation.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Normalized {
    pub signal: Signal,
    /// Percentage in `[0, 100]`, rounded to two decimals.
    pub confidence: f64,
}

/// Normalize a recommendation such as `"STRONG_BUY"` into a signal.
///
/// Matching is by case-sensitive substring, BUY taking precedence over SELL.
/// Anything else is a HOLD. With zero votes BUY and SELL report 0% while
/// HOLD reports 50%.
pub fn normalize(recommendation: &str, votes: VoteCounts) -> Normalized {
    let total = votes.total();

    let (signal, agreeing, empty) = if recommendation.contains("BUY") {
        (Signal::Buy, votes.buy, 0.0)
    } else if recommendation.contains("SELL") {
        (Signal::Sell, votes.sell, 0.0)
    } else {
        (Signal::Hold, votes.neutral, EMPTY_HOLD_CONFIDENCE)
    };

    let confidence = if total > 0 {
        f64::from(agreeing) / total as f64 * 100.0
    } else {
        empty
    };

    Normalized {
        signal,
        confidence: round2(confidence),
    }
}

fn round2(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

//! Analysis providers.

pub mod tradingview;

pub use tradingview::TradingViewClient;

use crate::error::ProviderError;
use crate::types::{Interval, VoteCounts};
use async_trait::async_trait;
use std::collections::HashMap;

/// What to analyze.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisQuery {
    pub symbol: String,
    pub exchange: String,
    /// Market category, e.g. `crypto` or `america`.
    pub screener: String,
    pub interval: Interval,
}

impl AnalysisQuery {
    /// `EXCHANGE:SYMBOL` ticker, upper-cased.
    pub fn ticker(&self) -> String {
        format!("{}:{}", self.exchange, self.symbol).to_uppercase()
    }
}

/// Raw provider output before normalization.
#[derive(Debug, Clone, Default)]
pub struct ProviderAnalysis {
    /// Summary label such as `STRONG_BUY` or `NEUTRAL`.
    pub recommendation: String,
    pub votes: VoteCounts,
    /// Indicator values keyed by column name (`RSI`, `MACD.macd`, `close`, ...).
    pub indicators: HashMap<String, f64>,
}

impl ProviderAnalysis {
    pub fn indicator(&self, name: &str) -> Option<f64> {
        self.indicators.get(name).copied()
    }
}

/// A source of technical analysis for a ticker.
#[async_trait]
pub trait AnalysisProvider: Send + Sync {
    /// Provider name used in logs.
    fn name(&self) -> &str;

    async fn analyze(&self, query: &AnalysisQuery) -> Result<ProviderAnalysis, ProviderError>;
}

use serde::{Deserialize, Serialize};
use std::fmt;

/// Candle interval accepted by the analyze endpoint.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Interval {
    #[serde(rename = "1m")]
    OneMinute,
    #[serde(rename = "5m")]
    FiveMinutes,
    #[serde(rename = "15m")]
    FifteenMinutes,
    #[serde(rename = "1h")]
    OneHour,
    #[serde(rename = "4h")]
    FourHours,
    #[serde(rename = "1d")]
    OneDay,
}

impl Interval {
    /// Every supported interval, shortest first.
    pub const ALL: [Interval; 6] = [
        Interval::OneMinute,
        Interval::FiveMinutes,
        Interval::FifteenMinutes,
        Interval::OneHour,
        Interval::FourHours,
        Interval::OneDay,
    ];

    /// Parse an interval tag such as `"1h"`.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "1m" => Some(Interval::OneMinute),
            "5m" => Some(Interval::FiveMinutes),
            "15m" => Some(Interval::FifteenMinutes),
            "1h" => Some(Interval::OneHour),
            "4h" => Some(Interval::FourHours),
            "1d" => Some(Interval::OneDay),
            _ => None,
        }
    }

    /// Tag used in requests and responses.
    pub fn as_str(&self) -> &'static str {
        match self {
            Interval::OneMinute => "1m",
            Interval::FiveMinutes => "5m",
            Interval::FifteenMinutes => "15m",
            Interval::OneHour => "1h",
            Interval::FourHours => "4h",
            Interval::OneDay => "1d",
        }
    }

    /// Suffix appended to TradingView scanner columns.
    /// The daily timeframe is the scanner default and takes no suffix.
    pub fn column_suffix(&self) -> &'static str {
        match self {
            Interval::OneMinute => "|1",
            Interval::FiveMinutes => "|5",
            Interval::FifteenMinutes => "|15",
            Interval::OneHour => "|60",
            Interval::FourHours => "|240",
            Interval::OneDay => "",
        }
    }
}

impl fmt::Display for Interval {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Normalized trading signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Signal {
    Buy,
    Sell,
    Hold,
}

impl fmt::Display for Signal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Signal::Buy => write!(f, "BUY"),
            Signal::Sell => write!(f, "SELL"),
            Signal::Hold => write!(f, "HOLD"),
        }
    }
}

/// Summary label derived from the scanner's `Recommend.All` rating.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Recommendation {
    StrongBuy,
    Buy,
    Neutral,
    Sell,
    StrongSell,
}

impl Recommendation {
    /// Map a rating in `[-1, 1]` to a label. Out-of-range ratings have none.
    pub fn from_rating(value: f64) -> Option<Self> {
        if (-1.0..-0.5).contains(&value) {
            Some(Recommendation::StrongSell)
        } else if (-0.5..-0.1).contains(&value) {
            Some(Recommendation::Sell)
        } else if (-0.1..=0.1).contains(&value) {
            Some(Recommendation::Neutral)
        } else if value > 0.1 && value <= 0.5 {
            Some(Recommendation::Buy)
        } else if value > 0.5 && value <= 1.0 {
            Some(Recommendation::StrongBuy)
        } else {
            None
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Recommendation::StrongBuy => "STRONG_BUY",
            Recommendation::Buy => "BUY",
            Recommendation::Neutral => "NEUTRAL",
            Recommendation::Sell => "SELL",
            Recommendation::StrongSell => "STRONG_SELL",
        }
    }
}

/// Buy/sell/neutral vote tally.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct VoteCounts {
    pub buy: u32,
    pub sell: u32,
    pub neutral: u32,
}

impl VoteCounts {
    pub fn new(buy: u32, sell: u32, neutral: u32) -> Self {
        Self { buy, sell, neutral }
    }

    /// Total number of votes cast. Widened so three `u32` counts cannot overflow.
    pub fn total(&self) -> u64 {
        u64::from(self.buy) + u64::from(self.sell) + u64::from(self.neutral)
    }
}

impl std::ops::Add for VoteCounts {
    type Output = VoteCounts;

    fn add(self, rhs: VoteCounts) -> VoteCounts {
        VoteCounts {
            buy: self.buy.saturating_add(rhs.buy),
            sell: self.sell.saturating_add(rhs.sell),
            neutral: self.neutral.saturating_add(rhs.neutral),
        }
    }
}

/// Body of `POST /analyze`. Every field is optional.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AnalyzeRequest {
    pub symbol: Option<String>,
    pub interval: Option<String>,
    pub exchange: Option<String>,
}

/// Vote breakdown in the analyze response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisBreakdown {
    pub buy_signals: u32,
    pub sell_signals: u32,
    pub neutral_signals: u32,
}

impl From<VoteCounts> for AnalysisBreakdown {
    fn from(votes: VoteCounts) -> Self {
        Self {
            buy_signals: votes.buy,
            sell_signals: votes.sell,
            neutral_signals: votes.neutral,
        }
    }
}

/// Selected indicator values. Missing values serialize as `null`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndicatorSnapshot {
    pub rsi: Option<f64>,
    pub macd: Option<f64>,
    pub sma_20: Option<f64>,
    pub ema_20: Option<f64>,
}

/// Successful analyze response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub timestamp: String,
    pub symbol: String,
    pub interval: Interval,
    pub exchange: String,
    pub signal: Signal,
    pub confidence: f64,
    pub recommendation: String,
    pub current_price: Option<f64>,
    pub analysis: AnalysisBreakdown,
    pub indicators: IndicatorSnapshot,
}

/// Response mode for non-analysis results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ResponseMode {
    Demo,
    Error,
}

/// Fixed response used while the provider is unavailable.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DemoResponse {
    pub timestamp: String,
    pub symbol: String,
    pub signal: Signal,
    pub mode: ResponseMode,
    pub error: String,
}

/// Body of a failed analyze request.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub timestamp: String,
    pub symbol: String,
    pub error: String,
    pub mode: ResponseMode,
}

/// Current time as an RFC 3339 string.
pub fn now_timestamp() -> String {
    chrono::Utc::now().to_rfc3339()
}

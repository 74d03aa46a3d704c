use std::env;
use std::time::Duration;

use crate::sources::tradingview::TRADINGVIEW_SCANNER_URL;

/// TradingView provider configuration.
#[derive(Debug, Clone)]
pub struct TradingViewConfig {
    /// Whether to call TradingView at all. When false every analysis is a demo response.
    pub enabled: bool,
    /// Scanner base URL.
    pub scanner_url: String,
    /// Screener category for lookups (crypto, america, forex, ...).
    pub screener: String,
    /// Upper bound on a single provider call.
    pub timeout: Duration,
}

impl Default for TradingViewConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            scanner_url: TRADINGVIEW_SCANNER_URL.to_string(),
            screener: "crypto".to_string(),
            timeout: Duration::from_secs(10),
        }
    }
}

/// Defaults applied to missing fields of an analyze request.
#[derive(Debug, Clone)]
pub struct AnalyzeDefaults {
    pub symbol: String,
    pub interval: String,
    pub exchange: String,
}

impl Default for AnalyzeDefaults {
    fn default() -> Self {
        Self {
            symbol: "BTCUSDT".to_string(),
            interval: "1h".to_string(),
            exchange: "BINANCE".to_string(),
        }
    }
}

/// Application configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server host address.
    pub host: String,
    /// Server port.
    pub port: u16,
    pub tradingview: TradingViewConfig,
    pub defaults: AnalyzeDefaults,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        let defaults = TradingViewConfig::default();

        Self {
            host: env::var("HOST").unwrap_or_else(|_| "0.0.0.0".to_string()),
            port: env::var("PORT")
                .ok()
                .and_then(|p| p.parse().ok())
                .unwrap_or(5000),
            tradingview: TradingViewConfig {
                enabled: env::var("TRADINGVIEW_ENABLED")
                    .ok()
                    .map(|v| parse_flag(&v))
                    .unwrap_or(defaults.enabled),
                scanner_url: env::var("TRADINGVIEW_SCANNER_URL")
                    .unwrap_or(defaults.scanner_url),
                screener: env::var("TRADINGVIEW_SCREENER").unwrap_or(defaults.screener),
                timeout: env::var("TRADINGVIEW_TIMEOUT_SECS")
                    .ok()
                    .and_then(|v| v.parse().ok())
                    .map(Duration::from_secs)
                    .unwrap_or(defaults.timeout),
            },
            defaults: AnalyzeDefaults::default(),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 5000,
            tradingview: TradingViewConfig::default(),
            defaults: AnalyzeDefaults::default(),
        }
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_lowercase().as_str(), "true" | "1" | "yes" | "on")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.port, 5000);
        assert!(config.tradingview.enabled);
        assert_eq!(config.tradingview.screener, "crypto");
        assert_eq!(config.tradingview.timeout, Duration::from_secs(10));
        assert_eq!(config.defaults.symbol, "BTCUSDT");
        assert_eq!(config.defaults.interval, "1h");
        assert_eq!(config.defaults.exchange, "BINANCE");
    }

    #[test]
    fn test_parse_flag() {
        assert!(parse_flag("true"));
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(!parse_flag("false"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
    }
}

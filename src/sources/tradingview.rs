use crate::error::ProviderError;
use crate::services::ratings::{self, COLUMNS};
use crate::sources::{AnalysisProvider, AnalysisQuery, ProviderAnalysis};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::HashMap;
use std::time::Duration;
use tracing::{debug, warn};

pub const TRADINGVIEW_SCANNER_URL: &str = "https://scanner.tradingview.com";

/// Scanner request body.
#[derive(Debug, Serialize)]
struct ScanRequest<'a> {
    symbols: ScanSymbols,
    columns: &'a [String],
}

#[derive(Debug, Serialize)]
struct ScanSymbols {
    tickers: Vec<String>,
    query: ScanQuery,
}

#[derive(Debug, Serialize)]
struct ScanQuery {
    types: Vec<String>,
}

/// Scanner response.
#[derive(Debug, Deserialize)]
struct ScanResponse {
    #[serde(default)]
    data: Vec<ScanRow>,
}

#[derive(Debug, Deserialize)]
struct ScanRow {
    #[serde(default)]
    d: Vec<Value>,
}

/// TradingView scanner client.
#[derive(Clone)]
pub struct TradingViewClient {
    client: Client,
    base_url: String,
}

impl TradingViewClient {
    /// Create a new client. Fails only if the HTTP client cannot be built.
    pub fn new(base_url: impl Into<String>, timeout: Duration) -> Result<Self, ProviderError> {
        let client = Client::builder()
            .user_agent(concat!("tvsignal/", env!("CARGO_PKG_VERSION")))
            .timeout(timeout)
            .build()?;

        Ok(Self {
            client,
            base_url: base_url.into().trim_end_matches('/').to_string(),
        })
    }

    fn scan_url(&self, screener: &str) -> String {
        format!("{}/{}/scan", self.base_url, screener.to_lowercase())
    }
}

#[async_trait]
impl AnalysisProvider for TradingViewClient {
    fn name(&self) -> &str {
        "tradingview"
    }

    async fn analyze(&self, query: &AnalysisQuery) -> Result<ProviderAnalysis, ProviderError> {
        let ticker = query.ticker();
        let suffix = query.interval.column_suffix();
        let columns: Vec<String> = COLUMNS.iter().map(|c| format!("{}{}", c, suffix)).collect();

        let body = ScanRequest {
            symbols: ScanSymbols {
                tickers: vec![ticker.clone()],
                query: ScanQuery { types: Vec::new() },
            },
            columns: &columns,
        };

        debug!("Scanning {} on {} ({})", ticker, query.screener, query.interval);

        let response = self
            .client
            .post(self.scan_url(&query.screener))
            .json(&body)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let text = response.text().await.unwrap_or_default();
            warn!(
                "TradingView scanner returned {}: {}",
                status,
                text.chars().take(200).collect::<String>()
            );
            return Err(ProviderError::Status(status.as_u16()));
        }

        let text = response.text().await?;
        let indicators = parse_scan(&text, &ticker)?;
        let ratings = ratings::rate(&indicators);

        Ok(ProviderAnalysis {
            recommendation: ratings.recommendation_label().to_string(),
            votes: ratings.summary(),
            indicators,
        })
    }
}

/// Parse a scanner response into values keyed by unsuffixed column name.
/// `null` cells are dropped.
pub fn parse_scan(body: &str, ticker: &str) -> Result<HashMap<String, f64>, ProviderError> {
    let response: ScanResponse =
        serde_json::from_str(body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

    let row = response
        .data
        .into_iter()
        .next()
        .ok_or_else(|| ProviderError::SymbolNotFound(ticker.to_string()))?;

    if row.d.len() != COLUMNS.len() {
        return Err(ProviderError::Malformed(format!(
            "expected {} columns, got {}",
            COLUMNS.len(),
            row.d.len()
        )));
    }

    Ok(COLUMNS
        .iter()
        .zip(row.d)
        .filter_map(|(name, value)| value.as_f64().map(|v| (name.to_string(), v)))
        .collect())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Interval;

    fn row_json(values: &[Value]) -> String {
        serde_json::json!({
            "totalCount": 1,
            "data": [{ "s": "BINANCE:BTCUSDT", "d": values }]
        })
        .to_string()
    }

    #[test]
    fn test_ticker_is_uppercased() {
        let query = AnalysisQuery {
            symbol: "btcusdt".to_string(),
            exchange: "binance".to_string(),
            screener: "crypto".to_string(),
            interval: Interval::OneHour,
        };
        assert_eq!(query.ticker(), "BINANCE:BTCUSDT");
    }

    #[test]
    fn test_scan_url() {
        let client =
            TradingViewClient::new("https://scanner.example.com/", Duration::from_secs(1)).unwrap();
        assert_eq!(
            client.scan_url("Crypto"),
            "https://scanner.example.com/crypto/scan"
        );
    }

    #[test]
    fn test_parse_scan_maps_columns_and_drops_nulls() {
        let mut values = vec![Value::Null; COLUMNS.len()];
        let rsi = COLUMNS.iter().position(|c| *c == "RSI").unwrap();
        let close = COLUMNS.iter().position(|c| *c == "close").unwrap();
        values[rsi] = serde_json::json!(41.5);
        values[close] = serde_json::json!(64250.1);

        let parsed = parse_scan(&row_json(&values), "BINANCE:BTCUSDT").unwrap();
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed.get("RSI"), Some(&41.5));
        assert_eq!(parsed.get("close"), Some(&64250.1));
    }

    #[test]
    fn test_parse_scan_empty_data_is_not_found() {
        let body = r#"{"totalCount":0,"data":[]}"#;
        let err = parse_scan(body, "BINANCE:NOPE").unwrap_err();
        assert!(matches!(err, ProviderError::SymbolNotFound(t) if t == "BINANCE:NOPE"));
    }

    #[test]
    fn test_parse_scan_rejects_short_rows() {
        let err = parse_scan(&row_json(&[serde_json::json!(1.0)]), "BINANCE:BTCUSDT").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }

    #[test]
    fn test_parse_scan_rejects_invalid_json() {
        let err = parse_scan("<html>", "BINANCE:BTCUSDT").unwrap_err();
        assert!(matches!(err, ProviderError::Malformed(_)));
    }
}

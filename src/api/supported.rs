use crate::types::Interval;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

/// Crypto pairs known to resolve on the default exchange.
pub const SUPPORTED_CRYPTO: &[&str] = &[
    "BTCUSDT", "ETHUSDT", "BNBUSDT", "SOLUSDT", "XRPUSDT", "DOGEUSDT", "ADAUSDT", "AVAXUSDT",
    "DOTUSDT", "LINKUSDT", "LTCUSDT", "TRXUSDT", "ATOMUSDT", "UNIUSDT", "NEARUSDT",
];

#[derive(Serialize)]
struct SupportedResponse {
    crypto: &'static [&'static str],
    intervals: Vec<&'static str>,
    tradingview_enabled: bool,
}

async fn supported(State(state): State<AppState>) -> Json<SupportedResponse> {
    Json(SupportedResponse {
        crypto: SUPPORTED_CRYPTO,
        intervals: Interval::ALL.iter().map(|i| i.as_str()).collect(),
        tradingview_enabled: state.provider_enabled(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new().route("/supported", get(supported))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::Config;

    #[tokio::test]
    async fn test_supported_lists_every_interval() {
        let state = AppState::new(Config::default(), None);
        let Json(response) = supported(State(state)).await;
        assert_eq!(response.intervals, vec!["1m", "5m", "15m", "1h", "4h", "1d"]);
        assert!(response.crypto.contains(&"BTCUSDT"));
        assert!(!response.tradingview_enabled);
    }
}

use crate::types::now_timestamp;
use crate::AppState;
use axum::{extract::State, routing::get, Json, Router};
use serde::Serialize;

#[derive(Serialize)]
struct HomeResponse {
    message: &'static str,
    version: &'static str,
    tradingview_enabled: bool,
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    tradingview: &'static str,
    timestamp: String,
}

async fn home(State(state): State<AppState>) -> Json<HomeResponse> {
    Json(HomeResponse {
        message: "TradingView Bot Running!",
        version: env!("CARGO_PKG_VERSION"),
        tradingview_enabled: state.provider_enabled(),
    })
}

async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "healthy",
        tradingview: if state.provider_enabled() {
            "available"
        } else {
            "unavailable"
        },
        timestamp: now_timestamp(),
    })
}

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(home))
        .route("/health", get(health))
}

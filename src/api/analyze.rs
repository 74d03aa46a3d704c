//! Analyze endpoint.

use axum::{
    extract::State,
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::Serialize;
use tracing::{error, info};

use crate::error::{AnalyzeFailure, AppError, Result};
use crate::services::normalize;
use crate::sources::{AnalysisQuery, ProviderAnalysis};
use crate::types::{
    now_timestamp, AnalysisBreakdown, AnalyzeRequest, AnalyzeResponse, DemoResponse,
    IndicatorSnapshot, Interval, ResponseMode, Signal,
};
use crate::AppState;

const DEMO_REASON: &str = "TradingView analysis provider not available";

#[derive(Serialize)]
struct UsageExample {
    symbol: String,
    interval: String,
    exchange: String,
}

#[derive(Serialize)]
struct UsageResponse {
    message: &'static str,
    example: UsageExample,
    intervals: Vec<&'static str>,
}

/// Create the analyze router.
pub fn router() -> Router<AppState> {
    Router::new().route("/analyze", get(usage).post(analyze))
}

/// Describe how to call the endpoint. Never touches the provider.
async fn usage(State(state): State<AppState>) -> Json<UsageResponse> {
    let defaults = &state.config.defaults;
    Json(UsageResponse {
        message: "Send a POST request with a JSON body to /analyze",
        example: UsageExample {
            symbol: defaults.symbol.clone(),
            interval: defaults.interval.clone(),
            exchange: defaults.exchange.clone(),
        },
        intervals: Interval::ALL.iter().map(|i| i.as_str()).collect(),
    })
}

/// Run a technical analysis for the requested symbol.
///
/// A missing or unparsable body is treated as an empty request.
async fn analyze(
    State(state): State<AppState>,
    body: Option<Json<AnalyzeRequest>>,
) -> std::result::Result<Response, AnalyzeFailure> {
    let request = body.map(|Json(r)| r).unwrap_or_default();
    let defaults = &state.config.defaults;

    let symbol = request.symbol.unwrap_or_else(|| defaults.symbol.clone());

    // Demo mode answers every request, whatever else the body contains.
    let Some(provider) = state.provider.as_ref() else {
        info!("Provider unavailable, returning demo signal for {}", symbol);
        return Ok(Json(demo_response(symbol)).into_response());
    };

    let exchange = request.exchange.unwrap_or_else(|| defaults.exchange.clone());
    let interval = parse_interval(
        request
            .interval
            .as_deref()
            .unwrap_or(defaults.interval.as_str()),
    )
    .map_err(|e| AnalyzeFailure::new(symbol.clone(), e))?;

    let query = AnalysisQuery {
        symbol: symbol.clone(),
        exchange: exchange.clone(),
        screener: state.config.tradingview.screener.clone(),
        interval,
    };

    let limit = state.config.tradingview.timeout;
    let analysis = match tokio::time::timeout(limit, provider.analyze(&query)).await {
        Ok(Ok(analysis)) => analysis,
        Ok(Err(e)) => {
            error!("{} analysis failed for {}: {}", provider.name(), query.ticker(), e);
            return Err(AnalyzeFailure::new(symbol, e));
        }
        Err(_) => {
            error!("{} analysis timed out for {}", provider.name(), query.ticker());
            return Err(AnalyzeFailure::new(symbol, AppError::Timeout(limit)));
        }
    };

    let response = build_response(symbol, exchange, interval, analysis);
    info!(
        "{} {} -> {} ({}%)",
        response.symbol, response.interval, response.signal, response.confidence
    );

    Ok(Json(response).into_response())
}

fn parse_interval(tag: &str) -> Result<Interval> {
    Interval::from_str(tag).ok_or_else(|| AppError::UnsupportedInterval(tag.to_string()))
}

fn demo_response(symbol: String) -> DemoResponse {
    DemoResponse {
        timestamp: now_timestamp(),
        symbol,
        signal: Signal::Hold,
        mode: ResponseMode::Demo,
        error: DEMO_REASON.to_string(),
    }
}

fn build_response(
    symbol: String,
    exchange: String,
    interval: Interval,
    analysis: ProviderAnalysis,
) -> AnalyzeResponse {
    let normalized = normalize(&analysis.recommendation, analysis.votes);

    AnalyzeResponse {
        timestamp: now_timestamp(),
        symbol,
        interval,
        exchange,
        signal: normalized.signal,
        confidence: normalized.confidence,
        current_price: analysis.indicator("close"),
        analysis: AnalysisBreakdown::from(analysis.votes),
        indicators: IndicatorSnapshot {
            rsi: analysis.indicator("RSI"),
            macd: analysis.indicator("MACD.macd"),
            sma_20: analysis.indicator("SMA20"),
            ema_20: analysis.indicator("EMA20"),
        },
        recommendation: analysis.recommendation,
    }
}

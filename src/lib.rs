//! tvsignal - TradingView technical-analysis signals over a small JSON API

pub mod api;
pub mod config;
pub mod error;
pub mod services;
pub mod sources;
pub mod types;

use axum::Router;
use config::Config;
use sources::AnalysisProvider;
use std::sync::Arc;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

/// Application state shared across handlers.
#[derive(Clone)]
pub struct AppState {
    pub config: Arc<Config>,
    /// `None` when the provider could not be set up; analysis then runs in demo mode.
    pub provider: Option<Arc<dyn AnalysisProvider>>,
}

impl AppState {
    pub fn new(config: Config, provider: Option<Arc<dyn AnalysisProvider>>) -> Self {
        Self {
            config: Arc::new(config),
            provider,
        }
    }

    pub fn provider_enabled(&self) -> bool {
        self.provider.is_some()
    }
}

/// Build the HTTP application.
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .merge(api::router())
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

// Re-export commonly used types
pub use services::{normalize, Normalized};
pub use types::*;

use std::sync::Arc;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};
use tvsignal::config::Config;
use tvsignal::sources::{AnalysisProvider, TradingViewClient};
use tvsignal::AppState;

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Load environment variables
    dotenvy::dotenv().ok();

    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "tvsignal=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = Config::from_env();
    info!("Starting tvsignal on {}:{}", config.host, config.port);

    let provider = connect_provider(&config);
    let addr = format!("{}:{}", config.host, config.port);
    let app = tvsignal::app(AppState::new(config, provider));

    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!("tvsignal listening on {}", addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Decide provider availability once, at startup.
fn connect_provider(config: &Config) -> Option<Arc<dyn AnalysisProvider>> {
    let tv = &config.tradingview;
    if !tv.enabled {
        warn!("TradingView disabled by configuration, serving demo signals");
        return None;
    }

    match TradingViewClient::new(tv.scanner_url.clone(), tv.timeout) {
        Ok(client) => {
            info!(
                "TradingView scanner at {} (screener {}, timeout {:?})",
                tv.scanner_url, tv.screener, tv.timeout
            );
            let provider: Arc<dyn AnalysisProvider> = Arc::new(client);
            Some(provider)
        }
        Err(e) => {
            warn!("TradingView client unavailable, serving demo signals: {}", e);
            None
        }
    }
}

pub mod analyze;
pub mod health;
pub mod supported;

use crate::AppState;
use axum::{http::StatusCode, response::IntoResponse, Json, Router};
use serde_json::json;

/// Create the API router.
pub fn router() -> Router<AppState> {
    Router::new()
        .merge(health::router())
        .merge(analyze::router())
        .merge(supported::router())
        .fallback(not_found)
}

async fn not_found() -> impl IntoResponse {
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Not found",
            "status": StatusCode::NOT_FOUND.as_u16(),
        })),
    )
}

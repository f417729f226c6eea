use rc_ws::AppState;

use axum::{
    Json,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET /health - component status plus connection accounting
pub async fn health(State(state): State<AppState>) -> Response {
    let mut connections = 0;
    for shard in &state.shards {
        connections += shard.total_count().await;
    }

    let health = json!({
        "status": "healthy",
        "version": env!("CARGO_PKG_VERSION"),
        "workers": state.shards.len(),
        "connections": connections,
        "timestamp": chrono::Utc::now().to_rfc3339(),
    });

    (StatusCode::OK, Json(health)).into_response()
}

/// GET /live - liveness probe (is the process alive?)
pub async fn liveness() -> Response {
    (StatusCode::OK, "OK").into_response()
}

/// GET /ready - readiness probe (can we take another connection?)
pub async fn readiness(State(state): State<AppState>) -> Response {
    for shard in &state.shards {
        if shard.has_capacity().await {
            return (StatusCode::OK, "Ready").into_response();
        }
    }

    (StatusCode::SERVICE_UNAVAILABLE, "At capacity").into_response()
}

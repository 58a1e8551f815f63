//! Health check

use std::sync::Arc;
use std::time::Instant;

use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};

use crate::AppState;

/// Service health
#[utoipa::path(
    get,
    path = "/api/v1/health",
    responses(
        (status = 200, description = "Pricing configuration is loadable"),
        (status = 503, description = "Pricing configuration cannot be loaded")
    ),
    tag = "health"
)]
pub async fn health_check(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let check_start = Instant::now();

    let (config_status, services) = match state.config_service.engine().await {
        Ok(engine) => ("up", engine.rate_tables().services()),
        Err(e) => {
            tracing::warn!("Health check could not load pricing configuration: {}", e);
            ("down", Vec::new())
        }
    };
    let config_latency = check_start.elapsed().as_millis() as u64;

    let overall_status = if config_status == "up" { "healthy" } else { "degraded" };

    let health_info = serde_json::json!({
        "status": overall_status,
        "version": env!("CARGO_PKG_VERSION"),
        "timestamp": chrono::Utc::now().to_rfc3339(),
        "uptimeSeconds": state.started_at.elapsed().as_secs(),
        "services": {
            "pricingConfig": {
                "status": config_status,
                "latencyMs": config_latency
            }
        },
        "rateTables": services,
    });

    if overall_status == "healthy" {
        (StatusCode::OK, Json(health_info))
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(health_info))
    }
}

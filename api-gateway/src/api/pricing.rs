//! Pricing configuration API handlers

use std::sync::Arc;

use axum::extract::State;
use common::model::pricing::PricingConfig;
use tracing::info;

use crate::api::response::{ApiResponse, ResponseMetadata};
use crate::error::ApiError;
use crate::AppState;

async fn config_metadata(state: &AppState) -> ResponseMetadata {
    let loaded_at = state.config_service.loaded_at().await.map(|t| t.to_rfc3339());
    ResponseMetadata::extra(serde_json::json!({ "loadedAt": loaded_at }))
}

/// Current pricing configuration
#[utoipa::path(
    get,
    path = "/api/v1/pricing/config",
    responses(
        (status = 200, description = "Current pricing configuration", body = PricingConfig),
        (status = 500, description = "Pricing configuration error")
    ),
    tag = "pricing"
)]
pub async fn get_pricing_config(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<PricingConfig>, ApiError> {
    let engine = state.config_service.engine().await?;
    let meta = config_metadata(&state).await;

    Ok(ApiResponse::with_metadata(engine.config().clone(), meta))
}

/// Reload the pricing configuration from the data store
#[utoipa::path(
    post,
    path = "/api/v1/pricing/config/reload",
    responses(
        (status = 200, description = "Pricing configuration reloaded", body = PricingConfig),
        (status = 500, description = "Stored pricing configuration is invalid")
    ),
    tag = "pricing"
)]
pub async fn reload_pricing_config(
    State(state): State<Arc<AppState>>,
) -> Result<ApiResponse<PricingConfig>, ApiError> {
    let engine = state.config_service.reload().await?;
    info!("Pricing configuration reloaded on request");
    let meta = config_metadata(&state).await;

    Ok(ApiResponse::with_metadata(engine.config().clone(), meta))
}

//! Rate table API handlers

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use common::decimal::WeightGrams;
use common::model::rate::{RateLookup, RateTableSummary};
use serde::Deserialize;
use utoipa::IntoParams;

use crate::api::response::{ApiListResponse, ApiResponse};
use crate::error::ApiError;
use crate::AppState;

/// Rate lookup query parameters
#[derive(Debug, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PriceQuery {
    /// Parcel weight in grams
    pub weight: WeightGrams,
}

/// List the carrier rate tables
#[utoipa::path(
    get,
    path = "/api/v1/rate-tables",
    responses(
        (status = 200, description = "Rate tables retrieved", body = [RateTableSummary]),
        (status = 500, description = "Pricing configuration error")
    ),
    tag = "rate"
)]
pub async fn get_rate_tables(
    State(state): State<Arc<AppState>>,
) -> Result<ApiListResponse<RateTableSummary>, ApiError> {
    let engine = state.config_service.engine().await?;
    Ok(ApiListResponse::new(engine.rate_table_summaries()))
}

/// Carrier price for a service and weight, interpolated between tabulated weights
#[utoipa::path(
    get,
    path = "/api/v1/rate-tables/{service}/price",
    params(
        ("service" = String, Path, description = "Carrier service code"),
        PriceQuery
    ),
    responses(
        (status = 200, description = "Price retrieved", body = RateLookup),
        (status = 400, description = "Weight is not a positive number of grams"),
        (status = 404, description = "Unknown carrier service")
    ),
    tag = "rate"
)]
pub async fn get_rate_price(
    State(state): State<Arc<AppState>>,
    Path(service): Path<String>,
    Query(query): Query<PriceQuery>,
) -> Result<ApiResponse<RateLookup>, ApiError> {
    let engine = state.config_service.engine().await?;

    let price = engine
        .lookup_rate(&service, query.weight)?
        .ok_or_else(|| ApiError::NotFound(format!("No rate table for service: {}", service)))?;

    Ok(ApiResponse::new(RateLookup {
        service: service.trim().to_ascii_lowercase(),
        weight_grams: query.weight,
        price,
    }))
}

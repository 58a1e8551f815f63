//! Quote API handlers
//!
//! Handlers for the calculation endpoints:
//! - Freight quote (rate table, markup, processing fee)
//! - Landed cost (freight plus Brazilian import taxes)
//! - Consolidation fees
//! - Stand-alone protection fees
//! - Import taxes

use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    Json,
};
use common::model::consolidation::{
    ConsolidationFeeBreakdown, ConsolidationRequest, ProtectionFeeBreakdown, ProtectionRequest,
};
use common::model::quote::{FreightQuote, FreightQuoteRequest, LandedCostQuote, LandedCostRequest};
use common::model::tax::{TaxBreakdown, TaxRequest};
use tracing::debug;

use crate::api::response::ApiResponse;
use crate::error::ApiError;
use crate::AppState;

/// Quote freight for a parcel
#[utoipa::path(
    post,
    path = "/api/v1/quotes/freight",
    request_body = FreightQuoteRequest,
    responses(
        (status = 200, description = "Freight quote calculated", body = FreightQuote),
        (status = 400, description = "Invalid weight, route or markup"),
        (status = 404, description = "Unknown carrier service"),
        (status = 500, description = "Pricing configuration error")
    ),
    tag = "quote"
)]
pub async fn quote_freight(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<FreightQuoteRequest>, JsonRejection>,
) -> Result<ApiResponse<FreightQuote>, ApiError> {
    let Json(request) = payload?;
    debug!("Freight quote request: {:?}", request);

    let engine = state.config_service.engine().await?;
    let quote = engine.quote_freight(&request)?;

    Ok(ApiResponse::new(quote))
}

/// Quote freight plus import taxes
#[utoipa::path(
    post,
    path = "/api/v1/quotes/landed-cost",
    request_body = LandedCostRequest,
    responses(
        (status = 200, description = "Landed cost calculated", body = LandedCostQuote),
        (status = 400, description = "Invalid weight, route, markup or product value"),
        (status = 404, description = "Unknown carrier service"),
        (status = 500, description = "Pricing configuration error")
    ),
    tag = "quote"
)]
pub async fn quote_landed_cost(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<LandedCostRequest>, JsonRejection>,
) -> Result<ApiResponse<LandedCostQuote>, ApiError> {
    let Json(request) = payload?;
    let engine = state.config_service.engine().await?;
    let quote = engine.quote_landed_cost(&request)?;

    Ok(ApiResponse::new(quote))
}

/// Calculate consolidation, protection and storage fees
#[utoipa::path(
    post,
    path = "/api/v1/quotes/consolidation",
    request_body = ConsolidationRequest,
    responses(
        (status = 200, description = "Consolidation fees calculated", body = ConsolidationFeeBreakdown),
        (status = 400, description = "Duplicate protection services"),
        (status = 500, description = "Pricing configuration error")
    ),
    tag = "quote"
)]
pub async fn quote_consolidation(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ConsolidationRequest>, JsonRejection>,
) -> Result<ApiResponse<ConsolidationFeeBreakdown>, ApiError> {
    let Json(request) = payload?;
    let engine = state.config_service.engine().await?;
    let breakdown = engine.calculate_consolidation_fees(&request)?;

    Ok(ApiResponse::new(breakdown))
}

/// Calculate protection fees on their own
#[utoipa::path(
    post,
    path = "/api/v1/quotes/protection",
    request_body = ProtectionRequest,
    responses(
        (status = 200, description = "Protection fees calculated", body = ProtectionFeeBreakdown),
        (status = 400, description = "Empty or duplicate protection services"),
        (status = 500, description = "Pricing configuration error")
    ),
    tag = "quote"
)]
pub async fn quote_protection(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<ProtectionRequest>, JsonRejection>,
) -> Result<ApiResponse<ProtectionFeeBreakdown>, ApiError> {
    let Json(request) = payload?;
    let engine = state.config_service.engine().await?;
    let breakdown = engine.calculate_protection_fees(&request)?;

    Ok(ApiResponse::new(breakdown))
}

/// Calculate import taxes over a product value and freight value
#[utoipa::path(
    post,
    path = "/api/v1/quotes/taxes",
    request_body = TaxRequest,
    responses(
        (status = 200, description = "Taxes calculated", body = TaxBreakdown),
        (status = 400, description = "Negative product or freight value"),
        (status = 500, description = "Pricing configuration error")
    ),
    tag = "quote"
)]
pub async fn quote_taxes(
    State(state): State<Arc<AppState>>,
    payload: Result<Json<TaxRequest>, JsonRejection>,
) -> Result<ApiResponse<TaxBreakdown>, ApiError> {
    let Json(request) = payload?;
    let engine = state.config_service.engine().await?;
    let taxes = engine.calculate_taxes(request.product_value, request.freight_value)?;

    Ok(ApiResponse::new(taxes))
}

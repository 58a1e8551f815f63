//! HTTP API for freight, consolidation and import-tax quotes

pub mod api;
pub mod config;
pub mod error;

use std::sync::Arc;
use std::time::Instant;

use axum::{
    routing::{get, post},
    Json, Router,
};
use config_service::PricingConfigService;
use utoipa::OpenApi;

use crate::api::{health, pricing, quote, rate};

/// App state shared across handlers
pub struct AppState {
    /// Source of pricing engine snapshots
    pub config_service: Arc<PricingConfigService>,
    /// When the process started serving
    pub started_at: Instant,
}

impl AppState {
    pub fn new(config_service: Arc<PricingConfigService>) -> Self {
        Self {
            config_service,
            started_at: Instant::now(),
        }
    }
}

/// API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        api::health::health_check,
        // Quote routes
        api::quote::quote_freight,
        api::quote::quote_landed_cost,
        api::quote::quote_consolidation,
        api::quote::quote_protection,
        api::quote::quote_taxes,
        // Rate table routes
        api::rate::get_rate_tables,
        api::rate::get_rate_price,
        // Pricing configuration routes
        api::pricing::get_pricing_config,
        api::pricing::reload_pricing_config,
    ),
    components(
        schemas(
            // Quote API
            common::model::quote::FreightQuoteRequest,
            common::model::quote::FreightQuote,
            common::model::quote::LandedCostRequest,
            common::model::quote::LandedCostQuote,
            common::model::consolidation::ConsolidationType,
            common::model::consolidation::ProtectionType,
            common::model::consolidation::ConsolidationRequest,
            common::model::consolidation::ConsolidationFeeBreakdown,
            common::model::consolidation::ProtectionRequest,
            common::model::consolidation::ProtectionFeeLine,
            common::model::consolidation::ProtectionFeeBreakdown,
            common::model::tax::TaxRequest,
            common::model::tax::TaxBreakdown,

            // Rate API
            common::model::rate::RatePoint,
            common::model::rate::RateTableSummary,
            common::model::rate::RateLookup,

            // Pricing API
            common::model::pricing::PricingConfig,
            common::model::pricing::MarkupConfig,
            common::model::pricing::ConsolidationConfig,
            common::model::pricing::StorageConfig,
            common::model::pricing::ProtectionCosts,
            common::model::pricing::TaxRates,
            common::model::pricing::RouteConfig,

            // Response models
            api::response::ResponseMetadata,
            error::ErrorResponse,
            error::ErrorInfo
        )
    ),
    tags(
        (name = "health", description = "Service health"),
        (name = "quote", description = "Freight, landed cost, consolidation and tax quotes"),
        (name = "rate", description = "Carrier rate tables"),
        (name = "pricing", description = "Pricing configuration")
    ),
    info(
        title = "Shipbridge Pricing API",
        version = "1.0.0",
        description = "Freight, consolidation and Brazilian import-tax pricing for US-to-Brazil package forwarding"
    )
)]
pub struct ApiDoc;

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// The `/api/v1` routes
pub fn api_routes() -> Router<Arc<AppState>> {
    Router::new()
        .route("/health", get(health::health_check))
        // Quote routes
        .route("/quotes/freight", post(quote::quote_freight))
        .route("/quotes/landed-cost", post(quote::quote_landed_cost))
        .route("/quotes/consolidation", post(quote::quote_consolidation))
        .route("/quotes/protection", post(quote::quote_protection))
        .route("/quotes/taxes", post(quote::quote_taxes))
        // Rate table routes
        .route("/rate-tables", get(rate::get_rate_tables))
        .route("/rate-tables/:service/price", get(rate::get_rate_price))
        // Pricing configuration routes
        .route("/pricing/config", get(pricing::get_pricing_config))
        .route("/pricing/config/reload", post(pricing::reload_pricing_config))
}

/// Full application router, without transport layers
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .nest("/api/v1", api_routes())
        .route("/api-docs/openapi.json", get(openapi_json))
        .with_state(state)
}

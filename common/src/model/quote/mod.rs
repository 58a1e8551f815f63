//! Freight and landed-cost quote models

use serde::{Deserialize, Serialize};

use crate::decimal::{money, Money, Rate, WeightGrams};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Service used when a request does not name one
pub const DEFAULT_SERVICE: &str = "standard";

fn default_service() -> String {
    DEFAULT_SERVICE.to_string()
}

/// Freight quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FreightQuoteRequest {
    /// Parcel weight in grams
    pub weight: WeightGrams,
    /// Origin warehouse code, e.g. "US-FL"
    pub origin: String,
    /// Destination state code, e.g. "SP"
    pub destination: String,
    /// Carrier service code
    #[serde(default = "default_service")]
    pub service: String,
    /// Markup percentage override (fraction), still bounded by the configured min/max
    #[serde(default)]
    #[cfg_attr(feature = "utoipa", schema(value_type = Option<f64>))]
    pub markup: Option<Rate>,
}

/// Landed-cost quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LandedCostRequest {
    /// Declared value of the goods, in USD
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub product_value: Money,
    /// Parcel weight in grams
    pub weight: WeightGrams,
    /// Origin warehouse code
    pub origin: String,
    /// Destination state code
    pub destination: String,
    /// Carrier service code
    #[serde(default = "default_service")]
    pub service: String,
    /// Markup percentage override (fraction)
    #[serde(default)]
    #[cfg_attr(feature = "utoipa", schema(value_type = Option<f64>))]
    pub markup: Option<Rate>,
}

impl LandedCostRequest {
    /// The freight part of the request
    pub fn freight_request(&self) -> FreightQuoteRequest {
        FreightQuoteRequest {
            weight: self.weight,
            origin: self.origin.clone(),
            destination: self.destination.clone(),
            service: self.service.clone(),
            markup: self.markup,
        }
    }
}

/// Base freight plus platform charges, in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FreightCharges {
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub base_rate: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub markup_amount: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub processing_fee: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub total_freight: Money,
}

/// Freight quote, in USD. Derived per request, never persisted.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct FreightQuote {
    /// Parcel weight in grams
    pub weight: WeightGrams,
    pub origin: String,
    pub destination: String,
    pub service: String,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub base_rate: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub markup_amount: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub processing_fee: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub total_freight: Money,
}

/// Freight in USD plus import taxes in BRL
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct LandedCostQuote {
    pub freight: FreightQuote,
    /// BRL per USD
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub exchange_rate: Rate,
    /// Taxes over product value and total freight, in BRL
    pub taxes: crate::model::tax::TaxBreakdown,
}

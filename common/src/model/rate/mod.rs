//! Carrier rate table rows and views

use serde::{Deserialize, Serialize};

use crate::decimal::{money, Money, WeightGrams};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// A single stored rate table row, as supplied by the hosting data store
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RateEntry {
    /// Carrier service code (e.g. "standard")
    pub service: String,
    /// Parcel weight in grams
    pub weight_grams: WeightGrams,
    /// Carrier price in USD
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub price: Money,
}

impl RateEntry {
    pub fn new(service: impl Into<String>, weight_grams: WeightGrams, price: Money) -> Self {
        Self {
            service: service.into(),
            weight_grams,
            price,
        }
    }
}

/// A weight/price point of a rate table
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RatePoint {
    /// Weight in grams
    pub weight_grams: WeightGrams,
    /// Price in USD
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub price: Money,
}

/// Summary of one service's rate table
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RateTableSummary {
    /// Carrier service code
    pub service: String,
    /// Smallest tabulated weight
    pub min_weight_grams: WeightGrams,
    /// Largest tabulated weight
    pub max_weight_grams: WeightGrams,
    /// Tabulated points, ascending by weight
    pub entries: Vec<RatePoint>,
}

/// Result of a single rate lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RateLookup {
    /// Carrier service code
    pub service: String,
    /// Requested weight in grams
    pub weight_grams: WeightGrams,
    /// Tabulated or interpolated price in USD
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub price: Money,
}

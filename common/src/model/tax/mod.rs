//! Import tax models

use serde::{Deserialize, Serialize};

use crate::decimal::{money, Money};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Tax quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaxRequest {
    /// Declared value of the goods
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub product_value: Money,
    /// Freight paid for the shipment
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub freight_value: Money,
}

/// ICMS/IPI/PIS/COFINS breakdown
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaxBreakdown {
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub product_value: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub freight_value: Money,
    /// Product plus freight
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub total_value: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub icms: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub ipi: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub pis: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub cofins: Money,
    /// PIS plus COFINS
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub pis_cofins: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub total_tax: Money,
    /// Total value plus all taxes
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub final_value: Money,
}

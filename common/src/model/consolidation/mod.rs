//! Consolidation, protection and storage models

use serde::{Deserialize, Serialize};

use crate::decimal::{money, rate, weight, Money, Rate, WeightKg};
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// How packages are combined into the outbound box
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ConsolidationType {
    /// Packages are grouped as they arrived
    Simple,
    /// Packages are opened and physically repacked
    Repack,
}

/// Optional packaging add-on, priced per package
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ProtectionType {
    BubbleWrap,
    DoubleBox,
    SecurityTape,
    PaperFilling,
    CustomPackaging,
}

impl ProtectionType {
    pub const ALL: [ProtectionType; 5] = [
        ProtectionType::BubbleWrap,
        ProtectionType::DoubleBox,
        ProtectionType::SecurityTape,
        ProtectionType::PaperFilling,
        ProtectionType::CustomPackaging,
    ];

    /// Human-readable name
    pub fn label(&self) -> &'static str {
        match self {
            ProtectionType::BubbleWrap => "bubble wrap",
            ProtectionType::DoubleBox => "double box",
            ProtectionType::SecurityTape => "security tape",
            ProtectionType::PaperFilling => "paper filling",
            ProtectionType::CustomPackaging => "custom packaging",
        }
    }
}

/// Consolidation quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationRequest {
    /// Number of inbound packages going into the box
    pub package_count: u32,
    /// Simple grouping or repack
    pub consolidation_type: ConsolidationType,
    /// Protection services applied to every package
    #[serde(default)]
    pub protection_types: Vec<ProtectionType>,
    /// Days the packages have been held in the warehouse
    #[serde(default)]
    pub storage_days: u32,
}

/// Stand-alone protection quote request
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProtectionRequest {
    /// Number of packages to protect
    pub package_count: u32,
    /// Protection services; must not be empty
    pub protection_types: Vec<ProtectionType>,
}

/// Cost of one protection service across all packages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProtectionFeeLine {
    pub protection_type: ProtectionType,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub unit_cost: Money,
    pub package_count: u32,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub amount: Money,
}

/// Protection fees for a set of packages
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProtectionFeeBreakdown {
    pub lines: Vec<ProtectionFeeLine>,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub total: Money,
}

/// Full consolidation fee breakdown, in USD
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationFeeBreakdown {
    pub package_count: u32,
    pub consolidation_type: ConsolidationType,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub base_fee: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub per_package_fee: Money,
    /// Per-package fee times package count
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub package_fees: Money,
    /// Multiplier actually applied (1 for SIMPLE)
    #[serde(serialize_with = "rate::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub repack_multiplier: Rate,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub consolidation_fee: Money,
    pub protection: ProtectionFeeBreakdown,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub protection_fees: Money,
    pub storage_days: u32,
    /// Days beyond the free window
    pub billable_storage_days: u32,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub storage_fee: Money,
    #[serde(serialize_with = "money::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub total_fee: Money,
    /// Heuristic weight of the outbound box; not a measured value
    #[serde(serialize_with = "weight::serialize")]
    #[cfg_attr(feature = "utoipa", schema(value_type = f64))]
    pub estimated_final_weight_kg: WeightKg,
}

//! Typed pricing configuration
//!
//! Every recognized pricing option is an explicit field. A `PricingConfig`
//! is built once (from storage or from defaults), validated, and then passed
//! by value into the calculators.

use serde::{Deserialize, Serialize};

use crate::decimal::{dec, Money, Rate, WeightKg};
use crate::error::{Error, Result};
use crate::model::consolidation::ProtectionType;
#[cfg(feature = "utoipa")]
use crate::utoipa::ToSchema;

/// Platform markup applied on top of carrier freight
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct MarkupConfig {
    /// Markup as a fraction of base freight (0.20 = 20%)
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub percentage: Rate,
    /// Lower bound of the markup amount, in USD
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub min_markup: Money,
    /// Upper bound of the markup amount, in USD
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub max_markup: Money,
    /// Flat processing fee per shipment, in USD
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub processing_fee: Money,
}

impl Default for MarkupConfig {
    fn default() -> Self {
        Self {
            percentage: dec!(0.20),
            min_markup: dec!(2.00),
            max_markup: dec!(50.00),
            processing_fee: dec!(3.00),
        }
    }
}

impl MarkupConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("markup percentage", self.percentage)?;
        non_negative("minimum markup", self.min_markup)?;
        non_negative("maximum markup", self.max_markup)?;
        non_negative("processing fee", self.processing_fee)?;
        if self.min_markup > self.max_markup {
            return Err(Error::ConfigurationError(format!(
                "minimum markup {} exceeds maximum markup {}",
                self.min_markup, self.max_markup
            )));
        }
        Ok(())
    }
}

/// Consolidation handling fees and weight heuristics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ConsolidationConfig {
    /// Fee charged per consolidation regardless of package count, in USD
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub base_fee: Money,
    /// Fee per consolidated package, in USD
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub per_package_fee: Money,
    /// Multiplier over the whole consolidation fee for REPACK
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub repack_multiplier: Rate,
    /// Assumed average weight of an inbound package
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub avg_package_weight_kg: WeightKg,
    /// Weight of the outbound box and filling
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub packaging_weight_kg: WeightKg,
    /// Extra packing material per package for REPACK
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub repack_extra_weight_kg: WeightKg,
}

impl Default for ConsolidationConfig {
    fn default() -> Self {
        Self {
            base_fee: dec!(6.00),
            per_package_fee: dec!(1.00),
            repack_multiplier: dec!(1.5),
            avg_package_weight_kg: dec!(0.5),
            packaging_weight_kg: dec!(0.3),
            repack_extra_weight_kg: dec!(0.1),
        }
    }
}

impl ConsolidationConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("consolidation base fee", self.base_fee)?;
        non_negative("per-package fee", self.per_package_fee)?;
        non_negative("average package weight", self.avg_package_weight_kg)?;
        non_negative("packaging weight", self.packaging_weight_kg)?;
        non_negative("repack extra weight", self.repack_extra_weight_kg)?;
        if self.repack_multiplier <= Rate::ZERO {
            return Err(Error::ConfigurationError(format!(
                "repack multiplier must be positive, got {}",
                self.repack_multiplier
            )));
        }
        Ok(())
    }
}

/// Warehouse storage charges
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct StorageConfig {
    /// Charge per package per day beyond the free window, in USD
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub daily_rate: Money,
    /// Days a package is stored for free
    pub free_days: u32,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            daily_rate: dec!(0.50),
            free_days: 30,
        }
    }
}

impl StorageConfig {
    pub fn validate(&self) -> Result<()> {
        non_negative("storage daily rate", self.daily_rate)
    }
}

/// Flat per-package cost of each protection service, in USD
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct ProtectionCosts {
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub bubble_wrap: Money,
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub double_box: Money,
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub security_tape: Money,
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub paper_filling: Money,
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub custom_packaging: Money,
}

impl Default for ProtectionCosts {
    fn default() -> Self {
        Self {
            bubble_wrap: dec!(3.00),
            double_box: dec!(5.00),
            security_tape: dec!(1.50),
            paper_filling: dec!(2.00),
            custom_packaging: dec!(10.00),
        }
    }
}

impl ProtectionCosts {
    /// Per-package cost of a protection service
    pub fn cost(&self, protection: ProtectionType) -> Money {
        match protection {
            ProtectionType::BubbleWrap => self.bubble_wrap,
            ProtectionType::DoubleBox => self.double_box,
            ProtectionType::SecurityTape => self.security_tape,
            ProtectionType::PaperFilling => self.paper_filling,
            ProtectionType::CustomPackaging => self.custom_packaging,
        }
    }

    pub fn validate(&self) -> Result<()> {
        for protection in ProtectionType::ALL {
            non_negative(protection.label(), self.cost(protection))?;
        }
        Ok(())
    }
}

/// Brazilian import tax rates (fractions)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct TaxRates {
    /// ICMS, applied to the product value
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub icms: Rate,
    /// IPI, applied to the product value
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub ipi: Rate,
    /// PIS, applied to product plus freight
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub pis: Rate,
    /// COFINS, applied to product plus freight
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub cofins: Rate,
}

impl Default for TaxRates {
    fn default() -> Self {
        Self {
            icms: dec!(0.18),
            ipi: dec!(0.10),
            pis: dec!(0.0165),
            cofins: dec!(0.076),
        }
    }
}

impl TaxRates {
    pub fn validate(&self) -> Result<()> {
        for (name, rate) in [
            ("ICMS rate", self.icms),
            ("IPI rate", self.ipi),
            ("PIS rate", self.pis),
            ("COFINS rate", self.cofins),
        ] {
            non_negative(name, rate)?;
            if rate > Rate::ONE {
                return Err(Error::ConfigurationError(format!("{} must not exceed 1, got {}", name, rate)));
            }
        }
        Ok(())
    }
}

/// Origin warehouses and destination states the platform ships between
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct RouteConfig {
    /// Origin codes, e.g. "US-FL"
    pub origins: Vec<String>,
    /// Destination codes (Brazilian federative units), e.g. "SP"
    pub destinations: Vec<String>,
}

/// Brazilian federative units
pub const BRAZILIAN_STATES: [&str; 27] = [
    "AC", "AL", "AM", "AP", "BA", "CE", "DF", "ES", "GO", "MA", "MG", "MS", "MT", "PA",
    "PB", "PE", "PI", "PR", "RJ", "RN", "RO", "RR", "RS", "SC", "SE", "SP", "TO",
];

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            origins: vec!["US-FL".to_string(), "US-DE".to_string(), "US-OR".to_string()],
            destinations: BRAZILIAN_STATES.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl RouteConfig {
    pub fn validate(&self) -> Result<()> {
        if self.origins.is_empty() {
            return Err(Error::ConfigurationError("no origin codes configured".to_string()));
        }
        if self.destinations.is_empty() {
            return Err(Error::ConfigurationError("no destination codes configured".to_string()));
        }
        Ok(())
    }

    /// Resolve an origin code to its canonical form
    pub fn resolve_origin(&self, code: &str) -> Result<String> {
        resolve_code(&self.origins, code)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown origin code: {}", code)))
    }

    /// Resolve a destination code to its canonical form
    pub fn resolve_destination(&self, code: &str) -> Result<String> {
        resolve_code(&self.destinations, code)
            .ok_or_else(|| Error::InvalidInput(format!("Unknown destination code: {}", code)))
    }
}

fn resolve_code(known: &[String], code: &str) -> Option<String> {
    let code = code.trim();
    known.iter().find(|k| k.eq_ignore_ascii_case(code)).cloned()
}

/// Complete pricing configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[cfg_attr(feature = "utoipa", derive(ToSchema))]
#[serde(rename_all = "camelCase")]
pub struct PricingConfig {
    pub markup: MarkupConfig,
    pub consolidation: ConsolidationConfig,
    pub storage: StorageConfig,
    pub protection: ProtectionCosts,
    pub tax: TaxRates,
    /// BRL per USD used for landed-cost quotes
    #[cfg_attr(feature = "utoipa", schema(value_type = String))]
    pub exchange_rate: Rate,
    pub routes: RouteConfig,
}

impl Default for PricingConfig {
    fn default() -> Self {
        Self {
            markup: MarkupConfig::default(),
            consolidation: ConsolidationConfig::default(),
            storage: StorageConfig::default(),
            protection: ProtectionCosts::default(),
            tax: TaxRates::default(),
            exchange_rate: dec!(5.00),
            routes: RouteConfig::default(),
        }
    }
}

impl PricingConfig {
    /// Check every section, failing on the first invalid constant
    pub fn validate(&self) -> Result<()> {
        self.markup.validate()?;
        self.consolidation.validate()?;
        self.storage.validate()?;
        self.protection.validate()?;
        self.tax.validate()?;
        self.routes.validate()?;
        if self.exchange_rate <= Rate::ZERO {
            return Err(Error::ConfigurationError(format!(
                "exchange rate must be positive, got {}",
                self.exchange_rate
            )));
        }
        Ok(())
    }
}

fn non_negative(name: &str, value: Money) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::ConfigurationError(format!("{} must not be negative, got {}", name, value)));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_are_valid() {
        assert!(PricingConfig::default().validate().is_ok());
    }

    #[test]
    fn test_min_above_max_is_rejected() {
        let mut config = PricingConfig::default();
        config.markup.min_markup = dec!(60);

        assert!(matches!(config.validate(), Err(Error::ConfigurationError(_))));
    }

    #[test]
    fn test_route_codes_are_case_insensitive() {
        let routes = RouteConfig::default();
        assert_eq!(routes.resolve_origin("us-fl").unwrap(), "US-FL");
        assert_eq!(routes.resolve_destination(" sp ").unwrap(), "SP");
        assert!(matches!(routes.resolve_destination("XX"), Err(Error::InvalidInput(_))));
    }
}

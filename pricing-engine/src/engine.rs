use common::decimal::{checked, Money, WeightGrams};
use common::error::{Error, Result};
use common::model::consolidation::{
    ConsolidationFeeBreakdown, ConsolidationRequest, ProtectionFeeBreakdown, ProtectionRequest,
};
use common::model::pricing::PricingConfig;
use common::model::quote::{FreightQuote, FreightQuoteRequest, LandedCostQuote, LandedCostRequest};
use common::model::rate::RateTableSummary;
use common::model::tax::TaxBreakdown;
use tracing::{debug, info};

use crate::consolidation;
use crate::markup;
use crate::rate_table::RateTables;
use crate::seed;
use crate::tax;

/// A validated pricing configuration together with the carrier rate tables.
///
/// Engines are immutable; a configuration change produces a new engine.
#[derive(Debug, Clone)]
pub struct PricingEngine {
    config: PricingConfig,
    rate_tables: RateTables,
}

impl PricingEngine {
    /// Create an engine, failing fast on invalid configuration
    pub fn new(config: PricingConfig, rate_tables: RateTables) -> Result<Self> {
        config.validate()?;
        if rate_tables.is_empty() {
            return Err(Error::ConfigurationError("no carrier rate tables configured".to_string()));
        }

        info!("Pricing engine ready with services: {}", rate_tables.services().join(", "));
        Ok(Self { config, rate_tables })
    }

    /// Engine over the default configuration and seed rate tables
    pub fn with_defaults() -> Result<Self> {
        let rate_tables = RateTables::from_entries(&seed::default_rate_entries())?;
        Self::new(PricingConfig::default(), rate_tables)
    }

    pub fn config(&self) -> &PricingConfig {
        &self.config
    }

    pub fn rate_tables(&self) -> &RateTables {
        &self.rate_tables
    }

    pub fn rate_table_summaries(&self) -> Vec<RateTableSummary> {
        self.rate_tables.summaries()
    }

    /// Carrier price for a service and weight; `None` for an unknown service
    pub fn lookup_rate(&self, service: &str, weight_grams: WeightGrams) -> Result<Option<Money>> {
        self.rate_tables.lookup(service, weight_grams)
    }

    /// Freight quote: route check, carrier rate, markup and processing fee
    pub fn quote_freight(&self, request: &FreightQuoteRequest) -> Result<FreightQuote> {
        let origin = self.config.routes.resolve_origin(&request.origin)?;
        let destination = self.config.routes.resolve_destination(&request.destination)?;

        let base_rate = self
            .lookup_rate(&request.service, request.weight)?
            .ok_or_else(|| Error::NotFound(format!("No rate table for service: {}", request.service)))?;

        let percentage = request.markup.unwrap_or(self.config.markup.percentage);
        let charges = markup::apply_markup_with_percentage(base_rate, percentage, &self.config.markup)?;

        debug!(
            "Freight quote {} -> {} ({}, {} g): {}",
            origin, destination, request.service, request.weight, charges.total_freight
        );

        Ok(FreightQuote {
            weight: request.weight,
            origin,
            destination,
            service: request.service.trim().to_ascii_lowercase(),
            base_rate: charges.base_rate,
            markup_amount: charges.markup_amount,
            processing_fee: charges.processing_fee,
            total_freight: charges.total_freight,
        })
    }

    /// Freight quote plus import taxes, both converted to BRL for the tax base
    pub fn quote_landed_cost(&self, request: &LandedCostRequest) -> Result<LandedCostQuote> {
        let freight = self.quote_freight(&request.freight_request())?;
        let exchange_rate = self.config.exchange_rate;

        let taxes = tax::calculate_taxes(
            checked::mul(request.product_value, exchange_rate)?,
            checked::mul(freight.total_freight, exchange_rate)?,
            &self.config.tax,
        )?;

        Ok(LandedCostQuote {
            freight,
            exchange_rate,
            taxes,
        })
    }

    pub fn calculate_consolidation_fees(&self, request: &ConsolidationRequest) -> Result<ConsolidationFeeBreakdown> {
        consolidation::calculate_consolidation_fees(request, &self.config)
    }

    /// Stand-alone protection quote; at least one service must be selected
    pub fn calculate_protection_fees(&self, request: &ProtectionRequest) -> Result<ProtectionFeeBreakdown> {
        if request.protection_types.is_empty() {
            return Err(Error::InvalidInput("At least one protection service is required".to_string()));
        }
        consolidation::protection_fees(&request.protection_types, request.package_count, &self.config.protection)
    }

    pub fn calculate_taxes(&self, product_value: Money, freight_value: Money) -> Result<TaxBreakdown> {
        tax::calculate_taxes(product_value, freight_value, &self.config.tax)
    }
}

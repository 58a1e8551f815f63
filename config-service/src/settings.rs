//! Stored pricing settings
//!
//! The data store keeps pricing constants as key/value text rows. This module
//! is the only place that knows the keys: every recognized key is required,
//! and a missing or malformed value is a configuration error naming the key.

use std::collections::HashMap;
use std::str::FromStr;

use common::decimal::Rate;
use common::error::{Error, Result};
use common::model::pricing::{
    ConsolidationConfig, MarkupConfig, PricingConfig, ProtectionCosts, RouteConfig, StorageConfig, TaxRates,
};
use rust_decimal::Decimal;
use tracing::warn;

pub mod keys {
    pub const MARKUP_PERCENTAGE: &str = "markup.percentage";
    pub const MARKUP_MIN: &str = "markup.min";
    pub const MARKUP_MAX: &str = "markup.max";
    pub const PROCESSING_FEE: &str = "freight.processing_fee";
    pub const BASE_FEE: &str = "consolidation.base_fee";
    pub const PER_PACKAGE_FEE: &str = "consolidation.per_package_fee";
    pub const REPACK_MULTIPLIER: &str = "consolidation.repack_multiplier";
    pub const AVG_PACKAGE_WEIGHT: &str = "consolidation.avg_package_weight_kg";
    pub const PACKAGING_WEIGHT: &str = "consolidation.packaging_weight_kg";
    pub const REPACK_EXTRA_WEIGHT: &str = "consolidation.repack_extra_weight_kg";
    pub const STORAGE_DAILY_RATE: &str = "storage.daily_rate";
    pub const STORAGE_FREE_DAYS: &str = "storage.free_days";
    pub const BUBBLE_WRAP: &str = "protection.bubble_wrap";
    pub const DOUBLE_BOX: &str = "protection.double_box";
    pub const SECURITY_TAPE: &str = "protection.security_tape";
    pub const PAPER_FILLING: &str = "protection.paper_filling";
    pub const CUSTOM_PACKAGING: &str = "protection.custom_packaging";
    pub const TAX_ICMS: &str = "tax.icms";
    pub const TAX_IPI: &str = "tax.ipi";
    pub const TAX_PIS: &str = "tax.pis";
    pub const TAX_COFINS: &str = "tax.cofins";
    pub const EXCHANGE_RATE: &str = "exchange.usd_brl";
    pub const ORIGINS: &str = "routes.origins";
    pub const DESTINATIONS: &str = "routes.destinations";

    /// Every recognized key
    pub const ALL: [&str; 24] = [
        MARKUP_PERCENTAGE,
        MARKUP_MIN,
        MARKUP_MAX,
        PROCESSING_FEE,
        BASE_FEE,
        PER_PACKAGE_FEE,
        REPACK_MULTIPLIER,
        AVG_PACKAGE_WEIGHT,
        PACKAGING_WEIGHT,
        REPACK_EXTRA_WEIGHT,
        STORAGE_DAILY_RATE,
        STORAGE_FREE_DAYS,
        BUBBLE_WRAP,
        DOUBLE_BOX,
        SECURITY_TAPE,
        PAPER_FILLING,
        CUSTOM_PACKAGING,
        TAX_ICMS,
        TAX_IPI,
        TAX_PIS,
        TAX_COFINS,
        EXCHANGE_RATE,
        ORIGINS,
        DESTINATIONS,
    ];

    pub fn is_known(key: &str) -> bool {
        ALL.contains(&key)
    }
}

struct Settings<'a> {
    rows: &'a HashMap<String, String>,
}

impl<'a> Settings<'a> {
    fn raw(&self, key: &str) -> Result<&'a str> {
        self.rows
            .get(key)
            .map(|v| v.trim())
            .filter(|v| !v.is_empty())
            .ok_or_else(|| Error::ConfigurationError(format!("missing pricing setting '{}'", key)))
    }

    fn decimal(&self, key: &str) -> Result<Decimal> {
        let raw = self.raw(key)?;
        Decimal::from_str(raw).map_err(|e| {
            Error::ConfigurationError(format!("pricing setting '{}' is not a decimal ('{}'): {}", key, raw, e))
        })
    }

    fn days(&self, key: &str) -> Result<u32> {
        let raw = self.raw(key)?;
        raw.parse().map_err(|e| {
            Error::ConfigurationError(format!("pricing setting '{}' is not a day count ('{}'): {}", key, raw, e))
        })
    }

    fn codes(&self, key: &str) -> Result<Vec<String>> {
        let codes: Vec<String> = self
            .raw(key)?
            .split(',')
            .map(|c| c.trim().to_ascii_uppercase())
            .filter(|c| !c.is_empty())
            .collect();
        if codes.is_empty() {
            return Err(Error::ConfigurationError(format!("pricing setting '{}' lists no codes", key)));
        }
        Ok(codes)
    }
}

/// Parse stored rows into a validated configuration
pub fn parse_settings(rows: &HashMap<String, String>) -> Result<PricingConfig> {
    for key in rows.keys().filter(|k| !keys::is_known(k)) {
        warn!("Ignoring unrecognized pricing setting '{}'", key);
    }

    let s = Settings { rows };
    let config = PricingConfig {
        markup: MarkupConfig {
            percentage: s.decimal(keys::MARKUP_PERCENTAGE)?,
            min_markup: s.decimal(keys::MARKUP_MIN)?,
            max_markup: s.decimal(keys::MARKUP_MAX)?,
            processing_fee: s.decimal(keys::PROCESSING_FEE)?,
        },
        consolidation: ConsolidationConfig {
            base_fee: s.decimal(keys::BASE_FEE)?,
            per_package_fee: s.decimal(keys::PER_PACKAGE_FEE)?,
            repack_multiplier: s.decimal(keys::REPACK_MULTIPLIER)?,
            avg_package_weight_kg: s.decimal(keys::AVG_PACKAGE_WEIGHT)?,
            packaging_weight_kg: s.decimal(keys::PACKAGING_WEIGHT)?,
            repack_extra_weight_kg: s.decimal(keys::REPACK_EXTRA_WEIGHT)?,
        },
        storage: StorageConfig {
            daily_rate: s.decimal(keys::STORAGE_DAILY_RATE)?,
            free_days: s.days(keys::STORAGE_FREE_DAYS)?,
        },
        protection: ProtectionCosts {
            bubble_wrap: s.decimal(keys::BUBBLE_WRAP)?,
            double_box: s.decimal(keys::DOUBLE_BOX)?,
            security_tape: s.decimal(keys::SECURITY_TAPE)?,
            paper_filling: s.decimal(keys::PAPER_FILLING)?,
            custom_packaging: s.decimal(keys::CUSTOM_PACKAGING)?,
        },
        tax: TaxRates {
            icms: s.decimal(keys::TAX_ICMS)?,
            ipi: s.decimal(keys::TAX_IPI)?,
            pis: s.decimal(keys::TAX_PIS)?,
            cofins: s.decimal(keys::TAX_COFINS)?,
        },
        exchange_rate: s.decimal(keys::EXCHANGE_RATE)?,
        routes: RouteConfig {
            origins: s.codes(keys::ORIGINS)?,
            destinations: s.codes(keys::DESTINATIONS)?,
        },
    };

    config.validate()?;
    Ok(config)
}

/// Render a configuration as storable rows
pub fn to_settings(config: &PricingConfig) -> HashMap<String, String> {
    let decimal = |value: Rate| value.normalize().to_string();

    let rows = [
        (keys::MARKUP_PERCENTAGE, decimal(config.markup.percentage)),
        (keys::MARKUP_MIN, decimal(config.markup.min_markup)),
        (keys::MARKUP_MAX, decimal(config.markup.max_markup)),
        (keys::PROCESSING_FEE, decimal(config.markup.processing_fee)),
        (keys::BASE_FEE, decimal(config.consolidation.base_fee)),
        (keys::PER_PACKAGE_FEE, decimal(config.consolidation.per_package_fee)),
        (keys::REPACK_MULTIPLIER, decimal(config.consolidation.repack_multiplier)),
        (keys::AVG_PACKAGE_WEIGHT, decimal(config.consolidation.avg_package_weight_kg)),
        (keys::PACKAGING_WEIGHT, decimal(config.consolidation.packaging_weight_kg)),
        (keys::REPACK_EXTRA_WEIGHT, decimal(config.consolidation.repack_extra_weight_kg)),
        (keys::STORAGE_DAILY_RATE, decimal(config.storage.daily_rate)),
        (keys::STORAGE_FREE_DAYS, config.storage.free_days.to_string()),
        (keys::BUBBLE_WRAP, decimal(config.protection.bubble_wrap)),
        (keys::DOUBLE_BOX, decimal(config.protection.double_box)),
        (keys::SECURITY_TAPE, decimal(config.protection.security_tape)),
        (keys::PAPER_FILLING, decimal(config.protection.paper_filling)),
        (keys::CUSTOM_PACKAGING, decimal(config.protection.custom_packaging)),
        (keys::TAX_ICMS, decimal(config.tax.icms)),
        (keys::TAX_IPI, decimal(config.tax.ipi)),
        (keys::TAX_PIS, decimal(config.tax.pis)),
        (keys::TAX_COFINS, decimal(config.tax.cofins)),
        (keys::EXCHANGE_RATE, decimal(config.exchange_rate)),
        (keys::ORIGINS, config.routes.origins.join(",")),
        (keys::DESTINATIONS, config.routes.destinations.join(",")),
    ];

    rows.into_iter().map(|(k, v)| (k.to_string(), v)).collect()
}

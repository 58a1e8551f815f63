//! Platform markup and processing fee

use common::decimal::{checked, Money, Rate};
use common::error::{Error, Result};
use common::model::pricing::MarkupConfig;
use common::model::quote::FreightCharges;
use tracing::debug;

/// Apply the configured markup percentage and processing fee to a base freight
pub fn apply_markup(base_freight: Money, config: &MarkupConfig) -> Result<FreightCharges> {
    apply_markup_with_percentage(base_freight, config.percentage, config)
}

/// Apply an explicit markup percentage, bounded by the configured
/// `[min_markup, max_markup]`, plus the processing fee
pub fn apply_markup_with_percentage(
    base_freight: Money,
    percentage: Rate,
    config: &MarkupConfig,
) -> Result<FreightCharges> {
    config.validate()?;

    if base_freight.is_sign_negative() && !base_freight.is_zero() {
        return Err(Error::InvalidInput(format!(
            "Base freight must not be negative, got {}",
            base_freight
        )));
    }
    if percentage.is_sign_negative() && !percentage.is_zero() {
        return Err(Error::InvalidInput(format!(
            "Markup percentage must not be negative, got {}",
            percentage
        )));
    }

    let markup_amount = checked::mul(base_freight, percentage)?.clamp(config.min_markup, config.max_markup);
    let total_freight = checked::add(checked::add(base_freight, markup_amount)?, config.processing_fee)?;

    debug!(
        "Markup on {}: {} at {} (bounds {}..{}), total {}",
        base_freight, markup_amount, percentage, config.min_markup, config.max_markup, total_freight
    );

    Ok(FreightCharges {
        base_rate: base_freight,
        markup_amount,
        processing_fee: config.processing_fee,
        total_freight,
    })
}

//! Consolidation, protection and storage fees

use std::collections::HashSet;

use common::decimal::{Money, Rate, WeightKg};
use common::error::{Error, Result};
use common::model::consolidation::{
    ConsolidationFeeBreakdown, ConsolidationRequest, ConsolidationType, ProtectionFeeBreakdown,
    ProtectionFeeLine, ProtectionType,
};
use common::model::pricing::{ConsolidationConfig, PricingConfig, ProtectionCosts, StorageConfig};
use tracing::debug;

/// Handling fee for a consolidation.
///
/// `base_fee + per_package_fee × package_count`, multiplied as a whole by
/// the repack multiplier for REPACK. Zero packages still pay the base fee.
pub fn consolidation_fee(
    package_count: u32,
    consolidation_type: ConsolidationType,
    config: &ConsolidationConfig,
) -> Money {
    let simple = config.base_fee + config.per_package_fee * Money::from(package_count);
    simple * applied_multiplier(consolidation_type, config)
}

fn applied_multiplier(consolidation_type: ConsolidationType, config: &ConsolidationConfig) -> Rate {
    match consolidation_type {
        ConsolidationType::Simple => Rate::ONE,
        ConsolidationType::Repack => config.repack_multiplier,
    }
}

/// Storage charge; returns `(billable_days, fee)`
pub fn storage_fee(storage_days: u32, package_count: u32, config: &StorageConfig) -> (u32, Money) {
    if storage_days <= config.free_days {
        return (0, Money::ZERO);
    }
    let billable_days = storage_days - config.free_days;
    let fee = config.daily_rate * Money::from(billable_days) * Money::from(package_count);
    (billable_days, fee)
}

/// Heuristic outbound weight; not tied to any measured weight
pub fn estimated_final_weight(
    package_count: u32,
    consolidation_type: ConsolidationType,
    config: &ConsolidationConfig,
) -> WeightKg {
    let count = WeightKg::from(package_count);
    let mut weight = config.avg_package_weight_kg * count + config.packaging_weight_kg;
    if consolidation_type == ConsolidationType::Repack {
        weight += config.repack_extra_weight_kg * count;
    }
    weight
}

/// Protection fees: each selected service costs its flat amount per package.
/// An empty selection costs nothing; a repeated service is rejected.
pub fn protection_fees(
    protection_types: &[ProtectionType],
    package_count: u32,
    costs: &ProtectionCosts,
) -> Result<ProtectionFeeBreakdown> {
    let mut seen = HashSet::new();
    let mut lines = Vec::with_capacity(protection_types.len());
    let mut total = Money::ZERO;

    for &protection_type in protection_types {
        if !seen.insert(protection_type) {
            return Err(Error::InvalidInput(format!(
                "Protection service listed more than once: {}",
                protection_type.label()
            )));
        }

        let unit_cost = costs.cost(protection_type);
        let amount = unit_cost * Money::from(package_count);
        total += amount;
        lines.push(ProtectionFeeLine {
            protection_type,
            unit_cost,
            package_count,
            amount,
        });
    }

    Ok(ProtectionFeeBreakdown { lines, total })
}

/// Full consolidation fee breakdown
pub fn calculate_consolidation_fees(
    request: &ConsolidationRequest,
    config: &PricingConfig,
) -> Result<ConsolidationFeeBreakdown> {
    let consolidation = &config.consolidation;
    let package_count = request.package_count;

    let package_fees = consolidation.per_package_fee * Money::from(package_count);
    let consolidation_fee = consolidation_fee(package_count, request.consolidation_type, consolidation);
    let protection = protection_fees(&request.protection_types, package_count, &config.protection)?;
    let (billable_storage_days, storage_fee) = storage_fee(request.storage_days, package_count, &config.storage);
    let estimated_final_weight_kg = estimated_final_weight(package_count, request.consolidation_type, consolidation);
    let protection_fees = protection.total;
    let total_fee = consolidation_fee + protection_fees + storage_fee;

    debug!(
        "Consolidation {:?} x{}: fee {}, protection {}, storage {} ({} billable days), total {}",
        request.consolidation_type,
        package_count,
        consolidation_fee,
        protection_fees,
        storage_fee,
        billable_storage_days,
        total_fee
    );

    Ok(ConsolidationFeeBreakdown {
        package_count,
        consolidation_type: request.consolidation_type,
        base_fee: consolidation.base_fee,
        per_package_fee: consolidation.per_package_fee,
        package_fees,
        repack_multiplier: applied_multiplier(request.consolidation_type, consolidation),
        consolidation_fee,
        protection,
        protection_fees,
        storage_days: request.storage_days,
        billable_storage_days,
        storage_fee,
        total_fee,
        estimated_final_weight_kg,
    })
}

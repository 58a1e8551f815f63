//! Simplified Brazilian import taxes
//!
//! ICMS and IPI apply to the product value; PIS and COFINS apply to product
//! plus freight. There is no separate import-duty layer.

use common::decimal::{checked, Money};
use common::error::{Error, Result};
use common::model::pricing::TaxRates;
use common::model::tax::TaxBreakdown;
use tracing::debug;

pub fn calculate_taxes(product_value: Money, freight_value: Money, rates: &TaxRates) -> Result<TaxBreakdown> {
    rates.validate()?;
    ensure_non_negative("Product value", product_value)?;
    ensure_non_negative("Freight value", freight_value)?;

    let total_value = checked::add(product_value, freight_value)?;
    let icms = checked::mul(product_value, rates.icms)?;
    let ipi = checked::mul(product_value, rates.ipi)?;
    let pis = checked::mul(total_value, rates.pis)?;
    let cofins = checked::mul(total_value, rates.cofins)?;
    let pis_cofins = checked::add(pis, cofins)?;
    let total_tax = checked::add(checked::add(icms, ipi)?, pis_cofins)?;
    let final_value = checked::add(total_value, total_tax)?;

    debug!(
        "Taxes on {} + {}: ICMS {}, IPI {}, PIS/COFINS {}, total {}",
        product_value, freight_value, icms, ipi, pis_cofins, total_tax
    );

    Ok(TaxBreakdown {
        product_value,
        freight_value,
        total_value,
        icms,
        ipi,
        pis,
        cofins,
        pis_cofins,
        total_tax,
        final_value,
    })
}

fn ensure_non_negative(name: &str, value: Money) -> Result<()> {
    if value.is_sign_negative() && !value.is_zero() {
        return Err(Error::InvalidInput(format!("{} must not be negative, got {}", name, value)));
    }
    Ok(())
}

//! Decimal type utilities for precise monetary calculations
//!
//! All pricing arithmetic runs on `rust_decimal::Decimal`. Rounding happens
//! only when values leave the platform, through the serializers in
//! [`money`] and [`weight`].

use rust_decimal::{Decimal, RoundingStrategy};
pub use rust_decimal_macros::dec;

/// Monetary amount (USD or BRL depending on context)
pub type Money = Decimal;

/// Fractional rate, e.g. `0.18` for 18%
pub type Rate = Decimal;

/// Weight in kilograms
pub type WeightKg = Decimal;

/// Weight in grams, as carried by carrier rate tables
pub type WeightGrams = i64;

/// Precision helpers for common operations
pub mod precision {
    use super::*;

    /// Monetary precision at the serialization boundary (cents)
    pub const MONEY_PRECISION: u32 = 2;

    /// Weight precision at the serialization boundary (grams, expressed in kg)
    pub const WEIGHT_PRECISION: u32 = 3;

    /// Round a monetary amount to cents, half away from zero
    pub fn round_money(amount: Money) -> Money {
        amount.round_dp_with_strategy(MONEY_PRECISION, RoundingStrategy::MidpointAwayFromZero)
    }

    /// Round a weight to whole grams
    pub fn round_weight(weight: WeightKg) -> WeightKg {
        weight.round_dp_with_strategy(WEIGHT_PRECISION, RoundingStrategy::MidpointAwayFromZero)
    }
}

/// Overflow-checked arithmetic.
///
/// Request amounts can be anywhere in `Decimal`'s range, and the plain
/// operators panic on overflow. A result that does not fit is invalid input.
pub mod checked {
    use super::*;
    use crate::error::{Error, Result};

    pub fn add(a: Decimal, b: Decimal) -> Result<Decimal> {
        a.checked_add(b)
            .ok_or_else(|| Error::InvalidInput(format!("Amount out of range: {} + {}", a, b)))
    }

    pub fn mul(a: Decimal, b: Decimal) -> Result<Decimal> {
        a.checked_mul(b)
            .ok_or_else(|| Error::InvalidInput(format!("Amount out of range: {} x {}", a, b)))
    }
}

fn serialize_number<S>(value: Decimal, serializer: S) -> Result<S::Ok, S::Error>
where
    S: serde::Serializer,
{
    use serde::ser::Error;

    // Parse the decimal text so the f64 is the nearest one to the decimal value
    let number: f64 = value
        .to_string()
        .parse()
        .map_err(|e| S::Error::custom(format!("decimal {} is not representable as a number: {}", value, e)))?;
    serializer.serialize_f64(number)
}

/// Serialize monetary amounts as JSON numbers rounded to 2 decimal places
pub mod money {
    use super::*;

    pub fn serialize<S>(value: &Money, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_number(precision::round_money(*value), serializer)
    }
}

/// Serialize kilogram weights as JSON numbers rounded to 3 decimal places
pub mod weight {
    use super::*;

    pub fn serialize<S>(value: &WeightKg, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_number(precision::round_weight(*value), serializer)
    }
}

/// Serialize rates and multipliers as JSON numbers without rounding
pub mod rate {
    use super::*;

    pub fn serialize<S>(value: &Rate, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serialize_number(*value, serializer)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde::Serialize;

    #[derive(Serialize)]
    struct Amounts {
        #[serde(serialize_with = "money::serialize")]
        total: Money,
        #[serde(serialize_with = "weight::serialize")]
        weight: WeightKg,
        #[serde(serialize_with = "rate::serialize")]
        multiplier: Rate,
    }

    #[test]
    fn test_rounds_only_at_serialization() {
        let amounts = Amounts {
            total: dec!(16.316666666),
            weight: dec!(1.80049),
            multiplier: dec!(1.125),
        };

        let json = serde_json::to_value(&amounts).unwrap();
        assert_eq!(json["total"].as_f64(), Some(16.32));
        assert_eq!(json["weight"].as_f64(), Some(1.8));
        assert_eq!(json["multiplier"].as_f64(), Some(1.125));
        assert_eq!(amounts.total, dec!(16.316666666));
    }

    #[test]
    fn test_checked_arithmetic_overflow_is_invalid_input() {
        assert_eq!(checked::add(dec!(1.5), dec!(2.25)).unwrap(), dec!(3.75));
        assert_eq!(checked::mul(dec!(1.5), dec!(2)).unwrap(), dec!(3.0));
        assert!(matches!(checked::add(Decimal::MAX, dec!(1)), Err(crate::Error::InvalidInput(_))));
        assert!(matches!(checked::mul(Decimal::MAX, dec!(5)), Err(crate::Error::InvalidInput(_))));
    }

    #[test]
    fn test_midpoints_round_away_from_zero() {
        assert_eq!(precision::round_money(dec!(2.005)), dec!(2.01));
        assert_eq!(precision::round_money(dec!(-2.005)), dec!(-2.01));
        assert_eq!(precision::round_weight(dec!(0.0005)), dec!(0.001));
    }
}

//! Freight, consolidation and import-tax pricing
//!
//! Every calculation is a pure function of its inputs and an explicit
//! [`common::model::pricing::PricingConfig`]. [`PricingEngine`] bundles a
//! validated configuration with the carrier rate tables it applies to.

mod rate_table;
pub mod markup;
pub mod consolidation;
pub mod tax;
pub mod seed;
pub mod engine;

pub use engine::PricingEngine;
pub use rate_table::{RateTable, RateTables};

//! Domain models for the pricing platform

pub mod pricing;
pub mod rate;
pub mod quote;
pub mod consolidation;
pub mod tax;

//! Common types and utilities for the pricing platform
//!
//! This library contains shared types, utilities, and abstractions used across
//! the pricing crates. It provides a unified approach to error handling,
//! monetary decimals, database access, and the pricing value objects.

pub mod error;
pub mod model;
pub mod decimal;
pub mod db;

/// Re-export important types
pub use error::{Error, Result, ErrorExt};
pub use decimal::*;

// Re-export utoipa for use in model ToSchema derives
#[cfg(feature = "utoipa")]
pub use utoipa;

//! API handlers
//!
//! Handlers are thin: they take the current engine snapshot from the
//! configuration service, run the calculation and wrap the result in the
//! standard response envelope.

pub mod health;
pub mod pricing;
pub mod quote;
pub mod rate;
pub mod response;

pub use response::{ApiListResponse, ApiResponse, ResponseMetadata};

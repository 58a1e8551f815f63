//! Shipbridge pricing platform
//!
//! Re-exports the workspace crates so the HTTP-level tests can reach them
//! through a single dependency.

pub use api_gateway;
pub use common;
pub use config_service;
pub use pricing_engine;

//! Pricing configuration service
//!
//! Loads pricing settings and carrier rate tables from a repository, parses
//! them into a typed [`common::model::pricing::PricingConfig`], and caches
//! the resulting [`pricing_engine::PricingEngine`] snapshot.

pub mod service;
pub mod repository;
pub mod settings;
pub mod config;

pub use service::PricingConfigService;
pub use service::RepositoryType;
pub use repository::{PricingConfigRepository, InMemoryPricingConfigRepository, PostgresPricingConfigRepository};
pub use config::ConfigServiceConfig;

//! Pricing configuration service implementation

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Duration, Utc};
use common::error::{Error, ErrorExt, Result};
use common::model::rate::RateEntry;
use pricing_engine::{PricingEngine, RateTables};
use tokio::sync::RwLock;
use tracing::{debug, info};

use crate::config::{ConfigServiceConfig, DEFAULT_CACHE_TTL_SECS};
use crate::repository::{InMemoryPricingConfigRepository, PostgresPricingConfigRepository, PricingConfigRepository};
use crate::settings::{keys, parse_settings};

/// A loaded engine and when it was loaded
struct CachedEngine {
    engine: Arc<PricingEngine>,
    loaded_at: DateTime<Utc>,
}

/// Pricing configuration service.
///
/// Hands out immutable [`PricingEngine`] snapshots built from the repository,
/// reloading once a snapshot is older than the cache TTL.
pub struct PricingConfigService {
    /// Repository for pricing data
    repo: Arc<dyn PricingConfigRepository>,
    /// Lifetime of a cached snapshot
    cache_ttl: Duration,
    /// Current snapshot
    cached: RwLock<Option<CachedEngine>>,
}

/// Repository Type
pub enum RepositoryType {
    /// In-memory repository seeded with the default configuration
    InMemory,
    /// PostgreSQL repository
    Postgres(Option<String>),
}

impl PricingConfigService {
    /// Create a service over an existing repository
    pub fn new(repo: Arc<dyn PricingConfigRepository>) -> Self {
        Self {
            repo,
            cache_ttl: Duration::seconds(DEFAULT_CACHE_TTL_SECS as i64),
            cached: RwLock::new(None),
        }
    }

    /// Create a new service with a specific repository type
    pub async fn with_repository(repo_type: RepositoryType) -> Result<Self> {
        let repo: Arc<dyn PricingConfigRepository> = match repo_type {
            RepositoryType::InMemory => Arc::new(InMemoryPricingConfigRepository::seeded()),
            RepositoryType::Postgres(database_url) => {
                Arc::new(PostgresPricingConfigRepository::new(database_url).await?)
            }
        };

        Ok(Self::new(repo))
    }

    /// Create a new service backed by PostgreSQL with a configuration
    pub async fn with_config(config: &ConfigServiceConfig) -> Result<Self> {
        let repo: Arc<dyn PricingConfigRepository> =
            Arc::new(PostgresPricingConfigRepository::with_config(config).await?);

        Ok(Self::new(repo).with_cache_ttl(config.cache_ttl_secs))
    }

    /// Set the snapshot lifetime; zero disables caching
    pub fn with_cache_ttl(mut self, ttl_secs: u64) -> Self {
        // chrono durations hold milliseconds in an i64
        let max_secs = (i64::MAX / 1000) as u64;
        self.cache_ttl = Duration::seconds(ttl_secs.min(max_secs) as i64);
        self
    }

    /// The underlying repository
    pub fn repository(&self) -> Arc<dyn PricingConfigRepository> {
        self.repo.clone()
    }

    /// When the current snapshot was loaded, if any
    pub async fn loaded_at(&self) -> Option<DateTime<Utc>> {
        self.cached.read().await.as_ref().map(|c| c.loaded_at)
    }

    /// Current pricing engine, loading it if absent or stale
    pub async fn engine(&self) -> Result<Arc<PricingEngine>> {
        {
            let cached = self.cached.read().await;
            if let Some(current) = cached.as_ref().filter(|c| self.is_fresh(c)) {
                return Ok(current.engine.clone());
            }
        }

        let mut cached = self.cached.write().await;

        // Another task may have reloaded while we waited for the lock
        if let Some(current) = cached.as_ref().filter(|c| self.is_fresh(c)) {
            return Ok(current.engine.clone());
        }

        let engine = Arc::new(self.load().await?);
        *cached = Some(CachedEngine {
            engine: engine.clone(),
            loaded_at: Utc::now(),
        });
        Ok(engine)
    }

    /// Discard the current snapshot and load a new one
    pub async fn reload(&self) -> Result<Arc<PricingEngine>> {
        let mut cached = self.cached.write().await;
        let engine = Arc::new(self.load().await?);
        *cached = Some(CachedEngine {
            engine: engine.clone(),
            loaded_at: Utc::now(),
        });
        info!("Pricing configuration reloaded");
        Ok(engine)
    }

    /// Change one pricing setting.
    ///
    /// The resulting configuration is validated before anything is written;
    /// an unknown key or a value that would break the configuration is
    /// rejected as invalid input.
    pub async fn update_setting(&self, key: &str, value: &str) -> Result<Arc<PricingEngine>> {
        if !keys::is_known(key) {
            return Err(Error::InvalidInput(format!("Unknown pricing setting: {}", key)));
        }

        let mut candidate: HashMap<String, String> = self.repo.load_settings().await?;
        candidate.insert(key.to_string(), value.to_string());
        parse_settings(&candidate).map_err(|e| match e {
            Error::ConfigurationError(msg) => Error::InvalidInput(msg),
            other => other,
        })?;

        info!("Updating pricing setting {} = {}", key, value);
        self.repo.save_setting(key, value).await?;
        self.reload().await
    }

    /// Add or replace a rate table point, then reload.
    ///
    /// The service code is stored trimmed and lowercased. The rate tables
    /// that would result are validated before anything is written.
    pub async fn upsert_rate_entry(&self, mut entry: RateEntry) -> Result<Arc<PricingEngine>> {
        entry.service = entry.service.trim().to_ascii_lowercase();
        if entry.service.is_empty() {
            return Err(Error::InvalidInput("Service code must not be empty".to_string()));
        }
        if entry.weight_grams <= 0 {
            return Err(Error::InvalidInput(format!(
                "Weight must be a positive number of grams, got {}",
                entry.weight_grams
            )));
        }
        if entry.price.is_sign_negative() && !entry.price.is_zero() {
            return Err(Error::InvalidInput(format!("Price must not be negative, got {}", entry.price)));
        }

        let mut candidate = self.repo.load_rate_entries().await?;
        match candidate.iter_mut().find(|e| {
            e.weight_grams == entry.weight_grams && e.service.trim().eq_ignore_ascii_case(&entry.service)
        }) {
            Some(existing) => existing.price = entry.price,
            None => candidate.push(entry.clone()),
        }
        RateTables::from_entries(&candidate).map_err(|e| match e {
            Error::ConfigurationError(msg) => Error::InvalidInput(msg),
            other => other,
        })?;

        info!("Updating rate {} @ {} g = {}", entry.service, entry.weight_grams, entry.price);
        self.repo.save_rate_entry(&entry).await?;
        self.reload().await
    }

    fn is_fresh(&self, cached: &CachedEngine) -> bool {
        Utc::now() - cached.loaded_at < self.cache_ttl
    }

    async fn load(&self) -> Result<PricingEngine> {
        debug!("Loading pricing configuration from repository");

        let settings = self.repo.load_settings().await
            .with_context(|| "Failed to load pricing settings")?;
        let config = parse_settings(&settings)?;

        let entries = self.repo.load_rate_entries().await
            .with_context(|| "Failed to load rate tables")?;
        let rate_tables = RateTables::from_entries(&entries)?;

        PricingEngine::new(config, rate_tables)
    }
}

//! Repository for pricing settings and carrier rate tables

use std::collections::HashMap;
use std::str::FromStr;

use async_trait::async_trait;
use common::db::init_db_pool;
use common::decimal::{Money, WeightGrams};
use common::error::{Error, Result};
use common::model::pricing::PricingConfig;
use common::model::rate::RateEntry;
use dashmap::DashMap;
use pricing_engine::seed::default_rate_entries;
use sqlx::{PgPool, Row};
use tracing::{debug, info};

use crate::settings::to_settings;

/// Pricing repository trait defining the interface for pricing data storage
#[async_trait]
pub trait PricingConfigRepository: Send + Sync {
    /// Load every stored pricing setting as key/value text
    async fn load_settings(&self) -> Result<HashMap<String, String>>;

    /// Load every rate table row
    async fn load_rate_entries(&self) -> Result<Vec<RateEntry>>;

    /// Create or update a pricing setting
    async fn save_setting(&self, key: &str, value: &str) -> Result<()>;

    /// Create or update a rate table row
    async fn save_rate_entry(&self, entry: &RateEntry) -> Result<()>;
}

/// In-memory repository for pricing data
pub struct InMemoryPricingConfigRepository {
    /// Settings by key
    pub settings: DashMap<String, String>,
    /// Prices by service and weight
    pub rate_entries: DashMap<(String, WeightGrams), Money>,
}

impl InMemoryPricingConfigRepository {
    /// Create an empty in-memory repository
    pub fn new() -> Self {
        Self {
            settings: DashMap::new(),
            rate_entries: DashMap::new(),
        }
    }

    /// Create a repository holding the default configuration and seed rate tables
    pub fn seeded() -> Self {
        let repo = Self::new();
        for (key, value) in to_settings(&PricingConfig::default()) {
            repo.settings.insert(key, value);
        }
        for entry in default_rate_entries() {
            repo.rate_entries.insert((entry.service, entry.weight_grams), entry.price);
        }
        repo
    }
}

impl Default for InMemoryPricingConfigRepository {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl PricingConfigRepository for InMemoryPricingConfigRepository {
    async fn load_settings(&self) -> Result<HashMap<String, String>> {
        Ok(self
            .settings
            .iter()
            .map(|entry| (entry.key().clone(), entry.value().clone()))
            .collect())
    }

    async fn load_rate_entries(&self) -> Result<Vec<RateEntry>> {
        let mut entries: Vec<RateEntry> = self
            .rate_entries
            .iter()
            .map(|entry| {
                let (service, weight_grams) = entry.key();
                RateEntry::new(service.clone(), *weight_grams, *entry.value())
            })
            .collect();
        entries.sort_by(|a, b| (&a.service, a.weight_grams).cmp(&(&b.service, b.weight_grams)));
        Ok(entries)
    }

    async fn save_setting(&self, key: &str, value: &str) -> Result<()> {
        self.settings.insert(key.to_string(), value.to_string());
        Ok(())
    }

    async fn save_rate_entry(&self, entry: &RateEntry) -> Result<()> {
        self.rate_entries
            .insert((entry.service.clone(), entry.weight_grams), entry.price);
        Ok(())
    }
}

/// PostgreSQL repository for pricing data
pub struct PostgresPricingConfigRepository {
    /// Database connection pool
    pool: PgPool,
}

impl PostgresPricingConfigRepository {
    /// Create a new PostgreSQL pricing repository
    pub async fn new(database_url: Option<String>) -> Result<Self> {
        let database_url = match database_url {
            Some(url) => url,
            None => std::env::var("DATABASE_URL")
                .map_err(|_| Error::ConfigurationError("DATABASE_URL must be set".to_string()))?,
        };

        let pool = init_db_pool(&database_url, 5).await?;
        Ok(Self::from_pool(pool))
    }

    /// Create a new PostgreSQL pricing repository with configuration
    pub async fn with_config(config: &crate::config::ConfigServiceConfig) -> Result<Self> {
        let pool = init_db_pool(&config.database_url, config.db_pool_size).await?;
        Ok(Self::from_pool(pool))
    }

    /// Wrap an existing pool
    pub fn from_pool(pool: PgPool) -> Self {
        Self { pool }
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl PricingConfigRepository for PostgresPricingConfigRepository {
    async fn load_settings(&self) -> Result<HashMap<String, String>> {
        debug!("Loading pricing settings from database");

        let rows = sqlx::query("SELECT key, value FROM pricing_settings")
            .fetch_all(&self.pool)
            .await?;

        let mut settings = HashMap::with_capacity(rows.len());
        for row in rows {
            settings.insert(row.try_get("key")?, row.try_get("value")?);
        }

        info!("Loaded {} pricing settings", settings.len());
        Ok(settings)
    }

    async fn load_rate_entries(&self) -> Result<Vec<RateEntry>> {
        debug!("Loading rate table entries from database");

        let rows = sqlx::query(
            "SELECT service, weight_grams, price
             FROM rate_table_entries
             ORDER BY service, weight_grams",
        )
        .fetch_all(&self.pool)
        .await?;

        let mut entries = Vec::with_capacity(rows.len());
        for row in rows {
            let service: String = row.try_get("service")?;
            let weight_grams: i64 = row.try_get("weight_grams")?;
            let price_str: String = row.try_get("price")?;

            // Prices are stored as text to keep exact decimals
            let price = Money::from_str(&price_str).map_err(|e| {
                Error::ConfigurationError(format!(
                    "Invalid price '{}' for {} @ {} g: {}",
                    price_str, service, weight_grams, e
                ))
            })?;

            entries.push(RateEntry::new(service, weight_grams, price));
        }

        info!("Loaded {} rate table entries", entries.len());
        Ok(entries)
    }

    async fn save_setting(&self, key: &str, value: &str) -> Result<()> {
        debug!("Saving pricing setting {}", key);

        sqlx::query(
            "INSERT INTO pricing_settings (key, value)
             VALUES ($1, $2)
             ON CONFLICT (key)
             DO UPDATE SET value = $2, updated_at = NOW()",
        )
        .bind(key)
        .bind(value)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn save_rate_entry(&self, entry: &RateEntry) -> Result<()> {
        debug!("Saving rate entry {} @ {} g", entry.service, entry.weight_grams);

        sqlx::query(
            "INSERT INTO rate_table_entries (service, weight_grams, price)
             VALUES ($1, $2, $3)
             ON CONFLICT (service, weight_grams)
             DO UPDATE SET price = $3",
        )
        .bind(&entry.service)
        .bind(entry.weight_grams)
        .bind(entry.price.to_string())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

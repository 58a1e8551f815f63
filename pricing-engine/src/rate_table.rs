use std::collections::{BTreeMap, HashMap};

use common::decimal::{Money, WeightGrams};
use common::error::{Error, Result};
use common::model::rate::{RateEntry, RatePoint, RateTableSummary};
use tracing::debug;

/// Sparse weight → price table for one carrier service
#[derive(Debug, Clone)]
pub struct RateTable {
    service: String,
    /// Prices keyed by weight in grams, ascending
    points: BTreeMap<WeightGrams, Money>,
}

impl RateTable {
    /// Build a table, rejecting empty tables, duplicate or non-positive
    /// weights and negative prices
    pub fn new<I>(service: impl Into<String>, points: I) -> Result<Self>
    where
        I: IntoIterator<Item = (WeightGrams, Money)>,
    {
        let service = normalize_service(&service.into());
        let mut table = BTreeMap::new();

        for (weight, price) in points {
            if weight <= 0 {
                return Err(Error::ConfigurationError(format!(
                    "rate table '{}' has non-positive weight {}",
                    service, weight
                )));
            }
            if price.is_sign_negative() && !price.is_zero() {
                return Err(Error::ConfigurationError(format!(
                    "rate table '{}' has negative price {} at {} g",
                    service, price, weight
                )));
            }
            if table.insert(weight, price).is_some() {
                return Err(Error::ConfigurationError(format!(
                    "rate table '{}' has duplicate weight {} g",
                    service, weight
                )));
            }
        }

        if table.is_empty() {
            return Err(Error::ConfigurationError(format!("rate table '{}' has no entries", service)));
        }

        Ok(Self { service, points: table })
    }

    /// Service code (lowercase)
    pub fn service(&self) -> &str {
        &self.service
    }

    /// Smallest tabulated weight
    pub fn min_weight(&self) -> WeightGrams {
        self.points.keys().next().copied().unwrap_or_default()
    }

    /// Largest tabulated weight
    pub fn max_weight(&self) -> WeightGrams {
        self.points.keys().next_back().copied().unwrap_or_default()
    }

    /// Price for a weight in grams.
    ///
    /// Exact keys return the stored price. Weights between two keys are
    /// linearly interpolated. Weights outside the table clamp to the nearest
    /// boundary price.
    pub fn lookup(&self, weight_grams: WeightGrams) -> Result<Money> {
        validate_weight(weight_grams)?;

        let below = self.points.range(..=weight_grams).next_back();
        let above = self.points.range(weight_grams..).next();

        let price = match (below, above) {
            (Some((&lo, &lo_price)), Some((&hi, &hi_price))) => {
                if lo == hi {
                    lo_price
                } else {
                    let ratio = Money::from(weight_grams - lo) / Money::from(hi - lo);
                    lo_price + ratio * (hi_price - lo_price)
                }
            }
            // Above the largest key
            (Some((_, &price)), None) => price,
            // Below the smallest key
            (None, Some((_, &price))) => price,
            (None, None) => {
                return Err(Error::ConfigurationError(format!("rate table '{}' has no entries", self.service)));
            }
        };

        debug!("Rate lookup {} @ {} g = {}", self.service, weight_grams, price);
        Ok(price)
    }

    /// Tabulated points, ascending by weight
    pub fn points(&self) -> impl Iterator<Item = (WeightGrams, Money)> + '_ {
        self.points.iter().map(|(&w, &p)| (w, p))
    }

    pub fn summary(&self) -> RateTableSummary {
        RateTableSummary {
            service: self.service.clone(),
            min_weight_grams: self.min_weight(),
            max_weight_grams: self.max_weight(),
            entries: self
                .points()
                .map(|(weight_grams, price)| RatePoint { weight_grams, price })
                .collect(),
        }
    }
}

/// Rate tables of every configured carrier service
#[derive(Debug, Clone, Default)]
pub struct RateTables {
    tables: HashMap<String, RateTable>,
}

impl RateTables {
    pub fn new() -> Self {
        Self::default()
    }

    /// Group stored rows by service and build one table per service
    pub fn from_entries(entries: &[RateEntry]) -> Result<Self> {
        let mut grouped: BTreeMap<String, Vec<(WeightGrams, Money)>> = BTreeMap::new();
        for entry in entries {
            grouped
                .entry(normalize_service(&entry.service))
                .or_default()
                .push((entry.weight_grams, entry.price));
        }

        let mut tables = Self::new();
        for (service, points) in grouped {
            tables.insert(RateTable::new(service, points)?);
        }
        Ok(tables)
    }

    /// Add or replace a service's table
    pub fn insert(&mut self, table: RateTable) {
        self.tables.insert(table.service.clone(), table);
    }

    pub fn get(&self, service: &str) -> Option<&RateTable> {
        self.tables.get(&normalize_service(service))
    }

    /// Price for a service and weight; `None` when the service has no table
    pub fn lookup(&self, service: &str, weight_grams: WeightGrams) -> Result<Option<Money>> {
        validate_weight(weight_grams)?;
        match self.get(service) {
            Some(table) => table.lookup(weight_grams).map(Some),
            None => Ok(None),
        }
    }

    /// Service codes, sorted
    pub fn services(&self) -> Vec<String> {
        let mut services: Vec<String> = self.tables.keys().cloned().collect();
        services.sort();
        services
    }

    /// Summaries of every table, sorted by service code
    pub fn summaries(&self) -> Vec<RateTableSummary> {
        self.services()
            .iter()
            .filter_map(|s| self.tables.get(s))
            .map(RateTable::summary)
            .collect()
    }

    pub fn is_empty(&self) -> bool {
        self.tables.is_empty()
    }

    pub fn len(&self) -> usize {
        self.tables.len()
    }
}

fn validate_weight(weight_grams: WeightGrams) -> Result<()> {
    if weight_grams <= 0 {
        return Err(Error::InvalidInput(format!(
            "Weight must be a positive number of grams, got {}",
            weight_grams
        )));
    }
    Ok(())
}

fn normalize_service(service: &str) -> String {
    service.trim().to_ascii_lowercase()
}

//! Seed carrier rate tables, used for in-memory deployments and tests

use common::decimal::{dec, Money, WeightGrams};
use common::model::rate::RateEntry;

const STANDARD: [(WeightGrams, Money); 14] = [
    (500, dec!(12.45)),
    (1000, dec!(15.32)),
    (1500, dec!(18.10)),
    (2000, dec!(20.85)),
    (2500, dec!(23.40)),
    (3000, dec!(25.95)),
    (4000, dec!(30.80)),
    (5000, dec!(35.60)),
    (7500, dec!(47.20)),
    (10000, dec!(58.90)),
    (15000, dec!(82.10)),
    (20000, dec!(104.75)),
    (25000, dec!(127.30)),
    (30000, dec!(149.90)),
];

const EXPRESS: [(WeightGrams, Money); 14] = [
    (500, dec!(19.90)),
    (1000, dec!(24.50)),
    (1500, dec!(28.75)),
    (2000, dec!(32.90)),
    (2500, dec!(36.80)),
    (3000, dec!(40.60)),
    (4000, dec!(47.90)),
    (5000, dec!(55.10)),
    (7500, dec!(72.40)),
    (10000, dec!(89.60)),
    (15000, dec!(123.80)),
    (20000, dec!(157.50)),
    (25000, dec!(190.90)),
    (30000, dec!(224.00)),
];

/// Default `standard` and `express` tables, 500–30000 g
pub fn default_rate_entries() -> Vec<RateEntry> {
    let standard = STANDARD.iter().map(|&(w, p)| RateEntry::new("standard", w, p));
    let express = EXPRESS.iter().map(|&(w, p)| RateEntry::new("express", w, p));
    standard.chain(express).collect()
}

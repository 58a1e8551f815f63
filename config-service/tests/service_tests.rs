use std::sync::Arc;

use common::decimal::dec;
use common::error::Error;
use common::model::rate::RateEntry;
use config_service::settings::keys;
use config_service::{
    InMemoryPricingConfigRepository, PricingConfigRepository, PricingConfigService, RepositoryType,
};

#[tokio::test]
async fn test_in_memory_service_loads_defaults() {
    let service = PricingConfigService::with_repository(RepositoryType::InMemory).await.unwrap();

    assert!(service.loaded_at().await.is_none());

    let engine = service.engine().await.unwrap();
    assert_eq!(engine.config().markup.percentage, dec!(0.20));
    assert_eq!(engine.lookup_rate("standard", 1000).unwrap(), Some(dec!(15.32)));
    assert!(service.loaded_at().await.is_some());
}

#[tokio::test]
async fn test_engine_is_cached() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    let service = PricingConfigService::new(repo.clone());

    let first = service.engine().await.unwrap();

    // Changes in the store are not visible until the snapshot expires or is reloaded
    repo.save_setting(keys::PROCESSING_FEE, "9.00").await.unwrap();
    let second = service.engine().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
    assert_eq!(second.config().markup.processing_fee, dec!(3.00));

    let reloaded = service.reload().await.unwrap();
    assert!(!Arc::ptr_eq(&first, &reloaded));
    assert_eq!(reloaded.config().markup.processing_fee, dec!(9.00));
}

#[tokio::test]
async fn test_zero_ttl_always_reloads() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    let service = PricingConfigService::new(repo.clone()).with_cache_ttl(0);

    let first = service.engine().await.unwrap();
    repo.save_setting(keys::BASE_FEE, "7.00").await.unwrap();
    let second = service.engine().await.unwrap();

    assert!(!Arc::ptr_eq(&first, &second));
    assert_eq!(second.config().consolidation.base_fee, dec!(7.00));
}

#[tokio::test]
async fn test_update_setting() {
    let service = PricingConfigService::with_repository(RepositoryType::InMemory).await.unwrap();

    let engine = service.update_setting(keys::MARKUP_PERCENTAGE, "0.25").await.unwrap();
    assert_eq!(engine.config().markup.percentage, dec!(0.25));
    assert_eq!(service.engine().await.unwrap().config().markup.percentage, dec!(0.25));
}

#[tokio::test]
async fn test_update_setting_rejects_bad_values() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    let service = PricingConfigService::new(repo.clone());

    let result = service.update_setting("markup.bonus", "1").await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));

    let result = service.update_setting(keys::MARKUP_MIN, "abc").await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));

    // Nothing was written
    let settings = repo.load_settings().await.unwrap();
    assert_eq!(settings.get(keys::MARKUP_MIN).map(String::as_str), Some("2"));
    assert!(!settings.contains_key("markup.bonus"));
}

#[tokio::test]
async fn test_upsert_rate_entry() {
    let service = PricingConfigService::with_repository(RepositoryType::InMemory).await.unwrap();

    let engine = service
        .upsert_rate_entry(RateEntry::new("economy", 1000, dec!(9.50)))
        .await
        .unwrap();
    assert_eq!(engine.lookup_rate("economy", 5000).unwrap(), Some(dec!(9.50)));

    let result = service.upsert_rate_entry(RateEntry::new("economy", 0, dec!(1))).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_upsert_rate_entry_normalizes_service() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    let service = PricingConfigService::new(repo.clone());
    let stored = repo.load_rate_entries().await.unwrap().len();

    // Replaces the existing 1000 g point instead of adding a second one
    let engine = service
        .upsert_rate_entry(RateEntry::new(" Standard ", 1000, dec!(16.00)))
        .await
        .unwrap();
    assert_eq!(engine.lookup_rate("standard", 1000).unwrap(), Some(dec!(16.00)));

    let entries = repo.load_rate_entries().await.unwrap();
    assert_eq!(entries.len(), stored);
    assert!(entries.iter().all(|e| e.service == "standard" || e.service == "express"));

    let engine = service.reload().await.unwrap();
    assert_eq!(engine.lookup_rate("STANDARD", 1000).unwrap(), Some(dec!(16.00)));

    let result = service.upsert_rate_entry(RateEntry::new("  ", 1000, dec!(1))).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
}

#[tokio::test]
async fn test_upsert_rate_entry_rejects_broken_tables_before_writing() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    // Two spellings of the same service at one weight
    repo.rate_entries.insert(("Express".to_string(), 1000), dec!(30.00));
    let service = PricingConfigService::new(repo.clone());
    let stored = repo.load_rate_entries().await.unwrap().len();

    let result = service.upsert_rate_entry(RateEntry::new("express", 2000, dec!(40.00))).await;
    assert!(matches!(result, Err(Error::InvalidInput(_))));
    assert_eq!(repo.load_rate_entries().await.unwrap().len(), stored);
}

#[tokio::test]
async fn test_unbounded_cache_ttl() {
    let service = PricingConfigService::new(Arc::new(InMemoryPricingConfigRepository::seeded()))
        .with_cache_ttl(u64::MAX);

    let first = service.engine().await.unwrap();
    let second = service.engine().await.unwrap();
    assert!(Arc::ptr_eq(&first, &second));
}

#[tokio::test]
async fn test_missing_settings_fail_fast() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    repo.settings.remove(keys::TAX_ICMS);
    let service = PricingConfigService::new(repo);

    match service.engine().await {
        Err(Error::ConfigurationError(msg)) => assert!(msg.contains(keys::TAX_ICMS)),
        other => panic!("expected configuration error, got {:?}", other.map(|_| ())),
    }
}

#[tokio::test]
async fn test_empty_repository_is_configuration_error() {
    let service = PricingConfigService::new(Arc::new(InMemoryPricingConfigRepository::new()));
    assert!(matches!(service.engine().await, Err(Error::ConfigurationError(_))));
}

#[tokio::test]
async fn test_rate_entries_are_sorted() {
    let repo = InMemoryPricingConfigRepository::seeded();
    let entries = repo.load_rate_entries().await.unwrap();

    assert_eq!(entries.len(), 28);
    assert_eq!(entries[0].service, "express");
    assert!(entries.windows(2).all(|w| {
        (&w[0].service, w[0].weight_grams) < (&w[1].service, w[1].weight_grams)
    }));
}

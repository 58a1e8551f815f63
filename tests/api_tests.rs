// File: tests/api_tests.rs


use std::sync::Arc;

use axum::http::{Method, StatusCode};
use serde_json::json;
use shipbridge::config_service::settings::keys;
use shipbridge::config_service::{InMemoryPricingConfigRepository, PricingConfigRepository};
use test_helpers::{app_with_repository, default_app, get, number, post, send};

#[tokio::test]
async fn test_health() {
    let (status, body) = get(default_app(), "/api/v1/health").await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "healthy");
    assert_eq!(body["services"]["pricingConfig"]["status"], "up");
    assert_eq!(body["rateTables"], json!(["express", "standard"]));
}

#[tokio::test]
async fn test_health_degraded_when_config_is_broken() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    repo.settings.remove(keys::TAX_PIS);

    let (status, body) = get(app_with_repository(repo), "/api/v1/health").await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "degraded");
}

#[tokio::test]
async fn test_freight_quote() {
    let request = json!({
        "weight": 1000,
        "origin": "us-fl",
        "destination": "sp"
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/freight", request).await;
    assert_eq!(status, StatusCode::OK);

    let quote = &body["data"];
    assert_eq!(quote["origin"], "US-FL");
    assert_eq!(quote["destination"], "SP");
    assert_eq!(quote["service"], "standard");
    assert_eq!(number(&quote["baseRate"]), 15.32);
    assert_eq!(number(&quote["markupAmount"]), 3.06);
    assert_eq!(number(&quote["processingFee"]), 3.0);
    assert_eq!(number(&quote["totalFreight"]), 21.38);
    assert!(body.get("meta").is_none());
}

#[tokio::test]
async fn test_freight_quote_markup_override_is_bounded() {
    let request = json!({
        "weight": 30000,
        "origin": "US-DE",
        "destination": "RJ",
        "service": "standard",
        "markup": 0.5
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/freight", request).await;
    assert_eq!(status, StatusCode::OK);

    // 149.90 x 50% is capped at the 50.00 maximum
    assert_eq!(number(&body["data"]["markupAmount"]), 50.0);
    assert_eq!(number(&body["data"]["totalFreight"]), 202.9);
}

#[tokio::test]
async fn test_freight_quote_rejects_bad_input() {
    let cases = [
        json!({ "weight": 0, "origin": "US-FL", "destination": "SP" }),
        json!({ "weight": -500, "origin": "US-FL", "destination": "SP" }),
        json!({ "weight": 1000, "origin": "US-TX", "destination": "SP" }),
        json!({ "weight": 1000, "origin": "US-FL", "destination": "XX" }),
        json!({ "weight": 1000, "origin": "US-FL", "destination": "SP", "markup": -0.1 }),
    ];

    for request in cases {
        let (status, body) = post(default_app(), "/api/v1/quotes/freight", request.clone()).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "request {}", request);
        assert_eq!(body["error"]["code"], "invalid_input");
        assert!(body["requestId"].is_string());
    }
}

#[tokio::test]
async fn test_freight_quote_unknown_service() {
    let request = json!({
        "weight": 1000,
        "origin": "US-FL",
        "destination": "SP",
        "service": "economy"
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/freight", request).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");
}

#[tokio::test]
async fn test_freight_quote_missing_fields() {
    let (status, body) = post(default_app(), "/api/v1/quotes/freight", json!({ "origin": "US-FL" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
    assert!(body["requestId"].is_string());

    let (status, body) = post(
        default_app(),
        "/api/v1/quotes/consolidation",
        json!({ "packageCount": 2, "consolidationType": "SHRINK_WRAP" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");

    // No JSON content type at all
    let (status, body) = send(default_app(), Method::POST, "/api/v1/quotes/taxes", None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_landed_cost() {
    let request = json!({
        "productValue": 100,
        "weight": 1000,
        "origin": "US-FL",
        "destination": "SP"
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/landed-cost", request).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(number(&data["freight"]["totalFreight"]), 21.38);

    // Tax base is converted to BRL at 5.00
    let taxes = &data["taxes"];
    assert_eq!(number(&taxes["productValue"]), 500.0);
    assert_eq!(number(&taxes["freightValue"]), 106.92);
    assert_eq!(number(&taxes["totalValue"]), 606.92);
    assert_eq!(number(&taxes["icms"]), 90.0);
    assert_eq!(number(&taxes["ipi"]), 50.0);
    assert_eq!(number(&taxes["pis"]), 10.01);
    assert_eq!(number(&taxes["cofins"]), 46.13);
    assert_eq!(number(&taxes["totalTax"]), 196.14);
    assert_eq!(number(&taxes["finalValue"]), 803.06);
}

#[tokio::test]
async fn test_landed_cost_rejects_negative_product_value() {
    let request = json!({
        "productValue": -1,
        "weight": 1000,
        "origin": "US-FL",
        "destination": "SP"
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/landed-cost", request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_consolidation_quote() {
    let request = json!({
        "packageCount": 3,
        "consolidationType": "REPACK",
        "protectionTypes": ["BUBBLE_WRAP"],
        "storageDays": 35
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/consolidation", request).await;
    assert_eq!(status, StatusCode::OK);

    let data = &body["data"];
    assert_eq!(data["consolidationType"], "REPACK");
    assert_eq!(number(&data["packageFees"]), 3.0);
    assert_eq!(number(&data["repackMultiplier"]), 1.5);
    assert_eq!(number(&data["consolidationFee"]), 13.5);
    assert_eq!(number(&data["protectionFees"]), 9.0);
    assert_eq!(data["protection"]["lines"][0]["protectionType"], "BUBBLE_WRAP");
    assert_eq!(data["billableStorageDays"], 5);
    assert_eq!(number(&data["storageFee"]), 7.5);
    assert_eq!(number(&data["totalFee"]), 30.0);
    assert_eq!(number(&data["estimatedFinalWeightKg"]), 2.1);
}

#[tokio::test]
async fn test_consolidation_defaults_and_zero_packages() {
    let request = json!({
        "packageCount": 0,
        "consolidationType": "SIMPLE"
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/consolidation", request).await;
    assert_eq!(status, StatusCode::OK);

    // The base fee is charged even without packages
    assert_eq!(number(&body["data"]["consolidationFee"]), 6.0);
    assert_eq!(number(&body["data"]["totalFee"]), 6.0);
    assert_eq!(number(&body["data"]["storageFee"]), 0.0);
}

#[tokio::test]
async fn test_consolidation_rejects_duplicate_protection() {
    let request = json!({
        "packageCount": 2,
        "consolidationType": "SIMPLE",
        "protectionTypes": ["DOUBLE_BOX", "DOUBLE_BOX"]
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/consolidation", request).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_protection_quote() {
    let request = json!({
        "packageCount": 2,
        "protectionTypes": ["DOUBLE_BOX", "SECURITY_TAPE"]
    });

    let (status, body) = post(default_app(), "/api/v1/quotes/protection", request).await;
    assert_eq!(status, StatusCode::OK);

    let lines = body["data"]["lines"].as_array().unwrap();
    assert_eq!(lines.len(), 2);
    assert_eq!(number(&lines[0]["amount"]), 10.0);
    assert_eq!(number(&lines[1]["amount"]), 3.0);
    assert_eq!(number(&body["data"]["total"]), 13.0);

    let (status, _) = post(
        default_app(),
        "/api/v1/quotes/protection",
        json!({ "packageCount": 2, "protectionTypes": [] }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn test_tax_quote() {
    let request = json!({ "productValue": 100, "freightValue": 20 });

    let (status, body) = post(default_app(), "/api/v1/quotes/taxes", request).await;
    assert_eq!(status, StatusCode::OK);

    let taxes = &body["data"];
    assert_eq!(number(&taxes["totalValue"]), 120.0);
    assert_eq!(number(&taxes["icms"]), 18.0);
    assert_eq!(number(&taxes["ipi"]), 10.0);
    assert_eq!(number(&taxes["pis"]), 1.98);
    assert_eq!(number(&taxes["cofins"]), 9.12);
    assert_eq!(number(&taxes["pisCofins"]), 11.1);
    assert_eq!(number(&taxes["totalTax"]), 39.1);
    assert_eq!(number(&taxes["finalValue"]), 159.1);
}

#[tokio::test]
async fn test_rate_tables() {
    let (status, body) = get(default_app(), "/api/v1/rate-tables").await;
    assert_eq!(status, StatusCode::OK);

    let tables = body["data"].as_array().unwrap();
    assert_eq!(tables.len(), 2);
    assert_eq!(tables[0]["service"], "express");
    assert_eq!(tables[1]["service"], "standard");
    assert_eq!(tables[1]["minWeightGrams"], 500);
    assert_eq!(tables[1]["maxWeightGrams"], 30000);
}

#[tokio::test]
async fn test_rate_price() {
    let (status, body) = get(default_app(), "/api/v1/rate-tables/standard/price?weight=1250").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["weightGrams"], 1250);
    assert_eq!(number(&body["data"]["price"]), 16.71);

    // Clamped to the table boundaries
    let (_, body) = get(default_app(), "/api/v1/rate-tables/STANDARD/price?weight=100").await;
    assert_eq!(body["data"]["service"], "standard");
    assert_eq!(number(&body["data"]["price"]), 12.45);

    let (_, body) = get(default_app(), "/api/v1/rate-tables/standard/price?weight=45000").await;
    assert_eq!(number(&body["data"]["price"]), 149.9);
}

#[tokio::test]
async fn test_rate_price_errors() {
    let (status, body) = get(default_app(), "/api/v1/rate-tables/economy/price?weight=1000").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["code"], "not_found");

    let (status, body) = get(default_app(), "/api/v1/rate-tables/standard/price?weight=0").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
}

#[tokio::test]
async fn test_pricing_config() {
    let (status, body) = get(default_app(), "/api/v1/pricing/config").await;
    assert_eq!(status, StatusCode::OK);

    let routes = &body["data"]["routes"];
    assert_eq!(routes["origins"], json!(["US-FL", "US-DE", "US-OR"]));
    assert_eq!(routes["destinations"].as_array().unwrap().len(), 27);
    assert_eq!(body["data"]["storage"]["freeDays"], 30);
    assert!(body["meta"]["loadedAt"].is_string());
}

#[tokio::test]
async fn test_reload_picks_up_stored_changes() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    let app = app_with_repository(repo.clone());
    let request = json!({ "weight": 1000, "origin": "US-FL", "destination": "SP" });

    let (_, body) = post(app.clone(), "/api/v1/quotes/freight", request.clone()).await;
    assert_eq!(number(&body["data"]["processingFee"]), 3.0);

    repo.save_setting(keys::PROCESSING_FEE, "4.50").await.unwrap();

    // Still served from the cached snapshot
    let (_, body) = post(app.clone(), "/api/v1/quotes/freight", request.clone()).await;
    assert_eq!(number(&body["data"]["processingFee"]), 3.0);

    let (status, _) = post(app.clone(), "/api/v1/pricing/config/reload", json!({})).await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = post(app, "/api/v1/quotes/freight", request).await;
    assert_eq!(number(&body["data"]["processingFee"]), 4.5);
    assert_eq!(number(&body["data"]["totalFreight"]), 22.88);
}

#[tokio::test]
async fn test_broken_config_is_server_error() {
    let repo = Arc::new(InMemoryPricingConfigRepository::seeded());
    repo.settings.insert(keys::MARKUP_MIN.to_string(), "not-a-number".to_string());

    let (status, body) = post(
        app_with_repository(repo),
        "/api/v1/quotes/taxes",
        json!({ "productValue": 1, "freightValue": 1 }),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["error"]["code"], "configuration_error");
}

#[tokio::test]
async fn test_openapi_document() {
    let (status, body) = get(default_app(), "/api-docs/openapi.json").await;

    assert_eq!(status, StatusCode::OK);
    assert!(body["paths"]["/api/v1/quotes/freight"].is_object());
    assert!(body["paths"]["/api/v1/rate-tables/{service}/price"].is_object());
}

#[tokio::test]
async fn test_oversized_amounts_are_bad_requests() {
    let (status, body) = post(
        default_app(),
        "/api/v1/quotes/taxes",
        json!({ "productValue": "70000000000000000000000000000", "freightValue": "10000000000000000000000000000" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");

    let (status, body) = post(
        default_app(),
        "/api/v1/quotes/freight",
        json!({ "weight": 1000, "origin": "US-FL", "destination": "SP", "markup": 1e28 }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");

    let (status, body) = post(
        default_app(),
        "/api/v1/quotes/landed-cost",
        json!({ "productValue": "20000000000000000000000000000", "weight": 1000, "origin": "US-FL", "destination": "SP" }),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["code"], "invalid_input");
}

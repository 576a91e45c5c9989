//! Shared test fixtures for the card comparison integration tests.
//!
//! Provides listing builders for both sources and `setup_offline_sdk()`,
//! which seeds a temporary cache directory with a small tcgcsv-shaped
//! category so searches run without network access.

#![allow(dead_code)]

use cardcompare::models::{ExtendedData, LigaCard, MarketPrice, TcgPlayerCard};
use cardcompare::{CacheManager, CardCompareSdk};
use serde_json::json;
use std::time::Duration;

/// A TCGplayer listing with an optional `Number` attribute and market price.
pub fn tcg_card(
    product_id: i64,
    name: &str,
    number: Option<&str>,
    set_name: Option<&str>,
    market: Option<f64>,
) -> TcgPlayerCard {
    TcgPlayerCard {
        product_id,
        name: name.to_string(),
        clean_name: name.to_string(),
        extended_data: number.map(|n| {
            vec![ExtendedData {
                name: "Number".to_string(),
                display_name: "Number".to_string(),
                value: n.to_string(),
            }]
        }),
        price: market.map(|m| MarketPrice {
            product_id,
            market_price: Some(m),
            sub_type_name: "Normal".to_string(),
            ..MarketPrice::default()
        }),
        set_name: set_name.map(str::to_string),
        ..TcgPlayerCard::default()
    }
}

/// A storefront listing priced in BRL.
pub fn liga_card(name: &str, code: &str, set: Option<&str>, price: f64) -> LigaCard {
    LigaCard {
        name: name.to_string(),
        numeric_code: code.to_string(),
        price,
        currency: "BRL".to_string(),
        set: set.map(str::to_string),
        ..LigaCard::default()
    }
}

/// Display name of whichever side a match carries, TCGplayer first.
pub fn match_name(m: &cardcompare::models::CardMatch) -> String {
    m.tcg_card
        .as_ref()
        .map(|c| c.name.clone())
        .or_else(|| m.liga_card.as_ref().map(|c| c.name.clone()))
        .unwrap_or_default()
}

/// Seed `dir` with two One Piece groups, their products and prices.
///
/// Group 3001 ("Wings of the Captain") has full data. Group 3002 ("Romance
/// Dawn") has products but no prices file, so its listings carry no price.
/// Group 3003 has no products file at all.
pub fn seed_cache(dir: &std::path::Path) {
    let cache = CacheManager::new(
        Some(dir.to_path_buf()),
        true,
        Duration::from_secs(30),
        Duration::from_secs(60),
    )
    .unwrap();

    cache
        .store_json(
            "68/groups",
            &json!({
                "success": true,
                "results": [
                    {"groupId": 3001, "name": "Wings of the Captain", "abbreviation": "OP06"},
                    {"groupId": 3002, "name": "Romance Dawn", "abbreviation": null},
                    {"groupId": 3003, "name": "Mystery Box"}
                ]
            }),
        )
        .unwrap();

    cache
        .store_json(
            "68/3001/products",
            &json!({
                "results": [
                    {
                        "productId": 501,
                        "name": "Monkey.D.Luffy",
                        "cleanName": "Monkey D Luffy",
                        "imageUrl": "https://img/501.jpg",
                        "categoryId": 68,
                        "groupId": 3001,
                        "url": "https://www.tcgplayer.com/product/501",
                        "extendedData": [
                            {"name": "Number", "displayName": "Card Number", "value": "OP06-054"},
                            {"name": "Rarity", "displayName": "Rarity", "value": "SR"}
                        ]
                    },
                    {
                        "productId": 502,
                        "name": "Trafalgar Law",
                        "cleanName": "Trafalgar Law",
                        "categoryId": 68,
                        "groupId": 3001,
                        "extendedData": [
                            {"name": "Number", "value": "OP06-112"}
                        ]
                    }
                ]
            }),
        )
        .unwrap();

    cache
        .store_json(
            "68/3001/prices",
            &json!({
                "results": [
                    {"productId": 501, "lowPrice": 9.5, "midPrice": 11.0, "highPrice": 15.0,
                     "marketPrice": 12.0, "directLowPrice": null, "subTypeName": "Normal"},
                    {"productId": 502, "marketPrice": 3.0, "subTypeName": "Normal"}
                ]
            }),
        )
        .unwrap();

    cache
        .store_json(
            "68/3002/products",
            &json!([
                {
                    "productId": 601,
                    "name": "Monkey.D.Luffy (Parallel)",
                    "cleanName": "Monkey D Luffy Parallel",
                    "categoryId": 68,
                    "groupId": 3002
                }
            ]),
        )
        .unwrap();
}

/// An offline SDK over a freshly seeded cache.
///
/// Returns `(CardCompareSdk, tempfile::TempDir)`. The caller must keep the
/// `TempDir` alive for the duration of the test.
pub fn setup_offline_sdk() -> (CardCompareSdk, tempfile::TempDir) {
    let tmp_dir = tempfile::tempdir().unwrap();
    seed_cache(tmp_dir.path());
    let sdk = CardCompareSdk::builder()
        .cache_dir(tmp_dir.path())
        .offline(true)
        .build()
        .unwrap();
    (sdk, tmp_dir)
}

//! Async wrapper tests (requires the `async` feature).

#![cfg(feature = "async")]

mod common;

use cardcompare::models::SortKey;
use cardcompare::AsyncCardCompareSdk;

#[tokio::test]
async fn async_search_runs_on_blocking_pool() {
    let tmp = tempfile::tempdir().unwrap();
    common::seed_cache(tmp.path());

    let sdk = AsyncCardCompareSdk::builder()
        .cache_dir(tmp.path())
        .offline(true)
        .build()
        .await
        .unwrap();

    let report = sdk.search("luffy", SortKey::Match).await.unwrap();
    assert_eq!(report.tcg_results.len(), 2);
    assert!(report.errors.liga.is_some());

    let conversion = sdk.convert(10.0, "BRL", "USD").await.unwrap();
    assert!(conversion.fallback);

    let groups = sdk.run(|s| s.tcgplayer().groups()).await.unwrap();
    assert_eq!(groups.len(), 3);

    sdk.close().await.unwrap();
}

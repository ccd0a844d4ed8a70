//! End-to-end flows over an in-memory store
//! Run: cargo test -p kanvas-engine --test engine_flow

use chrono::NaiveDate;
use kanvas_engine::achievement::{AchievementService, DateWindow};
use kanvas_engine::commit::CommitEngine;
use kanvas_engine::csv::{MslRow, ProductRow, classify, parse};
use kanvas_engine::events::{EngineEvent, EventBus};
use kanvas_engine::store::{
    CatalogRepository, Collection, EngineStore, MslRepository, OutletRepository, StoreError,
    VisitRepository,
};
use rust_decimal::Decimal;
use shared::models::{MslItem, Outlet, Visit, VisitOrder};
use surrealdb::Surreal;
use surrealdb::engine::local::{Db, Mem, RocksDb};

async fn mem_store() -> EngineStore {
    let db = Surreal::new::<Mem>(()).await.unwrap();
    db.use_ns("test").use_db("test").await.unwrap();
    EngineStore::new(db)
}

fn dec(s: &str) -> Decimal {
    s.parse().unwrap()
}

#[tokio::test]
async fn msl_replace_preserves_untouched_categories() {
    let store = mem_store().await;
    let bus = EventBus::default();
    let mut events = bus.subscribe();
    let engine = CommitEngine::new(bus);
    let msl = MslRepository::new(store.msl_items());

    let first = "CATEGORY,SKU_CODE,PRODUCT_NAME,PRIORITY\n\
                 GROCERY,SKU-A,Instant Noodles,1\n\
                 GROCERY,SKU-B,Cooking Oil 1L,2\n\
                 KIOSK,SKU-D,Soap Bar,1\n";
    let parsed = parse::<MslRow>(first).unwrap();
    let outcome = engine
        .replace_msl_rows(store.msl_items().as_ref(), parsed.into_valid_rows())
        .await
        .unwrap();
    assert_eq!(outcome.inserted, 3);
    assert_eq!(outcome.categories, vec!["GROCERY", "KIOSK"]);

    // Second upload touches only GROCERY
    let second = "CATEGORY,SKU_CODE,PRODUCT_NAME,PRIORITY\n\
                  GROCERY,SKU-C,Candy Mix,1\n";
    let parsed = parse::<MslRow>(second).unwrap();
    engine
        .replace_msl_rows(store.msl_items().as_ref(), parsed.into_valid_rows())
        .await
        .unwrap();

    let grocery = msl.find_by_category("GROCERY").await.unwrap();
    assert_eq!(grocery.len(), 1);
    assert_eq!(grocery[0].sku_code, "SKU-C");

    let kiosk = msl.find_by_category("KIOSK").await.unwrap();
    assert_eq!(kiosk.len(), 1, "untouched category must survive");

    let event = events.recv().await.unwrap();
    assert!(matches!(
        event,
        EngineEvent::MslReplaced { ref categories } if categories == &["GROCERY", "KIOSK"]
    ));
}

#[tokio::test]
async fn msl_replace_is_idempotent() {
    let store = mem_store().await;
    let engine = CommitEngine::new(EventBus::default());
    let msl = MslRepository::new(store.msl_items());

    let upload = "CATEGORY,SKU_CODE,PRODUCT_NAME,PRIORITY\n\
                  GROCERY,SKU-A,Instant Noodles,1\n\
                  GROCERY,SKU-B,Cooking Oil 1L,2\n";
    for _ in 0..2 {
        let parsed = parse::<MslRow>(upload).unwrap();
        engine
            .replace_msl_rows(store.msl_items().as_ref(), parsed.into_valid_rows())
            .await
            .unwrap();
    }

    let items = msl.find_all().await.unwrap();
    assert_eq!(items.len(), 2, "re-upload must not duplicate items");
}

#[tokio::test]
async fn product_upsert_classifies_and_counts() {
    let store = mem_store().await;
    let engine = CommitEngine::new(EventBus::default());
    let catalog = CatalogRepository::new(store.products());

    let first = "SKU_CODE,PRODUCT_NAME,BRAND,CATEGORY,PRICE\n\
                 SKU-A,Instant Noodles,Indomie,GROCERY,3500\n\
                 SKU-B,Cooking Oil 1L,Bimoli,GROCERY,18000\n";
    let parsed = parse::<ProductRow>(first).unwrap();
    let existing = catalog.existing_skus().await.unwrap();
    let (actions, summary) = classify(&parsed, &existing);
    assert_eq!(summary.to_insert, 2);
    assert_eq!(summary.to_update, 0);

    let outcome = engine
        .upsert_products(store.products().as_ref(), actions)
        .await;
    assert_eq!(outcome.added, 2);

    // Second upload: one price change, one new SKU
    let second = "SKU_CODE,PRODUCT_NAME,BRAND,CATEGORY,PRICE\n\
                  SKU-A,Instant Noodles,Indomie,GROCERY,4000\n\
                  SKU-C,Candy Mix,Yupi,GROCERY,9000\n";
    let parsed = parse::<ProductRow>(second).unwrap();
    let existing = catalog.existing_skus().await.unwrap();
    let (actions, summary) = classify(&parsed, &existing);
    assert_eq!(summary.to_insert, 1);
    assert_eq!(summary.to_update, 1);

    let outcome = engine
        .upsert_products(store.products().as_ref(), actions)
        .await;
    assert_eq!(outcome.added, 1);
    assert_eq!(outcome.updated, 1);
    assert_eq!(outcome.failed, 0);

    let products = catalog.find_all().await.unwrap();
    assert_eq!(products.len(), 3);
    let sku_a = products.iter().find(|p| p.sku_code == "SKU-A").unwrap();
    assert_eq!(sku_a.unit_price, dec("4000"));
}

#[tokio::test]
async fn achievement_over_a_month_window() {
    let store = mem_store().await;
    let engine = CommitEngine::new(EventBus::default());

    let msl_upload = "CATEGORY,SKU_CODE,PRODUCT_NAME,PRIORITY\n\
                      GROCERY,SKU-A,Instant Noodles,1\n\
                      GROCERY,SKU-B,Cooking Oil 1L,2\n\
                      GROCERY,SKU-C,Candy Mix,3\n";
    let parsed = parse::<MslRow>(msl_upload).unwrap();
    engine
        .replace_msl_rows(store.msl_items().as_ref(), parsed.into_valid_rows())
        .await
        .unwrap();

    store
        .outlets()
        .insert(vec![
            Outlet::new("T-001", "Toko Maju", "GROCERY"),
            Outlet::new("T-002", "Toko Sinar", "GROCERY"),
            Outlet::new("T-003", "Warung Kopi", "HORECA"),
        ])
        .await
        .unwrap();

    let visits = VisitRepository::new(store.visits(), store.visit_orders());
    let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

    // T-001 buys SKU-A and SKU-C across two visits
    let v1 = Visit::new("S-01", "T-001", date);
    let line = VisitOrder::new(v1.visit_id.clone(), "SKU-A", 10, dec("3500"));
    visits.record_visit(v1, vec![line]).await.unwrap();

    let v2 = Visit::new("S-01", "T-001", date.succ_opt().unwrap());
    let line = VisitOrder::new(v2.visit_id.clone(), "SKU-C", 5, dec("9000"));
    visits.record_visit(v2, vec![line]).await.unwrap();

    // T-002 visited, bought nothing
    visits
        .record_visit(Visit::new("S-01", "T-002", date), vec![])
        .await
        .unwrap();

    // T-003 has no GROCERY list, excluded from the mean
    let v4 = Visit::new("S-02", "T-003", date);
    let line = VisitOrder::new(v4.visit_id.clone(), "SKU-A", 1, dec("3500"));
    visits.record_visit(v4, vec![line]).await.unwrap();

    let service = AchievementService::new(
        MslRepository::new(store.msl_items()),
        OutletRepository::new(store.outlets()),
        visits,
    );
    let result = service
        .compute_for_window(DateWindow::month(2025, 6).unwrap())
        .await
        .unwrap();

    assert_eq!(result.included, 2);
    assert_eq!(result.excluded, 1);
    // (66.67 + 0) / 2
    assert!((result.overall - 33.3333).abs() < 0.01);

    let t001 = result
        .stores
        .iter()
        .find(|s| s.store_code == "T-001")
        .unwrap();
    assert_eq!(t001.matched, 2);
    assert_eq!(t001.target, 3);
}

#[tokio::test]
async fn rocksdb_store_persists_across_reopen() {
    let tmp = tempfile::tempdir().unwrap();
    {
        let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
        db.use_ns("kanvas").use_db("engine").await.unwrap();
        let store = EngineStore::new(db);
        store
            .msl_items()
            .insert(vec![MslItem::new("GROCERY", "SKU-A", "Instant Noodles", 1)])
            .await
            .unwrap();
    }

    let db: Surreal<Db> = Surreal::new::<RocksDb>(tmp.path()).await.unwrap();
    db.use_ns("kanvas").use_db("engine").await.unwrap();
    let store = EngineStore::new(db);
    let items = MslRepository::new(store.msl_items()).find_all().await.unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0].sku_code, "SKU-A");
}

#[tokio::test]
async fn visit_validation_rejects_bad_lines_before_writing() {
    let store = mem_store().await;
    let visits = VisitRepository::new(store.visits(), store.visit_orders());
    let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

    let visit = Visit::new("S-01", "T-001", date);
    let mut line = VisitOrder::new(visit.visit_id.clone(), "SKU-A", 0, dec("3500"));
    line.discount_percentage = Decimal::ZERO;

    let err = visits.record_visit(visit, vec![line]).await.unwrap_err();
    assert!(matches!(err, StoreError::Validation(_)));

    let stored = visits.visits_between(date, date).await.unwrap();
    assert!(stored.is_empty(), "rejected visit must not be persisted");
}

#[tokio::test]
async fn visit_with_lines_is_an_effective_call() {
    let store = mem_store().await;
    let visits = VisitRepository::new(store.visits(), store.visit_orders());
    let date = NaiveDate::from_ymd_opt(2025, 6, 10).unwrap();

    let visit = Visit::new("S-01", "T-001", date);
    let line = VisitOrder::new(visit.visit_id.clone(), "SKU-A", 2, dec("3500"));
    visits.record_visit(visit, vec![line]).await.unwrap();

    visits
        .record_visit(Visit::new("S-01", "T-002", date), vec![])
        .await
        .unwrap();

    let stored = visits.visits_between(date, date).await.unwrap();
    assert_eq!(stored.len(), 2);
    let effective: Vec<_> = stored.iter().filter(|v| v.has_order).collect();
    assert_eq!(effective.len(), 1);
    assert_eq!(effective[0].store_code, "T-001");
}

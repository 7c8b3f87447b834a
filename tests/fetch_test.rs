mod common;

use common::{FakeCatalog, limits};
use pokedex::api::LookupKey;
use pokedex::fetch::{FetchCoordinator, PageRequest, merge_into_store};
use pokedex::store::RecordStore;

#[tokio::test]
async fn test_fetch_page_resolves_every_item_in_id_order() {
    let source = FakeCatalog::new(50);
    let coordinator = FetchCoordinator::new(&source, limits(10, 50));

    let report = coordinator.fetch_page(PageRequest::new(0, 10)).await.unwrap();

    let ids: Vec<u32> = report.records.iter().map(|p| p.id).collect();
    assert_eq!(ids, (1..=10).collect::<Vec<_>>());
    assert!(report.failures.is_empty());

    let first = &report.records[0];
    assert_eq!(first.name, "mon-1");
    assert_eq!(first.types, vec!["water"]);
    assert_eq!(first.generation, Some(1));
    assert_eq!(first.games, vec!["red", "blue"]);

    let requests = source.requests();
    assert_eq!(requests.lists, vec![(0, 10)]);
    assert_eq!(requests.pokemon.len(), 10);
    assert_eq!(requests.species.len(), 10);
}

#[tokio::test]
async fn test_fetch_page_keeps_successes_when_items_fail() {
    let source = FakeCatalog::new(50).failing_on(&[3, 7]);
    let coordinator = FetchCoordinator::new(&source, limits(10, 50));

    let report = coordinator.fetch_page(PageRequest::new(0, 10)).await.unwrap();

    assert_eq!(report.records.len(), 8);
    assert!(report.records.iter().all(|p| p.id != 3 && p.id != 7));
    assert!(report.is_partial());

    let mut failed: Vec<Option<u32>> = report.failures.iter().map(|f| f.id).collect();
    failed.sort();
    assert_eq!(failed, vec![Some(3), Some(7)]);
    assert!(report.failures.iter().all(|f| f.error.contains("status 500")));

    let summary = report.summary();
    assert_eq!((summary.requested, summary.loaded, summary.failed), (10, 8, 2));
}

#[tokio::test]
async fn test_fetch_page_fails_when_listing_fails() {
    let source = FakeCatalog::new(50).with_broken_list();
    let coordinator = FetchCoordinator::new(&source, limits(10, 50));

    let err = coordinator
        .fetch_page(PageRequest::new(0, 10))
        .await
        .unwrap_err();

    assert!(err.is_transport());
    assert!(source.requests().pokemon.is_empty());
}

#[tokio::test]
async fn test_last_page_past_catalog_end_is_short() {
    let source = FakeCatalog::new(25);
    let coordinator = FetchCoordinator::new(&source, limits(10, 25));

    let report = coordinator.fetch_page(PageRequest::new(20, 10)).await.unwrap();

    let ids: Vec<u32> = report.records.iter().map(|p| p.id).collect();
    assert_eq!(ids, vec![21, 22, 23, 24, 25]);
}

#[tokio::test]
async fn test_fetch_one_by_name_and_id() {
    let source = FakeCatalog::new(50);
    let coordinator = FetchCoordinator::new(&source, limits(10, 50));

    let by_name = coordinator
        .fetch_one(&LookupKey::Name("mon-42".to_string()))
        .await
        .unwrap();
    assert_eq!(by_name.id, 42);
    assert!(by_name.is_complete());

    let by_id = coordinator.fetch_one(&LookupKey::Id(42)).await.unwrap();
    assert_eq!(by_id, by_name);
}

#[tokio::test]
async fn test_fetch_one_form_uses_referenced_species() {
    let source = FakeCatalog::new(400).with_form("deoxys-attack", 10001, 386);
    let coordinator = FetchCoordinator::new(&source, limits(10, 400));

    let record = coordinator
        .fetch_one(&LookupKey::Name("deoxys-attack".to_string()))
        .await
        .unwrap();

    assert_eq!(record.id, 10001);
    assert_eq!(record.name, "deoxys-attack");
    assert_eq!(record.generation, Some(3));
    assert_eq!(source.requests().species, vec![386]);
}

#[tokio::test]
async fn test_fetch_record_for_form_falls_back_to_referenced_species() {
    let source = FakeCatalog::new(400).with_form("deoxys-attack", 10001, 386);
    let coordinator = FetchCoordinator::new(&source, limits(10, 400));

    let record = coordinator.fetch_record(10001).await.unwrap();

    assert_eq!(record.id, 10001);
    assert!(record.is_complete());
    assert_eq!(source.requests().species, vec![10001, 386]);
}

#[tokio::test]
async fn test_fetch_record_does_not_refetch_species_on_transport_error() {
    let source = FakeCatalog::new(50).with_broken_species();
    let coordinator = FetchCoordinator::new(&source, limits(10, 50));

    let err = coordinator.fetch_record(7).await.unwrap_err();

    assert!(err.is_transport());
    assert_eq!(source.requests().species, vec![7]);
}

#[tokio::test]
async fn test_fetch_one_unknown_is_not_found() {
    let source = FakeCatalog::new(50);
    let coordinator = FetchCoordinator::new(&source, limits(10, 50));

    let err = coordinator
        .fetch_one(&LookupKey::Name("missingno".to_string()))
        .await
        .unwrap_err();
    assert!(err.is_not_found());

    let err = coordinator.fetch_one(&LookupKey::Id(51)).await.unwrap_err();
    assert!(err.is_not_found());
    assert!(source.requests().species.is_empty());
}

#[tokio::test]
async fn test_fetch_all_skips_resident_ids() {
    let source = FakeCatalog::new(30);
    let coordinator = FetchCoordinator::new(&source, limits(10, 30));

    let mut store = RecordStore::new();
    let first_page = coordinator.fetch_page(PageRequest::new(0, 10)).await.unwrap();
    merge_into_store(&mut store, first_page.records);
    source.clear_requests();

    let report = coordinator.fetch_all(&store).await.unwrap();

    assert_eq!(source.requests().lists, vec![(0, 30)]);
    assert_eq!(source.requests().pokemon.len(), 20);
    let ids: Vec<u32> = report.records.iter().map(|p| p.id).collect();
    assert_eq!(ids, (11..=30).collect::<Vec<_>>());

    let stats = merge_into_store(&mut store, report.records);
    assert_eq!(stats.added, 20);
    assert_eq!(store.len(), 30);
}

#[tokio::test]
async fn test_fetch_all_runs_in_waves_and_collects_failures() {
    let source = FakeCatalog::new(20).failing_on(&[5, 19]);
    let mut config_limits = limits(10, 20);
    config_limits.batch_concurrency = 3;
    let coordinator = FetchCoordinator::new(&source, config_limits);

    let report = coordinator.fetch_all(&RecordStore::new()).await.unwrap();

    assert_eq!(report.records.len(), 18);
    assert_eq!(report.failures.len(), 2);
    assert!(report.records.windows(2).all(|w| w[0].id < w[1].id));
}

#[tokio::test]
async fn test_merging_a_page_twice_adds_nothing() {
    let source = FakeCatalog::new(20);
    let coordinator = FetchCoordinator::new(&source, limits(10, 20));
    let mut store = RecordStore::new();

    let page = coordinator.fetch_page(PageRequest::new(0, 10)).await.unwrap();
    merge_into_store(&mut store, page.records.clone());
    let stats = merge_into_store(&mut store, page.records);

    assert_eq!(stats.added, 0);
    assert_eq!(stats.skipped, 10);
    assert_eq!(store.len(), 10);
}

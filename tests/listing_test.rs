mod common;

use std::time::Duration;

use common::{MockSource, make_user, make_users};
use tempfile::TempDir;
use tokio::time::advance;
use userdex::listing::Debouncer;
use userdex::state::{GENDER_KEY, Persisted};
use userdex::{
    Batch, DetailOutcome, FetchOutcome, FileStore, Gender, KeyValueStore, ListingConfig,
    ListingController, MemoryStore, UserdexError, parse_detail_route,
};

fn controller(
    responses: Vec<userdex::Result<Batch>>,
) -> ListingController<MockSource, MemoryStore> {
    ListingController::new(
        MockSource::new(responses),
        MemoryStore::new(),
        ListingConfig::default(),
    )
}

#[tokio::test]
async fn test_browse_scenario_pages_through_server() {
    let mut ctl = controller(vec![
        Ok(Batch::new(make_users("a", 12))),
        Ok(Batch::new(make_users("b", 5))),
    ]);

    assert_eq!(ctl.sync().await, FetchOutcome::Applied);
    let view = ctl.view();
    assert_eq!(view.records.len(), 12);
    assert!(view.pagination.has_next_page);
    assert!(view.pagination.total_pages > 1);

    ctl.on_page_change(2).unwrap();
    assert_eq!(ctl.sync().await, FetchOutcome::Applied);

    let requests = ctl.source().requests();
    assert_eq!(requests.len(), 2);
    let url = requests[1].to_url("https://randomuser.me/api").unwrap();
    assert_eq!(url.query(), Some("results=12&page=2"));

    let view = ctl.view();
    assert_eq!(view.records.len(), 5);
    assert!(!view.pagination.has_next_page);
    assert_eq!(view.pagination.total_pages, 2);
    assert!(view.pagination.has_previous_page);

    // both batches stay resolvable for the detail view
    assert_eq!(ctl.store().len(), 17);
}

#[tokio::test(start_paused = true)]
async fn test_debounced_search_fetches_once_after_quiet_period() {
    let mut pool = make_users("x", 40);
    pool.push(make_user("ann-1", "Ann", "Lee"));
    pool.push(make_user("ann-2", "Joanne", "Smith"));
    pool.push(make_user("ann-3", "Bob", "Hannah"));
    let mut ctl = controller(vec![Ok(Batch::new(pool))]);
    let mut debouncer = Debouncer::new(Duration::from_millis(300));

    for partial in ["a", "an", "ann"] {
        debouncer.schedule(partial.to_string());
    }

    advance(Duration::from_millis(250)).await;
    assert_eq!(debouncer.take_due(), None);
    assert!(ctl.source().requests().is_empty());

    advance(Duration::from_millis(50)).await;
    let text = debouncer.take_due().expect("search due after 300ms");
    assert_eq!(text, "ann");
    ctl.on_search(&text);
    ctl.sync().await;

    let requests = ctl.source().requests();
    assert_eq!(requests.len(), 1);
    assert_eq!(requests[0].results, Some(5000));
    assert_eq!(requests[0].page, None);

    let ids: Vec<&str> = ctl.view().records.iter().map(|u| u.id()).collect();
    assert_eq!(ids, vec!["ann-1", "ann-2", "ann-3"]);
    assert_eq!(ctl.view().pagination.total_matches, Some(3));
    assert_eq!(ctl.view().pagination.total_pages, 1);
}

#[tokio::test]
async fn test_activated_record_resolves_without_fetch() {
    let mut ctl = controller(vec![Ok(Batch::new(vec![make_user(
        "abc-123", "Anna", "Berg",
    )]))]);
    ctl.sync().await;

    let user = ctl.view().records[0].clone();
    let route = ctl.on_record_activate(&user);
    let id = parse_detail_route(&route).unwrap();

    match DetailOutcome::resolve(ctl.store(), id) {
        DetailOutcome::Found(found) => assert_eq!(found.full_name(), "Anna Berg"),
        other => panic!("expected Found, got {other:?}"),
    }
    assert!(matches!(
        DetailOutcome::resolve(ctl.store(), "zzz"),
        DetailOutcome::NotFound { .. }
    ));
    assert!(matches!(
        userdex::resolve_by_id(ctl.store(), "zzz"),
        Err(UserdexError::RecordNotFound(_))
    ));
    assert_eq!(ctl.source().requests().len(), 1);
}

#[test]
fn test_gender_filter_survives_restart() {
    let tmp = TempDir::new().unwrap();
    let path = tmp.path().join("state.json");

    {
        let mut ctl = ListingController::new(
            MockSource::default(),
            FileStore::new(&path),
            ListingConfig::default(),
        );
        ctl.on_gender_change(Some(Gender::Female));
        ctl.on_page_change(3).unwrap();
    }

    let ctl = ListingController::new(
        MockSource::default(),
        FileStore::new(&path),
        ListingConfig::default(),
    );
    assert_eq!(ctl.gender(), Some(Gender::Female));
    assert_eq!(ctl.page(), 3);
    assert_eq!(ctl.search_text(), "");
}

#[test]
fn test_failed_state_write_keeps_session_value() {
    let mut storage = MemoryStore::new();
    let mut gender = Persisted::load(&storage, GENDER_KEY, String::new());
    storage.fail_writes(true);
    gender.set(&mut storage, "female".to_string());

    assert_eq!(gender.get(), "female");
    assert_eq!(
        storage.get("user_listing_filter_gender").unwrap(),
        None
    );
}

#[tokio::test]
async fn test_fetch_failure_is_retryable() {
    let mut ctl = controller(vec![
        Err(UserdexError::Api("HTTP 500 Internal Server Error".to_string())),
        Ok(Batch::new(make_users("r", 12))),
    ]);

    assert_eq!(ctl.sync().await, FetchOutcome::Failed);
    assert!(ctl.view().error.is_some());
    assert!(!ctl.view().is_loading);

    assert_eq!(ctl.retry().await, Some(FetchOutcome::Applied));
    assert!(ctl.view().error.is_none());
    assert_eq!(ctl.view().records.len(), 12);

    let requests = ctl.source().requests();
    assert_eq!(requests[0], requests[1]);
}

mod common;

use common::{favorited, page, rejected, settle, system};
use std::time::Duration;
use tryon_studio::error::ErrorKind;
use tryon_studio::gateway::{GatewayCall, MockGateway};
use tryon_studio::history::HistoryError;
use tryon_studio::model::{GenerationId, HistoryQuery};

#[tokio::test]
async fn test_fetch_replaces_page_wholesale() {
    let mock = MockGateway::new();
    mock.expect_list_history()
        .return_ok(page(1, 45, &["t1", "t2"]));
    mock.expect_list_history().return_ok(page(2, 45, &["t3"]));
    let system = system(&mock);
    let history = &system.history;

    history.fetch_history(1).await.unwrap();
    history.fetch_history(2).await.unwrap();

    let snapshot = history.snapshot().await.unwrap();
    let ids: Vec<_> = snapshot.entries().iter().map(|e| e.id.as_str()).collect();
    assert_eq!(ids, vec!["t3"]);
    assert_eq!(snapshot.page.page_number, 2);
    assert_eq!(snapshot.page.total_count, 45);
    assert!(!snapshot.loading);
    assert_eq!(snapshot.error, None);

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_last_page_of_45() {
    let mock = MockGateway::new();
    mock.expect_list_history()
        .return_ok(page(3, 45, &["t41", "t42", "t43", "t44", "t45"]));
    let system = system(&mock);
    let history = &system.history;

    let loaded = history.fetch_history(3).await.unwrap();
    assert_eq!(loaded.entries.len(), 5);
    assert_eq!(history.total_pages().await.unwrap(), 3);
    assert_eq!(history.entries().await.unwrap().len(), 5);
    assert_eq!(
        mock.calls(),
        vec![GatewayCall::ListHistory(HistoryQuery {
            page: 3,
            page_size: 20
        })]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_failed_fetch_keeps_previous_entries() {
    let mock = MockGateway::new();
    mock.expect_list_history()
        .return_ok(page(1, 2, &["t1", "t2"]));
    mock.expect_list_history()
        .return_err(rejected(500, "Failed to fetch history"));
    let system = system(&mock);
    let history = &system.history;

    history.fetch_history(1).await.unwrap();
    let err = history.fetch_history(2).await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::HistoryFetchFailure);

    let snapshot = history.snapshot().await.unwrap();
    assert_eq!(snapshot.entries().len(), 2);
    assert_eq!(snapshot.page.page_number, 1);
    assert_eq!(snapshot.error, Some(err));
    assert!(!snapshot.loading);

    // The entries stay visible until the error is dismissed.
    history.clear_error().await.unwrap();
    assert_eq!(history.error().await.unwrap(), None);

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_loading_flag_while_fetch_in_flight() {
    let mock = MockGateway::new();
    mock.expect_list_history()
        .after(Duration::from_secs(2))
        .return_ok(page(1, 1, &["t1"]));
    let system = system(&mock);
    let history = &system.history;

    let pending = {
        let history = history.clone();
        tokio::spawn(async move { history.fetch_history(1).await })
    };
    settle().await;
    assert!(history.is_loading().await.unwrap());

    pending.await.unwrap().unwrap();
    assert!(!history.is_loading().await.unwrap());

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_older_fetch_is_superseded() {
    let mock = MockGateway::new();
    mock.expect_list_history()
        .after(Duration::from_secs(5))
        .return_ok(page(1, 45, &["t1"]));
    mock.expect_list_history()
        .after(Duration::from_secs(1))
        .return_ok(page(2, 45, &["t21"]));
    let system = system(&mock);
    let history = &system.history;

    let first = {
        let history = history.clone();
        tokio::spawn(async move { history.fetch_history(1).await })
    };
    settle().await;
    let second = history.fetch_history(2).await.unwrap();
    assert_eq!(second.page_number, 2);

    assert_eq!(
        first.await.unwrap(),
        Err(HistoryError::Superseded { page: 1 })
    );
    let snapshot = history.snapshot().await.unwrap();
    assert_eq!(snapshot.page.page_number, 2);
    assert_eq!(snapshot.entries()[0].id.as_str(), "t21");

    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_slow_listing_reports_fetch_failure() {
    let mock = MockGateway::new();
    mock.expect_list_history()
        .after(Duration::from_secs(16))
        .return_ok(page(1, 1, &["t1"]));
    let system = system(&mock);

    let err = system.history.fetch_history(1).await.unwrap_err();
    assert!(matches!(err, HistoryError::FetchFailed(ref msg) if msg.contains("timed out")));
    assert!(!system.history.is_loading().await.unwrap());

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_page_numbers_are_not_clamped() {
    let mock = MockGateway::new();
    mock.expect_list_history().return_ok(page(0, 0, &[]));
    let system = system(&mock);

    system.history.fetch_history(0).await.unwrap();
    assert_eq!(
        mock.calls(),
        vec![GatewayCall::ListHistory(HistoryQuery {
            page: 0,
            page_size: 20
        })]
    );

    system.shutdown().await.unwrap();
}

#[tokio::test]
async fn test_toggle_favorite_is_a_confirmed_write() {
    let mock = MockGateway::new();
    mock.expect_list_history()
        .return_ok(page(1, 2, &["t1", "t2"]));
    mock.expect_set_favorite().return_ok(favorited("t2", true));
    mock.expect_set_favorite()
        .return_err(rejected(404, "Try-on session not found"));
    let system = system(&mock);
    let history = &system.history;
    history.fetch_history(1).await.unwrap();

    let confirmed = history
        .toggle_favorite(GenerationId::from("t2"), true)
        .await
        .unwrap();
    assert!(confirmed.is_favorite);
    let favorites = history.favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id.as_str(), "t2");

    let before = history.snapshot().await.unwrap();
    let err = history
        .toggle_favorite(GenerationId::from("t1"), true)
        .await
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::FavoriteUpdateFailure);
    assert_eq!(history.snapshot().await.unwrap(), before);

    mock.verify();
    system.shutdown().await.unwrap();
}

#[tokio::test(start_paused = true)]
async fn test_toggle_during_fetch_survives_the_new_page() {
    let mock = MockGateway::new();
    mock.expect_list_history()
        .return_ok(page(1, 2, &["t1", "t2"]));
    mock.expect_list_history()
        .after(Duration::from_secs(3))
        .return_ok(page(1, 2, &["t1", "t2"]));
    mock.expect_set_favorite().return_ok(favorited("t2", true));
    let system = system(&mock);
    let history = &system.history;
    history.fetch_history(1).await.unwrap();

    let reload = {
        let history = history.clone();
        tokio::spawn(async move { history.fetch_history(1).await })
    };
    settle().await;
    history
        .toggle_favorite(GenerationId::from("t2"), true)
        .await
        .unwrap();
    reload.await.unwrap().unwrap();

    let favorites = history.favorites().await.unwrap();
    assert_eq!(favorites.len(), 1);
    assert_eq!(favorites[0].id.as_str(), "t2");

    mock.verify();
    system.shutdown().await.unwrap();
}

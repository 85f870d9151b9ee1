//! Feed store ordering and loading-indicator tests.
//!
//! All tests run on a paused clock, so scripted latencies are deterministic
//! and instant.

use std::sync::Arc;
use std::time::Duration;

use arbfeed::app::{FeedStore, RefreshOutcome, MIN_LOADING};
use arbfeed::error::FeedError;
use arbfeed::testkit::{BetBuilder, ScriptedFeed};

fn batch(player: &str) -> Vec<arbfeed::domain::BetRecord> {
    vec![BetBuilder::new(player).arb(2.0).build()]
}

#[tokio::test(start_paused = true)]
async fn last_issued_refresh_wins_under_out_of_order_completion() {
    let feed = Arc::new(ScriptedFeed::new());
    // The first request is slow and completes long after the second.
    feed.push_ok(Duration::from_millis(2000), batch("stale"));
    feed.push_ok(Duration::from_millis(10), batch("fresh"));

    let store = Arc::new(FeedStore::new(feed));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });
    tokio::task::yield_now().await;
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });

    let first = first.await.unwrap();
    let second = second.await.unwrap();

    assert_eq!(second, RefreshOutcome::Applied);
    assert_eq!(first, RefreshOutcome::Superseded);
    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].player, "fresh");
}

#[tokio::test(start_paused = true)]
async fn stale_fast_finisher_never_overwrites_newer_request() {
    let feed = Arc::new(ScriptedFeed::new());
    // Here the first request finishes *before* the second; its payload must
    // still be discarded because a newer request was started.
    feed.push_ok(Duration::from_millis(10), batch("stale"));
    feed.push_ok(Duration::from_millis(2000), batch("fresh"));

    let store = Arc::new(FeedStore::new(feed));

    let first = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });
    tokio::task::yield_now().await;
    let second = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });

    assert_eq!(first.await.unwrap(), RefreshOutcome::Superseded);
    assert_eq!(second.await.unwrap(), RefreshOutcome::Applied);
    assert_eq!(store.records()[0].player, "fresh");
}

#[tokio::test(start_paused = true)]
async fn loading_stays_raised_for_at_least_the_floor() {
    let feed = Arc::new(ScriptedFeed::new());
    // Instantaneous round-trip.
    feed.push_ok(Duration::ZERO, batch("a"));

    let store = Arc::new(FeedStore::new(feed));
    let started = tokio::time::Instant::now();

    let refresh = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });
    tokio::task::yield_now().await;
    assert!(store.is_loading());

    tokio::time::sleep(Duration::from_millis(599)).await;
    assert!(store.is_loading());

    tokio::time::sleep(Duration::from_millis(2)).await;
    refresh.await.unwrap();
    assert!(!store.is_loading());
    assert!(started.elapsed() >= MIN_LOADING);
}

#[tokio::test(start_paused = true)]
async fn loading_clears_only_after_a_slow_round_trip_completes() {
    let feed = Arc::new(ScriptedFeed::new());
    feed.push_ok(Duration::from_millis(900), batch("a"));

    let store = Arc::new(FeedStore::new(feed));
    let refresh = tokio::spawn({
        let store = store.clone();
        async move { store.refresh().await }
    });
    tokio::task::yield_now().await;

    // Past the floor but the round-trip is still outstanding.
    tokio::time::sleep(Duration::from_millis(700)).await;
    assert!(store.is_loading());

    tokio::time::sleep(Duration::from_millis(201)).await;
    refresh.await.unwrap();
    assert!(!store.is_loading());
}

#[tokio::test(start_paused = true)]
async fn failed_refresh_keeps_last_good_records() {
    let feed = Arc::new(ScriptedFeed::new());
    feed.push_ok(Duration::ZERO, batch("good"));
    feed.push_err(
        Duration::ZERO,
        FeedError::Network("connection refused".into()),
    );

    let store = FeedStore::new(feed);

    assert_eq!(store.refresh().await, RefreshOutcome::Applied);
    assert_eq!(store.refresh().await, RefreshOutcome::Failed);

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].player, "good");
    assert!(!store.is_loading());
}

#[tokio::test(start_paused = true)]
async fn successful_refresh_replaces_records_wholesale() {
    let feed = Arc::new(ScriptedFeed::new());
    feed.push_ok(Duration::ZERO, batch("first"));
    feed.push_ok(Duration::ZERO, batch("second"));

    let store = FeedStore::new(feed);

    store.refresh().await;
    store.refresh().await;

    let records = store.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].player, "second");
}

#[tokio::test(start_paused = true)]
async fn snapshot_exposes_records_and_loading_together() {
    let feed = Arc::new(ScriptedFeed::new());
    feed.push_ok(Duration::ZERO, batch("a"));

    let store = FeedStore::new(feed);
    let before = store.snapshot();
    assert!(before.records.is_empty());
    assert!(!before.is_loading);

    store.refresh().await;
    let after = store.snapshot();
    assert_eq!(after.records.len(), 1);
    assert!(!after.is_loading);
}

//! Subscription reconciler behavior: forgiving loads, serialized
//! last-writer-wins saves.

use std::sync::Arc;
use std::time::Duration;

use arbfeed::app::SubscriptionReconciler;
use arbfeed::domain::SubscriptionSet;
use arbfeed::error::SubscriptionError;
use arbfeed::testkit::InMemoryBackend;

#[tokio::test]
async fn load_failure_defaults_to_empty_set() {
    let backend = Arc::new(InMemoryBackend::new());
    backend.fail_next_load(SubscriptionError::Network("unreachable".into()));

    let reconciler = SubscriptionReconciler::new(backend);
    assert!(reconciler.load("u1").await.is_empty());
}

#[tokio::test]
async fn load_without_user_id_defaults_to_empty_set() {
    let backend = Arc::new(InMemoryBackend::new());
    let reconciler = SubscriptionReconciler::new(backend);
    assert!(reconciler.load("").await.is_empty());
}

#[tokio::test]
async fn save_without_user_id_is_a_distinguishable_error() {
    let backend = Arc::new(InMemoryBackend::new());
    let reconciler = SubscriptionReconciler::new(backend);

    let result = reconciler.save("", &SubscriptionSet::from_books(["FanDuel"])).await;
    assert!(matches!(result, Err(SubscriptionError::MissingUserId)));
}

#[tokio::test(start_paused = true)]
async fn saves_are_serialized_and_the_second_wins() {
    let backend = Arc::new(InMemoryBackend::new());
    backend.set_save_delay(Duration::from_millis(100));

    let reconciler = Arc::new(SubscriptionReconciler::new(backend.clone()));
    let first_set = SubscriptionSet::from_books(["DraftKings"]);
    let second_set = SubscriptionSet::from_books(["FanDuel", "Caesars"]);

    let first = tokio::spawn({
        let reconciler = reconciler.clone();
        let set = first_set.clone();
        async move { reconciler.save("u1", &set).await }
    });
    tokio::task::yield_now().await;
    let second = tokio::spawn({
        let reconciler = reconciler.clone();
        let set = second_set.clone();
        async move { reconciler.save("u1", &set).await }
    });

    first.await.unwrap().unwrap();
    second.await.unwrap().unwrap();

    // Never two writes in flight at once, and the later call's payload is
    // the backend's final truth.
    assert_eq!(backend.max_in_flight_saves(), 1);
    assert_eq!(backend.save_order(), vec![first_set, second_set.clone()]);
    assert_eq!(backend.stored("u1"), Some(second_set));
}

#[tokio::test]
async fn save_then_load_round_trips_the_set() {
    let backend = Arc::new(InMemoryBackend::new());
    let reconciler = SubscriptionReconciler::new(backend);

    let set = SubscriptionSet::from_books(["Best Odds Book", "FanDuel", "Bet365"]);
    reconciler.save("u1", &set).await.unwrap();

    // Set equality, not sequence equality.
    assert_eq!(reconciler.load("u1").await, set);
}

#[tokio::test]
async fn failed_save_leaves_backend_unchanged_and_is_retryable() {
    let backend = Arc::new(InMemoryBackend::new());
    let seeded = SubscriptionSet::from_books(["DraftKings"]);
    backend.seed("u1", seeded.clone());
    backend.fail_next_save(SubscriptionError::Rejected { status: 503 });

    let reconciler = SubscriptionReconciler::new(backend.clone());
    let desired = SubscriptionSet::from_books(["FanDuel"]);

    let result = reconciler.save("u1", &desired).await;
    assert!(matches!(
        result,
        Err(SubscriptionError::Rejected { status: 503 })
    ));
    assert_eq!(backend.stored("u1"), Some(seeded));

    // Explicit user-initiated retry succeeds; nothing retried implicitly.
    reconciler.save("u1", &desired).await.unwrap();
    assert_eq!(backend.stored("u1"), Some(desired));
}

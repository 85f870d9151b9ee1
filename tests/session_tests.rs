//! Session coordinator: event ordering between the identity and push-token
//! providers.

use std::sync::Arc;

use arbfeed::app::{
    AuthEvent, SessionCoordinator, SessionEvent, TokenEvent, TokenLifecycleManager,
    KEY_PUSH_TOKEN, KEY_USER_ID,
};
use arbfeed::port::KeyValueStore;
use arbfeed::store::MemoryStore;
use arbfeed::testkit::CountingRegistrar;

fn coordinator(
    registrar: &Arc<CountingRegistrar>,
    store: &Arc<MemoryStore>,
) -> SessionCoordinator {
    let tokens =
        Arc::new(TokenLifecycleManager::new(registrar.clone(), store.clone()).unwrap());
    SessionCoordinator::new(store.clone(), tokens).unwrap()
}

fn signed_in(user_id: &str) -> SessionEvent {
    SessionEvent::Auth(AuthEvent {
        signed_in: true,
        user_id: Some(user_id.to_string()),
    })
}

fn signed_out() -> SessionEvent {
    SessionEvent::Auth(AuthEvent {
        signed_in: false,
        user_id: None,
    })
}

fn token(token: &str) -> SessionEvent {
    SessionEvent::Token(TokenEvent {
        token: token.to_string(),
    })
}

#[tokio::test]
async fn token_before_sign_in_registers_on_sign_in() {
    let registrar = Arc::new(CountingRegistrar::new());
    let store = Arc::new(MemoryStore::new());
    let session = coordinator(&registrar, &store);

    session.handle(token("tok-1")).await;
    assert_eq!(registrar.call_count(), 0);

    session.handle(signed_in("u1")).await;
    assert_eq!(registrar.calls(), vec![("u1".to_string(), "tok-1".to_string())]);
}

#[tokio::test]
async fn sign_in_before_token_registers_on_token_arrival() {
    let registrar = Arc::new(CountingRegistrar::new());
    let store = Arc::new(MemoryStore::new());
    let session = coordinator(&registrar, &store);

    session.handle(signed_in("u1")).await;
    assert_eq!(registrar.call_count(), 0);

    session.handle(token("tok-1")).await;
    assert_eq!(registrar.call_count(), 1);
}

#[tokio::test]
async fn duplicate_events_do_not_re_register() {
    let registrar = Arc::new(CountingRegistrar::new());
    let store = Arc::new(MemoryStore::new());
    let session = coordinator(&registrar, &store);

    session.handle(token("tok-1")).await;
    session.handle(signed_in("u1")).await;
    session.handle(signed_in("u1")).await;
    session.handle(token("tok-1")).await;

    assert_eq!(registrar.call_count(), 1);
}

#[tokio::test]
async fn rotated_token_is_registered_for_the_current_user() {
    let registrar = Arc::new(CountingRegistrar::new());
    let store = Arc::new(MemoryStore::new());
    let session = coordinator(&registrar, &store);

    session.handle(signed_in("u1")).await;
    session.handle(token("tok-1")).await;
    session.handle(token("tok-2")).await;

    assert_eq!(
        registrar.calls(),
        vec![
            ("u1".to_string(), "tok-1".to_string()),
            ("u1".to_string(), "tok-2".to_string()),
        ]
    );
}

#[tokio::test]
async fn sign_out_clears_the_persisted_user_id() {
    let registrar = Arc::new(CountingRegistrar::new());
    let store = Arc::new(MemoryStore::new());
    let session = coordinator(&registrar, &store);

    session.handle(signed_in("u1")).await;
    assert_eq!(store.get(KEY_USER_ID).unwrap().as_deref(), Some("u1"));

    session.handle(signed_out()).await;
    assert_eq!(store.get(KEY_USER_ID).unwrap(), None);
    assert_eq!(session.user_id(), None);
}

#[tokio::test]
async fn resume_retries_registration_from_persisted_state() {
    let registrar = Arc::new(CountingRegistrar::new());
    let store = Arc::new(MemoryStore::seeded([
        (KEY_USER_ID, "u1"),
        (KEY_PUSH_TOKEN, "tok-1"),
    ]));

    // Simulates a restart after sign-in and token issuance but before a
    // successful registration.
    let session = coordinator(&registrar, &store);
    let context = session.context();
    assert_eq!(context.user_id.as_deref(), Some("u1"));
    assert_eq!(context.cached_token.as_deref(), Some("tok-1"));

    session.resume().await;
    assert_eq!(registrar.call_count(), 1);

    // A second resume is suppressed by the registration marker.
    session.resume().await;
    assert_eq!(registrar.call_count(), 1);
}

//! Outbound ports: traits the stateful services depend on.
//!
//! Production adapters live in [`crate::api`] (HTTP backend) and
//! [`crate::store`] (durable key-value storage); tests substitute doubles
//! from the testkit.

use async_trait::async_trait;

use crate::domain::{BetRecord, SubscriptionSet};
use crate::error::{FeedError, RegistrationError, StoreError, SubscriptionError};

/// Fetches the bet collection from the remote feed.
///
/// Implementations own no derived state; the feed store decides what to do
/// with each outcome.
#[async_trait]
pub trait FeedTransport: Send + Sync {
    /// Fetch and decode the complete current bet collection.
    async fn fetch_bets(&self) -> Result<Vec<BetRecord>, FeedError>;
}

/// Reads and replaces the per-user notification subscription set.
#[async_trait]
pub trait SubscriptionBackend: Send + Sync {
    async fn fetch_subscriptions(&self, user_id: &str)
        -> Result<SubscriptionSet, SubscriptionError>;

    /// Whole-set replace; the backend merges nothing.
    async fn replace_subscriptions(
        &self,
        user_id: &str,
        books: &SubscriptionSet,
    ) -> Result<(), SubscriptionError>;
}

/// Registers a device push token for a user with the backend.
#[async_trait]
pub trait TokenRegistrar: Send + Sync {
    async fn register_token(&self, user_id: &str, token: &str) -> Result<(), RegistrationError>;
}

/// Durable local key-value storage for the handful of session values (cached
/// push token, cached user id, last registered pair).
///
/// Single-writer from this core's perspective; no other process touches the
/// same keys.
pub trait KeyValueStore: Send + Sync {
    fn get(&self, key: &str) -> Result<Option<String>, StoreError>;
    fn put(&self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&self, key: &str) -> Result<(), StoreError>;
}

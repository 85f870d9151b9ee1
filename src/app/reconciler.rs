//! Subscription reconciliation against the backend.

use std::sync::Arc;

use tokio::sync::Mutex;
use tracing::{info, warn};

use crate::domain::SubscriptionSet;
use crate::error::SubscriptionError;
use crate::port::SubscriptionBackend;

/// Reconciles the user's notification subscriptions with the backend.
///
/// Reads are forgiving: the subscription UI must always be usable, so any
/// load failure yields the empty set. Writes replace the whole set
/// (last-writer-wins across sessions) and are serialized within a session so
/// two in-flight writes never race on the backend. Failed saves are surfaced
/// and retried only on explicit user action.
pub struct SubscriptionReconciler {
    backend: Arc<dyn SubscriptionBackend>,
    save_slot: Mutex<()>,
}

impl SubscriptionReconciler {
    pub fn new(backend: Arc<dyn SubscriptionBackend>) -> Self {
        Self {
            backend,
            save_slot: Mutex::new(()),
        }
    }

    /// Load the subscription set for `user_id`, defaulting to empty on any
    /// failure.
    pub async fn load(&self, user_id: &str) -> SubscriptionSet {
        if user_id.is_empty() {
            warn!("subscription load without a user id, defaulting to empty");
            return SubscriptionSet::new();
        }
        match self.backend.fetch_subscriptions(user_id).await {
            Ok(set) => set,
            Err(error) => {
                warn!(uid = %user_id, error = %error, "subscription load failed, defaulting to empty");
                SubscriptionSet::new()
            }
        }
    }

    /// Replace the backend's stored set for `user_id` with `books`.
    ///
    /// A second save does not start until the previous one's outcome is
    /// known. No implicit retries.
    pub async fn save(
        &self,
        user_id: &str,
        books: &SubscriptionSet,
    ) -> Result<(), SubscriptionError> {
        let _slot = self.save_slot.lock().await;
        if user_id.is_empty() {
            return Err(SubscriptionError::MissingUserId);
        }
        self.backend.replace_subscriptions(user_id, books).await?;
        info!(uid = %user_id, count = books.len(), "subscriptions saved");
        Ok(())
    }
}

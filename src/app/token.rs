//! Push-token lifecycle: cache, persist, register.

use std::sync::Arc;

use parking_lot::Mutex as StateMutex;
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, info, warn};

use super::session::{KEY_PUSH_TOKEN, KEY_REGISTERED_PAIR};
use crate::error::StoreError;
use crate::port::{KeyValueStore, TokenRegistrar};

/// Where the device token sits in its lifecycle for this process.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenState {
    /// No token has been seen yet.
    Unknown,
    /// A token is cached locally but not registered for the current user.
    Cached,
    /// The cached token has been registered for the current user.
    Registered,
    /// A new token value superseded the one last registered.
    Stale,
}

/// The `(user, token)` pair last registered with the backend, persisted so a
/// restart does not repeat the call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
struct RegisteredPair {
    uid: String,
    token: String,
}

struct TokenInner {
    token: Option<String>,
    registered: Option<RegisteredPair>,
    state: TokenState,
}

/// Owns the device push token.
///
/// The token is persisted before any registration attempt, so a restart after
/// a successful persist but failed registration can retry from the cache
/// instead of waiting for the provider to re-issue. Registration for a given
/// `(user, token)` pair happens at most once unless the token changes or a
/// prior attempt failed; failed attempts stay retryable.
pub struct TokenLifecycleManager {
    registrar: Arc<dyn TokenRegistrar>,
    store: Arc<dyn KeyValueStore>,
    inner: StateMutex<TokenInner>,
    register_slot: Mutex<()>,
}

impl TokenLifecycleManager {
    /// Build the manager, loading any cached token and registration marker
    /// left by a previous run.
    pub fn new(
        registrar: Arc<dyn TokenRegistrar>,
        store: Arc<dyn KeyValueStore>,
    ) -> Result<Self, StoreError> {
        let token = store.get(KEY_PUSH_TOKEN)?;
        let registered = store
            .get(KEY_REGISTERED_PAIR)?
            .and_then(|raw| serde_json::from_str(&raw).ok());
        let state = if token.is_some() {
            TokenState::Cached
        } else {
            TokenState::Unknown
        };
        Ok(Self {
            registrar,
            store,
            inner: StateMutex::new(TokenInner {
                token,
                registered,
                state,
            }),
            register_slot: Mutex::new(()),
        })
    }

    pub fn state(&self) -> TokenState {
        self.inner.lock().state
    }

    pub fn token(&self) -> Option<String> {
        self.inner.lock().token.clone()
    }

    /// Accept a (possibly rotated) token from the push provider.
    ///
    /// Persists before returning; registration is a separate step.
    pub fn on_token_issued(&self, token: &str) -> Result<(), StoreError> {
        let mut inner = self.inner.lock();
        if inner.token.as_deref() == Some(token) {
            debug!("token re-issued unchanged");
            return Ok(());
        }
        self.store.put(KEY_PUSH_TOKEN, token)?;
        let superseded = inner.token.is_some();
        inner.token = Some(token.to_string());
        inner.state = if superseded {
            TokenState::Stale
        } else {
            TokenState::Cached
        };
        info!(superseded, "push token cached");
        Ok(())
    }

    /// Register the cached token for `user_id` unless that exact pair has
    /// already been registered.
    ///
    /// A missing user id or token defers the registration; it is retried the
    /// next time this is called with both available. Backend failures are
    /// logged and leave the pair unregistered so a later call retries.
    pub async fn register_if_needed(&self, user_id: &str) {
        let _slot = self.register_slot.lock().await;

        let token = {
            let inner = self.inner.lock();
            if user_id.is_empty() {
                debug!("registration deferred: no user id yet");
                return;
            }
            let Some(token) = inner.token.clone() else {
                debug!(uid = %user_id, "registration deferred: no token yet");
                return;
            };
            let already = inner
                .registered
                .as_ref()
                .is_some_and(|pair| pair.uid == user_id && pair.token == token);
            if already {
                debug!(uid = %user_id, "token already registered for this user");
                return;
            }
            token
        };

        match self.registrar.register_token(user_id, &token).await {
            Ok(()) => {
                let pair = RegisteredPair {
                    uid: user_id.to_string(),
                    token: token.clone(),
                };
                if let Ok(raw) = serde_json::to_string(&pair) {
                    if let Err(error) = self.store.put(KEY_REGISTERED_PAIR, &raw) {
                        warn!(error = %error, "failed to persist registration marker");
                    }
                }
                let mut inner = self.inner.lock();
                // The token may have rotated while the call was in flight.
                if inner.token.as_deref() == Some(token.as_str()) {
                    inner.state = TokenState::Registered;
                }
                inner.registered = Some(pair);
                info!(uid = %user_id, "push token registered");
            }
            Err(error) => {
                warn!(uid = %user_id, error = %error, "token registration failed, will retry");
            }
        }
    }
}

//! Session coordination: identity and token events in, deterministic service
//! updates out.
//!
//! Identity and push-token providers are callback-shaped in the wild. Here
//! they are modeled as two event streams consumed by a single coordinating
//! task, so all mutation of session state happens in one place and in event
//! order. Durable values are loaded and persisted only through this module's
//! keys.

use std::sync::Arc;

use parking_lot::RwLock;
use tokio::sync::mpsc;
use tracing::{debug, info, warn};

use super::token::TokenLifecycleManager;
use crate::error::StoreError;
use crate::port::KeyValueStore;

/// Durable store key for the cached push token.
pub const KEY_PUSH_TOKEN: &str = "fcm_token";
/// Durable store key for the cached authenticated user id.
pub const KEY_USER_ID: &str = "user_id";
/// Durable store key for the last registered `(user, token)` pair.
pub const KEY_REGISTERED_PAIR: &str = "registered_token";

/// Identity and device state threaded explicitly through the services instead
/// of read ambiently at call sites.
#[derive(Debug, Clone, Default)]
pub struct SessionContext {
    pub user_id: Option<String>,
    pub cached_token: Option<String>,
}

impl SessionContext {
    /// Load the persisted context left by a previous run.
    pub fn load(store: &dyn KeyValueStore) -> Result<Self, StoreError> {
        Ok(Self {
            user_id: store.get(KEY_USER_ID)?,
            cached_token: store.get(KEY_PUSH_TOKEN)?,
        })
    }
}

/// Sign-in or sign-out notification from the identity provider.
#[derive(Debug, Clone)]
pub struct AuthEvent {
    pub signed_in: bool,
    pub user_id: Option<String>,
}

/// A (re)issued device registration token from the push provider.
#[derive(Debug, Clone)]
pub struct TokenEvent {
    pub token: String,
}

#[derive(Debug, Clone)]
pub enum SessionEvent {
    Auth(AuthEvent),
    Token(TokenEvent),
}

/// Consumes session events and drives the token lifecycle manager.
///
/// Handling is strictly sequential: whichever of sign-in and token issuance
/// arrives second triggers the deferred registration, so ordering between the
/// two providers never matters.
pub struct SessionCoordinator {
    store: Arc<dyn KeyValueStore>,
    tokens: Arc<TokenLifecycleManager>,
    context: RwLock<SessionContext>,
}

impl SessionCoordinator {
    pub fn new(
        store: Arc<dyn KeyValueStore>,
        tokens: Arc<TokenLifecycleManager>,
    ) -> Result<Self, StoreError> {
        let context = SessionContext::load(store.as_ref())?;
        Ok(Self {
            store,
            tokens,
            context: RwLock::new(context),
        })
    }

    pub fn context(&self) -> SessionContext {
        self.context.read().clone()
    }

    pub fn user_id(&self) -> Option<String> {
        self.context.read().user_id.clone()
    }

    /// Retry any registration deferred from a previous run. Called once at
    /// startup after the context is loaded.
    pub async fn resume(&self) {
        if let Some(user_id) = self.user_id() {
            self.tokens.register_if_needed(&user_id).await;
        }
    }

    pub async fn handle(&self, event: SessionEvent) {
        match event {
            SessionEvent::Auth(auth) => self.on_auth(auth).await,
            SessionEvent::Token(token) => self.on_token(token).await,
        }
    }

    /// Run until the event channel closes.
    pub async fn run(&self, mut events: mpsc::Receiver<SessionEvent>) {
        while let Some(event) = events.recv().await {
            self.handle(event).await;
        }
        debug!("session event channel closed");
    }

    async fn on_auth(&self, event: AuthEvent) {
        match (event.signed_in, event.user_id) {
            (true, Some(user_id)) if !user_id.is_empty() => {
                if let Err(error) = self.store.put(KEY_USER_ID, &user_id) {
                    warn!(error = %error, "failed to persist user id");
                }
                self.context.write().user_id = Some(user_id.clone());
                info!(uid = %user_id, "signed in");
                self.tokens.register_if_needed(&user_id).await;
            }
            _ => {
                self.context.write().user_id = None;
                if let Err(error) = self.store.remove(KEY_USER_ID) {
                    warn!(error = %error, "failed to clear persisted user id");
                }
                info!("signed out");
            }
        }
    }

    async fn on_token(&self, event: TokenEvent) {
        if let Err(error) = self.tokens.on_token_issued(&event.token) {
            warn!(error = %error, "failed to cache issued token");
            return;
        }
        self.context.write().cached_token = Some(event.token);
        if let Some(user_id) = self.user_id() {
            self.tokens.register_if_needed(&user_id).await;
        }
    }
}

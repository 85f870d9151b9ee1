//! Stateful services: feed synchronization, subscription reconciliation, and
//! the push-token lifecycle, coordinated by a single session task.

mod feed_store;
mod reconciler;
mod session;
mod token;

pub use feed_store::{FeedSnapshot, FeedStore, RefreshOutcome, MIN_LOADING};
pub use reconciler::SubscriptionReconciler;
pub use session::{
    AuthEvent, SessionContext, SessionCoordinator, SessionEvent, TokenEvent, KEY_PUSH_TOKEN,
    KEY_REGISTERED_PAIR, KEY_USER_ID,
};
pub use token::{TokenLifecycleManager, TokenState};

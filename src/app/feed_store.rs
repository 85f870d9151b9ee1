//! The feed store: last-known-good bet collection plus a loading flag.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use parking_lot::RwLock;
use tracing::{debug, warn};

use crate::domain::BetRecord;
use crate::port::FeedTransport;

/// Floor for how long the loading flag stays raised per refresh, so a fast
/// round-trip does not flicker the indicator. A lower bound, not a timeout.
pub const MIN_LOADING: Duration = Duration::from_millis(600);

/// Observable state: the last-good records and whether a refresh is running.
#[derive(Debug, Clone, Default)]
pub struct FeedSnapshot {
    pub records: Vec<BetRecord>,
    pub is_loading: bool,
}

/// Outcome of a single `refresh` round-trip.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    /// Records were replaced wholesale with the fetched batch.
    Applied,
    /// The fetch failed; last-good records were kept.
    Failed,
    /// A newer refresh started while this one was in flight; its result was
    /// discarded without touching state. Not an error.
    Superseded,
}

/// Holds the bet collection and refreshes it with last-started, single-slot
/// semantics.
///
/// Every call to [`refresh`](Self::refresh) takes a fresh generation number;
/// only the call holding the latest generation may write records or clear the
/// loading flag. A stale response therefore never overwrites state belonging
/// to a more recent request, regardless of completion order. Nothing is
/// aborted at the transport level; superseded results are simply ignored.
pub struct FeedStore {
    transport: Arc<dyn FeedTransport>,
    state: RwLock<FeedSnapshot>,
    generation: AtomicU64,
    min_loading: Duration,
}

impl FeedStore {
    pub fn new(transport: Arc<dyn FeedTransport>) -> Self {
        Self::with_min_loading(transport, MIN_LOADING)
    }

    pub fn with_min_loading(transport: Arc<dyn FeedTransport>, min_loading: Duration) -> Self {
        Self {
            transport,
            state: RwLock::new(FeedSnapshot::default()),
            generation: AtomicU64::new(0),
            min_loading,
        }
    }

    pub fn snapshot(&self) -> FeedSnapshot {
        self.state.read().clone()
    }

    pub fn records(&self) -> Vec<BetRecord> {
        self.state.read().records.clone()
    }

    pub fn is_loading(&self) -> bool {
        self.state.read().is_loading
    }

    /// Refresh the cached collection from the remote feed.
    ///
    /// On success the records are replaced wholesale. On failure the last-good
    /// records are kept and the error goes to the diagnostic channel; the
    /// caller never sees it as a hard failure. The loading flag stays raised
    /// for at least the configured floor even when the round-trip is faster.
    pub async fn refresh(&self) -> RefreshOutcome {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.write().is_loading = true;

        let (result, ()) = tokio::join!(
            self.transport.fetch_bets(),
            tokio::time::sleep(self.min_loading),
        );

        let mut state = self.state.write();
        if self.generation.load(Ordering::SeqCst) != generation {
            debug!(generation, "stale refresh result discarded");
            return RefreshOutcome::Superseded;
        }

        state.is_loading = false;
        match result {
            Ok(records) => {
                debug!(generation, count = records.len(), "bet feed refreshed");
                state.records = records;
                RefreshOutcome::Applied
            }
            Err(error) => {
                warn!(generation, error = %error, "refresh failed, keeping last-good records");
                RefreshOutcome::Failed
            }
        }
    }
}

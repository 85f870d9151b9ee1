//! Scripted feed transport with controllable latency and failures.

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::BetRecord;
use crate::error::FeedError;
use crate::port::FeedTransport;

struct Scripted {
    delay: Duration,
    result: Result<Vec<BetRecord>, FeedError>,
}

/// Feed transport that replays scripted responses in call order, each after
/// its own delay. Combined with a paused tokio clock this makes out-of-order
/// completion deterministic.
#[derive(Default)]
pub struct ScriptedFeed {
    responses: Mutex<VecDeque<Scripted>>,
    calls: AtomicUsize,
}

impl ScriptedFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push_ok(&self, delay: Duration, bets: Vec<BetRecord>) {
        self.responses.lock().push_back(Scripted {
            delay,
            result: Ok(bets),
        });
    }

    pub fn push_err(&self, delay: Duration, error: FeedError) {
        self.responses.lock().push_back(Scripted {
            delay,
            result: Err(error),
        });
    }

    /// Number of fetches issued so far.
    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl FeedTransport for ScriptedFeed {
    async fn fetch_bets(&self) -> Result<Vec<BetRecord>, FeedError> {
        let next = self
            .responses
            .lock()
            .pop_front()
            .expect("ScriptedFeed: no scripted response left");
        self.calls.fetch_add(1, Ordering::SeqCst);
        tokio::time::sleep(next.delay).await;
        next.result
    }
}

//! In-memory subscription backend with failure injection and overlap
//! tracking.

use std::collections::{HashMap, VecDeque};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::domain::SubscriptionSet;
use crate::error::SubscriptionError;
use crate::port::SubscriptionBackend;

/// Subscription backend backed by a map, for reconciler tests.
///
/// Saves can be slowed down with [`set_save_delay`](Self::set_save_delay) and
/// failed with the scripted queues; `max_in_flight_saves` records whether two
/// writes ever overlapped.
#[derive(Default)]
pub struct InMemoryBackend {
    sets: Mutex<HashMap<String, SubscriptionSet>>,
    load_failures: Mutex<VecDeque<SubscriptionError>>,
    save_failures: Mutex<VecDeque<SubscriptionError>>,
    save_delay: Mutex<Duration>,
    in_flight_saves: AtomicUsize,
    max_in_flight_saves: AtomicUsize,
    save_order: Mutex<Vec<SubscriptionSet>>,
}

impl InMemoryBackend {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the stored set for a user.
    pub fn seed(&self, user_id: &str, set: SubscriptionSet) {
        self.sets.lock().insert(user_id.to_string(), set);
    }

    /// Queue an error for the next load.
    pub fn fail_next_load(&self, error: SubscriptionError) {
        self.load_failures.lock().push_back(error);
    }

    /// Queue an error for the next save.
    pub fn fail_next_save(&self, error: SubscriptionError) {
        self.save_failures.lock().push_back(error);
    }

    pub fn set_save_delay(&self, delay: Duration) {
        *self.save_delay.lock() = delay;
    }

    pub fn stored(&self, user_id: &str) -> Option<SubscriptionSet> {
        self.sets.lock().get(user_id).cloned()
    }

    /// Highest number of saves ever in flight at once.
    pub fn max_in_flight_saves(&self) -> usize {
        self.max_in_flight_saves.load(Ordering::SeqCst)
    }

    /// Payloads in the order the backend committed them.
    pub fn save_order(&self) -> Vec<SubscriptionSet> {
        self.save_order.lock().clone()
    }
}

#[async_trait]
impl SubscriptionBackend for InMemoryBackend {
    async fn fetch_subscriptions(
        &self,
        user_id: &str,
    ) -> Result<SubscriptionSet, SubscriptionError> {
        if let Some(error) = self.load_failures.lock().pop_front() {
            return Err(error);
        }
        Ok(self.sets.lock().get(user_id).cloned().unwrap_or_default())
    }

    async fn replace_subscriptions(
        &self,
        user_id: &str,
        books: &SubscriptionSet,
    ) -> Result<(), SubscriptionError> {
        let in_flight = self.in_flight_saves.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight_saves
            .fetch_max(in_flight, Ordering::SeqCst);

        let delay = *self.save_delay.lock();
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }

        let result = if let Some(error) = self.save_failures.lock().pop_front() {
            Err(error)
        } else {
            self.sets
                .lock()
                .insert(user_id.to_string(), books.clone());
            self.save_order.lock().push(books.clone());
            Ok(())
        };

        self.in_flight_saves.fetch_sub(1, Ordering::SeqCst);
        result
    }
}

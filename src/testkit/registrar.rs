//! Recording token registrar with failure injection.

use std::collections::VecDeque;

use async_trait::async_trait;
use parking_lot::Mutex;

use crate::error::RegistrationError;
use crate::port::TokenRegistrar;

/// Token registrar that records every call and can fail on demand.
#[derive(Default)]
pub struct CountingRegistrar {
    calls: Mutex<Vec<(String, String)>>,
    failures: Mutex<VecDeque<RegistrationError>>,
}

impl CountingRegistrar {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an error for the next registration attempt.
    pub fn fail_next(&self, error: RegistrationError) {
        self.failures.lock().push_back(error);
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().len()
    }

    /// `(user_id, token)` pairs in call order.
    pub fn calls(&self) -> Vec<(String, String)> {
        self.calls.lock().clone()
    }
}

#[async_trait]
impl TokenRegistrar for CountingRegistrar {
    async fn register_token(&self, user_id: &str, token: &str) -> Result<(), RegistrationError> {
        // Failed attempts still count as backend calls.
        self.calls
            .lock()
            .push((user_id.to_string(), token.to_string()));
        if let Some(error) = self.failures.lock().pop_front() {
            return Err(error);
        }
        Ok(())
    }
}

use async_trait::async_trait;
use reqwest::Client;
use tracing::{debug, info};

use super::types::{RegisterTokenRequest, SubscriptionsResponse, UpdateSubscriptionsRequest};
use crate::domain::{BetRecord, SubscriptionSet};
use crate::error::{FeedError, RegistrationError, SubscriptionError};
use crate::port::{FeedTransport, SubscriptionBackend, TokenRegistrar};

/// HTTP client for the feed backend.
///
/// Implements all three outbound ports against the same base URL. Timeouts
/// are left to the transport defaults; the core imposes none of its own.
pub struct ApiClient {
    client: Client,
    base_url: String,
}

impl ApiClient {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            client: Client::new(),
            base_url: base_url.into(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }
}

#[async_trait]
impl FeedTransport for ApiClient {
    async fn fetch_bets(&self) -> Result<Vec<BetRecord>, FeedError> {
        let url = self.url("/api/arb_bets");
        debug!(url = %url, "fetching bet feed");

        let response = self
            .client
            .get(&url)
            .send()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(FeedError::Status {
                status: status.as_u16(),
            });
        }

        let body = response
            .text()
            .await
            .map_err(|e| FeedError::Network(e.to_string()))?;

        // Whole-batch reject on any bad record: a partial list could
        // misrepresent arbitrage completeness.
        let bets: Vec<BetRecord> =
            serde_json::from_str(&body).map_err(|e| FeedError::Decode(e.to_string()))?;

        info!(count = bets.len(), "fetched bet feed");
        Ok(bets)
    }
}

#[async_trait]
impl SubscriptionBackend for ApiClient {
    async fn fetch_subscriptions(
        &self,
        user_id: &str,
    ) -> Result<SubscriptionSet, SubscriptionError> {
        let url = self.url("/api/get_subscriptions");
        debug!(url = %url, uid = %user_id, "fetching subscriptions");

        let response = self
            .client
            .get(&url)
            .query(&[("uid", user_id)])
            .send()
            .await
            .map_err(|e| SubscriptionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubscriptionError::Rejected {
                status: status.as_u16(),
            });
        }

        let decoded: SubscriptionsResponse = response
            .json()
            .await
            .map_err(|e| SubscriptionError::Decode(e.to_string()))?;

        Ok(decoded.into())
    }

    async fn replace_subscriptions(
        &self,
        user_id: &str,
        books: &SubscriptionSet,
    ) -> Result<(), SubscriptionError> {
        let url = self.url("/api/update_subscriptions");
        let payload = UpdateSubscriptionsRequest {
            uid: user_id.to_string(),
            books: books.to_vec(),
        };
        let body = serde_json::to_string(&payload).map_err(SubscriptionError::Encode)?;

        debug!(url = %url, uid = %user_id, count = books.len(), "replacing subscriptions");

        let response = self
            .client
            .post(&url)
            .header(reqwest::header::CONTENT_TYPE, "application/json")
            .body(body)
            .send()
            .await
            .map_err(|e| SubscriptionError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(SubscriptionError::Rejected {
                status: status.as_u16(),
            });
        }

        info!(uid = %user_id, count = books.len(), "subscriptions replaced");
        Ok(())
    }
}

#[async_trait]
impl TokenRegistrar for ApiClient {
    async fn register_token(&self, user_id: &str, token: &str) -> Result<(), RegistrationError> {
        let url = self.url("/api/register_token");
        let payload = RegisterTokenRequest {
            uid: user_id.to_string(),
            fcm_token: token.to_string(),
        };

        debug!(url = %url, uid = %user_id, "registering push token");

        let response = self
            .client
            .post(&url)
            .json(&payload)
            .send()
            .await
            .map_err(|e| RegistrationError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(RegistrationError::Rejected {
                status: status.as_u16(),
            });
        }

        info!(uid = %user_id, "push token registered");
        Ok(())
    }
}

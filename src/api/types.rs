//! Wire shapes for the subscription and token endpoints.

use serde::{Deserialize, Serialize};

use crate::domain::SubscriptionSet;

/// Response body of `GET /api/get_subscriptions`.
///
/// The backend is inconsistent between endpoints: reads arrive either as a
/// bare array of book names or as an object with a `"books"` key. Both are
/// accepted deliberately; the client cannot assume the backend will be fixed.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum SubscriptionsResponse {
    Books(Vec<String>),
    Keyed { books: Vec<String> },
}

impl From<SubscriptionsResponse> for SubscriptionSet {
    fn from(response: SubscriptionsResponse) -> Self {
        let books = match response {
            SubscriptionsResponse::Books(books) => books,
            SubscriptionsResponse::Keyed { books } => books,
        };
        books.into_iter().collect()
    }
}

/// Body of `POST /api/update_subscriptions`.
#[derive(Debug, Serialize)]
pub struct UpdateSubscriptionsRequest {
    pub uid: String,
    pub books: Vec<String>,
}

/// Body of `POST /api/register_token`.
#[derive(Debug, Serialize)]
pub struct RegisterTokenRequest {
    pub uid: String,
    pub fcm_token: String,
}

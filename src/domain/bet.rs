//! The arbitrage bet record as decoded from the feed.

use std::collections::HashMap;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer};
use uuid::Uuid;

use super::{catalog, timestamp};

/// Alternate pricing for the same opportunity at another sportsbook.
#[derive(Debug, Clone, Copy, PartialEq, Deserialize)]
pub struct BookQuote {
    pub odds: f64,
    pub arb_percent: f64,
}

/// A single arbitrage opportunity.
///
/// Immutable once decoded. `id` is assigned client-side per decoded instance
/// and is list-rendering identity only: the same logical opportunity gets a
/// fresh id on every refresh, so it is not a dedup key. Optional numeric
/// fields stay absent at this layer; zero-coercion is a display concern.
#[derive(Debug, Clone, Deserialize)]
pub struct BetRecord {
    #[serde(skip_deserializing, default = "Uuid::new_v4")]
    pub id: Uuid,
    pub player: String,
    pub prop: String,
    pub event: String,
    pub event_time: String,
    pub league: String,
    /// Odds from the reference exchange.
    #[serde(rename = "prophetx_odds")]
    pub reference_odds: Option<f64>,
    /// The primary book this record was computed against.
    pub book_name: String,
    pub book_odds: Option<f64>,
    pub arb_percent: Option<f64>,
    #[serde(deserialize_with = "timestamp::deserialize")]
    pub timestamp: DateTime<Utc>,
    pub first_volume: Option<f64>,
    pub last_volume: Option<f64>,
    pub open_arb_volume: Option<f64>,
    /// Per-book alternate pricing, keyed by book name. The feed may omit the
    /// field entirely or send an explicit null.
    #[serde(default, deserialize_with = "null_to_empty")]
    pub profitable_books: HashMap<String, BookQuote>,
}

fn null_to_empty<'de, D>(deserializer: D) -> Result<HashMap<String, BookQuote>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<HashMap<String, BookQuote>>::deserialize(deserializer)?;
    Ok(opt.unwrap_or_default())
}

impl BetRecord {
    /// Whether this record is visible through the given book lens: the
    /// wildcard, the primary book, or any book in `profitable_books`.
    pub fn offers_book(&self, book: &str) -> bool {
        book == catalog::ALL || self.book_name == book || self.profitable_books.contains_key(book)
    }

    /// Arb percent through the given book lens. The wildcard reads the
    /// primary `arb_percent`; a named book reads its `profitable_books`
    /// entry. Absent values read as zero.
    pub fn effective_arb(&self, book: &str) -> f64 {
        if book == catalog::ALL {
            self.arb_percent.unwrap_or(0.0)
        } else {
            self.profitable_books
                .get(book)
                .map(|quote| quote.arb_percent)
                .unwrap_or(0.0)
        }
    }

    /// Odds through the given book lens, if the lens carries any.
    pub fn effective_odds(&self, book: &str) -> Option<f64> {
        if book == catalog::ALL {
            self.book_odds
        } else {
            self.profitable_books.get(book).map(|quote| quote.odds)
        }
    }

    /// Book name to display for the given lens.
    pub fn display_book<'a>(&'a self, book: &'a str) -> &'a str {
        if book == catalog::ALL {
            &self.book_name
        } else {
            book
        }
    }
}

//! Builder for hand-assembled bet records in tests.

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use crate::domain::{BetRecord, BookQuote};

/// Builds a [`BetRecord`] without going through the feed decoder.
pub struct BetBuilder {
    record: BetRecord,
}

impl BetBuilder {
    pub fn new(player: &str) -> Self {
        Self {
            record: BetRecord {
                id: Uuid::new_v4(),
                player: player.to_string(),
                prop: "Points Over 20.5".into(),
                event: "Home @ Away".into(),
                event_time: "7:00 PM".into(),
                league: "NBA".into(),
                reference_odds: None,
                book_name: "DraftKings".into(),
                book_odds: None,
                arb_percent: None,
                timestamp: Utc.with_ymd_and_hms(2025, 3, 30, 16, 0, 0).unwrap(),
                first_volume: None,
                last_volume: None,
                open_arb_volume: None,
                profitable_books: Default::default(),
            },
        }
    }

    pub fn league(mut self, league: &str) -> Self {
        self.record.league = league.to_string();
        self
    }

    pub fn book(mut self, book: &str) -> Self {
        self.record.book_name = book.to_string();
        self
    }

    pub fn arb(mut self, arb_percent: f64) -> Self {
        self.record.arb_percent = Some(arb_percent);
        self
    }

    pub fn odds(mut self, odds: f64) -> Self {
        self.record.book_odds = Some(odds);
        self
    }

    pub fn timestamp(mut self, timestamp: DateTime<Utc>) -> Self {
        self.record.timestamp = timestamp;
        self
    }

    /// Add an alternate quote under `book` in `profitable_books`.
    pub fn quote(mut self, book: &str, odds: f64, arb_percent: f64) -> Self {
        self.record
            .profitable_books
            .insert(book.to_string(), BookQuote { odds, arb_percent });
        self
    }

    pub fn build(self) -> BetRecord {
        self.record
    }
}

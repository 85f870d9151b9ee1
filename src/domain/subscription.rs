//! The per-user notification subscription set.

use std::collections::BTreeSet;

/// The set of sportsbook names an authenticated user wants push notifications
/// for, possibly including the [`catalog::BEST_ODDS_BOOK`] sentinel.
///
/// Loaded once per session from the backend (empty on any failure), mutated
/// by toggles, and replaced wholesale on save; the client never diffs.
///
/// [`catalog::BEST_ODDS_BOOK`]: super::catalog::BEST_ODDS_BOOK
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubscriptionSet {
    books: BTreeSet<String>,
}

impl SubscriptionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_books<I, S>(books: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            books: books.into_iter().map(Into::into).collect(),
        }
    }

    pub fn insert(&mut self, book: impl Into<String>) -> bool {
        self.books.insert(book.into())
    }

    pub fn remove(&mut self, book: &str) -> bool {
        self.books.remove(book)
    }

    /// Flip a book's membership, returning whether it is now subscribed.
    pub fn toggle(&mut self, book: &str) -> bool {
        if self.books.remove(book) {
            false
        } else {
            self.books.insert(book.to_string());
            true
        }
    }

    pub fn contains(&self, book: &str) -> bool {
        self.books.contains(book)
    }

    pub fn is_empty(&self) -> bool {
        self.books.is_empty()
    }

    pub fn len(&self) -> usize {
        self.books.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.books.iter().map(String::as_str)
    }

    /// Book names in stable (sorted) order, for the wire payload.
    pub fn to_vec(&self) -> Vec<String> {
        self.books.iter().cloned().collect()
    }
}

impl FromIterator<String> for SubscriptionSet {
    fn from_iter<I: IntoIterator<Item = String>>(iter: I) -> Self {
        Self {
            books: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn toggle_flips_membership() {
        let mut set = SubscriptionSet::new();
        assert!(set.toggle("FanDuel"));
        assert!(set.contains("FanDuel"));
        assert!(!set.toggle("FanDuel"));
        assert!(set.is_empty());
    }

    #[test]
    fn equality_is_order_independent() {
        let a = SubscriptionSet::from_books(["B", "A"]);
        let b = SubscriptionSet::from_books(["A", "B"]);
        assert_eq!(a, b);
        assert_eq!(a.to_vec(), vec!["A".to_string(), "B".to_string()]);
    }

    #[test]
    fn duplicates_collapse() {
        let set = SubscriptionSet::from_books(["A", "A", "B"]);
        assert_eq!(set.len(), 2);
    }
}

//! User-selected filter and sort criteria.

use serde::Deserialize;

use super::catalog;

/// Ordering applied to the projected view.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    /// Highest effective arb percent first.
    #[default]
    ByArbDescending,
    /// Most recently uploaded first.
    ByTimestampDescending,
}

/// Filter and sort selection, passed by value into the projector on every
/// recomputation. Held and mutated only by the presentation layer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FilterCriteria {
    /// `"All"` or an exact league name.
    pub league: String,
    /// `"All"`, an exact primary book name, or a profitable-books key.
    pub book: String,
    pub sort_key: SortKey,
}

impl Default for FilterCriteria {
    fn default() -> Self {
        Self {
            league: catalog::ALL.into(),
            book: catalog::ALL.into(),
            sort_key: SortKey::default(),
        }
    }
}

impl FilterCriteria {
    pub fn new(league: impl Into<String>, book: impl Into<String>, sort_key: SortKey) -> Self {
        Self {
            league: league.into(),
            book: book.into(),
            sort_key,
        }
    }
}

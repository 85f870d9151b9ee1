//! Pure projection of the raw feed through filter and sort criteria.

use super::{catalog, BetRecord, FilterCriteria, SortKey};

/// Records at or below this edge (in percent units) are excluded from every
/// view. A business rule, not a display default.
pub const MIN_ARB_PERCENT: f64 = 1.0;

/// Project `records` through `criteria`: filter by league, book lens, and
/// minimum edge, then sort.
///
/// Pure and deterministic; safe to call on every selection change. Ties sort
/// stably in input order. Dataset sizes are small, so the whole view is
/// recomputed each time rather than diffed.
pub fn project(records: &[BetRecord], criteria: &FilterCriteria) -> Vec<BetRecord> {
    let mut view: Vec<BetRecord> = records
        .iter()
        .filter(|bet| {
            let league_ok = criteria.league == catalog::ALL || bet.league == criteria.league;
            league_ok
                && bet.offers_book(&criteria.book)
                && bet.effective_arb(&criteria.book) > MIN_ARB_PERCENT
        })
        .cloned()
        .collect();

    match criteria.sort_key {
        SortKey::ByTimestampDescending => {
            view.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }
        SortKey::ByArbDescending => {
            view.sort_by(|a, b| {
                b.effective_arb(&criteria.book)
                    .partial_cmp(&a.effective_arb(&criteria.book))
                    .unwrap_or(std::cmp::Ordering::Equal)
            });
        }
    }

    view
}

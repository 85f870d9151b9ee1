//! Canonical league and sportsbook names offered by the feed.

/// Wildcard selection for league and book filters.
pub const ALL: &str = "All";

/// Sentinel subscription entry meaning "notify me for whichever book has the
/// best odds" rather than a specific sportsbook.
pub const BEST_ODDS_BOOK: &str = "Best Odds Book";

pub const LEAGUES: [&str; 11] = [
    ALL, "NFL", "NBA", "MLB", "NHL", "NCAAF", "NCAAB", "Soccer", "Tennis", "Golf", "UFC",
];

pub const BOOKS: [&str; 17] = [
    ALL,
    "DraftKings",
    "Bet365",
    "BetMGM",
    "ESPN BET",
    "FanDuel",
    "Hard Rock",
    "BetRivers",
    "Caesars",
    "Fanatics",
    "Fliff",
    "PointsBet",
    "Pinnacle",
    "Circa",
    "BookMaker",
    "BetOnline",
    "Bet105",
];

/// Books selectable for notifications: every real book plus the best-odds
/// sentinel, without the "All" wildcard.
pub fn subscribable_books() -> Vec<&'static str> {
    std::iter::once(BEST_ODDS_BOOK)
        .chain(BOOKS.iter().copied().filter(|b| *b != ALL))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn subscribable_books_excludes_wildcard() {
        let books = subscribable_books();
        assert_eq!(books[0], BEST_ODDS_BOOK);
        assert!(!books.contains(&ALL));
        assert_eq!(books.len(), BOOKS.len());
    }
}

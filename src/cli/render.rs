//! Table rendering and display formatting for the watch view.
//!
//! Zero-coercion of absent numeric fields happens here, at display time,
//! never in the model.

use tabled::{Table, Tabled};

use crate::domain::{BetRecord, FilterCriteria};

#[derive(Tabled)]
struct BetRow {
    #[tabled(rename = "Player")]
    player: String,
    #[tabled(rename = "Prop")]
    prop: String,
    #[tabled(rename = "Event")]
    event: String,
    #[tabled(rename = "League")]
    league: String,
    #[tabled(rename = "Book")]
    book: String,
    #[tabled(rename = "Odds")]
    odds: String,
    #[tabled(rename = "Arb %")]
    arb: String,
    #[tabled(rename = "Updated")]
    updated: String,
}

/// American-odds display: explicit sign for positive lines.
fn format_odds(odds: Option<f64>) -> String {
    match odds {
        Some(odds) if odds > 0.0 => format!("+{}", odds as i64),
        Some(odds) => format!("{}", odds as i64),
        None => "—".into(),
    }
}

fn format_arb(arb: f64) -> String {
    format!("{arb:.2}%")
}

pub fn feed_table(view: &[BetRecord], criteria: &FilterCriteria) {
    if view.is_empty() {
        println!("no arbitrage bets found");
        return;
    }

    let rows: Vec<BetRow> = view
        .iter()
        .map(|bet| BetRow {
            player: bet.player.clone(),
            prop: bet.prop.clone(),
            event: bet.event.clone(),
            league: bet.league.clone(),
            book: bet.display_book(&criteria.book).to_string(),
            odds: format_odds(bet.effective_odds(&criteria.book)),
            arb: format_arb(bet.effective_arb(&criteria.book)),
            updated: bet.timestamp.format("%Y-%m-%d %H:%M UTC").to_string(),
        })
        .collect();

    println!("{}", Table::new(rows));
}

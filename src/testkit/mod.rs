//! Test doubles and builders for the outbound ports.
//!
//! Enabled with the `testkit` feature; the crate's own integration tests pull
//! it in through a dev-dependency on itself.

mod backend;
mod bets;
mod feed;
mod registrar;

pub use backend::InMemoryBackend;
pub use bets::BetBuilder;
pub use feed::ScriptedFeed;
pub use registrar::CountingRegistrar;

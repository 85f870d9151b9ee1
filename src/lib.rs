//! Arbfeed - client for a sports arbitrage bet feed.
//!
//! Maintains a locally cached, continuously refreshed view of arbitrage
//! betting opportunities pulled from a remote feed, projects that view
//! through user-selected filter and sort criteria, and reconciles per-book
//! push-notification subscriptions (and the device push token) with the
//! backend.
//!
//! # Modules
//!
//! - [`config`] - TOML configuration and logging setup
//! - [`domain`] - `BetRecord` model, filter criteria, and the pure projector
//! - [`port`] - outbound traits for the backend and durable storage
//! - [`api`] - `reqwest` adapter for the feed backend
//! - [`store`] - durable key-value session store
//! - [`app`] - stateful services: feed store, subscription reconciler,
//!   token lifecycle manager, session coordinator
//! - [`error`] - error types for the crate
//!
//! # Ordering guarantees
//!
//! The feed store applies last-started, single-slot semantics to overlapping
//! refreshes; subscription saves are serialized within a session and
//! last-writer-wins across sessions; push-token registration happens at most
//! once per `(user, token)` pair until the token rotates or a prior attempt
//! failed.

pub mod api;
pub mod app;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod port;
pub mod store;

#[cfg(feature = "testkit")]
pub mod testkit;

pub use error::{Error, Result};

//! HTTP adapter for the remote feed service.

mod client;
pub mod types;

pub use client::ApiClient;

//! JSON API client for fetching procedure statistics.

pub mod client;
pub mod types;

pub use client::VoltClient;
pub use types::{ApiResponse, StatsTable};

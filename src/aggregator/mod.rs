//! Aggregation of procedure statistics into ranked chart series.
//!
//! This module transforms raw statistics batches into:
//! - Latency, frequency and combined-weight series (one shared order)
//! - A by-name cache of the latest derived metrics
//! - The display state for a poll

pub mod cache;
pub mod combined;
pub mod display;

// Re-export main types and functions
pub use cache::{CombinedMetric, ProcedureValueCache};
pub use combined::{rank_by_latency, scaled_load, ProcedureProfileAggregator};
pub use display::select_display_state;

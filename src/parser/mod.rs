//! Statistics parsing and schema definitions.
//!
//! This module handles:
//! - Decoding `@Statistics` result tables
//! - Reading saved snapshot files
//! - Defining the report schema

pub mod schema;
pub mod stats;

// Re-export main types
pub use schema::{
    AnalysisReport, DisplayState, ProcedureLatency, ProcedureStat, RankedSeries, SeriesPoint,
};
pub use stats::{parse_procedure_details, parse_procedure_profile, parse_snapshot, SnapshotData};

//! Procedure Profile Studio
//!
//! Stored-procedure profile analysis for VoltDB monitoring endpoints.
//! Polls `@Statistics`, ranks procedures by latency, invocation
//! frequency and combined load, and renders the rankings as charts.
//!
//! This crate provides the core implementation for the `procprof` CLI.
//!
//! ## Getting Started
//!
//! ```bash
//! procprof analyze --endpoint http://localhost:8080 --summary
//! procprof watch --interval 10 --svg-dir charts/
//! ```

pub mod aggregator;
pub mod chart;
pub mod commands;
pub mod output;
pub mod parser;
pub mod rpc;
pub mod source;
pub mod utils;

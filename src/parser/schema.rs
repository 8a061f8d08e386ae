//! Statistics records and the report JSON schema.
//!
//! Input records are what a statistics source yields for one poll.
//! The report is what we write to disk; it is versioned to allow
//! future evolution.

use serde::{Deserialize, Serialize};

/// Execution statistics for one stored procedure in one batch
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureStat {
    /// Procedure name, unique within a batch
    #[serde(rename = "PROCEDURE")]
    pub procedure_name: String,

    /// Average execution time in nanoseconds
    #[serde(rename = "AVG")]
    pub average_execution_time_nanos: f64,

    /// Number of invocations since the statistics were last reset
    #[serde(rename = "INVOCATIONS")]
    pub invocation_count: u64,
}

impl ProcedureStat {
    pub fn new(name: impl Into<String>, avg_nanos: f64, invocations: u64) -> Self {
        Self {
            procedure_name: name.into(),
            average_execution_time_nanos: avg_nanos,
            invocation_count: invocations,
        }
    }

    /// Unscaled `avg * invocations`, the ranking key
    pub fn raw_load(&self) -> f64 {
        self.average_execution_time_nanos * self.invocation_count as f64
    }
}

/// Average latency of one procedure, from the per-partition statistics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProcedureLatency {
    #[serde(rename = "PROCEDURE")]
    pub procedure_name: String,

    /// Average latency in milliseconds
    #[serde(rename = "AVG_LATENCY")]
    pub avg_latency_ms: f64,
}

/// One labelled value of a chart series
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SeriesPoint {
    pub label: String,
    pub value: f64,
}

impl SeriesPoint {
    pub fn new(label: impl Into<String>, value: f64) -> Self {
        Self {
            label: label.into(),
            value,
        }
    }
}

/// The three chart series of one batch, all in the same procedure order
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RankedSeries {
    pub latency: Vec<SeriesPoint>,
    pub frequency: Vec<SeriesPoint>,
    pub combined: Vec<SeriesPoint>,
}

impl RankedSeries {
    pub fn len(&self) -> usize {
        self.latency.len()
    }

    pub fn is_empty(&self) -> bool {
        self.latency.is_empty()
    }
}

/// Which panel the dashboard should show after a poll
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DisplayState {
    /// Nothing fetched yet; prompt the user to run an analysis
    AnalyzeNowPrompt,

    /// Sources answered but had nothing to chart
    NoData,

    /// At least one source returned statistics
    DataAvailable,
}

impl DisplayState {
    pub fn describe(&self) -> &'static str {
        match self {
            DisplayState::AnalyzeNowPrompt => "no statistics loaded yet, run an analysis",
            DisplayState::NoData => "no procedure statistics available",
            DisplayState::DataAvailable => "procedure statistics available",
        }
    }
}

/// Top-level report written to JSON after each poll
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisReport {
    /// Schema version for compatibility checking
    pub version: String,

    /// Where the statistics came from (endpoint URL or snapshot path)
    pub source: String,

    pub display_state: DisplayState,

    /// Number of procedures in the profile batch
    pub procedure_count: usize,

    /// Sum of scaled loads; absent when there was nothing to aggregate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total_load: Option<f64>,

    /// Ranked chart series; absent when there was nothing to aggregate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub series: Option<RankedSeries>,

    /// Latency-only ranking from the per-partition statistics
    #[serde(default)]
    pub procedure_latency: Vec<SeriesPoint>,

    /// Timestamp when the report was generated
    pub generated_at: String,
}

use crate::chart::ChartKind;
use crate::utils::config::{
    DEFAULT_ENDPOINT, DEFAULT_POLL_INTERVAL_SECS, DEFAULT_REQUEST_TIMEOUT, DEFAULT_TOP_N,
};
use std::path::PathBuf;
use std::time::Duration;

/// Arguments for the analyze command
///
/// **Public** - used by main.rs to construct from CLI args
#[derive(Debug, Clone)]
pub struct AnalyzeArgs {
    /// HTTP endpoint of the database
    pub endpoint: String,

    /// API user (optional)
    pub user: Option<String>,

    /// API password (optional, requires a user)
    pub password: Option<String>,

    /// Request timeout
    pub timeout: Duration,

    /// Read statistics from a snapshot file instead of the endpoint
    pub snapshot: Option<PathBuf>,

    /// Output path for the JSON report
    pub output_json: PathBuf,

    /// Directory for the three SVG charts (optional)
    pub svg_dir: Option<PathBuf>,

    /// Chart title prefix
    pub title: Option<String>,

    /// Chart printed with the summary; all three when `None`
    pub chart: Option<ChartKind>,

    /// Number of bars / rows per chart
    pub top: usize,

    /// Print text charts to stdout
    pub print_summary: bool,
}

impl Default for AnalyzeArgs {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            user: None,
            password: None,
            timeout: DEFAULT_REQUEST_TIMEOUT,
            snapshot: None,
            output_json: PathBuf::from("procedure-profile.json"),
            svg_dir: None,
            title: None,
            chart: None,
            top: DEFAULT_TOP_N,
            print_summary: false,
        }
    }
}

/// Arguments for the watch command
#[derive(Debug, Clone)]
pub struct WatchArgs {
    pub analyze: AnalyzeArgs,

    /// Time between polls
    pub interval: Duration,

    /// Stop after this many polls; run until interrupted when `None`
    pub iterations: Option<u64>,
}

impl Default for WatchArgs {
    fn default() -> Self {
        Self {
            analyze: AnalyzeArgs::default(),
            interval: Duration::from_secs(DEFAULT_POLL_INTERVAL_SECS),
            iterations: None,
        }
    }
}

//! CLI command implementations.
//!
//! Commands orchestrate the various library components to perform user tasks.

pub mod analyze;
pub mod models;
pub mod poll;
pub mod utils;

// Re-export main command functions
pub use analyze::{
    build_source, execute_analyze, execute_watch, validate_args, validate_watch_args,
};
pub use models::{AnalyzeArgs, WatchArgs};
pub use poll::run_poll;
pub use utils::{display_schema, display_version, validate_report_file};

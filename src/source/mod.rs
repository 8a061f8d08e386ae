//! Statistics sources.
//!
//! A source answers the two questions a poll asks: the cluster-wide
//! procedure profile and the per-procedure latency details. The HTTP
//! client and saved snapshot files both implement [`StatsSource`].

use crate::parser::schema::{ProcedureLatency, ProcedureStat};
use crate::parser::stats::{parse_procedure_details, parse_procedure_profile, parse_snapshot};
use crate::rpc::VoltClient;
use crate::utils::config::{DETAIL_SELECTOR, PROFILE_SELECTOR};
use crate::utils::error::SourceError;
use log::debug;
use std::path::PathBuf;

/// Supplier of raw procedure statistics
///
/// `Sync` so that both fetches of a poll can run on separate threads.
pub trait StatsSource: Sync {
    /// Per-procedure profile records for the current batch
    fn procedure_profile(&self) -> Result<Vec<ProcedureStat>, SourceError>;

    /// Flat per-procedure latency records
    fn procedures_info(&self) -> Result<Vec<ProcedureLatency>, SourceError>;

    /// Human-readable origin, recorded in reports
    fn describe(&self) -> String;
}

impl StatsSource for VoltClient {
    fn procedure_profile(&self) -> Result<Vec<ProcedureStat>, SourceError> {
        let table = self.statistics(PROFILE_SELECTOR)?;
        Ok(parse_procedure_profile(&table)?)
    }

    fn procedures_info(&self) -> Result<Vec<ProcedureLatency>, SourceError> {
        let table = self.statistics(DETAIL_SELECTOR)?;
        Ok(parse_procedure_details(&table)?)
    }

    fn describe(&self) -> String {
        self.api_url().to_string()
    }
}

/// Reads statistics from a saved JSON snapshot
///
/// The file is re-read on every call so a watcher picks up rewrites.
#[derive(Debug, Clone)]
pub struct SnapshotSource {
    path: PathBuf,
}

impl SnapshotSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    fn load(&self) -> Result<crate::parser::SnapshotData, SourceError> {
        debug!("Reading snapshot: {}", self.path.display());
        let raw = std::fs::read_to_string(&self.path)?;
        Ok(parse_snapshot(&raw)?)
    }
}

impl StatsSource for SnapshotSource {
    fn procedure_profile(&self) -> Result<Vec<ProcedureStat>, SourceError> {
        Ok(self.load()?.profile)
    }

    fn procedures_info(&self) -> Result<Vec<ProcedureLatency>, SourceError> {
        Ok(self.load()?.details)
    }

    fn describe(&self) -> String {
        format!("file://{}", self.path.display())
    }
}

//! By-name snapshot of the latest combined metrics.

use serde::Serialize;
use std::collections::HashMap;

/// Derived metrics for one procedure in one batch
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct CombinedMetric {
    /// Average execution time divided by the scale divisor
    pub normalized_avg: f64,
    pub invocation_count: u64,
    /// Share of the batch's total scaled load, in [0, 1]
    pub combined_weight: f64,
}

/// Latest [`CombinedMetric`] per procedure name.
///
/// Entries are overwritten when a procedure reappears and are never
/// expired; a procedure missing from later batches keeps its last value
/// until [`ProcedureValueCache::clear`].
#[derive(Debug, Clone, Default)]
pub struct ProcedureValueCache {
    entries: HashMap<String, CombinedMetric>,
}

impl ProcedureValueCache {
    pub fn insert(&mut self, name: impl Into<String>, metric: CombinedMetric) {
        self.entries.insert(name.into(), metric);
    }

    pub fn get(&self, name: &str) -> Option<&CombinedMetric> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn clear(&mut self) {
        self.entries.clear();
    }
}

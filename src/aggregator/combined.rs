//! Combined-weight aggregation and ranking of procedure statistics.
//!
//! Every procedure contributes a scaled load of `(avg / 1e8) * invocations`,
//! a proxy for total time spent in it. The combined weight is its share of
//! the batch total. All three series share one order: descending by the
//! unscaled `avg * invocations`.

use super::cache::{CombinedMetric, ProcedureValueCache};
use crate::parser::schema::{ProcedureLatency, ProcedureStat, RankedSeries, SeriesPoint};
use crate::utils::config::LATENCY_SCALE_DIVISOR;
use log::debug;

/// Turns raw batches into ranked chart series and keeps a by-name
/// snapshot of the latest derived metrics
#[derive(Debug, Default)]
pub struct ProcedureProfileAggregator {
    cache: ProcedureValueCache,
    last_total_load: Option<f64>,
}

impl ProcedureProfileAggregator {
    pub fn new() -> Self {
        Self::default()
    }

    /// Rank a batch and compute each procedure's combined weight
    ///
    /// **Public** - main entry point for aggregation
    ///
    /// # Returns
    /// `None` when the batch is empty or its total scaled load is zero;
    /// the cache is left untouched in that case. Otherwise the latency,
    /// frequency and combined series, all in the same order.
    pub fn compute_combined_weight(&mut self, batch: &[ProcedureStat]) -> Option<RankedSeries> {
        if batch.is_empty() {
            debug!("Empty batch, nothing to aggregate");
            self.last_total_load = None;
            return None;
        }

        let total_load: f64 = batch.iter().map(scaled_load).sum();
        if !(total_load.is_finite() && total_load > 0.0) {
            debug!(
                "Total load of {} procedures is {}, treating as no data",
                batch.len(),
                total_load
            );
            self.last_total_load = None;
            return None;
        }

        let mut ranked: Vec<&ProcedureStat> = batch.iter().collect();
        // stable, so equal keys keep input order
        ranked.sort_by(|a, b| b.raw_load().total_cmp(&a.raw_load()));

        let mut series = RankedSeries {
            latency: Vec::with_capacity(ranked.len()),
            frequency: Vec::with_capacity(ranked.len()),
            combined: Vec::with_capacity(ranked.len()),
        };

        for stat in ranked {
            let metric = CombinedMetric {
                normalized_avg: normalized_avg(stat),
                invocation_count: stat.invocation_count,
                combined_weight: scaled_load(stat) / total_load,
            };
            self.cache.insert(stat.procedure_name.as_str(), metric);

            let name = &stat.procedure_name;
            series.latency.push(SeriesPoint::new(name, metric.normalized_avg));
            series
                .frequency
                .push(SeriesPoint::new(name, metric.invocation_count as f64));
            series.combined.push(SeriesPoint::new(name, metric.combined_weight));
        }

        self.last_total_load = Some(total_load);
        debug!("{}", self.summary());

        Some(series)
    }

    /// Latest metrics by procedure name
    pub fn cache(&self) -> &ProcedureValueCache {
        &self.cache
    }

    /// Forget all cached metrics
    pub fn clear_cache(&mut self) {
        self.cache.clear();
    }

    /// Total scaled load of the last aggregated batch
    pub fn last_total_load(&self) -> Option<f64> {
        self.last_total_load
    }

    /// One-line summary for logging
    pub fn summary(&self) -> String {
        match self.last_total_load {
            Some(total) => format!(
                "Total load: {:.3} | Cached procedures: {}",
                total,
                self.cache.len()
            ),
            None => format!("No data | Cached procedures: {}", self.cache.len()),
        }
    }
}

/// `(avg / 1e8) * invocations`
pub fn scaled_load(stat: &ProcedureStat) -> f64 {
    normalized_avg(stat) * stat.invocation_count as f64
}

fn normalized_avg(stat: &ProcedureStat) -> f64 {
    stat.average_execution_time_nanos / LATENCY_SCALE_DIVISOR
}

/// Rank per-procedure latency details, slowest first
///
/// **Public** - the latency-only series of a poll
pub fn rank_by_latency(details: &[ProcedureLatency]) -> Vec<SeriesPoint> {
    let mut ranked: Vec<&ProcedureLatency> = details.iter().collect();
    ranked.sort_by(|a, b| b.avg_latency_ms.total_cmp(&a.avg_latency_ms));
    ranked
        .into_iter()
        .map(|d| SeriesPoint::new(&d.procedure_name, d.avg_latency_ms))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn labels(points: &[SeriesPoint]) -> Vec<&str> {
        points.iter().map(|p| p.label.as_str()).collect()
    }

    #[test]
    fn test_scaled_load() {
        let stat = ProcedureStat::new("P", 300_000_000.0, 4);
        assert_eq!(scaled_load(&stat), 12.0);
    }

    #[test]
    fn test_all_series_follow_raw_product_order() {
        // B has the highest latency but the lowest raw product
        let batch = vec![
            ProcedureStat::new("A", 100_000_000.0, 10),
            ProcedureStat::new("B", 900_000_000.0, 1),
            ProcedureStat::new("C", 50_000_000.0, 100),
        ];

        let mut agg = ProcedureProfileAggregator::new();
        let series = agg.compute_combined_weight(&batch).unwrap();

        assert_eq!(labels(&series.latency), vec!["C", "A", "B"]);
        assert_eq!(labels(&series.frequency), vec!["C", "A", "B"]);
        assert_eq!(labels(&series.combined), vec!["C", "A", "B"]);
    }

    #[test]
    fn test_zero_total_is_no_data() {
        let batch = vec![
            ProcedureStat::new("A", 0.0, 10),
            ProcedureStat::new("B", 500.0, 0),
        ];
        let mut agg = ProcedureProfileAggregator::new();
        assert!(agg.compute_combined_weight(&batch).is_none());
        assert!(agg.cache().is_empty());
        assert_eq!(agg.last_total_load(), None);
    }

    #[test]
    fn test_clear_cache() {
        let mut agg = ProcedureProfileAggregator::new();
        agg.compute_combined_weight(&[ProcedureStat::new("A", 1.0, 1)]);
        assert_eq!(agg.cache().len(), 1);
        agg.clear_cache();
        assert!(agg.cache().is_empty());
    }

    #[test]
    fn test_rank_by_latency() {
        let details = vec![
            ProcedureLatency { procedure_name: "fast".into(), avg_latency_ms: 0.2 },
            ProcedureLatency { procedure_name: "slow".into(), avg_latency_ms: 7.5 },
            ProcedureLatency { procedure_name: "mid".into(), avg_latency_ms: 1.0 },
        ];
        let ranked = rank_by_latency(&details);
        assert_eq!(labels(&ranked), vec!["slow", "mid", "fast"]);
        assert_eq!(ranked[0].value, 7.5);
    }

    #[test]
    fn test_summary_mentions_cache_size() {
        let mut agg = ProcedureProfileAggregator::new();
        assert!(agg.summary().starts_with("No data"));
        agg.compute_combined_weight(&[ProcedureStat::new("A", 100_000_000.0, 2)]);
        assert_eq!(agg.summary(), "Total load: 2.000 | Cached procedures: 1");
    }
}

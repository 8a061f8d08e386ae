//! One fetch-and-render pass.
//!
//! Both fetches are issued together on scoped threads and joined before
//! aggregation; neither waits on the other. A failed fetch is logged and
//! treated as absent, nothing is retried.

use crate::aggregator::{rank_by_latency, select_display_state, ProcedureProfileAggregator};
use crate::chart::{render_series, ChartRenderer};
use crate::parser::schema::{AnalysisReport, DisplayState, ProcedureStat, RankedSeries};
use crate::source::StatsSource;
use crate::utils::config::SCHEMA_VERSION;
use crate::utils::error::{ChartError, SourceError};
use log::{debug, info, warn};
use std::thread::{self, ScopedJoinHandle};

/// Fetch, aggregate and render once
///
/// **Public** - shared by the analyze and watch commands
///
/// Renderers are redrawn whenever something was fetched; without ranked
/// series they receive empty ones and show "No data". A pass where every
/// fetch failed leaves them untouched. The aggregator's cache carries over
/// between calls.
pub fn run_poll<S>(
    source: &S,
    aggregator: &mut ProcedureProfileAggregator,
    renderers: &mut [&mut dyn ChartRenderer],
) -> Result<AnalysisReport, ChartError>
where
    S: StatsSource + ?Sized,
{
    debug!("Polling {}", source.describe());

    let (profile, details) = thread::scope(|scope| {
        let profile = scope.spawn(|| source.procedure_profile());
        let details = scope.spawn(|| source.procedures_info());
        (settle(profile, "procedure profile"), settle(details, "procedure details"))
    });

    let series = profile
        .as_deref()
        .and_then(|batch| aggregator.compute_combined_weight(batch));

    // a batch with zero total load counts as an empty answer
    let effective_profile: Option<&[ProcedureStat]> = match (&profile, &series) {
        (Some(batch), Some(_)) => Some(batch.as_slice()),
        (Some(_), None) => Some(&[]),
        (None, _) => None,
    };
    let display_state = select_display_state(effective_profile, details.as_deref());
    info!("Display state: {}", display_state.describe());

    let procedure_latency = details.as_deref().map(rank_by_latency).unwrap_or_default();
    debug!("Latency-only ranking has {} procedures", procedure_latency.len());

    if display_state != DisplayState::AnalyzeNowPrompt {
        let empty = RankedSeries::default();
        let shown = series.as_ref().unwrap_or(&empty);
        for renderer in renderers.iter_mut() {
            render_series(&mut **renderer, shown)?;
        }
    }

    Ok(AnalysisReport {
        version: SCHEMA_VERSION.to_string(),
        source: source.describe(),
        display_state,
        procedure_count: profile.as_ref().map_or(0, Vec::len),
        total_load: aggregator.last_total_load().filter(|_| series.is_some()),
        series,
        procedure_latency,
        generated_at: chrono::Utc::now().to_rfc3339(),
    })
}

fn settle<T>(handle: ScopedJoinHandle<'_, Result<T, SourceError>>, what: &str) -> Option<T> {
    match handle.join() {
        Ok(Ok(value)) => Some(value),
        Ok(Err(e)) => {
            warn!("Failed to fetch {}: {}", what, e);
            None
        }
        Err(_) => {
            warn!("Fetch of {} panicked", what);
            None
        }
    }
}

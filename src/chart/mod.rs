//! Chart rendering for ranked procedure series.
//!
//! A [`ChartRenderer`] receives the three series of a poll and redraws its
//! visuals. Two renderers ship with the crate: SVG bar charts for files and
//! a coloured text table for the terminal.

pub mod svg;
pub mod text;

use crate::parser::schema::{RankedSeries, SeriesPoint};
use crate::utils::error::ChartError;
use serde::{Deserialize, Serialize};

pub use svg::{BarChartConfig, SvgChartRenderer};
pub use text::TextChartRenderer;

/// The three analysis charts
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ChartKind {
    Latency,
    Frequency,
    Combined,
}

impl ChartKind {
    pub const ALL: [ChartKind; 3] = [ChartKind::Latency, ChartKind::Frequency, ChartKind::Combined];

    /// Legend caption shown next to the chart
    pub fn legend(&self) -> &'static str {
        match self {
            ChartKind::Latency => "Execution Time",
            ChartKind::Frequency => "Frequency",
            ChartKind::Combined => "Combined",
        }
    }

    /// Map a tab label to a chart; unknown labels show execution time
    ///
    /// Labels match case-insensitively, so `--chart frequency` and the
    /// `Frequency` tab caption select the same chart.
    pub fn from_tab_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "frequency" => ChartKind::Frequency,
            "combined" => ChartKind::Combined,
            _ => ChartKind::Latency,
        }
    }

    /// File stem used when writing this chart
    pub fn file_stem(&self) -> &'static str {
        match self {
            ChartKind::Latency => "latency",
            ChartKind::Frequency => "frequency",
            ChartKind::Combined => "combined",
        }
    }

    /// Pick this chart's series out of a ranked set
    pub fn series<'a>(&self, ranked: &'a RankedSeries) -> &'a [SeriesPoint] {
        match self {
            ChartKind::Latency => &ranked.latency,
            ChartKind::Frequency => &ranked.frequency,
            ChartKind::Combined => &ranked.combined,
        }
    }
}

/// Receiver of ranked series
pub trait ChartRenderer {
    /// Prepare (or reset) the charts before a round of refreshes
    fn initialize(&mut self) -> Result<(), ChartError>;

    fn refresh_latency(&mut self, series: &[SeriesPoint]) -> Result<(), ChartError>;

    fn refresh_frequency(&mut self, series: &[SeriesPoint]) -> Result<(), ChartError>;

    fn refresh_combined(&mut self, series: &[SeriesPoint]) -> Result<(), ChartError>;
}

/// Initialize the renderer and push all three series to it
///
/// **Public** - one render pass of a poll
pub fn render_series<R: ChartRenderer + ?Sized>(
    renderer: &mut R,
    series: &RankedSeries,
) -> Result<(), ChartError> {
    renderer.initialize()?;
    renderer.refresh_latency(&series.latency)?;
    renderer.refresh_frequency(&series.frequency)?;
    renderer.refresh_combined(&series.combined)?;
    Ok(())
}

//! SVG bar charts, one document per series.
//!
//! Bars are drawn top to bottom in series order, so the ranking the
//! aggregator produced is what the reader sees.

use super::{ChartKind, ChartRenderer};
use crate::parser::schema::SeriesPoint;
use crate::utils::config::DEFAULT_TOP_N;
use crate::utils::error::ChartError;
use log::{debug, info};
use std::collections::HashMap;

const BAR_HEIGHT: usize = 22;
const BAR_GAP: usize = 4;
const HEADER_HEIGHT: usize = 40;
const LEGEND_HEIGHT: usize = 40;
const LABEL_WIDTH: usize = 260;
const VALUE_WIDTH: usize = 110;

/// Bar chart configuration
#[derive(Debug, Clone)]
pub struct BarChartConfig {
    pub title: String,
    pub width: usize,
    /// Maximum number of bars per chart
    pub max_bars: usize,
}

impl Default for BarChartConfig {
    fn default() -> Self {
        Self {
            title: "Procedure Profile".to_string(),
            width: 1000,
            max_bars: DEFAULT_TOP_N,
        }
    }
}

impl BarChartConfig {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    pub fn with_max_bars(mut self, max_bars: usize) -> Self {
        self.max_bars = max_bars;
        self
    }
}

/// Renders each refreshed series into an SVG document kept in memory
#[derive(Debug, Default)]
pub struct SvgChartRenderer {
    config: BarChartConfig,
    charts: Option<HashMap<ChartKind, String>>,
}

impl SvgChartRenderer {
    pub fn new(config: BarChartConfig) -> Self {
        Self {
            config,
            charts: None,
        }
    }

    /// Rendered SVG for a chart, if it has been refreshed
    pub fn chart(&self, kind: ChartKind) -> Option<&str> {
        self.charts.as_ref()?.get(&kind).map(String::as_str)
    }

    fn refresh(&mut self, kind: ChartKind, series: &[SeriesPoint]) -> Result<(), ChartError> {
        let svg = generate_bar_chart(kind, series, &self.config);
        let charts = self.charts.as_mut().ok_or(ChartError::NotInitialized)?;
        charts.insert(kind, svg);
        Ok(())
    }
}

impl ChartRenderer for SvgChartRenderer {
    fn initialize(&mut self) -> Result<(), ChartError> {
        self.charts = Some(HashMap::new());
        Ok(())
    }

    fn refresh_latency(&mut self, series: &[SeriesPoint]) -> Result<(), ChartError> {
        self.refresh(ChartKind::Latency, series)
    }

    fn refresh_frequency(&mut self, series: &[SeriesPoint]) -> Result<(), ChartError> {
        self.refresh(ChartKind::Frequency, series)
    }

    fn refresh_combined(&mut self, series: &[SeriesPoint]) -> Result<(), ChartError> {
        self.refresh(ChartKind::Combined, series)
    }
}

/// Generate one horizontal bar chart
///
/// **Public** - usable without a renderer
///
/// An empty series yields a chart with a "No data" caption.
pub fn generate_bar_chart(
    kind: ChartKind,
    series: &[SeriesPoint],
    config: &BarChartConfig,
) -> String {
    let shown = &series[..series.len().min(config.max_bars)];
    debug!("Rendering {} chart with {} of {} bars", kind.file_stem(), shown.len(), series.len());

    let width = config.width.max(LABEL_WIDTH + VALUE_WIDTH + 100);
    let plot_width = (width - LABEL_WIDTH - VALUE_WIDTH) as f64;
    let rows = shown.len().max(1);
    let total_height = HEADER_HEIGHT + rows * (BAR_HEIGHT + BAR_GAP) + LEGEND_HEIGHT;

    let mut svg = String::new();
    svg.push_str(&format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" width="{}" height="{}" viewBox="0 0 {} {}">"#,
        width, total_height, width, total_height
    ));
    svg.push_str(
        r#"<style>.bar:hover { stroke: black; stroke-width: 1; opacity: 0.9; } text { font-family: sans-serif; }</style>"#,
    );
    svg.push_str(&format!(
        r#"<text x="{}" y="24" font-size="16" text-anchor="middle" font-weight="bold">{} - {}</text>"#,
        width / 2,
        escape_xml(&config.title),
        kind.legend()
    ));

    if shown.is_empty() {
        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="14" text-anchor="middle" fill="gray">No data</text>"#,
            width / 2,
            HEADER_HEIGHT + BAR_HEIGHT / 2 + 5
        ));
    }

    let max_value = shown.iter().map(|p| p.value).fold(0.0_f64, f64::max);
    let color = bar_color(kind);

    for (i, point) in shown.iter().enumerate() {
        let y = HEADER_HEIGHT + i * (BAR_HEIGHT + BAR_GAP);
        let bar_width = if max_value > 0.0 {
            (point.value / max_value) * plot_width
        } else {
            0.0
        };
        let label = escape_xml(&truncate_label(&point.label, 36));

        svg.push_str(&format!(
            r#"<text x="{}" y="{}" font-size="12" text-anchor="end">{}</text>"#,
            LABEL_WIDTH - 8,
            y + 15,
            label
        ));
        svg.push_str(&format!(
            r#"<rect x="{}" y="{}" width="{:.2}" height="{}" fill="{}" class="bar"><title>{} ({})</title></rect>"#,
            LABEL_WIDTH,
            y,
            bar_width,
            BAR_HEIGHT,
            color,
            escape_xml(&point.label),
            format_value(kind, point.value)
        ));
        svg.push_str(&format!(
            r#"<text x="{:.2}" y="{}" font-size="12">{}</text>"#,
            LABEL_WIDTH as f64 + bar_width + 6.0,
            y + 15,
            format_value(kind, point.value)
        ));
    }

    render_legend(&mut svg, kind, total_height - LEGEND_HEIGHT / 2);

    svg.push_str("</svg>");
    info!("{} chart generated ({} bytes)", kind.legend(), svg.len());
    svg
}

fn render_legend(out: &mut String, kind: ChartKind, y: usize) {
    out.push_str(&format!(
        r#"<rect x="10" y="{}" width="15" height="15" fill="{}" rx="2"/>"#,
        y - 12,
        bar_color(kind)
    ));
    out.push_str(&format!(
        r#"<text x="32" y="{}" font-size="12">{}</text>"#,
        y,
        kind.legend()
    ));
}

fn bar_color(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Latency => "rgb(255, 140, 0)",    // Dark Orange
        ChartKind::Frequency => "rgb(70, 130, 180)", // Steel Blue
        ChartKind::Combined => "rgb(138, 43, 226)",  // Blue Violet
    }
}

/// Format a value the way its chart presents it
pub fn format_value(kind: ChartKind, value: f64) -> String {
    match kind {
        ChartKind::Latency => format!("{:.3}", value),
        ChartKind::Frequency => format!("{}", value as u64),
        ChartKind::Combined => format!("{:.1}%", value * 100.0),
    }
}

fn truncate_label(label: &str, max_chars: usize) -> String {
    if label.chars().count() > max_chars {
        let kept: String = label.chars().take(max_chars - 3).collect();
        format!("{}...", kept)
    } else {
        label.to_string()
    }
}

fn escape_xml(text: &str) -> String {
    text.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_refresh_before_initialize_fails() {
        let mut renderer = SvgChartRenderer::new(BarChartConfig::new());
        let result = renderer.refresh_latency(&[SeriesPoint::new("A", 1.0)]);
        assert!(matches!(result, Err(ChartError::NotInitialized)));
    }

    #[test]
    fn test_bars_keep_series_order() {
        let series = vec![SeriesPoint::new("first", 1.0), SeriesPoint::new("second", 5.0)];
        let svg = generate_bar_chart(ChartKind::Frequency, &series, &BarChartConfig::new());

        let first = svg.find(">first<").unwrap();
        let second = svg.find(">second<").unwrap();
        assert!(first < second);
    }

    #[test]
    fn test_max_bars() {
        let series: Vec<_> = (0..10).map(|i| SeriesPoint::new(format!("p{}", i), 1.0)).collect();
        let svg = generate_bar_chart(
            ChartKind::Latency,
            &series,
            &BarChartConfig::new().with_max_bars(3),
        );
        assert_eq!(svg.matches("class=\"bar\"").count(), 3);
    }

    #[test]
    fn test_labels_escaped() {
        let svg = generate_bar_chart(
            ChartKind::Combined,
            &[SeriesPoint::new("a<b>&c", 0.5)],
            &BarChartConfig::new(),
        );
        assert!(svg.contains("a&lt;b&gt;&amp;c"));
        assert!(svg.contains("50.0%"));
    }

    #[test]
    fn test_truncate_label() {
        assert_eq!(truncate_label("short", 10), "short");
        assert_eq!(truncate_label("averyveryverylongname", 10), "averyve...");
    }
}

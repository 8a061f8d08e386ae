//! Terminal rendering of ranked series.

use super::svg::format_value;
use super::{ChartKind, ChartRenderer};
use crate::parser::schema::SeriesPoint;
use crate::utils::error::ChartError;
use colored::{Color, Colorize};

const BAR_WIDTH: usize = 40;
const LABEL_WIDTH: usize = 36;

/// Collects a text table per series; [`TextChartRenderer::render`] joins them
#[derive(Debug)]
pub struct TextChartRenderer {
    max_rows: usize,
    selected: Option<ChartKind>,
    sections: Option<Vec<String>>,
}

impl TextChartRenderer {
    /// `selected` limits output to one chart; `None` keeps all three
    pub fn new(max_rows: usize, selected: Option<ChartKind>) -> Self {
        Self {
            max_rows,
            selected,
            sections: None,
        }
    }

    /// Everything refreshed since the last `initialize`
    pub fn render(&self) -> String {
        self.sections
            .as_ref()
            .map(|s| s.join("\n\n"))
            .unwrap_or_default()
    }

    fn refresh(&mut self, kind: ChartKind, series: &[SeriesPoint]) -> Result<(), ChartError> {
        let max_rows = self.max_rows;
        let selected = self.selected;
        let sections = self.sections.as_mut().ok_or(ChartError::NotInitialized)?;
        if selected.map_or(true, |s| s == kind) {
            sections.push(generate_text_chart(kind, series, max_rows));
        }
        Ok(())
    }
}

impl ChartRenderer for TextChartRenderer {
    fn initialize(&mut self) -> Result<(), ChartError> {
        self.sections = Some(Vec::new());
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

/// Create a table with proportional bars for one series
pub fn generate_text_chart(kind: ChartKind, series: &[SeriesPoint], max_rows: usize) -> String {
    let mut lines = Vec::new();
    let color = ansi_color(kind);

    lines.push(format!("  {}", kind.legend().to_uppercase().as_str().bold()));
    lines.push(format!("  {}", "─".repeat(LABEL_WIDTH + BAR_WIDTH + 16)));

    if series.is_empty() {
        lines.push(format!("  {}", "No data".dimmed()));
        return lines.join("\n");
    }

    let max_value = series.iter().map(|p| p.value).fold(0.0_f64, f64::max);

    for (i, point) in series.iter().take(max_rows).enumerate() {
        let bar_len = if max_value > 0.0 {
            ((point.value / max_value) * BAR_WIDTH as f64).round() as usize
        } else {
            0
        };

        let label = if point.label.chars().count() > LABEL_WIDTH {
            let tail: String = point
                .label
                .chars()
                .skip(point.label.chars().count() - (LABEL_WIDTH - 3))
                .collect();
            format!("...{}", tail)
        } else {
            point.label.clone()
        };

        lines.push(format!(
            "  {:>2}. {:<width$} {} {:>10}",
            i + 1,
            label,
            bar_cell(bar_len, color),
            format_value(kind, point.value),
            width = LABEL_WIDTH
        ));
    }

    if series.len() > max_rows {
        lines.push(format!("   (Showing top {} of {} procedures)", max_rows, series.len()));
    }

    lines.join("\n")
}

/// Coloured bar padded to `BAR_WIDTH` visible columns; escape codes are
/// added after measuring so they never count toward the width
fn bar_cell(bar_len: usize, color: Color) -> String {
    format!(
        "{}{}",
        "█".repeat(bar_len).as_str().color(color),
        " ".repeat(BAR_WIDTH.saturating_sub(bar_len))
    )
}

fn ansi_color(kind: ChartKind) -> Color {
    match kind {
        ChartKind::Latency => Color::Yellow,
        ChartKind::Frequency => Color::Blue,
        ChartKind::Combined => Color::Magenta,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_selected_chart_only() {
        colored::control::set_override(false);
        let mut renderer = TextChartRenderer::new(10, Some(ChartKind::Frequency));
        renderer.initialize().unwrap();
        renderer.refresh_latency(&[SeriesPoint::new("A", 1.0)]).unwrap();
        renderer.refresh_frequency(&[SeriesPoint::new("A", 7.0)]).unwrap();

        let out = renderer.render();
        assert!(out.contains("FREQUENCY"));
        assert!(!out.contains("EXECUTION TIME"));
    }

    #[test]
    fn test_bar_padding_ignores_escape_codes() {
        let cell = bar_cell(10, Color::Yellow);
        assert!(cell.ends_with(&" ".repeat(BAR_WIDTH - 10)));
        assert!(!cell.ends_with(&" ".repeat(BAR_WIDTH - 9)));

        let full = bar_cell(BAR_WIDTH, Color::Blue);
        assert!(!full.ends_with(' '));
    }

    #[test]
    fn test_row_limit_note() {
        colored::control::set_override(false);
        let series: Vec<_> = (0..5)
            .map(|i| SeriesPoint::new(format!("p{}", i), i as f64))
            .collect();
        let out = generate_text_chart(ChartKind::Latency, &series, 2);
        assert!(out.contains("Showing top 2 of 5"));
    }
}

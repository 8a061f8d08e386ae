use procedure_profile_studio::chart::svg::generate_bar_chart;
use procedure_profile_studio::chart::{
    render_series, BarChartConfig, ChartKind, ChartRenderer, SvgChartRenderer, TextChartRenderer,
};
use procedure_profile_studio::parser::schema::{RankedSeries, SeriesPoint};

fn sample_series() -> RankedSeries {
    RankedSeries {
        latency: vec![SeriesPoint::new("P1", 2.0), SeriesPoint::new("P2", 1.0)],
        frequency: vec![SeriesPoint::new("P1", 10.0), SeriesPoint::new("P2", 5.0)],
        combined: vec![SeriesPoint::new("P1", 0.8), SeriesPoint::new("P2", 0.2)],
    }
}

#[test]
fn test_svg_renderer_produces_all_charts() {
    let mut renderer = SvgChartRenderer::new(BarChartConfig::new().with_title("Voter"));
    render_series(&mut renderer, &sample_series()).unwrap();

    for kind in ChartKind::ALL {
        let svg = renderer.chart(kind).unwrap();
        assert!(svg.starts_with("<svg"));
        assert!(svg.ends_with("</svg>"));
        assert!(svg.contains(&format!("Voter - {}", kind.legend())));
    }
    assert!(renderer.chart(ChartKind::Combined).unwrap().contains("80.0%"));
}

#[test]
fn test_initialize_resets_previous_charts() {
    let mut renderer = SvgChartRenderer::new(BarChartConfig::new());
    render_series(&mut renderer, &sample_series()).unwrap();

    renderer.initialize().unwrap();
    assert!(renderer.chart(ChartKind::Latency).is_none());
}

#[test]
fn test_empty_series_chart() {
    let svg = generate_bar_chart(ChartKind::Latency, &[], &BarChartConfig::new());
    assert!(svg.contains("No data"));
    assert!(!svg.contains("class=\"bar\""));
}

#[test]
fn test_bar_widths_proportional() {
    let config = BarChartConfig {
        width: 1370,
        ..BarChartConfig::new()
    };
    // plot width is 1370 - 260 - 110 = 1000
    let svg = generate_bar_chart(ChartKind::Frequency, &sample_series().frequency, &config);
    assert!(svg.contains(r#"width="1000.00""#));
    assert!(svg.contains(r#"width="500.00""#));
}

#[test]
fn test_text_renderer_all_charts() {
    colored::control::set_override(false);
    let mut renderer = TextChartRenderer::new(10, None);
    render_series(&mut renderer, &sample_series()).unwrap();

    let out = renderer.render();
    assert!(out.contains("EXECUTION TIME"));
    assert!(out.contains("FREQUENCY"));
    assert!(out.contains("COMBINED"));
    assert!(out.contains("80.0%"));
}

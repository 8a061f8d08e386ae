use procedure_profile_studio::output::{read_report, validate_path, write_report, write_svg};
use procedure_profile_studio::parser::schema::{
    AnalysisReport, DisplayState, RankedSeries, SeriesPoint,
};
use std::path::Path;
use tempfile::NamedTempFile;

fn create_test_report() -> AnalysisReport {
    AnalysisReport {
        version: "1.0.0".to_string(),
        source: "http://localhost:8080/api/1.0/".to_string(),
        display_state: DisplayState::DataAvailable,
        procedure_count: 1,
        total_load: Some(20.0),
        series: Some(RankedSeries {
            latency: vec![SeriesPoint::new("Vote", 2.0)],
            frequency: vec![SeriesPoint::new("Vote", 10.0)],
            combined: vec![SeriesPoint::new("Vote", 1.0)],
        }),
        procedure_latency: vec![SeriesPoint::new("Vote", 1.5)],
        generated_at: "2024-01-01T00:00:00Z".to_string(),
    }
}

#[test]
fn test_write_and_read_report() {
    let report = create_test_report();
    let temp_file = NamedTempFile::new().unwrap();
    let path = temp_file.path();

    write_report(&report, path).unwrap();
    let loaded = read_report(path).unwrap();

    assert_eq!(loaded.version, report.version);
    assert_eq!(loaded.display_state, DisplayState::DataAvailable);
    assert_eq!(loaded.series, report.series);
    assert_eq!(loaded.procedure_latency, report.procedure_latency);
}

#[test]
fn test_no_data_report_omits_series() {
    let report = AnalysisReport {
        display_state: DisplayState::NoData,
        procedure_count: 0,
        total_load: None,
        series: None,
        procedure_latency: vec![],
        ..create_test_report()
    };
    let temp_file = NamedTempFile::new().unwrap();
    write_report(&report, temp_file.path()).unwrap();

    let raw = std::fs::read_to_string(temp_file.path()).unwrap();
    assert!(raw.contains("\"no_data\""));
    assert!(!raw.contains("\"series\""));
    assert!(!raw.contains("\"total_load\""));
}

#[test]
fn test_validate_output_path_empty() {
    let result = validate_path(Path::new(""));
    assert!(result.is_err());
}

#[test]
fn test_validate_output_path_directory() {
    let temp_dir = tempfile::tempdir().unwrap();
    let result = validate_path(temp_dir.path());
    assert!(result.is_err());
}

#[test]
fn test_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("nested/dirs/report.json");

    write_report(&create_test_report(), &nested_path).unwrap();

    assert!(nested_path.exists());
}

#[test]
fn test_svg_write_creates_parent_dirs() {
    let temp_dir = tempfile::tempdir().unwrap();
    let nested_path = temp_dir.path().join("charts/latency.svg");
    let valid_svg = r#"<svg xmlns="http://www.w3.org/2000/svg" width="100" height="100"></svg>"#;

    write_svg(valid_svg, &nested_path).unwrap();

    assert_eq!(std::fs::read_to_string(&nested_path).unwrap(), valid_svg);
}

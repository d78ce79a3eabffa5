//! Demo cases and synthetic scenarios run end to end through the analysis

use ecgw_cli::{AnalysisExport, ReportFormatter, Scenario, DEMO_CASES};
use ecgw_common::{analyze_segment, AlertLevel, FindingKind, FindingSource, SegmentAnalysis};
use tempfile::TempDir;

fn run_demo() -> Vec<SegmentAnalysis> {
    DEMO_CASES
        .iter()
        .map(|case| analyze_segment(&case.to_input().unwrap()).unwrap())
        .collect()
}

#[test]
fn test_demo_case_levels() {
    let levels: Vec<(Option<String>, AlertLevel)> = run_demo()
        .into_iter()
        .map(|a| (a.patient_id, a.overall_level))
        .collect();

    let expected = [
        ("PT001", AlertLevel::Normal),
        ("PT002", AlertLevel::Warning),
        ("PT003", AlertLevel::Warning),
        ("PT004", AlertLevel::Warning),
        ("PT005", AlertLevel::Critical),
        ("PT006", AlertLevel::Critical),
    ];
    assert_eq!(levels.len(), expected.len());
    for ((patient, level), (want_patient, want_level)) in levels.iter().zip(expected) {
        assert_eq!(patient.as_deref(), Some(want_patient));
        assert_eq!(*level, want_level, "{}", want_patient);
    }
}

#[test]
fn test_demo_summary() {
    let export = AnalysisExport::new(run_demo());
    let summary = &export.summary;

    assert_eq!(summary.total, 6);
    assert_eq!(summary.count_for(AlertLevel::Critical), 2);
    assert_eq!(summary.count_for(AlertLevel::Warning), 3);
    assert_eq!(summary.normal_count, 1);
    assert_eq!(summary.alert_count, 5);

    let text = ReportFormatter::format_summary(summary);
    assert!(text.contains("2 patient(s) require immediate attention"));
    assert!(text.contains("3 patient(s) need medical consultation"));
}

#[test]
fn test_scenario_levels() {
    let expected = [
        (Scenario::Normal, AlertLevel::Normal),
        (Scenario::Bradycardia, AlertLevel::Warning),
        (Scenario::Tachycardia, AlertLevel::Warning),
        (Scenario::Arrhythmia, AlertLevel::Warning),
        (Scenario::Critical, AlertLevel::Critical),
    ];
    for (scenario, level) in expected {
        let segment = scenario.generate(8.0, 360.0).unwrap();
        let analysis = analyze_segment(&segment.to_input().unwrap()).unwrap();
        assert_eq!(analysis.overall_level, level, "{}", scenario);
    }
}

#[test]
fn test_regular_scenario_has_no_rr_finding() {
    let segment = Scenario::Normal.generate(8.0, 360.0).unwrap();
    let analysis = analyze_segment(&segment.to_input().unwrap()).unwrap();
    assert!(analysis.finding_from(FindingSource::RrVariability).is_none());
    assert_eq!(
        analysis.finding_from(FindingSource::Rhythm).unwrap().kind,
        FindingKind::NormalRhythm
    );
}

#[test]
fn test_export_file_is_readable() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("demo.json");

    AnalysisExport::new(run_demo()).export_json(&path).unwrap();
    let imported = AnalysisExport::import_json(&path).unwrap();

    assert_eq!(imported.analyses.len(), DEMO_CASES.len());
    assert_eq!(imported.summary.total, DEMO_CASES.len());
}

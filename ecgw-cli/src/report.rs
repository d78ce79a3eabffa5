//! Report generation and formatting
//!
//! Text rendering of segment analyses and batch summaries, and JSON export.
//! Renders only; never alters the analyses it is given.

use ecgw_common::time::format_report_timestamp;
use ecgw_common::{AlertLevel, FindingSource, SegmentAnalysis, SummaryReport};
use serde::{Deserialize, Serialize};
use std::fs::File;
use std::io::Write;
use std::path::Path;

const RULE: &str = "════════════════════════════════════════════════════════════";
const THIN_RULE: &str = "────────────────────────────────────────────────────────────";

/// Exported batch of analyses
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AnalysisExport {
    /// Export timestamp (ISO 8601)
    pub generated_at: String,

    /// Export format version
    pub version: String,

    pub analyses: Vec<SegmentAnalysis>,

    pub summary: SummaryReport,
}

impl AnalysisExport {
    pub fn new(analyses: Vec<SegmentAnalysis>) -> Self {
        let summary = SummaryReport::from_analyses(&analyses);
        Self {
            generated_at: chrono::Utc::now().to_rfc3339(),
            version: "1.0".to_string(),
            analyses,
            summary,
        }
    }

    /// Export to a JSON file
    pub fn export_json<P: AsRef<Path>>(&self, path: P) -> std::io::Result<()> {
        let json = serde_json::to_string_pretty(self)?;
        let mut file = File::create(path)?;
        file.write_all(json.as_bytes())?;
        Ok(())
    }

    /// Import from a JSON file
    pub fn import_json<P: AsRef<Path>>(path: P) -> std::io::Result<Self> {
        let file = File::open(path)?;
        let export: AnalysisExport = serde_json::from_reader(file)?;
        Ok(export)
    }
}

/// Text formatter for analysis reports
pub struct ReportFormatter;

impl ReportFormatter {
    /// Status symbol for a level
    ///
    /// Example: `[!!] CRITICAL`
    pub fn level_symbol(level: AlertLevel) -> &'static str {
        match level {
            AlertLevel::Normal => "[ok]",
            AlertLevel::Caution => "[~]",
            AlertLevel::Warning => "[!]",
            AlertLevel::Critical => "[!!]",
            AlertLevel::Emergency => "[!!!]",
        }
    }

    /// Full report for one segment
    pub fn format_analysis(analysis: &SegmentAnalysis, title: Option<&str>) -> String {
        let mut output = String::new();

        output.push_str("\nECG ANALYSIS REPORT\n");
        if let Some(title) = title {
            output.push_str(&format!("Case: {}\n", title));
        }
        if let Some(patient) = &analysis.patient_id {
            output.push_str(&format!("Patient ID: {}\n", patient));
        }
        output.push_str(&format!(
            "Timestamp: {}\n",
            format_report_timestamp(&analysis.timestamp)
        ));
        output.push_str(RULE);
        output.push('\n');

        if let Some(finding) = analysis.finding_from(FindingSource::HeartRate) {
            output.push_str("\nHEART RATE ANALYSIS:\n");
            output.push_str(&format!("   {} {}\n", Self::level_symbol(finding.level), finding.message));
            output.push_str(&format!("   Clinical Notes: {}\n", finding.clinical_notes));
        }

        if let Some(finding) = analysis.finding_from(FindingSource::Rhythm) {
            output.push_str("\nRHYTHM ANALYSIS:\n");
            output.push_str(&format!("   Beat Composition: {}\n", Self::format_composition(analysis)));
            output.push_str(&format!("   {} {}\n", Self::level_symbol(finding.level), finding.message));
            output.push_str(&format!("   Clinical Notes: {}\n", finding.clinical_notes));
        }

        if let Some(finding) = analysis.finding_from(FindingSource::RrVariability) {
            output.push_str("\nRR VARIABILITY:\n");
            output.push_str(&format!("   {} {}\n", Self::level_symbol(finding.level), finding.message));
            output.push_str(&format!("   Clinical Notes: {}\n", finding.clinical_notes));
        }

        output.push_str(&format!("\nOVERALL ASSESSMENT: {}\n", analysis.overall_level));
        output.push_str(&format!("   Alert Priority: {}/4\n", analysis.priority()));
        output.push_str(&format!(
            "   Primary Action: {}\n",
            analysis.overall_level.default_action()
        ));
        if let Some(primary) = analysis.primary_finding().filter(|f| f.is_alert()) {
            output.push_str(&format!("   Primary Finding: {}\n", primary.type_name()));
        }

        output.push_str("\nCLINICAL RECOMMENDATIONS:\n");
        for (i, rec) in analysis.recommendations.iter().enumerate() {
            output.push_str(&format!("   {}. {}\n", i + 1, rec));
        }

        output.push_str("\nFOLLOW-UP INSTRUCTIONS:\n");
        for instruction in &analysis.follow_up.instructions {
            output.push_str(&format!("   - {}\n", instruction));
        }

        let guidelines = analysis.guidelines();
        if !guidelines.is_empty() {
            output.push_str("\nCLINICAL GUIDELINES:\n");
            for guideline in guidelines {
                output.push_str(&format!("   {}:\n", guideline.condition.display_name()));
                output.push_str(&format!("      Causes: {}\n", guideline.causes.join(", ")));
                output.push_str(&format!("      Symptoms: {}\n", guideline.symptoms.join(", ")));
                output.push_str(&format!("      Treatment: {}\n", guideline.treatment.join(", ")));
            }
        }

        output
    }

    /// Beat breakdown, e.g. `8 beats: Normal Beat 6 (75.0%), Ventricular Ectopic 2 (25.0%)`
    pub fn format_composition(analysis: &SegmentAnalysis) -> String {
        let composition = &analysis.composition;
        if composition.is_empty() {
            return "no beats".to_string();
        }
        let parts: Vec<String> = composition
            .breakdown()
            .into_iter()
            .map(|(label, count)| {
                format!(
                    "{} {} ({:.1}%)",
                    label.display_name(),
                    count,
                    composition.ratio(label) * 100.0
                )
            })
            .collect();
        format!("{} beats: {}", composition.total, parts.join(", "))
    }

    /// Batch summary
    pub fn format_summary(summary: &SummaryReport) -> String {
        let mut output = String::new();

        output.push('\n');
        output.push_str(RULE);
        output.push_str("\nSUMMARY REPORT - ECG Warning System Results\n");
        output.push_str(RULE);
        output.push('\n');

        output.push_str("\nALERT DISTRIBUTION:\n");
        for (level, count) in &summary.distribution {
            output.push_str(&format!(
                "   {} {}: {} patient(s)\n",
                Self::level_symbol(*level),
                level,
                count
            ));
        }

        output.push_str("\nCLINICAL INSIGHTS:\n");
        if !summary.immediate_attention.is_empty() {
            output.push_str(&format!(
                "   {} patient(s) require immediate attention\n",
                summary.immediate_attention.len()
            ));
            for flagged in &summary.immediate_attention {
                output.push_str(&format!("      - {}: {}\n", flagged.patient, flagged.primary_finding));
            }
        }
        if !summary.consultation.is_empty() {
            output.push_str(&format!(
                "   {} patient(s) need medical consultation\n",
                summary.consultation.len()
            ));
            for flagged in &summary.consultation {
                output.push_str(&format!("      - {}: {}\n", flagged.patient, flagged.primary_finding));
            }
        }
        output.push_str(&format!(
            "   {} patient(s) have normal parameters\n",
            summary.normal_count
        ));

        output.push_str(&format!("\nTotal segments analyzed: {}\n", summary.total));
        output.push_str(&format!("Alerts generated: {}\n", summary.alert_count));
        output.push_str(&format!(
            "Critical alerts: {}\n",
            summary.immediate_attention.len()
        ));
        output.push_str(THIN_RULE);
        output.push('\n');

        output
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use ecgw_common::{analyze_segment, SegmentInput};
    use tempfile::TempDir;

    fn analyze(patient: &str, heart_rate: f64, beats: &str) -> SegmentAnalysis {
        let input = SegmentInput::parse(heart_rate, beats)
            .unwrap()
            .with_patient_id(patient);
        analyze_segment(&input).unwrap()
    }

    #[test]
    fn test_format_analysis_sections() {
        let analysis = analyze("PT005", 38.0, "NVVNVNVV");
        let text = ReportFormatter::format_analysis(&analysis, Some("ICU Patient"));

        assert!(text.contains("Case: ICU Patient"));
        assert!(text.contains("Patient ID: PT005"));
        assert!(text.contains("[!!] Heart rate critically low: 38 BPM"));
        assert!(text.contains("High ventricular ectopic burden: 62.5%"));
        assert!(text.contains("OVERALL ASSESSMENT: CRITICAL"));
        assert!(text.contains("Alert Priority: 3/4"));
        assert!(text.contains("Primary Finding: Severe Bradycardia"));
        assert!(text.contains("   1. IMMEDIATE medical attention required"));
        assert!(text.contains("Reassess every 15 minutes"));
        assert!(text.contains("Consider pacing"));
        assert!(!text.contains("RR VARIABILITY"));
    }

    #[test]
    fn test_normal_report_has_no_primary_finding_or_guidelines() {
        let analysis = analyze("PT001", 72.0, "NNNNNNNN");
        let text = ReportFormatter::format_analysis(&analysis, None);
        assert!(text.contains("OVERALL ASSESSMENT: NORMAL"));
        assert!(!text.contains("Primary Finding"));
        assert!(!text.contains("CLINICAL GUIDELINES"));
    }

    #[test]
    fn test_format_composition() {
        let analysis = analyze("PT006", 165.0, "NNNSNSNN");
        assert_eq!(
            ReportFormatter::format_composition(&analysis),
            "8 beats: Normal Beat 6 (75.0%), Supraventricular Ectopic 2 (25.0%)"
        );
    }

    #[test]
    fn test_format_summary() {
        let analyses = vec![
            analyze("PT001", 72.0, "NNNNNNNN"),
            analyze("PT002", 55.0, "NNNNNN"),
            analyze("PT006", 165.0, "NNNSNSNN"),
        ];
        let text = ReportFormatter::format_summary(&SummaryReport::from_analyses(&analyses));

        assert!(text.contains("[ok] NORMAL: 1 patient(s)"));
        assert!(text.contains("1 patient(s) require immediate attention"));
        assert!(text.contains("- PT006: Severe Tachycardia"));
        assert!(text.contains("- PT002: Bradycardia"));
        assert!(text.contains("Alerts generated: 2"));
    }

    #[test]
    fn test_export_import_round_trip() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("analyses.json");

        let export = AnalysisExport::new(vec![
            analyze("PT004", 78.0, "NNVNNNVNNN"),
            analyze("PT005", 38.0, "NVVNVNVV"),
        ]);
        export.export_json(&path).unwrap();

        let imported = AnalysisExport::import_json(&path).unwrap();
        assert_eq!(imported.analyses.len(), 2);
        assert!(imported.analyses[1].same_assessment(&export.analyses[1]));
        assert_eq!(imported.summary, export.summary);
    }
}

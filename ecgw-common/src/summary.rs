//! Batch summary across several segment analyses

use crate::alert_level::AlertLevel;
use crate::analysis::SegmentAnalysis;
use serde::{Deserialize, Serialize};

/// One patient named in a summary bucket
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FlaggedPatient {
    /// Patient id, or `segment-<n>` (1-based) when none was given
    pub patient: String,
    /// Type name of the finding that drove the overall level
    pub primary_finding: String,
}

/// Alert distribution and flagged patients for a batch
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryReport {
    pub total: usize,
    /// (level, count) for every level that occurred, least severe first
    pub distribution: Vec<(AlertLevel, usize)>,
    /// CRITICAL or EMERGENCY
    pub immediate_attention: Vec<FlaggedPatient>,
    /// WARNING
    pub consultation: Vec<FlaggedPatient>,
    pub normal_count: usize,
    /// Analyses whose overall level is above NORMAL
    pub alert_count: usize,
}

impl SummaryReport {
    pub fn from_analyses(analyses: &[SegmentAnalysis]) -> Self {
        let distribution = AlertLevel::all_variants()
            .iter()
            .map(|level| {
                let count = analyses
                    .iter()
                    .filter(|a| a.overall_level == *level)
                    .count();
                (*level, count)
            })
            .filter(|(_, count)| *count > 0)
            .collect();

        let flag = |index: usize, analysis: &SegmentAnalysis| FlaggedPatient {
            patient: analysis
                .patient_id
                .clone()
                .unwrap_or_else(|| format!("segment-{}", index + 1)),
            primary_finding: analysis
                .primary_finding()
                .map(|finding| finding.type_name().to_string())
                .unwrap_or_default(),
        };

        let mut immediate_attention = Vec::new();
        let mut consultation = Vec::new();
        for (index, analysis) in analyses.iter().enumerate() {
            if analysis.overall_level.is_urgent() {
                immediate_attention.push(flag(index, analysis));
            } else if analysis.overall_level == AlertLevel::Warning {
                consultation.push(flag(index, analysis));
            }
        }

        let normal_count = analyses
            .iter()
            .filter(|a| a.overall_level == AlertLevel::Normal)
            .count();

        Self {
            total: analyses.len(),
            distribution,
            immediate_attention,
            consultation,
            normal_count,
            alert_count: analyses.len() - normal_count,
        }
    }

    pub fn count_for(&self, level: AlertLevel) -> usize {
        self.distribution
            .iter()
            .find(|(l, _)| *l == level)
            .map(|(_, count)| *count)
            .unwrap_or(0)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::analysis::{analyze_segment, SegmentInput};

    fn analyze(patient: Option<&str>, heart_rate: f64, beats: &str) -> SegmentAnalysis {
        let mut input = SegmentInput::parse(heart_rate, beats).unwrap();
        if let Some(id) = patient {
            input = input.with_patient_id(id);
        }
        analyze_segment(&input).unwrap()
    }

    #[test]
    fn test_empty_batch() {
        let summary = SummaryReport::from_analyses(&[]);
        assert_eq!(summary.total, 0);
        assert!(summary.distribution.is_empty());
        assert_eq!(summary.alert_count, 0);
    }

    #[test]
    fn test_buckets_and_counts() {
        let analyses = vec![
            analyze(Some("PT001"), 72.0, "NNNNNNNN"),
            analyze(Some("PT002"), 55.0, "NNNNNN"),
            analyze(Some("PT005"), 38.0, "NVVNVNVV"),
            analyze(None, 165.0, "NNNSNSNN"),
        ];
        let summary = SummaryReport::from_analyses(&analyses);

        assert_eq!(summary.total, 4);
        assert_eq!(summary.normal_count, 1);
        assert_eq!(summary.alert_count, 3);
        assert_eq!(summary.count_for(AlertLevel::Critical), 2);
        assert_eq!(summary.count_for(AlertLevel::Caution), 0);
        assert_eq!(
            summary.distribution,
            vec![
                (AlertLevel::Normal, 1),
                (AlertLevel::Warning, 1),
                (AlertLevel::Critical, 2)
            ]
        );

        assert_eq!(
            summary.immediate_attention,
            vec![
                FlaggedPatient {
                    patient: "PT005".to_string(),
                    primary_finding: "Severe Bradycardia".to_string(),
                },
                FlaggedPatient {
                    patient: "segment-4".to_string(),
                    primary_finding: "Severe Tachycardia".to_string(),
                },
            ]
        );
        assert_eq!(summary.consultation[0].patient, "PT002");
        assert_eq!(summary.consultation[0].primary_finding, "Bradycardia");
    }
}

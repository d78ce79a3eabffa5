//! Built-in patient cases for the demo run
//!
//! Fixed heart rate and beat-label inputs covering each alert level the
//! classifiers can reach.

use ecgw_common::{SegmentInput, ValidationError};

/// One demo patient
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DemoCase {
    pub patient_id: &'static str,
    pub description: &'static str,
    pub heart_rate: f64,
    /// Beat labels as single-character codes
    pub beats: &'static str,
}

impl DemoCase {
    pub fn to_input(&self) -> Result<SegmentInput, ValidationError> {
        Ok(SegmentInput::parse(self.heart_rate, self.beats)?.with_patient_id(self.patient_id))
    }
}

pub const DEMO_CASES: [DemoCase; 6] = [
    DemoCase {
        patient_id: "PT001",
        description: "Healthy Adult - Routine Check",
        heart_rate: 72.0,
        beats: "NNNNNNNN",
    },
    DemoCase {
        patient_id: "PT002",
        description: "Elderly Patient - Mild Bradycardia",
        heart_rate: 55.0,
        beats: "NNNNNN",
    },
    DemoCase {
        patient_id: "PT003",
        description: "Exercise-Induced Tachycardia",
        heart_rate: 115.0,
        beats: "NNNNNNNN",
    },
    DemoCase {
        patient_id: "PT004",
        description: "Cardiac Patient - Occasional PVCs",
        heart_rate: 78.0,
        beats: "NNVNNNVNNN",
    },
    DemoCase {
        patient_id: "PT005",
        description: "ICU Patient - Critical Arrhythmia",
        heart_rate: 38.0,
        beats: "NVVNVNVV",
    },
    DemoCase {
        patient_id: "PT006",
        description: "Emergency Case - Severe Tachycardia",
        heart_rate: 165.0,
        beats: "NNNSNSNN",
    },
];

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_cases_parse() {
        for case in &DEMO_CASES {
            let input = case.to_input().unwrap();
            assert_eq!(input.patient_id.as_deref(), Some(case.patient_id));
            assert_eq!(input.beats.len(), case.beats.len());
            assert!(input.rr_intervals.is_none());
        }
    }

    #[test]
    fn test_patient_ids_unique() {
        let mut ids: Vec<_> = DEMO_CASES.iter().map(|c| c.patient_id).collect();
        ids.sort();
        ids.dedup();
        assert_eq!(ids.len(), DEMO_CASES.len());
    }
}

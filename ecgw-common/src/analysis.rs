//! Segment analysis orchestration
//!
//! [`analyze_segment`] validates the whole input first, then runs the heart
//! rate, rhythm and RR variability classifiers, aggregates their findings
//! and derives recommendations. Any validation failure aborts the call
//! before a classifier runs. Apart from the timestamp and analysis id
//! captured at call time, the result is a pure function of the input.

use crate::aggregate::{aggregate_level, primary_finding};
use crate::alert_level::{registry, AlertLevel, AlertLevelRegistry};
use crate::beat::BeatLabel;
use crate::classify::{
    classify_heart_rate, classify_rhythm, classify_rr_variability, rr_intervals_from_indices,
    validate_heart_rate, validate_rr_intervals, BeatComposition,
};
use crate::error::ValidationError;
use crate::finding::{Finding, FindingSource};
use crate::guidelines::{guideline_for, Guideline};
use crate::recommend::{recommendations, FollowUpPlan};
use crate::Result;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Measurements for one ECG segment
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SegmentInput {
    #[serde(default)]
    pub patient_id: Option<String>,
    /// Heart rate in BPM
    pub heart_rate: f64,
    /// Beat labels in segment order
    #[serde(default)]
    pub beats: Vec<BeatLabel>,
    /// RR intervals in seconds, when beat timing is available
    #[serde(default)]
    pub rr_intervals: Option<Vec<f64>>,
}

impl SegmentInput {
    pub fn new(heart_rate: f64, beats: Vec<BeatLabel>) -> Self {
        Self {
            heart_rate,
            beats,
            ..Self::default()
        }
    }

    /// Build from a label string such as `"NNVN"`
    pub fn parse(heart_rate: f64, beats: &str) -> std::result::Result<Self, ValidationError> {
        Ok(Self::new(heart_rate, BeatLabel::parse_sequence(beats)?))
    }

    pub fn with_patient_id(mut self, patient_id: impl Into<String>) -> Self {
        self.patient_id = Some(patient_id.into());
        self
    }

    pub fn with_rr_intervals(mut self, intervals: Vec<f64>) -> Self {
        self.rr_intervals = Some(intervals);
        self
    }

    /// Derive RR intervals from ascending beat sample indices
    pub fn with_beat_indices(
        self,
        indices: &[usize],
        sampling_rate_hz: f64,
    ) -> std::result::Result<Self, ValidationError> {
        let intervals = rr_intervals_from_indices(indices, sampling_rate_hz)?;
        Ok(self.with_rr_intervals(intervals))
    }

    /// Check every field before any classifier runs
    pub fn validate(&self) -> std::result::Result<(), ValidationError> {
        validate_heart_rate(self.heart_rate)?;
        if let Some(intervals) = &self.rr_intervals {
            validate_rr_intervals(intervals)?;
        }
        Ok(())
    }
}

/// Result of one segment analysis
///
/// Owned by the caller once returned; nothing in this crate keeps a
/// reference to it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SegmentAnalysis {
    pub analysis_id: Uuid,
    pub patient_id: Option<String>,
    pub heart_rate: f64,
    pub beat_count: usize,
    pub composition: BeatComposition,
    /// Every finding produced, in source order (heart rate, rhythm, RR)
    pub findings: Vec<Finding>,
    pub overall_level: AlertLevel,
    pub recommendations: Vec<String>,
    pub follow_up: FollowUpPlan,
    pub timestamp: DateTime<Utc>,
}

impl SegmentAnalysis {
    pub fn priority(&self) -> u8 {
        self.overall_level.priority()
    }

    /// Findings above NORMAL
    pub fn alerts(&self) -> impl Iterator<Item = &Finding> {
        self.findings.iter().filter(|finding| finding.is_alert())
    }

    /// Finding that names the overall level (see [`primary_finding`])
    pub fn primary_finding(&self) -> Option<&Finding> {
        primary_finding(registry(), &self.findings)
    }

    pub fn finding_from(&self, source: FindingSource) -> Option<&Finding> {
        self.findings.iter().find(|finding| finding.source() == source)
    }

    /// Guidelines for the triggered findings, without repeats
    pub fn guidelines(&self) -> Vec<&'static Guideline> {
        let mut guidelines: Vec<&'static Guideline> = Vec::new();
        for guideline in self.alerts().filter_map(|finding| guideline_for(&finding.kind)) {
            if !guidelines.iter().any(|g| g.condition == guideline.condition) {
                guidelines.push(guideline);
            }
        }
        guidelines
    }

    /// Equality over the clinical content, ignoring id and timestamp
    pub fn same_assessment(&self, other: &SegmentAnalysis) -> bool {
        self.patient_id == other.patient_id
            && self.heart_rate == other.heart_rate
            && self.beat_count == other.beat_count
            && self.composition == other.composition
            && self.findings == other.findings
            && self.overall_level == other.overall_level
            && self.recommendations == other.recommendations
            && self.follow_up == other.follow_up
    }
}

/// Analyze one segment against the standard alert level registry
pub fn analyze_segment(input: &SegmentInput) -> Result<SegmentAnalysis> {
    analyze_segment_with(registry(), input)
}

/// Analyze one segment against an explicit registry
pub fn analyze_segment_with(
    registry: &AlertLevelRegistry,
    input: &SegmentInput,
) -> Result<SegmentAnalysis> {
    input.validate()?;

    let mut findings = vec![classify_heart_rate(input.heart_rate)];
    findings.extend(classify_rhythm(&input.beats));
    if let Some(intervals) = &input.rr_intervals {
        findings.extend(classify_rr_variability(intervals));
    }

    let overall_level = aggregate_level(registry, &findings);

    Ok(SegmentAnalysis {
        analysis_id: Uuid::new_v4(),
        patient_id: input.patient_id.clone(),
        heart_rate: input.heart_rate,
        beat_count: input.beats.len(),
        composition: BeatComposition::from_labels(&input.beats),
        findings,
        overall_level,
        recommendations: recommendations(registry, overall_level),
        follow_up: FollowUpPlan::for_level(overall_level),
        timestamp: crate::time::now(),
    })
}

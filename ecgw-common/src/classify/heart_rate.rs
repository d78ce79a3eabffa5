//! Heart rate classification
//!
//! Thresholds are strict comparisons evaluated top to bottom; the first
//! match wins. The boundary rates themselves fall to the milder rule:
//! 40 BPM is Bradycardia (WARNING) and 150 BPM is Tachycardia (WARNING).

use crate::alert_level::AlertLevel;
use crate::error::ValidationError;
use crate::finding::{Finding, FindingKind};

/// Below this rate: Severe Bradycardia
pub const SEVERE_BRADYCARDIA_BPM: f64 = 40.0;
/// Above this rate: Severe Tachycardia
pub const SEVERE_TACHYCARDIA_BPM: f64 = 150.0;
/// Below this rate: Bradycardia
pub const BRADYCARDIA_BPM: f64 = 60.0;
/// Above this rate: Tachycardia
pub const TACHYCARDIA_BPM: f64 = 100.0;

/// Reject rates that must not reach the classifier
pub fn validate_heart_rate(bpm: f64) -> Result<(), ValidationError> {
    if !bpm.is_finite() {
        return Err(ValidationError::NonFiniteHeartRate(bpm));
    }
    if bpm <= 0.0 {
        return Err(ValidationError::NonPositiveHeartRate(bpm));
    }
    Ok(())
}

/// Classify a heart rate in beats per minute
///
/// Always returns a finding; 60-100 BPM inclusive is NORMAL.
pub fn classify_heart_rate(bpm: f64) -> Finding {
    if bpm < SEVERE_BRADYCARDIA_BPM {
        Finding::new(
            FindingKind::SevereBradycardia,
            AlertLevel::Critical,
            format!("Heart rate critically low: {:.0} BPM", bpm),
            "May indicate severe heart block or cardiac dysfunction",
        )
    } else if bpm > SEVERE_TACHYCARDIA_BPM {
        Finding::new(
            FindingKind::SevereTachycardia,
            AlertLevel::Critical,
            format!("Heart rate critically high: {:.0} BPM", bpm),
            "May indicate dangerous arrhythmia or cardiac distress",
        )
    } else if bpm < BRADYCARDIA_BPM {
        Finding::new(
            FindingKind::Bradycardia,
            AlertLevel::Warning,
            format!("Heart rate below normal: {:.0} BPM", bpm),
            "Monitor for symptoms of decreased cardiac output",
        )
    } else if bpm > TACHYCARDIA_BPM {
        Finding::new(
            FindingKind::Tachycardia,
            AlertLevel::Warning,
            format!("Heart rate above normal: {:.0} BPM", bpm),
            "Assess for underlying causes and monitor symptoms",
        )
    } else {
        Finding::new(
            FindingKind::NormalHeartRate,
            AlertLevel::Normal,
            format!("Heart rate normal: {:.0} BPM", bpm),
            "Heart rate within normal range (60-100 BPM)",
        )
    }
}

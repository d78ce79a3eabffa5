//! Rhythm pattern classification from beat-label composition
//!
//! Only label counts matter, so the result is independent of beat order.
//! Rules are checked ventricular first, then atrial; a single finding is
//! returned even when both ratios are elevated. The atrial ratio stays
//! available through [`BeatComposition`].

use crate::alert_level::AlertLevel;
use crate::beat::BeatLabel;
use crate::finding::{Finding, FindingKind};
use serde::{Deserialize, Serialize};

/// Ventricular ratio above this: Frequent Ventricular Ectopics
pub const FREQUENT_VENTRICULAR_RATIO: f64 = 0.3;
/// Ventricular ratio above this: Ventricular Ectopics
pub const VENTRICULAR_RATIO: f64 = 0.1;
/// Supraventricular ratio above this: Atrial Arrhythmia
pub const ATRIAL_RATIO: f64 = 0.2;

/// Label counts for one segment
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeatComposition {
    pub total: usize,
    pub normal: usize,
    pub ventricular: usize,
    pub supraventricular: usize,
    pub fusion: usize,
    pub unknown: usize,
}

impl BeatComposition {
    pub fn from_labels(labels: &[BeatLabel]) -> Self {
        let mut composition = Self::default();
        for label in labels {
            composition.total += 1;
            match label {
                BeatLabel::N => composition.normal += 1,
                BeatLabel::V => composition.ventricular += 1,
                BeatLabel::S => composition.supraventricular += 1,
                BeatLabel::F => composition.fusion += 1,
                BeatLabel::Q => composition.unknown += 1,
            }
        }
        composition
    }

    pub fn count(&self, label: BeatLabel) -> usize {
        match label {
            BeatLabel::N => self.normal,
            BeatLabel::V => self.ventricular,
            BeatLabel::S => self.supraventricular,
            BeatLabel::F => self.fusion,
            BeatLabel::Q => self.unknown,
        }
    }

    /// Fraction of beats carrying `label` (0.0 for an empty segment)
    pub fn ratio(&self, label: BeatLabel) -> f64 {
        if self.total == 0 {
            return 0.0;
        }
        self.count(label) as f64 / self.total as f64
    }

    pub fn is_empty(&self) -> bool {
        self.total == 0
    }

    /// Non-zero label counts in enumeration order
    pub fn breakdown(&self) -> Vec<(BeatLabel, usize)> {
        BeatLabel::all_variants()
            .iter()
            .map(|label| (*label, self.count(*label)))
            .filter(|(_, count)| *count > 0)
            .collect()
    }
}

/// Classify a beat-label sequence
///
/// Returns `None` for an empty sequence; the rhythm signal then takes no
/// part in aggregation.
pub fn classify_rhythm(labels: &[BeatLabel]) -> Option<Finding> {
    let composition = BeatComposition::from_labels(labels);
    if composition.is_empty() {
        return None;
    }

    let v_ratio = composition.ratio(BeatLabel::V);
    let s_ratio = composition.ratio(BeatLabel::S);

    let finding = if v_ratio > FREQUENT_VENTRICULAR_RATIO {
        Finding::new(
            FindingKind::FrequentVentricularEctopics,
            AlertLevel::Critical,
            format!("High ventricular ectopic burden: {:.1}%", v_ratio * 100.0),
            "High PVC burden may indicate ventricular tachycardia risk",
        )
    } else if v_ratio > VENTRICULAR_RATIO {
        Finding::new(
            FindingKind::VentricularEctopics,
            AlertLevel::Warning,
            format!("Ventricular ectopics detected: {:.1}%", v_ratio * 100.0),
            "Monitor for increasing frequency of PVCs",
        )
    } else if s_ratio > ATRIAL_RATIO {
        Finding::new(
            FindingKind::AtrialArrhythmia,
            AlertLevel::Caution,
            format!("Atrial ectopics detected: {:.1}%", s_ratio * 100.0),
            "May indicate atrial fibrillation risk",
        )
    } else {
        Finding::new(
            FindingKind::NormalRhythm,
            AlertLevel::Normal,
            format!(
                "Regular cardiac rhythm detected ({}/{} normal beats)",
                composition.normal, composition.total
            ),
            "Normal sinus rhythm pattern observed",
        )
    };

    Some(finding)
}

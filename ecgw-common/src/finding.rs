//! Classifier findings
//!
//! A [`Finding`] is a value object: created fresh by one classifier call and
//! never mutated. Absence of a finding is expressed as `Option::None` by the
//! classifier that produced nothing.

use crate::alert_level::AlertLevel;
use serde::{Deserialize, Serialize};

/// Which classifier produced a finding
///
/// Declaration order is the precedence used to pick the primary finding
/// when several findings share the highest priority.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingSource {
    HeartRate,
    Rhythm,
    RrVariability,
}

impl FindingSource {
    pub fn display_name(&self) -> &'static str {
        match self {
            FindingSource::HeartRate => "Heart Rate",
            FindingSource::Rhythm => "Rhythm",
            FindingSource::RrVariability => "RR Variability",
        }
    }
}

/// Finding type
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FindingKind {
    SevereBradycardia,
    SevereTachycardia,
    Bradycardia,
    Tachycardia,
    NormalHeartRate,
    FrequentVentricularEctopics,
    VentricularEctopics,
    AtrialArrhythmia,
    NormalRhythm,
    IrregularRhythm,
}

impl FindingKind {
    /// Human-readable type name, e.g. "Severe Bradycardia"
    pub fn name(&self) -> &'static str {
        match self {
            FindingKind::SevereBradycardia => "Severe Bradycardia",
            FindingKind::SevereTachycardia => "Severe Tachycardia",
            FindingKind::Bradycardia => "Bradycardia",
            FindingKind::Tachycardia => "Tachycardia",
            FindingKind::NormalHeartRate => "Normal Heart Rate",
            FindingKind::FrequentVentricularEctopics => "Frequent Ventricular Ectopics",
            FindingKind::VentricularEctopics => "Ventricular Ectopics",
            FindingKind::AtrialArrhythmia => "Atrial Arrhythmia",
            FindingKind::NormalRhythm => "Normal Rhythm",
            FindingKind::IrregularRhythm => "Irregular Rhythm",
        }
    }

    pub fn source(&self) -> FindingSource {
        match self {
            FindingKind::SevereBradycardia
            | FindingKind::SevereTachycardia
            | FindingKind::Bradycardia
            | FindingKind::Tachycardia
            | FindingKind::NormalHeartRate => FindingSource::HeartRate,
            FindingKind::FrequentVentricularEctopics
            | FindingKind::VentricularEctopics
            | FindingKind::AtrialArrhythmia
            | FindingKind::NormalRhythm => FindingSource::Rhythm,
            FindingKind::IrregularRhythm => FindingSource::RrVariability,
        }
    }
}

impl std::fmt::Display for FindingKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// Result of one classifier
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Finding {
    pub kind: FindingKind,
    pub level: AlertLevel,
    pub message: String,
    pub clinical_notes: String,
}

impl Finding {
    pub fn new(
        kind: FindingKind,
        level: AlertLevel,
        message: impl Into<String>,
        clinical_notes: impl Into<String>,
    ) -> Self {
        Self {
            kind,
            level,
            message: message.into(),
            clinical_notes: clinical_notes.into(),
        }
    }

    /// Type name, e.g. "Atrial Arrhythmia"
    pub fn type_name(&self) -> &'static str {
        self.kind.name()
    }

    pub fn source(&self) -> FindingSource {
        self.kind.source()
    }

    pub fn priority(&self) -> u8 {
        self.level.priority()
    }

    /// True when the finding raises severity above NORMAL
    pub fn is_alert(&self) -> bool {
        self.level != AlertLevel::Normal
    }
}

//! Clinical reference guidelines per condition
//!
//! Constant lookup data for the presentation layer. It does not influence
//! classification or recommendations.

use crate::finding::FindingKind;
use serde::Serialize;

/// Condition covered by a guideline
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Condition {
    Bradycardia,
    Tachycardia,
    VentricularEctopy,
}

/// Causes, symptoms and first-line treatment for one condition
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Guideline {
    pub condition: Condition,
    pub causes: &'static [&'static str],
    pub symptoms: &'static [&'static str],
    pub treatment: &'static [&'static str],
}

const BRADYCARDIA: Guideline = Guideline {
    condition: Condition::Bradycardia,
    causes: &["Increased vagal tone", "Hypothyroidism", "Medications", "Heart block"],
    symptoms: &["Fatigue", "Dizziness", "Syncope", "Chest pain"],
    treatment: &["Assess stability", "Check medications", "Consider pacing"],
};

const TACHYCARDIA: Guideline = Guideline {
    condition: Condition::Tachycardia,
    causes: &["Fever", "Dehydration", "Anxiety", "Hyperthyroidism", "Arrhythmias"],
    symptoms: &["Palpitations", "Chest pain", "Shortness of breath", "Dizziness"],
    treatment: &["Assess stability", "Vagal maneuvers", "Consider cardioversion"],
};

const VENTRICULAR_ECTOPY: Guideline = Guideline {
    condition: Condition::VentricularEctopy,
    causes: &["Electrolyte imbalance", "Ischemia", "Medications", "Stress"],
    symptoms: &["Palpitations", "Skipped beats", "Usually asymptomatic"],
    treatment: &[
        "Count frequency",
        "Check electrolytes",
        "Monitor for sustained arrhythmias",
    ],
};

impl Condition {
    pub fn guideline(&self) -> &'static Guideline {
        match self {
            Condition::Bradycardia => &BRADYCARDIA,
            Condition::Tachycardia => &TACHYCARDIA,
            Condition::VentricularEctopy => &VENTRICULAR_ECTOPY,
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Condition::Bradycardia => "Bradycardia",
            Condition::Tachycardia => "Tachycardia",
            Condition::VentricularEctopy => "Ventricular ectopy",
        }
    }
}

/// Guideline relevant to a finding type, if one exists
pub fn guideline_for(kind: &FindingKind) -> Option<&'static Guideline> {
    let condition = match kind {
        FindingKind::SevereBradycardia | FindingKind::Bradycardia => Condition::Bradycardia,
        FindingKind::SevereTachycardia | FindingKind::Tachycardia => Condition::Tachycardia,
        FindingKind::FrequentVentricularEctopics | FindingKind::VentricularEctopics => {
            Condition::VentricularEctopy
        }
        FindingKind::NormalHeartRate
        | FindingKind::NormalRhythm
        | FindingKind::AtrialArrhythmia
        | FindingKind::IrregularRhythm => return None,
    };
    Some(condition.guideline())
}

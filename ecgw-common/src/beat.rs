//! Beat labels and their clinical profiles
//!
//! Labels are taken as given by the upstream beat classifier; nothing here
//! derives them from waveform shape. The profile table is presentation data
//! and is not consulted by the ratio-based rhythm classifier.

use crate::alert_level::AlertLevel;
use crate::error::ValidationError;
use serde::{Deserialize, Serialize};

/// Per-beat classification label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BeatLabel {
    /// Normal beat
    N,
    /// Ventricular ectopic beat
    V,
    /// Supraventricular (atrial) ectopic beat
    S,
    /// Fusion beat
    F,
    /// Unknown / unclassified beat
    Q,
}

/// Constant description of a beat label
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct BeatProfile {
    pub name: &'static str,
    pub baseline_level: AlertLevel,
    pub description: &'static str,
}

const NORMAL_PROFILE: BeatProfile = BeatProfile {
    name: "Normal Beat",
    baseline_level: AlertLevel::Normal,
    description: "Normal cardiac rhythm",
};

const VENTRICULAR_PROFILE: BeatProfile = BeatProfile {
    name: "Ventricular Ectopic",
    baseline_level: AlertLevel::Warning,
    description: "Premature ventricular contraction",
};

const SUPRAVENTRICULAR_PROFILE: BeatProfile = BeatProfile {
    name: "Supraventricular Ectopic",
    baseline_level: AlertLevel::Caution,
    description: "Atrial premature beat",
};

const FUSION_PROFILE: BeatProfile = BeatProfile {
    name: "Fusion Beat",
    baseline_level: AlertLevel::Warning,
    description: "Mixed conduction pattern",
};

const UNKNOWN_PROFILE: BeatProfile = BeatProfile {
    name: "Unknown Beat",
    baseline_level: AlertLevel::Caution,
    description: "Unclassified rhythm pattern",
};

impl BeatLabel {
    pub fn all_variants() -> &'static [BeatLabel] {
        &[BeatLabel::N, BeatLabel::V, BeatLabel::S, BeatLabel::F, BeatLabel::Q]
    }

    /// Single-character code
    pub fn code(&self) -> char {
        match self {
            BeatLabel::N => 'N',
            BeatLabel::V => 'V',
            BeatLabel::S => 'S',
            BeatLabel::F => 'F',
            BeatLabel::Q => 'Q',
        }
    }

    /// Parse a single-character code (case-insensitive)
    pub fn from_code(c: char) -> Option<Self> {
        match c.to_ascii_uppercase() {
            'N' => Some(BeatLabel::N),
            'V' => Some(BeatLabel::V),
            'S' => Some(BeatLabel::S),
            'F' => Some(BeatLabel::F),
            'Q' => Some(BeatLabel::Q),
            _ => None,
        }
    }

    pub fn profile(&self) -> &'static BeatProfile {
        match self {
            BeatLabel::N => &NORMAL_PROFILE,
            BeatLabel::V => &VENTRICULAR_PROFILE,
            BeatLabel::S => &SUPRAVENTRICULAR_PROFILE,
            BeatLabel::F => &FUSION_PROFILE,
            BeatLabel::Q => &UNKNOWN_PROFILE,
        }
    }

    pub fn display_name(&self) -> &'static str {
        self.profile().name
    }

    /// Parse a label sequence such as `"NNVN"`, `"N,N,V,N"` or `"N N V N"`
    ///
    /// Commas and whitespace separate labels and are otherwise ignored.
    /// Positions in errors count labels, not characters.
    pub fn parse_sequence(s: &str) -> Result<Vec<BeatLabel>, ValidationError> {
        s.chars()
            .filter(|c| !c.is_whitespace() && *c != ',')
            .enumerate()
            .map(|(position, c)| {
                BeatLabel::from_code(c).ok_or_else(|| ValidationError::UnknownBeatLabel {
                    position,
                    label: c.to_string(),
                })
            })
            .collect()
    }

    /// Parse labels given one per string, as they arrive from JSON or CSV
    pub fn parse_labels<S: AsRef<str>>(labels: &[S]) -> Result<Vec<BeatLabel>, ValidationError> {
        labels
            .iter()
            .enumerate()
            .map(|(position, raw)| {
                let raw = raw.as_ref().trim();
                let mut chars = raw.chars();
                let parsed = match (chars.next(), chars.next()) {
                    (Some(c), None) => BeatLabel::from_code(c),
                    _ => None,
                };
                parsed.ok_or_else(|| ValidationError::UnknownBeatLabel {
                    position,
                    label: raw.to_string(),
                })
            })
            .collect()
    }
}

impl std::fmt::Display for BeatLabel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.code())
    }
}

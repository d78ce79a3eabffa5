//! Clinical recommendations and follow-up cadence
//!
//! Output depends on the overall level only: the same level always yields
//! the same list in the same order.

use crate::alert_level::{AlertLevel, AlertLevelRegistry};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const URGENT_ACTIONS: &[&str] = &[
    "Activate emergency response protocol",
    "Notify physician immediately",
    "Initiate continuous monitoring",
    "Obtain 12-lead ECG",
    "Prepare emergency medications",
];

const WARNING_ACTIONS: &[&str] = &[
    "Physician evaluation within 1 hour",
    "Increase monitoring frequency",
    "Obtain 12-lead ECG",
];

const CAUTION_ACTIONS: &[&str] = &["Continue close monitoring", "Document all rhythm changes"];

const ROUTINE_ACTIONS: &[&str] = &["Continue routine monitoring", "Document normal findings"];

/// Level-specific actions that follow the registry's default action
pub fn additional_actions(level: AlertLevel) -> &'static [&'static str] {
    match level {
        AlertLevel::Critical | AlertLevel::Emergency => URGENT_ACTIONS,
        AlertLevel::Warning => WARNING_ACTIONS,
        AlertLevel::Caution => CAUTION_ACTIONS,
        AlertLevel::Normal => ROUTINE_ACTIONS,
    }
}

/// Ordered recommendation list: default action first, then the level's list
pub fn recommendations(registry: &AlertLevelRegistry, level: AlertLevel) -> Vec<String> {
    std::iter::once(registry.action(level))
        .chain(additional_actions(level).iter().copied())
        .map(str::to_string)
        .collect()
}

/// Follow-up instructions for an overall level
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FollowUpPlan {
    /// One-line cadence, e.g. "Reassess every 15 minutes"
    pub cadence: String,
    /// Reassessment interval; `None` means the routine schedule
    #[serde(with = "optional_minutes")]
    pub reassess_every: Option<Duration>,
    pub instructions: Vec<String>,
}

impl FollowUpPlan {
    pub fn for_level(level: AlertLevel) -> Self {
        let (cadence, minutes, instructions): (&str, Option<u64>, &[&str]) = match level {
            AlertLevel::Critical | AlertLevel::Emergency => (
                "Reassess every 15 minutes",
                Some(15),
                &[
                    "Continuous monitoring until stabilized",
                    "Reassess every 15 minutes",
                    "Document all interventions",
                ],
            ),
            AlertLevel::Warning => (
                "Reassess every 30 minutes",
                Some(30),
                &[
                    "Monitor for 2-4 hours",
                    "Reassess every 30 minutes",
                    "Report any changes immediately",
                ],
            ),
            AlertLevel::Caution | AlertLevel::Normal => (
                "Routine monitoring schedule",
                None,
                &[
                    "Routine monitoring schedule",
                    "Standard documentation",
                    "Report significant changes",
                ],
            ),
        };

        Self {
            cadence: cadence.to_string(),
            reassess_every: minutes.map(|m| Duration::from_secs(m * 60)),
            instructions: instructions.iter().map(|s| s.to_string()).collect(),
        }
    }
}

mod optional_minutes {
    use serde::{Deserialize, Deserializer, Serializer};
    use std::time::Duration;

    pub fn serialize<S: Serializer>(value: &Option<Duration>, serializer: S) -> Result<S::Ok, S::Error> {
        match value {
            Some(duration) => serializer.serialize_some(&(duration.as_secs() / 60)),
            None => serializer.serialize_none(),
        }
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<Duration>, D::Error> {
        let minutes = Option::<u64>::deserialize(deserializer)?;
        Ok(minutes.map(|m| Duration::from_secs(m * 60)))
    }
}

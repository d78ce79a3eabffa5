//! Alert severity scale
//!
//! Five ordered levels, each with a fixed priority (0-4), a default action
//! and a presentation colour. The process-wide [`registry()`] is built once
//! from [`STANDARD_LEVELS`] and never mutated afterwards.
//!
//! EMERGENCY is reserved: no classifier produces it today, but lookups and
//! aggregation handle it like any other level.

use crate::{Error, Result};
use once_cell::sync::Lazy;
use serde::{Deserialize, Serialize};

/// Clinical urgency level
///
/// Variant order matches priority order, so the derived `Ord` agrees with
/// [`AlertLevel::priority`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum AlertLevel {
    Normal,
    Caution,
    Warning,
    Critical,
    Emergency,
}

impl AlertLevel {
    /// All levels from least to most severe
    pub fn all_variants() -> &'static [AlertLevel] {
        &[
            AlertLevel::Normal,
            AlertLevel::Caution,
            AlertLevel::Warning,
            AlertLevel::Critical,
            AlertLevel::Emergency,
        ]
    }

    /// Canonical upper-case name
    pub fn as_str(&self) -> &'static str {
        match self {
            AlertLevel::Normal => "NORMAL",
            AlertLevel::Caution => "CAUTION",
            AlertLevel::Warning => "WARNING",
            AlertLevel::Critical => "CRITICAL",
            AlertLevel::Emergency => "EMERGENCY",
        }
    }

    /// Parse level name (case-insensitive)
    pub fn from_str(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "NORMAL" => Some(AlertLevel::Normal),
            "CAUTION" => Some(AlertLevel::Caution),
            "WARNING" => Some(AlertLevel::Warning),
            "CRITICAL" => Some(AlertLevel::Critical),
            "EMERGENCY" => Some(AlertLevel::Emergency),
            _ => None,
        }
    }

    /// Priority from the standard registry
    pub fn priority(&self) -> u8 {
        registry().priority(*self)
    }

    /// Default action text from the standard registry
    pub fn default_action(&self) -> &'static str {
        registry().action(*self)
    }

    /// Presentation colour from the standard registry
    pub fn color(&self) -> &'static str {
        registry().color(*self)
    }

    /// True for the levels that require immediate attention
    pub fn is_urgent(&self) -> bool {
        matches!(self, AlertLevel::Critical | AlertLevel::Emergency)
    }

    fn index(&self) -> usize {
        *self as usize
    }
}

impl Default for AlertLevel {
    fn default() -> Self {
        AlertLevel::Normal
    }
}

impl std::fmt::Display for AlertLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// One row of the severity table
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct LevelEntry {
    pub level: AlertLevel,
    pub priority: u8,
    pub action: &'static str,
    pub color: &'static str,
}

/// Built-in severity table
pub const STANDARD_LEVELS: [LevelEntry; 5] = [
    LevelEntry {
        level: AlertLevel::Normal,
        priority: 0,
        action: "Continue monitoring",
        color: "green",
    },
    LevelEntry {
        level: AlertLevel::Caution,
        priority: 1,
        action: "Increased monitoring",
        color: "yellow",
    },
    LevelEntry {
        level: AlertLevel::Warning,
        priority: 2,
        action: "Medical consultation recommended",
        color: "orange",
    },
    LevelEntry {
        level: AlertLevel::Critical,
        priority: 3,
        action: "IMMEDIATE medical attention required",
        color: "red",
    },
    LevelEntry {
        level: AlertLevel::Emergency,
        priority: 4,
        action: "CALL EMERGENCY SERVICES",
        color: "darkred",
    },
];

static REGISTRY: Lazy<AlertLevelRegistry> = Lazy::new(|| {
    AlertLevelRegistry::from_table(&STANDARD_LEVELS)
        .expect("built-in alert level table must have distinct increasing priorities")
});

/// Process-wide registry built from [`STANDARD_LEVELS`]
///
/// First access validates the table; an invalid table is fatal.
pub fn registry() -> &'static AlertLevelRegistry {
    &REGISTRY
}

/// Validated, read-only severity table
///
/// Guarantees one entry per [`AlertLevel`] with priorities strictly
/// increasing from NORMAL to EMERGENCY, so priority lookups are unique.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlertLevelRegistry {
    // Indexed by AlertLevel discriminant
    entries: Vec<LevelEntry>,
}

impl AlertLevelRegistry {
    /// Build a registry from a table of entries (any row order)
    ///
    /// # Errors
    ///
    /// `Error::Config` if a level is missing or repeated, if two levels share
    /// a priority, or if priorities do not increase with severity.
    pub fn from_table(table: &[LevelEntry]) -> Result<Self> {
        let mut slots: Vec<Option<LevelEntry>> = vec![None; AlertLevel::all_variants().len()];

        for entry in table {
            let slot = &mut slots[entry.level.index()];
            if slot.is_some() {
                return Err(Error::Config(format!(
                    "alert level {} registered more than once",
                    entry.level
                )));
            }
            *slot = Some(*entry);
        }

        let mut entries = Vec::with_capacity(slots.len());
        for (slot, level) in slots.into_iter().zip(AlertLevel::all_variants()) {
            match slot {
                Some(entry) => entries.push(entry),
                None => {
                    return Err(Error::Config(format!(
                        "alert level {} has no registry entry",
                        level
                    )))
                }
            }
        }

        for pair in entries.windows(2) {
            let (lower, higher) = (&pair[0], &pair[1]);
            if lower.priority == higher.priority {
                return Err(Error::Config(format!(
                    "duplicate priority {} for {} and {}",
                    lower.priority, lower.level, higher.level
                )));
            }
            if higher.priority < lower.priority {
                return Err(Error::Config(format!(
                    "priority of {} ({}) must exceed priority of {} ({})",
                    higher.level, higher.priority, lower.level, lower.priority
                )));
            }
        }

        Ok(Self { entries })
    }

    /// Full entry for a level
    pub fn entry(&self, level: AlertLevel) -> &LevelEntry {
        &self.entries[level.index()]
    }

    pub fn priority(&self, level: AlertLevel) -> u8 {
        self.entry(level).priority
    }

    pub fn action(&self, level: AlertLevel) -> &'static str {
        self.entry(level).action
    }

    pub fn color(&self, level: AlertLevel) -> &'static str {
        self.entry(level).color
    }

    /// The unique level registered with `priority`, if any
    pub fn level_for_priority(&self, priority: u8) -> Option<AlertLevel> {
        self.entries
            .iter()
            .find(|entry| entry.priority == priority)
            .map(|entry| entry.level)
    }

    /// Entries from least to most severe
    pub fn entries(&self) -> &[LevelEntry] {
        &self.entries
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_priorities_are_zero_to_four() {
        let priorities: Vec<u8> = AlertLevel::all_variants()
            .iter()
            .map(|level| level.priority())
            .collect();
        assert_eq!(priorities, vec![0, 1, 2, 3, 4]);
    }

    #[test]
    fn test_priority_lookup_round_trips() {
        for level in AlertLevel::all_variants() {
            assert_eq!(
                registry().level_for_priority(level.priority()),
                Some(*level)
            );
        }
        assert_eq!(registry().level_for_priority(5), None);
    }

    #[test]
    fn test_default_actions() {
        assert_eq!(AlertLevel::Normal.default_action(), "Continue monitoring");
        assert_eq!(
            AlertLevel::Critical.default_action(),
            "IMMEDIATE medical attention required"
        );
        assert_eq!(AlertLevel::Emergency.default_action(), "CALL EMERGENCY SERVICES");
    }

    #[test]
    fn test_ord_matches_priority() {
        let mut sorted = AlertLevel::all_variants().to_vec();
        sorted.sort_by_key(|level| level.priority());
        assert_eq!(sorted, AlertLevel::all_variants());
        assert!(AlertLevel::Emergency > AlertLevel::Critical);
    }

    #[test]
    fn test_table_row_order_does_not_matter() {
        let mut table = STANDARD_LEVELS;
        table.reverse();
        let registry = AlertLevelRegistry::from_table(&table).unwrap();
        assert_eq!(registry.entries(), &STANDARD_LEVELS[..]);
    }

    #[test]
    fn test_duplicate_priority_rejected() {
        let mut table = STANDARD_LEVELS;
        table[2].priority = 1;
        let err = AlertLevelRegistry::from_table(&table).unwrap_err();
        assert!(matches!(err, Error::Config(_)));
        assert!(err.to_string().contains("duplicate priority 1"));
    }

    #[test]
    fn test_non_monotonic_priority_rejected() {
        let mut table = STANDARD_LEVELS;
        table[3].priority = 9;
        let err = AlertLevelRegistry::from_table(&table).unwrap_err();
        assert!(err.to_string().contains("must exceed"));
    }

    #[test]
    fn test_missing_and_repeated_levels_rejected() {
        assert!(AlertLevelRegistry::from_table(&STANDARD_LEVELS[..4]).is_err());

        let mut table = STANDARD_LEVELS.to_vec();
        table.push(STANDARD_LEVELS[0]);
        let err = AlertLevelRegistry::from_table(&table).unwrap_err();
        assert!(err.to_string().contains("more than once"));
    }

    #[test]
    fn test_parse_and_display() {
        assert_eq!(AlertLevel::from_str("warning"), Some(AlertLevel::Warning));
        assert_eq!(AlertLevel::from_str(" CRITICAL "), Some(AlertLevel::Critical));
        assert_eq!(AlertLevel::from_str("severe"), None);
        assert_eq!(AlertLevel::Caution.to_string(), "CAUTION");
    }

    #[test]
    fn test_serde_uses_upper_case_names() {
        let json = serde_json::to_string(&AlertLevel::Emergency).unwrap();
        assert_eq!(json, "\"EMERGENCY\"");
        let parsed: AlertLevel = serde_json::from_str("\"CAUTION\"").unwrap();
        assert_eq!(parsed, AlertLevel::Caution);
    }
}

//! Severity aggregation
//!
//! The overall level is the registry level whose priority equals the
//! maximum priority over the present findings. Absent findings contribute
//! the NORMAL priority without needing a finding object.
//!
//! Ties at the maximum do not affect the level, which depends on priority
//! alone. For naming a primary finding, ties resolve by source precedence:
//! heart rate, then rhythm, then RR variability.

use crate::alert_level::{AlertLevel, AlertLevelRegistry};
use crate::finding::Finding;

/// Maximum priority across `findings`, floored at the NORMAL priority
pub fn overall_priority(registry: &AlertLevelRegistry, findings: &[Finding]) -> u8 {
    findings
        .iter()
        .map(|finding| registry.priority(finding.level))
        .fold(registry.priority(AlertLevel::Normal), u8::max)
}

/// Overall alert level for a set of findings
pub fn aggregate_level(registry: &AlertLevelRegistry, findings: &[Finding]) -> AlertLevel {
    let priority = overall_priority(registry, findings);
    // Every candidate priority came from the registry, so the lookup succeeds
    registry
        .level_for_priority(priority)
        .unwrap_or(AlertLevel::Normal)
}

/// Finding that names the overall level
///
/// Highest priority wins; equal priorities go to the earlier source in
/// [`FindingSource`](crate::finding::FindingSource) order.
pub fn primary_finding<'a>(
    registry: &AlertLevelRegistry,
    findings: &'a [Finding],
) -> Option<&'a Finding> {
    findings.iter().min_by(|a, b| {
        registry
            .priority(b.level)
            .cmp(&registry.priority(a.level))
            .then_with(|| a.source().cmp(&b.source()))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::alert_level::{registry, LevelEntry, STANDARD_LEVELS};
    use crate::finding::FindingKind;

    fn finding(kind: FindingKind, level: AlertLevel) -> Finding {
        Finding::new(kind, level, "", "")
    }

    #[test]
    fn test_no_findings_is_normal() {
        assert_eq!(overall_priority(registry(), &[]), 0);
        assert_eq!(aggregate_level(registry(), &[]), AlertLevel::Normal);
    }

    #[test]
    fn test_maximum_priority_wins() {
        let findings = vec![
            finding(FindingKind::SevereTachycardia, AlertLevel::Critical),
            finding(FindingKind::AtrialArrhythmia, AlertLevel::Caution),
        ];
        assert_eq!(overall_priority(registry(), &findings), 3);
        assert_eq!(aggregate_level(registry(), &findings), AlertLevel::Critical);
    }

    #[test]
    fn test_normal_iff_no_positive_priority() {
        let normal = vec![
            finding(FindingKind::NormalHeartRate, AlertLevel::Normal),
            finding(FindingKind::NormalRhythm, AlertLevel::Normal),
        ];
        assert_eq!(aggregate_level(registry(), &normal), AlertLevel::Normal);

        for level in &AlertLevel::all_variants()[1..] {
            let mut findings = normal.clone();
            findings.push(finding(FindingKind::IrregularRhythm, *level));
            assert_eq!(aggregate_level(registry(), &findings), *level);
        }
    }

    #[test]
    fn test_emergency_is_supported() {
        let findings = vec![
            finding(FindingKind::SevereBradycardia, AlertLevel::Critical),
            finding(FindingKind::FrequentVentricularEctopics, AlertLevel::Emergency),
        ];
        assert_eq!(aggregate_level(registry(), &findings), AlertLevel::Emergency);
    }

    #[test]
    fn test_primary_finding_tie_breaks_by_source() {
        let findings = vec![
            finding(FindingKind::IrregularRhythm, AlertLevel::Warning),
            finding(FindingKind::VentricularEctopics, AlertLevel::Warning),
            finding(FindingKind::Bradycardia, AlertLevel::Warning),
        ];
        let primary = primary_finding(registry(), &findings).unwrap();
        assert_eq!(primary.kind, FindingKind::Bradycardia);
    }

    #[test]
    fn test_primary_finding_prefers_priority_over_source() {
        let findings = vec![
            finding(FindingKind::NormalHeartRate, AlertLevel::Normal),
            finding(FindingKind::AtrialArrhythmia, AlertLevel::Caution),
        ];
        let primary = primary_finding(registry(), &findings).unwrap();
        assert_eq!(primary.kind, FindingKind::AtrialArrhythmia);
        assert!(primary_finding(registry(), &[]).is_none());
    }

    #[test]
    fn test_custom_registry_floor() {
        let table: Vec<LevelEntry> = STANDARD_LEVELS
            .iter()
            .map(|entry| LevelEntry {
                priority: entry.priority + 10,
                ..*entry
            })
            .collect();
        let custom = AlertLevelRegistry::from_table(&table).unwrap();
        assert_eq!(overall_priority(&custom, &[]), 10);
        assert_eq!(aggregate_level(&custom, &[]), AlertLevel::Normal);

        let findings = vec![finding(FindingKind::Tachycardia, AlertLevel::Warning)];
        assert_eq!(aggregate_level(&custom, &findings), AlertLevel::Warning);
    }
}

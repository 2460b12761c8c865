use std::collections::BTreeSet;

use serde::Serialize;

use crate::domain::finding::InspectionFinding;

/// Roll-up statistics over a finding collection, used for at-a-glance
/// report headers. Purely derived; no independent lifecycle.
///
/// Distinct values are held sorted so the derived display strings do not
/// depend on the arrival order of the findings.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SummaryStatistics {
    /// Number of distinct spans carrying findings
    pub span_count: usize,

    /// Distinct damage levels, sorted
    pub damage_levels: Vec<String>,

    /// Distinct materials, sorted
    pub materials: Vec<String>,

    /// Distinct work-kinds, sorted
    pub work_kinds: Vec<String>,
}

impl SummaryStatistics {
    pub fn damage_levels_display(&self) -> String {
        self.damage_levels.join(", ")
    }

    pub fn materials_display(&self) -> String {
        self.materials.join(", ")
    }

    pub fn work_kinds_display(&self) -> String {
        self.work_kinds.join(", ")
    }
}

/// Derive summary statistics from a finding collection.
///
/// Pure function, no I/O. Blank or missing dimension values do not join
/// the distinct sets; grouping still surfaces those findings under "N/A".
pub fn summarize(findings: &[InspectionFinding]) -> SummaryStatistics {
    let mut spans = BTreeSet::new();
    let mut damage_levels = BTreeSet::new();
    let mut materials = BTreeSet::new();
    let mut work_kinds = BTreeSet::new();

    for finding in findings {
        if let Some(span) = non_blank(finding.span_index.as_deref()) {
            spans.insert(span);
        }
        if let Some(level) = non_blank(Some(&finding.damage_level)) {
            damage_levels.insert(level);
        }
        if let Some(material) = non_blank(Some(&finding.material_name)) {
            materials.insert(material);
        }
        if let Some(kind) = non_blank(finding.work_kind.as_deref()) {
            work_kinds.insert(kind);
        }
    }

    SummaryStatistics {
        span_count: spans.len(),
        damage_levels: damage_levels.into_iter().collect(),
        materials: materials.into_iter().collect(),
        work_kinds: work_kinds.into_iter().collect(),
    }
}

fn non_blank(value: Option<&str>) -> Option<String> {
    match value {
        Some(v) if !v.trim().is_empty() => Some(v.to_string()),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn finding(span: Option<&str>, kind: Option<&str>, material: &str, level: &str) -> InspectionFinding {
        InspectionFinding::new(
            Uuid::new_v4(),
            span.map(str::to_string),
            kind.map(str::to_string),
            "Girder".to_string(),
            material.to_string(),
            "Corrosion".to_string(),
            level.to_string(),
            "15%".to_string(),
        )
    }

    #[test]
    fn test_empty_input_yields_empty_aggregates() {
        let stats = summarize(&[]);

        assert_eq!(stats.span_count, 0);
        assert_eq!(stats.damage_levels_display(), "");
        assert_eq!(stats.materials_display(), "");
        assert_eq!(stats.work_kinds_display(), "");
    }

    #[test]
    fn test_distinct_counting() {
        let findings = vec![
            finding(Some("1"), Some("Deck"), "Steel", "c"),
            finding(Some("1"), Some("Deck"), "Steel", "c"),
            finding(Some("2"), Some("Substructure"), "Concrete", "b"),
        ];

        let stats = summarize(&findings);

        assert_eq!(stats.span_count, 2);
        assert_eq!(stats.damage_levels, vec!["b", "c"]);
        assert_eq!(stats.materials, vec!["Concrete", "Steel"]);
        assert_eq!(stats.work_kinds, vec!["Deck", "Substructure"]);
        assert_eq!(stats.damage_levels_display(), "b, c");
    }

    #[test]
    fn test_invariant_under_reordering() {
        let a = finding(Some("1"), Some("Deck"), "Steel", "c");
        let b = finding(Some("2"), Some("Substructure"), "Concrete", "b");
        let c = finding(Some("3"), Some("Deck"), "Wood", "a");

        let forward = summarize(&[a.clone(), b.clone(), c.clone()]);
        let backward = summarize(&[c, b, a]);

        assert_eq!(forward, backward);
    }

    #[test]
    fn test_blank_keys_do_not_join_the_sets() {
        let findings = vec![
            finding(None, Some(" "), "Steel", "c"),
            finding(Some("1"), Some("Deck"), "Steel", "c"),
        ];

        let stats = summarize(&findings);

        assert_eq!(stats.span_count, 1);
        assert_eq!(stats.work_kinds, vec!["Deck"]);
    }

    #[test]
    fn test_single_span_example() {
        // 2 findings on span 1 yield span-count 1
        let findings = vec![
            finding(Some("1"), Some("Deck"), "Steel", "c"),
            finding(Some("1"), Some("Deck"), "Steel", "c"),
        ];

        assert_eq!(summarize(&findings).span_count, 1);
    }
}

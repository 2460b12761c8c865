use serde::Serialize;

use crate::domain::finding::InspectionFinding;

/// Bucket label for findings whose span or work-kind key is missing.
/// Defensive defaulting replaces failure: no finding is ever dropped.
pub const UNKNOWN_BUCKET: &str = "N/A";

/// Derived, disposable two-level index over a finding collection:
/// span-key → work-kind-key → ordered findings.
///
/// Rebuilt on every fetch and never persisted. Keys appear in first-seen
/// order; findings within a bucket keep arrival order from the store.
#[derive(Debug, Clone, Default, Serialize)]
pub struct GroupedFindingIndex {
    pub spans: Vec<SpanGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SpanGroup {
    pub span_label: String,
    pub work_kinds: Vec<WorkKindGroup>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkKindGroup {
    pub label: String,
    pub findings: Vec<InspectionFinding>,
}

impl GroupedFindingIndex {
    /// Findings in the bucket at (span, work-kind), if present
    pub fn bucket(&self, span_label: &str, work_kind: &str) -> Option<&[InspectionFinding]> {
        self.spans
            .iter()
            .find(|s| s.span_label == span_label)?
            .work_kinds
            .iter()
            .find(|k| k.label == work_kind)
            .map(|k| k.findings.as_slice())
    }

    /// Total findings across all buckets
    pub fn total_findings(&self) -> usize {
        self.spans
            .iter()
            .flat_map(|s| &s.work_kinds)
            .map(|k| k.findings.len())
            .sum()
    }

    pub fn is_empty(&self) -> bool {
        self.spans.is_empty()
    }

    fn span_entry(&mut self, label: &str) -> &mut SpanGroup {
        if let Some(idx) = self.spans.iter().position(|s| s.span_label == label) {
            return &mut self.spans[idx];
        }
        self.spans.push(SpanGroup {
            span_label: label.to_string(),
            work_kinds: Vec::new(),
        });
        self.spans.last_mut().unwrap()
    }
}

impl SpanGroup {
    fn kind_entry(&mut self, label: &str) -> &mut WorkKindGroup {
        if let Some(idx) = self.work_kinds.iter().position(|k| k.label == label) {
            return &mut self.work_kinds[idx];
        }
        self.work_kinds.push(WorkKindGroup {
            label: label.to_string(),
            findings: Vec::new(),
        });
        self.work_kinds.last_mut().unwrap()
    }
}

/// Partition a flat finding collection into the two-level index.
///
/// Single pass; missing or blank keys coerce to [`UNKNOWN_BUCKET`] so the
/// union of all buckets equals the input exactly.
pub fn group(findings: Vec<InspectionFinding>) -> GroupedFindingIndex {
    let mut index = GroupedFindingIndex::default();

    for finding in findings {
        let span_label = bucket_label(finding.span_index.as_deref());
        let kind_label = bucket_label(finding.work_kind.as_deref());

        index
            .span_entry(&span_label)
            .kind_entry(&kind_label)
            .findings
            .push(finding);
    }

    index
}

fn bucket_label(key: Option<&str>) -> String {
    match key {
        Some(value) if !value.trim().is_empty() => value.to_string(),
        _ => UNKNOWN_BUCKET.to_string(),
    }
}

// src/application/dto/mod.rs
//
// Data Transfer Objects
//
// CRITICAL PRINCIPLES:
// - DTOs are UI-friendly representations
// - DTOs NEVER leak domain invariants
// - DTOs are simple, serializable structs
// - Conversion FROM domain entities only (never TO)

use serde::{Deserialize, Serialize};

use crate::domain::finding::{FindingPartition, InspectionFinding};
use crate::domain::grouping::{GroupedFindingIndex, SpanGroup, WorkKindGroup};
use crate::domain::summary::SummaryStatistics;
use crate::services::{ExportOutcome, GroupedPartition};

// ============================================================================
// FINDING DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingDto {
    pub id: String,
    pub bridge_id: String,
    pub span_index: Option<String>,
    pub work_kind: Option<String>,
    pub part_name: String,
    pub material_name: String,
    pub damage_kind: String,
    pub damage_level: String,
    pub damage_extent: String,
    pub situation_remarks: Option<String>,
    pub photos: Vec<String>,
    pub consultant_remarks: Option<String>,
    pub consultant_status: String,
    pub oversight_remarks: Option<String>,
    pub oversight_status: String,
    pub evaluator_remarks: Option<String>,
    pub finalized: bool,
    pub created_at: String,
    pub updated_at: String,
}

impl From<InspectionFinding> for FindingDto {
    fn from(finding: InspectionFinding) -> Self {
        Self {
            id: finding.id.to_string(),
            bridge_id: finding.bridge_id.to_string(),
            span_index: finding.span_index,
            work_kind: finding.work_kind,
            part_name: finding.part_name,
            material_name: finding.material_name,
            damage_kind: finding.damage_kind,
            damage_level: finding.damage_level,
            damage_extent: finding.damage_extent,
            situation_remarks: finding.situation_remarks,
            photos: finding.photos,
            consultant_remarks: finding.consultant_remarks,
            consultant_status: finding.consultant_status.to_string(),
            oversight_remarks: finding.oversight_remarks,
            oversight_status: finding.oversight_status.to_string(),
            evaluator_remarks: finding.evaluator_remarks,
            finalized: finding.finalized,
            created_at: finding.created_at.to_rfc3339(),
            updated_at: finding.updated_at.to_rfc3339(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingPartitionDto {
    pub pending: Vec<FindingDto>,
    pub approved: Vec<FindingDto>,
    pub unapproved: Vec<FindingDto>,
}

impl From<FindingPartition> for FindingPartitionDto {
    fn from(partition: FindingPartition) -> Self {
        Self {
            pending: partition.pending.into_iter().map(FindingDto::from).collect(),
            approved: partition
                .approved
                .into_iter()
                .map(FindingDto::from)
                .collect(),
            unapproved: partition
                .unapproved
                .into_iter()
                .map(FindingDto::from)
                .collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubmitReviewDto {
    pub finding_id: String,
    /// "consultant", "oversight" or "evaluator"
    pub role: String,
    pub remarks: String,
    /// "approved" or "unapproved"; absent for evaluator submissions
    pub status: Option<String>,
}

// ============================================================================
// GROUPED VIEW DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkKindGroupDto {
    pub label: String,
    pub findings: Vec<FindingDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanGroupDto {
    pub span_label: String,
    pub work_kinds: Vec<WorkKindGroupDto>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedIndexDto {
    pub spans: Vec<SpanGroupDto>,
}

impl From<WorkKindGroup> for WorkKindGroupDto {
    fn from(group: WorkKindGroup) -> Self {
        Self {
            label: group.label,
            findings: group.findings.into_iter().map(FindingDto::from).collect(),
        }
    }
}

impl From<SpanGroup> for SpanGroupDto {
    fn from(group: SpanGroup) -> Self {
        Self {
            span_label: group.span_label,
            work_kinds: group
                .work_kinds
                .into_iter()
                .map(WorkKindGroupDto::from)
                .collect(),
        }
    }
}

impl From<GroupedFindingIndex> for GroupedIndexDto {
    fn from(index: GroupedFindingIndex) -> Self {
        Self {
            spans: index.spans.into_iter().map(SpanGroupDto::from).collect(),
        }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GroupedPartitionDto {
    pub pending: GroupedIndexDto,
    pub approved: GroupedIndexDto,
    pub unapproved: GroupedIndexDto,
}

impl From<GroupedPartition> for GroupedPartitionDto {
    fn from(partition: GroupedPartition) -> Self {
        Self {
            pending: partition.pending.into(),
            approved: partition.approved.into(),
            unapproved: partition.unapproved.into(),
        }
    }
}

// ============================================================================
// SUMMARY DTOs
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SummaryDto {
    pub span_count: usize,
    pub damage_levels: String,
    pub materials: String,
    pub work_kinds: String,
}

impl From<SummaryStatistics> for SummaryDto {
    fn from(stats: SummaryStatistics) -> Self {
        Self {
            span_count: stats.span_count,
            damage_levels: stats.damage_levels_display(),
            materials: stats.materials_display(),
            work_kinds: stats.work_kinds_display(),
        }
    }
}

// ============================================================================
// EXPORT DTOs
// ============================================================================

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ExportRequestDto {
    pub dataset_name: String,
    /// "csv" or "workbook"
    pub format: String,
    pub district: Option<String>,
    pub structure_type: Option<String>,
    pub name_contains: Option<String>,
    pub length_min: Option<f64>,
    pub length_max: Option<f64>,
    pub age_min: Option<f64>,
    pub age_max: Option<f64>,
    pub category: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportResultDto {
    pub file_name: String,
    pub path: String,
    pub rows: usize,
    pub images_embedded: usize,
    pub images_failed: usize,
}

impl From<ExportOutcome> for ExportResultDto {
    fn from(outcome: ExportOutcome) -> Self {
        Self {
            file_name: outcome.file_name,
            path: outcome.path.display().to_string(),
            rows: outcome.rows,
            images_embedded: outcome.images_embedded,
            images_failed: outcome.images_failed,
        }
    }
}

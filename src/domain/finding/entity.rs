use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One observed defect/condition record tied to a structure.
/// This is the root entity of the review pipeline.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InspectionFinding {
    /// Internal immutable identifier
    pub id: Uuid,

    /// Structure this finding belongs to
    pub bridge_id: Uuid,

    /// Structural span the finding was observed on.
    /// Missing on some legacy survey records; grouping coerces to "N/A".
    pub span_index: Option<String>,

    /// Category of work / element group. Same legacy caveat as `span_index`.
    pub work_kind: Option<String>,

    /// Element the damage was observed on
    pub part_name: String,

    /// Material of the element
    pub material_name: String,

    /// Kind of damage observed
    pub damage_kind: String,

    /// Damage severity level
    pub damage_level: String,

    /// Extent of the damage (percentage-like free text from the survey)
    pub damage_extent: String,

    /// Free-form situation remarks from the field survey
    pub situation_remarks: Option<String>,

    /// Ordered photo reference URIs
    pub photos: Vec<String>,

    /// Consultant review slot
    pub consultant_remarks: Option<String>,
    pub consultant_status: ReviewStatus,

    /// Oversight-body review slot
    pub oversight_remarks: Option<String>,
    pub oversight_status: ReviewStatus,

    /// Evaluator remarks. Presence together with `finalized` is the
    /// terminal state; the evaluator has no tri-state status.
    pub evaluator_remarks: Option<String>,

    /// Set by the store when an evaluation record has been inserted
    pub finalized: bool,

    /// Creation timestamp
    pub created_at: DateTime<Utc>,

    /// Last update timestamp
    pub updated_at: DateTime<Utc>,
}

impl InspectionFinding {
    /// Create a new finding as ingested from a field survey.
    /// Review slots start empty; grouping keys are immutable afterwards.
    pub fn new(
        bridge_id: Uuid,
        span_index: Option<String>,
        work_kind: Option<String>,
        part_name: String,
        material_name: String,
        damage_kind: String,
        damage_level: String,
        damage_extent: String,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            bridge_id,
            span_index,
            work_kind,
            part_name,
            material_name,
            damage_kind,
            damage_level,
            damage_extent,
            situation_remarks: None,
            photos: Vec::new(),
            consultant_remarks: None,
            consultant_status: ReviewStatus::Unset,
            oversight_remarks: None,
            oversight_status: ReviewStatus::Unset,
            evaluator_remarks: None,
            finalized: false,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Per-role review status.
///
/// Legal submission targets are `Approved` and `Unapproved`;
/// `Unset` only ever appears on findings the role has not acted on.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ReviewStatus {
    Unset,
    Unapproved,
    Approved,
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ReviewStatus::Unset => write!(f, "unset"),
            ReviewStatus::Unapproved => write!(f, "unapproved"),
            ReviewStatus::Approved => write!(f, "approved"),
        }
    }
}

/// Role-scoped read partition as computed server-side.
/// Consumed as three pre-partitioned arrays, never re-derived client-side.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct FindingPartition {
    /// Awaiting the requesting role's action
    pub pending: Vec<InspectionFinding>,
    pub approved: Vec<InspectionFinding>,
    /// Rejected by the requesting role (role-scoped, not global)
    pub unapproved: Vec<InspectionFinding>,
}

impl FindingPartition {
    pub fn total(&self) -> usize {
        self.pending.len() + self.approved.len() + self.unapproved.len()
    }
}

/// Evaluator-owned snapshot of a finding, inserted at adjudication time.
///
/// This is an insert of a new record referencing the original finding,
/// never an in-place mutation; the consultant and oversight fields on the
/// original stay visible for traceability.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationRecord {
    pub id: Uuid,
    pub finding_id: Uuid,
    pub bridge_id: Uuid,

    // Copy-forward of the location keys and observation fields at the
    // moment of adjudication
    pub span_index: Option<String>,
    pub work_kind: Option<String>,
    pub part_name: String,
    pub material_name: String,
    pub damage_kind: String,
    pub damage_level: String,
    pub damage_extent: String,

    /// Evaluator remarks; always non-empty (an empty evaluation is invalid)
    pub remarks: String,

    pub evaluated_by: String,
    pub evaluated_at: DateTime<Utc>,
}

impl EvaluationRecord {
    /// Snapshot the finding into a new evaluator-owned record.
    pub fn from_finding(finding: &InspectionFinding, remarks: String, evaluated_by: String) -> Self {
        Self {
            id: Uuid::new_v4(),
            finding_id: finding.id,
            bridge_id: finding.bridge_id,
            span_index: finding.span_index.clone(),
            work_kind: finding.work_kind.clone(),
            part_name: finding.part_name.clone(),
            material_name: finding.material_name.clone(),
            damage_kind: finding.damage_kind.clone(),
            damage_level: finding.damage_level.clone(),
            damage_extent: finding.damage_extent.clone(),
            remarks,
            evaluated_by,
            evaluated_at: Utc::now(),
        }
    }
}

// src/domain/mod.rs
//
// Domain Root - The Single Source of Truth for Domain API
//
// This file MUST declare all domain modules and re-export their public API.
// All other modules import from `crate::domain::*`

// ============================================================================
// MODULE DECLARATIONS
// ============================================================================

pub mod export;
pub mod finding;
pub mod grouping;
pub mod review;
pub mod summary;

// ============================================================================
// PUBLIC API RE-EXPORTS
// ============================================================================

// Finding Domain
pub use finding::{
    normalize_remarks, validate_finding, EvaluationRecord, FindingPartition, InspectionFinding,
    ReviewStatus,
};

// Review Domain
pub use review::{
    plan_review, ReviewRole, ReviewSubmission, ReviewWrite, ReviewerIdentity, RoleScopedFields,
};

// Grouping Domain (Derived Data)
pub use grouping::{group, GroupedFindingIndex, SpanGroup, WorkKindGroup, UNKNOWN_BUCKET};

// Summary Domain (Derived Data)
pub use summary::{summarize, SummaryStatistics};

// Export Domain
pub use export::{
    derive_columns, photo_cells, CancelFlag, ExportCriteria, ExportFormat, PhotoCategory,
    PhotoCell, RangeFilter, SheetLayout, PHOTO_CATEGORIES,
};

// ============================================================================
// DOMAIN ERROR TYPES
// ============================================================================

use thiserror::Error;

/// Domain-level errors
/// These represent violations of business rules and invariants
#[derive(Debug, Error)]
pub enum DomainError {
    #[error("Invariant violation: {0}")]
    InvariantViolation(String),

    #[error("Role {role} may not write {field}")]
    RoleNotPermitted { role: String, field: String },

    #[error("Finding {0} has been finalized and is read-only")]
    AlreadyFinalized(uuid::Uuid),

    #[error("Invalid state transition: {0}")]
    InvalidStateTransition(String),

    #[error("Entity not found: {0}")]
    NotFound(String),
}

/// Domain result type
pub type DomainResult<T> = Result<T, DomainError>;

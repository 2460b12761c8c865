// src/lib.rs
// Bridgescope - Structure inspection review and reporting core
//
// Architecture:
// - Domain-centric: review rules, grouping, aggregation and sheet layout
//   are pure and live in `domain`
// - Store-backed: the inspection record store is a remote collaborator,
//   reached through repository traits
// - Explicit: the acting identity is injected per call, never read from
//   ambient storage
// - Application Layer: UI boundary (commands + DTOs)

// ============================================================================
// CORE MODULES
// ============================================================================

pub mod domain;
pub mod error;
pub mod events;
pub mod infrastructure;
pub mod repositories;
pub mod services;

// ============================================================================
// APPLICATION LAYER
// ============================================================================

pub mod application;
pub mod integrations;

// ============================================================================
// PUBLIC API - Domain Types
// ============================================================================

pub use domain::{
    group,
    normalize_remarks,
    plan_review,
    summarize,
    validate_finding,
    // Export
    CancelFlag,
    // Finding
    EvaluationRecord,
    ExportCriteria,
    ExportFormat,
    FindingPartition,
    // Grouping
    GroupedFindingIndex,
    InspectionFinding,
    RangeFilter,
    // Review
    ReviewRole,
    ReviewStatus,
    ReviewSubmission,
    ReviewWrite,
    ReviewerIdentity,
    RoleScopedFields,
    SpanGroup,
    // Summary
    SummaryStatistics,
    WorkKindGroup,
    UNKNOWN_BUCKET,
};

// ============================================================================
// PUBLIC API - Error Types
// ============================================================================

pub use error::{AppError, AppResult};

// ============================================================================
// PUBLIC API - Events
// ============================================================================

pub use events::{
    create_event_bus, DomainEvent, EventBus, EventLogEntry, ExportCompleted, FindingFinalized,
    ReviewSubmitted,
};

// ============================================================================
// PUBLIC API - Repositories
// ============================================================================

pub use repositories::{
    DatasetRepository, FindingRepository, HttpDatasetRepository, HttpFindingRepository,
    StoreConfig,
};

// ============================================================================
// PUBLIC API - Infrastructure
// ============================================================================

pub use infrastructure::ExportWorkspace;

// ============================================================================
// PUBLIC API - Services
// ============================================================================

pub use services::{
    ExportOutcome, ExportService, GroupedPartition, ReportService, ReviewService,
    DEFAULT_FETCH_CONCURRENCY,
};

// ============================================================================
// PUBLIC API - Application Layer
// ============================================================================

pub use application::AppState;

// Re-export application submodules
pub use application::commands;
pub use application::dto;

// ============================================================================
// PUBLIC API - Integrations
// ============================================================================

pub use integrations::{HttpPhotoClient, PhotoClientConfig, PhotoFetcher};

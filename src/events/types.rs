// src/events/types.rs
//
// All domain events in the system.
// Each event represents an immutable fact that has already occurred.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::ReviewRole;

/// Trait that all domain events must implement
pub trait DomainEvent: std::fmt::Debug + Clone {
    /// Unique identifier for this event instance
    fn event_id(&self) -> Uuid;

    /// When this event occurred
    fn occurred_at(&self) -> DateTime<Utc>;

    /// Human-readable event type name
    fn event_type(&self) -> &'static str;
}

// ============================================================================
// REVIEW EVENTS
// ============================================================================

/// Emitted after a consultant or oversight review write is accepted
/// by the store
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewSubmitted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub finding_id: Uuid,
    pub bridge_id: Uuid,
    pub role: ReviewRole,
}

impl ReviewSubmitted {
    pub fn new(finding_id: Uuid, bridge_id: Uuid, role: ReviewRole) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            finding_id,
            bridge_id,
            role,
        }
    }
}

impl DomainEvent for ReviewSubmitted {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ReviewSubmitted"
    }
}

/// Emitted after the evaluator's snapshot record has been inserted
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FindingFinalized {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub finding_id: Uuid,
    pub bridge_id: Uuid,
    pub evaluation_id: Uuid,
}

impl FindingFinalized {
    pub fn new(finding_id: Uuid, bridge_id: Uuid, evaluation_id: Uuid) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            finding_id,
            bridge_id,
            evaluation_id,
        }
    }
}

impl DomainEvent for FindingFinalized {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "FindingFinalized"
    }
}

// ============================================================================
// EXPORT EVENTS
// ============================================================================

/// Emitted when an export job has produced its artifact
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExportCompleted {
    pub event_id: Uuid,
    pub occurred_at: DateTime<Utc>,
    pub format: String,
    pub rows: usize,
    pub images_embedded: usize,
    pub images_failed: usize,
}

impl ExportCompleted {
    pub fn new(format: String, rows: usize, images_embedded: usize, images_failed: usize) -> Self {
        Self {
            event_id: Uuid::new_v4(),
            occurred_at: Utc::now(),
            format,
            rows,
            images_embedded,
            images_failed,
        }
    }
}

impl DomainEvent for ExportCompleted {
    fn event_id(&self) -> Uuid {
        self.event_id
    }
    fn occurred_at(&self) -> DateTime<Utc> {
        self.occurred_at
    }
    fn event_type(&self) -> &'static str {
        "ExportCompleted"
    }
}

// src/services/review_service.rs
use std::sync::Arc;

use uuid::Uuid;

use crate::domain::review::{plan_review, ReviewSubmission, ReviewWrite, ReviewerIdentity};
use crate::domain::finding::FindingPartition;
use crate::error::{AppError, AppResult};
use crate::events::{EventBus, FindingFinalized, ReviewSubmitted};
use crate::repositories::FindingRepository;

/// Orchestrates the review state machine against the store.
///
/// The service checks submissions against store truth (not the caller's
/// possibly-stale copy), dispatches the planned write, and returns a full
/// re-fetch of the partition so the caller reflects what the store holds.
/// On any failure nothing is written and the caller's in-memory edit stays
/// untouched.
pub struct ReviewService {
    finding_repo: Arc<dyn FindingRepository>,
    event_bus: Arc<EventBus>,
}

impl ReviewService {
    pub fn new(finding_repo: Arc<dyn FindingRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            finding_repo,
            event_bus,
        }
    }

    /// The role-scoped read partition for a bridge
    pub async fn list_partition(
        &self,
        bridge_id: Uuid,
        identity: &ReviewerIdentity,
    ) -> AppResult<FindingPartition> {
        self.finding_repo
            .partition_by_role(bridge_id, identity.role)
            .await
    }

    /// Submit a review action for one finding.
    ///
    /// Returns the freshly re-fetched partition on success; no optimistic
    /// merge ever happens.
    pub async fn submit_review(
        &self,
        identity: &ReviewerIdentity,
        finding_id: Uuid,
        submission: ReviewSubmission,
    ) -> AppResult<FindingPartition> {
        let finding = self
            .finding_repo
            .get_by_id(finding_id)
            .await?
            .ok_or(AppError::NotFound)?;

        let write = plan_review(identity, &finding, submission)?;

        match write {
            ReviewWrite::Update(fields) => {
                self.finding_repo.update_review(finding_id, &fields).await?;
                log::info!(
                    "Review updated for finding {} by {} ({})",
                    finding_id,
                    identity.name,
                    identity.role
                );
                self.event_bus.emit(ReviewSubmitted::new(
                    finding_id,
                    finding.bridge_id,
                    identity.role,
                ));
            }
            ReviewWrite::Finalize(record) => {
                let evaluation_id = record.id;
                self.finding_repo.insert_evaluation(&record).await?;
                log::info!(
                    "Finding {} finalized by {} (evaluation {})",
                    finding_id,
                    identity.name,
                    evaluation_id
                );
                self.event_bus.emit(FindingFinalized::new(
                    finding_id,
                    finding.bridge_id,
                    evaluation_id,
                ));
            }
        }

        self.finding_repo
            .partition_by_role(finding.bridge_id, identity.role)
            .await
    }
}

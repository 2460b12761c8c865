// src/services/report_service.rs
use std::collections::HashMap;
use std::sync::{Arc, RwLock};

use serde::Serialize;
use uuid::Uuid;

use crate::domain::finding::FindingPartition;
use crate::domain::grouping::{group, GroupedFindingIndex};
use crate::domain::review::ReviewerIdentity;
use crate::domain::summary::{summarize, SummaryStatistics};
use crate::error::AppResult;
use crate::events::{EventBus, FindingFinalized, ReviewSubmitted};
use crate::repositories::FindingRepository;

/// Role-scoped partition with each bucket grouped for display:
/// span → work-kind → findings, rebuilt on every fetch.
#[derive(Debug, Clone, Serialize)]
pub struct GroupedPartition {
    pub pending: GroupedFindingIndex,
    pub approved: GroupedFindingIndex,
    pub unapproved: GroupedFindingIndex,
}

/// Derives grouped views and roll-up statistics from the store.
///
/// Summary statistics are memoized per bridge and invalidated whenever a
/// review lands on that bridge.
pub struct ReportService {
    finding_repo: Arc<dyn FindingRepository>,
    event_bus: Arc<EventBus>,
    summary_cache: Arc<RwLock<HashMap<Uuid, SummaryStatistics>>>,
}

impl ReportService {
    pub fn new(finding_repo: Arc<dyn FindingRepository>, event_bus: Arc<EventBus>) -> Self {
        Self {
            finding_repo,
            event_bus,
            summary_cache: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// The role-scoped partition with each bucket grouped for display
    pub async fn grouped_partition(
        &self,
        bridge_id: Uuid,
        identity: &ReviewerIdentity,
    ) -> AppResult<GroupedPartition> {
        let FindingPartition {
            pending,
            approved,
            unapproved,
        } = self
            .finding_repo
            .partition_by_role(bridge_id, identity.role)
            .await?;

        Ok(GroupedPartition {
            pending: group(pending),
            approved: group(approved),
            unapproved: group(unapproved),
        })
    }

    /// Roll-up statistics for a bridge's findings, cached until the next
    /// review write on that bridge
    pub async fn bridge_summary(&self, bridge_id: Uuid) -> AppResult<SummaryStatistics> {
        if let Some(cached) = self.summary_cache.read().unwrap().get(&bridge_id) {
            return Ok(cached.clone());
        }

        let findings = self.finding_repo.summary_findings(bridge_id).await?;
        let stats = summarize(&findings);

        self.summary_cache
            .write()
            .unwrap()
            .insert(bridge_id, stats.clone());

        Ok(stats)
    }

    /// Invalidate the summary cache whenever a review lands
    pub fn register_event_handlers(&self) {
        let cache = Arc::clone(&self.summary_cache);
        self.event_bus.subscribe::<ReviewSubmitted, _>(move |event| {
            cache.write().unwrap().remove(&event.bridge_id);
        });

        let cache = Arc::clone(&self.summary_cache);
        self.event_bus.subscribe::<FindingFinalized, _>(move |event| {
            cache.write().unwrap().remove(&event.bridge_id);
        });
    }
}

// src/services/report_service_tests.rs

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use uuid::Uuid;

    use crate::domain::finding::{FindingPartition, InspectionFinding};
    use crate::domain::review::{ReviewRole, ReviewerIdentity};
    use crate::events::{EventBus, ReviewSubmitted};
    use crate::repositories::MockFindingRepository;
    use crate::services::ReportService;

    fn finding(bridge_id: Uuid, span: Option<&str>, kind: Option<&str>) -> InspectionFinding {
        InspectionFinding::new(
            bridge_id,
            span.map(str::to_string),
            kind.map(str::to_string),
            "Girder".to_string(),
            "Steel".to_string(),
            "Corrosion".to_string(),
            "c".to_string(),
            "25%".to_string(),
        )
    }

    #[tokio::test]
    async fn test_grouped_partition_groups_each_bucket() {
        let bridge_id = Uuid::new_v4();

        let mut repo = MockFindingRepository::new();
        repo.expect_partition_by_role()
            .returning(move |id, _| {
                Ok(FindingPartition {
                    pending: vec![
                        finding(id, Some("1"), Some("Deck")),
                        finding(id, Some("1"), Some("Deck")),
                        finding(id, None, Some("Deck")),
                    ],
                    approved: vec![finding(id, Some("2"), Some("Substructure"))],
                    unapproved: Vec::new(),
                })
            });

        let service = ReportService::new(Arc::new(repo), Arc::new(EventBus::new()));
        let identity = ReviewerIdentity::new("tanaka", ReviewRole::Consultant);

        let grouped = service
            .grouped_partition(bridge_id, &identity)
            .await
            .unwrap();

        assert_eq!(grouped.pending.bucket("1", "Deck").unwrap().len(), 2);
        assert_eq!(grouped.pending.bucket("N/A", "Deck").unwrap().len(), 1);
        assert_eq!(grouped.pending.total_findings(), 3);
        assert_eq!(grouped.approved.total_findings(), 1);
        assert!(grouped.unapproved.is_empty());
    }

    #[tokio::test]
    async fn test_bridge_summary_is_cached() {
        let bridge_id = Uuid::new_v4();

        let mut repo = MockFindingRepository::new();
        repo.expect_summary_findings()
            .times(1)
            .returning(move |id| {
                Ok(vec![
                    finding(id, Some("1"), Some("Deck")),
                    finding(id, Some("2"), Some("Deck")),
                ])
            });

        let service = ReportService::new(Arc::new(repo), Arc::new(EventBus::new()));

        let first = service.bridge_summary(bridge_id).await.unwrap();
        let second = service.bridge_summary(bridge_id).await.unwrap();

        assert_eq!(first.span_count, 2);
        assert_eq!(first, second);
    }

    #[tokio::test]
    async fn test_review_event_invalidates_summary_cache() {
        let bridge_id = Uuid::new_v4();

        let mut repo = MockFindingRepository::new();
        repo.expect_summary_findings()
            .times(2)
            .returning(move |id| Ok(vec![finding(id, Some("1"), Some("Deck"))]));

        let event_bus = Arc::new(EventBus::new());
        let service = ReportService::new(Arc::new(repo), Arc::clone(&event_bus));
        service.register_event_handlers();

        service.bridge_summary(bridge_id).await.unwrap();
        event_bus.emit(ReviewSubmitted::new(
            Uuid::new_v4(),
            bridge_id,
            ReviewRole::Consultant,
        ));
        service.bridge_summary(bridge_id).await.unwrap();
    }

    #[tokio::test]
    async fn test_other_bridges_keep_their_cache() {
        let bridge_a = Uuid::new_v4();
        let bridge_b = Uuid::new_v4();

        let mut repo = MockFindingRepository::new();
        repo.expect_summary_findings()
            .times(2)
            .returning(move |id| Ok(vec![finding(id, Some("1"), Some("Deck"))]));

        let event_bus = Arc::new(EventBus::new());
        let service = ReportService::new(Arc::new(repo), Arc::clone(&event_bus));
        service.register_event_handlers();

        service.bridge_summary(bridge_a).await.unwrap();
        service.bridge_summary(bridge_b).await.unwrap();

        // A review on bridge B leaves bridge A's cache warm
        event_bus.emit(ReviewSubmitted::new(
            Uuid::new_v4(),
            bridge_b,
            ReviewRole::Oversight,
        ));
        service.bridge_summary(bridge_a).await.unwrap();
    }
}

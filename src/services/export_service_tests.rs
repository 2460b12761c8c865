// src/services/export_service_tests.rs
//
// Export Pipeline Tests
//
// The dataset store and photo host are mocked; artifacts are written into
// a temp workspace and inspected as bytes.

#[cfg(test)]
mod tests {
    use std::io::Cursor;
    use std::sync::Arc;

    use serde_json::{json, Value};
    use tempfile::TempDir;

    use crate::domain::export::{CancelFlag, ExportCriteria, ExportFormat, ExportRecord};
    use crate::error::AppError;
    use crate::events::EventBus;
    use crate::infrastructure::ExportWorkspace;
    use crate::integrations::MockPhotoFetcher;
    use crate::repositories::MockDatasetRepository;
    use crate::services::ExportService;

    fn record(pairs: &[(&str, Value)]) -> ExportRecord {
        let mut map = ExportRecord::new();
        for (key, value) in pairs {
            map.insert(key.to_string(), value.clone());
        }
        map
    }

    fn inventory_record(name: &str, overview_photos: &[&str]) -> ExportRecord {
        let photos: Vec<Value> = overview_photos.iter().map(|p| json!(p)).collect();
        record(&[
            ("bridge_name", json!(name)),
            ("district", json!("North, East")),
            ("rank", json!(7)),
            ("span_count", json!(3)),
            ("overview_photos", Value::Array(photos)),
            ("inspection_photos", json!([])),
        ])
    }

    fn png_bytes() -> Vec<u8> {
        let img = image::DynamicImage::ImageRgb8(image::RgbImage::new(2, 2));
        let mut buf = Cursor::new(Vec::new());
        img.write_to(&mut buf, image::ImageFormat::Png).unwrap();
        buf.into_inner()
    }

    fn service(
        dataset_repo: MockDatasetRepository,
        photo_fetcher: MockPhotoFetcher,
        workspace_dir: &TempDir,
        event_bus: Arc<EventBus>,
    ) -> ExportService {
        ExportService::new(
            Arc::new(dataset_repo),
            Arc::new(photo_fetcher),
            Arc::new(ExportWorkspace::at(workspace_dir.path()).unwrap()),
            event_bus,
        )
    }

    #[tokio::test]
    async fn test_csv_export_has_header_plus_n_rows() {
        let mut repo = MockDatasetRepository::new();
        repo.expect_export_dataset().returning(|_| {
            Ok(vec![
                inventory_record("Kawakami Bridge", &["p1", "p2"]),
                inventory_record("East Culvert", &[]),
            ])
        });

        let dir = TempDir::new().unwrap();
        let svc = service(repo, MockPhotoFetcher::new(), &dir, Arc::new(EventBus::new()));

        let outcome = svc
            .export(
                "inventory",
                &ExportCriteria::default(),
                ExportFormat::Csv,
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        let text = String::from_utf8(outcome.bytes.clone()).unwrap();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines.len(), 3);
        assert_eq!(
            lines[0],
            "bridge_name,district,span_count,overview_photo_uris,inspection_photo_uris"
        );
        // The rank column never appears
        assert!(!lines[0].contains("rank"));
        // Comma-bearing values are double-quote escaped
        assert!(lines[1].contains("\"North, East\""));
        // Photo lists are JSON-encoded array literals
        assert!(lines[1].contains("[\"\"p1\"\",\"\"p2\"\"]"));
        assert!(lines[2].contains("[]"));
        assert_eq!(outcome.rows, 2);
        assert_eq!(outcome.images_embedded, 0);
        assert!(outcome.path.exists());
    }

    #[tokio::test]
    async fn test_empty_dataset_aborts_without_artifact() {
        let mut repo = MockDatasetRepository::new();
        repo.expect_export_dataset().returning(|_| Ok(Vec::new()));

        let dir = TempDir::new().unwrap();
        let svc = service(repo, MockPhotoFetcher::new(), &dir, Arc::new(EventBus::new()));

        let result = svc
            .export(
                "inventory",
                &ExportCriteria::default(),
                ExportFormat::Csv,
                &CancelFlag::new(),
            )
            .await;

        assert!(matches!(result, Err(AppError::EmptyDataset)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[tokio::test]
    async fn test_workbook_embeds_at_most_five_photos_per_category() {
        let mut repo = MockDatasetRepository::new();
        repo.expect_export_dataset().returning(|_| {
            Ok(vec![inventory_record(
                "Kawakami Bridge",
                &["p0", "p1", "p2", "p3", "p4", "p5", "p6"],
            )])
        });

        // Only the first five slots are ever fetched
        let mut fetcher = MockPhotoFetcher::new();
        fetcher
            .expect_fetch_thumbnail()
            .times(5)
            .returning(|_| Ok(png_bytes()));

        let dir = TempDir::new().unwrap();
        let event_bus = Arc::new(EventBus::new());
        let svc = service(repo, fetcher, &dir, Arc::clone(&event_bus));

        let outcome = svc
            .export(
                "inventory",
                &ExportCriteria::default(),
                ExportFormat::Workbook,
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.rows, 1);
        assert_eq!(outcome.images_embedded, 5);
        assert_eq!(outcome.images_failed, 0);
        // xlsx artifacts are zip containers
        assert_eq!(&outcome.bytes[..2], b"PK");
        assert!(outcome.path.exists());
        assert!(outcome.file_name.ends_with(".xlsx"));

        let log = event_bus.event_log();
        assert_eq!(log.len(), 1);
        assert_eq!(log[0].event_type, "ExportCompleted");
    }

    #[tokio::test]
    async fn test_single_photo_failure_is_counted_not_fatal() {
        let mut repo = MockDatasetRepository::new();
        repo.expect_export_dataset()
            .returning(|_| Ok(vec![inventory_record("Kawakami Bridge", &["ok", "bad"])]));

        let mut fetcher = MockPhotoFetcher::new();
        fetcher
            .expect_fetch_thumbnail()
            .withf(|uri| uri == "ok")
            .returning(|_| Ok(png_bytes()));
        fetcher
            .expect_fetch_thumbnail()
            .withf(|uri| uri == "bad")
            .returning(|_| Err(AppError::Other("photo host 500".to_string())));

        let dir = TempDir::new().unwrap();
        let svc = service(repo, fetcher, &dir, Arc::new(EventBus::new()));

        let outcome = svc
            .export(
                "inventory",
                &ExportCriteria::default(),
                ExportFormat::Workbook,
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.images_embedded, 1);
        assert_eq!(outcome.images_failed, 1);
    }

    #[tokio::test]
    async fn test_record_with_no_photos_still_exports() {
        let mut repo = MockDatasetRepository::new();
        repo.expect_export_dataset()
            .returning(|_| Ok(vec![inventory_record("East Culvert", &[])]));

        let mut fetcher = MockPhotoFetcher::new();
        fetcher.expect_fetch_thumbnail().times(0);

        let dir = TempDir::new().unwrap();
        let svc = service(repo, fetcher, &dir, Arc::new(EventBus::new()));

        let outcome = svc
            .export(
                "inventory",
                &ExportCriteria::default(),
                ExportFormat::Workbook,
                &CancelFlag::new(),
            )
            .await
            .unwrap();

        assert_eq!(outcome.rows, 1);
        assert_eq!(outcome.images_embedded, 0);
        assert_eq!(outcome.images_failed, 0);
    }

    #[tokio::test]
    async fn test_cancelled_export_produces_no_artifact() {
        let mut repo = MockDatasetRepository::new();
        repo.expect_export_dataset()
            .returning(|_| Ok(vec![inventory_record("Kawakami Bridge", &["p1"])]));

        let mut fetcher = MockPhotoFetcher::new();
        fetcher.expect_fetch_thumbnail().times(0);

        let dir = TempDir::new().unwrap();
        let svc = service(repo, fetcher, &dir, Arc::new(EventBus::new()));

        let cancel = CancelFlag::new();
        cancel.cancel();

        let result = svc
            .export(
                "inventory",
                &ExportCriteria::default(),
                ExportFormat::Workbook,
                &cancel,
            )
            .await;

        assert!(matches!(result, Err(AppError::Cancelled)));
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }
}

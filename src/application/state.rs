// src/application/state.rs

use std::sync::Arc;

use crate::error::AppResult;
use crate::events::EventBus;
use crate::infrastructure::ExportWorkspace;
use crate::integrations::{HttpPhotoClient, PhotoClientConfig, PhotoFetcher};
use crate::repositories::{
    DatasetRepository, FindingRepository, HttpDatasetRepository, HttpFindingRepository,
    StoreConfig,
};
use crate::services::{ExportService, ReportService, ReviewService};

/// Application state shared across command invocations.
/// All fields are Arc-wrapped for thread-safe sharing.
pub struct AppState {
    pub event_bus: Arc<EventBus>,
    pub review_service: Arc<ReviewService>,
    pub report_service: Arc<ReportService>,
    pub export_service: Arc<ExportService>,
}

impl AppState {
    /// Wire the full service graph against a live store.
    pub fn connect(store_config: StoreConfig) -> AppResult<Self> {
        // 1. INFRASTRUCTURE
        let event_bus = Arc::new(EventBus::new());
        let workspace = Arc::new(ExportWorkspace::new()?);
        let photo_client: Arc<dyn PhotoFetcher> =
            Arc::new(HttpPhotoClient::new(PhotoClientConfig::default())?);

        // 2. REPOSITORIES
        let finding_repo: Arc<dyn FindingRepository> =
            Arc::new(HttpFindingRepository::new(store_config.clone())?);
        let dataset_repo: Arc<dyn DatasetRepository> =
            Arc::new(HttpDatasetRepository::new(store_config)?);

        // 3. SERVICES
        let review_service = Arc::new(ReviewService::new(
            Arc::clone(&finding_repo),
            Arc::clone(&event_bus),
        ));
        let report_service = Arc::new(ReportService::new(finding_repo, Arc::clone(&event_bus)));
        let export_service = Arc::new(ExportService::new(
            dataset_repo,
            photo_client,
            workspace,
            Arc::clone(&event_bus),
        ));

        // 4. EVENT HANDLER REGISTRATION (WIRING)
        report_service.register_event_handlers();

        Ok(Self {
            event_bus,
            review_service,
            report_service,
            export_service,
        })
    }
}

// src/repositories/dataset_repository.rs
//
// Export dataset access: filtered inventory/finding rows as dynamic
// records, fetched in one page

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder};

use crate::domain::export::{ExportCriteria, ExportRecord};
use crate::error::AppResult;
use crate::repositories::finding_repository::StoreConfig;

#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait DatasetRepository: Send + Sync {
    /// Filtered export dataset, one page, no server-side pagination.
    /// Result sets are assumed export-sized.
    async fn export_dataset(&self, criteria: &ExportCriteria) -> AppResult<Vec<ExportRecord>>;
}

pub struct HttpDatasetRepository {
    base_url: String,
    http_client: Client,
    auth_token: Option<String>,
}

impl HttpDatasetRepository {
    pub fn new(config: StoreConfig) -> AppResult<Self> {
        let http_client = Client::builder().timeout(config.timeout).build()?;

        Ok(Self {
            base_url: config.base_url,
            http_client,
            auth_token: config.auth_token,
        })
    }

    fn authorize(&self, request: RequestBuilder) -> RequestBuilder {
        match &self.auth_token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }
}

#[async_trait]
impl DatasetRepository for HttpDatasetRepository {
    async fn export_dataset(&self, criteria: &ExportCriteria) -> AppResult<Vec<ExportRecord>> {
        let url = format!("{}/api/export/dataset", self.base_url);
        let response = self
            .authorize(self.http_client.get(&url))
            .query(&criteria.to_query())
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }
}

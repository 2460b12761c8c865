// src/repositories/finding_repository.rs
//
// Inspection record store access over its HTTP contract

use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, StatusCode};
use serde::Deserialize;
use serde_json::json;
use uuid::Uuid;

use crate::domain::finding::{EvaluationRecord, FindingPartition, InspectionFinding};
use crate::domain::review::{ReviewRole, RoleScopedFields};
use crate::error::{AppError, AppResult};

/// Store contract consumed by the review pipeline.
///
/// The partition is computed server-side per requesting role; "unapproved"
/// is role-scoped, so consultant rejections and oversight rejections are
/// separate buckets behind the same operation.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait FindingRepository: Send + Sync {
    async fn partition_by_role(
        &self,
        bridge_id: Uuid,
        role: ReviewRole,
    ) -> AppResult<FindingPartition>;

    /// Full finding collection of a bridge, used only for aggregate
    /// derivation, not display
    async fn summary_findings(&self, bridge_id: Uuid) -> AppResult<Vec<InspectionFinding>>;

    async fn get_by_id(&self, finding_id: Uuid) -> AppResult<Option<InspectionFinding>>;

    /// Full replace of one role's remarks+status fields
    async fn update_review(&self, finding_id: Uuid, fields: &RoleScopedFields) -> AppResult<()>;

    /// Insert of the evaluator-owned snapshot record
    async fn insert_evaluation(&self, record: &EvaluationRecord) -> AppResult<()>;
}

/// Connection settings for the backing store API.
///
/// The auth token is the opaque session value handed in by the host
/// application; the core never produces or validates it.
#[derive(Debug, Clone)]
pub struct StoreConfig {
    pub base_url: String,
    pub auth_token: Option<String>,
    pub timeout: Duration,
}

impl StoreConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            auth_token: None,
            timeout: Duration::from_secs(30),
        }
    }

    pub fn with_auth(mut self, token: impl Into<String>) -> Self {
        self.auth_token = Some(token.into());
        self
    }
}

/// Write acknowledgement on the store's wire contract
#[derive(Debug, Deserialize)]
struct StoreWriteResult {
    success: bool,
    error: Option<String>,
}

pub struct HttpFindingRepository {
    base_url: String,
    http_client: Client,
    auth_token: Option<String>,
}

impl HttpFindingRepository {
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

    async fn expect_write_ack(response: reqwest::Response) -> AppResult<()> {
        let ack: StoreWriteResult = response.error_for_status()?.json().await?;
        if ack.success {
            Ok(())
        } else {
            Err(AppError::Store(
                ack.error
                    .unwrap_or_else(|| "unspecified store error".to_string()),
            ))
        }
    }
}

#[async_trait]
impl FindingRepository for HttpFindingRepository {
    async fn partition_by_role(
        &self,
        bridge_id: Uuid,
        role: ReviewRole,
    ) -> AppResult<FindingPartition> {
        let url = format!(
            "{}/api/bridges/{}/findings/partition",
            self.base_url, bridge_id
        );
        let response = self
            .authorize(self.http_client.get(&url))
            .query(&[("role", role.to_string())])
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn summary_findings(&self, bridge_id: Uuid) -> AppResult<Vec<InspectionFinding>> {
        let url = format!("{}/api/bridges/{}/findings/summary", self.base_url, bridge_id);
        let response = self
            .authorize(self.http_client.get(&url))
            .send()
            .await?
            .error_for_status()?;

        Ok(response.json().await?)
    }

    async fn get_by_id(&self, finding_id: Uuid) -> AppResult<Option<InspectionFinding>> {
        let url = format!("{}/api/findings/{}", self.base_url, finding_id);
        let response = self.authorize(self.http_client.get(&url)).send().await?;

        if response.status() == StatusCode::NOT_FOUND {
            return Ok(None);
        }

        Ok(Some(response.error_for_status()?.json().await?))
    }

    async fn update_review(&self, finding_id: Uuid, fields: &RoleScopedFields) -> AppResult<()> {
        // The store replaces the named role's slot wholesale; the body
        // never carries another role's fields.
        let body = match fields {
            RoleScopedFields::Consultant { remarks, status } => json!({
                "role": "consultant",
                "remarks": remarks,
                "status": status,
            }),
            RoleScopedFields::Oversight { remarks, status } => json!({
                "role": "oversight",
                "remarks": remarks,
                "status": status,
            }),
        };

        let url = format!("{}/api/findings/{}/review", self.base_url, finding_id);
        let response = self
            .authorize(self.http_client.put(&url))
            .json(&body)
            .send()
            .await?;

        Self::expect_write_ack(response).await
    }

    async fn insert_evaluation(&self, record: &EvaluationRecord) -> AppResult<()> {
        let url = format!("{}/api/evaluations", self.base_url);
        let response = self
            .authorize(self.http_client.post(&url))
            .json(record)
            .send()
            .await?;

        Self::expect_write_ack(response).await
    }
}

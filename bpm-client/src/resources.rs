//! Resource endpoints (installs, leads, customers)

use std::future::Future;

use bpm_core::domain::log::LogEntry;
use bpm_core::domain::record::RawRecord;
use bpm_core::domain::resource::ResourceKind;
use bpm_core::dto::log::AppendLog;
use bpm_core::query::{ListOptions, QueryResult, run_pipeline};
use reqwest::Method;
use serde_json::Value;
use tracing::debug;

use crate::BpmClient;
use crate::error::{ClientError, Result};
use crate::transport::ApiRequest;

/// Status the backend answers with when an update was applied
pub const UPDATED_STATUS: u16 = 201;

/// Envelope of a write whose body the caller does not need
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ResponseMeta {
    pub status: u16,
}

impl ResponseMeta {
    /// Whether the backend reported the record as updated
    pub fn is_updated(&self) -> bool {
        self.status == UPDATED_STATUS
    }
}

impl BpmClient {
    // =============================================================================
    // Resource Operations
    // =============================================================================

    /// List every record of a resource kind
    pub async fn list(&self, kind: ResourceKind) -> Result<Vec<RawRecord>> {
        let profile = kind.profile();
        let request = ApiRequest::new(Method::GET, profile.path)
            .with_bearer(self.bearer(profile.requires_auth).await?);
        let response = self.execute(request).await?;

        self.handle_response(&response)
    }

    /// Fetch a single record by id
    ///
    /// # Returns
    /// `None` when the backend has no record with that id
    pub async fn get_by_id(&self, kind: ResourceKind, id: &str) -> Result<Option<RawRecord>> {
        let profile = kind.profile();
        let request = ApiRequest::new(Method::GET, profile.path)
            .with_id(id)
            .with_bearer(self.bearer(profile.requires_auth).await?);
        let response = self.execute(request).await?;

        let rows: Vec<RawRecord> = self.handle_response(&response)?;
        Ok(rows.into_iter().next())
    }

    /// Create a record
    ///
    /// # Returns
    /// The record as stored by the backend, including its generated id
    pub async fn create(&self, kind: ResourceKind, record: &RawRecord) -> Result<RawRecord> {
        let profile = kind.profile();
        let request = ApiRequest::new(Method::POST, profile.path)
            .with_body(Value::Object(record.clone()))
            .with_bearer(self.bearer(profile.requires_auth).await?);
        let response = self.execute(request).await?;

        self.handle_response(&response)
    }

    /// Update the given fields of a record
    ///
    /// Only the fields in `changes` are sent. Check
    /// [`ResponseMeta::is_updated`] to see whether the backend applied it.
    pub async fn update(
        &self,
        kind: ResourceKind,
        id: &str,
        changes: &RawRecord,
    ) -> Result<ResponseMeta> {
        let profile = kind.profile();
        let request = ApiRequest::new(Method::PUT, profile.path)
            .with_id(id)
            .with_body(Value::Object(changes.clone()))
            .with_bearer(self.bearer(profile.requires_auth).await?);
        let response = self.execute(request).await?;

        Ok(ResponseMeta {
            status: response.status,
        })
    }

    // =============================================================================
    // Audit Logs
    // =============================================================================

    /// Append an audit entry to a record
    pub async fn append_log(
        &self,
        kind: ResourceKind,
        id: &str,
        content: &str,
        action: &str,
    ) -> Result<ResponseMeta> {
        let profile = kind.profile();
        let body = AppendLog {
            content: content.to_string(),
            action: action.to_string(),
        };
        let body = serde_json::to_value(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to encode log entry: {}", e)))?;
        let request = ApiRequest::new(Method::POST, profile.logs_path())
            .with_id(id)
            .with_body(body)
            .with_bearer(self.bearer(profile.requires_auth).await?);
        let response = self.execute(request).await?;

        Ok(ResponseMeta {
            status: response.status,
        })
    }

    /// List the audit entries of a record
    pub async fn list_logs(&self, kind: ResourceKind, id: &str) -> Result<Vec<LogEntry>> {
        let profile = kind.profile();
        let request = ApiRequest::new(Method::GET, profile.logs_path())
            .with_id(id)
            .with_bearer(self.bearer(profile.requires_auth).await?);
        let response = self.execute(request).await?;

        self.handle_response(&response)
    }

    // =============================================================================
    // List Query Pipeline
    // =============================================================================

    /// Fetch a collection and return one page of it
    ///
    /// Options are validated before any request is sent. The whole call
    /// fails if the fetch fails or any record has an unparsable timestamp.
    pub async fn list_page(&self, kind: ResourceKind, options: &ListOptions) -> Result<QueryResult> {
        options.validate()?;

        let raw = self.list(kind).await?;
        let fetched = raw.len();
        let result = run_pipeline(raw, kind.profile(), options)?;

        debug!(
            resource = %kind,
            fetched,
            matched = result.total_count,
            page = options.page,
            "Listed page"
        );

        Ok(result)
    }

    /// Like [`list_page`](Self::list_page), abandoned as soon as `cancelled`
    /// resolves
    pub async fn list_page_until<F>(
        &self,
        kind: ResourceKind,
        options: &ListOptions,
        cancelled: F,
    ) -> Result<QueryResult>
    where
        F: Future<Output = ()>,
    {
        tokio::select! {
            result = self.list_page(kind, options) => result,
            _ = cancelled => {
                debug!(resource = %kind, "List request cancelled");
                Err(ClientError::Cancelled)
            }
        }
    }
}

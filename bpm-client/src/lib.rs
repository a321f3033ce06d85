//! BPM HTTP Client
//!
//! A type-safe client for the BPM backend's REST resources (installs, leads,
//! customers) and the list query pipeline that every list view runs on top
//! of it.
//!
//! # Example
//!
//! ```no_run
//! use bpm_client::BpmClient;
//! use bpm_core::domain::resource::ResourceKind;
//! use bpm_core::query::ListOptions;
//!
//! #[tokio::main]
//! async fn main() -> bpm_client::Result<()> {
//!     let client = BpmClient::new("http://localhost:3001/api");
//!
//!     let page = client
//!         .list_page(ResourceKind::Install, &ListOptions::default().with_query("smith"))
//!         .await?;
//!
//!     println!("{} matching installs", page.total_count);
//!     Ok(())
//! }
//! ```

pub mod auth;
pub mod error;
mod reference;
mod resources;
pub mod transport;

#[cfg(test)]
mod testing;

// Re-export commonly used types
pub use auth::{StaticToken, TokenProvider};
pub use error::{ClientError, Result};
pub use resources::{ResponseMeta, UPDATED_STATUS};
pub use transport::{ApiRequest, ApiResponse, HttpTransport, Transport};

use std::sync::Arc;

use reqwest::Client;
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

/// HTTP client for the BPM API
///
/// The client is cheap to clone and holds no mutable state; concurrent calls
/// are independent. Methods are organized into:
/// - Resource operations (list, get, create, update, audit logs)
/// - The list query pipeline
/// - Reference data (users, lead sources, lead status options)
#[derive(Clone)]
pub struct BpmClient {
    transport: Arc<dyn Transport>,
    tokens: Option<Arc<dyn TokenProvider>>,
}

impl std::fmt::Debug for BpmClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("BpmClient")
            .field("authenticated", &self.tokens.is_some())
            .finish()
    }
}

impl BpmClient {
    /// Create a client talking HTTP to `base_url`
    ///
    /// # Example
    /// ```
    /// use bpm_client::BpmClient;
    ///
    /// let client = BpmClient::new("http://localhost:3001/api");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_transport(HttpTransport::new(base_url))
    }

    /// Create a client with a custom reqwest client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use bpm_client::BpmClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = BpmClient::with_client("http://localhost:3001/api", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        Self::with_transport(HttpTransport::with_client(base_url, client))
    }

    /// Create a client over any transport
    pub fn with_transport(transport: impl Transport + 'static) -> Self {
        Self {
            transport: Arc::new(transport),
            tokens: None,
        }
    }

    /// Attach the capability used to authenticate resource families that
    /// require a bearer token
    pub fn with_token_provider(mut self, provider: impl TokenProvider + 'static) -> Self {
        self.tokens = Some(Arc::new(provider));
        self
    }

    // =============================================================================
    // Request Execution
    // =============================================================================

    /// Fetch a fresh token when the call needs one
    async fn bearer(&self, requires_auth: bool) -> Result<Option<String>> {
        if !requires_auth {
            return Ok(None);
        }

        let provider = self.tokens.as_ref().ok_or(ClientError::Unauthenticated)?;
        provider.token().await.map(Some)
    }

    /// Send a request and turn non-2xx statuses into errors
    async fn execute(&self, request: ApiRequest) -> Result<ApiResponse> {
        debug!(
            method = %request.method,
            path = %request.path,
            authenticated = request.bearer.is_some(),
            "Sending request"
        );

        let method = request.method.clone();
        let path = request.path.clone();
        let response = self.transport.send(request).await?;

        if !response.is_success() {
            warn!(%method, %path, status = response.status, "Request failed");
            let message = if response.body.is_empty() {
                "Unknown error".to_string()
            } else {
                response.body
            };
            return Err(ClientError::api_error(response.status, message));
        }

        Ok(response)
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Deserialize a successful response body
    fn handle_response<T: DeserializeOwned>(&self, response: &ApiResponse) -> Result<T> {
        serde_json::from_str(&response.body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeTransport;
    use reqwest::Method;

    #[test]
    fn test_client_creation() {
        let client = BpmClient::new("http://localhost:3001/api");
        assert!(client.tokens.is_none());
    }

    #[tokio::test]
    async fn test_execute_maps_error_status() {
        let transport = FakeTransport::new();
        transport.respond(500, "");
        let client = BpmClient::with_transport(transport);

        let err = client
            .execute(ApiRequest::new(Method::GET, "installs"))
            .await
            .unwrap_err();

        match err {
            ClientError::ApiError { status, message } => {
                assert_eq!(status, 500);
                assert_eq!(message, "Unknown error");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_bearer_requires_provider() {
        let client = BpmClient::with_transport(FakeTransport::new());
        assert!(client.bearer(false).await.unwrap().is_none());
        assert!(matches!(
            client.bearer(true).await,
            Err(ClientError::Unauthenticated)
        ));
    }

    #[test]
    fn test_handle_response_parse_error() {
        let client = BpmClient::with_transport(FakeTransport::new());
        let response = ApiResponse {
            status: 200,
            body: "<html>".to_string(),
        };
        let result: Result<Vec<serde_json::Value>> = client.handle_response(&response);
        assert!(matches!(result, Err(ClientError::ParseError(_))));
    }
}

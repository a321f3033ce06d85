//! Transport layer
//!
//! The client never talks to reqwest directly; it hands an [`ApiRequest`] to
//! a [`Transport`]. Production code uses [`HttpTransport`], tests substitute
//! an in-memory implementation.

use async_trait::async_trait;
use reqwest::{Client, Method};
use serde_json::Value;

use crate::error::Result;

/// A single request against the BPM API
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    /// Path relative to the API base, without leading slash (e.g. "installs/logs")
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<Value>,
    /// Bearer token attached as `Authorization: Bearer <token>`
    pub bearer: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
            bearer: None,
        }
    }

    pub fn with_id(mut self, id: &str) -> Self {
        self.query.push(("id".to_string(), id.to_string()));
        self
    }

    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_bearer(mut self, token: Option<String>) -> Self {
        self.bearer = token;
        self
    }
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiResponse {
    pub status: u16,
    pub body: String,
}

impl ApiResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Sends requests to the BPM backend
#[async_trait]
pub trait Transport: Send + Sync {
    /// Perform one HTTP exchange
    ///
    /// Non-2xx statuses are returned as responses, not errors; only network
    /// failures are errors at this layer.
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse>;
}

/// reqwest-backed transport
#[derive(Debug, Clone)]
pub struct HttpTransport {
    /// Base URL of the API (e.g., "http://localhost:3001/api")
    base_url: String,
    client: Client,
}

impl HttpTransport {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Use a preconfigured reqwest client (timeouts, proxies, TLS)
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            client,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }
}

#[async_trait]
impl Transport for HttpTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        let mut builder = self.client.request(request.method, self.url(&request.path));

        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }
        if let Some(token) = &request.bearer {
            builder = builder.bearer_auth(token);
        }

        let response = builder.send().await?;
        let status = response.status().as_u16();
        let body = response.text().await?;

        Ok(ApiResponse { status, body })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_transport_trims_trailing_slash() {
        let transport = HttpTransport::new("http://localhost:3001/api/");
        assert_eq!(transport.base_url(), "http://localhost:3001/api");
    }

    #[test]
    fn test_url_joins_path() {
        let transport = HttpTransport::new("http://localhost:3001/api");
        assert_eq!(
            transport.url("/installs/logs"),
            "http://localhost:3001/api/installs/logs"
        );
        assert_eq!(transport.url("leads"), "http://localhost:3001/api/leads");
    }

    #[test]
    fn test_request_builder() {
        let request = ApiRequest::new(Method::PUT, "installs")
            .with_id("42")
            .with_bearer(Some("tok".to_string()));

        assert_eq!(request.query, vec![("id".to_string(), "42".to_string())]);
        assert_eq!(request.bearer.as_deref(), Some("tok"));
        assert!(request.body.is_none());
    }

    #[test]
    fn test_success_range() {
        let ok = ApiResponse { status: 201, body: String::new() };
        let redirect = ApiResponse { status: 302, body: String::new() };
        assert!(ok.is_success());
        assert!(!redirect.is_success());
    }
}

//! In-memory transport and token provider for client tests

use std::collections::VecDeque;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::Value;

use crate::auth::TokenProvider;
use crate::error::{ClientError, Result};
use crate::transport::{ApiRequest, ApiResponse, Transport};

/// Replays scripted responses in order and records every request
#[derive(Clone, Default)]
pub struct FakeTransport {
    responses: Arc<Mutex<VecDeque<ApiResponse>>>,
    requests: Arc<Mutex<Vec<ApiRequest>>>,
}

impl FakeTransport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn respond(&self, status: u16, body: &str) {
        self.responses.lock().unwrap().push_back(ApiResponse {
            status,
            body: body.to_string(),
        });
    }

    pub fn respond_json(&self, status: u16, body: Value) {
        self.respond(status, &body.to_string());
    }

    pub fn requests(&self) -> Vec<ApiRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(&self, request: ApiRequest) -> Result<ApiResponse> {
        self.requests.lock().unwrap().push(request);
        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .expect("no scripted response left");
        Ok(response)
    }
}

/// Hands out `token-1`, `token-2`, ... so tests can see every fetch
#[derive(Clone, Default)]
pub struct CountingToken {
    fetched: Arc<AtomicUsize>,
}

impl CountingToken {
    pub fn fetched(&self) -> usize {
        self.fetched.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl TokenProvider for CountingToken {
    async fn token(&self) -> Result<String> {
        let n = self.fetched.fetch_add(1, Ordering::SeqCst) + 1;
        Ok(format!("token-{n}"))
    }
}

/// Always fails to produce a token
pub struct FailingToken;

#[async_trait]
impl TokenProvider for FailingToken {
    async fn token(&self) -> Result<String> {
        Err(ClientError::TokenUnavailable("session expired".to_string()))
    }
}

/// Never answers
pub struct StalledTransport;

#[async_trait]
impl Transport for StalledTransport {
    async fn send(&self, _request: ApiRequest) -> Result<ApiResponse> {
        std::future::pending().await
    }
}

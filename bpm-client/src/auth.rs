//! Bearer token capability
//!
//! Authenticated resource families need a token from an external identity
//! provider. The client asks its [`TokenProvider`] on every authenticated
//! call and never caches the answer, since tokens expire.

use async_trait::async_trait;

use crate::error::Result;

/// Supplies a bearer token on demand
#[async_trait]
pub trait TokenProvider: Send + Sync {
    /// Fetch a currently valid token
    async fn token(&self) -> Result<String>;
}

/// Provider returning a fixed token
#[derive(Debug, Clone)]
pub struct StaticToken(String);

impl StaticToken {
    pub fn new(token: impl Into<String>) -> Self {
        Self(token.into())
    }
}

#[async_trait]
impl TokenProvider for StaticToken {
    async fn token(&self) -> Result<String> {
        Ok(self.0.clone())
    }
}

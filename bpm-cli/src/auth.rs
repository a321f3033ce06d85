//! Token provider backed by an environment variable
//!
//! The variable is read on every call, so a token refreshed by an outside
//! process is picked up without restarting.

use async_trait::async_trait;
use bpm_client::{ClientError, TokenProvider};

#[derive(Debug, Clone)]
pub struct EnvToken {
    var: String,
}

impl EnvToken {
    pub fn new(var: impl Into<String>) -> Self {
        Self { var: var.into() }
    }
}

#[async_trait]
impl TokenProvider for EnvToken {
    async fn token(&self) -> bpm_client::Result<String> {
        token_from(&self.var, std::env::var(&self.var).ok())
    }
}

/// Validate the value read from `var`
fn token_from(var: &str, value: Option<String>) -> bpm_client::Result<String> {
    match value {
        Some(token) if !token.trim().is_empty() => Ok(token.trim().to_string()),
        _ => Err(ClientError::TokenUnavailable(format!(
            "{} environment variable not set",
            var
        ))),
    }
}

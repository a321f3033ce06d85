//! Configuration module
//!
//! Handles CLI configuration: API location, paging and authentication.

use std::time::Duration;

use anyhow::{Context, Result};
use bpm_client::BpmClient;
use reqwest::Client;

use crate::auth::EnvToken;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the BPM API
    pub api_url: String,

    /// Rows per page for list commands
    pub page_size: usize,

    /// Timeout applied to every HTTP request
    pub timeout: Duration,

    /// Environment variable holding the bearer token
    pub token_var: String,
}

impl Config {
    /// Validates the configuration
    pub fn validate(&self) -> Result<()> {
        if self.api_url.is_empty() {
            anyhow::bail!("api_url cannot be empty");
        }

        if !self.api_url.starts_with("http://") && !self.api_url.starts_with("https://") {
            anyhow::bail!("api_url must start with http:// or https://");
        }

        if self.page_size == 0 {
            anyhow::bail!("page_size must be greater than 0");
        }

        if self.timeout.is_zero() {
            anyhow::bail!("timeout must be greater than 0");
        }

        if self.token_var.is_empty() {
            anyhow::bail!("token_var cannot be empty");
        }

        Ok(())
    }

    /// Build the API client described by this configuration
    pub fn client(&self) -> Result<BpmClient> {
        let http = Client::builder()
            .timeout(self.timeout)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(BpmClient::with_client(&self.api_url, http)
            .with_token_provider(EnvToken::new(self.token_var.clone())))
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_url: "http://localhost:3001/api".to_string(),
            page_size: bpm_core::query::DEFAULT_PAGE_SIZE,
            timeout: Duration::from_secs(30),
            token_var: "BPM_TOKEN".to_string(),
        }
    }
}

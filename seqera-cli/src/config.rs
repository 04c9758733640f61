//! Configuration module
//!
//! Connection settings collected from the global flags and their
//! environment fallbacks.

use anyhow::{Context, Result, bail};
use seqera_client::SeqeraClient;

use crate::output::OutputFormat;

/// CLI configuration
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the Platform API
    pub url: String,
    /// Personal access token
    pub access_token: Option<String>,
    /// Workspace reference (`123` or `organization/workspace`); personal workspace when unset
    pub workspace: Option<String>,
    pub output: OutputFormat,
    /// Accept invalid TLS certificates
    pub insecure: bool,
}

impl Config {
    /// Check that the settings can be used to reach the API
    pub fn validate(&self) -> Result<()> {
        if !(self.url.starts_with("http://") || self.url.starts_with("https://")) {
            bail!(
                "Invalid API URL '{}': expected an http:// or https:// address",
                self.url
            );
        }
        match self.access_token.as_deref().map(str::trim) {
            Some(token) if !token.is_empty() => Ok(()),
            _ => bail!(
                "Missing access token: use --access-token or set SEQERA_ACCESS_TOKEN"
            ),
        }
    }

    /// Build an authenticated API client from this configuration
    pub fn client(&self) -> Result<SeqeraClient> {
        self.validate()?;

        let http = reqwest::Client::builder()
            .user_agent(concat!("seqera-cli/", env!("CARGO_PKG_VERSION")))
            .danger_accept_invalid_certs(self.insecure)
            .build()
            .context("Failed to build HTTP client")?;

        let mut client = SeqeraClient::with_client(&self.url, http);
        if let Some(token) = &self.access_token {
            client = client.with_token(token.trim());
        }
        Ok(client)
    }
}

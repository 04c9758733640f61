//! Seqera HTTP Client
//!
//! A type-safe async client for the Seqera Platform REST API.
//!
//! The client adds the bearer token, base URL and JSON (de)serialization around
//! `reqwest`. Each API resource is reached through a borrowing handle
//! (`client.pipelines()`, `client.workspaces()`, ...) exposing thin `list`,
//! `get`, `add`, `update` and `delete` wrappers.
//!
//! # Example
//!
//! ```no_run
//! use seqera_client::SeqeraClient;
//! use seqera_core::dto::Page;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let client = SeqeraClient::new("https://api.cloud.seqera.io").with_token("my-token");
//!
//!     let page = client.pipelines().list(None, None, Page::default()).await?;
//!     for pipeline in page.items {
//!         println!("{} {}", pipeline.pipeline_id, pipeline.name);
//!     }
//!     Ok(())
//! }
//! ```

pub mod error;
pub mod resources;
pub mod transfer;

// Re-export commonly used types
pub use error::{ClientError, Result};
pub use transfer::{DataLinkLocation, TransferReport};

use reqwest::header::{ACCEPT, AUTHORIZATION};
use reqwest::{Client, Method, RequestBuilder};
use serde::Serialize;
use serde::de::DeserializeOwned;

/// Default Seqera Platform API endpoint
pub const DEFAULT_API_URL: &str = "https://api.cloud.seqera.io";

/// Query parameters as `(name, value)` pairs
pub type Query = Vec<(&'static str, String)>;

/// HTTP client for the Seqera Platform API
#[derive(Debug, Clone)]
pub struct SeqeraClient {
    /// Base URL of the API (e.g., "https://api.cloud.seqera.io")
    base_url: String,
    /// Bearer token sent with every API request
    token: Option<String>,
    /// HTTP client instance
    client: Client,
}

impl SeqeraClient {
    /// Create a new client without credentials
    ///
    /// # Example
    /// ```
    /// use seqera_client::SeqeraClient;
    ///
    /// let client = SeqeraClient::new("https://api.cloud.seqera.io");
    /// ```
    pub fn new(base_url: impl Into<String>) -> Self {
        Self::with_client(base_url, Client::new())
    }

    /// Create a new client with a custom HTTP client
    ///
    /// This allows you to configure timeouts, proxies, TLS settings, etc.
    ///
    /// # Example
    /// ```
    /// use seqera_client::SeqeraClient;
    /// use reqwest::Client;
    /// use std::time::Duration;
    ///
    /// let http_client = Client::builder()
    ///     .timeout(Duration::from_secs(30))
    ///     .build()
    ///     .unwrap();
    ///
    /// let client = SeqeraClient::with_client("https://api.cloud.seqera.io", http_client);
    /// ```
    pub fn with_client(base_url: impl Into<String>, client: Client) -> Self {
        let base_url = base_url.into();
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
            token: None,
            client,
        }
    }

    /// Attach the access token used as `Authorization: Bearer <token>`
    pub fn with_token(mut self, token: impl Into<String>) -> Self {
        self.token = Some(token.into());
        self
    }

    /// Get the base URL of the API
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Whether an access token is configured
    pub fn has_token(&self) -> bool {
        self.token.is_some()
    }

    // =============================================================================
    // Request Helpers
    // =============================================================================

    /// Build an authenticated request for an API path
    fn request(&self, method: Method, path: &str, query: &[(&'static str, String)]) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        tracing::debug!(%method, %url, ?query, "API request");

        let mut builder = self
            .client
            .request(method, &url)
            .header(ACCEPT, "application/json");
        if !query.is_empty() {
            builder = builder.query(query);
        }
        if let Some(token) = &self.token {
            builder = builder.header(AUTHORIZATION, format!("Bearer {}", token));
        }
        builder
    }

    pub(crate) async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
    ) -> Result<T> {
        let response = self.request(Method::GET, path, query).send().await?;
        self.handle_response(response).await
    }

    pub(crate) async fn post_json<B, T>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::POST, path, query)
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn post_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        body: Option<&B>,
    ) -> Result<()> {
        let mut builder = self.request(Method::POST, path, query);
        if let Some(body) = body {
            builder = builder.json(body);
        }
        let response = builder.send().await?;
        self.handle_empty_response(response).await
    }

    pub(crate) async fn put_json<B, T>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        body: &B,
    ) -> Result<T>
    where
        B: Serialize + ?Sized,
        T: DeserializeOwned,
    {
        let response = self
            .request(Method::PUT, path, query)
            .json(body)
            .send()
            .await?;
        self.handle_response(response).await
    }

    pub(crate) async fn put_empty<B: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        body: &B,
    ) -> Result<()> {
        let response = self
            .request(Method::PUT, path, query)
            .json(body)
            .send()
            .await?;
        self.handle_empty_response(response).await
    }

    pub(crate) async fn delete(&self, path: &str, query: &[(&'static str, String)]) -> Result<()> {
        let response = self.request(Method::DELETE, path, query).send().await?;
        self.handle_empty_response(response).await
    }

    /// Send a multipart form and deserialize the JSON answer
    pub(crate) async fn post_multipart<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&'static str, String)],
        form: reqwest::multipart::Form,
    ) -> Result<T> {
        let response = self
            .request(Method::POST, path, query)
            .multipart(form)
            .send()
            .await?;
        self.handle_response(response).await
    }

    /// The underlying HTTP client, for requests outside the API (pre-signed URLs)
    pub(crate) fn http(&self) -> &Client {
        &self.client
    }

    // =============================================================================
    // Response Handlers
    // =============================================================================

    /// Handle an API response and deserialize JSON
    ///
    /// Non-success statuses are mapped to [`ClientError`] using the server's
    /// `message` field when the body carries one.
    async fn handle_response<T: DeserializeOwned>(&self, response: reqwest::Response) -> Result<T> {
        let response = check_status(response).await?;

        let body = response.text().await?;
        serde_json::from_str(&body)
            .map_err(|e| ClientError::ParseError(format!("Failed to parse JSON response: {}", e)))
    }

    /// Handle an API response that returns no content (e.g., DELETE operations)
    async fn handle_empty_response(&self, response: reqwest::Response) -> Result<()> {
        check_status(response).await?;
        Ok(())
    }
}

/// Pass successful responses through, turn the others into errors
pub(crate) async fn check_status(response: reqwest::Response) -> Result<reqwest::Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response
        .text()
        .await
        .unwrap_or_else(|_| "Unknown error".to_string());
    let message = error_message(&body);
    tracing::debug!(status = status.as_u16(), %message, "API error response");

    Err(ClientError::from_status(status.as_u16(), message))
}

/// Extract the user-facing message from an error body
fn error_message(body: &str) -> String {
    let parsed = serde_json::from_str::<serde_json::Value>(body).ok();
    if let Some(message) = parsed
        .as_ref()
        .and_then(|value| value.get("message"))
        .and_then(|m| m.as_str())
    {
        return message.to_string();
    }

    let trimmed = body.trim();
    if trimmed.is_empty() {
        "Unknown error".to_string()
    } else {
        trimmed.to_string()
    }
}

/// `workspaceId` query parameter, omitted for the personal workspace
pub(crate) fn workspace_query(workspace_id: Option<i64>) -> Query {
    workspace_id
        .map(|id| vec![("workspaceId", id.to_string())])
        .unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_client_creation() {
        let client = SeqeraClient::new("https://api.cloud.seqera.io");
        assert_eq!(client.base_url(), "https://api.cloud.seqera.io");
        assert!(!client.has_token());
    }

    #[test]
    fn test_client_trims_trailing_slash() {
        let client = SeqeraClient::new("http://localhost:8000/api/");
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }

    #[test]
    fn test_client_with_token() {
        let client = SeqeraClient::with_client(DEFAULT_API_URL, Client::new()).with_token("abc");
        assert!(client.has_token());
    }

    #[test]
    fn test_error_message_prefers_json_message() {
        assert_eq!(
            error_message(r#"{"message": "Workspace not found"}"#),
            "Workspace not found"
        );
        assert_eq!(error_message("plain failure\n"), "plain failure");
        assert_eq!(error_message("   "), "Unknown error");
        assert_eq!(error_message(r#"{"error": "x"}"#), r#"{"error": "x"}"#);
    }

    #[test]
    fn test_workspace_query() {
        assert!(workspace_query(None).is_empty());
        assert_eq!(
            workspace_query(Some(42)),
            vec![("workspaceId", "42".to_string())]
        );
    }
}

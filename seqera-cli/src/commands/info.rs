//! Info command handler
//!
//! Checks connectivity and credentials against the configured endpoint.

use anyhow::{Context, Result};
use serde::Serialize;

use crate::config::Config;
use crate::output::{self, Render, details, or_dash};

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct InfoResponse {
    pub api_url: String,
    pub version: String,
    pub api_version: String,
    pub user_name: String,
    pub email: String,
    pub workspace: Option<String>,
}

impl Render for InfoResponse {
    fn to_console(&self) -> String {
        details(
            "Seqera Platform",
            &[
                ("API endpoint", self.api_url.clone()),
                ("Version", self.version.clone()),
                ("API version", self.api_version.clone()),
                ("User", format!("{} <{}>", self.user_name, self.email)),
                ("Workspace", or_dash(self.workspace.as_deref())),
            ],
        )
    }
}

/// Handle `seqera info`
pub async fn handle_info_command(config: &Config) -> Result<()> {
    let client = config.client()?;

    let service = client
        .user()
        .service_info()
        .await
        .context("Failed to reach the Platform API")?;
    let user = client.user().info().await?;

    let response = InfoResponse {
        api_url: client.base_url().to_string(),
        version: service.version,
        api_version: service.api_version,
        user_name: user.user_name,
        email: user.email,
        workspace: config.workspace.clone(),
    };
    output::print(&response, config.output)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_info_console() {
        output::plain();
        let response = InfoResponse {
            api_url: "https://api.cloud.seqera.io".to_string(),
            version: "24.1.0".to_string(),
            api_version: "1.10.0".to_string(),
            user_name: "jdoe".to_string(),
            email: "jdoe@example.com".to_string(),
            workspace: None,
        };

        let console = response.to_console();
        assert!(console.contains("API endpoint: https://api.cloud.seqera.io"));
        assert!(console.contains("User:         jdoe <jdoe@example.com>"));
        assert!(console.contains("Workspace:    -"));

        let json = output::render(&response, output::OutputFormat::Json).unwrap();
        assert!(json.contains("\"apiVersion\": \"1.10.0\""));
    }
}

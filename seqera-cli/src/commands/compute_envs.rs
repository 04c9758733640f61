//! Compute environment command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use colored::*;
use serde::Serialize;

use seqera_core::domain::compute_env::{ComputeEnv, ComputeEnvStatus};
use seqera_core::dto::compute_env::ComputeEnvDraft;

use super::read_text_file;
use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, fmt_date, listing, or_dash};
use crate::resolver::{resolve_compute_env, resolve_credentials, workspace_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum StatusArg {
    Creating,
    Available,
    Errored,
    Invalid,
}

impl From<StatusArg> for ComputeEnvStatus {
    fn from(value: StatusArg) -> Self {
        match value {
            StatusArg::Creating => ComputeEnvStatus::Creating,
            StatusArg::Available => ComputeEnvStatus::Available,
            StatusArg::Errored => ComputeEnvStatus::Errored,
            StatusArg::Invalid => ComputeEnvStatus::Invalid,
        }
    }
}

/// Compute environment subcommands
#[derive(Subcommand)]
pub enum ComputeEnvCommands {
    /// List compute environments
    List {
        #[arg(long, value_enum)]
        status: Option<StatusArg>,
    },
    /// Show compute environment details
    View {
        /// Compute environment id or name
        compute_env: String,
    },
    /// Create a compute environment from a platform configuration file
    Add {
        #[arg(short, long)]
        name: String,
        /// Platform identifier, e.g. aws-batch, google-batch, k8s-platform
        #[arg(long)]
        platform: String,
        /// Credentials id or name used to reach the platform
        #[arg(long)]
        credentials: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Platform configuration (JSON or YAML)
        #[arg(long)]
        config: PathBuf,
    },
    /// Delete a compute environment
    Delete {
        /// Compute environment id or name
        compute_env: String,
    },
    /// Primary compute environment of the workspace
    Primary {
        #[command(subcommand)]
        command: PrimaryCommands,
    },
}

#[derive(Subcommand)]
pub enum PrimaryCommands {
    /// Show the primary compute environment
    Get,
    /// Make a compute environment the primary one
    Set {
        /// Compute environment id or name
        compute_env: String,
    },
}

fn colored_status(status: Option<ComputeEnvStatus>) -> String {
    match status {
        Some(ComputeEnvStatus::Available) => "AVAILABLE".green().to_string(),
        Some(ComputeEnvStatus::Creating) => "CREATING".cyan().to_string(),
        Some(other) => other.to_string().red().to_string(),
        None => "-".to_string(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeEnvList {
    pub compute_envs: Vec<ComputeEnv>,
}

impl Render for ComputeEnvList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "STATUS", "PLATFORM", "NAME", "LAST USED"]);
        for ce in &self.compute_envs {
            let name = if ce.primary {
                format!("* {}", ce.name)
            } else {
                ce.name.clone()
            };
            table.row(vec![
                ce.id.clone(),
                or_dash(ce.status),
                ce.platform.clone(),
                name,
                fmt_date(ce.last_used),
            ]);
        }
        listing(
            &format!("Compute environments ({}):", self.compute_envs.len()),
            "No compute environments found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeEnvView {
    pub compute_env: ComputeEnv,
}

impl Render for ComputeEnvView {
    fn to_console(&self) -> String {
        let ce = &self.compute_env;
        let mut out = details(
            "Compute Environment Details:",
            &[
                ("ID", ce.id.clone()),
                ("Name", ce.name.clone()),
                ("Platform", ce.platform.clone()),
                ("Status", colored_status(ce.status)),
                ("Primary", if ce.primary { "yes" } else { "no" }.to_string()),
                ("Work dir", or_dash(ce.work_dir.as_deref())),
                ("Credentials", or_dash(ce.credentials_id.as_deref())),
                ("Created", fmt_date(ce.date_created)),
                ("Last used", fmt_date(ce.last_used)),
            ],
        );
        if let Some(message) = &ce.message {
            out.push_str(&format!("  {} {}\n", "Message:".yellow(), message));
        }
        out
    }
}

/// Parse a platform configuration file; JSON is accepted as YAML
fn read_platform_config(path: &std::path::Path) -> Result<serde_json::Value> {
    let text = read_text_file(path)?;
    serde_yaml::from_str(&text)
        .with_context(|| format!("Invalid compute environment configuration: {}", path.display()))
}

/// Handle compute environment commands
pub async fn handle_compute_env_command(command: ComputeEnvCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        ComputeEnvCommands::List { status } => {
            let compute_envs = client
                .compute_envs()
                .list(ws, status.map(ComputeEnvStatus::from))
                .await?;
            output::print(&ComputeEnvList { compute_envs }, config.output)
        }
        ComputeEnvCommands::View { compute_env } => {
            let found = resolve_compute_env(&client, ws, &compute_env).await?;
            let compute_env = client.compute_envs().get(&found.id, ws).await?;
            output::print(&ComputeEnvView { compute_env }, config.output)
        }
        ComputeEnvCommands::Add {
            name,
            platform,
            credentials,
            description,
            config: config_file,
        } => {
            let credentials_id = match credentials {
                Some(reference) => Some(resolve_credentials(&client, ws, &reference).await?.id),
                None => None,
            };
            let draft = ComputeEnvDraft {
                name: name.clone(),
                platform,
                description,
                credentials_id,
                config: read_platform_config(&config_file)?,
            };
            let id = client.compute_envs().add(ws, draft).await?;
            output::print(
                &Message::with_id(format!("Compute environment '{}' added", name), id),
                config.output,
            )
        }
        ComputeEnvCommands::Delete { compute_env } => {
            let found = resolve_compute_env(&client, ws, &compute_env).await?;
            client.compute_envs().delete(&found.id, ws).await?;
            output::print(
                &Message::with_id(
                    format!("Compute environment '{}' deleted", found.name),
                    found.id,
                ),
                config.output,
            )
        }
        ComputeEnvCommands::Primary { command } => match command {
            PrimaryCommands::Get => {
                let compute_env = client
                    .compute_envs()
                    .primary(ws)
                    .await
                    .context("Failed to fetch the primary compute environment")?;
                output::print(&ComputeEnvView { compute_env }, config.output)
            }
            PrimaryCommands::Set { compute_env } => {
                let found = resolve_compute_env(&client, ws, &compute_env).await?;
                client.compute_envs().set_primary(&found.id, ws).await?;
                output::print(
                    &Message::with_id(
                        format!("Primary compute environment set to '{}'", found.name),
                        found.id,
                    ),
                    config.output,
                )
            }
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;
    use axum::http::Method;
    use serde_json::json;

    #[test]
    fn test_compute_env_list_marks_primary() {
        output::plain();
        let compute_envs: Vec<ComputeEnv> = serde_json::from_value(json!([
            { "id": "ce1", "name": "aws", "platform": "aws-batch", "status": "AVAILABLE", "primary": true },
            { "id": "ce22", "name": "gke", "platform": "gke-platform", "status": "ERRORED" }
        ]))
        .unwrap();
        let console = ComputeEnvList { compute_envs }.to_console();
        let lines: Vec<_> = console.lines().collect();
        assert_eq!(lines[0], "Compute environments (2):");
        assert_eq!(lines[4], "  ce1   AVAILABLE  aws-batch     * aws  -");
        assert_eq!(lines[5], "  ce22  ERRORED    gke-platform  gke    -");
    }

    #[test]
    fn test_read_platform_config_accepts_yaml_and_json() {
        let dir = std::env::temp_dir().join(format!("seqera-ce-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let yaml = dir.join("ce.yaml");
        std::fs::write(&yaml, "region: eu-west-1\nworkDir: s3://bucket/work\n").unwrap();
        let json_file = dir.join("ce.json");
        std::fs::write(&json_file, r#"{"region": "eu-west-1"}"#).unwrap();

        assert_eq!(read_platform_config(&yaml).unwrap()["workDir"], "s3://bucket/work");
        assert_eq!(read_platform_config(&json_file).unwrap()["region"], "eu-west-1");
        std::fs::remove_dir_all(&dir).ok();
    }

    #[tokio::test]
    async fn test_primary_set_resolves_name() {
        let api = MockApi::new();
        api.on(
            Method::GET,
            "/compute-envs",
            json!({ "computeEnvs": [
                { "id": "ce1", "name": "aws", "platform": "aws-batch" },
                { "id": "ce2", "name": "gke", "platform": "gke-platform" }
            ] }),
        );
        api.on(Method::POST, "/compute-envs/ce2/primary", json!({}));
        let config = api.config().await;

        handle_compute_env_command(
            ComputeEnvCommands::Primary {
                command: PrimaryCommands::Set {
                    compute_env: "gke".to_string(),
                },
            },
            &config,
        )
        .await
        .unwrap();
        assert_eq!(api.hits("/compute-envs/ce2/primary"), 1);
    }
}

//! Label command handlers

use anyhow::{Result, bail};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use seqera_client::resources::LabelFilter;
use seqera_core::domain::label::Label;
use seqera_core::dto::label::{CreateLabel, UpdateLabel};

use crate::config::Config;
use crate::output::{self, Message, Render, Table, listing, or_dash};
use crate::resolver::{resolve_label, workspace_id};

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LabelKind {
    #[default]
    All,
    /// Plain labels
    Simple,
    /// `name=value` labels
    Resource,
}

impl From<LabelKind> for LabelFilter {
    fn from(value: LabelKind) -> Self {
        match value {
            LabelKind::All => LabelFilter::All,
            LabelKind::Simple => LabelFilter::Simple,
            LabelKind::Resource => LabelFilter::Resource,
        }
    }
}

/// Label subcommands
#[derive(Subcommand)]
pub enum LabelCommands {
    /// List labels
    List {
        #[arg(short, long, value_enum, default_value_t = LabelKind::All)]
        kind: LabelKind,
    },
    /// Create a label
    Add {
        /// `name`, or `name=value` for a resource label
        label: String,
        /// Apply the label to new runs by default
        #[arg(long)]
        default: bool,
    },
    /// Update a label
    Update {
        /// Label id, name or `name=value`
        label: String,
        #[arg(long)]
        new_name: Option<String>,
        /// New value (resource labels only)
        #[arg(long)]
        value: Option<String>,
        #[arg(long)]
        default: Option<bool>,
    },
    /// Delete a label
    Delete {
        /// Label id, name or `name=value`
        label: String,
    },
}

/// Split `name` or `name=value`
pub fn split_label(label: &str) -> Result<(String, Option<String>)> {
    let (name, value) = match label.split_once('=') {
        Some((name, value)) => (name.trim(), Some(value.trim())),
        None => (label.trim(), None),
    };
    if name.is_empty() {
        bail!("Invalid label '{}': empty name", label);
    }
    if value == Some("") {
        bail!("Invalid label '{}': empty value", label);
    }
    Ok((name.to_string(), value.map(str::to_string)))
}

#[derive(Debug, Clone, Serialize)]
pub struct LabelList {
    pub labels: Vec<Label>,
}

impl Render for LabelList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "NAME", "VALUE", "DEFAULT"]);
        for l in &self.labels {
            table.row(vec![
                l.id.to_string(),
                l.name.clone(),
                or_dash(l.value.as_deref()),
                if l.is_default { "yes" } else { "no" }.to_string(),
            ]);
        }
        listing(
            &format!("Labels ({}):", self.labels.len()),
            "No labels found.",
            &table,
        )
    }
}

/// Handle label commands
pub async fn handle_label_command(command: LabelCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        LabelCommands::List { kind } => {
            let labels = client.labels().list(ws, kind.into()).await?;
            output::print(&LabelList { labels }, config.output)
        }
        LabelCommands::Add { label, default } => {
            let (name, value) = split_label(&label)?;
            let created = client
                .labels()
                .add(ws, &CreateLabel::new(name, value, default))
                .await?;
            output::print(
                &Message::with_id(format!("Label '{}' added", created), created.id),
                config.output,
            )
        }
        LabelCommands::Update {
            label,
            new_name,
            value,
            default,
        } => {
            let found = resolve_label(&client, ws, &label).await?;
            if value.is_some() && !found.resource {
                bail!("Label '{}' is not a resource label and has no value", found);
            }
            let update = UpdateLabel {
                name: new_name,
                value,
                is_default: default,
            };
            let updated = client.labels().update(found.id, ws, &update).await?;
            output::print(
                &Message::with_id(format!("Label '{}' updated", updated), updated.id),
                config.output,
            )
        }
        LabelCommands::Delete { label } => {
            let found = resolve_label(&client, ws, &label).await?;
            client.labels().delete(found.id, ws).await?;
            output::print(
                &Message::with_id(format!("Label '{}' deleted", found), found.id),
                config.output,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;
    use axum::http::Method;
    use serde_json::json;

    #[test]
    fn test_split_label() {
        assert_eq!(split_label("qc").unwrap(), ("qc".to_string(), None));
        assert_eq!(
            split_label("env=prod").unwrap(),
            ("env".to_string(), Some("prod".to_string()))
        );
        assert!(split_label("=prod").is_err());
        assert!(split_label("env=").is_err());
    }

    #[test]
    fn test_label_list_console() {
        output::plain();
        let labels = vec![
            Label {
                id: 1,
                name: "env".to_string(),
                value: Some("prod".to_string()),
                resource: true,
                is_default: true,
            },
            Label {
                id: 20,
                name: "qc".to_string(),
                value: None,
                resource: false,
                is_default: false,
            },
        ];
        let console = LabelList { labels }.to_console();
        let lines: Vec<_> = console.lines().collect();
        assert_eq!(lines[4], "  1   env   prod   yes");
        assert_eq!(lines[5], "  20  qc    -      no");
    }

    #[tokio::test]
    async fn test_add_resource_label() {
        let api = MockApi::new();
        api.on(
            Method::POST,
            "/labels",
            json!({ "id": 5, "name": "env", "value": "prod", "resource": true, "isDefault": false }),
        );
        let config = api.config().await;

        handle_label_command(
            LabelCommands::Add {
                label: "env=prod".to_string(),
                default: false,
            },
            &config,
        )
        .await
        .unwrap();

        assert_eq!(
            api.bodies(Method::POST, "/labels"),
            vec![json!({ "name": "env", "value": "prod", "resource": true, "isDefault": false })]
        );
    }

    #[tokio::test]
    async fn test_update_value_on_simple_label_fails() {
        let api = MockApi::new();
        api.on(
            Method::GET,
            "/labels",
            json!({ "labels": [{ "id": 3, "name": "qc", "resource": false, "isDefault": false }] }),
        );
        let config = api.config().await;

        let err = handle_label_command(
            LabelCommands::Update {
                label: "qc".to_string(),
                new_name: None,
                value: Some("x".to_string()),
                default: None,
            },
            &config,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("not a resource label"));
    }
}

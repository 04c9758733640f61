//! Pipeline secret command handlers

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use seqera_core::domain::secret::PipelineSecret;

use crate::config::Config;
use crate::output::{self, Message, Render, Table, fmt_date, listing};
use crate::resolver::{resolve_secret, workspace_id};

/// Secret subcommands
#[derive(Subcommand)]
pub enum SecretCommands {
    /// List pipeline secrets (values are never shown)
    List,
    /// Create a secret
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(long, env = "SEQERA_SECRET_VALUE", hide_env_values = true)]
        value: String,
    },
    /// Replace a secret's value
    Update {
        /// Secret id or name
        secret: String,
        #[arg(long, env = "SEQERA_SECRET_VALUE", hide_env_values = true)]
        value: String,
    },
    /// Delete a secret
    Delete {
        /// Secret id or name
        secret: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SecretList {
    pub pipeline_secrets: Vec<PipelineSecret>,
}

impl Render for SecretList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "NAME", "CREATED", "LAST USED"]);
        for s in &self.pipeline_secrets {
            table.row(vec![
                s.id.to_string(),
                s.name.clone(),
                fmt_date(s.date_created),
                fmt_date(s.last_used),
            ]);
        }
        listing(
            &format!("Secrets ({}):", self.pipeline_secrets.len()),
            "No secrets found.",
            &table,
        )
    }
}

/// Handle secret commands
pub async fn handle_secret_command(command: SecretCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        SecretCommands::List => {
            let pipeline_secrets = client.secrets().list(ws).await?;
            output::print(&SecretList { pipeline_secrets }, config.output)
        }
        SecretCommands::Add { name, value } => {
            let id = client.secrets().add(ws, &name, &value).await?;
            output::print(
                &Message::with_id(format!("Secret '{}' added", name), id),
                config.output,
            )
        }
        SecretCommands::Update { secret, value } => {
            let found = resolve_secret(&client, ws, &secret).await?;
            client.secrets().update(found.id, ws, &value).await?;
            output::print(
                &Message::with_id(format!("Secret '{}' updated", found.name), found.id),
                config.output,
            )
        }
        SecretCommands::Delete { secret } => {
            let found = resolve_secret(&client, ws, &secret).await?;
            client.secrets().delete(found.id, ws).await?;
            output::print(
                &Message::with_id(format!("Secret '{}' deleted", found.name), found.id),
                config.output,
            )
        }
    }
}

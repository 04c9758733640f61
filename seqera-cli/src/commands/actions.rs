//! Pipeline action command handlers

use std::collections::BTreeMap;
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;
use serde_json::Value;

use seqera_core::domain::action::{Action, ActionSource};
use seqera_core::domain::pipeline::Launch;
use seqera_core::dto::action::{CreateAction, UpdateAction};

use super::launch::{LaunchOptions, ensure_compute_env, is_repository_url};
use super::{parse_key_val, read_text_file};
use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, fmt_date, listing, or_dash};
use crate::resolver::{resolve_action, resolve_pipeline, workspace_id};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum SourceArg {
    /// Triggered by a GitHub push
    Github,
    /// Triggered by calling the Platform endpoint
    Tower,
}

impl From<SourceArg> for ActionSource {
    fn from(value: SourceArg) -> Self {
        match value {
            SourceArg::Github => ActionSource::Github,
            SourceArg::Tower => ActionSource::Tower,
        }
    }
}

/// Action subcommands
#[derive(Subcommand)]
pub enum ActionCommands {
    /// List actions
    List,
    /// Show action details
    View {
        /// Action id or name
        action: String,
    },
    /// Create an action
    Add {
        #[arg(short, long)]
        name: String,
        /// Launchpad pipeline id or name, or a repository URL
        pipeline: String,
        #[arg(long, value_enum, default_value_t = SourceArg::Tower)]
        source: SourceArg,
        #[command(flatten)]
        options: LaunchOptions,
    },
    /// Rename an action or change its launch settings
    Update {
        /// Action id or name
        action: String,
        #[arg(long)]
        new_name: Option<String>,
        #[command(flatten)]
        options: LaunchOptions,
    },
    /// Delete an action
    Delete {
        /// Action id or name
        action: String,
    },
    /// Trigger an action
    Launch {
        /// Action id or name
        action: String,
        /// Pipeline parameter (KEY=value, repeatable)
        #[arg(long = "param", value_parser = parse_key_val)]
        params: Vec<(String, String)>,
        /// Parameters file (JSON or YAML); --param values take precedence
        #[arg(long)]
        params_file: Option<PathBuf>,
    },
}

/// Merge a parameters file with `KEY=value` overrides
///
/// Override values that parse as JSON (numbers, booleans) keep their type.
pub fn launch_params(
    file: Option<&str>,
    overrides: Vec<(String, String)>,
) -> Result<BTreeMap<String, Value>> {
    let mut params: BTreeMap<String, Value> = match file {
        Some(text) if !text.trim().is_empty() => {
            serde_yaml::from_str(text).context("Invalid parameters file")?
        }
        _ => BTreeMap::new(),
    };
    for (key, value) in overrides {
        let value = serde_json::from_str(&value).unwrap_or(Value::String(value));
        params.insert(key, value);
    }
    Ok(params)
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionList {
    pub actions: Vec<Action>,
}

impl Render for ActionList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "NAME", "SOURCE", "STATUS", "PIPELINE"]);
        for a in &self.actions {
            table.row(vec![
                a.id.clone(),
                a.name.clone(),
                a.source.to_string(),
                a.status.to_string(),
                or_dash(a.pipeline.as_deref()),
            ]);
        }
        listing(
            &format!("Actions ({}):", self.actions.len()),
            "No actions found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ActionView {
    pub action: Action,
}

impl Render for ActionView {
    fn to_console(&self) -> String {
        let a = &self.action;
        let launch = a.launch.as_ref();
        details(
            "Action Details:",
            &[
                ("ID", a.id.clone()),
                ("Name", a.name.clone()),
                ("Source", a.source.to_string()),
                ("Status", a.status.to_string()),
                ("Pipeline", or_dash(a.pipeline.as_deref())),
                ("Endpoint", or_dash(a.endpoint.as_deref())),
                ("Work dir", or_dash(launch.and_then(|l| l.work_dir.as_deref()))),
                ("Revision", or_dash(launch.and_then(|l| l.revision.as_deref()))),
                ("Last seen", fmt_date(a.last_seen)),
                ("Created", fmt_date(a.date_created)),
            ],
        )
    }
}

/// Handle action commands
pub async fn handle_action_command(command: ActionCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        ActionCommands::List => {
            let actions = client.actions().list(ws).await?;
            output::print(&ActionList { actions }, config.output)
        }
        ActionCommands::View { action } => {
            let found = resolve_action(&client, ws, &action).await?;
            let action = client.actions().get(&found.id, ws).await?;
            output::print(&ActionView { action }, config.output)
        }
        ActionCommands::Add {
            name,
            pipeline,
            source,
            options,
        } => {
            let mut launch = if is_repository_url(&pipeline) {
                Launch {
                    pipeline,
                    ..Default::default()
                }
            } else {
                let found = resolve_pipeline(&client, ws, &pipeline).await?;
                client
                    .pipelines()
                    .launch_info(found.pipeline_id, ws)
                    .await?
                    .into_request()
            };
            options.apply(&client, ws, &mut launch).await?;
            ensure_compute_env(&client, ws, &mut launch).await?;

            let request = CreateAction {
                name: name.clone(),
                source: source.into(),
                launch,
            };
            let id = client.actions().add(ws, &request).await?;
            output::print(
                &Message::with_id(format!("Action '{}' added", name), id),
                config.output,
            )
        }
        ActionCommands::Update {
            action,
            new_name,
            options,
        } => {
            let found = resolve_action(&client, ws, &action).await?;
            let current = client.actions().get(&found.id, ws).await?;
            let launch = match current.launch {
                Some(launch) => {
                    let mut launch = launch.into_request();
                    options.apply(&client, ws, &mut launch).await?;
                    Some(launch)
                }
                None => None,
            };
            let request = UpdateAction {
                name: new_name,
                launch,
            };
            client.actions().update(&found.id, ws, &request).await?;
            output::print(
                &Message::with_id(format!("Action '{}' updated", found.name), found.id),
                config.output,
            )
        }
        ActionCommands::Delete { action } => {
            let found = resolve_action(&client, ws, &action).await?;
            client.actions().delete(&found.id, ws).await?;
            output::print(
                &Message::with_id(format!("Action '{}' deleted", found.name), found.id),
                config.output,
            )
        }
        ActionCommands::Launch {
            action,
            params,
            params_file,
        } => {
            let found = resolve_action(&client, ws, &action).await?;
            let file = params_file.as_deref().map(read_text_file).transpose()?;
            let params = launch_params(file.as_deref(), params)?;
            let workflow_id = client.actions().launch(&found.id, ws, params).await?;
            output::print(
                &Message::with_id(format!("Action '{}' triggered", found.name), workflow_id),
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
    fn test_launch_params_overrides_file() {
        let params = launch_params(
            Some("input: a.csv\nmax_cpus: 4\n"),
            vec![
                ("input".to_string(), "b.csv".to_string()),
                ("skip_qc".to_string(), "true".to_string()),
            ],
        )
        .unwrap();

        assert_eq!(params["input"], json!("b.csv"));
        assert_eq!(params["max_cpus"], json!(4));
        assert_eq!(params["skip_qc"], json!(true));
    }

    #[test]
    fn test_launch_params_empty() {
        assert!(launch_params(None, vec![]).unwrap().is_empty());
        assert!(launch_params(Some("  \n"), vec![]).unwrap().is_empty());
        assert!(launch_params(Some("- not\n- a map\n"), vec![]).is_err());
    }

    #[test]
    fn test_action_list_console() {
        output::plain();
        let actions: Vec<Action> = serde_json::from_value(json!([
            { "id": "a1", "name": "nightly", "source": "tower", "status": "ACTIVE",
              "pipeline": "https://github.com/nf-core/rnaseq" }
        ]))
        .unwrap();
        let console = ActionList { actions }.to_console();
        let lines: Vec<_> = console.lines().collect();
        assert_eq!(lines[0], "Actions (1):");
        assert_eq!(
            lines[4],
            "  a1  nightly  tower   ACTIVE  https://github.com/nf-core/rnaseq"
        );
    }

    #[tokio::test]
    async fn test_launch_sends_params() {
        let api = MockApi::new();
        api.on(
            Method::GET,
            "/actions",
            json!({ "actions": [
                { "id": "a1", "name": "nightly", "source": "tower", "status": "ACTIVE" }
            ] }),
        );
        api.on(Method::POST, "/actions/a1/launch", json!({ "workflowId": "run-9" }));
        let config = api.config().await;

        handle_action_command(
            ActionCommands::Launch {
                action: "nightly".to_string(),
                params: vec![("genome".to_string(), "GRCh38".to_string())],
                params_file: None,
            },
            &config,
        )
        .await
        .unwrap();

        assert_eq!(
            api.bodies(Method::POST, "/actions/a1/launch"),
            vec![json!({ "params": { "genome": "GRCh38" } })]
        );
    }
}

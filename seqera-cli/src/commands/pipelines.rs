//! Pipeline (Launchpad) command handlers

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use seqera_core::domain::pipeline::{Launch, Pipeline};
use seqera_core::dto::Page;
use seqera_core::dto::pipeline::{CreatePipeline, UpdatePipeline};

use super::launch::{LaunchOptions, ensure_compute_env};
use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, fmt_date, listing, or_dash};
use crate::resolver::{resolve_pipeline, workspace_id};

/// Pipeline subcommands
#[derive(Subcommand)]
pub enum PipelineCommands {
    /// List Launchpad pipelines
    List {
        /// Only pipelines whose name matches
        #[arg(long)]
        filter: Option<String>,
        /// Page size (all pages are fetched when unset)
        #[arg(long)]
        max: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show a pipeline and its launch settings
    View {
        /// Pipeline id or name
        pipeline: String,
    },
    /// Add a pipeline to the Launchpad
    Add {
        /// Repository URL of the pipeline
        repository: String,
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[command(flatten)]
        options: LaunchOptions,
    },
    /// Update a pipeline's details or launch settings
    Update {
        /// Pipeline id or name
        pipeline: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[command(flatten)]
        options: LaunchOptions,
    },
    /// Remove a pipeline from the Launchpad
    Delete {
        /// Pipeline id or name
        pipeline: String,
    },
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PipelineList {
    pub pipelines: Vec<Pipeline>,
    pub total_size: i64,
}

impl Render for PipelineList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "NAME", "REPOSITORY", "VISIBILITY"]);
        for p in &self.pipelines {
            table.row(vec![
                p.pipeline_id.to_string(),
                p.name.clone(),
                or_dash(p.repository.as_deref()),
                or_dash(p.visibility.as_deref()),
            ]);
        }
        listing(
            &format!("Pipelines ({} of {}):", self.pipelines.len(), self.total_size),
            "No pipelines found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct PipelineView {
    pub pipeline: Pipeline,
    pub launch: Launch,
}

impl Render for PipelineView {
    fn to_console(&self) -> String {
        let p = &self.pipeline;
        let launch = &self.launch;
        let labels = p
            .labels
            .as_ref()
            .map(|labels| {
                labels
                    .iter()
                    .map(|l| l.to_string())
                    .collect::<Vec<_>>()
                    .join(", ")
            })
            .filter(|s| !s.is_empty());

        let mut out = details(
            "Pipeline Details:",
            &[
                ("ID", p.pipeline_id.to_string()),
                ("Name", p.name.clone()),
                ("Description", or_dash(p.description.as_deref())),
                ("Repository", or_dash(p.repository.as_deref())),
                ("Owner", or_dash(p.user_name.as_deref())),
                ("Labels", or_dash(labels)),
                ("Updated", fmt_date(p.last_updated)),
            ],
        );
        out.push('\n');
        out.push_str(&details(
            "Launch Settings:",
            &[
                (
                    "Compute env",
                    or_dash(
                        launch
                            .compute_env
                            .as_ref()
                            .map(|ce| ce.name.clone())
                            .or_else(|| launch.compute_env_id.clone()),
                    ),
                ),
                ("Work dir", or_dash(launch.work_dir.as_deref())),
                ("Revision", or_dash(launch.revision.as_deref())),
                ("Profiles", or_dash(Some(launch.config_profiles.join(",")))),
            ],
        ));
        out
    }
}

/// Handle pipeline commands
pub async fn handle_pipeline_command(command: PipelineCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        PipelineCommands::List { filter, max, offset } => {
            let search = filter.as_deref();
            let list = if max.is_some() || offset.is_some() {
                let page = client
                    .pipelines()
                    .list(ws, search, Page { max, offset })
                    .await?;
                PipelineList {
                    pipelines: page.items,
                    total_size: page.total_size,
                }
            } else {
                let pipelines = client.pipelines().list_all(ws, search).await?;
                PipelineList {
                    total_size: pipelines.len() as i64,
                    pipelines,
                }
            };
            output::print(&list, config.output)
        }
        PipelineCommands::View { pipeline } => {
            let pipeline = resolve_pipeline(&client, ws, &pipeline).await?;
            let launch = client
                .pipelines()
                .launch_info(pipeline.pipeline_id, ws)
                .await?;
            output::print(&PipelineView { pipeline, launch }, config.output)
        }
        PipelineCommands::Add {
            repository,
            name,
            description,
            options,
        } => {
            let mut launch = Launch {
                pipeline: repository,
                ..Default::default()
            };
            options.apply(&client, ws, &mut launch).await?;
            ensure_compute_env(&client, ws, &mut launch).await?;

            let request = CreatePipeline {
                name,
                description,
                icon: None,
                label_ids: launch.label_ids.clone(),
                launch,
            };
            let pipeline = client.pipelines().add(ws, &request).await?;
            output::print(
                &Message::with_id(
                    format!("Pipeline '{}' added", pipeline.name),
                    pipeline.pipeline_id,
                ),
                config.output,
            )
        }
        PipelineCommands::Update {
            pipeline,
            new_name,
            description,
            options,
        } => {
            let pipeline = resolve_pipeline(&client, ws, &pipeline).await?;
            let mut launch = client
                .pipelines()
                .launch_info(pipeline.pipeline_id, ws)
                .await?
                .into_request();
            options.apply(&client, ws, &mut launch).await?;

            let request = UpdatePipeline {
                name: new_name,
                description,
                icon: None,
                label_ids: launch.label_ids.clone(),
                launch,
            };
            let updated = client
                .pipelines()
                .update(pipeline.pipeline_id, ws, &request)
                .await?;
            output::print(
                &Message::with_id(
                    format!("Pipeline '{}' updated", updated.name),
                    updated.pipeline_id,
                ),
                config.output,
            )
        }
        PipelineCommands::Delete { pipeline } => {
            let pipeline = resolve_pipeline(&client, ws, &pipeline).await?;
            client.pipelines().delete(pipeline.pipeline_id, ws).await?;
            output::print(
                &Message::with_id(
                    format!("Pipeline '{}' deleted", pipeline.name),
                    pipeline.pipeline_id,
                ),
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

    fn pipeline(id: i64, name: &str, repo: &str) -> Pipeline {
        serde_json::from_value(json!({ "pipelineId": id, "name": name, "repository": repo })).unwrap()
    }

    #[test]
    fn test_pipeline_list_console() {
        output::plain();
        let console = PipelineList {
            pipelines: vec![
                pipeline(1, "hello", "https://github.com/nextflow-io/hello"),
                pipeline(12, "rnaseq", "https://github.com/nf-core/rnaseq"),
            ],
            total_size: 2,
        }
        .to_console();

        let lines: Vec<_> = console.lines().collect();
        assert_eq!(lines[0], "Pipelines (2 of 2):");
        assert_eq!(
            lines[4],
            "  1   hello   https://github.com/nextflow-io/hello  -"
        );
        assert_eq!(
            lines[5],
            "  12  rnaseq  https://github.com/nf-core/rnaseq     -"
        );
    }

    #[test]
    fn test_pipeline_list_json() {
        let list = PipelineList {
            pipelines: vec![pipeline(1, "hello", "https://github.com/nextflow-io/hello")],
            total_size: 1,
        };
        let value: serde_json::Value =
            serde_json::from_str(&output::render(&list, output::OutputFormat::Json).unwrap())
                .unwrap();
        assert_eq!(value["totalSize"], 1);
        assert_eq!(value["pipelines"][0]["pipelineId"], 1);
    }

    #[tokio::test]
    async fn test_update_keeps_saved_launch_settings() {
        let api = MockApi::new();
        api.on(
            Method::GET,
            "/pipelines/3",
            json!({ "pipeline": { "pipelineId": 3, "name": "rnaseq" } }),
        );
        api.on(
            Method::GET,
            "/pipelines/3/launch",
            json!({ "launch": {
                "id": "l-1",
                "pipeline": "https://github.com/nf-core/rnaseq",
                "computeEnv": { "id": "ce-1", "name": "aws", "platform": "aws-batch" },
                "workDir": "s3://bucket/work",
                "revision": "3.13.0"
            } }),
        );
        api.on(
            Method::PUT,
            "/pipelines/3",
            json!({ "pipeline": { "pipelineId": 3, "name": "rnaseq" } }),
        );
        let config = api.config().await;

        handle_pipeline_command(
            PipelineCommands::Update {
                pipeline: "3".to_string(),
                new_name: None,
                description: Some("RNA-seq".to_string()),
                options: LaunchOptions {
                    revision: Some("3.14.0".to_string()),
                    ..Default::default()
                },
            },
            &config,
        )
        .await
        .unwrap();

        let body = &api.bodies(Method::PUT, "/pipelines/3")[0];
        assert_eq!(body["description"], "RNA-seq");
        assert_eq!(body["launch"]["computeEnvId"], "ce-1");
        assert_eq!(body["launch"]["workDir"], "s3://bucket/work");
        assert_eq!(body["launch"]["revision"], "3.14.0");
        assert!(body["launch"].get("computeEnv").is_none());
        assert!(body["launch"].get("id").is_none());
        assert!(body.get("name").is_none());
    }
}

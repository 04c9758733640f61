//! Launch command handler
//!
//! Also holds the launch options shared by `pipelines add/update` and
//! `actions add/update`.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;
use colored::*;
use serde::Serialize;

use seqera_client::SeqeraClient;
use seqera_core::domain::pipeline::Launch;

use super::read_text_file;
use crate::config::Config;
use crate::output::{self, Render};
use crate::resolver::{
    resolve_compute_env, resolve_label, resolve_pipeline, workspace_id, workspace_label,
};

/// Launch settings accepted wherever a launch configuration is built
#[derive(Args, Debug, Clone, Default)]
pub struct LaunchOptions {
    /// Compute environment id or name (defaults to the primary one)
    #[arg(long)]
    pub compute_env: Option<String>,

    /// Work directory for intermediate files
    #[arg(long)]
    pub work_dir: Option<String>,

    /// Branch, tag or commit to run
    #[arg(long)]
    pub revision: Option<String>,

    /// Nextflow config profiles (comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub profile: Vec<String>,

    /// Pipeline parameters file (JSON or YAML)
    #[arg(long)]
    pub params_file: Option<PathBuf>,

    /// Additional Nextflow configuration file
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Bash script run before the pipeline
    #[arg(long)]
    pub pre_run: Option<PathBuf>,

    /// Bash script run after the pipeline
    #[arg(long)]
    pub post_run: Option<PathBuf>,

    /// Pipeline script file name (e.g. main-dev.nf)
    #[arg(long)]
    pub main_script: Option<String>,

    /// Workflow entry name
    #[arg(long)]
    pub entry_name: Option<String>,

    /// Pull the latest pipeline revision before running
    #[arg(long)]
    pub pull_latest: bool,

    /// Run with stub processes
    #[arg(long)]
    pub stub_run: bool,

    /// Labels to attach (names or name=value, comma-separated)
    #[arg(long, value_delimiter = ',')]
    pub labels: Vec<String>,
}

impl LaunchOptions {
    /// Apply the given options over `launch`, resolving names and reading files
    pub async fn apply(
        &self,
        client: &SeqeraClient,
        workspace_id: Option<i64>,
        launch: &mut Launch,
    ) -> Result<()> {
        if let Some(reference) = &self.compute_env {
            let ce = resolve_compute_env(client, workspace_id, reference).await?;
            launch.compute_env_id = Some(ce.id);
            if self.work_dir.is_none() && launch.work_dir.is_none() {
                launch.work_dir = ce.work_dir;
            }
        }
        if let Some(work_dir) = &self.work_dir {
            launch.work_dir = Some(work_dir.clone());
        }
        if let Some(revision) = &self.revision {
            launch.revision = Some(revision.clone());
        }
        if !self.profile.is_empty() {
            launch.config_profiles = self.profile.clone();
        }
        if let Some(path) = &self.params_file {
            launch.params_text = Some(read_text_file(path)?);
        }
        if let Some(path) = &self.config {
            launch.config_text = Some(read_text_file(path)?);
        }
        if let Some(path) = &self.pre_run {
            launch.pre_run_script = Some(read_text_file(path)?);
        }
        if let Some(path) = &self.post_run {
            launch.post_run_script = Some(read_text_file(path)?);
        }
        if let Some(main_script) = &self.main_script {
            launch.main_script = Some(main_script.clone());
        }
        if let Some(entry_name) = &self.entry_name {
            launch.entry_name = Some(entry_name.clone());
        }
        if self.pull_latest {
            launch.pull_latest = Some(true);
        }
        if self.stub_run {
            launch.stub_run = Some(true);
        }
        for reference in &self.labels {
            let label = resolve_label(client, workspace_id, reference).await?;
            if !launch.label_ids.contains(&label.id) {
                launch.label_ids.push(label.id);
            }
        }
        Ok(())
    }
}

/// Fall back to the workspace's primary compute environment
pub async fn ensure_compute_env(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    launch: &mut Launch,
) -> Result<()> {
    if launch.compute_env_id.is_some() {
        return Ok(());
    }
    let primary = client
        .compute_envs()
        .primary(workspace_id)
        .await
        .context("No --compute-env given and no primary compute environment found")?;
    tracing::debug!(compute_env = %primary.name, "Using primary compute environment");
    launch.compute_env_id = Some(primary.id);
    if launch.work_dir.is_none() {
        launch.work_dir = primary.work_dir;
    }
    Ok(())
}

/// Whether a pipeline argument is a repository URL rather than a Launchpad reference
pub fn is_repository_url(pipeline: &str) -> bool {
    pipeline.contains("://")
}

/// `seqera launch` arguments
#[derive(Args)]
pub struct LaunchArgs {
    /// Launchpad pipeline id or name, or a repository URL
    pub pipeline: String,

    /// Custom run name
    #[arg(long)]
    pub name: Option<String>,

    #[command(flatten)]
    pub options: LaunchOptions,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchResponse {
    pub workflow_id: String,
    pub pipeline: String,
    pub workspace: String,
}

impl Render for LaunchResponse {
    fn to_console(&self) -> String {
        format!(
            "{}\n  Workflow ID: {}\n  Pipeline:    {}\n  Workspace:   {}",
            "✓ Workflow submitted!".green().bold(),
            self.workflow_id.cyan(),
            self.pipeline,
            self.workspace
        )
    }
}

/// Handle `seqera launch`
pub async fn handle_launch_command(args: LaunchArgs, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    let mut launch = if is_repository_url(&args.pipeline) {
        Launch {
            pipeline: args.pipeline.clone(),
            ..Default::default()
        }
    } else {
        let pipeline = resolve_pipeline(&client, ws, &args.pipeline).await?;
        client
            .pipelines()
            .launch_info(pipeline.pipeline_id, ws)
            .await
            .with_context(|| format!("Failed to load launch settings of '{}'", pipeline.name))?
            .into_request()
    };

    args.options.apply(&client, ws, &mut launch).await?;
    ensure_compute_env(&client, ws, &mut launch).await?;
    if let Some(name) = args.name {
        launch.run_name = Some(name);
    }

    let workflow_id = client.runs().launch(ws, launch).await?;
    output::print(
        &LaunchResponse {
            workflow_id,
            pipeline: args.pipeline,
            workspace: workspace_label(config),
        },
        config.output,
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;
    use axum::http::Method;
    use serde_json::json;

    #[test]
    fn test_is_repository_url() {
        assert!(is_repository_url("https://github.com/nf-core/rnaseq"));
        assert!(!is_repository_url("rnaseq"));
        assert!(!is_repository_url("42"));
    }

    #[test]
    fn test_launch_response_console() {
        output::plain();
        let console = LaunchResponse {
            workflow_id: "4Bv8y".to_string(),
            pipeline: "rnaseq".to_string(),
            workspace: "acme/prod".to_string(),
        }
        .to_console();
        assert!(console.starts_with("✓ Workflow submitted!"));
        assert!(console.contains("Workflow ID: 4Bv8y"));
    }

    #[tokio::test]
    async fn test_launch_url_uses_primary_compute_env() {
        let api = MockApi::new();
        api.on(
            Method::GET,
            "/compute-envs/primary",
            json!({ "computeEnv": {
                "id": "ce-1", "name": "aws", "platform": "aws-batch", "workDir": "s3://bucket/work"
            } }),
        );
        api.on(Method::POST, "/workflow/launch", json!({ "workflowId": "run-1" }));
        let mut config = api.config().await;
        config.workspace = Some("10".to_string());

        let dir = std::env::temp_dir().join(format!("seqera-launch-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let params = dir.join("params.yaml");
        std::fs::write(&params, "input: samples.csv\n").unwrap();

        let args = LaunchArgs {
            pipeline: "https://github.com/nf-core/rnaseq".to_string(),
            name: Some("first-try".to_string()),
            options: LaunchOptions {
                revision: Some("3.14.0".to_string()),
                profile: vec!["test".to_string(), "docker".to_string()],
                params_file: Some(params),
                ..Default::default()
            },
        };
        handle_launch_command(args, &config).await.unwrap();
        std::fs::remove_dir_all(&dir).ok();

        let body = &api.bodies(Method::POST, "/workflow/launch")[0];
        let launch = &body["launch"];
        assert_eq!(launch["pipeline"], "https://github.com/nf-core/rnaseq");
        assert_eq!(launch["computeEnvId"], "ce-1");
        assert_eq!(launch["workDir"], "s3://bucket/work");
        assert_eq!(launch["revision"], "3.14.0");
        assert_eq!(launch["configProfiles"], json!(["test", "docker"]));
        assert_eq!(launch["paramsText"], "input: samples.csv\n");
        assert_eq!(launch["runName"], "first-try");
    }
}

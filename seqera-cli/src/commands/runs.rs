//! Run (workflow) command handlers

use anyhow::{Context, Result};
use clap::Subcommand;
use colored::*;
use serde::Serialize;

use seqera_core::domain::workflow::{ListedWorkflow, WorkflowStatus};
use seqera_core::dto::Page;
use seqera_core::dto::workflow::DescribeWorkflowResponse;

use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, fmt_date, listing, or_dash};
use crate::resolver::workspace_id;

/// Run subcommands
#[derive(Subcommand)]
pub enum RunCommands {
    /// List pipeline runs
    List {
        /// Filter on run name, project, `status:` or `label:`
        #[arg(long)]
        filter: Option<String>,
        /// Page size (all pages are fetched when unset)
        #[arg(long)]
        max: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show a run with its task counters
    View {
        /// Run id
        id: String,
    },
    /// Cancel a running workflow
    Cancel {
        /// Run id
        id: String,
    },
    /// Delete a run record
    Delete {
        /// Run id
        id: String,
    },
    /// Launch a run again with its original settings
    Relaunch {
        /// Run id
        id: String,
        /// Start from scratch instead of resuming cached tasks
        #[arg(long)]
        no_resume: bool,
    },
}

/// Human readable duration from milliseconds
pub fn fmt_duration(millis: Option<i64>) -> String {
    let Some(millis) = millis else {
        return "-".to_string();
    };
    let secs = millis / 1000;
    let (h, m, s) = (secs / 3600, (secs % 3600) / 60, secs % 60);
    if h > 0 {
        format!("{}h {}m {}s", h, m, s)
    } else if m > 0 {
        format!("{}m {}s", m, s)
    } else {
        format!("{}s", s)
    }
}

fn colored_status(status: WorkflowStatus) -> ColoredString {
    let text = status.to_string();
    match status {
        WorkflowStatus::Succeeded => text.green(),
        WorkflowStatus::Failed => text.red(),
        WorkflowStatus::Cancelled | WorkflowStatus::Unknown => text.yellow(),
        WorkflowStatus::Submitted | WorkflowStatus::Running => text.cyan(),
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunList {
    pub runs: Vec<ListedWorkflow>,
    pub total_size: i64,
}

impl Render for RunList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "STATUS", "PROJECT", "RUN NAME", "USER", "SUBMITTED"]);
        for run in &self.runs {
            let wf = &run.workflow;
            table.row(vec![
                wf.id.clone(),
                wf.status.to_string(),
                wf.project_name.clone(),
                wf.run_name.clone(),
                or_dash(wf.user_name.as_deref()),
                fmt_date(wf.submit),
            ]);
        }
        listing(
            &format!("Runs ({} of {}):", self.runs.len(), self.total_size),
            "No runs found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct RunView {
    #[serde(flatten)]
    pub run: DescribeWorkflowResponse,
}

impl Render for RunView {
    fn to_console(&self) -> String {
        let wf = &self.run.workflow;
        let labels = self
            .run
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
            "Run Details:",
            &[
                ("ID", wf.id.clone()),
                ("Run name", wf.run_name.clone()),
                ("Status", colored_status(wf.status).to_string()),
                ("Project", wf.project_name.clone()),
                ("Revision", or_dash(wf.revision.as_deref())),
                ("Commit", or_dash(wf.commit_id.as_deref())),
                ("Work dir", or_dash(wf.work_dir.as_deref())),
                ("User", or_dash(wf.user_name.as_deref())),
                ("Submitted", fmt_date(wf.submit)),
                ("Started", fmt_date(wf.start)),
                ("Completed", fmt_date(wf.complete)),
                ("Duration", fmt_duration(wf.duration)),
                ("Exit status", or_dash(wf.exit_status)),
                ("Labels", or_dash(labels)),
            ],
        );

        if let Some(error) = &wf.error_message {
            out.push_str(&format!("  {} {}\n", "Error:".red().bold(), error));
        }

        if let Some(progress) = &self.run.progress {
            let p = &progress.workflow_progress;
            out.push('\n');
            out.push_str(&details(
                &format!("Tasks ({}):", p.total()),
                &[
                    ("Pending", p.pending.to_string()),
                    ("Submitted", p.submitted.to_string()),
                    ("Running", p.running.to_string()),
                    ("Succeeded", p.succeeded.to_string()),
                    ("Failed", p.failed.to_string()),
                    ("Cached", p.cached.to_string()),
                ],
            ));
        }
        out
    }
}

/// Handle run commands
pub async fn handle_run_command(command: RunCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        RunCommands::List { filter, max, offset } => {
            let search = filter.as_deref();
            let list = if max.is_some() || offset.is_some() {
                let page = client.runs().list(ws, search, Page { max, offset }).await?;
                RunList {
                    runs: page.items,
                    total_size: page.total_size,
                }
            } else {
                let runs = client.runs().list_all(ws, search).await?;
                RunList {
                    total_size: runs.len() as i64,
                    runs,
                }
            };
            output::print(&list, config.output)
        }
        RunCommands::View { id } => {
            let run = client
                .runs()
                .get(&id, ws)
                .await
                .with_context(|| format!("Failed to fetch run {}", id))?;
            output::print(&RunView { run }, config.output)
        }
        RunCommands::Cancel { id } => {
            client.runs().cancel(&id, ws).await?;
            output::print(&Message::with_id("Run cancelled", id), config.output)
        }
        RunCommands::Delete { id } => {
            client.runs().delete(&id, ws).await?;
            output::print(&Message::with_id("Run deleted", id), config.output)
        }
        RunCommands::Relaunch { id, no_resume } => {
            let new_id = client.runs().relaunch(&id, ws, !no_resume).await?;
            let message = if no_resume {
                format!("Run {} relaunched", id)
            } else {
                format!("Run {} resumed", id)
            };
            output::print(&Message::with_id(message, new_id), config.output)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;
    use axum::http::Method;
    use serde_json::json;

    fn listed() -> ListedWorkflow {
        serde_json::from_value(json!({
            "workflow": {
                "id": "4Bw9",
                "runName": "angry_euler",
                "projectName": "nextflow-io/hello",
                "status": "SUCCEEDED",
                "userName": "jdoe",
                "submit": "2024-03-01T10:00:00Z"
            }
        }))
        .unwrap()
    }

    #[test]
    fn test_fmt_duration() {
        assert_eq!(fmt_duration(None), "-");
        assert_eq!(fmt_duration(Some(999)), "0s");
        assert_eq!(fmt_duration(Some(61_000)), "1m 1s");
        assert_eq!(fmt_duration(Some(3_723_000)), "1h 2m 3s");
    }

    #[test]
    fn test_run_list_console() {
        output::plain();
        let console = RunList {
            runs: vec![listed()],
            total_size: 1,
        }
        .to_console();
        let lines: Vec<_> = console.lines().collect();
        assert_eq!(lines[0], "Runs (1 of 1):");
        assert_eq!(
            lines[4],
            "  4Bw9  SUCCEEDED  nextflow-io/hello  angry_euler  jdoe  2024-03-01 10:00:00"
        );
    }

    #[test]
    fn test_run_view_json_is_flat() {
        let run: DescribeWorkflowResponse = serde_json::from_value(json!({
            "workflow": listed().workflow,
            "progress": { "workflowProgress": { "succeeded": 3, "failed": 1 } }
        }))
        .unwrap();
        let value: serde_json::Value = serde_json::from_str(
            &output::render(&RunView { run }, output::OutputFormat::Json).unwrap(),
        )
        .unwrap();
        assert_eq!(value["workflow"]["id"], "4Bw9");
        assert_eq!(value["progress"]["workflowProgress"]["failed"], 1);
    }

    #[test]
    fn test_run_view_console_shows_tasks() {
        output::plain();
        let run: DescribeWorkflowResponse = serde_json::from_value(json!({
            "workflow": listed().workflow,
            "progress": { "workflowProgress": { "succeeded": 3, "failed": 1 } }
        }))
        .unwrap();
        let console = RunView { run }.to_console();
        assert!(console.contains("Status:      SUCCEEDED"));
        assert!(console.contains("Tasks (4):"));
        assert!(console.contains("Succeeded: 3"));
    }

    #[tokio::test]
    async fn test_cancel_posts_to_run() {
        let api = MockApi::new();
        api.on(Method::POST, "/workflow/4Bw9/cancel", json!({}));
        let config = api.config().await;

        handle_run_command(RunCommands::Cancel { id: "4Bw9".to_string() }, &config)
            .await
            .unwrap();
        assert_eq!(api.hits("/workflow/4Bw9/cancel"), 1);
    }
}

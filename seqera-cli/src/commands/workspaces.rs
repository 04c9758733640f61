//! Workspace command handlers

use anyhow::{Result, anyhow};
use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use seqera_core::domain::workspace::{Visibility, Workspace};
use seqera_core::dto::workspace::{UpdateWorkspace, WorkspaceDraft};

use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, fmt_date, listing, or_dash};
use crate::resolver::{resolve_org, resolve_workspace};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum VisibilityArg {
    Private,
    Shared,
}

impl From<VisibilityArg> for Visibility {
    fn from(value: VisibilityArg) -> Self {
        match value {
            VisibilityArg::Private => Visibility::Private,
            VisibilityArg::Shared => Visibility::Shared,
        }
    }
}

/// Workspace subcommands
#[derive(Subcommand)]
pub enum WorkspaceCommands {
    /// List workspaces, of one organization or of the authenticated user
    List {
        /// Organization id or name
        #[arg(long)]
        organization: Option<String>,
    },
    /// Show workspace details (defaults to --workspace)
    View {
        /// Workspace id or `organization/workspace`
        workspace: Option<String>,
    },
    /// Create a workspace
    Add {
        /// Organization id or name
        #[arg(long)]
        organization: String,
        /// Short name (used in references)
        name: String,
        #[arg(short, long)]
        full_name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long, value_enum, default_value_t = VisibilityArg::Private)]
        visibility: VisibilityArg,
    },
    /// Update a workspace (defaults to --workspace)
    Update {
        /// Workspace id or `organization/workspace`
        workspace: Option<String>,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(short, long)]
        full_name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(long, value_enum)]
        visibility: Option<VisibilityArg>,
    },
    /// Delete a workspace
    Delete {
        /// Workspace id or `organization/workspace`
        workspace: String,
    },
}

/// One row of a workspace listing
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceRow {
    pub org_name: String,
    pub workspace_id: i64,
    pub workspace_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WorkspaceList {
    pub workspaces: Vec<WorkspaceRow>,
}

impl Render for WorkspaceList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "ORGANIZATION", "NAME", "FULL NAME", "VISIBILITY"]);
        for ws in &self.workspaces {
            table.row(vec![
                ws.workspace_id.to_string(),
                ws.org_name.clone(),
                ws.workspace_name.clone(),
                or_dash(ws.full_name.as_deref()),
                or_dash(ws.visibility.as_deref()),
            ]);
        }
        listing(
            &format!("Workspaces ({}):", self.workspaces.len()),
            "No workspaces found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceView {
    pub organization: String,
    pub workspace: Workspace,
}

impl Render for WorkspaceView {
    fn to_console(&self) -> String {
        let ws = &self.workspace;
        details(
            "Workspace Details:",
            &[
                ("ID", ws.id.to_string()),
                ("Reference", format!("{}/{}", self.organization, ws.name)),
                ("Full name", ws.full_name.clone()),
                ("Description", or_dash(ws.description.as_deref())),
                ("Visibility", ws.visibility.to_string()),
                ("Created", fmt_date(ws.date_created)),
                ("Updated", fmt_date(ws.last_updated)),
            ],
        )
    }
}

/// Handle workspace commands
pub async fn handle_workspace_command(command: WorkspaceCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    // Explicit positional reference, else the global --workspace
    let target = |reference: Option<String>| {
        reference
            .or_else(|| config.workspace.clone())
            .ok_or_else(|| anyhow!("No workspace given: pass one or use --workspace"))
    };

    match command {
        WorkspaceCommands::List { organization } => {
            let workspaces = match organization {
                Some(organization) => {
                    let org = resolve_org(&client, &organization).await?;
                    client
                        .workspaces()
                        .list(org.org_id)
                        .await?
                        .into_iter()
                        .map(|ws| WorkspaceRow {
                            org_name: org.name.clone(),
                            workspace_id: ws.id,
                            workspace_name: ws.name,
                            full_name: Some(ws.full_name),
                            visibility: Some(ws.visibility.to_string()),
                        })
                        .collect()
                }
                None => client
                    .user()
                    .my_workspaces()
                    .await?
                    .into_iter()
                    .filter_map(|entry| {
                        Some(WorkspaceRow {
                            workspace_id: entry.workspace_id?,
                            workspace_name: entry.workspace_name?,
                            org_name: entry.org_name,
                            full_name: entry.workspace_full_name,
                            visibility: entry.visibility,
                        })
                    })
                    .collect(),
            };
            output::print(&WorkspaceList { workspaces }, config.output)
        }
        WorkspaceCommands::View { workspace } => {
            let resolved = resolve_workspace(&client, &target(workspace)?).await?;
            let workspace = client
                .workspaces()
                .get(resolved.org_id, resolved.workspace_id)
                .await?;
            output::print(
                &WorkspaceView {
                    organization: resolved.org_name,
                    workspace,
                },
                config.output,
            )
        }
        WorkspaceCommands::Add {
            organization,
            name,
            full_name,
            description,
            visibility,
        } => {
            let org = resolve_org(&client, &organization).await?;
            let draft = WorkspaceDraft {
                name,
                full_name,
                description,
                visibility: visibility.into(),
            };
            let workspace = client.workspaces().add(org.org_id, draft).await?;
            output::print(
                &Message::with_id(
                    format!("Workspace '{}/{}' added", org.name, workspace.name),
                    workspace.id,
                ),
                config.output,
            )
        }
        WorkspaceCommands::Update {
            workspace,
            new_name,
            full_name,
            description,
            visibility,
        } => {
            let resolved = resolve_workspace(&client, &target(workspace)?).await?;
            let update = UpdateWorkspace {
                name: new_name,
                full_name,
                description,
                visibility: visibility.map(Visibility::from),
            };
            let workspace = client
                .workspaces()
                .update(resolved.org_id, resolved.workspace_id, &update)
                .await?;
            output::print(
                &Message::with_id(
                    format!("Workspace '{}/{}' updated", resolved.org_name, workspace.name),
                    workspace.id,
                ),
                config.output,
            )
        }
        WorkspaceCommands::Delete { workspace } => {
            let resolved = resolve_workspace(&client, &workspace).await?;
            client
                .workspaces()
                .delete(resolved.org_id, resolved.workspace_id)
                .await?;
            output::print(
                &Message::with_id(
                    format!("Workspace '{}' deleted", resolved.reference()),
                    resolved.workspace_id,
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

    #[test]
    fn test_workspace_list_console() {
        output::plain();
        let console = WorkspaceList {
            workspaces: vec![WorkspaceRow {
                org_name: "acme".to_string(),
                workspace_id: 10,
                workspace_name: "prod".to_string(),
                full_name: None,
                visibility: Some("PRIVATE".to_string()),
            }],
        }
        .to_console();

        assert!(console.starts_with("Workspaces (1):"));
        assert!(console.contains("10  acme          prod  -          PRIVATE"));
    }

    #[tokio::test]
    async fn test_update_targets_resolved_workspace() {
        let api = MockApi::new();
        api.on(
            Method::GET,
            "/user-info",
            json!({ "user": { "id": 7, "userName": "jdoe", "email": "jdoe@example.com" } }),
        );
        api.on(
            Method::GET,
            "/user/7/workspaces",
            json!({ "orgsAndWorkspaces": [
                { "orgId": 1, "orgName": "acme", "workspaceId": 10, "workspaceName": "prod" }
            ] }),
        );
        api.on(
            Method::PUT,
            "/orgs/1/workspaces/10",
            json!({ "workspace": {
                "id": 10, "name": "prod", "fullName": "Production", "visibility": "SHARED"
            } }),
        );
        let mut config = api.config().await;
        config.workspace = Some("acme/prod".to_string());

        handle_workspace_command(
            WorkspaceCommands::Update {
                workspace: None,
                new_name: None,
                full_name: Some("Production".to_string()),
                description: None,
                visibility: Some(VisibilityArg::Shared),
            },
            &config,
        )
        .await
        .unwrap();

        assert_eq!(
            api.bodies(Method::PUT, "/orgs/1/workspaces/10"),
            vec![json!({ "fullName": "Production", "visibility": "SHARED" })]
        );
    }
}

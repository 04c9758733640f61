//! Reference resolver module
//!
//! Turns the references users type (numeric ids, names, `organization/workspace`)
//! into the ids the API expects.
//!
//! Name matching is exact. No match is a not-found error; several matches
//! are an ambiguity error listing the candidates.

use std::str::FromStr;

use anyhow::{Context, Result, anyhow};
use seqera_client::SeqeraClient;
use seqera_core::domain::action::Action;
use seqera_core::domain::compute_env::ComputeEnv;
use seqera_core::domain::credentials::Credentials;
use seqera_core::domain::data_link::DataLink;
use seqera_core::domain::dataset::Dataset;
use seqera_core::domain::label::Label;
use seqera_core::domain::organization::{Member, Organization};
use seqera_core::domain::pipeline::Pipeline;
use seqera_core::domain::secret::PipelineSecret;
use seqera_core::domain::team::Team;
use seqera_core::domain::user::OrgAndWorkspace;
use seqera_core::domain::workspace::Participant;
use seqera_client::resources::LabelFilter;

use crate::config::Config;

// =============================================================================
// Workspaces
// =============================================================================

/// A workspace as typed on the command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum WorkspaceRef {
    Id(i64),
    Name { organization: String, workspace: String },
}

impl FromStr for WorkspaceRef {
    type Err = anyhow::Error;

    fn from_str(s: &str) -> Result<Self> {
        let s = s.trim();
        if let Ok(id) = s.parse::<i64>() {
            return Ok(WorkspaceRef::Id(id));
        }
        match s.split_once('/') {
            Some((org, ws)) if !org.is_empty() && !ws.is_empty() && !ws.contains('/') => {
                Ok(WorkspaceRef::Name {
                    organization: org.to_string(),
                    workspace: ws.to_string(),
                })
            }
            _ => Err(anyhow!(
                "Invalid workspace reference '{}': expected a numeric id or 'organization/workspace'",
                s
            )),
        }
    }
}

impl std::fmt::Display for WorkspaceRef {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            WorkspaceRef::Id(id) => write!(f, "{}", id),
            WorkspaceRef::Name {
                organization,
                workspace,
            } => write!(f, "{}/{}", organization, workspace),
        }
    }
}

/// A workspace together with its organization
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolvedWorkspace {
    pub org_id: i64,
    pub org_name: String,
    pub workspace_id: i64,
    pub workspace_name: String,
}

impl ResolvedWorkspace {
    /// `organization/workspace`
    pub fn reference(&self) -> String {
        format!("{}/{}", self.org_name, self.workspace_name)
    }
}

/// Find a workspace reference among the user's organizations and workspaces
pub fn match_workspace(
    entries: &[OrgAndWorkspace],
    reference: &WorkspaceRef,
) -> Result<ResolvedWorkspace> {
    let found = entries.iter().find(|entry| match reference {
        WorkspaceRef::Id(id) => entry.workspace_id == Some(*id),
        WorkspaceRef::Name {
            organization,
            workspace,
        } => {
            entry.org_name == *organization && entry.workspace_name.as_deref() == Some(workspace)
        }
    });

    match found {
        Some(entry) => Ok(ResolvedWorkspace {
            org_id: entry.org_id,
            org_name: entry.org_name.clone(),
            workspace_id: entry.workspace_id.unwrap_or_default(),
            workspace_name: entry.workspace_name.clone().unwrap_or_default(),
        }),
        None => Err(anyhow!("Workspace '{}' not found", reference)),
    }
}

/// Resolve a workspace reference through the user's workspace list
pub async fn resolve_workspace(client: &SeqeraClient, reference: &str) -> Result<ResolvedWorkspace> {
    let reference: WorkspaceRef = reference.parse()?;
    let entries = client
        .user()
        .my_workspaces()
        .await
        .context("Failed to fetch workspaces for reference resolution")?;
    match_workspace(&entries, &reference)
}

/// Workspace id selected with `--workspace`, `None` for the personal workspace
///
/// Numeric ids are used as given, without a lookup.
pub async fn workspace_id(client: &SeqeraClient, config: &Config) -> Result<Option<i64>> {
    match config.workspace.as_deref() {
        None => Ok(None),
        Some(reference) => match reference.parse::<WorkspaceRef>()? {
            WorkspaceRef::Id(id) => Ok(Some(id)),
            WorkspaceRef::Name { .. } => {
                Ok(Some(resolve_workspace(client, reference).await?.workspace_id))
            }
        },
    }
}

/// Workspace selected with `--workspace`, which must be set
pub async fn required_workspace(client: &SeqeraClient, config: &Config) -> Result<ResolvedWorkspace> {
    let reference = config
        .workspace
        .as_deref()
        .ok_or_else(|| anyhow!("This command needs a workspace: use --workspace or set SEQERA_WORKSPACE"))?;
    resolve_workspace(client, reference).await
}

/// Human readable name of the selected workspace
pub fn workspace_label(config: &Config) -> String {
    config
        .workspace
        .clone()
        .unwrap_or_else(|| "user".to_string())
}

// =============================================================================
// Generic matching
// =============================================================================

/// Pick the one item whose id or name equals `reference`
///
/// An id match wins over name matches.
pub fn pick<'a, T>(
    kind: &str,
    reference: &str,
    items: &'a [T],
    id: impl Fn(&T) -> String,
    name: impl Fn(&T) -> String,
) -> Result<&'a T> {
    if let Some(item) = items.iter().find(|item| id(item) == reference) {
        return Ok(item);
    }

    let matches: Vec<&T> = items.iter().filter(|item| name(item) == reference).collect();
    match matches.len() {
        0 => Err(anyhow!("No {} found with id or name '{}'", kind, reference)),
        1 => Ok(matches[0]),
        _ => {
            let ids: Vec<String> = matches.iter().map(|item| id(item)).collect();
            Err(anyhow!(
                "Ambiguous {} name '{}' matches several ids: {}",
                kind,
                reference,
                ids.join(", ")
            ))
        }
    }
}

// =============================================================================
// Organization scoped
// =============================================================================

pub async fn resolve_org(client: &SeqeraClient, reference: &str) -> Result<Organization> {
    let orgs = client
        .organizations()
        .list()
        .await
        .context("Failed to fetch organizations for reference resolution")?;
    pick(
        "organization",
        reference,
        &orgs,
        |o| o.org_id.to_string(),
        |o| o.name.clone(),
    )
    .cloned()
}

/// Resolve an organization member by user name or email
pub async fn resolve_member(client: &SeqeraClient, org_id: i64, user: &str) -> Result<Member> {
    let members = client
        .members()
        .list(org_id, Some(user))
        .await
        .context("Failed to fetch members for reference resolution")?;
    pick_member(&members, user).cloned()
}

pub fn pick_member<'a>(members: &'a [Member], user: &str) -> Result<&'a Member> {
    if let Some(member) = members.iter().find(|m| m.email == user) {
        return Ok(member);
    }
    pick(
        "member",
        user,
        members,
        |m| m.member_id.to_string(),
        |m| m.user_name.clone(),
    )
}

pub async fn resolve_team(client: &SeqeraClient, org_id: i64, reference: &str) -> Result<Team> {
    let teams = client
        .teams()
        .list(org_id)
        .await
        .context("Failed to fetch teams for reference resolution")?;
    pick(
        "team",
        reference,
        &teams,
        |t| t.team_id.to_string(),
        |t| t.name.clone(),
    )
    .cloned()
}

/// Resolve a workspace participant by user name, team name or email
pub async fn resolve_participant(
    client: &SeqeraClient,
    org_id: i64,
    workspace_id: i64,
    name: &str,
) -> Result<Participant> {
    let participants = client
        .participants()
        .list(org_id, workspace_id, None)
        .await
        .context("Failed to fetch participants for reference resolution")?;
    if let Some(found) = participants
        .iter()
        .find(|p| p.email.as_deref() == Some(name))
    {
        return Ok(found.clone());
    }
    pick(
        "participant",
        name,
        &participants,
        |p| p.participant_id.to_string(),
        |p| p.display_name().to_string(),
    )
    .cloned()
}

// =============================================================================
// Workspace scoped
// =============================================================================

pub async fn resolve_pipeline(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    reference: &str,
) -> Result<Pipeline> {
    // A numeric reference may still be the name of a pipeline.
    if let Ok(id) = reference.parse::<i64>() {
        match client.pipelines().get(id, workspace_id).await {
            Ok(pipeline) => return Ok(pipeline),
            Err(e) if e.is_not_found() => {}
            Err(e) => return Err(e.into()),
        }
    }
    let pipelines = client
        .pipelines()
        .list_all(workspace_id, Some(reference))
        .await
        .context("Failed to fetch pipelines for reference resolution")?;
    pick(
        "pipeline",
        reference,
        &pipelines,
        |p| p.pipeline_id.to_string(),
        |p| p.name.clone(),
    )
    .cloned()
}

pub async fn resolve_compute_env(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    reference: &str,
) -> Result<ComputeEnv> {
    let envs = client
        .compute_envs()
        .list(workspace_id, None)
        .await
        .context("Failed to fetch compute environments for reference resolution")?;
    pick(
        "compute environment",
        reference,
        &envs,
        |c| c.id.clone(),
        |c| c.name.clone(),
    )
    .cloned()
}

pub async fn resolve_credentials(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    reference: &str,
) -> Result<Credentials> {
    let credentials = client
        .credentials()
        .list(workspace_id, None)
        .await
        .context("Failed to fetch credentials for reference resolution")?;
    pick(
        "credentials",
        reference,
        &credentials,
        |c| c.id.clone(),
        |c| c.name.clone(),
    )
    .cloned()
}

pub async fn resolve_action(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    reference: &str,
) -> Result<Action> {
    let actions = client
        .actions()
        .list(workspace_id)
        .await
        .context("Failed to fetch actions for reference resolution")?;
    pick(
        "action",
        reference,
        &actions,
        |a| a.id.clone(),
        |a| a.name.clone(),
    )
    .cloned()
}

/// Resolve a label by id, name, or `name=value` for resource labels
pub async fn resolve_label(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    reference: &str,
) -> Result<Label> {
    let labels = client
        .labels()
        .list(workspace_id, LabelFilter::All)
        .await
        .context("Failed to fetch labels for reference resolution")?;
    pick_label(&labels, reference).cloned()
}

pub fn pick_label<'a>(labels: &'a [Label], reference: &str) -> Result<&'a Label> {
    let name: fn(&Label) -> String = if reference.contains('=') {
        |l| l.to_string()
    } else {
        |l| l.name.clone()
    };
    pick("label", reference, labels, |l| l.id.to_string(), name)
}

pub async fn resolve_secret(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    reference: &str,
) -> Result<PipelineSecret> {
    let secrets = client
        .secrets()
        .list(workspace_id)
        .await
        .context("Failed to fetch secrets for reference resolution")?;
    pick(
        "secret",
        reference,
        &secrets,
        |s| s.id.to_string(),
        |s| s.name.clone(),
    )
    .cloned()
}

pub async fn resolve_dataset(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    reference: &str,
) -> Result<Dataset> {
    let datasets = client
        .datasets()
        .list(workspace_id)
        .await
        .context("Failed to fetch datasets for reference resolution")?;
    pick(
        "dataset",
        reference,
        &datasets,
        |d| d.id.clone(),
        |d| d.name.clone(),
    )
    .cloned()
}

pub async fn resolve_data_link(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    reference: &str,
) -> Result<DataLink> {
    let links = client
        .data_links()
        .list_all(workspace_id, None, None)
        .await
        .context("Failed to fetch data links for reference resolution")?;
    pick(
        "data link",
        reference,
        &links,
        |l| l.id.clone(),
        |l| l.name.clone(),
    )
    .cloned()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;
    use axum::http::Method;
    use serde_json::json;

    fn entry(org_id: i64, org: &str, ws_id: Option<i64>, ws: Option<&str>) -> OrgAndWorkspace {
        serde_json::from_value(json!({
            "orgId": org_id,
            "orgName": org,
            "workspaceId": ws_id,
            "workspaceName": ws,
        }))
        .unwrap()
    }

    fn label(id: i64, name: &str, value: Option<&str>) -> Label {
        Label {
            id,
            name: name.to_string(),
            value: value.map(str::to_string),
            resource: value.is_some(),
            is_default: false,
        }
    }

    #[test]
    fn test_parse_workspace_ref() {
        assert_eq!("42".parse::<WorkspaceRef>().unwrap(), WorkspaceRef::Id(42));
        assert_eq!(
            "acme/prod".parse::<WorkspaceRef>().unwrap(),
            WorkspaceRef::Name {
                organization: "acme".to_string(),
                workspace: "prod".to_string()
            }
        );
        assert!("acme".parse::<WorkspaceRef>().is_err());
        assert!("acme/".parse::<WorkspaceRef>().is_err());
        assert!("a/b/c".parse::<WorkspaceRef>().is_err());
    }

    #[test]
    fn test_match_workspace_by_name_and_id() {
        let entries = vec![
            entry(1, "acme", None, None),
            entry(1, "acme", Some(10), Some("prod")),
            entry(2, "other", Some(20), Some("prod")),
        ];

        let by_name = match_workspace(&entries, &"other/prod".parse().unwrap()).unwrap();
        assert_eq!(by_name.org_id, 2);
        assert_eq!(by_name.workspace_id, 20);

        let by_id = match_workspace(&entries, &WorkspaceRef::Id(10)).unwrap();
        assert_eq!(by_id.reference(), "acme/prod");

        let err = match_workspace(&entries, &"acme/dev".parse().unwrap()).unwrap_err();
        assert_eq!(err.to_string(), "Workspace 'acme/dev' not found");
    }

    #[test]
    fn test_pick_prefers_id_then_unique_name() {
        let labels = vec![label(1, "env", Some("prod")), label(2, "env", Some("dev")), label(3, "qc", None)];

        assert_eq!(pick_label(&labels, "2").unwrap().id, 2);
        assert_eq!(pick_label(&labels, "qc").unwrap().id, 3);
        assert_eq!(pick_label(&labels, "env=dev").unwrap().id, 2);

        let err = pick_label(&labels, "env").unwrap_err();
        assert_eq!(
            err.to_string(),
            "Ambiguous label name 'env' matches several ids: 1, 2"
        );
        let err = pick_label(&labels, "missing").unwrap_err();
        assert_eq!(err.to_string(), "No label found with id or name 'missing'");
    }

    #[test]
    fn test_pick_member_by_email() {
        let members: Vec<Member> = serde_json::from_value(json!([
            { "memberId": 5, "userName": "jdoe", "email": "jdoe@example.com", "role": "owner" },
            { "memberId": 6, "userName": "asmith", "email": "asmith@example.com", "role": "member" }
        ]))
        .unwrap();

        assert_eq!(pick_member(&members, "asmith@example.com").unwrap().member_id, 6);
        assert_eq!(pick_member(&members, "jdoe").unwrap().member_id, 5);
        assert!(pick_member(&members, "nobody").is_err());
    }

    #[tokio::test]
    async fn test_workspace_id_resolves_names_through_user_workspaces() {
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
        let mut config = api.config().await;
        let client = config.client().unwrap();

        config.workspace = Some("acme/prod".to_string());
        assert_eq!(workspace_id(&client, &config).await.unwrap(), Some(10));

        config.workspace = Some("99".to_string());
        assert_eq!(workspace_id(&client, &config).await.unwrap(), Some(99));

        config.workspace = None;
        assert_eq!(workspace_id(&client, &config).await.unwrap(), None);
        assert_eq!(api.hits("/user-info"), 1);
    }

    #[tokio::test]
    async fn test_resolve_pipeline_by_name() {
        let api = MockApi::new();
        api.on(
            Method::GET,
            "/pipelines",
            json!({ "pipelines": [
                { "pipelineId": 3, "name": "rnaseq" },
                { "pipelineId": 4, "name": "rnaseq-dev" }
            ], "totalSize": 2 }),
        );
        let config = api.config().await;
        let client = config.client().unwrap();

        let pipeline = resolve_pipeline(&client, Some(1), "rnaseq").await.unwrap();
        assert_eq!(pipeline.pipeline_id, 3);

        let err = resolve_pipeline(&client, Some(1), "sarek").await.unwrap_err();
        assert_eq!(err.to_string(), "No pipeline found with id or name 'sarek'");
    }

    #[tokio::test]
    async fn test_resolve_pipeline_numeric_name_falls_back_to_names() {
        let api = MockApi::new();
        api.on(
            Method::GET,
            "/pipelines",
            json!({ "pipelines": [{ "pipelineId": 7, "name": "2024" }], "totalSize": 1 }),
        );
        let config = api.config().await;
        let client = config.client().unwrap();

        let pipeline = resolve_pipeline(&client, Some(1), "2024").await.unwrap();
        assert_eq!(pipeline.pipeline_id, 7);
        assert_eq!(api.hits("/pipelines/2024"), 1);
    }

    #[tokio::test]
    async fn test_resolve_data_link_walks_every_page() {
        let api = MockApi::new();
        api.on_query(
            Method::GET,
            "/data-links",
            ("offset", "0"),
            json!({ "dataLinks": [{ "id": "v1-a", "name": "first", "resourceRef": "s3://a", "provider": "aws" }], "totalSize": 2 }),
        );
        api.on_query(
            Method::GET,
            "/data-links",
            ("offset", "1"),
            json!({ "dataLinks": [{ "id": "v1-b", "name": "second", "resourceRef": "s3://b", "provider": "aws" }], "totalSize": 2 }),
        );
        let config = api.config().await;
        let client = config.client().unwrap();

        let link = resolve_data_link(&client, Some(1), "second").await.unwrap();
        assert_eq!(link.id, "v1-b");
        assert_eq!(api.hits("/data-links"), 2);
    }

    #[tokio::test]
    async fn test_resolve_label_walks_every_page() {
        let api = MockApi::new();
        api.on_query(
            Method::GET,
            "/labels",
            ("offset", "0"),
            json!({ "labels": [{ "id": 1, "name": "qc", "resource": false, "isDefault": false }], "totalSize": 2 }),
        );
        api.on_query(
            Method::GET,
            "/labels",
            ("offset", "1"),
            json!({ "labels": [{ "id": 2, "name": "env", "value": "prod", "resource": true, "isDefault": false }], "totalSize": 2 }),
        );
        let config = api.config().await;
        let client = config.client().unwrap();

        let label = resolve_label(&client, None, "env=prod").await.unwrap();
        assert_eq!(label.id, 2);
        assert_eq!(api.hits("/labels"), 2);
    }
}

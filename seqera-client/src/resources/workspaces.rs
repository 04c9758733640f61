//! Workspace endpoints

use crate::SeqeraClient;
use crate::error::Result;
use seqera_core::domain::workspace::Workspace;
use seqera_core::dto::workspace::{
    CreateWorkspace, DescribeWorkspaceResponse, ListWorkspacesResponse, UpdateWorkspace,
    WorkspaceDraft,
};

/// Handle for `/orgs/{orgId}/workspaces`
#[derive(Debug, Clone, Copy)]
pub struct Workspaces<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Workspace endpoints
    pub fn workspaces(&self) -> Workspaces<'_> {
        Workspaces { client: self }
    }
}

impl Workspaces<'_> {
    /// List the workspaces of an organization
    pub async fn list(&self, org_id: i64) -> Result<Vec<Workspace>> {
        let path = format!("/orgs/{}/workspaces", org_id);
        let response: ListWorkspacesResponse = self.client.get_json(&path, &[]).await?;
        Ok(response.workspaces)
    }

    /// Get a workspace
    pub async fn get(&self, org_id: i64, workspace_id: i64) -> Result<Workspace> {
        let path = format!("/orgs/{}/workspaces/{}", org_id, workspace_id);
        let response: DescribeWorkspaceResponse = self.client.get_json(&path, &[]).await?;
        Ok(response.workspace)
    }

    /// Create a workspace in an organization
    pub async fn add(&self, org_id: i64, draft: WorkspaceDraft) -> Result<Workspace> {
        let path = format!("/orgs/{}/workspaces", org_id);
        let body = CreateWorkspace { workspace: draft };
        let response: DescribeWorkspaceResponse =
            self.client.post_json(&path, &[], &body).await?;
        Ok(response.workspace)
    }

    /// Update a workspace; unset fields are left unchanged
    pub async fn update(
        &self,
        org_id: i64,
        workspace_id: i64,
        update: &UpdateWorkspace,
    ) -> Result<Workspace> {
        let path = format!("/orgs/{}/workspaces/{}", org_id, workspace_id);
        let response: DescribeWorkspaceResponse = self.client.put_json(&path, &[], update).await?;
        Ok(response.workspace)
    }

    /// Delete a workspace
    pub async fn delete(&self, org_id: i64, workspace_id: i64) -> Result<()> {
        let path = format!("/orgs/{}/workspaces/{}", org_id, workspace_id);
        self.client.delete(&path, &[]).await
    }
}

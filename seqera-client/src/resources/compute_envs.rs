//! Compute environment endpoints

use super::encode_segment;
use crate::error::Result;
use crate::{SeqeraClient, workspace_query};
use seqera_core::domain::compute_env::{ComputeEnv, ComputeEnvStatus};
use seqera_core::dto::compute_env::{
    ComputeEnvDraft, CreateComputeEnv, CreateComputeEnvResponse, DescribeComputeEnvResponse,
    ListComputeEnvsResponse,
};

/// Handle for `/compute-envs`
#[derive(Debug, Clone, Copy)]
pub struct ComputeEnvs<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Compute environment endpoints
    pub fn compute_envs(&self) -> ComputeEnvs<'_> {
        ComputeEnvs { client: self }
    }
}

impl ComputeEnvs<'_> {
    /// List compute environments, optionally filtered by status
    pub async fn list(
        &self,
        workspace_id: Option<i64>,
        status: Option<ComputeEnvStatus>,
    ) -> Result<Vec<ComputeEnv>> {
        let mut query = workspace_query(workspace_id);
        if let Some(status) = status {
            query.push(("status", status.to_string()));
        }
        let response: ListComputeEnvsResponse =
            self.client.get_json("/compute-envs", &query).await?;
        Ok(response.compute_envs)
    }

    /// Get a compute environment with its configuration
    pub async fn get(&self, compute_env_id: &str, workspace_id: Option<i64>) -> Result<ComputeEnv> {
        let path = format!("/compute-envs/{}", encode_segment(compute_env_id));
        let response: DescribeComputeEnvResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.compute_env)
    }

    /// Create a compute environment
    ///
    /// # Returns
    /// The id of the new compute environment
    pub async fn add(&self, workspace_id: Option<i64>, draft: ComputeEnvDraft) -> Result<String> {
        let body = CreateComputeEnv { compute_env: draft };
        let response: CreateComputeEnvResponse = self
            .client
            .post_json("/compute-envs", &workspace_query(workspace_id), &body)
            .await?;
        Ok(response.compute_env_id)
    }

    /// Delete a compute environment
    pub async fn delete(&self, compute_env_id: &str, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/compute-envs/{}", encode_segment(compute_env_id));
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }

    /// Get the primary compute environment of a workspace
    pub async fn primary(&self, workspace_id: Option<i64>) -> Result<ComputeEnv> {
        let response: DescribeComputeEnvResponse = self
            .client
            .get_json("/compute-envs/primary", &workspace_query(workspace_id))
            .await?;
        Ok(response.compute_env)
    }

    /// Make a compute environment the workspace's primary one
    pub async fn set_primary(&self, compute_env_id: &str, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/compute-envs/{}/primary", encode_segment(compute_env_id));
        self.client
            .post_empty::<()>(&path, &workspace_query(workspace_id), None)
            .await
    }
}

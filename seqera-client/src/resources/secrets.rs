//! Pipeline secret endpoints

use crate::error::Result;
use crate::{SeqeraClient, workspace_query};
use seqera_core::domain::secret::PipelineSecret;
use seqera_core::dto::secret::{
    CreateSecret, CreateSecretResponse, DescribeSecretResponse, ListSecretsResponse, UpdateSecret,
};

/// Handle for `/pipeline-secrets`
#[derive(Debug, Clone, Copy)]
pub struct Secrets<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Pipeline secret endpoints
    pub fn secrets(&self) -> Secrets<'_> {
        Secrets { client: self }
    }
}

impl Secrets<'_> {
    pub async fn list(&self, workspace_id: Option<i64>) -> Result<Vec<PipelineSecret>> {
        let response: ListSecretsResponse = self
            .client
            .get_json("/pipeline-secrets", &workspace_query(workspace_id))
            .await?;
        Ok(response.pipeline_secrets)
    }

    pub async fn get(&self, secret_id: i64, workspace_id: Option<i64>) -> Result<PipelineSecret> {
        let path = format!("/pipeline-secrets/{}", secret_id);
        let response: DescribeSecretResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.pipeline_secret)
    }

    /// Create a secret
    ///
    /// # Returns
    /// The id of the new secret
    pub async fn add(&self, workspace_id: Option<i64>, name: &str, value: &str) -> Result<i64> {
        let body = CreateSecret {
            name: name.to_string(),
            value: value.to_string(),
        };
        let response: CreateSecretResponse = self
            .client
            .post_json("/pipeline-secrets", &workspace_query(workspace_id), &body)
            .await?;
        Ok(response.secret_id)
    }

    /// Replace the value of a secret
    pub async fn update(&self, secret_id: i64, workspace_id: Option<i64>, value: &str) -> Result<()> {
        let path = format!("/pipeline-secrets/{}", secret_id);
        let body = UpdateSecret {
            value: value.to_string(),
        };
        self.client
            .put_empty(&path, &workspace_query(workspace_id), &body)
            .await
    }

    pub async fn delete(&self, secret_id: i64, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/pipeline-secrets/{}", secret_id);
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }
}

//! Credentials endpoints

use super::encode_segment;
use crate::error::Result;
use crate::{SeqeraClient, workspace_query};
use seqera_core::domain::credentials::Credentials;
use seqera_core::dto::credentials::{
    CreateCredentials, CreateCredentialsResponse, CredentialsDraft, DescribeCredentialsResponse,
    ListCredentialsResponse,
};

/// Handle for `/credentials`
#[derive(Debug, Clone, Copy)]
pub struct CredentialsResource<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Credentials endpoints
    pub fn credentials(&self) -> CredentialsResource<'_> {
        CredentialsResource { client: self }
    }
}

impl CredentialsResource<'_> {
    /// List credentials, optionally restricted to one provider
    pub async fn list(
        &self,
        workspace_id: Option<i64>,
        provider: Option<&str>,
    ) -> Result<Vec<Credentials>> {
        let mut query = workspace_query(workspace_id);
        if let Some(provider) = provider {
            query.push(("platformId", provider.to_string()));
        }
        let response: ListCredentialsResponse =
            self.client.get_json("/credentials", &query).await?;
        Ok(response.credentials)
    }

    /// Get credentials by id
    pub async fn get(&self, credentials_id: &str, workspace_id: Option<i64>) -> Result<Credentials> {
        let path = format!("/credentials/{}", encode_segment(credentials_id));
        let response: DescribeCredentialsResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.credentials)
    }

    /// Store new credentials
    ///
    /// # Returns
    /// The id of the new credentials
    pub async fn add(&self, workspace_id: Option<i64>, draft: CredentialsDraft) -> Result<String> {
        let body = CreateCredentials { credentials: draft };
        let response: CreateCredentialsResponse = self
            .client
            .post_json("/credentials", &workspace_query(workspace_id), &body)
            .await?;
        Ok(response.credentials_id)
    }

    /// Delete credentials
    pub async fn delete(&self, credentials_id: &str, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/credentials/{}", encode_segment(credentials_id));
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }
}

//! Organization endpoints

use crate::SeqeraClient;
use crate::error::Result;
use seqera_core::domain::organization::Organization;
use seqera_core::dto::organization::{
    CreateOrganization, DescribeOrganizationResponse, ListOrganizationsResponse,
    OrganizationDraft, UpdateOrganization,
};

/// Handle for `/orgs`
#[derive(Debug, Clone, Copy)]
pub struct Organizations<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Organization endpoints
    pub fn organizations(&self) -> Organizations<'_> {
        Organizations { client: self }
    }
}

impl Organizations<'_> {
    /// List the organizations the user belongs to
    pub async fn list(&self) -> Result<Vec<Organization>> {
        let response: ListOrganizationsResponse = self.client.get_json("/orgs", &[]).await?;
        Ok(response.organizations)
    }

    /// Get an organization by id
    pub async fn get(&self, org_id: i64) -> Result<Organization> {
        let path = format!("/orgs/{}", org_id);
        let response: DescribeOrganizationResponse = self.client.get_json(&path, &[]).await?;
        Ok(response.organization)
    }

    /// Create an organization
    ///
    /// # Example
    /// ```no_run
    /// # use seqera_client::SeqeraClient;
    /// # use seqera_core::dto::organization::OrganizationDraft;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = SeqeraClient::new("https://api.cloud.seqera.io").with_token("token");
    /// let org = client.organizations().add(OrganizationDraft {
    ///     name: "acme".to_string(),
    ///     full_name: "Acme Corp".to_string(),
    ///     ..Default::default()
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add(&self, draft: OrganizationDraft) -> Result<Organization> {
        let body = CreateOrganization {
            organization: draft,
        };
        let response: DescribeOrganizationResponse =
            self.client.post_json("/orgs", &[], &body).await?;
        Ok(response.organization)
    }

    /// Update an organization; unset fields are left unchanged
    pub async fn update(&self, org_id: i64, update: &UpdateOrganization) -> Result<()> {
        let path = format!("/orgs/{}", org_id);
        self.client.put_empty(&path, &[], update).await
    }

    /// Delete an organization
    pub async fn delete(&self, org_id: i64) -> Result<()> {
        let path = format!("/orgs/{}", org_id);
        self.client.delete(&path, &[]).await
    }
}

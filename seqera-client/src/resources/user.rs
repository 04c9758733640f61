//! User and service information endpoints

use crate::SeqeraClient;
use crate::error::Result;
use seqera_core::domain::user::{OrgAndWorkspace, ServiceInfo, User};
use seqera_core::dto::user::{ListWorkspacesAndOrgResponse, ServiceInfoResponse, UserInfoResponse};

/// Handle for the authenticated user and the service itself
#[derive(Debug, Clone, Copy)]
pub struct UserResource<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// User and service information endpoints
    pub fn user(&self) -> UserResource<'_> {
        UserResource { client: self }
    }
}

impl UserResource<'_> {
    /// Get the user owning the access token
    pub async fn info(&self) -> Result<User> {
        let response: UserInfoResponse = self.client.get_json("/user-info", &[]).await?;
        Ok(response.user)
    }

    /// List the organizations and workspaces a user belongs to
    ///
    /// # Arguments
    /// * `user_id` - The user id, as returned by [`UserResource::info`]
    pub async fn workspaces(&self, user_id: i64) -> Result<Vec<OrgAndWorkspace>> {
        let path = format!("/user/{}/workspaces", user_id);
        let response: ListWorkspacesAndOrgResponse = self.client.get_json(&path, &[]).await?;
        Ok(response.orgs_and_workspaces)
    }

    /// List the organizations and workspaces of the authenticated user
    pub async fn my_workspaces(&self) -> Result<Vec<OrgAndWorkspace>> {
        let user = self.info().await?;
        self.workspaces(user.id).await
    }

    /// Get the Platform version information
    pub async fn service_info(&self) -> Result<ServiceInfo> {
        let response: ServiceInfoResponse = self.client.get_json("/service-info", &[]).await?;
        Ok(response.service_info)
    }
}

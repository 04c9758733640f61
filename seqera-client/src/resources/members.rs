//! Organization member endpoints

use crate::SeqeraClient;
use crate::error::Result;
use seqera_core::domain::organization::{Member, OrgRole};
use seqera_core::dto::organization::{
    AddMember, AddMemberResponse, ListMembersResponse, UpdateMemberRole,
};

/// Handle for `/orgs/{orgId}/members`
#[derive(Debug, Clone, Copy)]
pub struct Members<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Organization member endpoints
    pub fn members(&self) -> Members<'_> {
        Members { client: self }
    }
}

impl Members<'_> {
    /// List the members of an organization
    ///
    /// # Arguments
    /// * `org_id` - The organization id
    /// * `search` - Optional filter on user name or email
    pub async fn list(&self, org_id: i64, search: Option<&str>) -> Result<Vec<Member>> {
        let path = format!("/orgs/{}/members", org_id);
        let mut query = Vec::new();
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        let response: ListMembersResponse = self.client.get_json(&path, &query).await?;
        Ok(response.members)
    }

    /// Invite a user, by user name or email, into an organization
    pub async fn add(&self, org_id: i64, user: &str) -> Result<Member> {
        let path = format!("/orgs/{}/members/add", org_id);
        let body = AddMember {
            user: user.to_string(),
        };
        let response: AddMemberResponse = self.client.put_json(&path, &[], &body).await?;
        Ok(response.member)
    }

    /// Remove a member from an organization
    pub async fn delete(&self, org_id: i64, member_id: i64) -> Result<()> {
        let path = format!("/orgs/{}/members/{}", org_id, member_id);
        self.client.delete(&path, &[]).await
    }

    /// Change the organization role of a member
    pub async fn update_role(&self, org_id: i64, member_id: i64, role: OrgRole) -> Result<()> {
        let path = format!("/orgs/{}/members/{}/role", org_id, member_id);
        self.client
            .put_empty(&path, &[], &UpdateMemberRole { role })
            .await
    }

    /// Leave an organization as the authenticated user
    pub async fn leave(&self, org_id: i64) -> Result<()> {
        let path = format!("/orgs/{}/members/leave", org_id);
        self.client.delete(&path, &[]).await
    }
}

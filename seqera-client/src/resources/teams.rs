//! Team endpoints

use crate::SeqeraClient;
use crate::error::Result;
use seqera_core::domain::organization::Member;
use seqera_core::domain::team::Team;
use seqera_core::dto::organization::{AddMemberResponse, ListMembersResponse};
use seqera_core::dto::team::{
    AddTeamMember, CreateTeam, DescribeTeamResponse, ListTeamsResponse, TeamDraft,
};

/// Handle for `/orgs/{orgId}/teams`
#[derive(Debug, Clone, Copy)]
pub struct Teams<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Team endpoints
    pub fn teams(&self) -> Teams<'_> {
        Teams { client: self }
    }
}

impl Teams<'_> {
    // =============================================================================
    // Teams
    // =============================================================================

    /// List the teams of an organization
    pub async fn list(&self, org_id: i64) -> Result<Vec<Team>> {
        let path = format!("/orgs/{}/teams", org_id);
        let response: ListTeamsResponse = self.client.get_json(&path, &[]).await?;
        Ok(response.teams)
    }

    /// Create a team
    pub async fn add(&self, org_id: i64, name: &str, description: Option<String>) -> Result<Team> {
        let path = format!("/orgs/{}/teams", org_id);
        let body = CreateTeam {
            team: TeamDraft {
                name: name.to_string(),
                description,
            },
        };
        let response: DescribeTeamResponse = self.client.post_json(&path, &[], &body).await?;
        Ok(response.team)
    }

    /// Delete a team
    pub async fn delete(&self, org_id: i64, team_id: i64) -> Result<()> {
        let path = format!("/orgs/{}/teams/{}", org_id, team_id);
        self.client.delete(&path, &[]).await
    }

    // =============================================================================
    // Team Members
    // =============================================================================

    /// List the members of a team
    pub async fn members(&self, org_id: i64, team_id: i64) -> Result<Vec<Member>> {
        let path = format!("/orgs/{}/teams/{}/members", org_id, team_id);
        let response: ListMembersResponse = self.client.get_json(&path, &[]).await?;
        Ok(response.members)
    }

    /// Add a user, by user name or email, to a team
    pub async fn add_member(&self, org_id: i64, team_id: i64, user: &str) -> Result<Member> {
        let path = format!("/orgs/{}/teams/{}/members", org_id, team_id);
        let body = AddTeamMember {
            user_name_or_email: user.to_string(),
        };
        let response: AddMemberResponse = self.client.post_json(&path, &[], &body).await?;
        Ok(response.member)
    }

    /// Remove a member from a team
    pub async fn delete_member(&self, org_id: i64, team_id: i64, member_id: i64) -> Result<()> {
        let path = format!(
            "/orgs/{}/teams/{}/members/{}/delete",
            org_id, team_id, member_id
        );
        self.client.delete(&path, &[]).await
    }
}

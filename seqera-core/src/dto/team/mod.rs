//! Team DTOs

use serde::{Deserialize, Serialize};

use crate::domain::team::Team;

/// Response of `GET /orgs/{orgId}/teams`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListTeamsResponse {
    #[serde(default)]
    pub teams: Vec<Team>,
    #[serde(default)]
    pub total_size: Option<i64>,
}

/// Fields of a new team
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TeamDraft {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of `POST /orgs/{orgId}/teams`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateTeam {
    pub team: TeamDraft,
}

/// Response of team creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeTeamResponse {
    pub team: Team,
}

/// Body of `POST /orgs/{orgId}/teams/{teamId}/members`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddTeamMember {
    pub user_name_or_email: String,
}

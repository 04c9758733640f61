//! Workspace and participant DTOs

use serde::{Deserialize, Serialize};

use crate::domain::workspace::{Participant, Visibility, Workspace, WspRole};

/// Response of `GET /orgs/{orgId}/workspaces`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListWorkspacesResponse {
    #[serde(default)]
    pub workspaces: Vec<Workspace>,
}

/// Response of `GET /orgs/{orgId}/workspaces/{workspaceId}` and of writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeWorkspaceResponse {
    pub workspace: Workspace,
}

/// Fields of a new workspace
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkspaceDraft {
    pub name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visibility: Visibility,
}

/// Body of `POST /orgs/{orgId}/workspaces`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateWorkspace {
    pub workspace: WorkspaceDraft,
}

/// Body of `PUT /orgs/{orgId}/workspaces/{workspaceId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateWorkspace {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub visibility: Option<Visibility>,
}

/// Response of `GET .../participants`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListParticipantsResponse {
    #[serde(default)]
    pub participants: Vec<Participant>,
    #[serde(default)]
    pub total_size: Option<i64>,
}

/// Body of `PUT .../participants/add`; exactly one field is set
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AddParticipant {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_name_or_email: Option<String>,
}

/// Response of participant addition
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddParticipantResponse {
    pub participant: Participant,
}

/// Body of `PUT .../participants/{participantId}/role`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateParticipantRole {
    pub role: WspRole,
}

//! Workspace domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A workspace, scoped under an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Workspace {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub visibility: Visibility,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
}

/// Workspace visibility
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum Visibility {
    Private,
    Shared,
}

impl std::fmt::Display for Visibility {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Visibility::Private => write!(f, "PRIVATE"),
            Visibility::Shared => write!(f, "SHARED"),
        }
    }
}

/// Role granted to a workspace participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WspRole {
    Owner,
    Admin,
    Maintain,
    Launch,
    Connect,
    View,
}

impl std::fmt::Display for WspRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            WspRole::Owner => "owner",
            WspRole::Admin => "admin",
            WspRole::Maintain => "maintain",
            WspRole::Launch => "launch",
            WspRole::Connect => "connect",
            WspRole::View => "view",
        };
        write!(f, "{}", s)
    }
}

impl std::str::FromStr for WspRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(WspRole::Owner),
            "admin" => Ok(WspRole::Admin),
            "maintain" => Ok(WspRole::Maintain),
            "launch" => Ok(WspRole::Launch),
            "connect" => Ok(WspRole::Connect),
            "view" => Ok(WspRole::View),
            other => Err(format!("unknown workspace role '{}'", other)),
        }
    }
}

/// Kind of workspace participant
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ParticipantType {
    Member,
    Team,
    Collaborator,
}

impl std::fmt::Display for ParticipantType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ParticipantType::Member => write!(f, "MEMBER"),
            ParticipantType::Team => write!(f, "TEAM"),
            ParticipantType::Collaborator => write!(f, "COLLABORATOR"),
        }
    }
}

/// A member, team or collaborator with access to a workspace
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub participant_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub team_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(rename = "type")]
    pub participant_type: ParticipantType,
    pub wsp_role: WspRole,
}

impl Participant {
    /// Display name: the team name for teams, the user name otherwise
    pub fn display_name(&self) -> &str {
        match self.participant_type {
            ParticipantType::Team => self.team_name.as_deref().unwrap_or_default(),
            _ => self.user_name.as_deref().unwrap_or_default(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_participant_display_name() {
        let team: Participant = serde_json::from_str(
            r#"{"participantId": 1, "teamId": 5, "teamName": "bioinfo", "type": "TEAM", "wspRole": "launch"}"#,
        )
        .unwrap();
        assert_eq!(team.display_name(), "bioinfo");
        assert_eq!(team.wsp_role, WspRole::Launch);

        let member: Participant = serde_json::from_str(
            r#"{"participantId": 2, "memberId": 9, "userName": "jdoe", "type": "MEMBER", "wspRole": "admin"}"#,
        )
        .unwrap();
        assert_eq!(member.display_name(), "jdoe");
    }

    #[test]
    fn test_workspace_visibility() {
        let ws: Workspace = serde_json::from_str(
            r#"{"id": 42, "name": "genomics", "fullName": "Genomics", "visibility": "SHARED"}"#,
        )
        .unwrap();
        assert_eq!(ws.visibility, Visibility::Shared);
        assert_eq!(ws.visibility.to_string(), "SHARED");
    }
}

//! User domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The authenticated user
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: i64,
    pub user_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub organization: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_access: Option<DateTime<Utc>>,
}

/// One entry of the user's organization / workspace memberships
///
/// The API returns one entry per organization with no workspace fields set,
/// followed by one entry per workspace the user can access.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrgAndWorkspace {
    pub org_id: i64,
    pub org_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_full_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub roles: Vec<String>,
}

impl OrgAndWorkspace {
    /// `organization/workspace` reference for this entry, if it is a workspace
    pub fn reference(&self) -> Option<String> {
        self.workspace_name
            .as_ref()
            .map(|ws| format!("{}/{}", self.org_name, ws))
    }
}

/// Platform service information
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfo {
    pub version: String,
    pub api_version: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commit_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub auth_types: Option<Vec<String>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_entry_has_no_reference() {
        let entry: OrgAndWorkspace = serde_json::from_str(
            r#"{"orgId": 7, "orgName": "acme", "workspaceId": null, "workspaceName": null}"#,
        )
        .unwrap();

        assert_eq!(entry.org_id, 7);
        assert_eq!(entry.reference(), None);
    }

    #[test]
    fn test_workspace_entry_reference() {
        let entry: OrgAndWorkspace = serde_json::from_str(
            r#"{
                "orgId": 7,
                "orgName": "acme",
                "workspaceId": 42,
                "workspaceName": "genomics",
                "workspaceFullName": "Genomics team",
                "visibility": "PRIVATE",
                "roles": ["owner"]
            }"#,
        )
        .unwrap();

        assert_eq!(entry.reference().as_deref(), Some("acme/genomics"));
        assert_eq!(entry.roles, vec!["owner".to_string()]);
    }
}

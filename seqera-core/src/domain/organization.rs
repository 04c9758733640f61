//! Organization domain types

use serde::{Deserialize, Serialize};

/// An organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Organization {
    pub org_id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub member_role: Option<OrgRole>,
}

/// Role of a member within an organization
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OrgRole {
    Owner,
    Member,
    Collaborator,
}

impl std::fmt::Display for OrgRole {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            OrgRole::Owner => write!(f, "owner"),
            OrgRole::Member => write!(f, "member"),
            OrgRole::Collaborator => write!(f, "collaborator"),
        }
    }
}

impl std::str::FromStr for OrgRole {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "owner" => Ok(OrgRole::Owner),
            "member" => Ok(OrgRole::Member),
            "collaborator" => Ok(OrgRole::Collaborator),
            other => Err(format!(
                "unknown organization role '{}' (expected owner, member or collaborator)",
                other
            )),
        }
    }
}

/// A member of an organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Member {
    pub member_id: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub user_name: String,
    pub email: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub avatar: Option<String>,
    pub role: OrgRole,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_org_role_parsing() {
        assert_eq!("Owner".parse::<OrgRole>().unwrap(), OrgRole::Owner);
        assert_eq!("collaborator".parse::<OrgRole>().unwrap(), OrgRole::Collaborator);
        assert!("admin".parse::<OrgRole>().is_err());
    }

    #[test]
    fn test_member_from_server_json() {
        let member: Member = serde_json::from_str(
            r#"{"memberId": 3, "userId": 11, "userName": "jdoe", "email": "jdoe@example.com", "role": "member"}"#,
        )
        .unwrap();

        assert_eq!(member.member_id, 3);
        assert_eq!(member.role, OrgRole::Member);
        assert!(member.first_name.is_none());
    }
}

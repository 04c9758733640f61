//! Organization and member DTOs

use serde::{Deserialize, Serialize};

use crate::domain::organization::{Member, OrgRole, Organization};

/// Response of `GET /orgs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListOrganizationsResponse {
    #[serde(default)]
    pub organizations: Vec<Organization>,
    #[serde(default)]
    pub total_size: Option<i64>,
}

/// Response of `GET /orgs/{orgId}` and of organization creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeOrganizationResponse {
    pub organization: Organization,
}

/// Fields of a new organization
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrganizationDraft {
    pub name: String,
    pub full_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Body of `POST /orgs`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateOrganization {
    pub organization: OrganizationDraft,
}

/// Body of `PUT /orgs/{orgId}`; unset fields are left unchanged
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateOrganization {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub website: Option<String>,
}

/// Response of member listings (organization and team)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListMembersResponse {
    #[serde(default)]
    pub members: Vec<Member>,
    #[serde(default)]
    pub total_size: Option<i64>,
}

/// Body of `PUT /orgs/{orgId}/members/add`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMember {
    /// User name or email address
    pub user: String,
}

/// Response of member additions
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddMemberResponse {
    pub member: Member,
}

/// Body of `PUT /orgs/{orgId}/members/{memberId}/role`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateMemberRole {
    pub role: OrgRole,
}

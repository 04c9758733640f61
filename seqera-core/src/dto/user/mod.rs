//! User DTOs

use serde::{Deserialize, Serialize};

use crate::domain::user::{OrgAndWorkspace, ServiceInfo, User};

/// Response of `GET /user-info`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserInfoResponse {
    pub user: User,
}

/// Response of `GET /user/{userId}/workspaces`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkspacesAndOrgResponse {
    #[serde(default)]
    pub orgs_and_workspaces: Vec<OrgAndWorkspace>,
}

/// Response of `GET /service-info`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceInfoResponse {
    pub service_info: ServiceInfo,
}

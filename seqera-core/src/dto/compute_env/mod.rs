//! Compute environment DTOs

use serde::{Deserialize, Serialize};

use crate::domain::compute_env::ComputeEnv;

/// Response of `GET /compute-envs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListComputeEnvsResponse {
    #[serde(default)]
    pub compute_envs: Vec<ComputeEnv>,
}

/// Response of `GET /compute-envs/{computeEnvId}` and `GET /compute-envs/primary`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeComputeEnvResponse {
    pub compute_env: ComputeEnv,
}

/// Fields of a new compute environment
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeEnvDraft {
    pub name: String,
    pub platform: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_id: Option<String>,
    /// Platform-specific configuration (work dir, region, queues, ...)
    pub config: serde_json::Value,
}

/// Body of `POST /compute-envs`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComputeEnv {
    pub compute_env: ComputeEnvDraft,
}

/// Response of compute environment creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateComputeEnvResponse {
    pub compute_env_id: String,
}

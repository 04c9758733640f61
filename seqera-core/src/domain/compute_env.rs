//! Compute environment domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A named execution target (AWS Batch, Google Batch, Kubernetes, ...)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComputeEnv {
    pub id: String,
    pub name: String,
    pub platform: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<ComputeEnvStatus>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub credentials_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<String>,
    #[serde(default)]
    pub primary: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    /// Platform-specific configuration, passed through as-is
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config: Option<serde_json::Value>,
}

/// Provisioning status of a compute environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ComputeEnvStatus {
    Creating,
    Available,
    Errored,
    Invalid,
}

impl std::fmt::Display for ComputeEnvStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ComputeEnvStatus::Creating => write!(f, "CREATING"),
            ComputeEnvStatus::Available => write!(f, "AVAILABLE"),
            ComputeEnvStatus::Errored => write!(f, "ERRORED"),
            ComputeEnvStatus::Invalid => write!(f, "INVALID"),
        }
    }
}

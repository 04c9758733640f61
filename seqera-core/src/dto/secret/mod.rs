//! Pipeline secret DTOs

use serde::{Deserialize, Serialize};

use crate::domain::secret::PipelineSecret;

/// Response of `GET /pipeline-secrets`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListSecretsResponse {
    #[serde(default)]
    pub pipeline_secrets: Vec<PipelineSecret>,
}

/// Response of `GET /pipeline-secrets/{secretId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeSecretResponse {
    pub pipeline_secret: PipelineSecret,
}

/// Body of `POST /pipeline-secrets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSecret {
    pub name: String,
    pub value: String,
}

/// Response of secret creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateSecretResponse {
    pub secret_id: i64,
}

/// Body of `PUT /pipeline-secrets/{secretId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UpdateSecret {
    pub value: String,
}

//! Credentials DTOs

use serde::{Deserialize, Serialize};

use crate::domain::credentials::{CredentialKeys, Credentials};

/// Response of `GET /credentials`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListCredentialsResponse {
    #[serde(default)]
    pub credentials: Vec<Credentials>,
}

/// Response of `GET /credentials/{credentialsId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeCredentialsResponse {
    pub credentials: Credentials,
}

/// Fields of new credentials
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CredentialsDraft {
    pub name: String,
    pub provider: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    pub keys: CredentialKeys,
}

impl CredentialsDraft {
    /// Build a draft whose provider matches the key material
    pub fn new(name: impl Into<String>, keys: CredentialKeys) -> Self {
        Self {
            name: name.into(),
            provider: keys.provider().to_string(),
            description: None,
            base_url: None,
            keys,
        }
    }
}

/// Body of `POST /credentials`
#[derive(Debug, Clone, Serialize)]
pub struct CreateCredentials {
    pub credentials: CredentialsDraft,
}

/// Response of credentials creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateCredentialsResponse {
    pub credentials_id: String,
}

//! Credentials domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Stored credentials
///
/// Secret material is never returned by the API; `keys` only holds the
/// non-sensitive parts (e.g. the AWS access key id).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Credentials {
    pub id: String,
    pub name: String,
    pub provider: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_used: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub keys: Option<serde_json::Value>,
}

/// Provider-specific key material sent when creating credentials
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum CredentialKeys {
    #[serde(rename_all = "camelCase")]
    Aws {
        access_key: String,
        secret_key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        assume_role_arn: Option<String>,
    },
    #[serde(rename_all = "camelCase")]
    Azure {
        batch_name: String,
        batch_key: String,
        storage_name: String,
        storage_key: String,
    },
    Google {
        /// Service account key file contents
        data: String,
    },
    Git {
        #[serde(skip)]
        provider: GitProvider,
        username: String,
        password: String,
    },
    #[serde(rename_all = "camelCase")]
    Ssh {
        private_key: String,
        #[serde(skip_serializing_if = "Option::is_none")]
        passphrase: Option<String>,
    },
    K8s {
        token: String,
    },
    #[serde(rename_all = "camelCase")]
    ContainerRegistry {
        user_name: String,
        password: String,
        registry: String,
    },
}

/// Git hosting providers sharing the username/token key shape
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GitProvider {
    Github,
    Gitlab,
    Bitbucket,
    Gitea,
}

impl CredentialKeys {
    /// Provider identifier expected by the API
    pub fn provider(&self) -> &'static str {
        match self {
            CredentialKeys::Aws { .. } => "aws",
            CredentialKeys::Azure { .. } => "azure",
            CredentialKeys::Google { .. } => "google",
            CredentialKeys::Git { provider, .. } => match provider {
                GitProvider::Github => "github",
                GitProvider::Gitlab => "gitlab",
                GitProvider::Bitbucket => "bitbucket",
                GitProvider::Gitea => "gitea",
            },
            CredentialKeys::Ssh { .. } => "ssh",
            CredentialKeys::K8s { .. } => "k8s",
            CredentialKeys::ContainerRegistry { .. } => "container-reg",
        }
    }
}

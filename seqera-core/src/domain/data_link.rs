//! Data link domain types

use serde::{Deserialize, Serialize};

/// A named reference to a cloud storage location plus its credentials
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLink {
    pub id: String,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Bucket or container URI, e.g. `s3://my-bucket`
    pub resource_ref: String,
    #[serde(rename = "type", default = "default_link_type")]
    pub link_type: String,
    pub provider: DataLinkProvider,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
    #[serde(default)]
    pub credentials: Vec<DataLinkCredentials>,
    #[serde(default)]
    pub public_accessible: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

fn default_link_type() -> String {
    "bucket".to_string()
}

impl DataLink {
    /// Id of the first credentials attached to the link, if any
    pub fn credentials_id(&self) -> Option<&str> {
        self.credentials.first().map(|c| c.id.as_str())
    }
}

/// Cloud storage provider behind a data link
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum DataLinkProvider {
    Aws,
    Google,
    Azure,
    Seqeracompute,
}

impl std::fmt::Display for DataLinkProvider {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DataLinkProvider::Aws => write!(f, "aws"),
            DataLinkProvider::Google => write!(f, "google"),
            DataLinkProvider::Azure => write!(f, "azure"),
            DataLinkProvider::Seqeracompute => write!(f, "seqeracompute"),
        }
    }
}

impl std::str::FromStr for DataLinkProvider {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "aws" => Ok(DataLinkProvider::Aws),
            "google" => Ok(DataLinkProvider::Google),
            "azure" => Ok(DataLinkProvider::Azure),
            "seqeracompute" => Ok(DataLinkProvider::Seqeracompute),
            other => Err(format!("unknown data link provider '{}'", other)),
        }
    }
}

/// Credentials reference attached to a data link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLinkCredentials {
    pub id: String,
    pub name: String,
    pub provider: String,
}

/// Entry returned when browsing a data link
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLinkItem {
    #[serde(rename = "type")]
    pub item_type: DataLinkItemType,
    pub name: String,
    #[serde(default)]
    pub size: u64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mime_type: Option<String>,
}

/// Kind of browsed entry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum DataLinkItemType {
    File,
    Folder,
}

//! Label DTOs

use serde::{Deserialize, Serialize};

use crate::domain::label::Label;

/// Response of `GET /labels`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListLabelsResponse {
    #[serde(default)]
    pub labels: Vec<Label>,
    #[serde(default)]
    pub total_size: i64,
}

/// Body of `POST /labels`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateLabel {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    pub resource: bool,
    pub is_default: bool,
}

impl CreateLabel {
    /// A label is a resource label exactly when it carries a value
    pub fn new(name: impl Into<String>, value: Option<String>, is_default: bool) -> Self {
        Self {
            name: name.into(),
            resource: value.is_some(),
            value,
            is_default,
        }
    }
}

/// Body of `PUT /labels/{labelId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateLabel {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub value: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_default: Option<bool>,
}

//! Action DTOs

use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::domain::action::{Action, ActionSource};
use crate::domain::pipeline::Launch;

/// Response of `GET /actions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListActionsResponse {
    #[serde(default)]
    pub actions: Vec<Action>,
}

/// Response of `GET /actions/{actionId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeActionResponse {
    pub action: Action,
}

/// Body of `POST /actions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateAction {
    pub name: String,
    pub source: ActionSource,
    pub launch: Launch,
}

/// Response of action creation
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateActionResponse {
    pub action_id: String,
}

/// Body of `PUT /actions/{actionId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct UpdateAction {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub launch: Option<Launch>,
}

/// Body of `POST /actions/{actionId}/launch`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LaunchAction {
    pub params: BTreeMap<String, serde_json::Value>,
}

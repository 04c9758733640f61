//! Workflow DTOs

use serde::{Deserialize, Serialize};

use crate::domain::label::Label;
use crate::domain::pipeline::Launch;
use crate::domain::workflow::{ListedWorkflow, ProgressData, Workflow};

/// Response of `GET /workflow`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListWorkflowsResponse {
    #[serde(default)]
    pub workflows: Vec<ListedWorkflow>,
    #[serde(default)]
    pub total_size: i64,
}

/// Response of `GET /workflow/{workflowId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeWorkflowResponse {
    pub workflow: Workflow,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub progress: Option<ProgressData>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
}

/// Body of `POST /workflow/launch`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LaunchWorkflow {
    pub launch: Launch,
}

/// Response of workflow launches
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LaunchWorkflowResponse {
    pub workflow_id: String,
}

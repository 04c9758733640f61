//! Pipeline DTOs

use serde::{Deserialize, Serialize};

use crate::domain::pipeline::{Launch, Pipeline};

/// Response of `GET /pipelines`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListPipelinesResponse {
    #[serde(default)]
    pub pipelines: Vec<Pipeline>,
    #[serde(default)]
    pub total_size: i64,
}

/// Response of `GET /pipelines/{pipelineId}` and of pipeline writes
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribePipelineResponse {
    pub pipeline: Pipeline,
}

/// Response of the `.../launch` endpoints
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeLaunchResponse {
    pub launch: Launch,
}

/// Body of `POST /pipelines`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreatePipeline {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub launch: Launch,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<i64>,
}

/// Body of `PUT /pipelines/{pipelineId}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdatePipeline {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub launch: Launch,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<i64>,
}

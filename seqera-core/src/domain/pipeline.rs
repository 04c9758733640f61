//! Pipeline domain types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::domain::compute_env::ComputeEnv;
use crate::domain::label::Label;

/// A pipeline registered in a workspace's launchpad
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pipeline {
    pub pipeline_id: i64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub repository: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub org_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_id: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub workspace_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub visibility: Option<String>,
    #[serde(default)]
    pub deleted: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub last_updated: Option<DateTime<Utc>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<Label>>,
}

/// Launch configuration
///
/// Shared by pipelines (their saved launch), actions and workflow launch
/// requests. When read back from the server the compute environment is
/// embedded as `computeEnv`; when sent it is referenced by `computeEnvId`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Launch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_env_id: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub compute_env: Option<ComputeEnv>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub run_name: Option<String>,
    pub pipeline: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub work_dir: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub revision: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub config_profiles: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub user_secrets: Vec<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub workspace_secrets: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub config_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub params_text: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pre_run_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub post_run_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub main_script: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub entry_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub schema_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub resume: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pull_latest: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub stub_run: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub session_id: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub label_ids: Vec<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_job_cpus: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub head_job_memory_mb: Option<i32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub date_created: Option<DateTime<Utc>>,
}

impl Launch {
    /// Turn a launch read from the server into one that can be posted back
    ///
    /// Replaces the embedded compute environment with its id and drops
    /// server-assigned fields.
    pub fn into_request(mut self) -> Self {
        if self.compute_env_id.is_none() {
            self.compute_env_id = self.compute_env.as_ref().map(|ce| ce.id.clone());
        }
        self.compute_env = None;
        self.id = None;
        self.date_created = None;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_launch_into_request_uses_compute_env_id() {
        let launch: Launch = serde_json::from_str(
            r#"{
                "id": "launch-1",
                "computeEnv": {"id": "ce-9", "name": "aws-batch", "platform": "aws-batch", "status": "AVAILABLE"},
                "pipeline": "https://github.com/nextflow-io/hello",
                "workDir": "s3://bucket/work",
                "configProfiles": ["test"],
                "dateCreated": "2024-03-01T10:00:00Z"
            }"#,
        )
        .unwrap();

        let request = launch.into_request();
        assert_eq!(request.compute_env_id.as_deref(), Some("ce-9"));
        assert!(request.compute_env.is_none());
        assert!(request.id.is_none());

        let json = serde_json::to_value(&request).unwrap();
        assert_eq!(json["computeEnvId"], "ce-9");
        assert!(json.get("computeEnv").is_none());
        assert!(json.get("dateCreated").is_none());
        assert_eq!(json["configProfiles"][0], "test");
    }

    #[test]
    fn test_launch_omits_empty_fields() {
        let launch = Launch {
            pipeline: "nf-core/rnaseq".to_string(),
            ..Default::default()
        };

        let json = serde_json::to_value(&launch).unwrap();
        assert_eq!(json, serde_json::json!({ "pipeline": "nf-core/rnaseq" }));
    }

    #[test]
    fn test_pipeline_with_labels() {
        let pipeline: Pipeline = serde_json::from_str(
            r#"{
                "pipelineId": 12,
                "name": "hello",
                "repository": "https://github.com/nextflow-io/hello",
                "labels": [{"id": 1, "name": "env", "value": "prod", "resource": true, "isDefault": false}]
            }"#,
        )
        .unwrap();

        assert_eq!(pipeline.pipeline_id, 12);
        assert!(!pipeline.deleted);
        assert_eq!(pipeline.labels.unwrap()[0].name, "env");
    }
}

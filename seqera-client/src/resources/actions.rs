//! Pipeline action endpoints

use std::collections::BTreeMap;

use super::encode_segment;
use crate::error::Result;
use crate::{SeqeraClient, workspace_query};
use seqera_core::domain::action::Action;
use seqera_core::dto::action::{
    CreateAction, CreateActionResponse, DescribeActionResponse, LaunchAction,
    ListActionsResponse, UpdateAction,
};
use seqera_core::dto::workflow::LaunchWorkflowResponse;

/// Handle for `/actions`
#[derive(Debug, Clone, Copy)]
pub struct Actions<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Pipeline action endpoints
    pub fn actions(&self) -> Actions<'_> {
        Actions { client: self }
    }
}

impl Actions<'_> {
    pub async fn list(&self, workspace_id: Option<i64>) -> Result<Vec<Action>> {
        let response: ListActionsResponse = self
            .client
            .get_json("/actions", &workspace_query(workspace_id))
            .await?;
        Ok(response.actions)
    }

    pub async fn get(&self, action_id: &str, workspace_id: Option<i64>) -> Result<Action> {
        let path = format!("/actions/{}", encode_segment(action_id));
        let response: DescribeActionResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.action)
    }

    /// Create an action
    ///
    /// # Returns
    /// The id of the new action
    pub async fn add(&self, workspace_id: Option<i64>, req: &CreateAction) -> Result<String> {
        let response: CreateActionResponse = self
            .client
            .post_json("/actions", &workspace_query(workspace_id), req)
            .await?;
        Ok(response.action_id)
    }

    pub async fn update(
        &self,
        action_id: &str,
        workspace_id: Option<i64>,
        req: &UpdateAction,
    ) -> Result<()> {
        let path = format!("/actions/{}", encode_segment(action_id));
        self.client
            .put_empty(&path, &workspace_query(workspace_id), req)
            .await
    }

    pub async fn delete(&self, action_id: &str, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/actions/{}", encode_segment(action_id));
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }

    /// Trigger an action with the given pipeline parameters
    ///
    /// # Returns
    /// The id of the launched run
    pub async fn launch(
        &self,
        action_id: &str,
        workspace_id: Option<i64>,
        params: BTreeMap<String, serde_json::Value>,
    ) -> Result<String> {
        let path = format!("/actions/{}/launch", encode_segment(action_id));
        let body = LaunchAction { params };
        let response: LaunchWorkflowResponse = self
            .client
            .post_json(&path, &workspace_query(workspace_id), &body)
            .await?;
        Ok(response.workflow_id)
    }
}

//! Workflow run endpoints

use super::pipelines::LIST_ALL_PAGE_SIZE;
use super::encode_segment;
use crate::error::Result;
use crate::{SeqeraClient, workspace_query};
use seqera_core::domain::pipeline::Launch;
use seqera_core::domain::workflow::ListedWorkflow;
use seqera_core::dto::pipeline::DescribeLaunchResponse;
use seqera_core::dto::workflow::{
    DescribeWorkflowResponse, LaunchWorkflow, LaunchWorkflowResponse, ListWorkflowsResponse,
};
use seqera_core::dto::{Page, Paged};

/// Handle for `/workflow`
#[derive(Debug, Clone, Copy)]
pub struct Runs<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Workflow run endpoints
    pub fn runs(&self) -> Runs<'_> {
        Runs { client: self }
    }
}

impl Runs<'_> {
    // =============================================================================
    // Run Query
    // =============================================================================

    /// List one page of runs
    ///
    /// # Arguments
    /// * `workspace_id` - Workspace id, `None` for the personal workspace
    /// * `search` - Optional filter (run name, project, `status:`, `label:` ...)
    /// * `page` - Paging parameters
    pub async fn list(
        &self,
        workspace_id: Option<i64>,
        search: Option<&str>,
        page: Page,
    ) -> Result<Paged<ListedWorkflow>> {
        let mut query = workspace_query(workspace_id);
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        query.extend(page.query_pairs());

        let response: ListWorkflowsResponse = self.client.get_json("/workflow", &query).await?;
        Ok(Paged {
            items: response.workflows,
            total_size: response.total_size,
        })
    }

    /// List every run matching `search`, walking all pages
    pub async fn list_all(
        &self,
        workspace_id: Option<i64>,
        search: Option<&str>,
    ) -> Result<Vec<ListedWorkflow>> {
        let mut runs = Vec::new();
        loop {
            let page = Page::new(LIST_ALL_PAGE_SIZE, runs.len() as u32);
            let result = self.list(workspace_id, search, page).await?;
            let fetched = result.items.len();
            runs.extend(result.items);

            if fetched == 0 || runs.len() as i64 >= result.total_size {
                break;
            }
        }
        Ok(runs)
    }

    /// Get a run with its progress counters
    pub async fn get(
        &self,
        workflow_id: &str,
        workspace_id: Option<i64>,
    ) -> Result<DescribeWorkflowResponse> {
        let path = format!("/workflow/{}", encode_segment(workflow_id));
        self.client
            .get_json(&path, &workspace_query(workspace_id))
            .await
    }

    /// Get the launch configuration a run was started with
    pub async fn launch_info(&self, workflow_id: &str, workspace_id: Option<i64>) -> Result<Launch> {
        let path = format!("/workflow/{}/launch", encode_segment(workflow_id));
        let response: DescribeLaunchResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.launch)
    }

    // =============================================================================
    // Run Lifecycle
    // =============================================================================

    /// Launch a workflow
    ///
    /// # Returns
    /// The id of the new run
    pub async fn launch(&self, workspace_id: Option<i64>, launch: Launch) -> Result<String> {
        let body = LaunchWorkflow { launch };
        let response: LaunchWorkflowResponse = self
            .client
            .post_json("/workflow/launch", &workspace_query(workspace_id), &body)
            .await?;

        tracing::info!(workflow_id = %response.workflow_id, "Workflow launched");
        Ok(response.workflow_id)
    }

    /// Launch a run again with its original configuration
    ///
    /// With `resume` the new run reuses the original session, so cached tasks
    /// are not executed again.
    pub async fn relaunch(
        &self,
        workflow_id: &str,
        workspace_id: Option<i64>,
        resume: bool,
    ) -> Result<String> {
        let run = self.get(workflow_id, workspace_id).await?;
        let mut launch = self
            .launch_info(workflow_id, workspace_id)
            .await?
            .into_request();

        if resume {
            launch.resume = Some(true);
            launch.session_id = run.workflow.session_id.clone();
            if launch.revision.is_none() {
                launch.revision = run.workflow.commit_id.clone();
            }
        } else {
            launch.resume = None;
            launch.session_id = None;
        }

        self.launch(workspace_id, launch).await
    }

    /// Cancel a running workflow
    pub async fn cancel(&self, workflow_id: &str, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/workflow/{}/cancel", encode_segment(workflow_id));
        self.client
            .post_empty::<()>(&path, &workspace_query(workspace_id), None)
            .await
    }

    /// Delete a run record
    pub async fn delete(&self, workflow_id: &str, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/workflow/{}", encode_segment(workflow_id));
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }
}

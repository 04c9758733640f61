//! Pipeline endpoints

use crate::error::Result;
use crate::{SeqeraClient, workspace_query};
use seqera_core::domain::pipeline::{Launch, Pipeline};
use seqera_core::dto::pipeline::{
    CreatePipeline, DescribeLaunchResponse, DescribePipelineResponse, ListPipelinesResponse,
    UpdatePipeline,
};
use seqera_core::dto::{Page, Paged};

/// Page size used when walking every page of a listing
pub(crate) const LIST_ALL_PAGE_SIZE: u32 = 100;

/// Handle for `/pipelines`
#[derive(Debug, Clone, Copy)]
pub struct Pipelines<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Pipeline (launchpad) endpoints
    pub fn pipelines(&self) -> Pipelines<'_> {
        Pipelines { client: self }
    }
}

impl Pipelines<'_> {
    /// List one page of the pipelines of a workspace
    ///
    /// # Arguments
    /// * `workspace_id` - Workspace id, `None` for the personal workspace
    /// * `search` - Optional filter on the pipeline name
    /// * `page` - Paging parameters
    ///
    /// # Returns
    /// The pipelines of the page and the total number of matches
    pub async fn list(
        &self,
        workspace_id: Option<i64>,
        search: Option<&str>,
        page: Page,
    ) -> Result<Paged<Pipeline>> {
        let mut query = workspace_query(workspace_id);
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        query.extend(page.query_pairs());

        let response: ListPipelinesResponse = self.client.get_json("/pipelines", &query).await?;
        Ok(Paged {
            items: response.pipelines,
            total_size: response.total_size,
        })
    }

    /// List every pipeline of a workspace, walking all pages
    pub async fn list_all(
        &self,
        workspace_id: Option<i64>,
        search: Option<&str>,
    ) -> Result<Vec<Pipeline>> {
        let mut pipelines = Vec::new();
        loop {
            let page = Page::new(LIST_ALL_PAGE_SIZE, pipelines.len() as u32);
            let result = self.list(workspace_id, search, page).await?;
            let fetched = result.items.len();
            pipelines.extend(result.items);

            if fetched == 0 || pipelines.len() as i64 >= result.total_size {
                break;
            }
        }
        Ok(pipelines)
    }

    /// Get a pipeline by id
    pub async fn get(&self, pipeline_id: i64, workspace_id: Option<i64>) -> Result<Pipeline> {
        let path = format!("/pipelines/{}", pipeline_id);
        let response: DescribePipelineResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.pipeline)
    }

    /// Get the saved launch configuration of a pipeline
    pub async fn launch_info(&self, pipeline_id: i64, workspace_id: Option<i64>) -> Result<Launch> {
        let path = format!("/pipelines/{}/launch", pipeline_id);
        let response: DescribeLaunchResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.launch)
    }

    /// Add a pipeline to a workspace's launchpad
    ///
    /// # Example
    /// ```no_run
    /// # use seqera_client::SeqeraClient;
    /// # use seqera_core::domain::pipeline::Launch;
    /// # use seqera_core::dto::pipeline::CreatePipeline;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = SeqeraClient::new("https://api.cloud.seqera.io").with_token("token");
    /// let pipeline = client.pipelines().add(Some(42), &CreatePipeline {
    ///     name: "hello".to_string(),
    ///     description: None,
    ///     icon: None,
    ///     launch: Launch {
    ///         pipeline: "https://github.com/nextflow-io/hello".to_string(),
    ///         compute_env_id: Some("ce-1".to_string()),
    ///         work_dir: Some("s3://bucket/work".to_string()),
    ///         ..Default::default()
    ///     },
    ///     label_ids: vec![],
    /// }).await?;
    /// # Ok(())
    /// # }
    /// ```
    pub async fn add(&self, workspace_id: Option<i64>, req: &CreatePipeline) -> Result<Pipeline> {
        let response: DescribePipelineResponse = self
            .client
            .post_json("/pipelines", &workspace_query(workspace_id), req)
            .await?;
        Ok(response.pipeline)
    }

    /// Update a pipeline
    pub async fn update(
        &self,
        pipeline_id: i64,
        workspace_id: Option<i64>,
        req: &UpdatePipeline,
    ) -> Result<Pipeline> {
        let path = format!("/pipelines/{}", pipeline_id);
        let response: DescribePipelineResponse = self
            .client
            .put_json(&path, &workspace_query(workspace_id), req)
            .await?;
        Ok(response.pipeline)
    }

    /// Delete a pipeline
    pub async fn delete(&self, pipeline_id: i64, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/pipelines/{}", pipeline_id);
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }
}

//! Label endpoints

use super::pipelines::LIST_ALL_PAGE_SIZE;
use crate::error::Result;
use crate::{SeqeraClient, workspace_query};
use seqera_core::domain::label::Label;
use seqera_core::dto::label::{CreateLabel, ListLabelsResponse, UpdateLabel};
use seqera_core::dto::{Page, Paged};

/// Which labels to list
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LabelFilter {
    #[default]
    All,
    Simple,
    Resource,
}

impl LabelFilter {
    fn as_query(&self) -> Option<&'static str> {
        match self {
            LabelFilter::All => None,
            LabelFilter::Simple => Some("simple"),
            LabelFilter::Resource => Some("resource"),
        }
    }
}

/// Handle for `/labels`
#[derive(Debug, Clone, Copy)]
pub struct Labels<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Label endpoints
    pub fn labels(&self) -> Labels<'_> {
        Labels { client: self }
    }
}

impl Labels<'_> {
    /// List one page of the labels of a workspace
    pub async fn list_page(
        &self,
        workspace_id: Option<i64>,
        filter: LabelFilter,
        page: Page,
    ) -> Result<Paged<Label>> {
        let mut query = workspace_query(workspace_id);
        if let Some(kind) = filter.as_query() {
            query.push(("type", kind.to_string()));
        }
        query.extend(page.query_pairs());

        let response: ListLabelsResponse = self.client.get_json("/labels", &query).await?;
        Ok(Paged {
            items: response.labels,
            total_size: response.total_size,
        })
    }

    /// List all the labels of a workspace, walking every page
    pub async fn list(&self, workspace_id: Option<i64>, filter: LabelFilter) -> Result<Vec<Label>> {
        let mut labels = Vec::new();
        loop {
            let page = Page::new(LIST_ALL_PAGE_SIZE, labels.len() as u32);
            let result = self.list_page(workspace_id, filter, page).await?;
            let fetched = result.items.len();
            labels.extend(result.items);

            if fetched == 0 || labels.len() as i64 >= result.total_size {
                break;
            }
        }
        Ok(labels)
    }

    /// Create a label
    pub async fn add(&self, workspace_id: Option<i64>, req: &CreateLabel) -> Result<Label> {
        self.client
            .post_json("/labels", &workspace_query(workspace_id), req)
            .await
    }

    /// Update a label
    pub async fn update(
        &self,
        label_id: i64,
        workspace_id: Option<i64>,
        req: &UpdateLabel,
    ) -> Result<Label> {
        let path = format!("/labels/{}", label_id);
        self.client
            .put_json(&path, &workspace_query(workspace_id), req)
            .await
    }

    /// Delete a label
    pub async fn delete(&self, label_id: i64, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/labels/{}", label_id);
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }
}

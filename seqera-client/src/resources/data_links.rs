//! Data link endpoints

use super::pipelines::LIST_ALL_PAGE_SIZE;
use super::{encode_path, encode_segment};
use crate::error::Result;
use crate::{Query, SeqeraClient, workspace_query};
use seqera_core::domain::data_link::{DataLink, DataLinkItem};
use seqera_core::dto::data_link::{
    BrowseDataLinkResponse, CreateDataLink, DescribeDataLinkResponse, DownloadUrlResponse,
    FinishUploadRequest, ListDataLinksResponse, UpdateDataLink, UploadRequest, UploadResponse,
};
use seqera_core::dto::{Page, Paged};

/// Handle for `/data-links`
#[derive(Debug, Clone, Copy)]
pub struct DataLinks<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Data link endpoints
    pub fn data_links(&self) -> DataLinks<'_> {
        DataLinks { client: self }
    }
}

/// Workspace and credentials query shared by the data link endpoints
fn link_query(workspace_id: Option<i64>, credentials_id: Option<&str>) -> Query {
    let mut query = workspace_query(workspace_id);
    if let Some(credentials_id) = credentials_id {
        query.push(("credentialsId", credentials_id.to_string()));
    }
    query
}

/// `/data-links/{id}/<action>` or `/data-links/{id}/<action>/<path>`
fn link_path(data_link_id: &str, action: &str, path: &str) -> String {
    let encoded = encode_path(path);
    let base = format!("/data-links/{}/{}", encode_segment(data_link_id), action);
    if encoded.is_empty() {
        base
    } else {
        format!("{}/{}", base, encoded)
    }
}

impl DataLinks<'_> {
    // =============================================================================
    // Data Link Management
    // =============================================================================

    /// List one page of data links
    ///
    /// # Arguments
    /// * `workspace_id` - Workspace id, `None` for the personal workspace
    /// * `credentials_id` - Only links reachable with these credentials
    /// * `search` - Optional filter on the link name
    /// * `page` - Paging parameters
    pub async fn list(
        &self,
        workspace_id: Option<i64>,
        credentials_id: Option<&str>,
        search: Option<&str>,
        page: Page,
    ) -> Result<Paged<DataLink>> {
        let mut query = link_query(workspace_id, credentials_id);
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        query.extend(page.query_pairs());

        let response: ListDataLinksResponse = self.client.get_json("/data-links", &query).await?;
        Ok(Paged {
            items: response.data_links,
            total_size: response.total_size,
        })
    }

    /// List every data link of a workspace, walking all pages
    pub async fn list_all(
        &self,
        workspace_id: Option<i64>,
        credentials_id: Option<&str>,
        search: Option<&str>,
    ) -> Result<Vec<DataLink>> {
        let mut links = Vec::new();
        loop {
            let page = Page::new(LIST_ALL_PAGE_SIZE, links.len() as u32);
            let result = self.list(workspace_id, credentials_id, search, page).await?;
            let fetched = result.items.len();
            links.extend(result.items);

            if fetched == 0 || links.len() as i64 >= result.total_size {
                break;
            }
        }
        Ok(links)
    }

    /// Get a data link
    pub async fn get(
        &self,
        data_link_id: &str,
        workspace_id: Option<i64>,
        credentials_id: Option<&str>,
    ) -> Result<DataLink> {
        let path = format!("/data-links/{}", encode_segment(data_link_id));
        let response: DescribeDataLinkResponse = self
            .client
            .get_json(&path, &link_query(workspace_id, credentials_id))
            .await?;
        Ok(response.data_link)
    }

    /// Create a custom data link
    pub async fn add(&self, workspace_id: Option<i64>, req: &CreateDataLink) -> Result<DataLink> {
        let response: DescribeDataLinkResponse = self
            .client
            .post_json("/data-links", &workspace_query(workspace_id), req)
            .await?;
        Ok(response.data_link)
    }

    /// Update a custom data link
    pub async fn update(
        &self,
        data_link_id: &str,
        workspace_id: Option<i64>,
        req: &UpdateDataLink,
    ) -> Result<DataLink> {
        let path = format!("/data-links/{}", encode_segment(data_link_id));
        let response: DescribeDataLinkResponse = self
            .client
            .put_json(&path, &workspace_query(workspace_id), req)
            .await?;
        Ok(response.data_link)
    }

    /// Delete a custom data link
    pub async fn delete(&self, data_link_id: &str, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/data-links/{}", encode_segment(data_link_id));
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }

    // =============================================================================
    // Content
    // =============================================================================

    /// Browse one page of the content under `path`
    pub async fn browse(
        &self,
        data_link_id: &str,
        workspace_id: Option<i64>,
        credentials_id: Option<&str>,
        path: &str,
        search: Option<&str>,
        next_page_token: Option<&str>,
    ) -> Result<BrowseDataLinkResponse> {
        let mut query = link_query(workspace_id, credentials_id);
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        if let Some(token) = next_page_token {
            query.push(("nextPageToken", token.to_string()));
        }

        self.client
            .get_json(&link_path(data_link_id, "browse", path), &query)
            .await
    }

    /// Browse all the content under `path`, following page tokens
    pub async fn browse_all(
        &self,
        data_link_id: &str,
        workspace_id: Option<i64>,
        credentials_id: Option<&str>,
        path: &str,
    ) -> Result<Vec<DataLinkItem>> {
        let mut items = Vec::new();
        let mut token: Option<String> = None;
        loop {
            let page = self
                .browse(
                    data_link_id,
                    workspace_id,
                    credentials_id,
                    path,
                    None,
                    token.as_deref(),
                )
                .await?;
            items.extend(page.objects);

            match page.next_page_token {
                Some(next) if !next.is_empty() => token = Some(next),
                _ => break,
            }
        }
        Ok(items)
    }

    /// Get a short-lived URL to download one file
    pub async fn download_url(
        &self,
        data_link_id: &str,
        workspace_id: Option<i64>,
        credentials_id: Option<&str>,
        file_path: &str,
    ) -> Result<String> {
        let path = format!(
            "/data-links/{}/generate-download-url",
            encode_segment(data_link_id)
        );
        let mut query = link_query(workspace_id, credentials_id);
        query.push(("filePath", file_path.trim_start_matches('/').to_string()));
        query.push(("preview", "false".to_string()));

        let response: DownloadUrlResponse = self.client.get_json(&path, &query).await?;
        Ok(response.url)
    }

    /// Start a multipart upload of one file into `dir_path`
    ///
    /// # Returns
    /// The upload id and one pre-signed URL per part
    pub async fn upload_start(
        &self,
        data_link_id: &str,
        workspace_id: Option<i64>,
        credentials_id: Option<&str>,
        dir_path: &str,
        req: &UploadRequest,
    ) -> Result<UploadResponse> {
        self.client
            .post_json(
                &link_path(data_link_id, "upload", dir_path),
                &link_query(workspace_id, credentials_id),
                req,
            )
            .await
    }

    /// Complete (or abort, with `with_error`) a multipart upload
    pub async fn upload_finish(
        &self,
        data_link_id: &str,
        workspace_id: Option<i64>,
        credentials_id: Option<&str>,
        dir_path: &str,
        req: &FinishUploadRequest,
    ) -> Result<()> {
        self.client
            .post_empty(
                &link_path(data_link_id, "upload/finish", dir_path),
                &link_query(workspace_id, credentials_id),
                Some(req),
            )
            .await
    }
}

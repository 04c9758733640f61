//! Dataset endpoints

use std::path::Path;

use reqwest::multipart::{Form, Part};

use super::encode_segment;
use crate::error::{ClientError, Result};
use crate::{SeqeraClient, workspace_query};
use seqera_core::domain::dataset::{Dataset, DatasetVersion};
use seqera_core::dto::dataset::{
    CreateDataset, DescribeDatasetResponse, ListDatasetVersionsResponse, ListDatasetsResponse,
    UploadDatasetVersionResponse,
};

/// Handle for `/datasets`
#[derive(Debug, Clone, Copy)]
pub struct Datasets<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Dataset endpoints
    pub fn datasets(&self) -> Datasets<'_> {
        Datasets { client: self }
    }
}

/// Media type the Platform expects for a sample sheet file
fn media_type(path: &Path) -> &'static str {
    match path.extension().and_then(|e| e.to_str()) {
        Some(ext) if ext.eq_ignore_ascii_case("tsv") => "text/tab-separated-values",
        _ => "text/csv",
    }
}

impl Datasets<'_> {
    pub async fn list(&self, workspace_id: Option<i64>) -> Result<Vec<Dataset>> {
        let response: ListDatasetsResponse = self
            .client
            .get_json("/datasets", &workspace_query(workspace_id))
            .await?;
        Ok(response.datasets)
    }

    pub async fn get(&self, dataset_id: &str, workspace_id: Option<i64>) -> Result<Dataset> {
        let path = format!("/datasets/{}/metadata", encode_segment(dataset_id));
        let response: DescribeDatasetResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.dataset)
    }

    /// Create an empty dataset; content is added with [`Datasets::upload`]
    pub async fn add(
        &self,
        workspace_id: Option<i64>,
        name: &str,
        description: Option<String>,
    ) -> Result<Dataset> {
        let body = CreateDataset {
            name: name.to_string(),
            description,
        };
        let response: DescribeDatasetResponse = self
            .client
            .post_json("/datasets", &workspace_query(workspace_id), &body)
            .await?;
        Ok(response.dataset)
    }

    pub async fn delete(&self, dataset_id: &str, workspace_id: Option<i64>) -> Result<()> {
        let path = format!("/datasets/{}", encode_segment(dataset_id));
        self.client
            .delete(&path, &workspace_query(workspace_id))
            .await
    }

    /// List the uploaded versions of a dataset
    pub async fn versions(
        &self,
        dataset_id: &str,
        workspace_id: Option<i64>,
    ) -> Result<Vec<DatasetVersion>> {
        let path = format!("/datasets/{}/versions", encode_segment(dataset_id));
        let response: ListDatasetVersionsResponse = self
            .client
            .get_json(&path, &workspace_query(workspace_id))
            .await?;
        Ok(response.versions)
    }

    /// Upload a CSV/TSV file as a new version of a dataset
    ///
    /// # Arguments
    /// * `dataset_id` - The dataset to add a version to
    /// * `workspace_id` - Workspace id, `None` for the personal workspace
    /// * `file` - Local CSV or TSV file
    /// * `has_header` - Whether the first row holds column names
    pub async fn upload(
        &self,
        dataset_id: &str,
        workspace_id: Option<i64>,
        file: &Path,
        has_header: bool,
    ) -> Result<DatasetVersion> {
        let content = tokio::fs::read(file)
            .await
            .map_err(|e| ClientError::io(file, e))?;
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| {
                ClientError::InvalidRequest(format!("'{}' is not a file", file.display()))
            })?
            .to_string();

        let part = Part::bytes(content)
            .file_name(file_name)
            .mime_str(media_type(file))?;
        let form = Form::new().part("file", part);

        let path = format!("/datasets/{}/upload", encode_segment(dataset_id));
        let mut query = workspace_query(workspace_id);
        query.push(("header", has_header.to_string()));

        let response: UploadDatasetVersionResponse =
            self.client.post_multipart(&path, &query, form).await?;
        Ok(response.version)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_media_type_from_extension() {
        assert_eq!(media_type(Path::new("samples.tsv")), "text/tab-separated-values");
        assert_eq!(media_type(Path::new("samples.TSV")), "text/tab-separated-values");
        assert_eq!(media_type(Path::new("samples.csv")), "text/csv");
        assert_eq!(media_type(Path::new("samples")), "text/csv");
    }
}

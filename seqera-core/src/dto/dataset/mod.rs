//! Dataset DTOs

use serde::{Deserialize, Serialize};

use crate::domain::dataset::{Dataset, DatasetVersion};

/// Response of `GET /datasets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDatasetsResponse {
    #[serde(default)]
    pub datasets: Vec<Dataset>,
}

/// Response of `GET /datasets/{datasetId}/metadata` and of dataset creation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DescribeDatasetResponse {
    pub dataset: Dataset,
}

/// Body of `POST /datasets`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateDataset {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Response of `GET /datasets/{datasetId}/versions`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ListDatasetVersionsResponse {
    #[serde(default)]
    pub versions: Vec<DatasetVersion>,
}

/// Response of `POST /datasets/{datasetId}/upload`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UploadDatasetVersionResponse {
    pub version: DatasetVersion,
}

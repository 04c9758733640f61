//! Data link DTOs, including the multipart upload handshake

use serde::{Deserialize, Serialize};

use crate::domain::data_link::{DataLink, DataLinkItem, DataLinkProvider};

/// Response of `GET /data-links`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ListDataLinksResponse {
    #[serde(default)]
    pub data_links: Vec<DataLink>,
    #[serde(default)]
    pub total_size: i64,
}

/// Response of `GET /data-links/{dataLinkId}` and of data link writes
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DescribeDataLinkResponse {
    pub data_link: DataLink,
}

/// Body of `POST /data-links`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateDataLink {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(rename = "type")]
    pub link_type: String,
    pub provider: DataLinkProvider,
    pub resource_ref: String,
    pub public_accessible: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_id: Option<String>,
}

/// Body of `PUT /data-links/{dataLinkId}`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UpdateDataLink {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub credentials_id: Option<String>,
}

/// Response of `GET /data-links/{dataLinkId}/browse/{path}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseDataLinkResponse {
    #[serde(default)]
    pub objects: Vec<DataLinkItem>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub next_page_token: Option<String>,
}

/// Response of `GET /data-links/{dataLinkId}/generate-download-url`
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DownloadUrlResponse {
    pub url: String,
}

/// Body of `POST /data-links/{dataLinkId}/upload/{dirPath}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    pub content_length: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub content_type: Option<String>,
}

/// Pre-signed URLs granted for a multipart upload, one per part
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadResponse {
    pub upload_id: String,
    #[serde(default)]
    pub pre_signed_urls: Vec<String>,
}

/// ETag returned by the storage for one uploaded part
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadEtag {
    pub e_tag: String,
    /// 1-based part number
    pub part_number: u32,
}

/// Body of `POST /data-links/{dataLinkId}/upload/finish/{dirPath}`
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinishUploadRequest {
    pub file_name: String,
    pub upload_id: String,
    pub tags: Vec<UploadEtag>,
    pub with_error: bool,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_finish_upload_wire_format() {
        let req = FinishUploadRequest {
            file_name: "reads.fq.gz".to_string(),
            upload_id: "up-1".to_string(),
            tags: vec![UploadEtag {
                e_tag: "\"abc\"".to_string(),
                part_number: 1,
            }],
            with_error: false,
        };

        assert_eq!(
            serde_json::to_value(&req).unwrap(),
            serde_json::json!({
                "fileName": "reads.fq.gz",
                "uploadId": "up-1",
                "tags": [{"eTag": "\"abc\"", "partNumber": 1}],
                "withError": false
            })
        );
    }

    #[test]
    fn test_upload_response_parsing() {
        let resp: UploadResponse = serde_json::from_str(
            r#"{"uploadId": "up-1", "preSignedUrls": ["https://s3/part1", "https://s3/part2"]}"#,
        )
        .unwrap();
        assert_eq!(resp.pre_signed_urls.len(), 2);
    }
}

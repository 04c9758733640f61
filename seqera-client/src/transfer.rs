//! Data link transfers
//!
//! Uploads walk a local file or directory and send each file through the
//! multipart handshake: ask the Platform for pre-signed part URLs, `PUT` the
//! chunks in order, then report the collected ETags. Downloads browse the
//! remote tree and stream each file to disk.
//!
//! Everything runs sequentially. There is no resumption and no retry: the
//! first failure aborts the transfer.

use std::path::{Component, Path, PathBuf};

use futures_util::StreamExt;
use serde::Serialize;
use tokio::io::{AsyncReadExt, AsyncWriteExt};
use walkdir::WalkDir;

use crate::error::{ClientError, Result};
use crate::{SeqeraClient, check_status};
use seqera_core::domain::data_link::DataLinkItemType;
use seqera_core::dto::data_link::{FinishUploadRequest, UploadEtag, UploadRequest};

/// Which data link a transfer targets, and how to reach it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DataLinkLocation {
    pub data_link_id: String,
    pub workspace_id: Option<i64>,
    pub credentials_id: Option<String>,
}

/// Totals of a finished transfer
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct TransferReport {
    pub files: usize,
    pub bytes: u64,
}

impl TransferReport {
    fn add_file(&mut self, bytes: u64) {
        self.files += 1;
        self.bytes += bytes;
    }
}

/// Size of each part when `len` bytes are split over `parts` URLs
///
/// The last part may be shorter. An empty file still sends one empty part.
pub fn chunk_size(len: u64, parts: usize) -> u64 {
    if parts == 0 {
        return len;
    }
    len.div_ceil(parts as u64).max(1)
}

/// Join remote path segments with `/`, ignoring empty ones
fn join_remote(parts: &[&str]) -> String {
    parts
        .iter()
        .flat_map(|p| p.split('/'))
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join("/")
}

/// Join a remote item name onto a local directory
///
/// Names come from the server, so anything other than plain path segments
/// (`..`, an absolute root, a drive prefix) is refused.
fn local_child(dir: &Path, name: &str) -> Result<PathBuf> {
    let relative = Path::new(name);
    let plain = relative
        .components()
        .all(|c| matches!(c, Component::Normal(_) | Component::CurDir));
    if name.is_empty() || !plain {
        return Err(ClientError::InvalidRequest(format!(
            "refusing to write remote item '{}' outside '{}'",
            name,
            dir.display()
        )));
    }
    Ok(dir.join(relative))
}

impl SeqeraClient {
    // =============================================================================
    // Upload
    // =============================================================================

    /// Upload a local file or directory into `remote_dir` of a data link
    ///
    /// A directory is uploaded under `remote_dir/<directory name>/`, keeping its
    /// internal layout.
    ///
    /// # Example
    /// ```no_run
    /// # use seqera_client::SeqeraClient;
    /// # use seqera_client::transfer::DataLinkLocation;
    /// # use std::path::Path;
    /// # async fn example() -> anyhow::Result<()> {
    /// let client = SeqeraClient::new("https://api.cloud.seqera.io").with_token("token");
    /// let target = DataLinkLocation {
    ///     data_link_id: "v1-cloud-abc".to_string(),
    ///     workspace_id: Some(42),
    ///     credentials_id: Some("cred-1".to_string()),
    /// };
    /// let report = client.upload_path(&target, Path::new("results"), "runs/2024").await?;
    /// println!("{} files, {} bytes", report.files, report.bytes);
    /// # Ok(())
    /// # }
    /// ```
    pub async fn upload_path(
        &self,
        target: &DataLinkLocation,
        local: &Path,
        remote_dir: &str,
    ) -> Result<TransferReport> {
        let metadata = tokio::fs::metadata(local)
            .await
            .map_err(|e| ClientError::io(local, e))?;

        let mut report = TransferReport::default();

        if metadata.is_file() {
            let bytes = self.upload_file(target, local, remote_dir).await?;
            report.add_file(bytes);
            return Ok(report);
        }

        // `.` and `..` have no file name of their own.
        let named = match local.file_name() {
            Some(_) => local.to_path_buf(),
            None => tokio::fs::canonicalize(local)
                .await
                .map_err(|e| ClientError::io(local, e))?,
        };
        let base_name = named
            .file_name()
            .and_then(|n| n.to_str())
            .unwrap_or_default()
            .to_string();

        for entry in WalkDir::new(local).sort_by_file_name() {
            let entry = entry.map_err(|e| {
                let path = e
                    .path()
                    .map(Path::to_path_buf)
                    .unwrap_or_else(|| local.to_path_buf());
                ClientError::io(path, std::io::Error::from(e))
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let relative_dir = entry
                .path()
                .strip_prefix(local)
                .ok()
                .and_then(Path::parent)
                .map(|p| p.to_string_lossy().replace('\\', "/"))
                .unwrap_or_default();
            let destination = join_remote(&[remote_dir, &base_name, &relative_dir]);

            let bytes = self.upload_file(target, entry.path(), &destination).await?;
            report.add_file(bytes);
        }

        tracing::info!(files = report.files, bytes = report.bytes, "Upload finished");
        Ok(report)
    }

    /// Upload one file through the multipart handshake
    async fn upload_file(
        &self,
        target: &DataLinkLocation,
        file: &Path,
        remote_dir: &str,
    ) -> Result<u64> {
        let file_name = file
            .file_name()
            .and_then(|n| n.to_str())
            .ok_or_else(|| ClientError::InvalidRequest(format!("'{}' has no file name", file.display())))?
            .to_string();
        let len = tokio::fs::metadata(file)
            .await
            .map_err(|e| ClientError::io(file, e))?
            .len();

        tracing::info!(file = %file.display(), remote_dir, bytes = len, "Uploading file");

        let data_links = self.data_links();
        let credentials_id = target.credentials_id.as_deref();
        let upload = data_links
            .upload_start(
                &target.data_link_id,
                target.workspace_id,
                credentials_id,
                remote_dir,
                &UploadRequest {
                    file_name: file_name.clone(),
                    content_length: len,
                    content_type: None,
                },
            )
            .await?;

        if upload.pre_signed_urls.is_empty() {
            return Err(ClientError::ParseError(format!(
                "no upload URLs returned for '{}'",
                file_name
            )));
        }

        let result = self.put_parts(file, len, &upload.pre_signed_urls).await;

        let (tags, with_error) = match &result {
            Ok(tags) => (tags.clone(), false),
            Err(_) => (Vec::new(), true),
        };
        let finish = FinishUploadRequest {
            file_name,
            upload_id: upload.upload_id,
            tags,
            with_error,
        };
        let finished = data_links
            .upload_finish(
                &target.data_link_id,
                target.workspace_id,
                credentials_id,
                remote_dir,
                &finish,
            )
            .await;

        // A part failure wins over a failure to report it.
        result?;
        finished?;
        Ok(len)
    }

    /// `PUT` each chunk of `file` to its pre-signed URL, in order
    async fn put_parts(&self, file: &Path, len: u64, urls: &[String]) -> Result<Vec<UploadEtag>> {
        let part_size = chunk_size(len, urls.len());
        let mut reader = tokio::fs::File::open(file)
            .await
            .map_err(|e| ClientError::io(file, e))?;

        let mut remaining = len;
        let mut tags = Vec::with_capacity(urls.len());

        for (index, url) in urls.iter().enumerate() {
            if remaining == 0 && index > 0 {
                break;
            }

            let size = part_size.min(remaining);
            let mut chunk = Vec::with_capacity(size as usize);
            (&mut reader)
                .take(size)
                .read_to_end(&mut chunk)
                .await
                .map_err(|e| ClientError::io(file, e))?;
            remaining -= chunk.len() as u64;

            let part_number = index as u32 + 1;
            tracing::debug!(part_number, bytes = chunk.len(), "Uploading part");

            let response = self.http().put(url).body(chunk).send().await?;
            let response = check_status(response).await?;

            let e_tag = response
                .headers()
                .get(reqwest::header::ETAG)
                .and_then(|v| v.to_str().ok())
                .unwrap_or_default()
                .to_string();
            if e_tag.is_empty() {
                tracing::warn!(part_number, "Storage returned no ETag for part");
            }

            tags.push(UploadEtag { e_tag, part_number });
        }

        Ok(tags)
    }

    // =============================================================================
    // Download
    // =============================================================================

    /// Download a remote file or folder of a data link into `local_dir`
    ///
    /// A folder is mirrored as `local_dir/<folder name>/...`.
    pub async fn download_path(
        &self,
        source: &DataLinkLocation,
        remote_path: &str,
        local_dir: &Path,
    ) -> Result<TransferReport> {
        let remote_path = remote_path.trim_matches('/');
        let mut report = TransferReport::default();

        let (parent, name) = match remote_path.rsplit_once('/') {
            Some((parent, name)) => (parent, name),
            None => ("", remote_path),
        };

        // The root of the link is always a folder.
        let is_folder = if remote_path.is_empty() {
            true
        } else {
            let siblings = self
                .data_links()
                .browse_all(
                    &source.data_link_id,
                    source.workspace_id,
                    source.credentials_id.as_deref(),
                    parent,
                )
                .await?;
            let entry = siblings
                .iter()
                .find(|item| item.name.trim_end_matches('/') == name)
                .ok_or_else(|| {
                    ClientError::NotFound(format!("'{}' in data link {}", remote_path, source.data_link_id))
                })?;
            entry.item_type == DataLinkItemType::Folder
        };

        if !is_folder {
            let destination = local_child(local_dir, name)?;
            let bytes = self.download_file(source, remote_path, &destination).await?;
            report.add_file(bytes);
            return Ok(report);
        }

        let root = if name.is_empty() {
            local_dir.to_path_buf()
        } else {
            local_child(local_dir, name)?
        };
        let mut pending: Vec<(String, PathBuf)> = vec![(remote_path.to_string(), root)];

        while let Some((remote_dir, local)) = pending.pop() {
            let items = self
                .data_links()
                .browse_all(
                    &source.data_link_id,
                    source.workspace_id,
                    source.credentials_id.as_deref(),
                    &remote_dir,
                )
                .await?;

            tokio::fs::create_dir_all(&local)
                .await
                .map_err(|e| ClientError::io(&local, e))?;

            for item in items {
                let item_name = item.name.trim_end_matches('/');
                let remote_item = join_remote(&[&remote_dir, item_name]);
                let local_item = local_child(&local, item_name)?;

                match item.item_type {
                    DataLinkItemType::Folder => pending.push((remote_item, local_item)),
                    DataLinkItemType::File => {
                        let bytes = self.download_file(source, &remote_item, &local_item).await?;
                        report.add_file(bytes);
                    }
                }
            }
        }

        tracing::info!(files = report.files, bytes = report.bytes, "Download finished");
        Ok(report)
    }

    /// Stream one remote file to `destination`
    async fn download_file(
        &self,
        source: &DataLinkLocation,
        remote_file: &str,
        destination: &Path,
    ) -> Result<u64> {
        tracing::info!(remote_file, destination = %destination.display(), "Downloading file");

        let url = self
            .data_links()
            .download_url(
                &source.data_link_id,
                source.workspace_id,
                source.credentials_id.as_deref(),
                remote_file,
            )
            .await?;

        let response = self.http().get(&url).send().await?;
        let response = check_status(response).await?;

        if let Some(parent) = destination.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| ClientError::io(parent, e))?;
        }
        let mut file = tokio::fs::File::create(destination)
            .await
            .map_err(|e| ClientError::io(destination, e))?;

        let mut written = 0u64;
        let mut stream = response.bytes_stream();
        while let Some(chunk) = stream.next().await {
            let chunk = chunk?;
            file.write_all(&chunk)
                .await
                .map_err(|e| ClientError::io(destination, e))?;
            written += chunk.len() as u64;
        }
        file.flush()
            .await
            .map_err(|e| ClientError::io(destination, e))?;

        Ok(written)
    }
}

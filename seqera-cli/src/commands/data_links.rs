//! Data link command handlers

use std::path::PathBuf;

use anyhow::{Result, bail};
use clap::Subcommand;
use colored::*;
use serde::Serialize;

use seqera_client::{DataLinkLocation, SeqeraClient, TransferReport};
use seqera_core::domain::data_link::{DataLink, DataLinkItem, DataLinkItemType, DataLinkProvider};
use seqera_core::dto::Page;
use seqera_core::dto::data_link::{CreateDataLink, UpdateDataLink};

use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, listing, or_dash};
use crate::resolver::{resolve_credentials, resolve_data_link, workspace_id};

/// Data link subcommands
#[derive(Subcommand)]
pub enum DataLinkCommands {
    /// List data links
    List {
        /// Only links whose name matches
        #[arg(long)]
        filter: Option<String>,
        /// Only links reachable with these credentials (id or name)
        #[arg(long)]
        credentials: Option<String>,
        #[arg(long)]
        max: Option<u32>,
        #[arg(long)]
        offset: Option<u32>,
    },
    /// Show data link details
    View {
        /// Data link id or name
        data_link: String,
    },
    /// Create a custom data link
    Add {
        #[arg(short, long)]
        name: String,
        /// Bucket or container URI, e.g. s3://my-bucket
        resource_ref: String,
        /// aws, google or azure
        #[arg(long)]
        provider: DataLinkProvider,
        #[arg(short, long)]
        description: Option<String>,
        /// Credentials id or name
        #[arg(long)]
        credentials: Option<String>,
        /// The bucket is publicly readable
        #[arg(long)]
        public: bool,
    },
    /// Update a custom data link
    Update {
        /// Data link id or name
        data_link: String,
        #[arg(long)]
        new_name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        /// Credentials id or name
        #[arg(long)]
        credentials: Option<String>,
    },
    /// Delete a custom data link
    Delete {
        /// Data link id or name
        data_link: String,
    },
    /// List the content of a data link
    Browse {
        /// Data link id or name
        data_link: String,
        /// Folder inside the link (defaults to the root)
        path: Option<String>,
        /// Only entries whose name starts with this prefix
        #[arg(long)]
        filter: Option<String>,
        /// Credentials id or name (defaults to the link's own)
        #[arg(long)]
        credentials: Option<String>,
    },
    /// Upload local files or folders
    Upload {
        /// Data link id or name
        data_link: String,
        /// Local files or folders
        #[arg(required = true)]
        paths: Vec<PathBuf>,
        /// Destination folder inside the link (defaults to the root)
        #[arg(long)]
        remote_dir: Option<String>,
        /// Credentials id or name (defaults to the link's own)
        #[arg(long)]
        credentials: Option<String>,
    },
    /// Download remote files or folders
    Download {
        /// Data link id or name
        data_link: String,
        /// Remote files or folders
        #[arg(required = true)]
        paths: Vec<String>,
        /// Local destination folder
        #[arg(long, default_value = ".")]
        output_dir: PathBuf,
        /// Credentials id or name (defaults to the link's own)
        #[arg(long)]
        credentials: Option<String>,
    },
}

/// Human readable byte count
pub fn fmt_size(bytes: u64) -> String {
    const UNITS: [&str; 5] = ["B", "KB", "MB", "GB", "TB"];
    let mut size = bytes as f64;
    let mut unit = 0;
    while size >= 1024.0 && unit < UNITS.len() - 1 {
        size /= 1024.0;
        unit += 1;
    }
    if unit == 0 {
        format!("{} B", bytes)
    } else {
        format!("{:.1} {}", size, UNITS[unit])
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLinkList {
    pub data_links: Vec<DataLink>,
    pub total_size: i64,
}

impl Render for DataLinkList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "PROVIDER", "NAME", "RESOURCE", "REGION"]);
        for l in &self.data_links {
            table.row(vec![
                l.id.clone(),
                l.provider.to_string(),
                l.name.clone(),
                l.resource_ref.clone(),
                or_dash(l.region.as_deref()),
            ]);
        }
        listing(
            &format!("Data links ({} of {}):", self.data_links.len(), self.total_size),
            "No data links found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DataLinkView {
    pub data_link: DataLink,
}

impl Render for DataLinkView {
    fn to_console(&self) -> String {
        let l = &self.data_link;
        let credentials = l
            .credentials
            .iter()
            .map(|c| format!("{} ({})", c.name, c.id))
            .collect::<Vec<_>>()
            .join(", ");
        details(
            "Data Link Details:",
            &[
                ("ID", l.id.clone()),
                ("Name", l.name.clone()),
                ("Description", or_dash(l.description.as_deref())),
                ("Resource", l.resource_ref.clone()),
                ("Type", l.link_type.clone()),
                ("Provider", l.provider.to_string()),
                ("Region", or_dash(l.region.as_deref())),
                ("Public", if l.public_accessible { "yes" } else { "no" }.to_string()),
                ("Credentials", or_dash(Some(credentials))),
                ("Status", or_dash(l.status.as_deref())),
            ],
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BrowseListing {
    pub data_link: String,
    pub path: String,
    pub objects: Vec<DataLinkItem>,
}

impl Render for BrowseListing {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["TYPE", "NAME", "SIZE"]);
        for item in &self.objects {
            let (kind, size) = match item.item_type {
                DataLinkItemType::Folder => ("DIR", "-".to_string()),
                DataLinkItemType::File => ("FILE", fmt_size(item.size)),
            };
            table.row(vec![kind.to_string(), item.name.clone(), size]);
        }
        let location = if self.path.is_empty() {
            self.data_link.clone()
        } else {
            format!("{}/{}", self.data_link, self.path)
        };
        listing(
            &format!("Content of {} ({}):", location, self.objects.len()),
            "Empty folder.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferResponse {
    pub action: String,
    pub data_link: String,
    pub files: usize,
    pub bytes: u64,
}

impl TransferResponse {
    fn new(action: &str, data_link: &str, report: TransferReport) -> Self {
        Self {
            action: action.to_string(),
            data_link: data_link.to_string(),
            files: report.files,
            bytes: report.bytes,
        }
    }
}

impl Render for TransferResponse {
    fn to_console(&self) -> String {
        let files = if self.files == 1 { "file" } else { "files" };
        format!(
            "{}",
            format!(
                "✓ {} {} {} ({}) with data link '{}'",
                self.action,
                self.files,
                files,
                fmt_size(self.bytes),
                self.data_link
            )
            .green()
            .bold()
        )
    }
}

/// Resolve a data link and the credentials to reach it
///
/// Explicit credentials win over the first ones attached to the link.
async fn locate(
    client: &SeqeraClient,
    workspace_id: Option<i64>,
    data_link: &str,
    credentials: Option<&str>,
) -> Result<(DataLink, DataLinkLocation)> {
    let link = resolve_data_link(client, workspace_id, data_link).await?;
    let credentials_id = match credentials {
        Some(reference) => Some(resolve_credentials(client, workspace_id, reference).await?.id),
        None => link.credentials_id().map(str::to_string),
    };
    let location = DataLinkLocation {
        data_link_id: link.id.clone(),
        workspace_id,
        credentials_id,
    };
    Ok((link, location))
}

/// Handle data link commands
pub async fn handle_data_link_command(command: DataLinkCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        DataLinkCommands::List {
            filter,
            credentials,
            max,
            offset,
        } => {
            let credentials_id = match credentials {
                Some(reference) => Some(resolve_credentials(&client, ws, &reference).await?.id),
                None => None,
            };
            let page = client
                .data_links()
                .list(
                    ws,
                    credentials_id.as_deref(),
                    filter.as_deref(),
                    Page { max, offset },
                )
                .await?;
            output::print(
                &DataLinkList {
                    data_links: page.items,
                    total_size: page.total_size,
                },
                config.output,
            )
        }
        DataLinkCommands::View { data_link } => {
            let (link, location) = locate(&client, ws, &data_link, None).await?;
            let data_link = client
                .data_links()
                .get(&link.id, ws, location.credentials_id.as_deref())
                .await?;
            output::print(&DataLinkView { data_link }, config.output)
        }
        DataLinkCommands::Add {
            name,
            resource_ref,
            provider,
            description,
            credentials,
            public,
        } => {
            if provider == DataLinkProvider::Seqeracompute {
                bail!("Seqera Compute data links are managed by the Platform and cannot be added");
            }
            let credentials_id = match credentials {
                Some(reference) => Some(resolve_credentials(&client, ws, &reference).await?.id),
                None => None,
            };
            if credentials_id.is_none() && !public {
                tracing::warn!("Adding a private data link without credentials");
            }
            let request = CreateDataLink {
                name,
                description,
                link_type: "bucket".to_string(),
                provider,
                resource_ref,
                public_accessible: public,
                credentials_id,
            };
            let link = client.data_links().add(ws, &request).await?;
            output::print(
                &Message::with_id(format!("Data link '{}' added", link.name), link.id),
                config.output,
            )
        }
        DataLinkCommands::Update {
            data_link,
            new_name,
            description,
            credentials,
        } => {
            let link = resolve_data_link(&client, ws, &data_link).await?;
            let credentials_id = match credentials {
                Some(reference) => Some(resolve_credentials(&client, ws, &reference).await?.id),
                None => None,
            };
            let request = UpdateDataLink {
                name: new_name,
                description,
                credentials_id,
            };
            let updated = client.data_links().update(&link.id, ws, &request).await?;
            output::print(
                &Message::with_id(format!("Data link '{}' updated", updated.name), updated.id),
                config.output,
            )
        }
        DataLinkCommands::Delete { data_link } => {
            let link = resolve_data_link(&client, ws, &data_link).await?;
            client.data_links().delete(&link.id, ws).await?;
            output::print(
                &Message::with_id(format!("Data link '{}' deleted", link.name), link.id),
                config.output,
            )
        }
        DataLinkCommands::Browse {
            data_link,
            path,
            filter,
            credentials,
        } => {
            let (link, location) = locate(&client, ws, &data_link, credentials.as_deref()).await?;
            let path = path.unwrap_or_default().trim_matches('/').to_string();
            let objects = match filter {
                // A prefix filter only narrows the first page
                Some(prefix) => {
                    client
                        .data_links()
                        .browse(
                            &link.id,
                            ws,
                            location.credentials_id.as_deref(),
                            &path,
                            Some(&prefix),
                            None,
                        )
                        .await?
                        .objects
                }
                None => {
                    client
                        .data_links()
                        .browse_all(&link.id, ws, location.credentials_id.as_deref(), &path)
                        .await?
                }
            };
            output::print(
                &BrowseListing {
                    data_link: link.name,
                    path,
                    objects,
                },
                config.output,
            )
        }
        DataLinkCommands::Upload {
            data_link,
            paths,
            remote_dir,
            credentials,
        } => {
            let (link, location) = locate(&client, ws, &data_link, credentials.as_deref()).await?;
            let remote_dir = remote_dir.unwrap_or_default();
            let mut total = TransferReport::default();
            for path in &paths {
                tracing::info!(path = %path.display(), "Uploading");
                let report = client.upload_path(&location, path, &remote_dir).await?;
                total.files += report.files;
                total.bytes += report.bytes;
            }
            output::print(&TransferResponse::new("Uploaded", &link.name, total), config.output)
        }
        DataLinkCommands::Download {
            data_link,
            paths,
            output_dir,
            credentials,
        } => {
            let (link, location) = locate(&client, ws, &data_link, credentials.as_deref()).await?;
            tokio::fs::create_dir_all(&output_dir).await?;
            let mut total = TransferReport::default();
            for path in &paths {
                tracing::info!(path = %path, "Downloading");
                let report = client.download_path(&location, path, &output_dir).await?;
                total.files += report.files;
                total.bytes += report.bytes;
            }
            output::print(
                &TransferResponse::new("Downloaded", &link.name, total),
                config.output,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockApi;
    use axum::http::Method;
    use serde_json::json;

    fn links_route(api: &MockApi) {
        api.on(
            Method::GET,
            "/data-links",
            json!({ "dataLinks": [{
                "id": "dl-1",
                "name": "results",
                "resourceRef": "s3://results",
                "provider": "aws",
                "credentials": [{ "id": "cred-1", "name": "aws-keys", "provider": "aws" }]
            }], "totalSize": 1 }),
        );
    }

    #[test]
    fn test_fmt_size() {
        assert_eq!(fmt_size(0), "0 B");
        assert_eq!(fmt_size(1023), "1023 B");
        assert_eq!(fmt_size(1536), "1.5 KB");
        assert_eq!(fmt_size(5 * 1024 * 1024), "5.0 MB");
    }

    #[test]
    fn test_browse_listing_console() {
        output::plain();
        let objects: Vec<DataLinkItem> = serde_json::from_value(json!([
            { "type": "FOLDER", "name": "reads" },
            { "type": "FILE", "name": "samples.csv", "size": 2048 }
        ]))
        .unwrap();
        let console = BrowseListing {
            data_link: "results".to_string(),
            path: "run1".to_string(),
            objects,
        }
        .to_console();
        let lines: Vec<_> = console.lines().collect();
        assert_eq!(lines[0], "Content of results/run1 (2):");
        assert_eq!(lines[4], "  DIR   reads        -");
        assert_eq!(lines[5], "  FILE  samples.csv  2.0 KB");
    }

    #[test]
    fn test_transfer_response_console() {
        output::plain();
        let response = TransferResponse::new(
            "Uploaded",
            "results",
            TransferReport { files: 1, bytes: 10 },
        );
        assert_eq!(
            response.to_console(),
            "✓ Uploaded 1 file (10 B) with data link 'results'"
        );
    }

    #[tokio::test]
    async fn test_browse_uses_link_credentials() {
        let api = MockApi::new();
        links_route(&api);
        api.on(
            Method::GET,
            "/data-links/dl-1/browse/run1",
            json!({ "objects": [{ "type": "FILE", "name": "a.txt", "size": 3 }] }),
        );
        let config = api.config().await;

        handle_data_link_command(
            DataLinkCommands::Browse {
                data_link: "results".to_string(),
                path: Some("/run1/".to_string()),
                filter: None,
                credentials: None,
            },
            &config,
        )
        .await
        .unwrap();
        assert_eq!(api.hits("/data-links/dl-1/browse/run1"), 1);
    }

    #[tokio::test]
    async fn test_add_rejects_seqera_compute() {
        let api = MockApi::new();
        let config = api.config().await;

        let err = handle_data_link_command(
            DataLinkCommands::Add {
                name: "x".to_string(),
                resource_ref: "s3://x".to_string(),
                provider: DataLinkProvider::Seqeracompute,
                description: None,
                credentials: None,
                public: false,
            },
            &config,
        )
        .await
        .unwrap_err();
        assert!(err.to_string().contains("cannot be added"));
        assert_eq!(api.hits("/data-links"), 0);
    }
}

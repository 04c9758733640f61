//! Dataset command handlers

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Subcommand;
use serde::Serialize;

use seqera_core::domain::dataset::{Dataset, DatasetVersion};

use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, fmt_date, listing, or_dash};
use crate::resolver::{resolve_dataset, workspace_id};

/// Dataset subcommands
#[derive(Subcommand)]
pub enum DatasetCommands {
    /// List datasets
    List,
    /// Show a dataset and its versions
    View {
        /// Dataset id or name
        dataset: String,
    },
    /// Create a dataset, optionally uploading its first version
    Add {
        #[arg(short, long)]
        name: String,
        #[arg(short, long)]
        description: Option<String>,
        /// CSV or TSV file to upload as version 1
        #[arg(short, long)]
        file: Option<PathBuf>,
        /// The first row of the file holds column names
        #[arg(long)]
        header: bool,
    },
    /// Delete a dataset
    Delete {
        /// Dataset id or name
        dataset: String,
    },
    /// Upload a new version of a dataset
    Upload {
        /// Dataset id or name
        dataset: String,
        /// CSV or TSV file
        file: PathBuf,
        /// The first row of the file holds column names
        #[arg(long)]
        header: bool,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetList {
    pub datasets: Vec<Dataset>,
}

impl Render for DatasetList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "NAME", "DESCRIPTION", "UPDATED"]);
        for d in &self.datasets {
            table.row(vec![
                d.id.clone(),
                d.name.clone(),
                or_dash(d.description.as_deref()),
                fmt_date(d.last_updated),
            ]);
        }
        listing(
            &format!("Datasets ({}):", self.datasets.len()),
            "No datasets found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct DatasetView {
    pub dataset: Dataset,
    pub versions: Vec<DatasetVersion>,
}

impl Render for DatasetView {
    fn to_console(&self) -> String {
        let d = &self.dataset;
        let mut out = details(
            "Dataset Details:",
            &[
                ("ID", d.id.clone()),
                ("Name", d.name.clone()),
                ("Description", or_dash(d.description.as_deref())),
                ("Media type", or_dash(d.media_type.as_deref())),
                ("Created", fmt_date(d.date_created)),
                ("Updated", fmt_date(d.last_updated)),
            ],
        );

        let mut table = Table::new(&["VERSION", "FILE", "HEADER", "CREATED"]);
        for v in &self.versions {
            table.row(vec![
                v.version.to_string(),
                v.file_name.clone(),
                if v.has_header { "yes" } else { "no" }.to_string(),
                fmt_date(v.date_created),
            ]);
        }
        out.push('\n');
        out.push_str(&listing(
            &format!("Versions ({}):", self.versions.len()),
            "No versions uploaded.",
            &table,
        ));
        out
    }
}

/// Handle dataset commands
pub async fn handle_dataset_command(command: DatasetCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        DatasetCommands::List => {
            let datasets = client.datasets().list(ws).await?;
            output::print(&DatasetList { datasets }, config.output)
        }
        DatasetCommands::View { dataset } => {
            let found = resolve_dataset(&client, ws, &dataset).await?;
            let dataset = client.datasets().get(&found.id, ws).await?;
            let versions = client.datasets().versions(&found.id, ws).await?;
            output::print(&DatasetView { dataset, versions }, config.output)
        }
        DatasetCommands::Add {
            name,
            description,
            file,
            header,
        } => {
            let dataset = client.datasets().add(ws, &name, description).await?;
            if let Some(file) = file {
                client
                    .datasets()
                    .upload(&dataset.id, ws, &file, header)
                    .await
                    .with_context(|| {
                        format!("Dataset '{}' created but the upload failed", dataset.name)
                    })?;
            }
            output::print(
                &Message::with_id(format!("Dataset '{}' added", dataset.name), dataset.id),
                config.output,
            )
        }
        DatasetCommands::Delete { dataset } => {
            let found = resolve_dataset(&client, ws, &dataset).await?;
            client.datasets().delete(&found.id, ws).await?;
            output::print(
                &Message::with_id(format!("Dataset '{}' deleted", found.name), found.id),
                config.output,
            )
        }
        DatasetCommands::Upload {
            dataset,
            file,
            header,
        } => {
            let found = resolve_dataset(&client, ws, &dataset).await?;
            let version = client
                .datasets()
                .upload(&found.id, ws, &file, header)
                .await?;
            output::print(
                &Message::with_id(
                    format!(
                        "Version {} of dataset '{}' uploaded",
                        version.version, found.name
                    ),
                    found.id,
                ),
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

    #[test]
    fn test_dataset_view_console_lists_versions() {
        output::plain();
        let view = DatasetView {
            dataset: serde_json::from_value(json!({ "id": "ds1", "name": "samples" })).unwrap(),
            versions: serde_json::from_value(json!([
                { "datasetId": "ds1", "version": 1, "hasHeader": true, "fileName": "samples.csv" }
            ]))
            .unwrap(),
        };
        let console = view.to_console();
        assert!(console.contains("Name:        samples"));
        assert!(console.contains("Versions (1):"));
        assert!(console.contains("  1        samples.csv  yes     -"));
    }

    #[test]
    fn test_dataset_view_without_versions() {
        output::plain();
        let view = DatasetView {
            dataset: serde_json::from_value(json!({ "id": "ds1", "name": "samples" })).unwrap(),
            versions: vec![],
        };
        assert!(view.to_console().ends_with("No versions uploaded."));
    }

    #[tokio::test]
    async fn test_add_with_file_uploads_first_version() {
        let api = MockApi::new();
        api.on(
            Method::POST,
            "/datasets",
            json!({ "dataset": { "id": "ds1", "name": "samples" } }),
        );
        api.on(
            Method::POST,
            "/datasets/ds1/upload",
            json!({ "version": { "datasetId": "ds1", "version": 1, "fileName": "samples.csv" } }),
        );
        let config = api.config().await;

        let dir = std::env::temp_dir().join(format!("seqera-ds-{}", std::process::id()));
        std::fs::create_dir_all(&dir).unwrap();
        let file = dir.join("samples.csv");
        std::fs::write(&file, "sample,fastq\nS1,s1.fq.gz\n").unwrap();

        handle_dataset_command(
            DatasetCommands::Add {
                name: "samples".to_string(),
                description: None,
                file: Some(file),
                header: true,
            },
            &config,
        )
        .await
        .unwrap();
        std::fs::remove_dir_all(&dir).ok();

        assert_eq!(
            api.bodies(Method::POST, "/datasets"),
            vec![json!({ "name": "samples" })]
        );
        assert_eq!(api.hits("/datasets/ds1/upload"), 1);
    }
}

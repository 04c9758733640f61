//! Seqera CLI
//!
//! Command-line interface for the Seqera Platform API.

mod commands;
mod config;
mod output;
mod resolver;
#[cfg(test)]
mod test_support;

use clap::Parser;
use colored::*;
use commands::{Commands, handle_command};
use config::Config;
use output::OutputFormat;
use seqera_client::{ClientError, DEFAULT_API_URL};
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "seqera", version)]
#[command(about = "Seqera Platform command-line client", long_about = None)]
struct Cli {
    /// Platform API URL (falls back to TOWER_API_ENDPOINT, then the Seqera Cloud API)
    #[arg(long, global = true, env = "SEQERA_API_URL")]
    url: Option<String>,

    /// Personal access token (falls back to TOWER_ACCESS_TOKEN)
    #[arg(long, global = true, env = "SEQERA_ACCESS_TOKEN", hide_env_values = true)]
    access_token: Option<String>,

    /// Workspace id or `organization/workspace` (falls back to TOWER_WORKSPACE_ID)
    #[arg(short, long, global = true, env = "SEQERA_WORKSPACE")]
    workspace: Option<String>,

    /// Output format
    #[arg(short, long, global = true, value_enum, default_value_t = OutputFormat::Console)]
    output: OutputFormat,

    /// Accept invalid TLS certificates
    #[arg(long, global = true)]
    insecure: bool,

    /// Log requests and responses to stderr
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

impl Cli {
    /// Split the parsed arguments into configuration and command
    fn into_parts(self) -> (Config, Commands) {
        let config = Config {
            url: self
                .url
                .or_else(|| std::env::var("TOWER_API_ENDPOINT").ok())
                .unwrap_or_else(|| DEFAULT_API_URL.to_string()),
            access_token: self
                .access_token
                .or_else(|| std::env::var("TOWER_ACCESS_TOKEN").ok()),
            workspace: self
                .workspace
                .or_else(|| std::env::var("TOWER_WORKSPACE_ID").ok()),
            output: self.output,
            insecure: self.insecure,
        };
        (config, self.command)
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose {
        "seqera=debug,seqera_client=debug"
    } else {
        "seqera=warn,seqera_client=warn"
    };

    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()))
        .with(
            tracing_subscriber::fmt::layer()
                .with_writer(std::io::stderr)
                .with_target(false),
        )
        .init();
}

/// User-facing text for a failed command
fn error_message(err: &anyhow::Error) -> String {
    match err.downcast_ref::<ClientError>() {
        Some(ClientError::Authentication { message, .. }) => format!(
            "Unauthorized: {}. Check that your access token is valid and has access to the workspace",
            message
        ),
        _ => format!("{:#}", err),
    }
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let (config, command) = cli.into_parts();
    tracing::debug!(url = %config.url, workspace = ?config.workspace, "Configuration loaded");

    if let Err(err) = handle_command(command, &config).await {
        eprintln!("{} {}", "ERROR:".red().bold(), error_message(&err));
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use anyhow::Context;
    use clap::CommandFactory;

    #[test]
    fn test_cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn test_global_flags_after_subcommand() {
        let cli = Cli::try_parse_from([
            "seqera",
            "pipelines",
            "list",
            "-o",
            "yaml",
            "-w",
            "acme/prod",
            "--url",
            "http://localhost:8000/api",
        ])
        .unwrap();
        let (config, _) = cli.into_parts();

        assert_eq!(config.output, OutputFormat::Yaml);
        assert_eq!(config.workspace.as_deref(), Some("acme/prod"));
        assert_eq!(config.url, "http://localhost:8000/api");
    }

    #[test]
    fn test_error_message_for_auth_failures() {
        let err = anyhow::Error::new(ClientError::from_status(401, "Bad token"));
        assert!(error_message(&err).starts_with("Unauthorized: Bad token."));
    }

    #[test]
    fn test_error_message_keeps_context_chain() {
        let err: anyhow::Result<()> = Err(ClientError::NotFound("Pipeline 9".to_string()))
            .context("Failed to fetch pipeline");
        assert_eq!(
            error_message(&err.unwrap_err()),
            "Failed to fetch pipeline: Resource not found: Pipeline 9"
        );
    }
}

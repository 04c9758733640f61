//! Commands module
//!
//! Defines all CLI commands and their handlers.

mod actions;
mod compute_envs;
mod credentials;
mod data_links;
mod datasets;
mod info;
mod labels;
mod launch;
mod members;
mod organizations;
mod participants;
mod pipelines;
mod runs;
mod secrets;
mod teams;
mod workspaces;

pub use actions::ActionCommands;
pub use compute_envs::ComputeEnvCommands;
pub use credentials::CredentialCommands;
pub use data_links::DataLinkCommands;
pub use datasets::DatasetCommands;
pub use labels::LabelCommands;
pub use launch::LaunchArgs;
pub use members::MemberCommands;
pub use organizations::OrganizationCommands;
pub use participants::ParticipantCommands;
pub use pipelines::PipelineCommands;
pub use runs::RunCommands;
pub use secrets::SecretCommands;
pub use teams::TeamCommands;
pub use workspaces::WorkspaceCommands;

use std::path::Path;

use anyhow::{Context, Result};
use clap::Subcommand;

use crate::config::Config;

/// Top-level CLI commands
#[derive(Subcommand)]
pub enum Commands {
    /// Show the API endpoint, version and authenticated user
    Info,
    /// Organization management
    Organizations {
        #[command(subcommand)]
        command: OrganizationCommands,
    },
    /// Organization member management
    Members {
        #[command(subcommand)]
        command: MemberCommands,
    },
    /// Organization team management
    Teams {
        #[command(subcommand)]
        command: TeamCommands,
    },
    /// Workspace management
    Workspaces {
        #[command(subcommand)]
        command: WorkspaceCommands,
    },
    /// Workspace participant management
    Participants {
        #[command(subcommand)]
        command: ParticipantCommands,
    },
    /// Launchpad pipeline management
    Pipelines {
        #[command(subcommand)]
        command: PipelineCommands,
    },
    /// Launch a pipeline
    Launch(LaunchArgs),
    /// Workflow run management
    Runs {
        #[command(subcommand)]
        command: RunCommands,
    },
    /// Credentials management
    Credentials {
        #[command(subcommand)]
        command: CredentialCommands,
    },
    /// Compute environment management
    ComputeEnvs {
        #[command(subcommand)]
        command: ComputeEnvCommands,
    },
    /// Pipeline action management
    Actions {
        #[command(subcommand)]
        command: ActionCommands,
    },
    /// Label management
    Labels {
        #[command(subcommand)]
        command: LabelCommands,
    },
    /// Pipeline secret management
    Secrets {
        #[command(subcommand)]
        command: SecretCommands,
    },
    /// Dataset management
    Datasets {
        #[command(subcommand)]
        command: DatasetCommands,
    },
    /// Data link management and file transfer
    DataLinks {
        #[command(subcommand)]
        command: DataLinkCommands,
    },
}

/// Handle a CLI command
///
/// Routes the command to the appropriate handler module.
///
/// # Arguments
/// * `command` - The command to execute
/// * `config` - The CLI configuration
///
/// # Returns
/// Result indicating success or failure
pub async fn handle_command(command: Commands, config: &Config) -> Result<()> {
    match command {
        Commands::Info => info::handle_info_command(config).await,
        Commands::Organizations { command } => {
            organizations::handle_organization_command(command, config).await
        }
        Commands::Members { command } => members::handle_member_command(command, config).await,
        Commands::Teams { command } => teams::handle_team_command(command, config).await,
        Commands::Workspaces { command } => {
            workspaces::handle_workspace_command(command, config).await
        }
        Commands::Participants { command } => {
            participants::handle_participant_command(command, config).await
        }
        Commands::Pipelines { command } => pipelines::handle_pipeline_command(command, config).await,
        Commands::Launch(args) => launch::handle_launch_command(args, config).await,
        Commands::Runs { command } => runs::handle_run_command(command, config).await,
        Commands::Credentials { command } => {
            credentials::handle_credential_command(command, config).await
        }
        Commands::ComputeEnvs { command } => {
            compute_envs::handle_compute_env_command(command, config).await
        }
        Commands::Actions { command } => actions::handle_action_command(command, config).await,
        Commands::Labels { command } => labels::handle_label_command(command, config).await,
        Commands::Secrets { command } => secrets::handle_secret_command(command, config).await,
        Commands::Datasets { command } => datasets::handle_dataset_command(command, config).await,
        Commands::DataLinks { command } => {
            data_links::handle_data_link_command(command, config).await
        }
    }
}

/// Parse a single key=value pair
fn parse_key_val(s: &str) -> Result<(String, String)> {
    let pos = s
        .find('=')
        .ok_or_else(|| anyhow::anyhow!("invalid KEY=value: no `=` found in `{}`", s))?;
    Ok((s[..pos].to_string(), s[pos + 1..].to_string()))
}

/// Read a text file given on the command line
fn read_text_file(path: &Path) -> Result<String> {
    std::fs::read_to_string(path).with_context(|| format!("Failed to read file: {}", path.display()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_key_val() {
        assert_eq!(
            parse_key_val("input=s3://bucket/in").unwrap(),
            ("input".to_string(), "s3://bucket/in".to_string())
        );
        assert_eq!(
            parse_key_val("empty=").unwrap(),
            ("empty".to_string(), String::new())
        );
        assert!(parse_key_val("novalue").is_err());
    }

    #[test]
    fn test_read_text_file_reports_path() {
        let err = read_text_file(Path::new("/nonexistent/params.yaml")).unwrap_err();
        assert!(err.to_string().contains("/nonexistent/params.yaml"));
    }
}

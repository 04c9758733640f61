//! Credentials command handlers

use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use seqera_core::domain::credentials::{CredentialKeys, Credentials, GitProvider};
use seqera_core::dto::credentials::CredentialsDraft;

use super::read_text_file;
use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, fmt_date, listing, or_dash};
use crate::resolver::{resolve_credentials, workspace_id};

/// Credentials subcommands
#[derive(Subcommand)]
pub enum CredentialCommands {
    /// List credentials
    List {
        /// Only credentials of this provider (aws, google, github ...)
        #[arg(long)]
        provider: Option<String>,
    },
    /// Show credentials details (secrets are never returned)
    View {
        /// Credentials id or name
        credentials: String,
    },
    /// Add credentials
    Add {
        #[command(subcommand)]
        provider: NewCredentials,
    },
    /// Delete credentials
    Delete {
        /// Credentials id or name
        credentials: String,
    },
}

/// Fields shared by every provider
#[derive(Args, Debug, Clone)]
pub struct DraftArgs {
    /// Credentials name
    #[arg(short, long)]
    pub name: String,
    #[arg(short, long)]
    pub description: Option<String>,
}

/// Username and token for a Git hosting service
#[derive(Args, Debug, Clone)]
pub struct GitArgs {
    #[command(flatten)]
    pub draft: DraftArgs,
    #[arg(short, long)]
    pub username: String,
    /// Password or access token
    #[arg(short, long)]
    pub password: String,
    /// Server URL, for self-hosted instances
    #[arg(long)]
    pub base_url: Option<String>,
}

/// Provider-specific credentials
#[derive(Subcommand)]
pub enum NewCredentials {
    /// Amazon Web Services keys
    Aws {
        #[command(flatten)]
        draft: DraftArgs,
        #[arg(long)]
        access_key: String,
        #[arg(long)]
        secret_key: String,
        /// IAM role to assume
        #[arg(long)]
        assume_role_arn: Option<String>,
    },
    /// Azure Batch and Storage keys
    Azure {
        #[command(flatten)]
        draft: DraftArgs,
        #[arg(long)]
        batch_name: String,
        #[arg(long)]
        batch_key: String,
        #[arg(long)]
        storage_name: String,
        #[arg(long)]
        storage_key: String,
    },
    /// Google Cloud service account key
    Google {
        #[command(flatten)]
        draft: DraftArgs,
        /// Service account JSON key file
        #[arg(short, long)]
        key: PathBuf,
    },
    /// GitHub access token
    Github(GitArgs),
    /// GitLab access token
    Gitlab(GitArgs),
    /// Bitbucket app password
    Bitbucket(GitArgs),
    /// Gitea access token
    Gitea(GitArgs),
    /// SSH private key
    Ssh {
        #[command(flatten)]
        draft: DraftArgs,
        /// Private key file
        #[arg(short, long)]
        key: PathBuf,
        #[arg(long)]
        passphrase: Option<String>,
    },
    /// Kubernetes service account token
    K8s {
        #[command(flatten)]
        draft: DraftArgs,
        #[arg(short, long)]
        token: String,
    },
    /// Container registry login
    ContainerReg {
        #[command(flatten)]
        draft: DraftArgs,
        #[arg(short, long)]
        username: String,
        #[arg(short, long)]
        password: String,
        /// Registry server, e.g. docker.io
        #[arg(short, long)]
        registry: String,
    },
}

impl NewCredentials {
    /// Build the creation request, reading key files
    pub fn into_draft(self) -> Result<CredentialsDraft> {
        let git = |provider: GitProvider, args: GitArgs| {
            let mut draft = CredentialsDraft::new(
                args.draft.name,
                CredentialKeys::Git {
                    provider,
                    username: args.username,
                    password: args.password,
                },
            );
            draft.description = args.draft.description;
            draft.base_url = args.base_url;
            draft
        };
        let with = |args: DraftArgs, keys: CredentialKeys| {
            let mut draft = CredentialsDraft::new(args.name, keys);
            draft.description = args.description;
            draft
        };

        let draft = match self {
            NewCredentials::Aws {
                draft,
                access_key,
                secret_key,
                assume_role_arn,
            } => with(
                draft,
                CredentialKeys::Aws {
                    access_key,
                    secret_key,
                    assume_role_arn,
                },
            ),
            NewCredentials::Azure {
                draft,
                batch_name,
                batch_key,
                storage_name,
                storage_key,
            } => with(
                draft,
                CredentialKeys::Azure {
                    batch_name,
                    batch_key,
                    storage_name,
                    storage_key,
                },
            ),
            NewCredentials::Google { draft, key } => with(
                draft,
                CredentialKeys::Google {
                    data: read_text_file(&key)?,
                },
            ),
            NewCredentials::Github(args) => git(GitProvider::Github, args),
            NewCredentials::Gitlab(args) => git(GitProvider::Gitlab, args),
            NewCredentials::Bitbucket(args) => git(GitProvider::Bitbucket, args),
            NewCredentials::Gitea(args) => git(GitProvider::Gitea, args),
            NewCredentials::Ssh {
                draft,
                key,
                passphrase,
            } => with(
                draft,
                CredentialKeys::Ssh {
                    private_key: read_text_file(&key)?,
                    passphrase,
                },
            ),
            NewCredentials::K8s { draft, token } => with(draft, CredentialKeys::K8s { token }),
            NewCredentials::ContainerReg {
                draft,
                username,
                password,
                registry,
            } => with(
                draft,
                CredentialKeys::ContainerRegistry {
                    user_name: username,
                    password,
                    registry,
                },
            ),
        };
        Ok(draft)
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialsList {
    pub credentials: Vec<Credentials>,
}

impl Render for CredentialsList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "PROVIDER", "NAME", "LAST USED"]);
        for c in &self.credentials {
            table.row(vec![
                c.id.clone(),
                c.provider.clone(),
                c.name.clone(),
                fmt_date(c.last_used),
            ]);
        }
        listing(
            &format!("Credentials ({}):", self.credentials.len()),
            "No credentials found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CredentialsView {
    pub credentials: Credentials,
}

impl Render for CredentialsView {
    fn to_console(&self) -> String {
        let c = &self.credentials;
        details(
            "Credentials Details:",
            &[
                ("ID", c.id.clone()),
                ("Name", c.name.clone()),
                ("Provider", c.provider.clone()),
                ("Description", or_dash(c.description.as_deref())),
                ("Base URL", or_dash(c.base_url.as_deref())),
                ("Created", fmt_date(c.date_created)),
                ("Last used", fmt_date(c.last_used)),
            ],
        )
    }
}

/// Handle credentials commands
pub async fn handle_credential_command(command: CredentialCommands, config: &Config) -> Result<()> {
    let client = config.client()?;
    let ws = workspace_id(&client, config).await?;

    match command {
        CredentialCommands::List { provider } => {
            let credentials = client.credentials().list(ws, provider.as_deref()).await?;
            output::print(&CredentialsList { credentials }, config.output)
        }
        CredentialCommands::View { credentials } => {
            let found = resolve_credentials(&client, ws, &credentials).await?;
            let credentials = client.credentials().get(&found.id, ws).await?;
            output::print(&CredentialsView { credentials }, config.output)
        }
        CredentialCommands::Add { provider } => {
            let draft = provider.into_draft()?;
            let name = draft.name.clone();
            let kind = draft.provider.clone();
            let id = client.credentials().add(ws, draft).await?;
            output::print(
                &Message::with_id(format!("{} credentials '{}' added", kind, name), id),
                config.output,
            )
        }
        CredentialCommands::Delete { credentials } => {
            let found = resolve_credentials(&client, ws, &credentials).await?;
            client.credentials().delete(&found.id, ws).await?;
            output::print(
                &Message::with_id(format!("Credentials '{}' deleted", found.name), found.id),
                config.output,
            )
        }
    }
}

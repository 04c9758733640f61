//! Organization member command handlers

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use seqera_core::domain::organization::{Member, OrgRole};

use crate::config::Config;
use crate::output::{self, Message, Render, Table, listing};
use crate::resolver::{resolve_member, resolve_org};

/// Member subcommands
#[derive(Subcommand)]
pub enum MemberCommands {
    /// List organization members
    List {
        /// Organization id or name
        #[arg(long)]
        organization: String,
        /// Only members whose name or email contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Invite a user to the organization
    Add {
        #[arg(long)]
        organization: String,
        /// User name or email
        user: String,
    },
    /// Remove a member from the organization
    Delete {
        #[arg(long)]
        organization: String,
        /// User name or email
        user: String,
    },
    /// Change the role of a member
    UpdateRole {
        #[arg(long)]
        organization: String,
        /// User name or email
        user: String,
        /// owner, member or collaborator
        #[arg(short, long)]
        role: OrgRole,
    },
    /// Leave the organization
    Leave {
        #[arg(long)]
        organization: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct MemberList {
    pub organization: String,
    pub members: Vec<Member>,
}

impl Render for MemberList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "USER", "EMAIL", "ROLE"]);
        for member in &self.members {
            table.row(vec![
                member.member_id.to_string(),
                member.user_name.clone(),
                member.email.clone(),
                member.role.to_string(),
            ]);
        }
        listing(
            &format!("Members of '{}' ({}):", self.organization, self.members.len()),
            "No members found.",
            &table,
        )
    }
}

/// Handle member commands
pub async fn handle_member_command(command: MemberCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        MemberCommands::List {
            organization,
            filter,
        } => {
            let org = resolve_org(&client, &organization).await?;
            let members = client.members().list(org.org_id, filter.as_deref()).await?;
            output::print(
                &MemberList {
                    organization: org.name,
                    members,
                },
                config.output,
            )
        }
        MemberCommands::Add { organization, user } => {
            let org = resolve_org(&client, &organization).await?;
            let member = client.members().add(org.org_id, &user).await?;
            output::print(
                &Message::with_id(
                    format!("Member '{}' added to organization '{}'", member.user_name, org.name),
                    member.member_id,
                ),
                config.output,
            )
        }
        MemberCommands::Delete { organization, user } => {
            let org = resolve_org(&client, &organization).await?;
            let member = resolve_member(&client, org.org_id, &user).await?;
            client.members().delete(org.org_id, member.member_id).await?;
            output::print(
                &Message::with_id(
                    format!("Member '{}' removed from organization '{}'", member.user_name, org.name),
                    member.member_id,
                ),
                config.output,
            )
        }
        MemberCommands::UpdateRole {
            organization,
            user,
            role,
        } => {
            let org = resolve_org(&client, &organization).await?;
            let member = resolve_member(&client, org.org_id, &user).await?;
            client
                .members()
                .update_role(org.org_id, member.member_id, role)
                .await?;
            output::print(
                &Message::with_id(
                    format!("Member '{}' is now '{}' in organization '{}'", member.user_name, role, org.name),
                    member.member_id,
                ),
                config.output,
            )
        }
        MemberCommands::Leave { organization } => {
            let org = resolve_org(&client, &organization).await?;
            client.members().leave(org.org_id).await?;
            output::print(
                &Message::new(format!("Left organization '{}'", org.name)),
                config.output,
            )
        }
    }
}

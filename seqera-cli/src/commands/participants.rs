//! Workspace participant command handlers
//!
//! Participants always belong to the workspace selected with `--workspace`.

use anyhow::Result;
use clap::{Subcommand, ValueEnum};
use serde::Serialize;

use seqera_core::domain::workspace::{Participant, WspRole};
use seqera_core::dto::workspace::AddParticipant;

use crate::config::Config;
use crate::output::{self, Message, Render, Table, listing, or_dash};
use crate::resolver::{required_workspace, resolve_member, resolve_participant, resolve_team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ParticipantKind {
    /// An organization member
    Member,
    /// An organization team
    Team,
    /// A user outside the organization
    Collaborator,
}

/// Participant subcommands
#[derive(Subcommand)]
pub enum ParticipantCommands {
    /// List workspace participants
    List {
        /// Only participants whose name or email contains this text
        #[arg(short, long)]
        filter: Option<String>,
    },
    /// Add a participant to the workspace
    Add {
        /// User name, email or team name
        name: String,
        #[arg(short = 't', long = "type", value_enum, default_value_t = ParticipantKind::Member)]
        kind: ParticipantKind,
    },
    /// Remove a participant from the workspace
    Delete {
        /// User name, email or team name
        name: String,
    },
    /// Change the role of a participant
    UpdateRole {
        /// User name, email or team name
        name: String,
        /// owner, admin, maintain, launch, connect or view
        #[arg(short, long)]
        role: WspRole,
    },
    /// Leave the workspace
    Leave,
}

#[derive(Debug, Clone, Serialize)]
pub struct ParticipantList {
    pub workspace: String,
    pub participants: Vec<Participant>,
}

impl Render for ParticipantList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "TYPE", "NAME", "EMAIL", "ROLE"]);
        for p in &self.participants {
            table.row(vec![
                p.participant_id.to_string(),
                p.participant_type.to_string(),
                p.display_name().to_string(),
                or_dash(p.email.as_deref()),
                p.wsp_role.to_string(),
            ]);
        }
        listing(
            &format!("Participants of '{}' ({}):", self.workspace, self.participants.len()),
            "No participants found.",
            &table,
        )
    }
}

/// Handle participant commands
pub async fn handle_participant_command(
    command: ParticipantCommands,
    config: &Config,
) -> Result<()> {
    let client = config.client()?;
    let ws = required_workspace(&client, config).await?;

    match command {
        ParticipantCommands::List { filter } => {
            let participants = client
                .participants()
                .list(ws.org_id, ws.workspace_id, filter.as_deref())
                .await?;
            output::print(
                &ParticipantList {
                    workspace: ws.reference(),
                    participants,
                },
                config.output,
            )
        }
        ParticipantCommands::Add { name, kind } => {
            let request = match kind {
                ParticipantKind::Member => AddParticipant {
                    member_id: Some(resolve_member(&client, ws.org_id, &name).await?.member_id),
                    ..Default::default()
                },
                ParticipantKind::Team => AddParticipant {
                    team_id: Some(resolve_team(&client, ws.org_id, &name).await?.team_id),
                    ..Default::default()
                },
                ParticipantKind::Collaborator => AddParticipant {
                    user_name_or_email: Some(name.clone()),
                    ..Default::default()
                },
            };
            let participant = client
                .participants()
                .add(ws.org_id, ws.workspace_id, &request)
                .await?;
            output::print(
                &Message::with_id(
                    format!(
                        "Participant '{}' added to workspace '{}' as '{}'",
                        participant.display_name(),
                        ws.reference(),
                        participant.wsp_role
                    ),
                    participant.participant_id,
                ),
                config.output,
            )
        }
        ParticipantCommands::Delete { name } => {
            let participant =
                resolve_participant(&client, ws.org_id, ws.workspace_id, &name).await?;
            client
                .participants()
                .delete(ws.org_id, ws.workspace_id, participant.participant_id)
                .await?;
            output::print(
                &Message::with_id(
                    format!(
                        "Participant '{}' removed from workspace '{}'",
                        participant.display_name(),
                        ws.reference()
                    ),
                    participant.participant_id,
                ),
                config.output,
            )
        }
        ParticipantCommands::UpdateRole { name, role } => {
            let participant =
                resolve_participant(&client, ws.org_id, ws.workspace_id, &name).await?;
            client
                .participants()
                .update_role(ws.org_id, ws.workspace_id, participant.participant_id, role)
                .await?;
            output::print(
                &Message::with_id(
                    format!(
                        "Participant '{}' is now '{}' in workspace '{}'",
                        participant.display_name(),
                        role,
                        ws.reference()
                    ),
                    participant.participant_id,
                ),
                config.output,
            )
        }
        ParticipantCommands::Leave => {
            client
                .participants()
                .leave(ws.org_id, ws.workspace_id)
                .await?;
            output::print(
                &Message::new(format!("Left workspace '{}'", ws.reference())),
                config.output,
            )
        }
    }
}

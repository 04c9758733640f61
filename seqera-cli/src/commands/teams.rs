//! Team command handlers

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use seqera_core::domain::organization::Member;
use seqera_core::domain::team::Team;

use crate::config::Config;
use crate::output::{self, Message, Render, Table, listing, or_dash};
use crate::resolver::{pick_member, resolve_org, resolve_team};

/// Team subcommands
#[derive(Subcommand)]
pub enum TeamCommands {
    /// List the teams of an organization
    List {
        /// Organization id or name
        #[arg(long)]
        organization: String,
    },
    /// Create a team
    Add {
        #[arg(long)]
        organization: String,
        /// Team name
        name: String,
        #[arg(short, long)]
        description: Option<String>,
    },
    /// Delete a team
    Delete {
        #[arg(long)]
        organization: String,
        /// Team id or name
        team: String,
    },
    /// List the members of a team
    Members {
        #[arg(long)]
        organization: String,
        /// Team id or name
        team: String,
    },
    /// Add a user to a team
    AddMember {
        #[arg(long)]
        organization: String,
        /// Team id or name
        team: String,
        /// User name or email
        user: String,
    },
    /// Remove a user from a team
    DeleteMember {
        #[arg(long)]
        organization: String,
        /// Team id or name
        team: String,
        /// User name or email
        user: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamList {
    pub organization: String,
    pub teams: Vec<Team>,
}

impl Render for TeamList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "NAME", "MEMBERS", "DESCRIPTION"]);
        for team in &self.teams {
            table.row(vec![
                team.team_id.to_string(),
                team.name.clone(),
                team.members_count.to_string(),
                or_dash(team.description.as_deref()),
            ]);
        }
        listing(
            &format!("Teams of '{}' ({}):", self.organization, self.teams.len()),
            "No teams found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TeamMemberList {
    pub team: String,
    pub members: Vec<Member>,
}

impl Render for TeamMemberList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "USER", "EMAIL"]);
        for member in &self.members {
            table.row(vec![
                member.member_id.to_string(),
                member.user_name.clone(),
                member.email.clone(),
            ]);
        }
        listing(
            &format!("Members of team '{}' ({}):", self.team, self.members.len()),
            "No team members found.",
            &table,
        )
    }
}

/// Handle team commands
pub async fn handle_team_command(command: TeamCommands, config: &Config) -> Result<()> {
    let client = config.client()?;

    match command {
        TeamCommands::List { organization } => {
            let org = resolve_org(&client, &organization).await?;
            let teams = client.teams().list(org.org_id).await?;
            output::print(
                &TeamList {
                    organization: org.name,
                    teams,
                },
                config.output,
            )
        }
        TeamCommands::Add {
            organization,
            name,
            description,
        } => {
            let org = resolve_org(&client, &organization).await?;
            let team = client.teams().add(org.org_id, &name, description).await?;
            output::print(
                &Message::with_id(
                    format!("Team '{}' added to organization '{}'", team.name, org.name),
                    team.team_id,
                ),
                config.output,
            )
        }
        TeamCommands::Delete { organization, team } => {
            let org = resolve_org(&client, &organization).await?;
            let team = resolve_team(&client, org.org_id, &team).await?;
            client.teams().delete(org.org_id, team.team_id).await?;
            output::print(
                &Message::with_id(format!("Team '{}' deleted", team.name), team.team_id),
                config.output,
            )
        }
        TeamCommands::Members { organization, team } => {
            let org = resolve_org(&client, &organization).await?;
            let team = resolve_team(&client, org.org_id, &team).await?;
            let members = client.teams().members(org.org_id, team.team_id).await?;
            output::print(
                &TeamMemberList {
                    team: team.name,
                    members,
                },
                config.output,
            )
        }
        TeamCommands::AddMember {
            organization,
            team,
            user,
        } => {
            let org = resolve_org(&client, &organization).await?;
            let team = resolve_team(&client, org.org_id, &team).await?;
            let member = client
                .teams()
                .add_member(org.org_id, team.team_id, &user)
                .await?;
            output::print(
                &Message::with_id(
                    format!("Member '{}' added to team '{}'", member.user_name, team.name),
                    member.member_id,
                ),
                config.output,
            )
        }
        TeamCommands::DeleteMember {
            organization,
            team,
            user,
        } => {
            let org = resolve_org(&client, &organization).await?;
            let team = resolve_team(&client, org.org_id, &team).await?;
            let members = client.teams().members(org.org_id, team.team_id).await?;
            let member = pick_member(&members, &user)?;
            client
                .teams()
                .delete_member(org.org_id, team.team_id, member.member_id)
                .await?;
            output::print(
                &Message::with_id(
                    format!("Member '{}' removed from team '{}'", member.user_name, team.name),
                    member.member_id,
                ),
                config.output,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_team_list_console() {
        output::plain();
        let console = TeamList {
            organization: "acme".to_string(),
            teams: vec![Team {
                team_id: 12,
                name: "bioinfo".to_string(),
                description: None,
                avatar_url: None,
                members_count: 3,
            }],
        }
        .to_console();

        assert!(console.contains("ID  NAME     MEMBERS  DESCRIPTION"));
        assert!(console.contains("12  bioinfo  3        -"));
    }

    #[test]
    fn test_empty_team_members() {
        output::plain();
        let console = TeamMemberList {
            team: "bioinfo".to_string(),
            members: vec![],
        }
        .to_console();
        assert_eq!(console, "No team members found.");
    }
}

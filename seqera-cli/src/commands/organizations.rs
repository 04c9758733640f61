//! Organization command handlers

use anyhow::Result;
use clap::Subcommand;
use serde::Serialize;

use seqera_core::domain::organization::Organization;
use seqera_core::dto::organization::{OrganizationDraft, UpdateOrganization};

use crate::config::Config;
use crate::output::{self, Message, Render, Table, details, listing, or_dash};
use crate::resolver::resolve_org;

/// Organization subcommands
#[derive(Subcommand)]
pub enum OrganizationCommands {
    /// List the organizations of the authenticated user
    List,
    /// Show organization details
    View {
        /// Organization id or name
        name: String,
    },
    /// Create an organization
    Add {
        /// Short name (used in references)
        name: String,
        /// Full display name
        #[arg(short, long)]
        full_name: String,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },
    /// Update an organization
    Update {
        /// Organization id or name
        name: String,
        /// New short name
        #[arg(long)]
        new_name: Option<String>,
        #[arg(short, long)]
        full_name: Option<String>,
        #[arg(short, long)]
        description: Option<String>,
        #[arg(short, long)]
        location: Option<String>,
        #[arg(long)]
        website: Option<String>,
    },
    /// Delete an organization
    Delete {
        /// Organization id or name
        name: String,
    },
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationList {
    pub organizations: Vec<Organization>,
}

impl Render for OrganizationList {
    fn to_console(&self) -> String {
        let mut table = Table::new(&["ID", "NAME", "FULL NAME", "ROLE"]);
        for org in &self.organizations {
            table.row(vec![
                org.org_id.to_string(),
                org.name.clone(),
                org.full_name.clone(),
                or_dash(org.member_role),
            ]);
        }
        listing(
            &format!("Organizations ({}):", self.organizations.len()),
            "No organizations found.",
            &table,
        )
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct OrganizationView {
    pub organization: Organization,
}

impl Render for OrganizationView {
    fn to_console(&self) -> String {
        let org = &self.organization;
        details(
            "Organization Details:",
            &[
                ("ID", org.org_id.to_string()),
                ("Name", org.name.clone()),
                ("Full name", org.full_name.clone()),
                ("Description", or_dash(org.description.as_deref())),
                ("Location", or_dash(org.location.as_deref())),
                ("Website", or_dash(org.website.as_deref())),
                ("Role", or_dash(org.member_role)),
            ],
        )
    }
}

/// Handle organization commands
pub async fn handle_organization_command(
    command: OrganizationCommands,
    config: &Config,
) -> Result<()> {
    let client = config.client()?;

    match command {
        OrganizationCommands::List => {
            let organizations = client.organizations().list().await?;
            output::print(&OrganizationList { organizations }, config.output)
        }
        OrganizationCommands::View { name } => {
            let org = resolve_org(&client, &name).await?;
            let organization = client.organizations().get(org.org_id).await?;
            output::print(&OrganizationView { organization }, config.output)
        }
        OrganizationCommands::Add {
            name,
            full_name,
            description,
            location,
            website,
        } => {
            let draft = OrganizationDraft {
                name,
                full_name,
                description,
                location,
                website,
            };
            let org = client.organizations().add(draft).await?;
            output::print(
                &Message::with_id(format!("Organization '{}' added", org.name), org.org_id),
                config.output,
            )
        }
        OrganizationCommands::Update {
            name,
            new_name,
            full_name,
            description,
            location,
            website,
        } => {
            let org = resolve_org(&client, &name).await?;
            let update = UpdateOrganization {
                name: new_name,
                full_name,
                description,
                location,
                website,
            };
            client.organizations().update(org.org_id, &update).await?;
            output::print(
                &Message::with_id(format!("Organization '{}' updated", org.name), org.org_id),
                config.output,
            )
        }
        OrganizationCommands::Delete { name } => {
            let org = resolve_org(&client, &name).await?;
            client.organizations().delete(org.org_id).await?;
            output::print(
                &Message::with_id(format!("Organization '{}' deleted", org.name), org.org_id),
                config.output,
            )
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use seqera_core::domain::organization::OrgRole;

    fn org() -> Organization {
        Organization {
            org_id: 4,
            name: "acme".to_string(),
            full_name: "Acme Labs".to_string(),
            description: None,
            location: Some("Barcelona".to_string()),
            website: None,
            logo_url: None,
            member_id: Some(9),
            member_role: Some(OrgRole::Owner),
        }
    }

    #[test]
    fn test_organization_list_console() {
        output::plain();
        let console = OrganizationList {
            organizations: vec![org()],
        }
        .to_console();

        assert!(console.starts_with("Organizations (1):"));
        assert!(console.contains("4   acme  Acme Labs  owner"));
    }

    #[test]
    fn test_organization_view_yaml() {
        let yaml = output::render(
            &OrganizationView { organization: org() },
            output::OutputFormat::Yaml,
        )
        .unwrap();
        assert!(yaml.contains("orgId: 4"));
        assert!(yaml.contains("fullName: Acme Labs"));
        assert!(yaml.contains("memberRole: owner"));
        assert!(!yaml.contains("website"));
    }
}

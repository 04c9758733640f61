//! Workspace participant endpoints

use crate::SeqeraClient;
use crate::error::Result;
use seqera_core::domain::workspace::{Participant, WspRole};
use seqera_core::dto::workspace::{
    AddParticipant, AddParticipantResponse, ListParticipantsResponse, UpdateParticipantRole,
};

/// Handle for `/orgs/{orgId}/workspaces/{workspaceId}/participants`
#[derive(Debug, Clone, Copy)]
pub struct Participants<'a> {
    client: &'a SeqeraClient,
}

impl SeqeraClient {
    /// Workspace participant endpoints
    pub fn participants(&self) -> Participants<'_> {
        Participants { client: self }
    }
}

fn base_path(org_id: i64, workspace_id: i64) -> String {
    format!("/orgs/{}/workspaces/{}/participants", org_id, workspace_id)
}

impl Participants<'_> {
    /// List the participants of a workspace
    pub async fn list(
        &self,
        org_id: i64,
        workspace_id: i64,
        search: Option<&str>,
    ) -> Result<Vec<Participant>> {
        let mut query = Vec::new();
        if let Some(search) = search {
            query.push(("search", search.to_string()));
        }
        let response: ListParticipantsResponse = self
            .client
            .get_json(&base_path(org_id, workspace_id), &query)
            .await?;
        Ok(response.participants)
    }

    /// Add a member, team or collaborator to a workspace
    pub async fn add(
        &self,
        org_id: i64,
        workspace_id: i64,
        participant: &AddParticipant,
    ) -> Result<Participant> {
        let path = format!("{}/add", base_path(org_id, workspace_id));
        let response: AddParticipantResponse =
            self.client.put_json(&path, &[], participant).await?;
        Ok(response.participant)
    }

    /// Remove a participant from a workspace
    pub async fn delete(&self, org_id: i64, workspace_id: i64, participant_id: i64) -> Result<()> {
        let path = format!("{}/{}", base_path(org_id, workspace_id), participant_id);
        self.client.delete(&path, &[]).await
    }

    /// Change the workspace role of a participant
    pub async fn update_role(
        &self,
        org_id: i64,
        workspace_id: i64,
        participant_id: i64,
        role: WspRole,
    ) -> Result<()> {
        let path = format!("{}/{}/role", base_path(org_id, workspace_id), participant_id);
        self.client
            .put_empty(&path, &[], &UpdateParticipantRole { role })
            .await
    }

    /// Leave a workspace as the authenticated user
    pub async fn leave(&self, org_id: i64, workspace_id: i64) -> Result<()> {
        self.client
            .delete(&base_path(org_id, workspace_id), &[])
            .await
    }
}

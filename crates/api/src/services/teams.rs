use models::team::{AddTeamMember, CreateTeam, Team, TeamMember, UpdateTeam};
use uuid::Uuid;

use crate::{client::ApiClient, error::ApiError};

#[derive(Debug, Clone)]
pub struct TeamService {
    client: ApiClient,
}

impl TeamService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Team>, ApiError> {
        self.client.get("/teams/").await
    }

    pub async fn get(&self, id: Uuid) -> Result<Team, ApiError> {
        self.client.get(&format!("/teams/{id}")).await
    }

    pub async fn create(&self, data: &CreateTeam) -> Result<Team, ApiError> {
        let shaped = CreateTeam {
            name: data.name.trim().to_string(),
            description: data.description.trim().to_string(),
        };
        self.client.post("/teams/", &shaped).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateTeam) -> Result<Team, ApiError> {
        self.client.put(&format!("/teams/{id}"), data).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete(&format!("/teams/{id}")).await
    }

    pub async fn members(&self, team_id: Uuid) -> Result<Vec<TeamMember>, ApiError> {
        self.client.get(&format!("/teams/{team_id}/members")).await
    }

    pub async fn add_member(&self, team_id: Uuid, user_id: Uuid) -> Result<TeamMember, ApiError> {
        self.client
            .post(&format!("/teams/{team_id}/members"), &AddTeamMember { user_id })
            .await
    }

    pub async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        self.client
            .delete(&format!("/teams/{team_id}/members/{user_id}"))
            .await
    }
}

use std::sync::Arc;

use api::ApiError;
use models::team::{CreateTeam, Team, TeamMember, UpdateTeam};
use uuid::Uuid;

use crate::{
    client::QueryClient,
    key::{QueryKey, Resource},
};

pub struct TeamQueries<'a> {
    pub(crate) client: &'a QueryClient,
}

impl TeamQueries<'_> {
    pub async fn list(&self) -> Result<Arc<Vec<Team>>, ApiError> {
        let service = self.client.team_service.clone();
        self.client
            .team_list
            .fetch(QueryKey::of(Resource::Teams), move || {
                let service = service.clone();
                async move { service.list().await }
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Team>, ApiError> {
        let service = self.client.team_service.clone();
        let key = QueryKey::with(Resource::Teams, [id.to_string()]);
        self.client
            .team_detail
            .fetch(key, move || {
                let service = service.clone();
                async move { service.get(id).await }
            })
            .await
    }

    pub async fn members(&self, team_id: Uuid) -> Result<Arc<Vec<TeamMember>>, ApiError> {
        let service = self.client.team_service.clone();
        let key = QueryKey::with(Resource::TeamMembers, [team_id.to_string()]);
        self.client
            .team_members
            .fetch(key, move || {
                let service = service.clone();
                async move { service.members(team_id).await }
            })
            .await
    }

    pub async fn create(&self, data: &CreateTeam) -> Result<Team, ApiError> {
        let service = self.client.team_service.clone();
        let data = data.clone();
        self.client
            .mutate(
                &[Resource::Teams],
                "Team created successfully!",
                "Failed to create team",
                async move { service.create(&data).await },
            )
            .await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateTeam) -> Result<Team, ApiError> {
        let service = self.client.team_service.clone();
        let data = data.clone();
        self.client
            .mutate(
                &[Resource::Teams],
                "Team updated successfully!",
                "Failed to update team",
                async move { service.update(id, &data).await },
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let service = self.client.team_service.clone();
        self.client
            .mutate(
                &[Resource::Teams],
                "Team deleted successfully!",
                "Failed to delete team",
                async move { service.delete(id).await },
            )
            .await
    }

    pub async fn add_member(&self, team_id: Uuid, user_id: Uuid) -> Result<TeamMember, ApiError> {
        let service = self.client.team_service.clone();
        self.client
            .mutate(
                &[Resource::TeamMembers],
                "Team member added successfully!",
                "Failed to add team member",
                async move { service.add_member(team_id, user_id).await },
            )
            .await
    }

    pub async fn remove_member(&self, team_id: Uuid, user_id: Uuid) -> Result<(), ApiError> {
        let service = self.client.team_service.clone();
        self.client
            .mutate(
                &[Resource::TeamMembers],
                "Team member removed successfully!",
                "Failed to remove team member",
                async move { service.remove_member(team_id, user_id).await },
            )
            .await
    }
}

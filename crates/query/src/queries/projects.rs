use std::sync::Arc;

use api::ApiError;
use models::project::{CreateProject, Project, UpdateProject};
use uuid::Uuid;

use crate::{
    client::QueryClient,
    key::{QueryKey, Resource},
};

pub struct ProjectQueries<'a> {
    pub(crate) client: &'a QueryClient,
}

impl ProjectQueries<'_> {
    pub async fn list(&self) -> Result<Arc<Vec<Project>>, ApiError> {
        let service = self.client.project_service.clone();
        self.client
            .project_list
            .fetch(QueryKey::of(Resource::Projects), move || {
                let service = service.clone();
                async move { service.list().await }
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Project>, ApiError> {
        let service = self.client.project_service.clone();
        let key = QueryKey::with(Resource::Projects, [id.to_string()]);
        self.client
            .project_detail
            .fetch(key, move || {
                let service = service.clone();
                async move { service.get(id).await }
            })
            .await
    }

    pub async fn create(&self, data: &CreateProject) -> Result<Project, ApiError> {
        let service = self.client.project_service.clone();
        let data = data.clone();
        self.client
            .mutate(
                &[Resource::Projects],
                "Project created successfully",
                "Failed to create project",
                async move { service.create(&data).await },
            )
            .await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateProject) -> Result<Project, ApiError> {
        let service = self.client.project_service.clone();
        let data = data.clone();
        self.client
            .mutate(
                &[Resource::Projects],
                "Project updated successfully",
                "Failed to update project",
                async move { service.update(id, &data).await },
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let service = self.client.project_service.clone();
        self.client
            .mutate(
                &[Resource::Projects],
                "Project deleted successfully",
                "Failed to delete project",
                async move { service.delete(id).await },
            )
            .await
    }
}

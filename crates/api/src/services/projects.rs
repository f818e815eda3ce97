use models::project::{CreateProject, Project, UpdateProject};
use uuid::Uuid;

use crate::{client::ApiClient, error::ApiError};

#[derive(Debug, Clone)]
pub struct ProjectService {
    client: ApiClient,
}

impl ProjectService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn list(&self) -> Result<Vec<Project>, ApiError> {
        self.client.get("/projects/").await
    }

    pub async fn get(&self, id: Uuid) -> Result<Project, ApiError> {
        self.client.get(&format!("/projects/{id}")).await
    }

    pub async fn create(&self, data: &CreateProject) -> Result<Project, ApiError> {
        let shaped = CreateProject {
            name: data.name.trim().to_string(),
            description: data.description.trim().to_string(),
            ..data.clone()
        };
        self.client.post("/projects/", &shaped).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateProject) -> Result<Project, ApiError> {
        self.client.put(&format!("/projects/{id}"), data).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete(&format!("/projects/{id}")).await
    }
}

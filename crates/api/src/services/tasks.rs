use models::task::{CreateTask, Task, UpdateTask};
use uuid::Uuid;

use crate::{client::ApiClient, error::ApiError};

#[derive(Debug, Clone)]
pub struct TaskService {
    client: ApiClient,
}

impl TaskService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    /// List tasks, optionally scoped to a project.
    pub async fn list(&self, project_id: Option<Uuid>) -> Result<Vec<Task>, ApiError> {
        match project_id {
            Some(id) => {
                self.client
                    .get_query("/tasks/", &[("project_id", id.to_string())])
                    .await
            }
            None => self.client.get("/tasks/").await,
        }
    }

    pub async fn get(&self, id: Uuid) -> Result<Task, ApiError> {
        self.client.get(&format!("/tasks/{id}")).await
    }

    pub async fn create(&self, data: &CreateTask) -> Result<Task, ApiError> {
        let shaped = CreateTask {
            title: data.title.trim().to_string(),
            ..data.clone()
        };
        self.client.post("/tasks/", &shaped).await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateTask) -> Result<Task, ApiError> {
        self.client.put(&format!("/tasks/{id}"), data).await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        self.client.delete(&format!("/tasks/{id}")).await
    }
}

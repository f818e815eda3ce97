use std::sync::Arc;

use api::ApiError;
use models::task::{CreateTask, Task, UpdateTask};
use uuid::Uuid;

use crate::{
    client::QueryClient,
    key::{QueryKey, Resource},
};

pub struct TaskQueries<'a> {
    pub(crate) client: &'a QueryClient,
}

impl TaskQueries<'_> {
    /// List tasks, optionally scoped to one project. Each scope is its own
    /// cache key.
    pub async fn list(&self, project_id: Option<Uuid>) -> Result<Arc<Vec<Task>>, ApiError> {
        let service = self.client.task_service.clone();
        let key = match project_id {
            Some(id) => QueryKey::with(Resource::Tasks, [id.to_string()]),
            None => QueryKey::of(Resource::Tasks),
        };
        self.client
            .task_list
            .fetch(key, move || {
                let service = service.clone();
                async move { service.list(project_id).await }
            })
            .await
    }

    pub async fn get(&self, id: Uuid) -> Result<Arc<Task>, ApiError> {
        let service = self.client.task_service.clone();
        let key = QueryKey::with(Resource::Tasks, [id.to_string()]);
        self.client
            .task_detail
            .fetch(key, move || {
                let service = service.clone();
                async move { service.get(id).await }
            })
            .await
    }

    pub async fn create(&self, data: &CreateTask) -> Result<Task, ApiError> {
        let service = self.client.task_service.clone();
        let data = data.clone();
        self.client
            .mutate(
                &[Resource::Tasks],
                "Task created successfully",
                "Failed to create task",
                async move { service.create(&data).await },
            )
            .await
    }

    pub async fn update(&self, id: Uuid, data: &UpdateTask) -> Result<Task, ApiError> {
        let service = self.client.task_service.clone();
        let data = data.clone();
        self.client
            .mutate(
                &[Resource::Tasks],
                "Task updated successfully",
                "Failed to update task",
                async move { service.update(id, &data).await },
            )
            .await
    }

    pub async fn delete(&self, id: Uuid) -> Result<(), ApiError> {
        let service = self.client.task_service.clone();
        self.client
            .mutate(
                &[Resource::Tasks],
                "Task deleted successfully",
                "Failed to delete task",
                async move { service.delete(id).await },
            )
            .await
    }
}

use models::user::User;

use crate::{client::ApiClient, error::ApiError};

#[derive(Debug, Clone)]
pub struct UserService {
    client: ApiClient,
}

impl UserService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn search_by_email(&self, email: &str) -> Result<Vec<User>, ApiError> {
        self.client
            .get_query("/users/search", &[("email", email.trim())])
            .await
    }
}

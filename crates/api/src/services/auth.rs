use models::auth::{LoginResponse, RegisterRequest, RegisterResponse};
use models::user::User;
use uuid::Uuid;

use crate::{client::ApiClient, error::ApiError};

#[derive(Debug, Clone)]
pub struct AuthService {
    client: ApiClient,
}

impl AuthService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn register(
        &self,
        email: &str,
        password: &str,
        full_name: &str,
    ) -> Result<RegisterResponse, ApiError> {
        let body = RegisterRequest {
            email: email.trim().to_string(),
            password: password.to_string(),
            full_name: full_name.trim().to_string(),
        };
        self.client.post("/auth/register", &body).await
    }

    /// The login endpoint takes a URL-encoded form, unlike every other write.
    pub async fn login(&self, email: &str, password: &str) -> Result<LoginResponse, ApiError> {
        self.client
            .post_form("/auth/login", &[("email", email.trim()), ("password", password)])
            .await
    }

    pub async fn logout(&self) -> Result<(), ApiError> {
        self.client.post_empty("/auth/logout").await
    }

    pub async fn user_profile(&self, user_id: Uuid) -> Result<User, ApiError> {
        self.client.get(&format!("/users/profile/{user_id}")).await
    }

    /// Profile fetch with the freshly issued token, before the session store
    /// is populated.
    pub async fn user_profile_with_token(
        &self,
        user_id: Uuid,
        token: &str,
    ) -> Result<User, ApiError> {
        self.client
            .get_with_token(&format!("/users/profile/{user_id}"), token)
            .await
    }
}

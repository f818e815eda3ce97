use std::sync::Arc;

use api::ApiError;
use models::user::User;

use crate::{
    client::QueryClient,
    key::{QueryKey, Resource},
};

/// Searches shorter than this never reach the network.
pub const MIN_SEARCH_LEN: usize = 3;

pub struct UserQueries<'a> {
    pub(crate) client: &'a QueryClient,
}

impl UserQueries<'_> {
    /// Search users by email fragment. Below the length threshold this
    /// resolves to an empty list without issuing a request; each distinct
    /// query string at or above it is its own cache key.
    pub async fn search(&self, email: &str) -> Result<Arc<Vec<User>>, ApiError> {
        let query = email.trim().to_string();
        if query.chars().count() < MIN_SEARCH_LEN {
            return Ok(Arc::new(Vec::new()));
        }

        let service = self.client.user_service.clone();
        let key = QueryKey::with(Resource::Users, [query.clone()]);
        self.client
            .user_search
            .fetch(key, move || {
                let service = service.clone();
                let query = query.clone();
                async move { service.search_by_email(&query).await }
            })
            .await
    }
}

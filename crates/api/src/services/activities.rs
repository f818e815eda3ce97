use models::activity::Activity;

use crate::{client::ApiClient, error::ApiError};

/// The server caps `limit` at 50; ask for no more than that.
pub const MAX_FEED_LIMIT: u32 = 50;

#[derive(Debug, Clone)]
pub struct ActivityService {
    client: ApiClient,
}

impl ActivityService {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }

    pub async fn recent(&self, limit: u32) -> Result<Vec<Activity>, ApiError> {
        let limit = limit.min(MAX_FEED_LIMIT);
        self.client
            .get_query("/activities/recent", &[("limit", limit.to_string())])
            .await
    }
}

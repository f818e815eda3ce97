use std::sync::Arc;
use std::time::Duration;

use api::ApiError;
use models::activity::Activity;
use tokio::time::interval;
use tracing::{debug, warn};

use crate::{
    client::QueryClient,
    key::{QueryKey, Resource},
};

pub const DEFAULT_FEED_LIMIT: u32 = 10;
/// The feed refetches on this wall-clock interval regardless of staleness.
pub const REFRESH_INTERVAL: Duration = Duration::from_secs(2 * 60);

pub struct ActivityQueries<'a> {
    pub(crate) client: &'a QueryClient,
}

impl ActivityQueries<'_> {
    pub async fn recent(&self, limit: u32) -> Result<Arc<Vec<Activity>>, ApiError> {
        let service = self.client.activity_service.clone();
        let key = QueryKey::with(Resource::Activities, [limit.to_string()]);
        self.client
            .activity_feed
            .fetch(key, move || {
                let service = service.clone();
                async move { service.recent(limit).await }
            })
            .await
    }
}

/// Background task keeping the activity feed live.
pub struct ActivityFeed;

impl ActivityFeed {
    /// Spawn the refresh loop. Failures are logged and retried on the next
    /// tick; abort the returned handle to stop the loop.
    pub fn spawn(client: QueryClient, limit: u32) -> tokio::task::JoinHandle<()> {
        tokio::spawn(async move {
            let mut ticker = interval(REFRESH_INTERVAL);
            loop {
                ticker.tick().await;
                // drop the cached feed first so the read below hits the network
                client.invalidate(Resource::Activities);
                match client.activities().recent(limit).await {
                    Ok(feed) => debug!(entries = feed.len(), "activity feed refreshed"),
                    Err(e) => warn!(error = %e, "activity feed refresh failed"),
                }
            }
        })
    }
}

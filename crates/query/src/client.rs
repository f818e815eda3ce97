//! The cached query client: one cache per read shape, explicit invalidation,
//! and the shared mutation path (invalidate + notify on success, notify on
//! error, always re-raise).

use std::future::Future;

use api::{
    ApiClient, ApiError, NotificationService, SessionStore,
    services::{
        ActivityService, AuthService, ProjectService, TaskService, TeamService, UserService,
    },
};
use models::{
    activity::Activity,
    project::Project,
    task::Task,
    team::{Team, TeamMember},
    user::User,
};
use tracing::debug;

use crate::{
    cache::TypedCache,
    key::Resource,
    queries::{
        activities::ActivityQueries, auth::AuthQueries, projects::ProjectQueries,
        tasks::TaskQueries, teams::TeamQueries, users::UserQueries,
    },
};

#[derive(Clone)]
pub struct QueryClient {
    api: ApiClient,
    pub(crate) auth_service: AuthService,
    pub(crate) user_service: UserService,
    pub(crate) project_service: ProjectService,
    pub(crate) task_service: TaskService,
    pub(crate) team_service: TeamService,
    pub(crate) activity_service: ActivityService,
    pub(crate) project_list: TypedCache<Vec<Project>>,
    pub(crate) project_detail: TypedCache<Project>,
    pub(crate) task_list: TypedCache<Vec<Task>>,
    pub(crate) task_detail: TypedCache<Task>,
    pub(crate) team_list: TypedCache<Vec<Team>>,
    pub(crate) team_detail: TypedCache<Team>,
    pub(crate) team_members: TypedCache<Vec<TeamMember>>,
    pub(crate) user_search: TypedCache<Vec<User>>,
    pub(crate) activity_feed: TypedCache<Vec<Activity>>,
}

impl QueryClient {
    pub fn new(api: ApiClient) -> Self {
        Self {
            auth_service: AuthService::new(api.clone()),
            user_service: UserService::new(api.clone()),
            project_service: ProjectService::new(api.clone()),
            task_service: TaskService::new(api.clone()),
            team_service: TeamService::new(api.clone()),
            activity_service: ActivityService::new(api.clone()),
            api,
            project_list: TypedCache::new(),
            project_detail: TypedCache::new(),
            task_list: TypedCache::new(),
            task_detail: TypedCache::new(),
            team_list: TypedCache::new(),
            team_detail: TypedCache::new(),
            team_members: TypedCache::new(),
            user_search: TypedCache::new(),
            activity_feed: TypedCache::new(),
        }
    }

    pub fn api(&self) -> &ApiClient {
        &self.api
    }

    pub fn session(&self) -> &SessionStore {
        self.api.session()
    }

    pub fn notifier(&self) -> &NotificationService {
        self.api.notifier()
    }

    pub fn auth(&self) -> AuthQueries<'_> {
        AuthQueries { client: self }
    }

    pub fn projects(&self) -> ProjectQueries<'_> {
        ProjectQueries { client: self }
    }

    pub fn tasks(&self) -> TaskQueries<'_> {
        TaskQueries { client: self }
    }

    pub fn teams(&self) -> TeamQueries<'_> {
        TeamQueries { client: self }
    }

    pub fn users(&self) -> UserQueries<'_> {
        UserQueries { client: self }
    }

    pub fn activities(&self) -> ActivityQueries<'_> {
        ActivityQueries { client: self }
    }

    /// Discard every cache entry the resource tag maps to. The mapping is
    /// deliberately coarse: any task mutation drops every task-list variant.
    pub fn invalidate(&self, resource: Resource) {
        debug!(resource = %resource, "invalidating cached reads");
        match resource {
            Resource::Projects => {
                self.project_list.clear();
                self.project_detail.clear();
            }
            Resource::Tasks => {
                self.task_list.clear();
                self.task_detail.clear();
            }
            Resource::Teams => {
                self.team_list.clear();
                self.team_detail.clear();
            }
            Resource::TeamMembers => self.team_members.clear(),
            Resource::Users => self.user_search.clear(),
            Resource::Activities => self.activity_feed.clear(),
        }
    }

    /// The shared mutation path: on success invalidate the declared resource
    /// tags and post the success banner; on error post the server's detail
    /// when it carries one, the fallback otherwise. The fault is re-raised
    /// either way.
    pub(crate) async fn mutate<T>(
        &self,
        invalidates: &[Resource],
        success: &str,
        fallback: &str,
        op: impl Future<Output = Result<T, ApiError>>,
    ) -> Result<T, ApiError> {
        match op.await {
            Ok(value) => {
                for resource in invalidates {
                    self.invalidate(*resource);
                }
                self.notifier().success(success);
                Ok(value)
            }
            Err(err) => {
                let message = err
                    .detail()
                    .map(str::to_string)
                    .unwrap_or_else(|| fallback.to_string());
                self.notifier().error(message);
                Err(err)
            }
        }
    }
}

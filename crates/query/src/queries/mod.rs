//! Per-resource query groups, one for each of the original UI's data needs.

pub mod activities;
pub mod auth;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;

pub use activities::{ActivityFeed, ActivityQueries};
pub use auth::AuthQueries;
pub use projects::ProjectQueries;
pub use tasks::TaskQueries;
pub use teams::TeamQueries;
pub use users::UserQueries;

//! One thin typed service per API resource. Request shaping only; every
//! fault passes through from the gateway unchanged.

pub mod activities;
pub mod auth;
pub mod projects;
pub mod tasks;
pub mod teams;
pub mod users;

pub use activities::ActivityService;
pub use auth::AuthService;
pub use projects::ProjectService;
pub use tasks::TaskService;
pub use teams::TeamService;
pub use users::UserService;

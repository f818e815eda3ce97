//! Typed gateway and per-resource services over the taskhub REST API.

pub mod client;
pub mod config;
pub mod error;
pub mod notification;
pub mod services;
pub mod session;

pub use client::ApiClient;
pub use config::ApiConfig;
pub use error::ApiError;
pub use notification::{Notification, NotificationLevel, NotificationService};
pub use session::{SessionEvent, SessionStore};

use serde::{Deserialize, Serialize};
use ts_rs::TS;
use uuid::Uuid;

use crate::user::User;

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct RegisterRequest {
    pub email: String,
    pub password: String,
    pub full_name: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct RegisterResponse {
    pub message: String,
    pub user_id: Uuid,
}

#[derive(Debug, Clone, Serialize, Deserialize, TS)]
pub struct LoginResponse {
    pub access_token: String,
    pub token_type: String,
    pub user_id: Uuid,
}

/// The authenticated user plus their bearer token; persisted across restarts.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, TS)]
pub struct Session {
    pub token: String,
    pub user: User,
}

//! Fault taxonomy for the remote API.

use reqwest::StatusCode;
use serde::Deserialize;
use thiserror::Error;

#[derive(Debug, Clone, Error)]
pub enum ApiError {
    #[error("session expired")]
    AuthenticationExpired,
    #[error("permission denied")]
    PermissionDenied,
    #[error("not found: {}", detail.as_deref().unwrap_or("resource"))]
    NotFound { detail: Option<String> },
    #[error("{message}")]
    Validation { message: String },
    #[error("http {status}: {body}")]
    Server { status: u16, body: String },
    #[error("network error: {0}")]
    Network(String),
    #[error("timeout")]
    Timeout,
    #[error("json error: {0}")]
    Decode(String),
    #[error("http {status}")]
    Unknown { status: u16 },
}

impl ApiError {
    /// Returns true if the fault is transient and a read may be retried.
    pub fn should_retry(&self) -> bool {
        matches!(
            self,
            Self::Network(_) | Self::Timeout | Self::Server { .. }
        )
    }

    /// The structured detail the server attached, when there is one.
    pub fn detail(&self) -> Option<&str> {
        match self {
            Self::NotFound { detail } => detail.as_deref(),
            Self::Validation { message } => Some(message),
            _ => None,
        }
    }

    /// The notification banner text for this fault.
    pub fn user_message(&self) -> String {
        match self {
            Self::AuthenticationExpired => "Session expired. Please login again.".to_string(),
            Self::PermissionDenied => {
                "You do not have permission to perform this action.".to_string()
            }
            Self::NotFound { detail } => {
                if detail.as_deref().is_some_and(|d| d.contains("Project not found")) {
                    "The selected project no longer exists.".to_string()
                } else {
                    "Resource not found.".to_string()
                }
            }
            Self::Validation { message } => message.clone(),
            Self::Server { .. } => "Server error. Please try again later.".to_string(),
            Self::Network(_) | Self::Timeout | Self::Decode(_) | Self::Unknown { .. } => {
                "An unexpected error occurred. Please try again.".to_string()
            }
        }
    }

    /// Classify a non-success response. 401 is handled by the caller, which
    /// knows whether an authenticated session was active.
    pub(crate) fn from_response(status: StatusCode, body: &str) -> Self {
        let detail = ErrorBody::parse(body).and_then(|b| b.detail);
        match status {
            StatusCode::FORBIDDEN => Self::PermissionDenied,
            StatusCode::NOT_FOUND => Self::NotFound {
                detail: detail.and_then(ErrorDetail::into_message),
            },
            s if s.is_server_error() => Self::Server {
                status: s.as_u16(),
                body: body.to_string(),
            },
            s => match detail {
                Some(d) => Self::Validation {
                    message: d
                        .into_message()
                        .unwrap_or_else(|| "Validation error occurred.".to_string()),
                },
                None => Self::Unknown { status: s.as_u16() },
            },
        }
    }
}

/// The standardized error shape: `{"detail": "..."}` or
/// `{"detail": {"msg": "...", ...}}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub detail: Option<ErrorDetail>,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub(crate) enum ErrorDetail {
    Text(String),
    Structured { msg: Option<String> },
    Other(serde_json::Value),
}

impl ErrorBody {
    pub fn parse(body: &str) -> Option<Self> {
        serde_json::from_str(body).ok()
    }
}

impl ErrorDetail {
    fn into_message(self) -> Option<String> {
        match self {
            Self::Text(s) => Some(s),
            Self::Structured { msg } => msg,
            Self::Other(_) => None,
        }
    }
}

pub(crate) fn map_reqwest_error(e: reqwest::Error) -> ApiError {
    if e.is_timeout() {
        ApiError::Timeout
    } else {
        ApiError::Network(e.to_string())
    }
}

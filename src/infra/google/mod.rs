pub mod auth;
pub mod sheets;
pub mod slides;

use serde::Deserialize;

/// Non-success reply from a Google endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiFailure {
    pub status: u16,
    pub message: String,
}

impl std::fmt::Display for ApiFailure {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "HTTP {}: {}", self.status, self.message)
    }
}

#[derive(Debug, Deserialize)]
struct ErrorEnvelope {
    error: ErrorBody,
}

#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum ErrorBody {
    Detailed { message: String },
    Code(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureKind {
    NotFound,
    /// Token expired or revoked.
    Unauthorized,
    Permission,
    Other,
}

impl ApiFailure {
    pub fn from_body(status: u16, body: &str) -> Self {
        let message = match serde_json::from_str::<ErrorEnvelope>(body) {
            Ok(ErrorEnvelope {
                error: ErrorBody::Detailed { message },
            }) => message,
            Ok(ErrorEnvelope {
                error: ErrorBody::Code(code),
            }) => code,
            Err(_) if body.trim().is_empty() => "empty response body".to_string(),
            Err(_) => body.trim().chars().take(200).collect(),
        };
        Self { status, message }
    }

    pub fn kind(&self) -> FailureKind {
        match self.status {
            404 => FailureKind::NotFound,
            401 => FailureKind::Unauthorized,
            403 => FailureKind::Permission,
            _ => FailureKind::Other,
        }
    }
}

pub(crate) fn api_failure(response: reqwest::blocking::Response) -> ApiFailure {
    let status = response.status().as_u16();
    let body = response.text().unwrap_or_default();
    ApiFailure::from_body(status, &body)
}

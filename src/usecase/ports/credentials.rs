use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CredentialError {
    #[error("credential file not found: {0}")]
    Missing(String),
    #[error("credential file is invalid: {0}")]
    Invalid(String),
    #[error("token request was rejected: {0}")]
    Rejected(String),
    #[error("token request failed: {0}")]
    Transport(String),
}

/// Supplies bearer tokens for the remote document services.
pub trait TokenProvider: Send + Sync {
    fn access_token(&self) -> Result<String, CredentialError>;
}

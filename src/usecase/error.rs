use thiserror::Error;

use crate::usecase::ports::credentials::CredentialError;
use crate::usecase::ports::presentation_store::StoreError;
use crate::usecase::ports::source::SourceError;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum FillError {
    #[error("enter a name to look up")]
    EmptyName,
    #[error("failed to read name: {0}")]
    Input(String),
    #[error("no matching name found: {name}")]
    NotFound { name: String },
    #[error("row {row} has {populated} of {expected} required cells")]
    MalformedRecord {
        row: usize,
        populated: usize,
        expected: usize,
    },
    #[error("presentation {0} was not found or is not shared with this account")]
    DocumentNotFound(String),
    #[error("no edit permission on presentation {0}")]
    Permission(String),
    #[error("batch update applied {applied} of {requested} replacements")]
    PartialUpdate { applied: usize, requested: usize },
    #[error(transparent)]
    Credential(#[from] CredentialError),
    #[error(transparent)]
    Source(#[from] SourceError),
    #[error("presentation store error: {0}")]
    Store(String),
}

impl From<StoreError> for FillError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::DocumentNotFound(id) => FillError::DocumentNotFound(id),
            StoreError::Permission(id) => FillError::Permission(id),
            StoreError::Credential(err) => FillError::Credential(err),
            other @ (StoreError::Transport(_) | StoreError::InvalidResponse(_)) => {
                FillError::Store(other.to_string())
            }
        }
    }
}

impl FillError {
    pub fn is_not_found(&self) -> bool {
        matches!(self, FillError::NotFound { .. })
    }
}

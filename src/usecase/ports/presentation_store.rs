use thiserror::Error;

use crate::domain::entities::presentation::Presentation;
use crate::usecase::ports::credentials::CredentialError;

/// One "replace every occurrence of `find` with `replace`" instruction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReplaceAllText {
    pub find: String,
    pub replace: String,
    pub match_case: bool,
}

/// Occurrences changed by each instruction of a batch, in request order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReply {
    pub occurrences_changed: Vec<u32>,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    #[error("presentation not found: {0}")]
    DocumentNotFound(String),
    #[error("permission denied for presentation: {0}")]
    Permission(String),
    #[error("presentation store request failed: {0}")]
    Transport(String),
    #[error("unexpected presentation store response: {0}")]
    InvalidResponse(String),
    #[error(transparent)]
    Credential(#[from] CredentialError),
}

pub trait PresentationStore: Send + Sync {
    fn get(&self, presentation_id: &str) -> Result<Presentation, StoreError>;

    /// All instructions are sent as a single request.
    fn batch_replace(
        &self,
        presentation_id: &str,
        requests: &[ReplaceAllText],
    ) -> Result<BatchReply, StoreError>;
}

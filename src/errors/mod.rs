use thiserror::Error;

use crate::domain::PendingId;

/// Failures the acting player can do something about.
///
/// Storage and configuration problems travel as plain `anyhow` errors;
/// callers downcast to this type to tell the two apart.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum LadderError {
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Pending match {0} not found")]
    NotFound(PendingId),

    #[error("Unknown player: {0}")]
    UnknownPlayer(String),

    #[error("Wrong player name or PIN")]
    InvalidCredentials,

    #[error("Not allowed: {0}")]
    Forbidden(String),
}

impl LadderError {
    pub fn invalid(message: impl Into<String>) -> Self {
        LadderError::InvalidInput(message.into())
    }
}

/// Looks for a `LadderError` anywhere in the context chain.
pub fn as_ladder_error(err: &anyhow::Error) -> Option<&LadderError> {
    err.chain().find_map(|cause| cause.downcast_ref::<LadderError>())
}

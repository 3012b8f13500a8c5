use thiserror::Error;
use uuid::Uuid;

/// Error taxonomy for the relationship core. Every variant carries a
/// human-readable message and maps onto an HTTP-style status code for the
/// API layer to transport.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ApiError {
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl ApiError {
    pub fn status_code(&self) -> u16 {
        match self {
            ApiError::Validation(_) => 400,
            ApiError::Forbidden(_) => 403,
            ApiError::NotFound(_) => 404,
            ApiError::Conflict(_) => 409,
            ApiError::Internal(_) => 500,
        }
    }
}

// Nil ids come from callers that forgot to attach an actor or target.
pub fn ensure_id(id: Uuid, field: &str) -> Result<(), ApiError> {
    if id.is_nil() {
        return Err(ApiError::Validation(format!(
            "{} is required and in valid format",
            field
        )));
    }
    Ok(())
}

use thiserror::Error;
use validator::ValidationErrors;

use models::errors::ModelError;

#[derive(Debug, Error)]
pub enum ServiceError {
    #[error("validation error: {0}")]
    Validation(String),
    /// Field-level failures collected by `validator`.
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("not found: {0}")]
    NotFound(String),
    #[error("conflict: {0}")]
    Conflict(String),
    #[error("database error: {0}")]
    Db(String),
}

impl ServiceError {
    pub fn not_found(entity: &str) -> Self { Self::NotFound(format!("{} not found", entity)) }

    pub fn db(err: sea_orm::DbErr) -> Self { ModelError::from_db(err).into() }
}

impl From<ModelError> for ServiceError {
    fn from(err: ModelError) -> Self {
        match err {
            ModelError::Validation(m) => ServiceError::Validation(m),
            ModelError::Conflict(m) => ServiceError::Conflict(m),
            ModelError::Db(m) => ServiceError::Db(m),
        }
    }
}

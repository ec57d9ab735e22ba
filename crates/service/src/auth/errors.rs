use thiserror::Error;
use validator::ValidationErrors;

use super::token::TokenError;

/// Message shared by every failed login, whatever the cause.
pub const INVALID_CREDENTIALS: &str = "Invalid credentials";

/// Business errors for auth workflows
#[derive(Debug, Error)]
pub enum AuthError {
    #[error("validation failed: {0}")]
    Validation(String),
    #[error("invalid input: {0}")]
    Invalid(#[from] ValidationErrors),
    #[error("email already registered")]
    Conflict,
    #[error("user not found")]
    NotFound,
    #[error("{}", INVALID_CREDENTIALS)]
    Unauthorized,
    #[error("too many login attempts")]
    TooManyRequests,
    #[error("hashing error: {0}")]
    HashError(String),
    #[error("token error: {0}")]
    Token(#[from] TokenError),
    #[error("repository error: {0}")]
    Repository(String),
}

impl AuthError {
    /// Stable numeric code for external mapping/logging
    pub fn code(&self) -> u16 {
        match self {
            AuthError::Validation(_) | AuthError::Invalid(_) => 1001,
            AuthError::Conflict => 1002,
            AuthError::NotFound => 1003,
            AuthError::Unauthorized => 1004,
            AuthError::TooManyRequests => 1005,
            AuthError::HashError(_) => 1101,
            AuthError::Token(_) => 1102,
            AuthError::Repository(_) => 1200,
        }
    }
}

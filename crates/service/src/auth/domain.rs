use serde::{Deserialize, Serialize};
use uuid::Uuid;
use validator::Validate;

use super::role::Role;

/// Registration input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct RegisterInput {
    #[validate(email(message = "must be a valid email"))]
    pub email: String,
    #[validate(length(min = 8, message = "must be at least 8 characters"))]
    pub password: String,
}

/// Login input
#[derive(Debug, Clone, Serialize, Deserialize, Validate)]
pub struct LoginInput {
    #[validate(length(min = 1, message = "is required"))]
    pub email: String,
    #[validate(length(min = 1, message = "is required"))]
    pub password: String,
}

/// Persisted admin identity without its digest.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminIdentity {
    pub id: Uuid,
    pub email: String,
    pub role: Role,
}

/// Domain credentials (hashed)
#[derive(Debug, Clone)]
pub struct Credentials {
    pub user_id: Uuid,
    pub password_hash: String,
    pub password_algorithm: String,
}

/// Login result (session)
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthSession {
    pub user: AdminIdentity,
    pub access_token: String,
    pub expires_at: i64,
}

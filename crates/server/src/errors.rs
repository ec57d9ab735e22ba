use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Serialize;
use thiserror::Error;
use tracing::error;
use validator::ValidationErrors;

use service::auth::errors::AuthError;
use service::errors::ServiceError;

const INTERNAL_MESSAGE: &str = "Internal server error";
const NO_ERRORS: &[FieldError] = &[];

#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Every failure a handler can return; `IntoResponse` is the only place
/// errors become HTTP.
#[derive(Debug, Error)]
pub enum ApiError {
    #[error("{message}")]
    Validation { message: String, errors: Vec<FieldError> },
    #[error("{0}")]
    Unauthorized(String),
    #[error("{0}")]
    Forbidden(String),
    #[error("{0}")]
    NotFound(String),
    #[error("{0}")]
    Conflict(String),
    #[error("{0}")]
    TooManyRequests(String),
    /// Detail is logged, never sent.
    #[error("internal: {0}")]
    Internal(String),
}

#[derive(Serialize)]
struct ErrorBody<'a> {
    message: &'a str,
    #[serde(skip_serializing_if = "no_errors")]
    errors: &'a [FieldError],
}

fn no_errors(errors: &&[FieldError]) -> bool { errors.is_empty() }

impl ApiError {
    pub fn bad_request(message: impl Into<String>) -> Self {
        ApiError::Validation { message: message.into(), errors: Vec::new() }
    }

    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Validation { .. } => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Forbidden(_) => StatusCode::FORBIDDEN,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Conflict(_) => StatusCode::CONFLICT,
            ApiError::TooManyRequests(_) => StatusCode::TOO_MANY_REQUESTS,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let (message, errors): (&str, &[FieldError]) = match &self {
            ApiError::Validation { message, errors } => (message.as_str(), errors.as_slice()),
            ApiError::Internal(detail) => {
                error!(error = %detail, "request failed");
                (INTERNAL_MESSAGE, NO_ERRORS)
            }
            ApiError::Unauthorized(m)
            | ApiError::Forbidden(m)
            | ApiError::NotFound(m)
            | ApiError::Conflict(m)
            | ApiError::TooManyRequests(m) => (m.as_str(), NO_ERRORS),
        };
        (status, Json(ErrorBody { message, errors })).into_response()
    }
}

fn camel_case(field: &str) -> String {
    let mut out = String::with_capacity(field.len());
    let mut upper = false;
    for c in field.chars() {
        if c == '_' {
            upper = true;
        } else if upper {
            out.extend(c.to_uppercase());
            upper = false;
        } else {
            out.push(c);
        }
    }
    out
}

impl From<ValidationErrors> for ApiError {
    fn from(errs: ValidationErrors) -> Self {
        let mut errors: Vec<FieldError> = errs
            .field_errors()
            .into_iter()
            .flat_map(|(field, list)| {
                let field = camel_case(&field);
                list.iter().map(move |e| FieldError {
                    field: field.clone(),
                    message: e.message.as_ref().map(|m| m.to_string()).unwrap_or_else(|| e.code.to_string()),
                })
            })
            .collect();
        errors.sort_by(|a, b| a.field.cmp(&b.field));
        ApiError::Validation { message: "Validation failed".into(), errors }
    }
}

impl From<ServiceError> for ApiError {
    fn from(err: ServiceError) -> Self {
        match err {
            ServiceError::Validation(m) => ApiError::bad_request(m),
            ServiceError::Invalid(errs) => errs.into(),
            ServiceError::NotFound(m) => ApiError::NotFound(m),
            ServiceError::Conflict(m) => ApiError::Conflict(m),
            ServiceError::Db(m) => ApiError::Internal(m),
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(err: AuthError) -> Self {
        match err {
            AuthError::Validation(m) => ApiError::bad_request(m),
            AuthError::Invalid(errs) => errs.into(),
            AuthError::Conflict => ApiError::Conflict("Email already registered".into()),
            AuthError::NotFound => ApiError::NotFound("User not found".into()),
            e @ AuthError::Unauthorized => ApiError::Unauthorized(e.to_string()),
            AuthError::TooManyRequests => {
                ApiError::TooManyRequests("Too many login attempts, please try again later".into())
            }
            e @ (AuthError::HashError(_) | AuthError::Token(_) | AuthError::Repository(_)) => {
                ApiError::Internal(e.to_string())
            }
        }
    }
}

#[derive(Debug, Error)]
pub enum StartupError {
    #[error("invalid configuration: {0}")]
    InvalidConfig(String),
}

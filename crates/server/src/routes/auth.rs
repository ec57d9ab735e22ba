use axum::{extract::State, http::StatusCode, Extension, Json};
use serde::Serialize;
use uuid::Uuid;

use common::types::Message;
use service::auth::domain::{LoginInput, RegisterInput};
use service::auth::errors::AuthError;
use service::auth::Role;

use crate::errors::ApiError;
use crate::extract::JsonBody;
use crate::guard::AuthenticatedUser;
use crate::state::ServerState;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterOutput { pub message: String, pub user_id: Uuid }

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoginOutput { pub message: String, pub access_token: String, pub role: Role }

#[utoipa::path(post, path = "/api/auth/register", tag = "auth", request_body = crate::openapi::CredentialsRequest,
    responses((status = 201, description = "Registered", body = crate::openapi::RegisterResponse), (status = 400, description = "Bad Request"), (status = 409, description = "Conflict")))]
pub async fn register(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<RegisterInput>,
) -> Result<(StatusCode, Json<RegisterOutput>), ApiError> {
    let user = state.auth.register(input).await?;
    Ok((StatusCode::CREATED, Json(RegisterOutput { message: "User registered successfully".into(), user_id: user.id })))
}

#[utoipa::path(post, path = "/api/auth/login", tag = "auth", request_body = crate::openapi::CredentialsRequest,
    responses((status = 200, description = "Logged in", body = crate::openapi::LoginResponse), (status = 401, description = "Invalid credentials"), (status = 429, description = "Too many attempts")))]
pub async fn login(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<LoginInput>,
) -> Result<Json<LoginOutput>, ApiError> {
    if !state.login_limiter.check(&input.email) {
        return Err(AuthError::TooManyRequests.into());
    }
    let session = state.auth.login(input).await?;
    Ok(Json(LoginOutput { message: "Login successful".into(), access_token: session.access_token, role: session.user.role }))
}

#[utoipa::path(post, path = "/api/auth/logout", tag = "auth", security(("bearer" = [])),
    responses((status = 200, description = "Logged out"), (status = 401, description = "Unauthorized")))]
pub async fn logout(
    State(state): State<ServerState>,
    user: Option<Extension<AuthenticatedUser>>,
) -> Result<Json<Message>, ApiError> {
    state.auth.logout(user.map(|Extension(u)| u.user_id)).await?;
    Ok(Json(Message::new("Logout successful")))
}

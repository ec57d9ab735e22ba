use axum::{extract::State, http::StatusCode, Json};

use common::types::Message;
use models::owner;
use service::{cascade, owner_service::{self, CreateOwnerInput, UpdateOwnerInput}};

use crate::errors::ApiError;
use crate::extract::{EntityId, JsonBody};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/owners", tag = "owners", security(("bearer" = [])),
    responses((status = 200, description = "All owners", body = [crate::openapi::OwnerDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<owner::Model>>, ApiError> {
    Ok(Json(owner_service::list_owners(&state.db).await?))
}

#[utoipa::path(post, path = "/api/owners", tag = "owners", security(("bearer" = [])), request_body = crate::openapi::OwnerInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::OwnerDoc), (status = 400, description = "Bad Request")))]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CreateOwnerInput>,
) -> Result<(StatusCode, Json<owner::Model>), ApiError> {
    let created = owner_service::create_owner(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/owners/{id}", tag = "owners", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Owner id")),
    responses((status = 200, description = "Owner", body = crate::openapi::OwnerDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, EntityId(id): EntityId) -> Result<Json<owner::Model>, ApiError> {
    Ok(Json(owner_service::get_owner(&state.db, id).await?))
}

#[utoipa::path(patch, path = "/api/owners/{id}", tag = "owners", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Owner id")),
    request_body = crate::openapi::OwnerInputDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::OwnerDoc), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<UpdateOwnerInput>,
) -> Result<Json<owner::Model>, ApiError> {
    Ok(Json(owner_service::update_owner(&state.db, id, input).await?))
}

/// Removes the owner with every pet and medical record beneath it.
#[utoipa::path(delete, path = "/api/owners/{id}", tag = "owners", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Owner id")),
    responses((status = 200, description = "Deleted with pets and records"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, EntityId(id): EntityId) -> Result<Json<Message>, ApiError> {
    cascade::delete_owner(&state.db, id).await?;
    Ok(Json(Message::new("Owner and associated pets and records deleted successfully")))
}

use axum::{extract::State, http::StatusCode, Json};

use common::types::Message;
use models::veterinarian;
use service::{cascade, veterinarian_service::{self, CreateVeterinarianInput, UpdateVeterinarianInput}};

use crate::errors::ApiError;
use crate::extract::{EntityId, JsonBody};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/veterinarians", tag = "veterinarians", security(("bearer" = [])),
    responses((status = 200, description = "All veterinarians", body = [crate::openapi::VeterinarianDoc])))]
pub async fn list(State(state): State<ServerState>) -> Result<Json<Vec<veterinarian::Model>>, ApiError> {
    Ok(Json(veterinarian_service::list_veterinarians(&state.db).await?))
}

#[utoipa::path(post, path = "/api/veterinarians", tag = "veterinarians", security(("bearer" = [])), request_body = crate::openapi::VeterinarianInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::VeterinarianDoc), (status = 409, description = "License number taken")))]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CreateVeterinarianInput>,
) -> Result<(StatusCode, Json<veterinarian::Model>), ApiError> {
    let created = veterinarian_service::create_veterinarian(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/veterinarians/{id}", tag = "veterinarians", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Veterinarian id")),
    responses((status = 200, description = "Veterinarian", body = crate::openapi::VeterinarianDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, EntityId(id): EntityId) -> Result<Json<veterinarian::Model>, ApiError> {
    Ok(Json(veterinarian_service::get_veterinarian(&state.db, id).await?))
}

#[utoipa::path(patch, path = "/api/veterinarians/{id}", tag = "veterinarians", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Veterinarian id")),
    request_body = crate::openapi::VeterinarianInputDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::VeterinarianDoc), (status = 409, description = "License number taken")))]
pub async fn update(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<UpdateVeterinarianInput>,
) -> Result<Json<veterinarian::Model>, ApiError> {
    Ok(Json(veterinarian_service::update_veterinarian(&state.db, id, input).await?))
}

#[utoipa::path(delete, path = "/api/veterinarians/{id}", tag = "veterinarians", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Veterinarian id")),
    responses((status = 200, description = "Deleted"), (status = 404, description = "Not Found"), (status = 409, description = "Still referenced by medical records")))]
pub async fn delete(State(state): State<ServerState>, EntityId(id): EntityId) -> Result<Json<Message>, ApiError> {
    cascade::delete_veterinarian(&state.db, id).await?;
    Ok(Json(Message::new("Veterinarian deleted successfully")))
}

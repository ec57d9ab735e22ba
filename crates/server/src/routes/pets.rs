use axum::{extract::State, http::StatusCode, Json};

use common::types::Message;
use service::{cascade, pet_service::{self, CreatePetInput, PetDetail, PetFilter, UpdatePetInput}};

use crate::errors::ApiError;
use crate::extract::{EntityId, JsonBody, QueryFilter};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/pets", tag = "pets", security(("bearer" = [])),
    params(("ownerId" = Option<uuid::Uuid>, Query, description = "Only pets of this owner"), ("species" = Option<String>, Query, description = "Exact species")),
    responses((status = 200, description = "Pets with owner expanded", body = [crate::openapi::PetDoc])))]
pub async fn list(
    State(state): State<ServerState>,
    QueryFilter(filter): QueryFilter<PetFilter>,
) -> Result<Json<Vec<PetDetail>>, ApiError> {
    Ok(Json(pet_service::list_pets(&state.db, filter).await?))
}

#[utoipa::path(post, path = "/api/pets", tag = "pets", security(("bearer" = [])), request_body = crate::openapi::PetInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::PetDoc), (status = 404, description = "Owner not found")))]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CreatePetInput>,
) -> Result<(StatusCode, Json<PetDetail>), ApiError> {
    let created = pet_service::create_pet(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/pets/{id}", tag = "pets", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Pet id")),
    responses((status = 200, description = "Pet", body = crate::openapi::PetDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, EntityId(id): EntityId) -> Result<Json<PetDetail>, ApiError> {
    Ok(Json(pet_service::get_pet(&state.db, id).await?))
}

#[utoipa::path(patch, path = "/api/pets/{id}", tag = "pets", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Pet id")),
    request_body = crate::openapi::PetInputDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::PetDoc), (status = 404, description = "Not Found")))]
pub async fn update(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<UpdatePetInput>,
) -> Result<Json<PetDetail>, ApiError> {
    Ok(Json(pet_service::update_pet(&state.db, id, input).await?))
}

#[utoipa::path(delete, path = "/api/pets/{id}", tag = "pets", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Pet id")),
    responses((status = 200, description = "Deleted with records"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, EntityId(id): EntityId) -> Result<Json<Message>, ApiError> {
    cascade::delete_pet(&state.db, id).await?;
    Ok(Json(Message::new("Pet and associated medical records deleted successfully")))
}

use axum::{extract::State, http::StatusCode, Json};

use common::types::Message;
use service::medical_record_service::{
    self, CreateMedicalRecordInput, MedicalRecordDetail, MedicalRecordFilter, UpdateMedicalRecordInput,
};

use crate::errors::ApiError;
use crate::extract::{EntityId, JsonBody, QueryFilter};
use crate::state::ServerState;

#[utoipa::path(get, path = "/api/medical-records", tag = "medical-records", security(("bearer" = [])),
    params(("petId" = Option<uuid::Uuid>, Query, description = "Only records of this pet"), ("veterinarianId" = Option<uuid::Uuid>, Query, description = "Only records by this veterinarian")),
    responses((status = 200, description = "Records with pet and veterinarian expanded", body = [crate::openapi::MedicalRecordDoc])))]
pub async fn list(
    State(state): State<ServerState>,
    QueryFilter(filter): QueryFilter<MedicalRecordFilter>,
) -> Result<Json<Vec<MedicalRecordDetail>>, ApiError> {
    Ok(Json(medical_record_service::list_medical_records(&state.db, filter).await?))
}

#[utoipa::path(post, path = "/api/medical-records", tag = "medical-records", security(("bearer" = [])), request_body = crate::openapi::MedicalRecordInputDoc,
    responses((status = 201, description = "Created", body = crate::openapi::MedicalRecordDoc), (status = 400, description = "Invalid appointment time")))]
pub async fn create(
    State(state): State<ServerState>,
    JsonBody(input): JsonBody<CreateMedicalRecordInput>,
) -> Result<(StatusCode, Json<MedicalRecordDetail>), ApiError> {
    let created = medical_record_service::create_medical_record(&state.db, input).await?;
    Ok((StatusCode::CREATED, Json(created)))
}

#[utoipa::path(get, path = "/api/medical-records/{id}", tag = "medical-records", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Record id")),
    responses((status = 200, description = "Record", body = crate::openapi::MedicalRecordDoc), (status = 404, description = "Not Found")))]
pub async fn get(State(state): State<ServerState>, EntityId(id): EntityId) -> Result<Json<MedicalRecordDetail>, ApiError> {
    Ok(Json(medical_record_service::get_medical_record(&state.db, id).await?))
}

#[utoipa::path(patch, path = "/api/medical-records/{id}", tag = "medical-records", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Record id")),
    request_body = crate::openapi::MedicalRecordInputDoc,
    responses((status = 200, description = "Updated", body = crate::openapi::MedicalRecordDoc), (status = 403, description = "Admin only")))]
pub async fn update(
    State(state): State<ServerState>,
    EntityId(id): EntityId,
    JsonBody(input): JsonBody<UpdateMedicalRecordInput>,
) -> Result<Json<MedicalRecordDetail>, ApiError> {
    Ok(Json(medical_record_service::update_medical_record(&state.db, id, input).await?))
}

#[utoipa::path(delete, path = "/api/medical-records/{id}", tag = "medical-records", security(("bearer" = [])), params(("id" = uuid::Uuid, Path, description = "Record id")),
    responses((status = 200, description = "Deleted"), (status = 403, description = "Admin only"), (status = 404, description = "Not Found")))]
pub async fn delete(State(state): State<ServerState>, EntityId(id): EntityId) -> Result<Json<Message>, ApiError> {
    medical_record_service::delete_medical_record(&state.db, id).await?;
    Ok(Json(Message::new("Medical record deleted successfully")))
}

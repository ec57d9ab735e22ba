pub mod auth;
pub mod medical_records;
pub mod owners;
pub mod pets;
pub mod veterinarians;

use std::path::Path;

use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use tower_http::{
    cors::CorsLayer,
    services::{ServeDir, ServeFile},
    trace::{TraceLayer, DefaultMakeSpan, DefaultOnRequest, DefaultOnResponse, DefaultOnFailure},
};
use tracing::Level;
use utoipa::OpenApi;

use common::types::Health;
use service::auth::Role;

use crate::errors::ApiError;
use crate::guard::{authorize, RouteGuard};
use crate::openapi::ApiDoc;
use crate::state::ServerState;

const ADMIN: &[Role] = &[Role::Admin];
const STAFF: &[Role] = &[Role::Admin, Role::Veterinarian];

#[utoipa::path(get, path = "/api/check", tag = "health", responses((status = 200, description = "Service is up", body = crate::openapi::HealthResponse)))]
pub async fn check() -> Json<Health> {
    Json(Health { status: "OK" })
}

async fn openapi_json() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

async fn api_not_found() -> ApiError {
    ApiError::NotFound("Route not found".into())
}

/// Everything under `/api`, each group behind its own role guard.
pub fn api_router(state: &ServerState) -> Router<ServerState> {
    let guard = |allowed: Option<&'static [Role]>| {
        let g = match allowed {
            Some(roles) => RouteGuard::roles(state.tokens.clone(), roles),
            None => RouteGuard::any_role(state.tokens.clone()),
        };
        middleware::from_fn_with_state(g, authorize)
    };
    let admin = guard(Some(ADMIN));
    let staff = guard(Some(STAFF));

    let auth_routes = Router::new()
        .route("/auth/register", post(auth::register))
        .route("/auth/login", post(auth::login))
        .route("/auth/logout", post(auth::logout).route_layer(guard(None)));

    let owner_routes = Router::new()
        .route("/owners", get(owners::list).post(owners::create))
        .route(
            "/owners/:id",
            get(owners::get).patch(owners::update).put(owners::update).delete(owners::delete),
        )
        .route_layer(admin.clone());

    let pet_routes = Router::new()
        .route("/pets", get(pets::list).post(pets::create))
        .route("/pets/:id", get(pets::get).patch(pets::update).put(pets::update).delete(pets::delete))
        .route_layer(admin.clone());

    let vet_routes = Router::new()
        .route("/veterinarians", get(veterinarians::list).post(veterinarians::create))
        .route(
            "/veterinarians/:id",
            get(veterinarians::get)
                .patch(veterinarians::update)
                .put(veterinarians::update)
                .delete(veterinarians::delete),
        )
        .route_layer(admin.clone());

    // 病历：读与新建对兽医开放，修改与删除仅限管理员
    let record_routes = Router::new()
        .route(
            "/medical-records",
            get(medical_records::list).post(medical_records::create).route_layer(staff.clone()),
        )
        .route(
            "/medical-records/:id",
            get(medical_records::get).route_layer(staff).merge(
                patch(medical_records::update)
                    .put(medical_records::update)
                    .delete(medical_records::delete)
                    .route_layer(admin),
            ),
        );

    Router::new()
        .route("/check", get(check))
        .merge(auth_routes)
        .merge(owner_routes)
        .merge(pet_routes)
        .merge(vet_routes)
        .merge(record_routes)
        .fallback(api_not_found)
}

/// Build the full application: API, OpenAPI document and the SPA bundle.
pub fn build_router(state: ServerState, frontend_dir: &str, cors: CorsLayer) -> Router {
    let index = Path::new(frontend_dir).join("index.html");
    let static_dir = ServeDir::new(frontend_dir).fallback(ServeFile::new(index));

    Router::new()
        .nest("/api", api_router(&state))
        .route("/api-docs/openapi.json", get(openapi_json))
        .fallback_service(static_dir)
        .with_state(state)
        .layer(cors)
        .layer(
            TraceLayer::new_for_http()
                // 每次请求创建 span，包含方法和路径等，日志级别为 INFO
                .make_span_with(
                    DefaultMakeSpan::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_request(DefaultOnRequest::new().level(Level::INFO))
                // 响应返回时打点，包含状态码与耗时
                .on_response(
                    DefaultOnResponse::new()
                        .level(Level::INFO)
                        .include_headers(false),
                )
                .on_failure(DefaultOnFailure::new().level(Level::ERROR)),
        )
}

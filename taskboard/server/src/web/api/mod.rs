use axum::{Json, Router, routing::get};
use utoipa::OpenApi;

use super::AppState;

pub mod v1;

#[derive(OpenApi)]
#[openapi(
    paths(crate::task::api::v1::get_tasks_handler),
    components(schemas(
        crate::task::api::v1::TaskJson,
        crate::task::api::v1::TasksResponse,
        v1::ServerErrorResponse
    )),
    tags((name = "Tasks", description = "Read-only task listing"))
)]
pub struct ApiDoc;

/// Serves the generated OpenAPI document.
#[tracing::instrument]
async fn openapi_handler() -> Json<utoipa::openapi::OpenApi> {
    Json(ApiDoc::openapi())
}

/// Creates the API routes for JSON API endpoints.
pub fn create_api_router(state: AppState) -> Router {
    let api_routes = crate::task::api::v1::create_api_router(state)
        .route("/openapi.json", get(openapi_handler));
    Router::new().nest("/api/v1", api_routes)
}

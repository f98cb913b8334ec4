//! System handlers: landing page, health, OpenAPI.

use crate::api::AppState;
use axum::{
    Json,
    extract::State,
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use serde_json::json;

/// GET / - Landing page
#[utoipa::path(
    get,
    path = "/",
    tag = "system",
    responses(
        (status = 200, description = "Landing page", content_type = "text/html"),
        (status = 500, description = "Landing page missing or unreadable", content_type = "text/plain")
    )
)]
pub async fn index(State(state): State<AppState>) -> Response {
    let path = &state.config.server.index_path;

    match tokio::fs::read_to_string(path).await {
        Ok(html) => (
            StatusCode::OK,
            [(header::CONTENT_TYPE, "text/html; charset=utf-8")],
            html,
        )
            .into_response(),
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!(path = %path.display(), "landing page not found");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                "Erro: Frontend não encontrado.",
            )
                .into_response()
        }
        Err(e) => {
            tracing::error!(path = %path.display(), error = %e, "failed to read landing page");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                format!("Erro interno ao carregar a página: {}", e),
            )
                .into_response()
        }
    }
}

/// GET /health - Health check
#[utoipa::path(
    get,
    path = "/health",
    tag = "system",
    responses(
        (status = 200, description = "Service is up")
    )
)]
pub async fn health_check() -> impl IntoResponse {
    Json(json!({
        "status": "ok",
        "message": "Servidor funcionando"
    }))
}

/// GET /openapi.json - OpenAPI specification
#[utoipa::path(
    get,
    path = "/openapi.json",
    tag = "system",
    responses(
        (status = 200, description = "OpenAPI 3.0 specification in JSON format")
    )
)]
pub async fn openapi_spec() -> impl IntoResponse {
    use crate::api::openapi::ApiDoc;
    use utoipa::OpenApi;

    Json(ApiDoc::openapi())
}

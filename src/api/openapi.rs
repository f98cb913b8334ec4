//! OpenAPI documentation and schema generation
//!
//! Defines the OpenAPI document for the audio-dl HTTP API using utoipa for
//! compile-time spec generation.

use utoipa::OpenApi;

/// OpenAPI documentation for the audio-dl HTTP API
///
/// The document can be accessed via:
/// - `/openapi.json` - JSON format OpenAPI specification
/// - `/swagger-ui` - Interactive Swagger UI documentation (if enabled)
#[derive(OpenApi)]
#[openapi(
    info(
        title = "audio-dl HTTP API",
        version = "0.1.0",
        description = "Convert a video URL into a downloadable MP3 file",
        license(
            name = "MIT OR Apache-2.0"
        )
    ),
    servers(
        (url = "http://localhost:5001", description = "Local server")
    ),
    paths(
        crate::api::routes::download_mp3,
        crate::api::routes::index,
        crate::api::routes::health_check,
        crate::api::routes::openapi_spec,
    ),
    components(
        schemas(
            crate::types::DownloadRequest,
            crate::error::ApiError,
        )
    ),
    tags(
        (name = "download", description = "Video to MP3 conversion"),
        (name = "system", description = "Landing page, health and API documentation")
    )
)]
pub struct ApiDoc;

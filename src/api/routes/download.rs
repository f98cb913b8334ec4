//! The download-and-deliver handler.

use crate::api::AppState;
use crate::api::error_response::error_response;
use crate::delivery::build_attachment;
use crate::error::{Error, Result};
use crate::extract::extract;
use crate::tool::{CapturingLog, ToolLogLevel};
use crate::types::DownloadRequest;
use crate::workspace::Workspace;
use axum::{
    Json,
    extract::{State, rejection::JsonRejection},
    response::{IntoResponse, Response},
};

/// POST /download_mp3 - Convert a video URL to an MP3 attachment
#[utoipa::path(
    post,
    path = "/download_mp3",
    tag = "download",
    request_body = crate::types::DownloadRequest,
    responses(
        (status = 200, description = "The MP3 file as an attachment", content_type = "audio/mpeg"),
        (status = 400, description = "Missing/invalid body or unavailable video", body = crate::error::ApiError),
        (status = 403, description = "Private or age-restricted video", body = crate::error::ApiError),
        (status = 500, description = "Extraction or server failure", body = crate::error::ApiError)
    )
)]
pub async fn download_mp3(
    State(state): State<AppState>,
    payload: std::result::Result<Json<serde_json::Value>, JsonRejection>,
) -> Response {
    let payload = match payload {
        Ok(Json(payload)) => payload,
        Err(rejection) => {
            tracing::warn!(reason = %rejection.body_text(), "download request without JSON body");
            return Error::Validation("Dados JSON não fornecidos.".to_string()).into_response();
        }
    };

    let request = match DownloadRequest::from_json(&payload) {
        Ok(request) => request,
        Err(e) => return error_response(e, state.classifier.as_ref()),
    };

    tracing::info!(url = %request.url, "download requested");

    match deliver(&state, &request.url).await {
        Ok(response) => {
            tracing::info!(url = %request.url, "download delivered");
            response
        }
        Err(e) => error_response(e, state.classifier.as_ref()),
    }
}

/// Run the pipeline inside a fresh workspace and remove it afterwards.
///
/// The response body is fully in memory before the workspace goes away.
async fn deliver(state: &AppState, url: &str) -> Result<Response> {
    let workspace = Workspace::acquire(&state.config.tool.workspace_root())?;
    let log = CapturingLog::new();

    let result = run_in(state, url, &workspace, &log).await;
    if result.is_err() {
        let warnings = log.at_least(ToolLogLevel::Warning);
        if !warnings.is_empty() {
            tracing::warn!(
                url = %url,
                tool_messages = ?warnings,
                "tool diagnostics for failed download"
            );
        }
    }

    workspace.release();
    result
}

async fn run_in(
    state: &AppState,
    url: &str,
    workspace: &Workspace,
    log: &CapturingLog,
) -> Result<Response> {
    let extraction = extract(state.tool.as_ref(), url, workspace.path(), log).await?;

    let file = extraction
        .output_file()
        .ok_or_else(|| Error::ExtractionIncomplete {
            workspace: workspace.path().to_path_buf(),
            extension: crate::types::AUDIO_EXTENSION.to_string(),
            found: Vec::new(),
        })?;
    if extraction.produced_files.len() > 1 {
        tracing::debug!(
            count = extraction.produced_files.len(),
            selected = %file.path.display(),
            "several audio files produced, using the newest"
        );
    }

    build_attachment(file, &extraction.title).await
}

//! Attachment response construction for the produced audio file

use crate::error::{Error, Result};
use crate::filename::{content_disposition, ensure_extension, sanitize_filename};
use crate::types::{AUDIO_EXTENSION, AUDIO_MIME_TYPE, DEFAULT_TITLE, ProducedFile};
use axum::{
    body::Body,
    http::{HeaderValue, StatusCode, header},
    response::Response,
};

/// Filename the caller will see for an item titled `title`
pub fn attachment_filename(title: &str) -> String {
    let sanitized = sanitize_filename(title);
    let stem = if sanitized.is_empty() {
        DEFAULT_TITLE.to_string()
    } else {
        sanitized
    };
    ensure_extension(&stem, AUDIO_EXTENSION)
}

/// Build the download response for `file`.
///
/// The whole file is read into memory before the response is returned, so no
/// partial body is ever sent.
///
/// # Errors
///
/// - [`Error::MissingArtifact`] if the file no longer exists
/// - [`Error::EmptyArtifact`] if it has zero length
pub async fn build_attachment(file: &ProducedFile, title: &str) -> Result<Response> {
    let metadata = match tokio::fs::metadata(&file.path).await {
        Ok(metadata) => metadata,
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            tracing::error!(path = %file.path.display(), "selected audio file not found");
            return Err(Error::MissingArtifact {
                path: file.path.clone(),
            });
        }
        Err(e) => return Err(Error::Io(e)),
    };

    if metadata.len() == 0 {
        tracing::error!(path = %file.path.display(), "selected audio file is empty");
        return Err(Error::EmptyArtifact {
            path: file.path.clone(),
        });
    }

    let bytes = tokio::fs::read(&file.path).await?;
    let filename = attachment_filename(title);

    tracing::info!(
        filename = %filename,
        size = bytes.len(),
        "sending audio file"
    );

    let disposition = HeaderValue::from_str(&content_disposition(&filename))
        .map_err(|e| Error::Other(format!("invalid Content-Disposition header: {}", e)))?;

    let mut response = Response::new(Body::empty());
    *response.status_mut() = StatusCode::OK;
    let headers = response.headers_mut();
    headers.insert(header::CONTENT_TYPE, HeaderValue::from_static(AUDIO_MIME_TYPE));
    headers.insert(header::CONTENT_DISPOSITION, disposition);
    headers.insert(
        header::CACHE_CONTROL,
        HeaderValue::from_static("no-cache, no-store, must-revalidate"),
    );
    headers.insert(header::PRAGMA, HeaderValue::from_static("no-cache"));
    headers.insert(header::EXPIRES, HeaderValue::from_static("0"));
    headers.insert(header::CONTENT_LENGTH, HeaderValue::from(bytes.len()));
    *response.body_mut() = Body::from(bytes);

    Ok(response)
}

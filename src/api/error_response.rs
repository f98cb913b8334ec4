//! HTTP error response handling for the API
//!
//! Converts pipeline errors to HTTP responses with a JSON `{"error": ...}` body.

use crate::classify::ErrorClassifier;
use crate::error::{ApiError, Error, ToHttpStatus};
use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use std::any::Any;

/// Implement IntoResponse for Error to automatically convert errors to HTTP responses
///
/// Extraction errors are rendered unclassified here; handlers that have a
/// classifier use [`error_response`] instead.
impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let status_code =
            StatusCode::from_u16(self.status_code()).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

        let api_error: ApiError = self.into();

        (status_code, Json(api_error)).into_response()
    }
}

/// Implement IntoResponse for ApiError for explicit error responses
impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        (StatusCode::INTERNAL_SERVER_ERROR, Json(self)).into_response()
    }
}

/// Convert a pipeline error into a response, classifying tool failures
pub fn error_response(error: Error, classifier: &dyn ErrorClassifier) -> Response {
    match error {
        Error::Extraction { message } => {
            let classification = classifier.classify(&message);
            tracing::error!(
                status = classification.status.as_u16(),
                tool_error = %message,
                "extraction failed"
            );
            (
                classification.status,
                Json(ApiError::new(classification.message)),
            )
                .into_response()
        }
        other => {
            if other.status_code() >= 500 {
                tracing::error!(code = other.error_code(), error = %other, "request failed");
            } else {
                tracing::warn!(code = other.error_code(), error = %other, "request rejected");
            }
            other.into_response()
        }
    }
}

/// Turn a handler panic into the generic internal-error response
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic".to_string()
    };

    tracing::error!(panic = %detail, "request handler panicked");
    Error::Other(detail).into_response()
}

// unwrap/expect are acceptable in tests for concise failure-on-error assertions
#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use crate::classify::SubstringClassifier;
    use std::path::PathBuf;

    async fn body_json(response: Response) -> ApiError {
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        serde_json::from_slice(&body).unwrap()
    }

    #[tokio::test]
    async fn validation_error_into_response() {
        let response = Error::Validation("URL do vídeo não fornecida.".into()).into_response();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            ApiError::new("URL do vídeo não fornecida.")
        );
    }

    #[tokio::test]
    async fn classified_extraction_error() {
        let error = Error::Extraction {
            message: "ERROR: [youtube] x: This video is unavailable".into(),
        };

        let response = error_response(error, &SubstringClassifier::default());

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            ApiError::new("Vídeo indisponível ou URL incorreta.")
        );
    }

    #[tokio::test]
    async fn artifact_error_is_internal() {
        let error = Error::ExtractionIncomplete {
            workspace: PathBuf::from("/tmp/ws"),
            extension: "mp3".into(),
            found: vec![],
        };

        let response = error_response(error, &SubstringClassifier::default());

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            ApiError::new("Erro interno: Arquivo MP3 não foi gerado.")
        );
    }

    #[tokio::test]
    async fn panic_payload_becomes_internal_error() {
        let response = panic_response(Box::new("kaboom"));

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body.error.starts_with("Erro interno do servidor:"));
        assert!(body.error.contains("kaboom"));
    }
}

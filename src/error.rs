//! Error types for audio-dl
//!
//! This module provides error handling for the download pipeline, including:
//! - The request-level error taxonomy (validation, extraction, artifact, workspace)
//! - HTTP status code mapping for the API
//! - The user-facing (localized) message for every variant

use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use thiserror::Error;
use utoipa::ToSchema;

/// Result type alias for audio-dl operations
pub type Result<T> = std::result::Result<T, Error>;

/// Main error type for audio-dl
///
/// Every failure of the download pipeline ends up as one of these variants and is
/// converted to a JSON error response at the handler boundary.
#[derive(Debug, Error)]
pub enum Error {
    /// The request body was missing, not JSON, or lacked a usable `url`
    #[error("invalid request: {0}")]
    Validation(String),

    /// Configuration error with context about which setting is invalid
    #[error("configuration error: {message}")]
    Config {
        /// Human-readable error message describing the configuration issue
        message: String,
        /// The configuration key that caused the error (e.g., "tool.ytdlp_path")
        key: Option<String>,
    },

    /// The extraction tool ran and reported a failure
    ///
    /// The message is the tool's own error text and is classified by an
    /// [`ErrorClassifier`](crate::classify::ErrorClassifier).
    #[error("extraction failed: {message}")]
    Extraction {
        /// Raw error text emitted by the tool
        message: String,
    },

    /// The tool reported success but left no audio file in the workspace
    #[error("no {extension} file produced in {workspace} (found: {found:?})")]
    ExtractionIncomplete {
        /// Workspace that was scanned
        workspace: PathBuf,
        /// Extension that was looked for
        extension: String,
        /// Names of every entry that was present
        found: Vec<String>,
    },

    /// The selected artifact disappeared before it could be sent
    #[error("artifact not found: {path}")]
    MissingArtifact {
        /// Path of the missing file
        path: PathBuf,
    },

    /// The selected artifact has zero length
    #[error("artifact is empty: {path}")]
    EmptyArtifact {
        /// Path of the empty file
        path: PathBuf,
    },

    /// The request workspace could not be created
    #[error("failed to create workspace under {root}: {source}")]
    Workspace {
        /// Directory the workspace was to be created in
        root: PathBuf,
        /// Underlying filesystem error
        #[source]
        source: std::io::Error,
    },

    /// The external tool could not be executed at all
    #[error("external tool error: {0}")]
    ExternalTool(String),

    /// Operation not supported (missing binary)
    #[error("not supported: {0}")]
    NotSupported(String),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// API server error
    #[error("API server error: {0}")]
    ApiServerError(String),

    /// Other error
    #[error("{0}")]
    Other(String),
}

impl Error {
    /// Message shown to the caller in the `error` field of the JSON body
    ///
    /// Extraction errors render the unclassified form here; the handler routes them
    /// through the configured classifier first.
    pub fn user_message(&self) -> String {
        match self {
            Error::Validation(message) => message.clone(),
            Error::Extraction { message } => format!("Erro ao processar vídeo: {}", message),
            Error::ExtractionIncomplete { .. } => {
                "Erro interno: Arquivo MP3 não foi gerado.".to_string()
            }
            Error::MissingArtifact { .. } => "Erro interno: Arquivo MP3 não encontrado.".to_string(),
            Error::EmptyArtifact { .. } => "Erro interno: Arquivo MP3 está vazio.".to_string(),
            other => format!("Erro interno do servidor: {}", other),
        }
    }
}

/// API error response body
///
/// Every failed request returns this object with a human-readable message.
///
/// # Example JSON Response
///
/// ```json
/// { "error": "Vídeo indisponível ou URL incorreta." }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ApiError {
    /// Human-readable error message, suitable for displaying to end users
    pub error: String,
}

impl ApiError {
    /// Create a new API error body
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            error: message.into(),
        }
    }
}

/// Convert errors to HTTP status codes for API responses
pub trait ToHttpStatus {
    /// Get the HTTP status code for this error
    fn status_code(&self) -> u16;

    /// Get the machine-readable error code
    fn error_code(&self) -> &str;
}

impl ToHttpStatus for Error {
    fn status_code(&self) -> u16 {
        match self {
            // 400 Bad Request - caught before any side effect
            Error::Validation(_) => 400,

            // Unclassified tool failure; the classifier may pick 400/403 instead
            Error::Extraction { .. } => 500,

            // 500 Internal Server Error - server-side faults
            Error::Config { .. } => 500,
            Error::ExtractionIncomplete { .. } => 500,
            Error::MissingArtifact { .. } => 500,
            Error::EmptyArtifact { .. } => 500,
            Error::Workspace { .. } => 500,
            Error::ExternalTool(_) => 500,
            Error::NotSupported(_) => 500,
            Error::Io(_) => 500,
            Error::ApiServerError(_) => 500,
            Error::Other(_) => 500,
        }
    }

    fn error_code(&self) -> &str {
        match self {
            Error::Validation(_) => "validation_error",
            Error::Config { .. } => "config_error",
            Error::Extraction { .. } => "extraction_failed",
            Error::ExtractionIncomplete { .. } => "extraction_incomplete",
            Error::MissingArtifact { .. } => "missing_artifact",
            Error::EmptyArtifact { .. } => "empty_artifact",
            Error::Workspace { .. } => "workspace_error",
            Error::ExternalTool(_) => "external_tool_error",
            Error::NotSupported(_) => "not_supported",
            Error::Io(_) => "io_error",
            Error::ApiServerError(_) => "api_server_error",
            Error::Other(_) => "internal_error",
        }
    }
}

impl From<Error> for ApiError {
    fn from(error: Error) -> Self {
        ApiError::new(error.user_message())
    }
}

//! # audio-dl
//!
//! Small HTTP service that turns a video URL into a downloadable MP3.
//!
//! Each `POST /download_mp3` request gets its own scratch directory; an external
//! extractor (yt-dlp, with ffmpeg for transcoding) writes the audio there, the
//! file is read back and sent as an attachment, and the directory is removed.
//! Tool failures are mapped to localized (Portuguese) messages and HTTP status
//! codes by a configurable classifier.
//!
//! ## Quick Start
//!
//! ```no_run
//! use audio_dl::Config;
//! use std::sync::Arc;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = Config::default();
//!     config.validate()?;
//!
//!     // Serves until SIGTERM/SIGINT
//!     audio_dl::api::start_api_server(Arc::new(config)).await?;
//!
//!     Ok(())
//! }
//! ```
//!
//! ## Embedding with a custom tool
//!
//! The router only depends on the [`tool::MediaTool`] and
//! [`classify::ErrorClassifier`] traits, so either can be swapped:
//!
//! ```no_run
//! use audio_dl::api::{AppState, create_router};
//! use audio_dl::classify::SubstringClassifier;
//! use audio_dl::tool::UnavailableTool;
//! use audio_dl::Config;
//! use std::sync::Arc;
//!
//! let state = AppState::new(
//!     Arc::new(Config::default()),
//!     Arc::new(UnavailableTool),
//!     Arc::new(SubstringClassifier::default()),
//! );
//! let router = create_router(state);
//! # let _ = router;
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]

/// HTTP API module
pub mod api;
/// Tool error classification
pub mod classify;
/// Configuration types
pub mod config;
/// Attachment responses
pub mod delivery;
/// Error types
pub mod error;
/// Extraction invoker
pub mod extract;
/// Filename sanitization
pub mod filename;
/// External media tool adapters
pub mod tool;
/// Core types
pub mod types;
/// Per-request scratch directories
pub mod workspace;

// Re-export commonly used types
pub use classify::{Classification, ClassificationRule, ErrorClassifier, SubstringClassifier};
pub use config::{ClassificationConfig, Config, ServerConfig, ToolConfig};
pub use error::{ApiError, Error, Result, ToHttpStatus};
pub use tool::{MediaTool, UnavailableTool, YtDlpTool};
pub use types::{DownloadRequest, ExtractionResult, ProducedFile};
pub use workspace::Workspace;

/// Wait until the process is asked to stop.
///
/// - **Unix:** listens for SIGTERM and SIGINT, with fallbacks if signal registration fails.
/// - **Windows/other:** listens for Ctrl+C via `tokio::signal::ctrl_c()`.
///
/// Used as the graceful-shutdown trigger of [`api::start_api_server`].
#[cfg(unix)]
pub async fn wait_for_signal() {
    use tokio::signal::unix::{SignalKind, signal};

    // Registration may fail in restricted environments (containers, tests)
    let sigterm_result = signal(SignalKind::terminate());
    let sigint_result = signal(SignalKind::interrupt());

    match (sigterm_result, sigint_result) {
        (Ok(mut sigterm), Ok(mut sigint)) => {
            tokio::select! {
                _ = sigterm.recv() => {
                    tracing::info!("Received SIGTERM, shutting down");
                }
                _ = sigint.recv() => {
                    tracing::info!("Received SIGINT (Ctrl+C), shutting down");
                }
            }
        }
        (Err(e), _) => {
            tracing::warn!(error = %e, "Could not register SIGTERM handler, waiting for SIGINT only");
            if let Ok(mut sigint) = signal(SignalKind::interrupt()) {
                sigint.recv().await;
                tracing::info!("Received SIGINT (Ctrl+C), shutting down");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
        (_, Err(e)) => {
            tracing::warn!(error = %e, "Could not register SIGINT handler, waiting for SIGTERM only");
            if let Ok(mut sigterm) = signal(SignalKind::terminate()) {
                sigterm.recv().await;
                tracing::info!("Received SIGTERM, shutting down");
            } else {
                tracing::error!("Could not register any signal handlers, using ctrl_c fallback");
                tokio::signal::ctrl_c().await.ok();
            }
        }
    }
}

/// Wait until the process is asked to stop (Ctrl+C).
#[cfg(not(unix))]
pub async fn wait_for_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => {
            tracing::info!("Received Ctrl+C, shutting down");
        }
        Err(e) => {
            tracing::error!(error = %e, "Failed to listen for Ctrl+C signal");
        }
    }
}

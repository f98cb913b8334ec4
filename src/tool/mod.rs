//! External media tool handling
//!
//! The download pipeline never talks to `yt-dlp` directly; it goes through the
//! [`MediaTool`] trait, with diagnostics delivered to an injected [`ToolLog`].
//!
//! ## Architecture
//!
//! - [`YtDlpTool`]: runs the external `yt-dlp` binary (which drives ffmpeg)
//! - [`UnavailableTool`]: stub used when no binary is installed
//! - [`CapturingLog`]: `ToolLog` that forwards to `tracing` and keeps the messages
//!
//! ## Usage
//!
//! ```no_run
//! use audio_dl::config::ToolConfig;
//! use audio_dl::tool;
//!
//! let tool = tool::from_config(&ToolConfig::default());
//! println!("using {}", tool.name());
//! ```

mod log;
mod traits;
mod unavailable;
mod ytdlp;

pub use log::{CapturingLog, ToolLogLevel};
pub use traits::{FetchRequest, MediaTool, ToolLog};
pub use unavailable::UnavailableTool;
pub use ytdlp::YtDlpTool;

use crate::config::ToolConfig;
use std::sync::Arc;

/// Build the media tool described by the configuration
///
/// Uses the explicit `ytdlp_path` when set, otherwise searches PATH if allowed.
/// Falls back to [`UnavailableTool`] when nothing is found.
pub fn from_config(config: &ToolConfig) -> Arc<dyn MediaTool> {
    let discovered = match &config.ytdlp_path {
        Some(path) => Some(YtDlpTool::new(path.clone())),
        None if config.search_path => YtDlpTool::from_path(),
        None => None,
    };

    match discovered {
        Some(tool) => {
            let tool = match &config.ffmpeg_path {
                Some(ffmpeg) => tool.with_ffmpeg(ffmpeg.clone()),
                None => tool,
            };
            tracing::info!(binary = %tool.binary_path().display(), "using yt-dlp");
            Arc::new(tool)
        }
        None => {
            tracing::warn!("yt-dlp not found; downloads will fail until it is installed");
            Arc::new(UnavailableTool)
        }
    }
}

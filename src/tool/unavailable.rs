//! Stand-in tool for when no extractor binary is installed

use super::traits::{FetchRequest, MediaTool, ToolLog};
use async_trait::async_trait;

/// Media tool used when `yt-dlp` cannot be found
///
/// Lets the server start (landing page and health check keep working) while every
/// download fails with [`Error::NotSupported`](crate::Error::NotSupported).
#[derive(Debug, Clone, Copy, Default)]
pub struct UnavailableTool;

#[async_trait]
impl MediaTool for UnavailableTool {
    async fn fetch_audio(
        &self,
        _request: &FetchRequest,
        _log: &dyn ToolLog,
    ) -> crate::Result<Option<String>> {
        Err(crate::Error::NotSupported(
            "yt-dlp binary not found; install it or set tool.ytdlp_path".to_string(),
        ))
    }

    fn name(&self) -> &'static str {
        "unavailable"
    }
}

//! Traits and types for the external media tool

use async_trait::async_trait;
use std::path::PathBuf;

/// What the tool is asked to do for one request
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// Media URL as given by the caller
    pub url: String,
    /// Directory the tool writes its output into
    pub output_dir: PathBuf,
    /// Target audio codec / file extension (e.g. "mp3")
    pub audio_format: &'static str,
    /// Target bitrate in kbps
    pub bitrate_kbps: u32,
}

/// Receiver for the tool's diagnostic output
///
/// Injected into [`MediaTool::fetch_audio`] so the tool does not decide where its
/// messages end up.
pub trait ToolLog: Send + Sync {
    /// Verbose progress and informational output
    fn debug(&self, message: &str);
    /// Non-fatal problems reported by the tool
    fn warning(&self, message: &str);
    /// Fatal problems reported by the tool
    fn error(&self, message: &str);
}

/// External extraction/transcoding engine
///
/// Implementations download the media behind a URL, convert it to the requested
/// audio format and leave the result in [`FetchRequest::output_dir`].
///
/// # Examples
///
/// ```no_run
/// use audio_dl::tool::{CapturingLog, FetchRequest, MediaTool, YtDlpTool};
///
/// # #[tokio::main]
/// # async fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let tool = YtDlpTool::from_path().expect("yt-dlp not found in PATH");
/// let log = CapturingLog::new();
/// let request = FetchRequest {
///     url: "https://www.youtube.com/watch?v=dQw4w9WgXcQ".to_string(),
///     output_dir: std::env::temp_dir(),
///     audio_format: "mp3",
///     bitrate_kbps: 192,
/// };
///
/// let title = tool.fetch_audio(&request, &log).await?;
/// println!("downloaded {:?}", title);
/// # Ok(())
/// # }
/// ```
#[async_trait]
pub trait MediaTool: Send + Sync {
    /// Download and transcode a single media item
    ///
    /// # Returns
    ///
    /// The title the tool reported for the item, if any.
    ///
    /// # Errors
    ///
    /// - [`Error::Extraction`](crate::Error::Extraction) when the tool ran and
    ///   reported a failure; the message is the tool's own text
    /// - [`Error::ExternalTool`](crate::Error::ExternalTool) when the tool could
    ///   not be executed
    /// - [`Error::NotSupported`](crate::Error::NotSupported) when no tool is
    ///   available
    async fn fetch_audio(
        &self,
        request: &FetchRequest,
        log: &dyn ToolLog,
    ) -> crate::Result<Option<String>>;

    /// Human-readable name for logging
    fn name(&self) -> &'static str;
}

//! `yt-dlp` backed media tool

use super::log::dispatch_line;
use super::traits::{FetchRequest, MediaTool, ToolLog};
use async_trait::async_trait;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use tokio::io::{AsyncBufReadExt, AsyncReadExt, BufReader};
use tokio::process::Command;

/// Output template, relative to the request workspace
const OUTPUT_TEMPLATE: &str = "%(title)s.%(ext)s";

/// Placeholder yt-dlp prints for fields it does not know
const MISSING_FIELD: &str = "NA";

/// Media tool that runs the external `yt-dlp` binary
///
/// `yt-dlp` picks the best audio stream, hands it to ffmpeg for transcoding and
/// prints the item title once the final file is in place.
///
/// # Examples
///
/// ```no_run
/// use audio_dl::tool::YtDlpTool;
/// use std::path::PathBuf;
///
/// // Explicit binary
/// let tool = YtDlpTool::new(PathBuf::from("/usr/local/bin/yt-dlp"));
///
/// // Or auto-discover from PATH
/// let tool = YtDlpTool::from_path().expect("yt-dlp not found in PATH");
/// ```
#[derive(Debug, Clone)]
pub struct YtDlpTool {
    binary_path: PathBuf,
    ffmpeg_path: Option<PathBuf>,
}

impl YtDlpTool {
    /// Create a tool with an explicit binary path
    pub fn new(binary_path: PathBuf) -> Self {
        Self {
            binary_path,
            ffmpeg_path: None,
        }
    }

    /// Attempt to find `yt-dlp` in PATH
    ///
    /// # Returns
    ///
    /// `Some(YtDlpTool)` if the binary is found, `None` otherwise.
    pub fn from_path() -> Option<Self> {
        which::which("yt-dlp").ok().map(Self::new)
    }

    /// Pass an explicit ffmpeg location to yt-dlp
    pub fn with_ffmpeg(mut self, ffmpeg_path: PathBuf) -> Self {
        self.ffmpeg_path = Some(ffmpeg_path);
        self
    }

    /// Path of the binary this tool runs
    pub fn binary_path(&self) -> &Path {
        &self.binary_path
    }

    fn args(&self, request: &FetchRequest) -> Vec<OsString> {
        let mut args: Vec<OsString> = vec![
            "--ignore-config".into(),
            "-f".into(),
            "bestaudio/best".into(),
            "--extract-audio".into(),
            "--audio-format".into(),
            request.audio_format.into(),
            "--audio-quality".into(),
            format!("{}K", request.bitrate_kbps).into(),
            "--no-playlist".into(),
            "--no-progress".into(),
            "--no-simulate".into(),
            "--print".into(),
            "after_move:title".into(),
            "-o".into(),
            request.output_dir.join(OUTPUT_TEMPLATE).into_os_string(),
        ];

        if let Some(ffmpeg) = &self.ffmpeg_path {
            args.push("--ffmpeg-location".into());
            args.push(ffmpeg.clone().into_os_string());
        }

        // Keep the URL from ever being parsed as an option
        args.push("--".into());
        args.push(request.url.clone().into());
        args
    }
}

#[async_trait]
impl MediaTool for YtDlpTool {
    async fn fetch_audio(
        &self,
        request: &FetchRequest,
        log: &dyn ToolLog,
    ) -> crate::Result<Option<String>> {
        tracing::debug!(
            binary = %self.binary_path.display(),
            url = %request.url,
            output_dir = %request.output_dir.display(),
            "running yt-dlp"
        );

        let mut child = Command::new(&self.binary_path)
            .args(self.args(request))
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| crate::Error::ExternalTool(format!("Failed to execute yt-dlp: {}", e)))?;

        let stdout = child.stdout.take();
        let stderr = child.stderr.take();

        let read_stdout = async move {
            let mut buf = Vec::new();
            if let Some(mut out) = stdout {
                out.read_to_end(&mut buf).await?;
            }
            Ok::<_, std::io::Error>(String::from_utf8_lossy(&buf).into_owned())
        };

        let read_stderr = async move {
            let mut seen = Vec::new();
            if let Some(err) = stderr {
                let mut lines = BufReader::new(err).lines();
                while let Some(line) = lines.next_line().await? {
                    dispatch_line(log, &line);
                    seen.push(line);
                }
            }
            Ok::<_, std::io::Error>(seen)
        };

        let (stdout, stderr, status) = tokio::join!(read_stdout, read_stderr, child.wait());
        let status = status
            .map_err(|e| crate::Error::ExternalTool(format!("Failed to wait for yt-dlp: {}", e)))?;
        let stdout = stdout?;
        let stderr = stderr?;

        if !status.success() {
            return Err(crate::Error::Extraction {
                message: failure_message(&stderr, status),
            });
        }

        Ok(parse_title(&stdout))
    }

    fn name(&self) -> &'static str {
        "yt-dlp"
    }
}

/// Extract the reported title from yt-dlp's stdout
fn parse_title(stdout: &str) -> Option<String> {
    stdout
        .lines()
        .map(str::trim)
        .rfind(|line| !line.is_empty())
        .filter(|line| *line != MISSING_FIELD)
        .map(str::to_string)
}

/// Build the error text for a failed run: the tool's `ERROR:` lines when present
fn failure_message(stderr: &[String], status: std::process::ExitStatus) -> String {
    let errors: Vec<&str> = stderr
        .iter()
        .map(|line| line.trim())
        .filter(|line| line.starts_with("ERROR:"))
        .collect();
    if !errors.is_empty() {
        return errors.join("\n");
    }

    let all: Vec<&str> = stderr
        .iter()
        .map(|line| line.trim())
        .filter(|line| !line.is_empty())
        .collect();
    if !all.is_empty() {
        return all.join("\n");
    }

    format!("yt-dlp exited with {}", status)
}

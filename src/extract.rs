//! Extraction invoker: run the media tool against one URL and find what it produced

use crate::error::{Error, Result};
use crate::tool::{FetchRequest, MediaTool, ToolLog};
use crate::types::{
    AUDIO_BITRATE_KBPS, AUDIO_EXTENSION, DEFAULT_TITLE, ExtractionResult, ProducedFile,
};
use std::path::Path;
use std::time::SystemTime;

/// Run `tool` for `url` with `workspace` as output directory.
///
/// On success the workspace is scanned (one level, files only) for audio files;
/// matches are returned newest first.
///
/// # Errors
///
/// - Whatever the tool reports ([`Error::Extraction`], [`Error::ExternalTool`], ...)
/// - [`Error::ExtractionIncomplete`] if the tool succeeded but left no audio file
pub async fn extract(
    tool: &dyn MediaTool,
    url: &str,
    workspace: &Path,
    log: &dyn ToolLog,
) -> Result<ExtractionResult> {
    let request = FetchRequest {
        url: url.to_string(),
        output_dir: workspace.to_path_buf(),
        audio_format: AUDIO_EXTENSION,
        bitrate_kbps: AUDIO_BITRATE_KBPS,
    };

    tracing::info!(tool = tool.name(), url = %url, "starting extraction");
    let reported_title = tool.fetch_audio(&request, log).await?;
    let title = reported_title.unwrap_or_else(|| DEFAULT_TITLE.to_string());
    tracing::info!(title = %title, "extraction finished");

    let produced_files = find_audio_files(workspace, AUDIO_EXTENSION).await?;
    if produced_files.is_empty() {
        let found = list_entries(workspace).await?;
        tracing::error!(
            workspace = %workspace.display(),
            found = ?found,
            "no {} file produced",
            AUDIO_EXTENSION
        );
        return Err(Error::ExtractionIncomplete {
            workspace: workspace.to_path_buf(),
            extension: AUDIO_EXTENSION.to_string(),
            found,
        });
    }

    Ok(ExtractionResult {
        title,
        produced_files,
    })
}

/// Files directly inside `dir` whose extension matches `extension`
/// (case-insensitive), most recently modified first.
pub async fn find_audio_files(dir: &Path, extension: &str) -> Result<Vec<ProducedFile>> {
    let mut matches = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;

    while let Some(entry) = entries.next_entry().await? {
        let path = entry.path();
        let extension_matches = path
            .extension()
            .and_then(|e| e.to_str())
            .is_some_and(|e| e.eq_ignore_ascii_case(extension));
        if !extension_matches {
            continue;
        }

        let metadata = entry.metadata().await?;
        if !metadata.is_file() {
            continue;
        }

        matches.push(ProducedFile {
            path,
            modified: metadata.modified().unwrap_or(SystemTime::UNIX_EPOCH),
        });
    }

    matches.sort_by(|a, b| b.modified.cmp(&a.modified));
    Ok(matches)
}

/// Names of everything in `dir`, for diagnostics
async fn list_entries(dir: &Path) -> Result<Vec<String>> {
    let mut names = Vec::new();
    let mut entries = tokio::fs::read_dir(dir).await?;
    while let Some(entry) = entries.next_entry().await? {
        names.push(entry.file_name().to_string_lossy().into_owned());
    }
    names.sort();
    Ok(names)
}

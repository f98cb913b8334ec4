//! Core request and extraction types

use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::time::SystemTime;
use utoipa::ToSchema;

/// Extension of the audio artifact the tool is asked to produce
pub const AUDIO_EXTENSION: &str = "mp3";

/// MIME type sent with the audio artifact
pub const AUDIO_MIME_TYPE: &str = "audio/mpeg";

/// Target bitrate handed to the transcoder, in kbps
pub const AUDIO_BITRATE_KBPS: u32 = 192;

/// Title used when the tool does not report one
pub const DEFAULT_TITLE: &str = "audio_youtube";

/// Body of `POST /download_mp3`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DownloadRequest {
    /// URL of the video to convert
    #[schema(example = "https://www.youtube.com/watch?v=dQw4w9WgXcQ")]
    pub url: String,
}

impl DownloadRequest {
    /// Validate a parsed JSON body
    ///
    /// A body that is not an object (or an empty object) counts as "no data";
    /// an object whose `url` is absent, not a string, or blank counts as "no URL".
    pub fn from_json(payload: &serde_json::Value) -> Result<Self> {
        let object = match payload.as_object() {
            Some(object) if !object.is_empty() => object,
            _ => return Err(Error::Validation("Dados JSON não fornecidos.".to_string())),
        };

        match object.get("url").and_then(|v| v.as_str()).map(str::trim) {
            Some(url) if !url.is_empty() => Ok(Self {
                url: url.to_string(),
            }),
            _ => Err(Error::Validation("URL do vídeo não fornecida.".to_string())),
        }
    }
}

/// A matching file found in the workspace after the tool finished
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProducedFile {
    /// Absolute path of the file
    pub path: PathBuf,
    /// Last modification time, used to pick between several matches
    pub modified: SystemTime,
}

/// Outcome of a successful extraction
#[derive(Debug, Clone)]
pub struct ExtractionResult {
    /// Title reported by the tool (or [`DEFAULT_TITLE`])
    pub title: String,
    /// Matching files, most recently modified first; never empty
    pub produced_files: Vec<ProducedFile>,
}

impl ExtractionResult {
    /// The file to deliver: the most recently modified match
    pub fn output_file(&self) -> Option<&ProducedFile> {
        self.produced_files.first()
    }
}

#[allow(clippy::unwrap_used, clippy::expect_used)]
#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::time::Duration;

    fn validation_message(result: Result<DownloadRequest>) -> String {
        match result {
            Err(Error::Validation(message)) => message,
            other => panic!("expected validation error, got {:?}", other),
        }
    }

    #[test]
    fn accepts_object_with_url() {
        let request = DownloadRequest::from_json(&json!({"url": "https://example.com/ok"})).unwrap();
        assert_eq!(request.url, "https://example.com/ok");
    }

    #[test]
    fn trims_surrounding_whitespace_from_url() {
        let request = DownloadRequest::from_json(&json!({"url": "  https://example.com/ok \n"})).unwrap();
        assert_eq!(request.url, "https://example.com/ok");
    }

    #[test]
    fn non_object_bodies_are_missing_data() {
        for body in [json!(null), json!([]), json!("url"), json!(42), json!({})] {
            assert_eq!(
                validation_message(DownloadRequest::from_json(&body)),
                "Dados JSON não fornecidos.",
                "body {} should be rejected as missing data",
                body
            );
        }
    }

    #[test]
    fn missing_blank_or_non_string_url_is_missing_url() {
        for body in [
            json!({"link": "https://example.com"}),
            json!({"url": ""}),
            json!({"url": "   "}),
            json!({"url": null}),
            json!({"url": 7}),
        ] {
            assert_eq!(
                validation_message(DownloadRequest::from_json(&body)),
                "URL do vídeo não fornecida.",
                "body {} should be rejected as missing url",
                body
            );
        }
    }

    #[test]
    fn output_file_is_first_entry() {
        let newer = ProducedFile {
            path: PathBuf::from("/ws/new.mp3"),
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(20),
        };
        let older = ProducedFile {
            path: PathBuf::from("/ws/old.mp3"),
            modified: SystemTime::UNIX_EPOCH + Duration::from_secs(10),
        };
        let result = ExtractionResult {
            title: "t".into(),
            produced_files: vec![newer.clone(), older],
        };
        assert_eq!(result.output_file(), Some(&newer));
    }
}

//! Configuration types for audio-dl

use crate::classify::{ClassificationRule, default_rules};
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};
use std::{net::SocketAddr, path::Path, path::PathBuf};
use utoipa::ToSchema;

/// HTTP server settings
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ServerConfig {
    /// Address to bind to (default: 0.0.0.0:5001)
    #[serde(default = "default_bind_address")]
    #[schema(value_type = String)]
    pub bind_address: SocketAddr,

    /// Landing page served at `/` (default: "static/index.html")
    #[serde(default = "default_index_path")]
    #[schema(value_type = String)]
    pub index_path: PathBuf,

    /// Enable CORS for browser access from other origins (default: false)
    #[serde(default)]
    pub cors_enabled: bool,

    /// Allowed CORS origins (default: ["*"])
    #[serde(default = "default_cors_origins")]
    pub cors_origins: Vec<String>,

    /// Enable Swagger UI at /swagger-ui (default: true)
    #[serde(default = "default_true")]
    pub swagger_ui: bool,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            bind_address: default_bind_address(),
            index_path: default_index_path(),
            cors_enabled: false,
            cors_origins: default_cors_origins(),
            swagger_ui: true,
        }
    }
}

/// External tool paths and scratch space
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ToolConfig {
    /// Path to the yt-dlp executable (auto-detected if None)
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub ytdlp_path: Option<PathBuf>,

    /// Path to ffmpeg (binary or directory), passed to yt-dlp when set
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub ffmpeg_path: Option<PathBuf>,

    /// Whether to search PATH for yt-dlp if no explicit path is set (default: true)
    #[serde(default = "default_true")]
    pub search_path: bool,

    /// Directory request workspaces are created in (default: the OS temp dir)
    #[serde(default)]
    #[schema(value_type = Option<String>)]
    pub workspace_root: Option<PathBuf>,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            ytdlp_path: None,
            ffmpeg_path: None,
            search_path: true,
            workspace_root: None,
        }
    }
}

impl ToolConfig {
    /// Directory request workspaces are created in
    pub fn workspace_root(&self) -> PathBuf {
        self.workspace_root
            .clone()
            .unwrap_or_else(std::env::temp_dir)
    }
}

/// Error classification table
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct ClassificationConfig {
    /// Ordered substring rules; the first match wins
    #[serde(default = "default_rules")]
    pub rules: Vec<ClassificationRule>,
}

impl Default for ClassificationConfig {
    fn default() -> Self {
        Self {
            rules: default_rules(),
        }
    }
}

/// Main configuration for the audio-dl server
///
/// Every field has a default, so an empty TOML file (or no file at all) gives a
/// working server on `0.0.0.0:5001`.
///
/// ```toml
/// [server]
/// bind_address = "127.0.0.1:8080"
///
/// [tool]
/// ytdlp_path = "/usr/local/bin/yt-dlp"
///
/// [[classification.rules]]
/// pattern = "This video is unavailable"
/// status = 400
/// message = "Vídeo indisponível ou URL incorreta."
/// ```
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct Config {
    /// HTTP server settings
    #[serde(default)]
    pub server: ServerConfig,

    /// External tool settings
    #[serde(default)]
    pub tool: ToolConfig,

    /// Error classification table
    #[serde(default)]
    pub classification: ClassificationConfig,
}

impl Config {
    /// Parse a configuration from TOML text
    pub fn from_toml_str(text: &str) -> Result<Self> {
        toml::from_str(text).map_err(|e| Error::Config {
            message: e.to_string(),
            key: None,
        })
    }

    /// Load and validate a configuration file
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path).map_err(|e| Error::Config {
            message: format!("cannot read {}: {}", path.display(), e),
            key: None,
        })?;
        let config = Self::from_toml_str(&text)?;
        config.validate()?;
        Ok(config)
    }

    /// Check settings that serde cannot
    pub fn validate(&self) -> Result<()> {
        if let Some(path) = &self.tool.ytdlp_path
            && !path.exists()
        {
            return Err(Error::Config {
                message: format!("yt-dlp not found at {}", path.display()),
                key: Some("tool.ytdlp_path".to_string()),
            });
        }

        if let Some(root) = &self.tool.workspace_root
            && !root.is_dir()
        {
            return Err(Error::Config {
                message: format!("workspace root {} is not a directory", root.display()),
                key: Some("tool.workspace_root".to_string()),
            });
        }

        if self
            .classification
            .rules
            .iter()
            .any(|rule| rule.pattern.is_empty())
        {
            return Err(Error::Config {
                message: "classification rule with empty pattern would match every error"
                    .to_string(),
                key: Some("classification.rules".to_string()),
            });
        }

        Ok(())
    }
}

fn default_bind_address() -> SocketAddr {
    SocketAddr::from(([0, 0, 0, 0], 5001))
}

fn default_index_path() -> PathBuf {
    PathBuf::from("static/index.html")
}

fn default_cors_origins() -> Vec<String> {
    vec!["*".to_string()]
}

fn default_true() -> bool {
    true
}

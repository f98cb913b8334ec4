//! Common test utilities for audio-dl integration tests

#![allow(dead_code)]

use async_trait::async_trait;
use audio_dl::api::{AppState, create_router};
use audio_dl::classify::{ErrorClassifier, SubstringClassifier};
use audio_dl::tool::{FetchRequest, MediaTool, ToolLog};
use audio_dl::{Config, Error, Result};
use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response};
use std::sync::{Arc, Mutex};
use std::sync::atomic::{AtomicUsize, Ordering};
use tempfile::TempDir;
use tower::ServiceExt;

/// Outcome a [`ScriptedTool`] produces on every call
#[derive(Clone, Debug)]
pub enum Script {
    /// Write `data` to `file_name` in the workspace and report `title`
    Produce {
        file_name: String,
        data: Vec<u8>,
        title: Option<String>,
    },
    /// Fail with this tool error text
    Fail(String),
}

/// In-process `MediaTool` that follows a [`Script`]
pub struct ScriptedTool {
    script: Script,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

impl ScriptedTool {
    pub fn new(script: Script) -> Arc<Self> {
        Arc::new(Self {
            script,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        })
    }

    pub fn producing(file_name: &str, data: &[u8], title: &str) -> Arc<Self> {
        Self::new(Script::Produce {
            file_name: file_name.to_string(),
            data: data.to_vec(),
            title: Some(title.to_string()),
        })
    }

    pub fn failing(message: &str) -> Arc<Self> {
        Self::new(Script::Fail(message.to_string()))
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    /// URLs the tool was asked to fetch, in call order
    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl MediaTool for ScriptedTool {
    async fn fetch_audio(&self, request: &FetchRequest, log: &dyn ToolLog) -> Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(request.url.clone());
        match &self.script {
            Script::Produce {
                file_name,
                data,
                title,
            } => {
                tokio::fs::write(request.output_dir.join(file_name), data).await?;
                Ok(title.clone())
            }
            Script::Fail(message) => {
                log.error(message);
                Err(Error::Extraction {
                    message: message.clone(),
                })
            }
        }
    }

    fn name(&self) -> &'static str {
        "scripted"
    }
}

/// A router plus the temp directory its workspaces are created in
pub struct Harness {
    pub router: Router,
    pub workspace_root: TempDir,
}

impl Harness {
    /// Router over `tool`, classifying failures with the rules in `config`
    pub fn with_config(mut config: Config, tool: Arc<dyn MediaTool>) -> Self {
        let workspace_root = tempfile::tempdir().unwrap();
        config.tool.workspace_root = Some(workspace_root.path().to_path_buf());
        config.server.swagger_ui = false;

        let classifier: Arc<dyn ErrorClassifier> = Arc::new(SubstringClassifier::new(
            config.classification.rules.clone(),
        ));
        let state = AppState::new(Arc::new(config), tool, classifier);

        Self {
            router: create_router(state),
            workspace_root,
        }
    }

    pub fn new(tool: Arc<dyn MediaTool>) -> Self {
        Self::with_config(Config::default(), tool)
    }

    /// Router built from the configuration alone, as the binary does it
    pub fn from_config(mut config: Config) -> Self {
        let workspace_root = tempfile::tempdir().unwrap();
        config.tool.workspace_root = Some(workspace_root.path().to_path_buf());
        config.server.swagger_ui = false;

        Self {
            router: create_router(AppState::from_config(Arc::new(config))),
            workspace_root,
        }
    }

    pub async fn download(&self, url: &str) -> Response<Body> {
        let body = serde_json::json!({ "url": url }).to_string();
        self.router
            .clone()
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/download_mp3")
                    .header("content-type", "application/json")
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap()
    }

    pub fn workspace_entries(&self) -> usize {
        std::fs::read_dir(self.workspace_root.path())
            .unwrap()
            .count()
    }
}

pub async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

pub async fn error_message(response: Response<Body>) -> String {
    let json: serde_json::Value = serde_json::from_slice(&body_bytes(response).await).unwrap();
    json["error"].as_str().unwrap().to_string()
}

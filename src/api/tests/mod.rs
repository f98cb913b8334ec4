use super::*;
use crate::Config;
use crate::classify::SubstringClassifier;
use crate::error::ApiError;
use crate::tool::{FetchRequest, MediaTool, ToolLog};
use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Request, Response, StatusCode};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::time::{Duration, SystemTime};
use tempfile::TempDir;
use tower::ServiceExt;


/// What the fake tool does when invoked
enum Behavior {
    /// Write files (name, contents, age in seconds) and report a title
    Write {
        files: Vec<(&'static str, Vec<u8>, u64)>,
        title: Option<&'static str>,
    },
    /// Report a tool failure with this message
    Fail(&'static str),
    /// Write a file, then panic
    Panic,
}

/// MediaTool stand-in that records every workspace it was handed
struct FakeTool {
    behavior: Behavior,
    calls: AtomicUsize,
    workspaces: Mutex<Vec<PathBuf>>,
}

impl FakeTool {
    fn new(behavior: Behavior) -> Arc<Self> {
        Arc::new(Self {
            behavior,
            calls: AtomicUsize::new(0),
            workspaces: Mutex::new(Vec::new()),
        })
    }

    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    fn workspaces(&self) -> Vec<PathBuf> {
        self.workspaces.lock().unwrap().clone()
    }
}

fn write_aged(path: &Path, data: &[u8], age_secs: u64) {
    std::fs::write(path, data).unwrap();
    let file = std::fs::File::options().write(true).open(path).unwrap();
    file.set_modified(SystemTime::now() - Duration::from_secs(age_secs))
        .unwrap();
}

#[async_trait]
impl MediaTool for FakeTool {
    async fn fetch_audio(
        &self,
        request: &FetchRequest,
        log: &dyn ToolLog,
    ) -> crate::Result<Option<String>> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.workspaces
            .lock()
            .unwrap()
            .push(request.output_dir.clone());

        match &self.behavior {
            Behavior::Write { files, title } => {
                log.debug("[fake] extracting");
                for (name, data, age) in files {
                    write_aged(&request.output_dir.join(name), data, *age);
                }
                Ok(title.map(str::to_string))
            }
            Behavior::Fail(message) => {
                log.warning("WARNING: [fake] something odd");
                log.error(message);
                Err(crate::Error::Extraction {
                    message: message.to_string(),
                })
            }
            Behavior::Panic => {
                std::fs::write(request.output_dir.join("partial.mp3"), b"x").unwrap();
                panic!("fake tool exploded");
            }
        }
    }

    fn name(&self) -> &'static str {
        "fake"
    }
}

/// Router wired to `tool`, with workspaces created under a private temp root
struct TestApp {
    router: Router,
    workspace_root: TempDir,
    _static_dir: TempDir,
}

impl TestApp {
    fn new(tool: Arc<FakeTool>) -> Self {
        let workspace_root = tempfile::tempdir().unwrap();
        let static_dir = tempfile::tempdir().unwrap();
        let index = static_dir.path().join("index.html");
        std::fs::write(&index, "<html><body>audio-dl</body></html>").unwrap();

        let mut config = Config::default();
        config.tool.workspace_root = Some(workspace_root.path().to_path_buf());
        config.server.index_path = index;
        config.server.swagger_ui = false;

        Self::with_config(config, tool, workspace_root, static_dir)
    }

    fn with_config(
        config: Config,
        tool: Arc<FakeTool>,
        workspace_root: TempDir,
        static_dir: TempDir,
    ) -> Self {
        let state = AppState::new(
            Arc::new(config),
            tool,
            Arc::new(SubstringClassifier::default()),
        );

        Self {
            router: create_router(state),
            workspace_root,
            _static_dir: static_dir,
        }
    }

    async fn send(&self, request: Request<Body>) -> Response<Body> {
        self.router.clone().oneshot(request).await.unwrap()
    }

    async fn post_download(&self, body: &str) -> Response<Body> {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/download_mp3")
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
    }

    async fn get(&self, uri: &str) -> Response<Body> {
        self.send(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
    }

    /// Number of entries left under the workspace root
    fn leftover_workspaces(&self) -> usize {
        std::fs::read_dir(self.workspace_root.path()).unwrap().count()
    }
}

async fn body_bytes(response: Response<Body>) -> Vec<u8> {
    axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap()
        .to_vec()
}

async fn body_error(response: Response<Body>) -> String {
    let api_error: ApiError = serde_json::from_slice(&body_bytes(response).await).unwrap();
    api_error.error
}

#[tokio::test]
async fn test_api_server_spawns() {
    let mut config = Config::default();
    config.server.bind_address = "127.0.0.1:0".parse().unwrap(); // Port 0 = OS assigns a free port
    config.tool.search_path = false;
    let config = Arc::new(config);

    let api_handle = tokio::spawn(start_api_server(config));

    tokio::time::sleep(Duration::from_millis(100)).await;
    assert!(!api_handle.is_finished(), "server should still be running");

    api_handle.abort();
}

#[tokio::test]
async fn test_cors_enabled() {
    let workspace_root = tempfile::tempdir().unwrap();
    let static_dir = tempfile::tempdir().unwrap();
    let mut config = Config::default();
    config.server.cors_enabled = true;
    config.server.cors_origins = vec!["*".to_string()];
    config.tool.workspace_root = Some(workspace_root.path().to_path_buf());

    let app = TestApp::with_config(
        config,
        FakeTool::new(Behavior::Fail("unused")),
        workspace_root,
        static_dir,
    );

    let response = app
        .send(
            Request::builder()
                .uri("/health")
                .header("Origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        response
            .headers()
            .contains_key("access-control-allow-origin"),
        "CORS header should be present when CORS is enabled"
    );
}

#[tokio::test]
async fn test_cors_disabled_by_default() {
    let app = TestApp::new(FakeTool::new(Behavior::Fail("unused")));

    let response = app
        .send(
            Request::builder()
                .uri("/health")
                .header("Origin", "http://localhost:3000")
                .body(Body::empty())
                .unwrap(),
        )
        .await;

    assert_eq!(response.status(), StatusCode::OK);
    assert!(
        !response
            .headers()
            .contains_key("access-control-allow-origin")
    );
}

#[test]
fn test_build_cors_layer_with_specific_origins() {
    // Only checks that building with explicit origins does not panic
    let _layer = build_cors_layer(&[
        "http://localhost:3000".to_string(),
        "not a header value \n".to_string(),
    ]);
}

//! Request-scoped scratch directories
//!
//! A [`Workspace`] is created at the start of a download request and removed when
//! the request ends, whichever way it ends. Removal failures are logged and never
//! change the response that is already on its way out.

use crate::error::{Error, Result};
use std::path::{Path, PathBuf};
use tempfile::TempDir;

/// Prefix of every workspace directory name
const WORKSPACE_PREFIX: &str = "audio-dl-";

/// A uniquely named, initially empty directory owned by one request
///
/// Release happens exactly once: either through [`Workspace::release`] or, if the
/// guard is dropped first (early return, error propagation, cancelled future),
/// from `Drop`.
#[derive(Debug)]
pub struct Workspace {
    dir: Option<TempDir>,
    path: PathBuf,
}

impl Workspace {
    /// Create a fresh workspace under `root`
    ///
    /// # Errors
    ///
    /// Returns [`Error::Workspace`] if the directory cannot be created
    /// (missing root, permissions, disk full).
    pub fn acquire(root: &Path) -> Result<Self> {
        let dir = tempfile::Builder::new()
            .prefix(WORKSPACE_PREFIX)
            .tempdir_in(root)
            .map_err(|source| Error::Workspace {
                root: root.to_path_buf(),
                source,
            })?;
        let path = dir.path().to_path_buf();

        tracing::debug!(workspace = %path.display(), "workspace created");

        Ok(Self {
            dir: Some(dir),
            path,
        })
    }

    /// Directory path of this workspace
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Remove the workspace and everything in it
    pub fn release(mut self) {
        self.remove();
    }

    fn remove(&mut self) {
        let Some(dir) = self.dir.take() else {
            return;
        };

        match dir.close() {
            Ok(()) => tracing::info!(workspace = %self.path.display(), "workspace removed"),
            Err(e) => tracing::error!(
                workspace = %self.path.display(),
                error = %e,
                "failed to remove workspace"
            ),
        }
    }
}

impl Drop for Workspace {
    fn drop(&mut self) {
        self.remove();
    }
}

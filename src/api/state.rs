//! Application state for the API server

use crate::Config;
use crate::classify::{ErrorClassifier, SubstringClassifier};
use crate::tool::{self, MediaTool};
use std::sync::Arc;

/// Shared application state accessible to all route handlers
///
/// Cloned for each request (cheap Arc clones). Everything in here is read-only;
/// requests share no mutable state.
#[derive(Clone)]
pub struct AppState {
    /// Server configuration
    pub config: Arc<Config>,

    /// Extraction tool used for every download
    pub tool: Arc<dyn MediaTool>,

    /// Maps tool failures to responses
    pub classifier: Arc<dyn ErrorClassifier>,
}

impl AppState {
    /// Create a new AppState from explicit parts
    pub fn new(
        config: Arc<Config>,
        tool: Arc<dyn MediaTool>,
        classifier: Arc<dyn ErrorClassifier>,
    ) -> Self {
        Self {
            config,
            tool,
            classifier,
        }
    }

    /// Create an AppState with the tool and classifier described by `config`
    pub fn from_config(config: Arc<Config>) -> Self {
        let tool = tool::from_config(&config.tool);
        let classifier = Arc::new(SubstringClassifier::new(
            config.classification.rules.clone(),
        ));
        Self::new(config, tool, classifier)
    }
}

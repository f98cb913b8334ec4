//! Route handlers for the HTTP API
//!
//! - `download`: the download-and-deliver pipeline
//! - `system`: landing page, health, OpenAPI

mod download;
mod system;

// Re-export all handlers so `routes::function_name` works
pub use download::*;
pub use system::*;

//! Library root for `bug-reporter`.
//!
//! Bug-reporter is the backend for a landing page's "report a bug" form. It:
//! - Validates the submitted report
//! - Renders it into a Markdown issue body with priority labels
//! - Opens a GitHub issue and reports the issue number and URL back to the form
//!
//! The submission flow is host-agnostic; it is exposed both as an HTTP server
//! and as a serverless function handler. The issue tracker sits behind a trait
//! so that other trackers (or mocks) can be swapped in.

#[deny(missing_docs)]
pub mod base;
pub mod host;
pub mod interaction;
pub mod runtime;
pub mod service;

use base::{config::Config, types::Void};
use host::function::{FunctionEvent, FunctionResponse};
use tracing::info;

/// Public async entry for the binary crate.
///
/// Sets up necessary services and starts the bug-reporter runtime:
/// - Creates the runtime context with the GitHub issue tracker
/// - Serves the submission endpoint (and landing page, if configured)
pub async fn start(config: Config) -> Void {
    info!("Starting bug-reporter ...");

    // Initialize the runtime.
    let runtime = runtime::Runtime::new(config)?;

    // Start the runtime.
    runtime.start().await?;

    Ok(())
}

/// Handle a single serverless function event and return the platform response.
pub async fn invoke(config: Config, event: FunctionEvent) -> base::types::Res<FunctionResponse> {
    let runtime = runtime::Runtime::new(config)?;

    Ok(runtime.invoke(event).await)
}

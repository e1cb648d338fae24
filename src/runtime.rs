//! Runtime services and shared state for the bug-reporter.

use tracing::instrument;

use crate::{
    base::{
        config::Config,
        types::{Res, Void},
    },
    host::{
        function::{self, FunctionEvent, FunctionResponse},
        server,
    },
    service::tracker::IssueTracker,
};

/// Runtime service context that can be shared across the application.
///
/// This struct holds the configuration and the issue tracker.
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct Runtime {
    /// The configuration for the application.
    pub config: Config,
    /// The issue tracker instance.
    pub tracker: IssueTracker,
}

impl Runtime {
    /// Create a new runtime instance.
    #[instrument(skip_all)]
    pub fn new(config: Config) -> Res<Self> {
        // Initialize the issue tracker.
        let tracker = IssueTracker::github(&config)?;

        Ok(Self { config, tracker })
    }

    /// Serve HTTP until a shutdown signal arrives.
    pub async fn start(&self) -> Void {
        server::serve(self.clone()).await
    }

    /// Handle a single serverless function event.
    pub async fn invoke(&self, event: FunctionEvent) -> FunctionResponse {
        function::handle_event(self, event).await
    }
}

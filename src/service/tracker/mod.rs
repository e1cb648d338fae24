pub mod github;

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;

use crate::base::types::{CreatedIssue, IssueDraft, Res};

// Traits.

/// Generic issue tracker trait that clients must implement.
///
/// This is the only outbound capability the submitter needs. Implementing it
/// allows a different tracker (or a mock, in tests) to receive bug reports.
#[async_trait]
pub trait GenericIssueTracker: Send + Sync + 'static {
    /// Create an issue from the draft.
    ///
    /// Exactly one remote call is made; failures are returned, never retried.
    async fn create_issue(&self, draft: &IssueDraft) -> Res<CreatedIssue>;
}

// Structs.

/// Issue tracker client for the application.
///
/// This is trivially cloneable and can be passed around without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct IssueTracker {
    inner: Arc<dyn GenericIssueTracker>,
}

impl Deref for IssueTracker {
    type Target = dyn GenericIssueTracker;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl IssueTracker {
    pub fn new(inner: Arc<dyn GenericIssueTracker>) -> Self {
        Self { inner }
    }
}

#[cfg(test)]
pub mod mock {
    use async_trait::async_trait;
    use mockall::mock;

    use super::GenericIssueTracker;
    use crate::base::types::{CreatedIssue, IssueDraft, Res};

    mock! {
        pub Tracker {}

        #[async_trait]
        impl GenericIssueTracker for Tracker {
            async fn create_issue(&self, draft: &IssueDraft) -> Res<CreatedIssue>;
        }
    }
}

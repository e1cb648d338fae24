//! Shared result aliases and the data types that flow through a submission.

use serde::{Deserialize, Serialize};

/// Error type used throughout the crate.
pub type Err = anyhow::Error;
/// Result with the crate's error type.
pub type Res<T> = Result<T, Err>;
/// Result with no value.
pub type Void = Res<()>;

/// Bug report as posted by the landing page form.
///
/// Every field is optional at the type level so that a missing required field
/// surfaces as a validation failure rather than a deserialization failure.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BugReport {
    /// Reporter's email (required).
    pub email: Option<String>,
    /// Short summary (required).
    pub title: Option<String>,
    /// What went wrong (required).
    pub description: Option<String>,
    /// Steps to reproduce.
    pub steps: Option<String>,
    /// One of `low`, `medium`, `high`, `critical`.
    pub priority: Option<String>,
    /// Browser user agent.
    pub user_agent: Option<String>,
    /// Device platform.
    pub platform: Option<String>,
    /// Screen dimensions.
    pub screen_size: Option<String>,
    /// App version.
    pub app_version: Option<String>,
}

/// Recognized report priorities.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Priority {
    /// `low`
    Low,
    /// `medium`
    Medium,
    /// `high`
    High,
    /// `critical`
    Critical,
}

impl Priority {
    /// Parse a priority; only the exact lowercase names are recognized.
    pub fn parse(value: &str) -> Option<Self> {
        match value {
            "low" => Some(Self::Low),
            "medium" => Some(Self::Medium),
            "high" => Some(Self::High),
            "critical" => Some(Self::Critical),
            _ => None,
        }
    }

    /// Whether reports of this priority get the `priority-high` label.
    pub fn is_urgent(self) -> bool {
        matches!(self, Self::High | Self::Critical)
    }
}

/// The issue that will be opened on the tracker.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct IssueDraft {
    /// Issue title.
    pub title: String,
    /// Markdown body.
    pub body: String,
    /// Labels to apply.
    pub labels: Vec<String>,
}

/// The parts of a created issue that are reported back to the submitter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CreatedIssue {
    /// Issue number within the repository.
    pub number: u64,
    /// Browser URL of the issue.
    pub html_url: String,
}

/// Normalized response body for a submission.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    /// Whether an issue was created.
    pub success: bool,
    /// Number of the created issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_number: Option<u64>,
    /// URL of the created issue.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub issue_url: Option<String>,
    /// Confirmation shown on success.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    /// Reason shown on failure.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl SubmissionResult {
    /// Successful result for a created issue.
    pub fn submitted(issue: CreatedIssue) -> Self {
        Self {
            success: true,
            issue_number: Some(issue.number),
            issue_url: Some(issue.html_url),
            message: Some("Bug report submitted successfully".to_string()),
            error: None,
        }
    }

    /// Failed result carrying `error`.
    pub fn failed(error: impl Into<String>) -> Self {
        Self {
            success: false,
            issue_number: None,
            issue_url: None,
            message: None,
            error: Some(error.into()),
        }
    }
}

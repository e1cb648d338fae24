//! The bug report submission flow shared by every hosting adapter.

use axum::http::{
    HeaderMap, HeaderValue, Method, StatusCode,
    header::{ACCESS_CONTROL_ALLOW_HEADERS, ACCESS_CONTROL_ALLOW_METHODS, ACCESS_CONTROL_ALLOW_ORIGIN, CONTENT_TYPE},
};
use serde_json::{Value, json};
use tracing::{error, info, instrument, warn};

use crate::{
    base::{
        template::draft_issue,
        types::{BugReport, CreatedIssue, SubmissionResult},
    },
    runtime::Runtime,
};

// Errors.

/// Ways a submission can fail at the handler boundary.
#[derive(Debug, thiserror::Error)]
pub enum SubmitError {
    /// A required field is absent or empty; the tracker is never contacted.
    #[error("Missing required fields")]
    Validation { missing: Vec<&'static str> },
    /// The tracker call failed or was rejected.
    #[error("{0}")]
    Upstream(String),
    /// The host refused the request before it reached the flow, such as an oversized body.
    #[error("{reason}")]
    Rejected { status: StatusCode, reason: String },
    /// Anything else, such as an unparseable body. The detail is only logged.
    #[error("Failed to submit bug report")]
    Unexpected(String),
}

impl SubmitError {
    pub fn status(&self) -> StatusCode {
        match self {
            SubmitError::Validation { .. } => StatusCode::BAD_REQUEST,
            SubmitError::Rejected { status, .. } => *status,
            SubmitError::Upstream(_) | SubmitError::Unexpected(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

// Replies.

/// A host-agnostic response: a status and an optional JSON body.
///
/// Every reply carries the permissive CORS headers.
#[derive(Debug, Clone, PartialEq)]
pub struct Reply {
    pub status: StatusCode,
    pub body: Option<Value>,
}

impl Reply {
    pub fn empty(status: StatusCode) -> Self {
        Self { status, body: None }
    }

    pub fn json(status: StatusCode, body: Value) -> Self {
        Self { status, body: Some(body) }
    }

    pub fn method_not_allowed() -> Self {
        Self::json(StatusCode::METHOD_NOT_ALLOWED, json!({ "error": "Method not allowed" }))
    }

    /// Log a failed submission and map it to its normalized reply.
    pub fn failure(err: SubmitError) -> Self {
        match &err {
            SubmitError::Validation { missing } => warn!(?missing, "Rejecting bug report with missing fields."),
            SubmitError::Rejected { status, reason } => warn!(%status, %reason, "Rejecting request."),
            SubmitError::Upstream(message) => error!("Error submitting bug report: {}", message),
            SubmitError::Unexpected(detail) => error!("Error submitting bug report: {}", detail),
        }

        Self::json(err.status(), json!(SubmissionResult::failed(err.to_string())))
    }

    /// Headers to send with this reply.
    pub fn headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();

        headers.insert(ACCESS_CONTROL_ALLOW_ORIGIN, HeaderValue::from_static("*"));
        headers.insert(ACCESS_CONTROL_ALLOW_METHODS, HeaderValue::from_static("POST, OPTIONS"));
        headers.insert(ACCESS_CONTROL_ALLOW_HEADERS, HeaderValue::from_static("Content-Type"));

        if self.body.is_some() {
            headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        }

        headers
    }

    /// The serialized body, or the empty string.
    pub fn body_text(&self) -> String {
        self.body.as_ref().map(Value::to_string).unwrap_or_default()
    }
}

// Handlers.

/// Dispatch one request to the submission flow.
///
/// Never fails: every outcome is mapped to a [`Reply`].
#[instrument(skip_all, fields(%method))]
pub async fn handle(runtime: &Runtime, method: &Method, body: &[u8]) -> Reply {
    if method == Method::OPTIONS {
        return Reply::empty(StatusCode::OK);
    }

    if method != Method::POST {
        warn!("Rejecting unsupported method.");
        return Reply::method_not_allowed();
    }

    match submit_bug_report(runtime, body).await {
        Ok(issue) => Reply::json(StatusCode::OK, json!(SubmissionResult::submitted(issue))),
        Err(err) => Reply::failure(err),
    }
}

/// Parse, validate, render, and submit a report.
#[instrument(skip_all)]
pub async fn submit_bug_report(runtime: &Runtime, body: &[u8]) -> Result<CreatedIssue, SubmitError> {
    let report: BugReport = serde_json::from_slice(body).map_err(|e| SubmitError::Unexpected(format!("Invalid request body: {e}")))?;

    validate(&report)?;

    let draft = draft_issue(&report, &runtime.config.priority_glyphs);

    let issue = runtime.tracker.create_issue(&draft).await.map_err(|e| SubmitError::Upstream(e.to_string()))?;

    info!(number = issue.number, "Bug report submitted.");

    Ok(issue)
}

/// Check that `email`, `title`, and `description` are present and non-empty.
pub fn validate(report: &BugReport) -> Result<(), SubmitError> {
    let required = [("email", &report.email), ("title", &report.title), ("description", &report.description)];

    let missing: Vec<&'static str> = required.into_iter().filter(|(_, value)| value.as_deref().is_none_or(str::is_empty)).map(|(name, _)| name).collect();

    if missing.is_empty() { Ok(()) } else { Err(SubmitError::Validation { missing }) }
}

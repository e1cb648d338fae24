//! Serverless function adapter.
//!
//! Translates a platform event (`{httpMethod, body}`) into the shared
//! submission flow and back into a platform response.

use std::collections::BTreeMap;

use axum::http::Method;
use base64::{Engine, engine::general_purpose::STANDARD};
use serde::{Deserialize, Serialize};
use tracing::{instrument, warn};

use crate::{
    interaction::submit_bug::{self, Reply, SubmitError},
    runtime::Runtime,
};

/// Inbound function event.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionEvent {
    pub http_method: String,
    #[serde(default)]
    pub body: Option<String>,
    #[serde(default)]
    pub is_base64_encoded: bool,
}

/// Outbound function response.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunctionResponse {
    pub status_code: u16,
    pub headers: BTreeMap<String, String>,
    pub body: String,
}

impl From<Reply> for FunctionResponse {
    fn from(reply: Reply) -> Self {
        let headers = reply.headers().iter().map(|(name, value)| (name.as_str().to_string(), value.to_str().unwrap_or_default().to_string())).collect();

        Self {
            status_code: reply.status.as_u16(),
            headers,
            body: reply.body_text(),
        }
    }
}

/// Handle one function event.
#[instrument(skip_all, fields(method = %event.http_method))]
pub async fn handle_event(runtime: &Runtime, event: FunctionEvent) -> FunctionResponse {
    let Ok(method) = Method::from_bytes(event.http_method.to_ascii_uppercase().as_bytes()) else {
        warn!("Rejecting unparseable method.");
        return Reply::method_not_allowed().into();
    };

    let body = match decode_body(&event) {
        Ok(body) => body,
        Err(err) => return Reply::failure(err).into(),
    };

    submit_bug::handle(runtime, &method, &body).await.into()
}

fn decode_body(event: &FunctionEvent) -> Result<Vec<u8>, SubmitError> {
    let body = event.body.as_deref().unwrap_or_default();

    if event.is_base64_encoded {
        STANDARD.decode(body).map_err(|e| SubmitError::Unexpected(format!("Invalid base64 body: {e}")))
    } else {
        Ok(body.as_bytes().to_vec())
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use serde_json::{Value, json};

    use super::*;
    use crate::{
        base::{
            config::{Config, ConfigInner},
            types::{CreatedIssue, IssueDraft},
        },
        service::tracker::{IssueTracker, mock::MockTracker},
    };

    fn create_test_runtime(tracker: MockTracker) -> Runtime {
        Runtime {
            config: Config { inner: Arc::new(ConfigInner::default()) },
            tracker: IssueTracker::new(Arc::new(tracker)),
        }
    }

    fn event(method: &str, body: Option<&str>) -> FunctionEvent {
        FunctionEvent {
            http_method: method.to_string(),
            body: body.map(str::to_string),
            is_base64_encoded: false,
        }
    }

    const REPORT: &str = r#"{"email":"a@b.com","title":"Sync stalls","description":"Stuck at 99%","priority":"low","steps":"Open a large project"}"#;

    #[tokio::test]
    async fn test_post_event_creates_issue() {
        let mut tracker = MockTracker::new();
        tracker
            .expect_create_issue()
            .withf(|draft: &IssueDraft| draft.title == "[Bug] Sync stalls" && draft.labels == ["bug", "user-reported"] && draft.body.contains("### Steps to Reproduce\nOpen a large project"))
            .times(1)
            .returning(|_| {
                Ok(CreatedIssue {
                    number: 9,
                    html_url: "https://github.com/acme/insync/issues/9".to_string(),
                })
            });

        let response = handle_event(&create_test_runtime(tracker), event("POST", Some(REPORT))).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.headers["content-type"], "application/json");
        assert_eq!(response.headers["access-control-allow-origin"], "*");

        let body: Value = serde_json::from_str(&response.body).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["issueNumber"], 9);
    }

    #[tokio::test]
    async fn test_base64_body_is_decoded() {
        let mut tracker = MockTracker::new();
        tracker.expect_create_issue().times(1).returning(|_| {
            Ok(CreatedIssue {
                number: 10,
                html_url: "https://github.com/acme/insync/issues/10".to_string(),
            })
        });

        let encoded_body = STANDARD.encode(REPORT);
        let mut encoded = event("POST", Some(encoded_body.as_str()));
        encoded.is_base64_encoded = true;

        let response = handle_event(&create_test_runtime(tracker), encoded).await;

        assert_eq!(response.status_code, 200);
    }

    #[tokio::test]
    async fn test_invalid_base64_body_is_a_generic_failure() {
        let mut tracker = MockTracker::new();
        tracker.expect_create_issue().times(0);

        let mut encoded = event("POST", Some("%%% not base64 %%%"));
        encoded.is_base64_encoded = true;

        let response = handle_event(&create_test_runtime(tracker), encoded).await;

        assert_eq!(response.status_code, 500);
        assert_eq!(serde_json::from_str::<Value>(&response.body).unwrap(), json!({ "success": false, "error": "Failed to submit bug report" }));
    }

    #[tokio::test]
    async fn test_options_event_has_empty_body() {
        let mut tracker = MockTracker::new();
        tracker.expect_create_issue().times(0);

        let response = handle_event(&create_test_runtime(tracker), event("OPTIONS", None)).await;

        assert_eq!(response.status_code, 200);
        assert_eq!(response.body, "");
        assert_eq!(response.headers["access-control-allow-methods"], "POST, OPTIONS");
        assert!(!response.headers.contains_key("content-type"));
    }

    #[tokio::test]
    async fn test_other_methods_are_not_allowed() {
        let mut tracker = MockTracker::new();
        tracker.expect_create_issue().times(0);
        let runtime = create_test_runtime(tracker);

        for method in ["GET", "PATCH", "NOT A METHOD"] {
            let response = handle_event(&runtime, event(method, None)).await;

            assert_eq!(response.status_code, 405, "{method}");
            assert_eq!(response.body, r#"{"error":"Method not allowed"}"#);
        }
    }

    #[tokio::test]
    async fn test_missing_body_is_a_generic_failure() {
        let mut tracker = MockTracker::new();
        tracker.expect_create_issue().times(0);

        let response = handle_event(&create_test_runtime(tracker), event("POST", None)).await;

        assert_eq!(response.status_code, 500);
    }

    #[test]
    fn test_event_uses_platform_field_names() {
        let event: FunctionEvent = serde_json::from_value(json!({ "httpMethod": "POST", "body": "{}", "isBase64Encoded": false, "path": "/submit-bug" })).unwrap();

        assert_eq!(event.http_method, "POST");
        assert_eq!(event.body.as_deref(), Some("{}"));

        let response = serde_json::to_value(FunctionResponse {
            status_code: 405,
            headers: BTreeMap::new(),
            body: String::new(),
        })
        .unwrap();

        assert_eq!(response, json!({ "statusCode": 405, "headers": {}, "body": "" }));
    }
}

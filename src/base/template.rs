//! Issue templates and the pure report-to-issue transformation.

use super::{
    config::PriorityGlyphs,
    types::{BugReport, IssueDraft, Priority},
};

/// Prefix for every issue title.
pub const ISSUE_TITLE_PREFIX: &str = "[Bug] ";

/// Labels applied to every issue.
pub const BASE_LABELS: [&str; 2] = ["bug", "user-reported"];

/// Extra label for `high` and `critical` reports.
pub const URGENT_LABEL: &str = "priority-high";

/// Rendered in place of an absent priority.
const UNSPECIFIED_PRIORITY: &str = "UNSPECIFIED";

/// Rendered in place of absent device information.
const UNKNOWN_VALUE: &str = "unknown";

const ISSUE_FOOTER: &str = "*This bug report was submitted via the bug report form*";

/// Turn a report into the issue that will be created.
///
/// Required fields are assumed to be present; an absent one renders as empty.
pub fn draft_issue(report: &BugReport, glyphs: &PriorityGlyphs) -> IssueDraft {
    IssueDraft {
        title: issue_title(report.title.as_deref().unwrap_or_default()),
        body: render_issue_body(report, glyphs),
        labels: issue_labels(report.priority.as_deref()),
    }
}

/// Prefixed issue title.
pub fn issue_title(title: &str) -> String {
    format!("{ISSUE_TITLE_PREFIX}{title}")
}

/// Base labels, plus the urgent label for `high` and `critical`.
pub fn issue_labels(priority: Option<&str>) -> Vec<String> {
    let mut labels: Vec<String> = BASE_LABELS.iter().map(|l| l.to_string()).collect();

    if priority.and_then(Priority::parse).is_some_and(Priority::is_urgent) {
        labels.push(URGENT_LABEL.to_string());
    }

    labels
}

/// Markdown issue body.
pub fn render_issue_body(report: &BugReport, glyphs: &PriorityGlyphs) -> String {
    let priority = report.priority.as_deref();
    let glyph = glyphs.glyph(priority.and_then(Priority::parse));
    let priority_label = priority.map(str::to_uppercase).unwrap_or_else(|| UNSPECIFIED_PRIORITY.to_string());

    let steps = match report.steps.as_deref() {
        Some(steps) if !steps.is_empty() => format!("### Steps to Reproduce\n{steps}\n"),
        _ => String::new(),
    };

    let email = report.email.as_deref().unwrap_or_default();
    let description = report.description.as_deref().unwrap_or_default();
    let platform = or_unknown(report.platform.as_deref());
    let screen_size = or_unknown(report.screen_size.as_deref());
    let user_agent = or_unknown(report.user_agent.as_deref());
    let app_version = or_unknown(report.app_version.as_deref());

    format!(
        r#"
## Bug Report

**Reporter:** {email}
**Priority:** {glyph} {priority_label}

---

### Description
{description}

{steps}

---

### Device Information
- **Platform:** {platform}
- **Screen Size:** {screen_size}
- **User Agent:** {user_agent}
- **App Version:** {app_version}

---

{ISSUE_FOOTER}
"#
    )
}

fn or_unknown(value: Option<&str>) -> &str {
    value.unwrap_or(UNKNOWN_VALUE)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn report(priority: Option<&str>, steps: Option<&str>) -> BugReport {
        BugReport {
            email: Some("a@b.com".to_string()),
            title: Some("Crash".to_string()),
            description: Some("App crashes on launch".to_string()),
            steps: steps.map(str::to_string),
            priority: priority.map(str::to_string),
            ..Default::default()
        }
    }

    #[test]
    fn test_draft_issue_for_critical_report() {
        let draft = draft_issue(&report(Some("critical"), None), &PriorityGlyphs::default());

        assert_eq!(draft.title, "[Bug] Crash");
        assert_eq!(draft.labels, vec!["bug", "user-reported", "priority-high"]);
        assert!(draft.body.contains("**Reporter:** a@b.com"));
        assert!(draft.body.contains("**Priority:** 🔴 CRITICAL"));
        assert!(draft.body.contains("### Description\nApp crashes on launch\n"));
    }

    #[test]
    fn test_labels_by_priority() {
        for priority in ["high", "critical"] {
            assert!(issue_labels(Some(priority)).contains(&URGENT_LABEL.to_string()), "{priority}");
        }

        for priority in [Some("low"), Some("medium"), Some("HIGH"), Some("urgent"), None] {
            assert_eq!(issue_labels(priority), vec!["bug", "user-reported"], "{priority:?}");
        }
    }

    #[test]
    fn test_unrecognized_priority_uses_fallback_glyph() {
        let glyphs = PriorityGlyphs::default();

        let body = render_issue_body(&report(Some("urgent"), None), &glyphs);
        assert!(body.contains("**Priority:** ⚪ URGENT"));

        let body = render_issue_body(&report(None, None), &glyphs);
        assert!(body.contains("**Priority:** ⚪ UNSPECIFIED"));
    }

    #[test]
    fn test_steps_section_only_when_present() {
        let glyphs = PriorityGlyphs::default();

        let body = render_issue_body(&report(Some("low"), Some("1. Open app\n2. Tap sync")), &glyphs);
        assert!(body.contains("### Steps to Reproduce\n1. Open app\n2. Tap sync\n"));

        for steps in [None, Some("")] {
            let body = render_issue_body(&report(Some("low"), steps), &glyphs);
            assert!(!body.contains("Steps to Reproduce"));
        }
    }

    #[test]
    fn test_device_information_always_rendered() {
        let mut with_device = report(Some("medium"), None);
        with_device.platform = Some("MacIntel".to_string());
        with_device.screen_size = Some(String::new());

        let body = render_issue_body(&with_device, &PriorityGlyphs::default());

        assert!(body.contains("- **Platform:** MacIntel\n"));
        assert!(body.contains("- **Screen Size:** \n"));
        assert!(body.contains("- **User Agent:** unknown\n"));
        assert!(body.contains("- **App Version:** unknown\n"));
        assert!(body.trim_end().ends_with(ISSUE_FOOTER));
    }

    #[test]
    fn test_title_is_not_escaped() {
        assert_eq!(issue_title("<b>boom</b> `x`"), "[Bug] <b>boom</b> `x`");
    }
}

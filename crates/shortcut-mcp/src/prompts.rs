//! Prompt templates for ticket authoring.
//!
//! Two templates are exposed over the prompt capability: a bug report and a
//! feature request. Both render markdown stamped with the current date, so
//! the text can be pasted straight into `create_story`.

use crate::error::{Error, Result};
use chrono::Utc;
use serde_json::{Map, Value};

/// Name of the bug report prompt.
pub const BUG_REPORT: &str = "create_bug_report";

/// Name of the feature request prompt.
pub const FEATURE_REQUEST: &str = "create_feature_request";

/// Extract a required string argument from a prompt argument map.
///
/// # Errors
///
/// Returns [`Error::MissingPromptArgument`] when the key is absent or not a
/// string.
pub fn required_arg<'a>(
    arguments: Option<&'a Map<String, Value>>,
    key: &'static str,
) -> Result<&'a str> {
    arguments
        .and_then(|map| map.get(key))
        .and_then(Value::as_str)
        .ok_or(Error::MissingPromptArgument(key))
}

/// Render the bug report template.
#[must_use]
pub fn render_bug_report(title: &str, steps: &str, expected: &str, actual: &str) -> String {
    let date = Utc::now().format("%Y-%m-%d");
    format!(
        "# {title}\n\n\
         ## Bug Description\n\
         A bug has been identified that needs to be addressed.\n\n\
         ## Steps to Reproduce\n\
         {steps}\n\n\
         ## Expected Behavior\n\
         {expected}\n\n\
         ## Actual Behavior\n\
         {actual}\n\n\
         ## Additional Context\n\
         Bug reported on {date}\n"
    )
}

/// Render the feature request template.
#[must_use]
pub fn render_feature_request(
    title: &str,
    description: &str,
    user_value: &str,
    acceptance_criteria: &str,
) -> String {
    let date = Utc::now().format("%Y-%m-%d");
    format!(
        "# {title}\n\n\
         ## Feature Description\n\
         {description}\n\n\
         ## User Value\n\
         {user_value}\n\n\
         ## Acceptance Criteria\n\
         {acceptance_criteria}\n\n\
         ## Additional Notes\n\
         Feature requested on {date}\n"
    )
}

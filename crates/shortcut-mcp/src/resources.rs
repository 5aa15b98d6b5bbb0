//! Resource URIs exposed by the server.
//!
//! Two resources live under the `shortcut://` scheme:
//!
//! - `shortcut://stories` with optional `workflow_state_id`, `project_id`,
//!   and `limit` query parameters
//! - `shortcut://story/{story_id}`
//!
//! [`parse_uri`] turns an incoming URI into a [`ResourceRequest`]; the
//! server maps that onto client calls.

use crate::error::{Error, Result};
use url::Url;

/// URI of the story list resource.
pub const STORIES_URI: &str = "shortcut://stories";

/// URI template of the single-story resource.
pub const STORY_URI_TEMPLATE: &str = "shortcut://story/{story_id}";

/// Default number of stories returned by the story list resource.
pub const DEFAULT_RESOURCE_LIMIT: usize = 20;

/// A parsed resource request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ResourceRequest {
    /// The story list, with filters applied.
    Stories(StoriesQuery),

    /// A single story by id.
    Story(u64),
}

/// Query parameters accepted by the story list resource.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoriesQuery {
    /// Only stories in this workflow state.
    pub workflow_state_id: Option<u64>,

    /// Only stories in this project.
    pub project_id: Option<u64>,

    /// Maximum number of stories to return; 0 disables the cap.
    pub limit: usize,
}

impl Default for StoriesQuery {
    fn default() -> Self {
        Self {
            workflow_state_id: None,
            project_id: None,
            limit: DEFAULT_RESOURCE_LIMIT,
        }
    }
}

/// Parse a `shortcut://` resource URI.
///
/// # Errors
///
/// Returns [`Error::InvalidResourceUri`] for URIs that do not parse or
/// carry malformed parameters, and [`Error::UnknownResource`] for URIs
/// outside the two supported shapes.
pub fn parse_uri(uri: &str) -> Result<ResourceRequest> {
    let parsed = Url::parse(uri).map_err(|e| Error::InvalidResourceUri {
        uri: uri.to_string(),
        reason: e.to_string(),
    })?;

    if parsed.scheme() != "shortcut" {
        return Err(Error::InvalidResourceUri {
            uri: uri.to_string(),
            reason: format!("unsupported scheme '{}'", parsed.scheme()),
        });
    }

    match parsed.host_str() {
        Some("stories") if matches!(parsed.path(), "" | "/") => {
            Ok(ResourceRequest::Stories(parse_stories_query(&parsed)?))
        }
        Some("story") => {
            let id = parsed
                .path()
                .trim_matches('/')
                .parse()
                .map_err(|_| Error::InvalidResourceUri {
                    uri: uri.to_string(),
                    reason: "story id must be an integer".to_string(),
                })?;
            Ok(ResourceRequest::Story(id))
        }
        _ => Err(Error::UnknownResource(uri.to_string())),
    }
}

fn parse_stories_query(url: &Url) -> Result<StoriesQuery> {
    let mut query = StoriesQuery::default();

    for (key, value) in url.query_pairs() {
        match key.as_ref() {
            "workflow_state_id" => query.workflow_state_id = Some(parse_number(url, &key, &value)?),
            "project_id" => query.project_id = Some(parse_number(url, &key, &value)?),
            "limit" => query.limit = parse_number(url, &key, &value)?,
            // Unknown parameters are ignored, matching HTTP query semantics.
            _ => {}
        }
    }

    Ok(query)
}

fn parse_number<T: std::str::FromStr>(url: &Url, key: &str, value: &str) -> Result<T> {
    value.parse().map_err(|_| Error::InvalidResourceUri {
        uri: url.to_string(),
        reason: format!("'{key}' must be an integer, got '{value}'"),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[test]
    fn stories_uri_without_query_uses_defaults() {
        let request = parse_uri("shortcut://stories").unwrap();
        assert_eq!(request, ResourceRequest::Stories(StoriesQuery::default()));
    }

    #[test]
    fn stories_uri_parses_filters() {
        let request =
            parse_uri("shortcut://stories?workflow_state_id=500&project_id=7&limit=5").unwrap();
        assert_eq!(
            request,
            ResourceRequest::Stories(StoriesQuery {
                workflow_state_id: Some(500),
                project_id: Some(7),
                limit: 5,
            })
        );
    }

    #[test]
    fn stories_uri_ignores_unknown_parameters() {
        let request = parse_uri("shortcut://stories?foo=bar&limit=3").unwrap();
        assert_eq!(
            request,
            ResourceRequest::Stories(StoriesQuery {
                limit: 3,
                ..Default::default()
            })
        );
    }

    #[rstest]
    #[case::plain("shortcut://story/123", 123)]
    #[case::trailing_slash("shortcut://story/123/", 123)]
    fn story_uri_parses_id(#[case] uri: &str, #[case] expected: u64) {
        assert_eq!(parse_uri(uri).unwrap(), ResourceRequest::Story(expected));
    }

    #[rstest]
    #[case::non_numeric_id("shortcut://story/abc")]
    #[case::missing_id("shortcut://story")]
    #[case::bad_limit("shortcut://stories?limit=many")]
    #[case::wrong_scheme("https://stories")]
    fn malformed_uris_are_invalid(#[case] uri: &str) {
        assert!(matches!(
            parse_uri(uri),
            Err(Error::InvalidResourceUri { .. })
        ));
    }

    #[rstest]
    #[case::unknown_host("shortcut://epics")]
    #[case::stories_with_path("shortcut://stories/extra")]
    fn unsupported_uris_are_unknown(#[case] uri: &str) {
        assert!(matches!(parse_uri(uri), Err(Error::UnknownResource(_))));
    }
}

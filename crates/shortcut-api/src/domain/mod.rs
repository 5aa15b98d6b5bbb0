//! Domain types for the Shortcut API.
//!
//! Response records mirror the JSON the API returns; unknown fields are
//! ignored and fields the API may omit carry defaults. Request payloads
//! (`NewStory`, `StoryUpdate`) serialize only the fields that were set, so
//! a partial update never clobbers server-side values.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Kind of work a story represents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StoryType {
    /// New functionality
    Feature,

    /// Defect fix
    Bug,

    /// Maintenance work
    Chore,
}

impl fmt::Display for StoryType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Feature => write!(f, "feature"),
            Self::Bug => write!(f, "bug"),
            Self::Chore => write!(f, "chore"),
        }
    }
}

/// A story (ticket) as returned by the Shortcut API.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Story {
    /// Unique story identifier.
    pub id: u64,

    /// Story name/title.
    pub name: String,

    /// Story description (markdown).
    #[serde(default)]
    pub description: Option<String>,

    /// Kind of work.
    #[serde(default)]
    pub story_type: Option<StoryType>,

    /// Workflow state the story currently sits in.
    #[serde(default)]
    pub workflow_state_id: Option<u64>,

    /// Point estimate, if estimated.
    #[serde(default)]
    pub estimate: Option<i64>,

    /// Project the story belongs to.
    #[serde(default)]
    pub project_id: Option<u64>,

    /// Member UUIDs assigned as owners.
    #[serde(default)]
    pub owner_ids: Vec<String>,

    /// Labels attached to the story.
    #[serde(default)]
    pub label_ids: Vec<u64>,

    /// Link to the story in the Shortcut web app.
    #[serde(default)]
    pub app_url: Option<String>,

    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,

    /// Due date (ISO 8601), if set.
    #[serde(default)]
    pub deadline: Option<String>,

    /// Comments on the story. Only populated on single-story fetches.
    #[serde(default)]
    pub comments: Vec<Comment>,

    /// External links attached to the story.
    #[serde(default)]
    pub external_links: Vec<String>,

    /// Whether the story has been archived.
    #[serde(default)]
    pub archived: bool,

    /// Whether the story is in a done workflow state.
    #[serde(default)]
    pub completed: bool,
}

/// A comment on a story.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Comment {
    /// Comment identifier.
    #[serde(default)]
    pub id: Option<u64>,

    /// Comment body (markdown).
    pub text: String,

    /// Member UUID of the author.
    #[serde(default)]
    pub author_id: Option<String>,

    /// Creation timestamp (ISO 8601).
    #[serde(default)]
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601).
    #[serde(default)]
    pub updated_at: Option<String>,
}

/// A workflow with its ordered states.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Workflow {
    /// Workflow identifier.
    pub id: u64,

    /// Workflow name.
    pub name: String,

    /// States belonging to this workflow.
    #[serde(default)]
    pub states: Vec<WorkflowState>,
}

/// A single state within a workflow.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct WorkflowState {
    /// State identifier.
    pub id: u64,

    /// State name.
    pub name: String,

    /// State category: `unstarted`, `started`, or `done`.
    #[serde(rename = "type")]
    pub state_type: String,
}

/// A project in the workspace.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Project {
    /// Project identifier.
    pub id: u64,

    /// Project name.
    pub name: String,

    /// Project description.
    #[serde(default)]
    pub description: Option<String>,

    /// Whether the project has been archived.
    #[serde(default)]
    pub archived: bool,
}

/// A workspace member.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Member {
    /// Member UUID.
    pub id: String,

    /// Whether the member account is disabled.
    #[serde(default)]
    pub disabled: bool,

    /// Profile details.
    #[serde(default)]
    pub profile: Option<MemberProfile>,
}

/// Profile details of a workspace member.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MemberProfile {
    /// Display name.
    #[serde(default)]
    pub name: Option<String>,

    /// @-mention handle.
    #[serde(default)]
    pub mention_name: Option<String>,

    /// Email address.
    #[serde(default)]
    pub email_address: Option<String>,
}

/// Payload for creating a new story.
#[derive(Debug, Clone, Serialize)]
pub struct NewStory {
    /// Story name/title.
    pub name: String,

    /// Story description.
    pub description: String,

    /// Kind of work.
    pub story_type: StoryType,

    /// Project to file the story under.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub project_id: Option<u64>,

    /// Workflow state to place the story in.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_state_id: Option<u64>,

    /// Member UUIDs to assign as owners.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_ids: Option<Vec<String>>,

    /// Labels to attach, created by name if needed.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub labels: Option<Vec<NewLabel>>,
}

/// A label reference in a story create payload.
#[derive(Debug, Clone, Serialize)]
pub struct NewLabel {
    /// Label name.
    pub name: String,
}

/// Payload for updating an existing story. Unset fields are left untouched.
#[derive(Debug, Clone, Default, Serialize)]
pub struct StoryUpdate {
    /// New name/title.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,

    /// New description.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// New story type.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub story_type: Option<StoryType>,

    /// New workflow state.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workflow_state_id: Option<u64>,

    /// New owner list, replacing the current one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub owner_ids: Option<Vec<String>>,
}

/// Filter for listing stories.
#[derive(Debug, Clone, Default)]
pub struct StoryFilter {
    /// Only stories in this workflow state.
    pub workflow_state_id: Option<u64>,

    /// Only stories in this project.
    pub project_id: Option<u64>,

    /// Only stories owned by this member.
    pub owner_id: Option<String>,
}

impl StoryFilter {
    /// Render the filter as query pairs for `GET /stories`.
    #[must_use]
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = Vec::new();
        if let Some(id) = self.workflow_state_id {
            query.push(("workflow_state_id", id.to_string()));
        }
        if let Some(id) = self.project_id {
            query.push(("project_id", id.to_string()));
        }
        if let Some(owner) = &self.owner_id {
            query.push(("owner_ids[]", owner.clone()));
        }
        query
    }
}

/// Envelope returned by `GET /search/stories`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    /// Matching stories.
    #[serde(default)]
    pub data: Vec<Story>,

    /// Opaque cursor for the next page, if any.
    #[serde(default)]
    pub next: Option<String>,

    /// Total number of matches, if reported.
    #[serde(default)]
    pub total: Option<u64>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case::feature(StoryType::Feature, "\"feature\"")]
    #[case::bug(StoryType::Bug, "\"bug\"")]
    #[case::chore(StoryType::Chore, "\"chore\"")]
    fn story_type_serializes_lowercase(#[case] story_type: StoryType, #[case] expected: &str) {
        assert_eq!(serde_json::to_string(&story_type).unwrap(), expected);
    }

    #[test]
    fn new_story_omits_unset_fields() {
        let new = NewStory {
            name: "Fix login".to_string(),
            description: "Session expires early".to_string(),
            story_type: StoryType::Bug,
            project_id: None,
            workflow_state_id: None,
            owner_ids: None,
            labels: None,
        };

        let value = serde_json::to_value(&new).unwrap();
        let object = value.as_object().unwrap();
        assert_eq!(object.len(), 3);
        assert_eq!(object["story_type"], "bug");
        assert!(!object.contains_key("project_id"));
    }

    #[test]
    fn new_story_labels_serialize_as_name_objects() {
        let new = NewStory {
            name: "Add export".to_string(),
            description: String::new(),
            story_type: StoryType::Feature,
            project_id: Some(7),
            workflow_state_id: None,
            owner_ids: None,
            labels: Some(vec![NewLabel {
                name: "backend".to_string(),
            }]),
        };

        let value = serde_json::to_value(&new).unwrap();
        assert_eq!(value["labels"][0]["name"], "backend");
        assert_eq!(value["project_id"], 7);
    }

    #[test]
    fn story_update_default_serializes_empty() {
        let update = StoryUpdate::default();
        let value = serde_json::to_value(&update).unwrap();
        assert!(value.as_object().unwrap().is_empty());
    }

    #[rstest]
    #[case::empty(StoryFilter::default(), vec![])]
    #[case::state_only(
        StoryFilter { workflow_state_id: Some(500), ..Default::default() },
        vec![("workflow_state_id", "500".to_string())]
    )]
    #[case::all_fields(
        StoryFilter {
            workflow_state_id: Some(500),
            project_id: Some(7),
            owner_id: Some("uuid-1".to_string()),
        },
        vec![
            ("workflow_state_id", "500".to_string()),
            ("project_id", "7".to_string()),
            ("owner_ids[]", "uuid-1".to_string()),
        ]
    )]
    fn story_filter_renders_query_pairs(
        #[case] filter: StoryFilter,
        #[case] expected: Vec<(&'static str, String)>,
    ) {
        assert_eq!(filter.to_query(), expected);
    }

    #[test]
    fn search_results_tolerate_missing_data() {
        let results: SearchResults = serde_json::from_str("{}").unwrap();
        assert!(results.data.is_empty());
        assert!(results.next.is_none());
    }
}

//! MCP parameter and response models.
//!
//! Parameter types carry the JSON Schema the protocol advertises for each
//! tool. Response types are trimmed views of the `shortcut-api` records,
//! shaped the way the capability consumers expect them.

use crate::error::{Error, Result};
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use shortcut_api::domain::{Comment, Member, Project, Story, StoryType, Workflow};

/// Default number of stories returned by list and search tools.
pub const DEFAULT_TOOL_LIMIT: usize = 25;

// ---------------------------------------------------------------------------
// Tool parameters
// ---------------------------------------------------------------------------

/// Parameters for the `list_stories` tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct ListStoriesParams {
    /// Filter by workflow state ID.
    #[schemars(description = "Filter by workflow state ID")]
    pub workflow_state_id: Option<u64>,

    /// Filter by project ID.
    #[schemars(description = "Filter by project ID")]
    pub project_id: Option<u64>,

    /// Filter by owner member UUID.
    #[schemars(description = "Filter by owner user ID")]
    pub owner_id: Option<String>,

    /// Maximum number of stories to return.
    #[schemars(description = "Maximum number of stories to return (default: 25, 0 = no limit)")]
    pub limit: Option<usize>,
}

/// Parameters for the `search_stories` tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct SearchStoriesParams {
    /// Search query string.
    #[schemars(description = "Search query string")]
    pub query: String,

    /// Maximum number of stories to return.
    #[schemars(description = "Maximum number of stories to return (default: 25)")]
    pub limit: Option<usize>,
}

/// Parameters for the `get_story_details` tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct GetStoryParams {
    /// ID of the story to retrieve.
    #[schemars(description = "The ID of the story to retrieve")]
    pub story_id: u64,
}

/// Parameters for the `create_story` tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct CreateStoryParams {
    /// The name/title of the story.
    #[schemars(description = "The name/title of the story")]
    pub name: String,

    /// The description of the story.
    #[schemars(description = "The description of the story")]
    pub description: String,

    /// Type of story.
    #[schemars(description = "Type of story (feature, bug, chore; default: feature)")]
    pub story_type: Option<String>,

    /// Project to assign the story to.
    #[schemars(description = "ID of the project to assign the story to")]
    pub project_id: Option<u64>,

    /// Workflow state to place the story in.
    #[schemars(description = "ID of the workflow state")]
    pub workflow_state_id: Option<u64>,

    /// Owner member UUIDs.
    #[schemars(description = "List of user IDs to assign as owners")]
    pub owner_ids: Option<Vec<String>>,

    /// Label names to attach.
    #[schemars(description = "List of label names to add to the story")]
    pub labels: Option<Vec<String>>,
}

/// Parameters for the `update_story` tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct UpdateStoryParams {
    /// ID of the story to update.
    #[schemars(description = "ID of the story to update")]
    pub story_id: u64,

    /// New name/title for the story.
    #[schemars(description = "New name/title for the story")]
    pub name: Option<String>,

    /// New description for the story.
    #[schemars(description = "New description for the story")]
    pub description: Option<String>,

    /// New type for the story.
    #[schemars(description = "New type for the story (feature, bug, chore)")]
    pub story_type: Option<String>,

    /// New workflow state ID.
    #[schemars(description = "New workflow state ID")]
    pub workflow_state_id: Option<u64>,

    /// New list of owner member UUIDs.
    #[schemars(description = "New list of owner user IDs")]
    pub owner_ids: Option<Vec<String>>,
}

/// Parameters for the `add_comment` tool.
#[derive(Debug, Serialize, Deserialize, JsonSchema)]
pub struct AddCommentParams {
    /// ID of the story to comment on.
    #[schemars(description = "ID of the story to comment on")]
    pub story_id: u64,

    /// Comment text.
    #[schemars(description = "Comment text")]
    pub text: String,
}

// ---------------------------------------------------------------------------
// Responses
// ---------------------------------------------------------------------------

/// Story projection used for lists and search results.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StorySummary {
    /// Unique story identifier.
    pub id: u64,

    /// Story name/title.
    pub name: String,

    /// Kind of work (feature, bug, chore).
    pub story_type: Option<String>,

    /// Workflow state the story sits in.
    pub workflow_state_id: Option<u64>,

    /// Point estimate, if estimated.
    pub estimate: Option<i64>,

    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601).
    pub updated_at: Option<String>,
}

impl From<Story> for StorySummary {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            name: story.name,
            story_type: story.story_type.map(|t| t.to_string()),
            workflow_state_id: story.workflow_state_id,
            estimate: story.estimate,
            created_at: story.created_at,
            updated_at: story.updated_at,
        }
    }
}

/// Full story view including description, owners, and comments.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StoryDetail {
    /// Unique story identifier.
    pub id: u64,

    /// Story name/title.
    pub name: String,

    /// Story description (markdown).
    pub description: Option<String>,

    /// Kind of work (feature, bug, chore).
    pub story_type: Option<String>,

    /// Workflow state the story sits in.
    pub workflow_state_id: Option<u64>,

    /// Point estimate, if estimated.
    pub estimate: Option<i64>,

    /// Project the story belongs to.
    pub project_id: Option<u64>,

    /// Member UUIDs assigned as owners.
    pub owner_ids: Vec<String>,

    /// Labels attached to the story.
    pub label_ids: Vec<u64>,

    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601).
    pub updated_at: Option<String>,

    /// Due date (ISO 8601), if set.
    pub deadline: Option<String>,

    /// Comments on the story.
    pub comments: Vec<CommentView>,

    /// External links attached to the story.
    pub external_links: Vec<String>,

    /// Link to the story in the Shortcut web app.
    pub app_url: Option<String>,
}

impl From<Story> for StoryDetail {
    fn from(story: Story) -> Self {
        Self {
            id: story.id,
            name: story.name,
            description: story.description,
            story_type: story.story_type.map(|t| t.to_string()),
            workflow_state_id: story.workflow_state_id,
            estimate: story.estimate,
            project_id: story.project_id,
            owner_ids: story.owner_ids,
            label_ids: story.label_ids,
            created_at: story.created_at,
            updated_at: story.updated_at,
            deadline: story.deadline,
            comments: story.comments.into_iter().map(Into::into).collect(),
            external_links: story.external_links,
            app_url: story.app_url,
        }
    }
}

/// Comment view carried inside story details and comment receipts.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommentView {
    /// Comment identifier.
    pub id: Option<u64>,

    /// Comment body (markdown).
    pub text: String,

    /// Member UUID of the author.
    pub author_id: Option<String>,

    /// Creation timestamp (ISO 8601).
    pub created_at: Option<String>,

    /// Last update timestamp (ISO 8601).
    pub updated_at: Option<String>,
}

impl From<Comment> for CommentView {
    fn from(comment: Comment) -> Self {
        Self {
            id: comment.id,
            text: comment.text,
            author_id: comment.author_id,
            created_at: comment.created_at,
            updated_at: comment.updated_at,
        }
    }
}

/// Receipt returned after adding a comment.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct CommentReceipt {
    /// Whether the comment was created.
    pub success: bool,

    /// Status message.
    pub message: String,

    /// The created comment.
    pub comment: CommentView,
}

/// A workflow state flattened with its parent workflow.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct WorkflowStateRow {
    /// State identifier.
    pub id: u64,

    /// State name.
    pub name: String,

    /// State category: `unstarted`, `started`, or `done`.
    #[serde(rename = "type")]
    pub state_type: String,

    /// Identifier of the workflow the state belongs to.
    pub workflow_id: u64,

    /// Name of the workflow the state belongs to.
    pub workflow_name: String,
}

/// Flatten workflows into one row per state.
#[must_use]
pub fn flatten_workflows(workflows: Vec<Workflow>) -> Vec<WorkflowStateRow> {
    workflows
        .into_iter()
        .flat_map(|workflow| {
            let workflow_id = workflow.id;
            let workflow_name = workflow.name;
            workflow.states.into_iter().map(move |state| WorkflowStateRow {
                id: state.id,
                name: state.name,
                state_type: state.state_type,
                workflow_id,
                workflow_name: workflow_name.clone(),
            })
        })
        .collect()
}

/// Project view for the `list_projects` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct ProjectSummary {
    /// Project identifier.
    pub id: u64,

    /// Project name.
    pub name: String,

    /// Project description.
    pub description: Option<String>,

    /// Whether the project has been archived.
    pub archived: bool,
}

impl From<Project> for ProjectSummary {
    fn from(project: Project) -> Self {
        Self {
            id: project.id,
            name: project.name,
            description: project.description,
            archived: project.archived,
        }
    }
}

/// Member view for the `list_members` tool.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct MemberSummary {
    /// Member UUID.
    pub id: String,

    /// Display name, if set on the profile.
    pub name: Option<String>,

    /// @-mention handle, if set on the profile.
    pub mention_name: Option<String>,

    /// Whether the member account is disabled.
    pub disabled: bool,
}

impl From<Member> for MemberSummary {
    fn from(member: Member) -> Self {
        let profile = member.profile.unwrap_or_default();
        Self {
            id: member.id,
            name: profile.name,
            mention_name: profile.mention_name,
            disabled: member.disabled,
        }
    }
}

// ---------------------------------------------------------------------------
// Parsing helpers
// ---------------------------------------------------------------------------

/// Parse a story type string into a [`StoryType`].
///
/// # Errors
///
/// Returns [`Error::InvalidArgument`] for anything other than `feature`,
/// `bug`, or `chore`.
pub fn parse_story_type(s: &str) -> Result<StoryType> {
    match s.to_lowercase().as_str() {
        "feature" => Ok(StoryType::Feature),
        "bug" => Ok(StoryType::Bug),
        "chore" => Ok(StoryType::Chore),
        _ => Err(Error::InvalidArgument {
            field: "story_type",
            value: s.to_string(),
            valid_values: "feature, bug, chore",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use shortcut_api::domain::WorkflowState;

    #[rstest]
    #[case::feature("feature", StoryType::Feature)]
    #[case::bug("bug", StoryType::Bug)]
    #[case::chore("chore", StoryType::Chore)]
    #[case::uppercase("BUG", StoryType::Bug)]
    fn parse_story_type_accepts_known_values(#[case] input: &str, #[case] expected: StoryType) {
        assert_eq!(parse_story_type(input).unwrap(), expected);
    }

    #[rstest]
    #[case::invalid("task")]
    #[case::empty("")]
    fn parse_story_type_rejects_unknown_values(#[case] input: &str) {
        let error = parse_story_type(input).unwrap_err();
        assert!(matches!(error, Error::InvalidArgument { field: "story_type", .. }));
    }

    fn sample_story() -> Story {
        Story {
            id: 42,
            name: "Add CSV export".to_string(),
            description: Some("Export the report as CSV".to_string()),
            story_type: Some(StoryType::Feature),
            workflow_state_id: Some(500),
            estimate: Some(3),
            project_id: Some(7),
            owner_ids: vec!["uuid-1".to_string()],
            label_ids: vec![11],
            app_url: Some("https://app.shortcut.com/x/story/42".to_string()),
            created_at: Some("2024-03-01T10:00:00Z".to_string()),
            updated_at: Some("2024-03-02T10:00:00Z".to_string()),
            deadline: None,
            comments: vec![Comment {
                id: Some(1),
                text: "On it".to_string(),
                author_id: Some("uuid-1".to_string()),
                created_at: None,
                updated_at: None,
            }],
            external_links: vec![],
            archived: false,
            completed: false,
        }
    }

    #[test]
    fn story_summary_projects_list_fields() {
        let summary = StorySummary::from(sample_story());
        assert_eq!(summary.id, 42);
        assert_eq!(summary.story_type.as_deref(), Some("feature"));
        assert_eq!(summary.workflow_state_id, Some(500));

        let value = serde_json::to_value(&summary).unwrap();
        assert!(value.get("description").is_none());
        assert!(value.get("comments").is_none());
    }

    #[test]
    fn story_detail_keeps_comments_and_links() {
        let detail = StoryDetail::from(sample_story());
        assert_eq!(detail.comments.len(), 1);
        assert_eq!(detail.comments[0].text, "On it");
        assert_eq!(detail.app_url.as_deref(), Some("https://app.shortcut.com/x/story/42"));
    }

    #[test]
    fn flatten_workflows_carries_workflow_identity() {
        let workflows = vec![
            Workflow {
                id: 1,
                name: "Engineering".to_string(),
                states: vec![
                    WorkflowState {
                        id: 10,
                        name: "Ready".to_string(),
                        state_type: "unstarted".to_string(),
                    },
                    WorkflowState {
                        id: 11,
                        name: "Done".to_string(),
                        state_type: "done".to_string(),
                    },
                ],
            },
            Workflow {
                id: 2,
                name: "Design".to_string(),
                states: vec![WorkflowState {
                    id: 20,
                    name: "Review".to_string(),
                    state_type: "started".to_string(),
                }],
            },
        ];

        let rows = flatten_workflows(workflows);
        assert_eq!(rows.len(), 3);
        assert_eq!(rows[0].workflow_name, "Engineering");
        assert_eq!(rows[2].workflow_id, 2);
        assert_eq!(rows[2].state_type, "started");
    }

    #[test]
    fn flatten_workflows_handles_empty_input() {
        assert!(flatten_workflows(vec![]).is_empty());
    }

    #[test]
    fn member_summary_tolerates_missing_profile() {
        let member = Member {
            id: "uuid-9".to_string(),
            disabled: true,
            profile: None,
        };
        let summary = MemberSummary::from(member);
        assert_eq!(summary.id, "uuid-9");
        assert!(summary.name.is_none());
        assert!(summary.disabled);
    }
}

//! MCP tool implementations.
//!
//! This module contains the implementations for all MCP tools exposed by the
//! server. Each method is one or two `ShortcutClient` calls plus response
//! shaping; protocol wiring lives in [`server`](crate::server).

use crate::error::{Error, Result};
use crate::models::{
    flatten_workflows, parse_story_type, CommentReceipt, MemberSummary, ProjectSummary,
    StoryDetail, StorySummary, WorkflowStateRow, DEFAULT_TOOL_LIMIT,
};
use crate::resources::StoriesQuery;
use shortcut_api::domain::{NewLabel, NewStory, StoryFilter, StoryType, StoryUpdate};
use shortcut_api::ShortcutClient;
use std::sync::Arc;

/// Tool implementations for the Shortcut MCP server.
pub struct Tools {
    client: Arc<ShortcutClient>,
}

impl Tools {
    /// Create a new Tools instance wrapping the given client.
    pub fn new(client: Arc<ShortcutClient>) -> Self {
        Self { client }
    }

    /// List stories with optional filters.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn list_stories(
        &self,
        workflow_state_id: Option<u64>,
        project_id: Option<u64>,
        owner_id: Option<String>,
        limit: usize,
    ) -> Result<Vec<StorySummary>> {
        let filter = StoryFilter {
            workflow_state_id,
            project_id,
            owner_id,
        };

        let stories = self.client.list_stories(&filter).await?;
        Ok(truncate(stories, limit).into_iter().map(Into::into).collect())
    }

    /// Search stories with Shortcut's search syntax.
    ///
    /// # Errors
    ///
    /// Returns an error if the query is empty or the API request fails.
    pub async fn search_stories(&self, query: &str, limit: usize) -> Result<Vec<StorySummary>> {
        if query.trim().is_empty() {
            return Err(Error::InvalidArgument {
                field: "query",
                value: query.to_string(),
                valid_values: "a non-empty search string",
            });
        }

        let page_size = if limit == 0 { DEFAULT_TOOL_LIMIT } else { limit };
        let stories = self.client.search_stories(query, page_size).await?;
        Ok(stories.into_iter().map(Into::into).collect())
    }

    /// Get detailed information about a specific story.
    ///
    /// # Errors
    ///
    /// Returns an error if the story does not exist or the request fails.
    pub async fn get_story_details(&self, story_id: u64) -> Result<StoryDetail> {
        let story = self.client.get_story(story_id).await?;
        Ok(story.into())
    }

    /// Create a new story.
    ///
    /// # Errors
    ///
    /// Returns an error if the story type is invalid or the request fails.
    #[allow(clippy::too_many_arguments)]
    pub async fn create_story(
        &self,
        name: String,
        description: String,
        story_type: Option<&str>,
        project_id: Option<u64>,
        workflow_state_id: Option<u64>,
        owner_ids: Option<Vec<String>>,
        labels: Option<Vec<String>>,
    ) -> Result<StoryDetail> {
        let story_type = match story_type {
            Some(value) => parse_story_type(value)?,
            None => StoryType::Feature,
        };

        let new_story = NewStory {
            name,
            description,
            story_type,
            project_id,
            workflow_state_id,
            owner_ids,
            labels: labels.map(|names| names.into_iter().map(|name| NewLabel { name }).collect()),
        };

        let story = self.client.create_story(&new_story).await?;
        Ok(story.into())
    }

    /// Update an existing story. Only provided fields are sent.
    ///
    /// # Errors
    ///
    /// Returns an error if the story type is invalid, the story does not
    /// exist, or the request fails.
    pub async fn update_story(
        &self,
        story_id: u64,
        name: Option<String>,
        description: Option<String>,
        story_type: Option<&str>,
        workflow_state_id: Option<u64>,
        owner_ids: Option<Vec<String>>,
    ) -> Result<StoryDetail> {
        let story_type = match story_type {
            Some(value) => Some(parse_story_type(value)?),
            None => None,
        };

        let update = StoryUpdate {
            name,
            description,
            story_type,
            workflow_state_id,
            owner_ids,
        };

        let story = self.client.update_story(story_id, &update).await?;
        Ok(story.into())
    }

    /// Add a comment to a story.
    ///
    /// # Errors
    ///
    /// Returns an error if the story does not exist or the request fails.
    pub async fn add_comment(&self, story_id: u64, text: &str) -> Result<CommentReceipt> {
        let comment = self.client.add_comment(story_id, text).await?;
        Ok(CommentReceipt {
            success: true,
            message: "Comment added successfully".to_string(),
            comment: comment.into(),
        })
    }

    /// List all workflow states in the workspace, flattened across workflows.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn list_workflow_states(&self) -> Result<Vec<WorkflowStateRow>> {
        let workflows = self.client.list_workflows().await?;
        Ok(flatten_workflows(workflows))
    }

    /// List all projects in the workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn list_projects(&self) -> Result<Vec<ProjectSummary>> {
        let projects = self.client.list_projects().await?;
        Ok(projects.into_iter().map(Into::into).collect())
    }

    /// List all workspace members.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn list_members(&self) -> Result<Vec<MemberSummary>> {
        let members = self.client.list_members().await?;
        Ok(members.into_iter().map(Into::into).collect())
    }

    /// Serve the story list resource.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    pub async fn stories_resource(&self, query: &StoriesQuery) -> Result<Vec<StorySummary>> {
        self.list_stories(query.workflow_state_id, query.project_id, None, query.limit)
            .await
    }
}

/// Truncate a result list; a limit of 0 means no cap.
fn truncate<T>(mut items: Vec<T>, limit: usize) -> Vec<T> {
    if limit > 0 {
        items.truncate(limit);
    }
    items
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn truncate_caps_at_limit() {
        assert_eq!(truncate(vec![1, 2, 3, 4], 2), vec![1, 2]);
    }

    #[test]
    fn truncate_zero_keeps_everything() {
        assert_eq!(truncate(vec![1, 2, 3], 0), vec![1, 2, 3]);
    }

    #[test]
    fn truncate_beyond_length_is_a_noop() {
        assert_eq!(truncate(vec![1], 10), vec![1]);
    }
}

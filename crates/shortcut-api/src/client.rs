//! HTTP client for the Shortcut API.
//!
//! Thin wrapper over [`reqwest`]: every method maps to one endpoint, sends
//! the `Shortcut-Token` header, and deserializes the JSON response into a
//! [`domain`](crate::domain) record. Non-success responses are forwarded as
//! [`Error::Api`] with the body intact; there is no retry or caching layer.

use crate::config::Config;
use crate::domain::{
    Comment, Member, NewStory, Project, SearchResults, Story, StoryFilter, StoryUpdate, Workflow,
};
use crate::error::{Error, Result};
use reqwest::header::{HeaderMap, HeaderValue, CONTENT_TYPE};
use reqwest::{Response, StatusCode};
use serde::de::DeserializeOwned;
use tracing::debug;
use url::Url;

/// Header carrying the workspace API token.
const TOKEN_HEADER: &str = "Shortcut-Token";

/// Client for the Shortcut v3 REST API.
#[derive(Debug, Clone)]
pub struct ShortcutClient {
    http: reqwest::Client,
    base_url: Url,
}

impl ShortcutClient {
    /// Create a client from the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if the token is not a valid header value, the base
    /// URL does not parse, or the underlying HTTP client cannot be built.
    pub fn new(config: &Config) -> Result<Self> {
        let mut token = HeaderValue::from_str(&config.api_token).map_err(|_| Error::InvalidToken)?;
        token.set_sensitive(true);

        let mut headers = HeaderMap::new();
        headers.insert(TOKEN_HEADER, token);
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let http = reqwest::Client::builder()
            .default_headers(headers)
            .timeout(config.timeout)
            .build()?;

        let base_url = Url::parse(&config.base_url)?;

        Ok(Self { http, base_url })
    }

    /// List stories, optionally filtered by workflow state, project, or owner.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers non-2xx.
    pub async fn list_stories(&self, filter: &StoryFilter) -> Result<Vec<Story>> {
        let url = self.endpoint("stories")?;
        debug!(query = ?filter, "listing stories");
        let response = self.http.get(url).query(&filter.to_query()).send().await?;
        into_json(response).await
    }

    /// Search stories with Shortcut's search syntax.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers non-2xx.
    pub async fn search_stories(&self, query: &str, page_size: usize) -> Result<Vec<Story>> {
        let url = self.endpoint("search/stories")?;
        debug!(%query, page_size, "searching stories");
        let page_size = page_size.to_string();
        let response = self
            .http
            .get(url)
            .query(&[("query", query), ("page_size", page_size.as_str())])
            .send()
            .await?;
        let results: SearchResults = into_json(response).await?;
        Ok(results.data)
    }

    /// Fetch a single story by id.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoryNotFound`] for a 404, otherwise the usual
    /// request/response errors.
    pub async fn get_story(&self, story_id: u64) -> Result<Story> {
        let url = self.endpoint(&format!("stories/{story_id}"))?;
        debug!(story_id, "fetching story");
        let response = self.http.get(url).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::StoryNotFound(story_id));
        }
        into_json(response).await
    }

    /// Create a new story.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers non-2xx.
    pub async fn create_story(&self, story: &NewStory) -> Result<Story> {
        let url = self.endpoint("stories")?;
        debug!(name = %story.name, "creating story");
        let response = self.http.post(url).json(story).send().await?;
        into_json(response).await
    }

    /// Update an existing story. Only the fields set in `update` are sent.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoryNotFound`] for a 404, otherwise the usual
    /// request/response errors.
    pub async fn update_story(&self, story_id: u64, update: &StoryUpdate) -> Result<Story> {
        let url = self.endpoint(&format!("stories/{story_id}"))?;
        debug!(story_id, "updating story");
        let response = self.http.put(url).json(update).send().await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::StoryNotFound(story_id));
        }
        into_json(response).await
    }

    /// Add a comment to a story.
    ///
    /// # Errors
    ///
    /// Returns [`Error::StoryNotFound`] for a 404, otherwise the usual
    /// request/response errors.
    pub async fn add_comment(&self, story_id: u64, text: &str) -> Result<Comment> {
        let url = self.endpoint(&format!("stories/{story_id}/comments"))?;
        debug!(story_id, "adding comment");
        let response = self
            .http
            .post(url)
            .json(&serde_json::json!({ "text": text }))
            .send()
            .await?;
        if response.status() == StatusCode::NOT_FOUND {
            return Err(Error::StoryNotFound(story_id));
        }
        into_json(response).await
    }

    /// List all workflows with their states.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers non-2xx.
    pub async fn list_workflows(&self) -> Result<Vec<Workflow>> {
        let url = self.endpoint("workflows")?;
        debug!("listing workflows");
        let response = self.http.get(url).send().await?;
        into_json(response).await
    }

    /// List all projects in the workspace.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers non-2xx.
    pub async fn list_projects(&self) -> Result<Vec<Project>> {
        let url = self.endpoint("projects")?;
        debug!("listing projects");
        let response = self.http.get(url).send().await?;
        into_json(response).await
    }

    /// List all workspace members.
    ///
    /// # Errors
    ///
    /// Returns an error if the request fails or the API answers non-2xx.
    pub async fn list_members(&self) -> Result<Vec<Member>> {
        let url = self.endpoint("members")?;
        debug!("listing members");
        let response = self.http.get(url).send().await?;
        into_json(response).await
    }

    /// Build the full URL for an API path.
    ///
    /// Plain string joining: `Url::join` would drop the `/api/v3` suffix of
    /// the base URL for relative paths.
    fn endpoint(&self, path: &str) -> Result<Url> {
        let joined = format!(
            "{}/{}",
            self.base_url.as_str().trim_end_matches('/'),
            path.trim_start_matches('/')
        );
        Ok(Url::parse(&joined)?)
    }
}

/// Check the response status and deserialize the body.
async fn into_json<T: DeserializeOwned>(response: Response) -> Result<T> {
    let status = response.status();
    if !status.is_success() {
        let body = response.text().await.unwrap_or_default();
        debug!(status = status.as_u16(), %body, "API request failed");
        return Err(Error::Api {
            status: status.as_u16(),
            body,
        });
    }
    Ok(response.json().await?)
}

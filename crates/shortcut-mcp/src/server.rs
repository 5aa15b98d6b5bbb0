//! MCP server implementation.
//!
//! This module contains the main server setup using rmcp. Tools are routed
//! through the `#[tool_router]` macro; the resource and prompt capabilities
//! are implemented directly on the [`ServerHandler`] impl.

use crate::error::Error;
use crate::models::{
    AddCommentParams, CreateStoryParams, GetStoryParams, ListStoriesParams, SearchStoriesParams,
    UpdateStoryParams, DEFAULT_TOOL_LIMIT,
};
use crate::prompts;
use crate::resources::{self, ResourceRequest};
use crate::tools::Tools;
use rmcp::handler::server::router::tool::ToolRouter;
use rmcp::handler::server::wrapper::Parameters;
use rmcp::model::{
    AnnotateAble, CallToolResult, Content, GetPromptRequestParam, GetPromptResult, Implementation,
    ListPromptsResult, ListResourceTemplatesResult, ListResourcesResult, PaginatedRequestParam,
    Prompt, PromptArgument, PromptMessage, PromptMessageRole, ProtocolVersion, RawResource,
    RawResourceTemplate, ReadResourceRequestParam, ReadResourceResult, ResourceContents,
    ServerCapabilities, ServerInfo,
};
use rmcp::service::{RequestContext, RoleServer};
use rmcp::transport::stdio;
use rmcp::{
    handler::server::ServerHandler, tool, tool_handler, tool_router, ErrorData as McpError,
    ServiceExt,
};
use shortcut_api::ShortcutClient;
use std::sync::Arc;

/// The Shortcut MCP server.
///
/// Provides MCP protocol handling over stdio transport.
#[derive(Clone)]
pub struct ShortcutMcpServer {
    /// Tool implementations.
    tools: Arc<Tools>,
    /// Tool router for MCP dispatch.
    tool_router: ToolRouter<Self>,
}

#[tool_router]
impl ShortcutMcpServer {
    /// List stories with optional filters.
    #[tool(
        description = "List stories from Shortcut with optional filtering by workflow state, project, or owner."
    )]
    async fn list_stories(
        &self,
        Parameters(params): Parameters<ListStoriesParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .tools
            .list_stories(
                params.workflow_state_id,
                params.project_id,
                params.owner_id,
                params.limit.unwrap_or(DEFAULT_TOOL_LIMIT),
            )
            .await
        {
            Ok(stories) => Ok(CallToolResult::success(vec![Content::json(stories)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Search for stories.
    #[tool(description = "Search for stories in Shortcut using Shortcut's search syntax.")]
    async fn search_stories(
        &self,
        Parameters(params): Parameters<SearchStoriesParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .tools
            .search_stories(&params.query, params.limit.unwrap_or(DEFAULT_TOOL_LIMIT))
            .await
        {
            Ok(stories) => Ok(CallToolResult::success(vec![Content::json(stories)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Get details for a specific story.
    #[tool(
        description = "Get detailed information about a specific story, including comments and external links."
    )]
    async fn get_story_details(
        &self,
        Parameters(params): Parameters<GetStoryParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.get_story_details(params.story_id).await {
            Ok(story) => Ok(CallToolResult::success(vec![Content::json(story)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Create a new story.
    #[tool(
        description = "Create a new story (feature, bug, or chore) with optional project, workflow state, owners, and labels."
    )]
    async fn create_story(
        &self,
        Parameters(params): Parameters<CreateStoryParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .tools
            .create_story(
                params.name,
                params.description,
                params.story_type.as_deref(),
                params.project_id,
                params.workflow_state_id,
                params.owner_ids,
                params.labels,
            )
            .await
        {
            Ok(story) => Ok(CallToolResult::success(vec![Content::json(story)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Update an existing story.
    #[tool(
        description = "Update an existing story's name, description, type, workflow state, or owners."
    )]
    async fn update_story(
        &self,
        Parameters(params): Parameters<UpdateStoryParams>,
    ) -> Result<CallToolResult, McpError> {
        match self
            .tools
            .update_story(
                params.story_id,
                params.name,
                params.description,
                params.story_type.as_deref(),
                params.workflow_state_id,
                params.owner_ids,
            )
            .await
        {
            Ok(story) => Ok(CallToolResult::success(vec![Content::json(story)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// Add a comment to a story.
    #[tool(description = "Add a comment to a story in Shortcut.")]
    async fn add_comment(
        &self,
        Parameters(params): Parameters<AddCommentParams>,
    ) -> Result<CallToolResult, McpError> {
        match self.tools.add_comment(params.story_id, &params.text).await {
            Ok(receipt) => Ok(CallToolResult::success(vec![Content::json(receipt)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// List all workflow states.
    #[tool(
        description = "List all workflow states in the Shortcut workspace, with the workflow each state belongs to."
    )]
    async fn list_workflow_states(&self) -> Result<CallToolResult, McpError> {
        match self.tools.list_workflow_states().await {
            Ok(states) => Ok(CallToolResult::success(vec![Content::json(states)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// List all projects.
    #[tool(description = "List all projects in the Shortcut workspace.")]
    async fn list_projects(&self) -> Result<CallToolResult, McpError> {
        match self.tools.list_projects().await {
            Ok(projects) => Ok(CallToolResult::success(vec![Content::json(projects)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }

    /// List all workspace members.
    #[tool(description = "List all members of the Shortcut workspace with their mention names.")]
    async fn list_members(&self) -> Result<CallToolResult, McpError> {
        match self.tools.list_members().await {
            Ok(members) => Ok(CallToolResult::success(vec![Content::json(members)?])),
            Err(e) => Err(McpError::internal_error(e.to_string(), None)),
        }
    }
}

impl ShortcutMcpServer {
    /// Create a new Shortcut MCP server around the given API client.
    #[must_use]
    pub fn new(client: ShortcutClient) -> Self {
        Self {
            tools: Arc::new(Tools::new(Arc::new(client))),
            tool_router: Self::tool_router(),
        }
    }

    /// Run the server over stdio transport until the client disconnects.
    ///
    /// # Errors
    ///
    /// Returns an error if the transport fails to initialize or the service
    /// terminates abnormally.
    pub async fn run(self) -> anyhow::Result<()> {
        let service = self.serve(stdio()).await?;
        service.waiting().await?;
        Ok(())
    }
}

/// The prompts this server advertises.
fn prompt_descriptors() -> Vec<Prompt> {
    vec![
        Prompt::new(
            prompts::BUG_REPORT,
            Some("Create a bug report template"),
            Some(vec![
                prompt_arg("title", "Bug title"),
                prompt_arg("steps", "Steps to reproduce"),
                prompt_arg("expected", "Expected behavior"),
                prompt_arg("actual", "Actual behavior"),
            ]),
        ),
        Prompt::new(
            prompts::FEATURE_REQUEST,
            Some("Create a feature request template"),
            Some(vec![
                prompt_arg("title", "Feature title"),
                prompt_arg("description", "Description of the feature"),
                prompt_arg("user_value", "Value to users"),
                prompt_arg("acceptance_criteria", "Acceptance criteria"),
            ]),
        ),
    ]
}

fn prompt_arg(name: &str, description: &str) -> PromptArgument {
    PromptArgument {
        name: name.to_string(),
        title: None,
        description: Some(description.to_string()),
        required: Some(true),
    }
}

fn invalid_params(error: Error) -> McpError {
    McpError::invalid_params(error.to_string(), None)
}

fn internal_error(error: Error) -> McpError {
    McpError::internal_error(error.to_string(), None)
}

#[tool_handler]
impl ServerHandler for ShortcutMcpServer {
    fn get_info(&self) -> ServerInfo {
        ServerInfo {
            protocol_version: ProtocolVersion::V_2024_11_05,
            capabilities: ServerCapabilities::builder()
                .enable_tools()
                .enable_resources()
                .enable_prompts()
                .build(),
            server_info: Implementation {
                name: "shortcut-mcp".into(),
                version: env!("CARGO_PKG_VERSION").into(),
                title: None,
                icons: None,
                website_url: None,
            },
            instructions: Some(
                "Shortcut MCP server for ticket management. Use the story tools to list, \
                 search, create, and update stories; list_workflow_states and list_projects \
                 provide the ids the story tools take as filters."
                    .into(),
            ),
        }
    }

    async fn list_resources(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourcesResult, McpError> {
        let mut stories = RawResource::new(resources::STORIES_URI, "stories");
        stories.description = Some(
            "Stories in the workspace. Supports workflow_state_id, project_id, and limit query parameters."
                .to_string(),
        );
        stories.mime_type = Some("application/json".to_string());

        Ok(ListResourcesResult {
            next_cursor: None,
            resources: vec![stories.no_annotation()],
        })
    }

    async fn list_resource_templates(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListResourceTemplatesResult, McpError> {
        let story = RawResourceTemplate {
            uri_template: resources::STORY_URI_TEMPLATE.to_string(),
            name: "story".to_string(),
            title: None,
            description: Some("A single story by id, including comments".to_string()),
            mime_type: Some("application/json".to_string()),
        };

        Ok(ListResourceTemplatesResult {
            next_cursor: None,
            resource_templates: vec![story.no_annotation()],
        })
    }

    async fn read_resource(
        &self,
        request: ReadResourceRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<ReadResourceResult, McpError> {
        let payload = match resources::parse_uri(&request.uri) {
            Ok(ResourceRequest::Stories(query)) => {
                let stories = self
                    .tools
                    .stories_resource(&query)
                    .await
                    .map_err(internal_error)?;
                serde_json::to_string_pretty(&stories)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?
            }
            Ok(ResourceRequest::Story(story_id)) => {
                let story = self
                    .tools
                    .get_story_details(story_id)
                    .await
                    .map_err(internal_error)?;
                serde_json::to_string_pretty(&story)
                    .map_err(|e| McpError::internal_error(e.to_string(), None))?
            }
            Err(e) => return Err(invalid_params(e)),
        };

        Ok(ReadResourceResult {
            contents: vec![ResourceContents::text(payload, request.uri)],
        })
    }

    async fn list_prompts(
        &self,
        _request: Option<PaginatedRequestParam>,
        _context: RequestContext<RoleServer>,
    ) -> Result<ListPromptsResult, McpError> {
        Ok(ListPromptsResult {
            next_cursor: None,
            prompts: prompt_descriptors(),
        })
    }

    async fn get_prompt(
        &self,
        request: GetPromptRequestParam,
        _context: RequestContext<RoleServer>,
    ) -> Result<GetPromptResult, McpError> {
        let arguments = request.arguments.as_ref();

        let (description, text) = match request.name.as_str() {
            prompts::BUG_REPORT => {
                let title = prompts::required_arg(arguments, "title").map_err(invalid_params)?;
                let steps = prompts::required_arg(arguments, "steps").map_err(invalid_params)?;
                let expected =
                    prompts::required_arg(arguments, "expected").map_err(invalid_params)?;
                let actual = prompts::required_arg(arguments, "actual").map_err(invalid_params)?;
                (
                    "Bug report template",
                    prompts::render_bug_report(title, steps, expected, actual),
                )
            }
            prompts::FEATURE_REQUEST => {
                let title = prompts::required_arg(arguments, "title").map_err(invalid_params)?;
                let description =
                    prompts::required_arg(arguments, "description").map_err(invalid_params)?;
                let user_value =
                    prompts::required_arg(arguments, "user_value").map_err(invalid_params)?;
                let acceptance_criteria = prompts::required_arg(arguments, "acceptance_criteria")
                    .map_err(invalid_params)?;
                (
                    "Feature request template",
                    prompts::render_feature_request(title, description, user_value, acceptance_criteria),
                )
            }
            other => {
                return Err(invalid_params(Error::UnknownPrompt(other.to_string())));
            }
        };

        Ok(GetPromptResult {
            description: Some(description.to_string()),
            messages: vec![PromptMessage::new_text(PromptMessageRole::User, text)],
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use shortcut_api::config::DEFAULT_BASE_URL;
    use shortcut_api::Config;
    use std::time::Duration;

    fn test_server() -> ShortcutMcpServer {
        let config = Config {
            api_token: "test-token".to_string(),
            base_url: DEFAULT_BASE_URL.to_string(),
            server_host: "127.0.0.1".to_string(),
            server_port: 5000,
            timeout: Duration::from_secs(5),
        };
        let client = ShortcutClient::new(&config).expect("client should build");
        ShortcutMcpServer::new(client)
    }

    #[test]
    fn server_info_advertises_all_capabilities() {
        let server = test_server();
        let info = server.get_info();
        assert_eq!(info.server_info.name, "shortcut-mcp");
        assert!(!info.server_info.version.is_empty());
        assert!(info.capabilities.tools.is_some());
        assert!(info.capabilities.resources.is_some());
        assert!(info.capabilities.prompts.is_some());
        assert!(info.instructions.is_some());
    }

    #[test]
    fn tool_router_has_all_tools() {
        let server = test_server();
        let tools = server.tool_router.list_all();

        let tool_names: Vec<&str> = tools.iter().map(|t| &*t.name).collect();

        assert!(tool_names.contains(&"list_stories"));
        assert!(tool_names.contains(&"search_stories"));
        assert!(tool_names.contains(&"get_story_details"));
        assert!(tool_names.contains(&"create_story"));
        assert!(tool_names.contains(&"update_story"));
        assert!(tool_names.contains(&"add_comment"));
        assert!(tool_names.contains(&"list_workflow_states"));
        assert!(tool_names.contains(&"list_projects"));
        assert!(tool_names.contains(&"list_members"));
        assert_eq!(tools.len(), 9);
    }

    #[test]
    fn prompt_descriptors_cover_both_templates() {
        let descriptors = prompt_descriptors();
        assert_eq!(descriptors.len(), 2);

        let bug_report = &descriptors[0];
        assert_eq!(bug_report.name, prompts::BUG_REPORT);
        assert_eq!(bug_report.arguments.as_ref().map(Vec::len), Some(4));

        let feature_request = &descriptors[1];
        assert_eq!(feature_request.name, prompts::FEATURE_REQUEST);
        assert_eq!(feature_request.arguments.as_ref().map(Vec::len), Some(4));
    }
}

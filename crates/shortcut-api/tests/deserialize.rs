//! Deserialization tests against captured Shortcut API payloads.
//!
//! The fixtures are trimmed copies of real v3 responses, kept with the
//! extra fields the API sends so the records prove they tolerate them.

use shortcut_api::domain::{Member, Project, SearchResults, Story, StoryType, Workflow};

const STORY_JSON: &str = r#"{
    "id": 123,
    "name": "Fix login timeout",
    "description": "Sessions expire after five minutes instead of one hour.",
    "story_type": "bug",
    "workflow_state_id": 500000008,
    "estimate": 2,
    "project_id": 14,
    "owner_ids": ["12345678-9012-3456-7890-123456789012"],
    "label_ids": [3],
    "app_url": "https://app.shortcut.com/example/story/123",
    "created_at": "2024-03-01T10:15:00Z",
    "updated_at": "2024-03-04T16:20:00Z",
    "deadline": null,
    "comments": [
        {
            "id": 9001,
            "text": "Reproduced on staging.",
            "author_id": "12345678-9012-3456-7890-123456789012",
            "created_at": "2024-03-02T09:00:00Z",
            "updated_at": "2024-03-02T09:00:00Z",
            "app_url": "https://app.shortcut.com/example/story/123#activity-9001"
        }
    ],
    "external_links": ["https://github.com/example/app/issues/77"],
    "archived": false,
    "completed": false,
    "blocked": false,
    "position": 4611686018427387904,
    "requested_by_id": "87654321-0987-6543-2109-876543210987"
}"#;

#[test]
fn story_deserializes_with_extra_fields() {
    let story: Story = serde_json::from_str(STORY_JSON).unwrap();
    assert_eq!(story.id, 123);
    assert_eq!(story.name, "Fix login timeout");
    assert_eq!(story.story_type, Some(StoryType::Bug));
    assert_eq!(story.workflow_state_id, Some(500_000_008));
    assert_eq!(story.owner_ids.len(), 1);
    assert_eq!(story.comments.len(), 1);
    assert_eq!(story.comments[0].text, "Reproduced on staging.");
    assert!(story.deadline.is_none());
    assert!(!story.archived);
}

#[test]
fn minimal_story_deserializes_with_defaults() {
    let story: Story = serde_json::from_str(r#"{"id": 7, "name": "Spike"}"#).unwrap();
    assert_eq!(story.id, 7);
    assert!(story.story_type.is_none());
    assert!(story.owner_ids.is_empty());
    assert!(story.comments.is_empty());
}

#[test]
fn workflow_states_deserialize_nested() {
    let json = r#"[{
        "id": 500000000,
        "name": "Engineering",
        "auto_assign_owner": false,
        "states": [
            {"id": 500000007, "name": "Ready", "type": "unstarted", "num_stories": 12},
            {"id": 500000008, "name": "In Progress", "type": "started", "num_stories": 3},
            {"id": 500000009, "name": "Done", "type": "done", "num_stories": 40}
        ]
    }]"#;

    let workflows: Vec<Workflow> = serde_json::from_str(json).unwrap();
    assert_eq!(workflows.len(), 1);
    assert_eq!(workflows[0].name, "Engineering");
    assert_eq!(workflows[0].states.len(), 3);
    assert_eq!(workflows[0].states[1].state_type, "started");
}

#[test]
fn search_envelope_unwraps_data() {
    let json = r#"{
        "data": [{"id": 1, "name": "First"}, {"id": 2, "name": "Second"}],
        "next": "/api/v3/search/stories?query=login&next=abc",
        "total": 41
    }"#;

    let results: SearchResults = serde_json::from_str(json).unwrap();
    assert_eq!(results.data.len(), 2);
    assert_eq!(results.total, Some(41));
    assert!(results.next.is_some());
}

#[test]
fn project_and_member_deserialize() {
    let project: Project = serde_json::from_str(
        r#"{"id": 14, "name": "Backend", "description": "API work", "archived": false, "team_id": 2}"#,
    )
    .unwrap();
    assert_eq!(project.name, "Backend");
    assert!(!project.archived);

    let member: Member = serde_json::from_str(
        r#"{
            "id": "12345678-9012-3456-7890-123456789012",
            "disabled": false,
            "role": "member",
            "profile": {
                "name": "Jordan Park",
                "mention_name": "jordan",
                "email_address": "jordan@example.com",
                "deactivated": false
            }
        }"#,
    )
    .unwrap();
    let profile = member.profile.unwrap();
    assert_eq!(profile.mention_name.as_deref(), Some("jordan"));
}

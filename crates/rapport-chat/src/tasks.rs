//! Task-list lookup against the Todoist REST API.
//!
//! One bearer-authenticated request per invocation. At most the first
//! five entries of the response are kept, and only those shaped as
//! objects with a string `content` field.

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde_json::Value;

use crate::error::LookupError;
use crate::router::TaskLookup;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// How many tasks are considered before filtering.
const MAX_TASKS: usize = 5;

/// Todoist REST v2 client.
pub struct TodoistClient {
    client: Client,
    api_key: String,
    base_url: String,
}

impl TodoistClient {
    pub fn new(api_key: String, base_url: String) -> Self {
        let client = Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .expect("Failed to create HTTP client");
        Self {
            client,
            api_key,
            base_url,
        }
    }

    /// Fetch the task list and reduce it to displayable content lines.
    async fn list(&self) -> Result<Vec<String>, LookupError> {
        let response = self
            .client
            .get(&self.base_url)
            .bearer_auth(&self.api_key)
            .send()
            .await
            .map_err(|e| LookupError::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            return Err(LookupError::Status(status.as_u16()));
        }

        let body: Value = response
            .json()
            .await
            .map_err(|e| LookupError::Parse(e.to_string()))?;

        collect_contents(&body)
    }
}

#[async_trait]
impl TaskLookup for TodoistClient {
    async fn fetch(&self) -> String {
        match self.list().await {
            Ok(tasks) => render(&tasks),
            Err(e) => {
                tracing::warn!(error = %e, "Task lookup failed");
                failure_text(&e)
            }
        }
    }
}

/// Pull the `content` of the first [`MAX_TASKS`] well-formed entries.
///
/// Entries without the expected shape are skipped silently; a body
/// that is not a list at all is a shape error.
pub fn collect_contents(body: &Value) -> Result<Vec<String>, LookupError> {
    let tasks = body
        .as_array()
        .ok_or_else(|| LookupError::Shape("response is not a list".to_string()))?;

    Ok(tasks
        .iter()
        .take(MAX_TASKS)
        .filter_map(|task| task.get("content")?.as_str())
        .map(str::to_string)
        .collect())
}

/// Render the bullet list, or the no-valid-tasks message.
pub fn render(tasks: &[String]) -> String {
    if tasks.is_empty() {
        return "No valid tasks found in your Todoist!".to_string();
    }
    let mut lines = vec!["Here are your upcoming tasks:".to_string()];
    lines.extend(tasks.iter().map(|t| format!("- {}", t)));
    lines.join("\n")
}

/// Map a lookup failure onto the user-facing message.
pub fn failure_text(err: &LookupError) -> String {
    match err {
        LookupError::Status(code) => format!("Todoist API error: Status {}", code),
        LookupError::Parse(_) => "Invalid response format from Todoist".to_string(),
        LookupError::Shape(_) => "Unexpected response format from Todoist".to_string(),
        other => format!("Error getting tasks: {}", other),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_client_builds_with_timeout() {
        let _client = TodoistClient::new(
            "token".to_string(),
            "https://api.todoist.com/rest/v2/tasks".to_string(),
        );
    }

    #[test]
    fn test_collect_skips_malformed_entries() {
        let body = json!([
            { "content": "Buy milk" },
            { "content": "Call Bob" },
            { "notcontent": "x" },
        ]);
        let tasks = collect_contents(&body).unwrap();
        assert_eq!(tasks, vec!["Buy milk", "Call Bob"]);
    }

    #[test]
    fn test_collect_takes_first_five_before_filtering() {
        let body = json!([
            { "content": "1" },
            { "notcontent": "x" },
            { "content": "2" },
            { "content": "3" },
            { "content": "4" },
            { "content": "5" },
            { "content": "6" },
        ]);
        // The window is the first five entries, then the filter runs,
        // so the malformed second entry costs a slot.
        let tasks = collect_contents(&body).unwrap();
        assert_eq!(tasks, vec!["1", "2", "3", "4"]);
    }

    #[test]
    fn test_collect_non_string_content_skipped() {
        let body = json!([
            { "content": 42 },
            { "content": "Real task" },
        ]);
        let tasks = collect_contents(&body).unwrap();
        assert_eq!(tasks, vec!["Real task"]);
    }

    #[test]
    fn test_collect_non_list_is_shape_error() {
        let body = json!({ "error": "not today" });
        let err = collect_contents(&body).unwrap_err();
        assert!(matches!(err, LookupError::Shape(_)));
    }

    #[test]
    fn test_collect_empty_list() {
        let tasks = collect_contents(&json!([])).unwrap();
        assert!(tasks.is_empty());
    }

    #[test]
    fn test_render_bullets() {
        let rendered = render(&["Buy milk".to_string(), "Call Bob".to_string()]);
        assert_eq!(
            rendered,
            "Here are your upcoming tasks:\n- Buy milk\n- Call Bob"
        );
    }

    #[test]
    fn test_render_empty_is_no_valid_tasks() {
        assert_eq!(render(&[]), "No valid tasks found in your Todoist!");
    }

    #[test]
    fn test_failure_text_status() {
        let err = LookupError::Status(403);
        assert_eq!(failure_text(&err), "Todoist API error: Status 403");
    }

    #[test]
    fn test_failure_text_parse() {
        let err = LookupError::Parse("expected value".to_string());
        assert_eq!(failure_text(&err), "Invalid response format from Todoist");
    }

    #[test]
    fn test_failure_text_shape() {
        let err = LookupError::Shape("response is not a list".to_string());
        assert_eq!(failure_text(&err), "Unexpected response format from Todoist");
    }

    #[test]
    fn test_failure_text_transport() {
        let err = LookupError::Transport("timed out".to_string());
        let text = failure_text(&err);
        assert!(text.starts_with("Error getting tasks:"));
        assert!(text.contains("timed out"));
    }

    #[test]
    fn test_end_to_end_payload_rendering() {
        let body = json!([
            { "id": "1", "content": "Buy milk", "priority": 1 },
            { "id": "2", "content": "Call Bob", "priority": 4 },
            { "notcontent": "x" },
        ]);
        let rendered = render(&collect_contents(&body).unwrap());
        assert!(rendered.contains("- Buy milk"));
        assert!(rendered.contains("- Call Bob"));
        assert!(!rendered.contains("x"));
    }
}

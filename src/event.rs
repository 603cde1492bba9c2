use std::fs;
use std::path::Path;

use serde::Deserialize;

use crate::error::AssignmentError;

/// The webhook payload delivered for a pull request event, read from the
/// file the workflow runner points `GITHUB_EVENT_PATH` at. Only the fields
/// the assignment run needs are deserialized.
#[derive(Debug, Deserialize)]
pub struct PullRequestEvent {
    pub action: Option<String>,
    pub pull_request: Option<PullRequest>,
    pub repository: Option<Repository>,
}

#[derive(Debug, Deserialize, Clone)]
pub struct PullRequest {
    pub number: u64,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Repository {
    pub name: String,
    pub owner: Owner,
}

#[derive(Debug, Deserialize, Clone)]
pub struct Owner {
    pub login: String,
}

/// The read-only trigger context for one run: which pull request, in which
/// repository, the selection applies to.
#[derive(Debug, Clone)]
pub struct PullRequestContext {
    pub owner: String,
    pub repo: String,
    pub number: u64,
}

impl PullRequestEvent {
    pub fn from_path(path: &Path) -> Result<Self, AssignmentError> {
        let payload = fs::read_to_string(path).map_err(|e| {
            AssignmentError::Configuration(format!(
                "failed to read event payload {}: {}",
                path.display(),
                e
            ))
        })?;
        Self::from_json(&payload)
    }

    pub fn from_json(payload: &str) -> Result<Self, AssignmentError> {
        serde_json::from_str(payload).map_err(|e| {
            AssignmentError::Configuration(format!("failed to parse event payload: {}", e))
        })
    }

    /// Only newly opened pull requests get a reviewer assigned; every other
    /// action on the event is skipped, not failed.
    pub fn is_opened(&self) -> bool {
        self.action.as_deref() == Some("opened")
    }

    pub fn pull_request_context(&self) -> Result<PullRequestContext, AssignmentError> {
        let pull_request = self.pull_request.as_ref().ok_or_else(|| {
            AssignmentError::Configuration("event payload has no pull_request".to_string())
        })?;
        let repository = self.repository.as_ref().ok_or_else(|| {
            AssignmentError::Configuration("event payload has no repository".to_string())
        })?;

        Ok(PullRequestContext {
            owner: repository.owner.login.clone(),
            repo: repository.name.clone(),
            number: pull_request.number,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const OPENED_PAYLOAD: &str = r#"{
        "action": "opened",
        "pull_request": { "number": 42 },
        "repository": { "name": "app", "owner": { "login": "org" } }
    }"#;

    #[test]
    fn test_parse_opened_event() {
        let event = PullRequestEvent::from_json(OPENED_PAYLOAD).unwrap();
        assert!(event.is_opened());

        let context = event.pull_request_context().unwrap();
        assert_eq!(context.owner, "org");
        assert_eq!(context.repo, "app");
        assert_eq!(context.number, 42);
    }

    #[test]
    fn test_non_opened_action_is_not_assignable() {
        let event = PullRequestEvent::from_json(
            r#"{ "action": "synchronize", "pull_request": { "number": 1 } }"#,
        )
        .unwrap();
        assert!(!event.is_opened());
    }

    #[test]
    fn test_missing_pull_request_is_configuration_error() {
        let event = PullRequestEvent::from_json(r#"{ "action": "opened" }"#).unwrap();
        assert!(matches!(
            event.pull_request_context(),
            Err(AssignmentError::Configuration(_))
        ));
    }

    #[test]
    fn test_malformed_payload_is_configuration_error() {
        assert!(matches!(
            PullRequestEvent::from_json("not json"),
            Err(AssignmentError::Configuration(_))
        ));
    }
}

use std::env;
use std::path::PathBuf;

use crate::error::AssignmentError;
use crate::github::DEFAULT_API_BASE_URL;

pub const DEFAULT_REVIEW_LABEL: &str = "assigned-review";

#[derive(Clone)]
pub struct Config {
    /// Bearer credential for all GitHub API calls.
    pub github_token: String,
    /// Organization whose team directory is searched.
    pub organization: String,
    /// Display name of the parent team; its sub-teams are the candidate pool.
    pub parent_team: String,
    /// Label applied to the pull request after the review is requested.
    pub review_label: String,
    /// API root, overridable for GitHub Enterprise.
    pub api_base_url: String,
    /// Path to the triggering event payload.
    pub event_path: PathBuf,
}

impl Config {
    pub fn from_env() -> Result<Self, AssignmentError> {
        let github_token = require("GITHUB_TOKEN")?;
        let organization = require("GITHUB_ORG")?;
        let parent_team = require("PARENT_TEAM")?;
        let event_path = PathBuf::from(require("GITHUB_EVENT_PATH")?);

        let review_label = review_label_or_default(env::var("REVIEW_LABEL").ok());

        let api_base_url = env::var("GITHUB_API_URL")
            .unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string());

        Ok(Config {
            github_token,
            organization,
            parent_team,
            review_label,
            api_base_url,
            event_path,
        })
    }
}

fn require(name: &str) -> Result<String, AssignmentError> {
    env::var(name).map_err(|_| {
        AssignmentError::Configuration(format!("{} environment variable is required", name))
    })
}

/// Resolve the review label from an optional raw value.
///
/// Missing, empty, or whitespace-only values fall back to the default label
/// rather than producing a label GitHub would reject.
pub fn review_label_or_default(value: Option<String>) -> String {
    value
        .filter(|s| !s.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_REVIEW_LABEL.to_string())
}

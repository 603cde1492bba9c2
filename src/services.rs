use anyhow::Result;
use async_trait::async_trait;

use crate::github::{Team, TeamMember};

/// Read side of the organization directory: team listing and team rosters.
///
/// Implemented by the real GitHub client and by in-memory doubles in tests.
#[async_trait]
pub trait DirectoryService: Send + Sync {
    async fn list_teams(&self, org: &str) -> Result<Vec<Team>>;

    async fn list_team_members(&self, org: &str, team_slug: &str) -> Result<Vec<TeamMember>>;
}

/// Write side against the repository that owns the pull request.
#[async_trait]
pub trait RepositoryService: Send + Sync {
    async fn request_team_review(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        team_slug: &str,
    ) -> Result<()>;

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<()>;
}

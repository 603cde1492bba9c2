use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{error, info};

use crate::services::{DirectoryService, RepositoryService};

pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

#[derive(Debug, Clone, Deserialize)]
pub struct Team {
    pub slug: String,
    pub name: String,
    pub parent: Option<ParentTeam>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ParentTeam {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TeamMember {
    pub login: String,
}

#[derive(Debug, Serialize)]
struct ReviewRequestBody {
    team_reviewers: Vec<String>,
}

#[derive(Debug, Serialize)]
struct AddLabelsBody {
    labels: Vec<String>,
}

#[derive(Clone)]
pub struct GitHubClient {
    client: Client,
    token: String,
    base_url: String,
}

impl GitHubClient {
    pub fn new(token: String) -> Self {
        Self::with_base_url(token, DEFAULT_API_BASE_URL.to_string())
    }

    /// Point the client at a non-default API root (GitHub Enterprise, or a
    /// local mock server in tests).
    pub fn with_base_url(token: String, base_url: String) -> Self {
        let client = Client::builder()
            .user_agent(concat!("review-roulette/", env!("CARGO_PKG_VERSION")))
            .build()
            .expect("Failed to create HTTP client");

        Self {
            client,
            token,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn get(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .get(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
    }

    fn post(&self, url: &str) -> reqwest::RequestBuilder {
        self.client
            .post(url)
            .header("Authorization", format!("Bearer {}", self.token))
            .header("Accept", "application/vnd.github.v3+json")
    }
}

#[async_trait]
impl DirectoryService for GitHubClient {
    async fn list_teams(&self, org: &str) -> Result<Vec<Team>> {
        let mut all_teams = Vec::new();
        let mut page = 1;
        let per_page = 100;

        info!("Listing teams in organization {}", org);

        loop {
            let url = format!(
                "{}/orgs/{}/teams?page={}&per_page={}",
                self.base_url, org, page, per_page
            );

            let response = self
                .get(&url)
                .send()
                .await
                .context("Failed to send team listing request")?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .context("Failed to read error response body")?;
                error!("GitHub API error listing teams: {} - {}", status, error_text);
                return Err(anyhow!(
                    "GitHub API error listing teams: {} - {}",
                    status,
                    error_text
                ));
            }

            let teams: Vec<Team> = response
                .json()
                .await
                .context("Failed to parse team listing response")?;
            let count = teams.len();
            all_teams.extend(teams);

            // Fewer results than a full page means we've reached the last page
            if count < per_page {
                break;
            }
            page += 1;
        }

        info!("Found {} teams in {}", all_teams.len(), org);
        Ok(all_teams)
    }

    async fn list_team_members(&self, org: &str, team_slug: &str) -> Result<Vec<TeamMember>> {
        let mut all_members = Vec::new();
        let mut page = 1;
        let per_page = 100;

        info!("Fetching roster for team {}", team_slug);

        loop {
            let url = format!(
                "{}/orgs/{}/teams/{}/members?page={}&per_page={}",
                self.base_url, org, team_slug, page, per_page
            );

            let response = self
                .get(&url)
                .send()
                .await
                .context("Failed to send team members request")?;

            if !response.status().is_success() {
                let status = response.status();
                let error_text = response
                    .text()
                    .await
                    .context("Failed to read error response body")?;
                error!(
                    "GitHub API error fetching members of {}: {} - {}",
                    team_slug, status, error_text
                );
                return Err(anyhow!(
                    "GitHub API error fetching members of {}: {} - {}",
                    team_slug,
                    status,
                    error_text
                ));
            }

            let members: Vec<TeamMember> = response
                .json()
                .await
                .context("Failed to parse team members response")?;
            let count = members.len();
            all_members.extend(members);

            if count < per_page {
                break;
            }
            page += 1;
        }

        info!("Team {} has {} members", team_slug, all_members.len());
        Ok(all_members)
    }
}

#[async_trait]
impl RepositoryService for GitHubClient {
    async fn request_team_review(
        &self,
        owner: &str,
        repo: &str,
        pr_number: u64,
        team_slug: &str,
    ) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/pulls/{}/requested_reviewers",
            self.base_url, owner, repo, pr_number
        );

        info!(
            "Requesting review from team {} on {}/{}#{}",
            team_slug, owner, repo, pr_number
        );

        let request_body = ReviewRequestBody {
            team_reviewers: vec![team_slug.to_string()],
        };

        let response = self
            .post(&url)
            .body(serde_json::to_string(&request_body)?)
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("Failed to send review request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .context("Failed to read error response body")?;
            error!(
                "GitHub API error requesting review: {} - {}",
                status, error_text
            );
            return Err(anyhow!(
                "GitHub API error requesting review: {} - {}",
                status,
                error_text
            ));
        }

        info!("Successfully requested review from {}", team_slug);
        Ok(())
    }

    async fn add_labels(
        &self,
        owner: &str,
        repo: &str,
        issue_number: u64,
        labels: &[String],
    ) -> Result<()> {
        let url = format!(
            "{}/repos/{}/{}/issues/{}/labels",
            self.base_url, owner, repo, issue_number
        );

        info!(
            "Adding labels {:?} to {}/{}#{}",
            labels, owner, repo, issue_number
        );

        let request_body = AddLabelsBody {
            labels: labels.to_vec(),
        };

        let response = self
            .post(&url)
            .body(serde_json::to_string(&request_body)?)
            .header("Content-Type", "application/json")
            .send()
            .await
            .context("Failed to send add labels request")?;

        if !response.status().is_success() {
            let status = response.status();
            let error_text = response
                .text()
                .await
                .context("Failed to read error response body")?;
            error!(
                "GitHub API error adding labels: {} - {}",
                status, error_text
            );
            return Err(anyhow!(
                "GitHub API error adding labels: {} - {}",
                status,
                error_text
            ));
        }

        info!("Successfully added labels to #{}", issue_number);
        Ok(())
    }
}

use anyhow::Result;
use tracing::{info, Level};

use review_roulette::config::Config;
use review_roulette::event::PullRequestEvent;
use review_roulette::github::GitHubClient;
use review_roulette::pipeline;

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt().with_max_level(Level::INFO).init();

    info!("Starting review roulette");

    let config = Config::from_env()?;
    let event = PullRequestEvent::from_path(&config.event_path)?;

    if !event.is_opened() {
        info!(
            "Ignoring {} event, only newly opened pull requests get a reviewer",
            event.action.as_deref().unwrap_or("unknown")
        );
        return Ok(());
    }

    let pr = event.pull_request_context()?;
    let client = GitHubClient::with_base_url(
        config.github_token.clone(),
        config.api_base_url.clone(),
    );

    pipeline::run(&config, &client, &client, &pr).await?;

    info!(
        "Review assignment for {}/{}#{} complete",
        pr.owner, pr.repo, pr.number
    );
    Ok(())
}

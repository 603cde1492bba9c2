use tracing::info;

use crate::assigner;
use crate::config::Config;
use crate::error::AssignmentError;
use crate::event::PullRequestContext;
use crate::sampler;
use crate::selection;
use crate::services::{DirectoryService, RepositoryService};

/// Run one assignment end to end: list teams, keep the sub-teams of the
/// configured parent, attach rosters, compute de-duplicated weights, draw a
/// team, and record the selection on the pull request.
///
/// Stateless: everything here is built fresh for this invocation and
/// discarded afterwards. Every stage fails fast.
pub async fn run(
    config: &Config,
    directory: &dyn DirectoryService,
    repository: &dyn RepositoryService,
    pr: &PullRequestContext,
) -> Result<(), AssignmentError> {
    let all_teams = directory
        .list_teams(&config.organization)
        .await
        .map_err(|e| AssignmentError::collaborator("team listing", e))?;

    let candidates = selection::filter_teams(all_teams, &config.parent_team);
    info!(
        "{} of the teams in {} are sub-teams of {}",
        candidates.len(),
        config.organization,
        config.parent_team
    );

    let candidates = selection::attach_members(directory, &config.organization, candidates).await?;
    let weighted = selection::compute_weights(candidates);

    let selected = sampler::select_team(&weighted, &mut rand::thread_rng())?;

    assigner::assign_review(repository, pr, selected, &config.review_label).await
}

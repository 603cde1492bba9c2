use tracing::info;

use crate::error::AssignmentError;
use crate::event::PullRequestContext;
use crate::selection::CandidateTeam;
use crate::services::RepositoryService;

/// Record the selection against the pull request: request a review from the
/// selected team, then apply the label.
///
/// The two calls are sequential and dependent; the label is only applied
/// once the review request has succeeded. Neither call is retried, and a
/// rejected duplicate review request is reported as a failure.
pub async fn assign_review(
    repository: &dyn RepositoryService,
    pr: &PullRequestContext,
    team: &CandidateTeam,
    label: &str,
) -> Result<(), AssignmentError> {
    repository
        .request_team_review(&pr.owner, &pr.repo, pr.number, &team.team.slug)
        .await
        .map_err(|e| AssignmentError::collaborator("review request", e))?;

    repository
        .add_labels(&pr.owner, &pr.repo, pr.number, &[label.to_string()])
        .await
        .map_err(|e| AssignmentError::collaborator("label add", e))?;

    info!(
        "Assigned team {} to {}/{}#{} and labelled it {}",
        team.team.slug, pr.owner, pr.repo, pr.number, label
    );
    Ok(())
}

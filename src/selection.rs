use std::collections::HashSet;

use futures::future::try_join_all;
use tracing::info;

use crate::error::AssignmentError;
use crate::github::{Team, TeamMember};
use crate::services::DirectoryService;

/// A sub-team of the configured parent, augmented with its roster and
/// de-duplicated weight data for this run.
///
/// The list order is fixed once weights are computed: `cumulative_count` is
/// only meaningful relative to the order the teams were filtered in, so the
/// sequence must never be re-sorted afterwards.
#[derive(Debug, Clone)]
pub struct CandidateTeam {
    pub team: Team,
    pub members: Vec<TeamMember>,
    /// Members of this team not already attributed to an earlier team.
    pub member_count: u64,
    /// Running sum of `member_count` over this and all earlier teams.
    pub cumulative_count: u64,
}

/// Keep the teams whose parent's display name exactly equals `parent_name`
/// (case-sensitive), preserving input order. Top-level teams have no parent
/// and never match. An empty result is not an error here; sampling rejects
/// it downstream.
pub fn filter_teams(all_teams: Vec<Team>, parent_name: &str) -> Vec<Team> {
    all_teams
        .into_iter()
        .filter(|team| {
            team.parent
                .as_ref()
                .is_some_and(|parent| parent.name == parent_name)
        })
        .collect()
}

/// Fetch every candidate team's roster and attach it.
///
/// The fetches are independent and run concurrently, but the output sequence
/// keeps the input team order regardless of completion order: the weight
/// pass that follows depends on it.
pub async fn attach_members(
    directory: &dyn DirectoryService,
    org: &str,
    teams: Vec<Team>,
) -> Result<Vec<CandidateTeam>, AssignmentError> {
    let rosters = try_join_all(
        teams
            .iter()
            .map(|team| directory.list_team_members(org, &team.slug)),
    )
    .await
    .map_err(|e| AssignmentError::collaborator("team roster fetch", e))?;

    Ok(teams
        .into_iter()
        .zip(rosters)
        .map(|(team, members)| CandidateTeam {
            team,
            members,
            member_count: 0,
            cumulative_count: 0,
        })
        .collect())
}

/// Compute de-duplicated weights and the cumulative weight table.
///
/// A single forward pass carrying the set of already-seen logins: a member
/// counts toward the first team in the sequence that contains them and is
/// excluded from every later team ("earlier wins"). A team whose whole
/// roster has already been seen gets `member_count` 0 and stays in the list.
/// This pass is inherently sequential; each team's count depends on the
/// seen-set built by all earlier teams.
pub fn compute_weights(mut teams: Vec<CandidateTeam>) -> Vec<CandidateTeam> {
    let mut seen: HashSet<String> = HashSet::new();
    let mut cumulative = 0u64;

    for candidate in &mut teams {
        let mut fresh = 0u64;
        for member in &candidate.members {
            if seen.insert(member.login.clone()) {
                fresh += 1;
            }
        }
        candidate.member_count = fresh;
        cumulative += fresh;
        candidate.cumulative_count = cumulative;

        info!(
            "Team {}: {} members, {} distinct, cumulative {}",
            candidate.team.slug,
            candidate.members.len(),
            candidate.member_count,
            candidate.cumulative_count
        );
    }

    teams
}

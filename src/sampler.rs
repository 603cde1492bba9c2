use rand::Rng;
use tracing::info;

use crate::error::AssignmentError;
use crate::selection::CandidateTeam;

/// Draw one team at random, with probability proportional to its
/// de-duplicated member count.
///
/// Fails when there are no candidate teams, or when no candidate team
/// contributed any distinct member (total weight zero).
pub fn select_team<'a, R: Rng>(
    teams: &'a [CandidateTeam],
    rng: &mut R,
) -> Result<&'a CandidateTeam, AssignmentError> {
    let total = total_weight(teams)?;
    let cap = rng.gen_range(0..total);

    let selected = select_team_at(teams, cap)?;
    info!(
        "Drew cap {} of {}, selected team {} (weight {})",
        cap, total, selected.team.slug, selected.member_count
    );
    Ok(selected)
}

/// Deterministic scan for a forced `cap` in `[0, total)`: return the first
/// team in order whose cumulative count exceeds `cap`.
///
/// Each team owns the cap range `[previous cumulative, own cumulative)`,
/// exactly `member_count` values out of `total`, so a team's selection
/// probability is exactly `member_count / total`. The comparison must stay
/// strict: a cap equal to a team's cumulative count belongs to the next
/// team's range. A zero-weight team owns an empty range and can never be
/// selected.
pub fn select_team_at(
    teams: &[CandidateTeam],
    cap: u64,
) -> Result<&CandidateTeam, AssignmentError> {
    let total = total_weight(teams)?;

    teams
        .iter()
        .find(|team| team.cumulative_count > cap)
        .ok_or_else(|| {
            AssignmentError::Selection(format!("cap {} is outside total weight {}", cap, total))
        })
}

fn total_weight(teams: &[CandidateTeam]) -> Result<u64, AssignmentError> {
    let total = match teams.last() {
        Some(last) => last.cumulative_count,
        None => {
            return Err(AssignmentError::Selection(
                "no candidate teams to choose from".to_string(),
            ))
        }
    };

    if total == 0 {
        return Err(AssignmentError::Selection(
            "candidate teams have no distinct members".to_string(),
        ));
    }

    Ok(total)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::github::{Team, TeamMember};
    use crate::selection::compute_weights;
    use rand::SeedableRng;
    use rand_pcg::Pcg64Mcg;

    fn candidate(slug: &str, members: &[&str]) -> CandidateTeam {
        CandidateTeam {
            team: Team {
                slug: slug.to_string(),
                name: slug.to_string(),
                parent: None,
            },
            members: members
                .iter()
                .map(|login| TeamMember {
                    login: login.to_string(),
                })
                .collect(),
            member_count: 0,
            cumulative_count: 0,
        }
    }

    /// Weighted fixture: a=6/6, b=2/8 (a1 already seen), c=3/11.
    fn weighted_fixture() -> Vec<CandidateTeam> {
        compute_weights(vec![
            candidate("a", &["a1", "a2", "a3", "a4", "a5", "a6"]),
            candidate("b", &["a1", "b2", "b3"]),
            candidate("c", &["c1", "c2", "c3"]),
        ])
    }

    #[test]
    fn test_select_team_at_forced_caps() {
        let teams = weighted_fixture();

        assert_eq!(select_team_at(&teams, 0).unwrap().team.slug, "a");
        assert_eq!(select_team_at(&teams, 5).unwrap().team.slug, "a");
        assert_eq!(select_team_at(&teams, 6).unwrap().team.slug, "b");
        assert_eq!(select_team_at(&teams, 7).unwrap().team.slug, "b");
        assert_eq!(select_team_at(&teams, 8).unwrap().team.slug, "c");
        assert_eq!(select_team_at(&teams, 10).unwrap().team.slug, "c");
    }

    #[test]
    fn test_select_team_at_cap_beyond_total_fails() {
        let teams = weighted_fixture();
        assert!(matches!(
            select_team_at(&teams, 11),
            Err(AssignmentError::Selection(_))
        ));
    }

    #[test]
    fn test_zero_weight_team_is_never_selected() {
        // b's roster is fully shadowed by a, so b owns an empty cap range
        let teams = compute_weights(vec![
            candidate("a", &["a1", "a2"]),
            candidate("b", &["a1", "a2"]),
            candidate("c", &["c1"]),
        ]);

        for cap in 0..3 {
            let selected = select_team_at(&teams, cap).unwrap();
            assert_ne!(selected.team.slug, "b");
        }
    }

    #[test]
    fn test_leading_zero_weight_team_is_never_selected() {
        let teams = compute_weights(vec![
            candidate("empty", &[]),
            candidate("a", &["a1", "a2"]),
        ]);

        for cap in 0..2 {
            assert_eq!(select_team_at(&teams, cap).unwrap().team.slug, "a");
        }
    }

    #[test]
    fn test_select_team_empty_list_fails() {
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        assert!(matches!(
            select_team(&[], &mut rng),
            Err(AssignmentError::Selection(_))
        ));
    }

    #[test]
    fn test_select_team_zero_total_fails() {
        let teams = compute_weights(vec![candidate("a", &[]), candidate("b", &[])]);
        let mut rng = Pcg64Mcg::seed_from_u64(7);
        assert!(matches!(
            select_team(&teams, &mut rng),
            Err(AssignmentError::Selection(_))
        ));
    }

    #[test]
    fn test_select_team_single_team_is_deterministic() {
        let teams = compute_weights(vec![candidate("only", &["m1", "m2"])]);
        let mut rng = Pcg64Mcg::seed_from_u64(7);

        for _ in 0..10 {
            assert_eq!(select_team(&teams, &mut rng).unwrap().team.slug, "only");
        }
    }

    #[test]
    fn test_select_team_frequencies_track_weights() {
        let teams = weighted_fixture();
        let mut rng = Pcg64Mcg::seed_from_u64(42);

        let draws = 22_000usize;
        let mut counts = [0usize; 3];
        for _ in 0..draws {
            let selected = select_team(&teams, &mut rng).unwrap();
            let index = teams
                .iter()
                .position(|t| t.team.slug == selected.team.slug)
                .unwrap();
            counts[index] += 1;
        }

        let expected = [6.0 / 11.0, 2.0 / 11.0, 3.0 / 11.0];
        for (count, expected) in counts.iter().zip(expected) {
            let frequency = *count as f64 / draws as f64;
            assert!(
                (frequency - expected).abs() < 0.015,
                "frequency {} too far from expected {}",
                frequency,
                expected
            );
        }
    }
}

//! Pure validation for results submissions.
//!
//! Every violation is collected before the submission is rejected, so an
//! administrator fixes a bad payload in one round trip instead of
//! replaying it error by error.

use std::collections::HashSet;
use uuid::Uuid;

use crate::models::results::{MatchStatsInput, PlayerStatsInput, SubmitResultsRequest};

pub fn validate(request: &SubmitResultsRequest) -> Vec<String> {
    let mut errors = Vec::new();
    let mut seen_users = HashSet::new();

    if let Some(match_stats) = &request.match_stats {
        validate_match_stats(match_stats, &mut errors);
    }

    if let Some(players_stats) = &request.players_stats {
        validate_players_stats(players_stats, &mut seen_users, &mut errors);
    }

    if let Some(motm_user_id) = request.motm_user_id {
        if motm_user_id.is_nil() {
            errors.push("motm_user_id must be a valid user id".to_string());
        } else if request
            .players_stats
            .as_ref()
            .map(|roster| !roster.is_empty())
            .unwrap_or(false)
            && !seen_users.contains(&motm_user_id)
        {
            errors.push("motm_user_id must appear in players_stats".to_string());
        }
    }

    errors
}

fn validate_match_stats(stats: &MatchStatsInput, errors: &mut Vec<String>) {
    let count_fields = [
        ("offsides_a", stats.offsides_a),
        ("offsides_b", stats.offsides_b),
        ("corners_a", stats.corners_a),
        ("corners_b", stats.corners_b),
        ("big_chances_a", stats.big_chances_a),
        ("big_chances_b", stats.big_chances_b),
        ("shots_a", stats.shots_a),
        ("shots_b", stats.shots_b),
    ];
    for (name, value) in count_fields {
        if let Some(v) = value {
            if v < 0 {
                errors.push(format!("{} must be a non-negative integer", name));
            }
        }
    }

    for (name, value) in [("xg_a", stats.xg_a), ("xg_b", stats.xg_b)] {
        if let Some(v) = value {
            if !v.is_finite() || v < 0.0 {
                errors.push(format!("{} must be a non-negative number", name));
            }
        }
    }

    for (name, value) in [
        ("possession_a", stats.possession_a),
        ("possession_b", stats.possession_b),
    ] {
        if let Some(v) = value {
            if !v.is_finite() || !(0.0..=100.0).contains(&v) {
                errors.push(format!("{} must be between 0 and 100", name));
            }
        }
    }

    if let (Some(a), Some(b)) = (stats.possession_a, stats.possession_b) {
        if a + b != 100.0 {
            errors.push("possession_a + possession_b must add up to 100".to_string());
        }
    }
}

fn validate_players_stats(
    players_stats: &[PlayerStatsInput],
    seen_users: &mut HashSet<Uuid>,
    errors: &mut Vec<String>,
) {
    for (i, entry) in players_stats.iter().enumerate() {
        match entry.user_id {
            Some(user_id) if !user_id.is_nil() => {
                if !seen_users.insert(user_id) {
                    errors.push(format!("players_stats: duplicate user id ({})", user_id));
                }
            }
            _ => errors.push(format!("players_stats[{}].user_id is required", i)),
        }

        match entry.team.as_deref() {
            Some("A") | Some("B") => {}
            _ => errors.push(format!("players_stats[{}].team must be \"A\" or \"B\"", i)),
        }

        let stat_fields = [
            ("goals", entry.goals),
            ("assists", entry.assists),
            ("yellow_cards", entry.yellow_cards),
            ("red_cards", entry.red_cards),
        ];
        for (name, value) in stat_fields {
            if let Some(v) = value {
                if v < 0 {
                    errors.push(format!(
                        "players_stats[{}].{} must be a non-negative integer",
                        i, name
                    ));
                }
            }
        }
    }
}

/// Possession completion: one supplied side implies the other as its
/// complement; neither supplied means an even split.
pub fn resolve_possession(stats: &MatchStatsInput) -> (f64, f64) {
    match (stats.possession_a, stats.possession_b) {
        (Some(a), Some(b)) => (a, b),
        (Some(a), None) => (a, 100.0 - a),
        (None, Some(b)) => (100.0 - b, b),
        (None, None) => (50.0, 50.0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn roster_entry(user_id: Uuid, team: &str, goals: i64) -> PlayerStatsInput {
        PlayerStatsInput {
            user_id: Some(user_id),
            team: Some(team.to_string()),
            goals: Some(goals),
            assists: None,
            yellow_cards: None,
            red_cards: None,
        }
    }

    #[test]
    fn empty_submission_is_valid() {
        assert!(validate(&SubmitResultsRequest::default()).is_empty());
    }

    #[test]
    fn possession_sum_must_be_exactly_one_hundred() {
        let request = SubmitResultsRequest {
            match_stats: Some(MatchStatsInput {
                possession_a: Some(70.0),
                possession_b: Some(40.0),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = validate(&request);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("add up to 100"));
    }

    #[test]
    fn single_sided_possession_is_completed_not_rejected() {
        let stats = MatchStatsInput {
            possession_a: Some(70.0),
            ..Default::default()
        };
        let request = SubmitResultsRequest {
            match_stats: Some(stats.clone()),
            ..Default::default()
        };
        assert!(validate(&request).is_empty());
        assert_eq!(resolve_possession(&stats), (70.0, 30.0));

        let stats = MatchStatsInput {
            possession_b: Some(25.0),
            ..Default::default()
        };
        assert_eq!(resolve_possession(&stats), (75.0, 25.0));
        assert_eq!(resolve_possession(&MatchStatsInput::default()), (50.0, 50.0));
    }

    #[test]
    fn negative_counts_and_bad_xg_are_all_reported_together() {
        let request = SubmitResultsRequest {
            match_stats: Some(MatchStatsInput {
                offsides_a: Some(-1),
                shots_b: Some(-3),
                xg_a: Some(-0.5),
                ..Default::default()
            }),
            ..Default::default()
        };
        let errors = validate(&request);
        assert_eq!(errors.len(), 3);
    }

    #[test]
    fn duplicate_roster_user_ids_are_rejected() {
        let user = Uuid::new_v4();
        let request = SubmitResultsRequest {
            players_stats: Some(vec![
                roster_entry(user, "A", 2),
                roster_entry(user, "B", 1),
            ]),
            ..Default::default()
        };
        let errors = validate(&request);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("duplicate user id"));
    }

    #[test]
    fn roster_team_must_be_a_or_b() {
        let request = SubmitResultsRequest {
            players_stats: Some(vec![roster_entry(Uuid::new_v4(), "C", 0)]),
            ..Default::default()
        };
        let errors = validate(&request);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("team"));
    }

    #[test]
    fn motm_must_be_in_a_non_empty_roster() {
        let motm = Uuid::new_v4();
        let request = SubmitResultsRequest {
            players_stats: Some(vec![roster_entry(Uuid::new_v4(), "A", 1)]),
            motm_user_id: Some(motm),
            ..Default::default()
        };
        let errors = validate(&request);
        assert_eq!(errors.len(), 1);
        assert!(errors[0].contains("motm_user_id"));
    }

    #[test]
    fn motm_check_is_skipped_without_a_roster() {
        let request = SubmitResultsRequest {
            motm_user_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(validate(&request).is_empty());

        // An explicitly empty roster behaves like an absent one.
        let request = SubmitResultsRequest {
            players_stats: Some(vec![]),
            motm_user_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        assert!(validate(&request).is_empty());
    }

    #[test]
    fn violations_accumulate_across_sections() {
        let user = Uuid::new_v4();
        let request = SubmitResultsRequest {
            match_stats: Some(MatchStatsInput {
                corners_a: Some(-2),
                possession_a: Some(60.0),
                possession_b: Some(60.0),
                ..Default::default()
            }),
            players_stats: Some(vec![
                roster_entry(user, "A", 1),
                roster_entry(user, "X", -1),
            ]),
            motm_user_id: Some(Uuid::new_v4()),
            ..Default::default()
        };
        let errors = validate(&request);
        // corners, possession sum, duplicate id, bad team, negative goals, motm
        assert_eq!(errors.len(), 6);
    }
}

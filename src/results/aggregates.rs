//! Read-time aggregation over persisted roster rows. Nothing here is
//! cached or stored; the presenter recomputes on every read.

use crate::models::fixture::TeamSide;
use crate::models::results::{DisciplineTotals, PlayerMatchStats, ScoreSummary};

fn team_sum<F>(rows: &[PlayerMatchStats], team: TeamSide, field: F) -> i32
where
    F: Fn(&PlayerMatchStats) -> i32,
{
    rows.iter().filter(|r| r.team == team).map(field).sum()
}

/// The score is the per-team sum of roster goals.
pub fn score(rows: &[PlayerMatchStats]) -> ScoreSummary {
    ScoreSummary {
        goals_a: team_sum(rows, TeamSide::A, |r| r.goals),
        goals_b: team_sum(rows, TeamSide::B, |r| r.goals),
    }
}

pub fn discipline_totals(rows: &[PlayerMatchStats]) -> DisciplineTotals {
    DisciplineTotals {
        assists_a: team_sum(rows, TeamSide::A, |r| r.assists),
        assists_b: team_sum(rows, TeamSide::B, |r| r.assists),
        yellow_cards_a: team_sum(rows, TeamSide::A, |r| r.yellow_cards),
        yellow_cards_b: team_sum(rows, TeamSide::B, |r| r.yellow_cards),
        red_cards_a: team_sum(rows, TeamSide::A, |r| r.red_cards),
        red_cards_b: team_sum(rows, TeamSide::B, |r| r.red_cards),
    }
}

/// The single flagged roster row, if any.
pub fn man_of_the_match(rows: &[PlayerMatchStats]) -> Option<&PlayerMatchStats> {
    rows.iter().find(|r| r.is_motm)
}

#[cfg(test)]
mod tests {
    use super::*;
    use uuid::Uuid;

    fn row(team: TeamSide, goals: i32, assists: i32, yellow: i32, red: i32, motm: bool) -> PlayerMatchStats {
        PlayerMatchStats {
            id: Uuid::new_v4(),
            fixture_id: Uuid::new_v4(),
            user_id: Uuid::new_v4(),
            team,
            goals,
            assists,
            yellow_cards: yellow,
            red_cards: red,
            is_motm: motm,
        }
    }

    #[test]
    fn score_sums_goals_per_team() {
        let rows = vec![
            row(TeamSide::A, 2, 1, 0, 0, true),
            row(TeamSide::A, 1, 0, 1, 0, false),
            row(TeamSide::B, 1, 1, 0, 1, false),
        ];
        assert_eq!(score(&rows), ScoreSummary { goals_a: 3, goals_b: 1 });
    }

    #[test]
    fn totals_cover_assists_and_cards() {
        let rows = vec![
            row(TeamSide::A, 0, 2, 1, 0, false),
            row(TeamSide::B, 0, 1, 2, 1, false),
            row(TeamSide::B, 0, 0, 1, 0, false),
        ];
        let totals = discipline_totals(&rows);
        assert_eq!(totals.assists_a, 2);
        assert_eq!(totals.assists_b, 1);
        assert_eq!(totals.yellow_cards_a, 1);
        assert_eq!(totals.yellow_cards_b, 3);
        assert_eq!(totals.red_cards_a, 0);
        assert_eq!(totals.red_cards_b, 1);
    }

    #[test]
    fn empty_roster_aggregates_to_zero() {
        assert_eq!(score(&[]), ScoreSummary::default());
        assert_eq!(discipline_totals(&[]), DisciplineTotals::default());
        assert!(man_of_the_match(&[]).is_none());
    }

    #[test]
    fn motm_returns_the_flagged_row() {
        let rows = vec![
            row(TeamSide::A, 0, 0, 0, 0, false),
            row(TeamSide::B, 2, 0, 0, 0, true),
        ];
        let motm = man_of_the_match(&rows).expect("flagged row");
        assert_eq!(motm.goals, 2);
    }
}

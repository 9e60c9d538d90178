use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

use crate::models::fixture::{Fixture, SlotWithOccupant, TeamSide};
use crate::models::user::PublicUserProfile;

/// Team-level statistics row, at most one per fixture.
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct MatchStats {
    pub fixture_id: Uuid,
    pub offsides_a: i32,
    pub offsides_b: i32,
    pub corners_a: i32,
    pub corners_b: i32,
    pub big_chances_a: i32,
    pub big_chances_b: i32,
    pub shots_a: i32,
    pub shots_b: i32,
    pub xg_a: f64,
    pub xg_b: f64,
    pub possession_a: f64,
    pub possession_b: f64,
    pub updated_at: DateTime<Utc>,
}

/// Per-player statistics row, at most one per (fixture, user).
#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct PlayerMatchStats {
    pub id: Uuid,
    pub fixture_id: Uuid,
    pub user_id: Uuid,
    pub team: TeamSide,
    pub goals: i32,
    pub assists: i32,
    pub yellow_cards: i32,
    pub red_cards: i32,
    pub is_motm: bool,
}

/// A roster row with the player's public profile joined in.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerStatsWithProfile {
    #[serde(flatten)]
    pub stats: PlayerMatchStats,
    pub user: Option<PublicUserProfile>,
}

// Submission input. Field-level validation is accumulated by
// results::validation rather than failing fast at deserialization, so a
// submission reports every violation in one round trip.

#[derive(Debug, Default, Serialize, Deserialize, Clone)]
pub struct MatchStatsInput {
    pub offsides_a: Option<i64>,
    pub offsides_b: Option<i64>,
    pub corners_a: Option<i64>,
    pub corners_b: Option<i64>,
    pub big_chances_a: Option<i64>,
    pub big_chances_b: Option<i64>,
    pub shots_a: Option<i64>,
    pub shots_b: Option<i64>,
    pub xg_a: Option<f64>,
    pub xg_b: Option<f64>,
    pub possession_a: Option<f64>,
    pub possession_b: Option<f64>,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerStatsInput {
    pub user_id: Option<Uuid>,
    pub team: Option<String>,
    pub goals: Option<i64>,
    pub assists: Option<i64>,
    pub yellow_cards: Option<i64>,
    pub red_cards: Option<i64>,
}

#[derive(Debug, Default, Serialize, Deserialize)]
pub struct SubmitResultsRequest {
    pub match_stats: Option<MatchStatsInput>,
    pub players_stats: Option<Vec<PlayerStatsInput>>,
    pub motm_user_id: Option<Uuid>,
}

// Presentation

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ScoreSummary {
    pub goals_a: i32,
    pub goals_b: i32,
}

#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DisciplineTotals {
    pub assists_a: i32,
    pub assists_b: i32,
    pub yellow_cards_a: i32,
    pub yellow_cards_b: i32,
    pub red_cards_a: i32,
    pub red_cards_b: i32,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ResultsResponse {
    pub fixture: Fixture,
    pub lineups: Vec<SlotWithOccupant>,
    pub match_stats: Option<MatchStats>,
    pub player_stats: Vec<PlayerStatsWithProfile>,
    pub score: ScoreSummary,
    pub totals: DisciplineTotals,
    pub motm: Option<PlayerStatsWithProfile>,
}

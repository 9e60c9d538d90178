use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::models::common::PaginationMeta;
use crate::models::fixture::FixtureStatus;
use crate::models::user::PublicUserProfile;

/// Query parameters for the career stats listing. Status and date bounds
/// restrict which fixtures contribute to the totals, not which players
/// appear.
#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerStatsQuery {
    pub page: Option<i64>,
    pub limit: Option<i64>,
    pub status: Option<FixtureStatus>,
    pub from: Option<DateTime<Utc>>,
    pub to: Option<DateTime<Utc>>,
}

/// Career totals aggregated over a player's match statistics rows.
#[derive(Debug, Default, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct CareerTotals {
    pub games: i64,
    pub goals: i64,
    pub assists: i64,
    pub yellow_cards: i64,
    pub red_cards: i64,
    pub motm: i64,
}

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct PlayerCareerStats {
    #[serde(flatten)]
    pub user: PublicUserProfile,
    pub stats: CareerTotals,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct PlayerStatsResponse {
    pub players: Vec<PlayerCareerStats>,
    pub pagination: PaginationMeta,
}

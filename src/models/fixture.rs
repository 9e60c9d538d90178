use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::fmt;
use uuid::Uuid;

use crate::models::common::PaginationMeta;
use crate::models::user::PublicUserProfile;

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum FixtureStatus {
    Open,
    Closed,
}

impl FixtureStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            FixtureStatus::Open => "open",
            FixtureStatus::Closed => "closed",
        }
    }
}

impl fmt::Display for FixtureStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// Team side within a fixture. Stored and serialized as "A"/"B".
#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar")]
pub enum TeamSide {
    A,
    B,
}

impl TeamSide {
    pub fn as_str(&self) -> &'static str {
        match self {
            TeamSide::A => "A",
            TeamSide::B => "B",
        }
    }
}

impl fmt::Display for TeamSide {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Copy, PartialEq, Eq, sqlx::Type)]
#[sqlx(type_name = "varchar", rename_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum SlotRole {
    Player,
    Bench,
    Coach,
}

impl SlotRole {
    pub fn as_str(&self) -> &'static str {
        match self {
            SlotRole::Player => "player",
            SlotRole::Bench => "bench",
            SlotRole::Coach => "coach",
        }
    }
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct Fixture {
    pub id: Uuid,
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub formation_size: String,
    pub status: FixtureStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

#[derive(Debug, FromRow, Serialize, Deserialize, Clone)]
pub struct FixtureSlot {
    pub id: Uuid,
    pub fixture_id: Uuid,
    pub team: TeamSide,
    pub position_code: String,
    pub label: String,
    pub role: SlotRole,
    pub user_id: Option<Uuid>,
    pub booked_at: Option<DateTime<Utc>>,
}

/// A slot with its occupant's public profile joined in (None while vacant).
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct SlotWithOccupant {
    #[serde(flatten)]
    pub slot: FixtureSlot,
    pub occupant: Option<PublicUserProfile>,
}

// Request/Response DTOs

#[derive(Debug, Serialize, Deserialize)]
pub struct CreateFixtureRequest {
    pub venue: String,
    pub starts_at: DateTime<Utc>,
    pub formation_size: String,
}

impl fmt::Display for CreateFixtureRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "venue: {}, starts_at: {}, formation_size: {}",
            self.venue, self.starts_at, self.formation_size
        )
    }
}

#[derive(Debug, Serialize, Deserialize)]
pub struct BookSlotRequest {
    pub team: TeamSide,
    pub position_code: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixtureListResponse {
    pub data: Vec<Fixture>,
    pub pagination: PaginationMeta,
    /// Server wall clock, so clients can reconcile countdowns against skew.
    pub server_now: DateTime<Utc>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct FixtureDetailResponse {
    pub fixture: Fixture,
    pub slots: Vec<SlotWithOccupant>,
}

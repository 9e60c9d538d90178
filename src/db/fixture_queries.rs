use sqlx::postgres::PgRow;
use sqlx::{PgPool, Row};
use uuid::Uuid;

use crate::models::fixture::{Fixture, FixtureSlot, SlotWithOccupant};
use crate::models::results::{MatchStats, PlayerMatchStats, PlayerStatsWithProfile};
use crate::models::user::PublicUserProfile;

pub async fn get_fixture_by_id(
    pool: &PgPool,
    fixture_id: Uuid,
) -> Result<Option<Fixture>, sqlx::Error> {
    sqlx::query_as::<_, Fixture>(
        r#"
        SELECT id, venue, starts_at, formation_size, status, created_at, updated_at
        FROM fixtures
        WHERE id = $1
        "#,
    )
    .bind(fixture_id)
    .fetch_optional(pool)
    .await
}

/// All slots of a fixture with their occupants' public profiles, in the
/// display order: team, then role, then position code.
pub async fn get_slots_with_occupants(
    pool: &PgPool,
    fixture_id: Uuid,
) -> Result<Vec<SlotWithOccupant>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT
            s.id, s.fixture_id, s.team, s.position_code, s.label, s.role,
            s.user_id, s.booked_at,
            u.username, u.role AS occupant_role, u.preferred_position,
            u.speed, u.finishing, u.passing, u.technique, u.tackling, u.strength
        FROM fixture_slots s
        LEFT JOIN users u ON u.id = s.user_id
        WHERE s.fixture_id = $1
        ORDER BY s.team ASC, s.role ASC, s.position_code ASC
        "#,
    )
    .bind(fixture_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let slot = FixtureSlot {
                id: row.try_get("id")?,
                fixture_id: row.try_get("fixture_id")?,
                team: row.try_get("team")?,
                position_code: row.try_get("position_code")?,
                label: row.try_get("label")?,
                role: row.try_get("role")?,
                user_id: row.try_get("user_id")?,
                booked_at: row.try_get("booked_at")?,
            };
            let occupant = occupant_profile(row)?;
            Ok(SlotWithOccupant { slot, occupant })
        })
        .collect()
}

pub async fn get_match_stats(
    pool: &PgPool,
    fixture_id: Uuid,
) -> Result<Option<MatchStats>, sqlx::Error> {
    sqlx::query_as::<_, MatchStats>(
        r#"
        SELECT
            fixture_id,
            offsides_a, offsides_b,
            corners_a, corners_b,
            big_chances_a, big_chances_b,
            shots_a, shots_b,
            xg_a, xg_b,
            possession_a, possession_b,
            updated_at
        FROM match_stats
        WHERE fixture_id = $1
        "#,
    )
    .bind(fixture_id)
    .fetch_optional(pool)
    .await
}

/// The fixture's roster joined with player profiles, man of the match
/// first, then by goals and assists.
pub async fn get_player_stats_with_profiles(
    pool: &PgPool,
    fixture_id: Uuid,
) -> Result<Vec<PlayerStatsWithProfile>, sqlx::Error> {
    let rows = sqlx::query(
        r#"
        SELECT
            p.id, p.fixture_id, p.user_id, p.team,
            p.goals, p.assists, p.yellow_cards, p.red_cards, p.is_motm,
            u.username, u.role AS occupant_role, u.preferred_position,
            u.speed, u.finishing, u.passing, u.technique, u.tackling, u.strength
        FROM player_match_stats p
        LEFT JOIN users u ON u.id = p.user_id
        WHERE p.fixture_id = $1
        ORDER BY p.is_motm DESC, p.goals DESC, p.assists DESC
        "#,
    )
    .bind(fixture_id)
    .fetch_all(pool)
    .await?;

    rows.iter()
        .map(|row| {
            let stats = PlayerMatchStats {
                id: row.try_get("id")?,
                fixture_id: row.try_get("fixture_id")?,
                user_id: row.try_get("user_id")?,
                team: row.try_get("team")?,
                goals: row.try_get("goals")?,
                assists: row.try_get("assists")?,
                yellow_cards: row.try_get("yellow_cards")?,
                red_cards: row.try_get("red_cards")?,
                is_motm: row.try_get("is_motm")?,
            };
            // user_id is NOT NULL here, but the joined profile can still be
            // absent if the account was deleted after submission.
            let user = occupant_profile(row)?;
            Ok(PlayerStatsWithProfile { stats, user })
        })
        .collect()
}

/// Build the occupant's public profile from a LEFT JOIN row, None when the
/// join produced no user. The password hash is never selected.
fn occupant_profile(row: &PgRow) -> Result<Option<PublicUserProfile>, sqlx::Error> {
    let username: Option<String> = row.try_get("username")?;
    let Some(username) = username else {
        return Ok(None);
    };

    let speed: i32 = row.try_get("speed")?;
    let finishing: i32 = row.try_get("finishing")?;
    let passing: i32 = row.try_get("passing")?;
    let technique: i32 = row.try_get("technique")?;
    let tackling: i32 = row.try_get("tackling")?;
    let strength: i32 = row.try_get("strength")?;

    Ok(Some(PublicUserProfile {
        id: row.try_get("user_id")?,
        username,
        role: row.try_get("occupant_role")?,
        preferred_position: row.try_get("preferred_position")?,
        speed,
        finishing,
        passing,
        technique,
        tackling,
        strength,
        overall: PublicUserProfile::overall_rating(
            speed, finishing, passing, technique, tackling, strength,
        ),
    }))
}

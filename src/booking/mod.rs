//! Slot reservation coordinator.
//!
//! All booking writes for one fixture are serialized on the fixture row
//! lock, so the two uniqueness re-checks (one slot per user, one user per
//! slot) and the final write behave as a single unit. Unrelated fixtures
//! never contend. Unbooking touches only the (fixture, user) slot row.

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::fixture::{Fixture, FixtureSlot, FixtureStatus, TeamSide};
use crate::models::user::User;

#[derive(Debug, Error)]
pub enum BookingError {
    #[error("fixture not found")]
    FixtureNotFound,
    #[error("booking is closed for this fixture")]
    BookingClosed,
    #[error("user not found")]
    UserNotFound,
    #[error("user already holds a slot in this fixture")]
    AlreadyBooked,
    #[error("slot not found")]
    SlotNotFound,
    #[error("slot is already taken")]
    SlotTaken,
    #[error("no reservation in this fixture")]
    NoReservation,
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Reserve the (team, position) slot of a fixture for a user.
///
/// Exactly one of two racing requests for the same slot, or by the same
/// user, commits; the other sees `AlreadyBooked`/`SlotTaken`. Any failure
/// after the transaction begins rolls back completely.
pub async fn book_slot(
    pool: &PgPool,
    fixture_id: Uuid,
    user_id: Uuid,
    team: TeamSide,
    position_code: &str,
) -> Result<FixtureSlot, BookingError> {
    let mut tx = pool.begin().await?;

    // Fixture row lock: serializes all bookings within this fixture and
    // pins the status we are about to check.
    let fixture = sqlx::query_as::<_, Fixture>(
        r#"
        SELECT id, venue, starts_at, formation_size, status, created_at, updated_at
        FROM fixtures
        WHERE id = $1
        FOR UPDATE
        "#,
    )
    .bind(fixture_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(BookingError::FixtureNotFound)?;

    if fixture.status != FixtureStatus::Open {
        return Err(BookingError::BookingClosed);
    }

    let user = sqlx::query_as::<_, User>(
        r#"
        SELECT id, username, password_hash, role, preferred_position,
               speed, finishing, passing, technique, tackling, strength,
               created_at, updated_at
        FROM users
        WHERE id = $1
        "#,
    )
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(BookingError::UserNotFound)?;

    // User-level check first, then slot-level: fixed order shared with the
    // unbooking path, which acquires on (fixture, user) only.
    let existing = sqlx::query(
        r#"
        SELECT id FROM fixture_slots
        WHERE fixture_id = $1 AND user_id = $2
        FOR UPDATE
        "#,
    )
    .bind(fixture_id)
    .bind(user_id)
    .fetch_optional(&mut *tx)
    .await?;
    if existing.is_some() {
        return Err(BookingError::AlreadyBooked);
    }

    let slot = sqlx::query_as::<_, FixtureSlot>(
        r#"
        SELECT id, fixture_id, team, position_code, label, role, user_id, booked_at
        FROM fixture_slots
        WHERE fixture_id = $1 AND team = $2 AND position_code = $3
        FOR UPDATE
        "#,
    )
    .bind(fixture_id)
    .bind(team.as_str())
    .bind(position_code)
    .fetch_optional(&mut *tx)
    .await?
    .ok_or(BookingError::SlotNotFound)?;

    if slot.user_id.is_some() {
        return Err(BookingError::SlotTaken);
    }

    let updated = sqlx::query_as::<_, FixtureSlot>(
        r#"
        UPDATE fixture_slots
        SET user_id = $1, booked_at = NOW()
        WHERE id = $2
        RETURNING id, fixture_id, team, position_code, label, role, user_id, booked_at
        "#,
    )
    .bind(user_id)
    .bind(slot.id)
    .fetch_one(&mut *tx)
    .await
    .map_err(|e| {
        // The partial unique occupant index is the store-level backstop;
        // a violation is a lost race, not an internal error.
        if is_unique_violation(&e) {
            BookingError::AlreadyBooked
        } else {
            BookingError::Database(e)
        }
    })?;

    tx.commit().await?;

    tracing::info!(
        "User {} booked slot {}/{} in fixture {}",
        user.username,
        team,
        position_code,
        fixture_id
    );

    Ok(updated)
}

/// Release whatever slot the user holds in the fixture.
///
/// No status gate: cancelling a reservation stays allowed even after the
/// fixture closes.
pub async fn unbook_slot(
    pool: &PgPool,
    fixture_id: Uuid,
    user_id: Uuid,
) -> Result<(), BookingError> {
    let mut tx = pool.begin().await?;

    let result = sqlx::query(
        r#"
        UPDATE fixture_slots
        SET user_id = NULL, booked_at = NULL
        WHERE fixture_id = $1 AND user_id = $2
        "#,
    )
    .bind(fixture_id)
    .bind(user_id)
    .execute(&mut *tx)
    .await?;

    if result.rows_affected() == 0 {
        return Err(BookingError::NoReservation);
    }

    tx.commit().await?;

    tracing::info!("User {} released their slot in fixture {}", user_id, fixture_id);

    Ok(())
}

fn is_unique_violation(e: &sqlx::Error) -> bool {
    e.as_database_error()
        .and_then(|db| db.code())
        .map(|code| code == "23505")
        .unwrap_or(false)
}

//! Results ledger: validate-then-commit ingestion of match results.
//!
//! The commit phase is one transaction: team stats upsert, MOTM flag
//! clear + roster upserts, and the close transition either all become
//! visible together or not at all.

pub mod aggregates;
pub mod validation;

use sqlx::PgPool;
use thiserror::Error;
use uuid::Uuid;

use crate::models::fixture::Fixture;
use crate::models::results::SubmitResultsRequest;

#[derive(Debug, Error)]
pub enum ResultsError {
    #[error("fixture not found")]
    FixtureNotFound,
    #[error("validation failed")]
    Validation(Vec<String>),
    #[error(transparent)]
    Database(#[from] sqlx::Error),
}

/// Validate and persist a full results submission, then close the fixture.
///
/// Statistics rows are upserts keyed by their uniqueness constraints:
/// resubmitting overwrites every field, it never merges. The fixture is
/// closed even when the submission carries no statistics at all.
pub async fn submit_results(
    pool: &PgPool,
    fixture_id: Uuid,
    request: &SubmitResultsRequest,
) -> Result<(), ResultsError> {
    let fixture = sqlx::query_as::<_, Fixture>(
        r#"
        SELECT id, venue, starts_at, formation_size, status, created_at, updated_at
        FROM fixtures
        WHERE id = $1
        "#,
    )
    .bind(fixture_id)
    .fetch_optional(pool)
    .await?
    .ok_or(ResultsError::FixtureNotFound)?;

    let errors = validation::validate(request);
    if !errors.is_empty() {
        return Err(ResultsError::Validation(errors));
    }

    let mut tx = pool.begin().await?;

    if let Some(match_stats) = &request.match_stats {
        let (possession_a, possession_b) = validation::resolve_possession(match_stats);

        sqlx::query(
            r#"
            INSERT INTO match_stats (
                fixture_id,
                offsides_a, offsides_b,
                corners_a, corners_b,
                big_chances_a, big_chances_b,
                shots_a, shots_b,
                xg_a, xg_b,
                possession_a, possession_b
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11, $12, $13)
            ON CONFLICT (fixture_id) DO UPDATE SET
                offsides_a = EXCLUDED.offsides_a,
                offsides_b = EXCLUDED.offsides_b,
                corners_a = EXCLUDED.corners_a,
                corners_b = EXCLUDED.corners_b,
                big_chances_a = EXCLUDED.big_chances_a,
                big_chances_b = EXCLUDED.big_chances_b,
                shots_a = EXCLUDED.shots_a,
                shots_b = EXCLUDED.shots_b,
                xg_a = EXCLUDED.xg_a,
                xg_b = EXCLUDED.xg_b,
                possession_a = EXCLUDED.possession_a,
                possession_b = EXCLUDED.possession_b,
                updated_at = NOW()
            "#,
        )
        .bind(fixture.id)
        .bind(match_stats.offsides_a.unwrap_or(0) as i32)
        .bind(match_stats.offsides_b.unwrap_or(0) as i32)
        .bind(match_stats.corners_a.unwrap_or(0) as i32)
        .bind(match_stats.corners_b.unwrap_or(0) as i32)
        .bind(match_stats.big_chances_a.unwrap_or(0) as i32)
        .bind(match_stats.big_chances_b.unwrap_or(0) as i32)
        .bind(match_stats.shots_a.unwrap_or(0) as i32)
        .bind(match_stats.shots_b.unwrap_or(0) as i32)
        .bind(match_stats.xg_a.unwrap_or(0.0))
        .bind(match_stats.xg_b.unwrap_or(0.0))
        .bind(possession_a)
        .bind(possession_b)
        .execute(&mut *tx)
        .await?;
    }

    if let Some(players_stats) = &request.players_stats {
        // Clear every flag first so the single-MOTM invariant holds no
        // matter which users the new roster carries.
        sqlx::query(
            r#"
            UPDATE player_match_stats
            SET is_motm = FALSE, updated_at = NOW()
            WHERE fixture_id = $1
            "#,
        )
        .bind(fixture.id)
        .execute(&mut *tx)
        .await?;

        for entry in players_stats {
            // Guaranteed by the validation phase.
            let Some(user_id) = entry.user_id else {
                continue;
            };
            let is_motm = request.motm_user_id == Some(user_id);

            sqlx::query(
                r#"
                INSERT INTO player_match_stats (
                    id, fixture_id, user_id, team,
                    goals, assists, yellow_cards, red_cards, is_motm
                )
                VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
                ON CONFLICT (fixture_id, user_id) DO UPDATE SET
                    team = EXCLUDED.team,
                    goals = EXCLUDED.goals,
                    assists = EXCLUDED.assists,
                    yellow_cards = EXCLUDED.yellow_cards,
                    red_cards = EXCLUDED.red_cards,
                    is_motm = EXCLUDED.is_motm,
                    updated_at = NOW()
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(fixture.id)
            .bind(user_id)
            .bind(entry.team.as_deref().unwrap_or("A"))
            .bind(entry.goals.unwrap_or(0) as i32)
            .bind(entry.assists.unwrap_or(0) as i32)
            .bind(entry.yellow_cards.unwrap_or(0) as i32)
            .bind(entry.red_cards.unwrap_or(0) as i32)
            .bind(is_motm)
            .execute(&mut *tx)
            .await?;
        }
    }

    // Submitting results closes the fixture, even an empty submission.
    sqlx::query(
        r#"
        UPDATE fixtures
        SET status = 'closed', updated_at = NOW()
        WHERE id = $1
        "#,
    )
    .bind(fixture.id)
    .execute(&mut *tx)
    .await?;

    tx.commit().await?;

    tracing::info!("Results saved for fixture {}", fixture.id);

    Ok(())
}

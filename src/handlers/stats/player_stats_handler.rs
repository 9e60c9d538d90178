use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::{PgPool, Row};

use crate::models::common::PaginationMeta;
use crate::models::stats::{CareerTotals, PlayerCareerStats, PlayerStatsQuery, PlayerStatsResponse};
use crate::models::user::PublicUserProfile;

const DEFAULT_PAGE_SIZE: i64 = 10;

/// Career statistics for every player, sorted by goals scored.
///
/// Status and date filters restrict which fixtures contribute to the
/// totals inside the join, so a player with no qualifying rows still
/// appears with zeroed stats.
pub async fn get_player_stats(
    query: web::Query<PlayerStatsQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query.limit.unwrap_or(DEFAULT_PAGE_SIZE).max(1);
    let offset = (page - 1) * limit;

    let total: i64 =
        match sqlx::query_scalar("SELECT COUNT(*) FROM users WHERE role <> 'admin'")
            .fetch_one(pool.get_ref())
            .await
        {
            Ok(total) => total,
            Err(e) => {
                tracing::error!("Failed to count players: {}", e);
                return Ok(internal_error());
            }
        };

    let rows = match sqlx::query(
        r#"
        SELECT
            u.id, u.username, u.role AS occupant_role, u.preferred_position,
            u.speed, u.finishing, u.passing, u.technique, u.tackling, u.strength,
            COUNT(p.id) AS games,
            COALESCE(SUM(p.goals), 0) AS goals,
            COALESCE(SUM(p.assists), 0) AS assists,
            COALESCE(SUM(p.yellow_cards), 0) AS yellow_cards,
            COALESCE(SUM(p.red_cards), 0) AS red_cards,
            COUNT(p.id) FILTER (WHERE p.is_motm) AS motm
        FROM users u
        LEFT JOIN player_match_stats p
            ON p.user_id = u.id
           AND EXISTS (
                SELECT 1 FROM fixtures f
                WHERE f.id = p.fixture_id
                  AND ($1::varchar IS NULL OR f.status = $1)
                  AND ($2::timestamptz IS NULL OR f.starts_at >= $2)
                  AND ($3::timestamptz IS NULL OR f.starts_at <= $3)
           )
        WHERE u.role <> 'admin'
        GROUP BY u.id
        ORDER BY goals DESC, u.username ASC
        LIMIT $4 OFFSET $5
        "#,
    )
    .bind(query.status.map(|s| s.as_str()))
    .bind(query.from)
    .bind(query.to)
    .bind(limit)
    .bind(offset)
    .fetch_all(pool.get_ref())
    .await
    {
        Ok(rows) => rows,
        Err(e) => {
            tracing::error!("Failed to aggregate player stats: {}", e);
            return Ok(internal_error());
        }
    };

    let mut players = Vec::with_capacity(rows.len());
    for row in &rows {
        let speed: i32 = row.get("speed");
        let finishing: i32 = row.get("finishing");
        let passing: i32 = row.get("passing");
        let technique: i32 = row.get("technique");
        let tackling: i32 = row.get("tackling");
        let strength: i32 = row.get("strength");

        players.push(PlayerCareerStats {
            user: PublicUserProfile {
                id: row.get("id"),
                username: row.get("username"),
                role: row.get("occupant_role"),
                preferred_position: row.get("preferred_position"),
                speed,
                finishing,
                passing,
                technique,
                tackling,
                strength,
                overall: PublicUserProfile::overall_rating(
                    speed, finishing, passing, technique, tackling, strength,
                ),
            },
            stats: CareerTotals {
                games: row.get("games"),
                goals: row.get("goals"),
                assists: row.get("assists"),
                yellow_cards: row.get("yellow_cards"),
                red_cards: row.get("red_cards"),
                motm: row.get("motm"),
            },
        });
    }

    let pagination = PaginationMeta::new(page, limit, total, players.len());

    Ok(HttpResponse::Ok().json(PlayerStatsResponse {
        players,
        pagination,
    }))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "message": "Internal server error"
    }))
}

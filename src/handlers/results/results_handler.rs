use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::fixture_queries;
use crate::middleware::auth::Claims;
use crate::models::results::{ResultsResponse, SubmitResultsRequest};
use crate::results::{self, aggregates, ResultsError};

/// Record a full results submission and close the fixture.
#[tracing::instrument(
    name = "Submit results",
    skip(request, pool, claims),
    fields(
        user = %claims.username,
        fixture_id = %fixture_id
    )
)]
pub async fn submit_results(
    fixture_id: web::Path<Uuid>,
    request: web::Json<SubmitResultsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = fixture_id.into_inner();

    match results::submit_results(pool.get_ref(), fixture_id, &request).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Results saved"
        }))),
        Err(ResultsError::FixtureNotFound) => Ok(HttpResponse::NotFound().json(json!({
            "success": false,
            "message": "Fixture not found"
        }))),
        Err(ResultsError::Validation(details)) => {
            tracing::warn!(
                "Results submission for fixture {} rejected with {} violations",
                fixture_id,
                details.len()
            );
            Ok(HttpResponse::BadRequest().json(json!({
                "success": false,
                "message": "Validation failed",
                "details": details
            })))
        }
        Err(ResultsError::Database(e)) => {
            tracing::error!("Failed to save results for fixture {}: {}", fixture_id, e);
            Ok(HttpResponse::InternalServerError().json(json!({
                "success": false,
                "message": "Internal server error"
            })))
        }
    }
}

/// Full results view: lineups, team statistics, roster and the aggregates
/// derived from it. Read-only, recomputed on every call.
pub async fn get_results(
    fixture_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let fixture_id = fixture_id.into_inner();

    let fixture = match fixture_queries::get_fixture_by_id(pool.get_ref(), fixture_id).await {
        Ok(Some(fixture)) => fixture,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(json!({
                "success": false,
                "message": "Fixture not found"
            })));
        }
        Err(e) => {
            tracing::error!("Failed to fetch fixture {}: {}", fixture_id, e);
            return Ok(internal_error());
        }
    };

    let lineups = match fixture_queries::get_slots_with_occupants(pool.get_ref(), fixture_id).await
    {
        Ok(lineups) => lineups,
        Err(e) => {
            tracing::error!("Failed to fetch lineups for fixture {}: {}", fixture_id, e);
            return Ok(internal_error());
        }
    };

    let match_stats = match fixture_queries::get_match_stats(pool.get_ref(), fixture_id).await {
        Ok(match_stats) => match_stats,
        Err(e) => {
            tracing::error!("Failed to fetch match stats for fixture {}: {}", fixture_id, e);
            return Ok(internal_error());
        }
    };

    let player_stats =
        match fixture_queries::get_player_stats_with_profiles(pool.get_ref(), fixture_id).await {
            Ok(player_stats) => player_stats,
            Err(e) => {
                tracing::error!(
                    "Failed to fetch player stats for fixture {}: {}",
                    fixture_id,
                    e
                );
                return Ok(internal_error());
            }
        };

    let roster: Vec<_> = player_stats.iter().map(|p| p.stats.clone()).collect();
    let score = aggregates::score(&roster);
    let totals = aggregates::discipline_totals(&roster);
    let motm = aggregates::man_of_the_match(&roster)
        .and_then(|flagged| player_stats.iter().find(|p| p.stats.id == flagged.id))
        .cloned();

    Ok(HttpResponse::Ok().json(ResultsResponse {
        fixture,
        lineups,
        match_stats,
        player_stats,
        score,
        totals,
        motm,
    }))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "message": "Internal server error"
    }))
}

use actix_web::{web, HttpResponse, Result};
use chrono::Utc;
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::db::fixture_queries;
use crate::fixtures::formation::{formation_layout, FormationSize};
use crate::middleware::auth::Claims;
use crate::models::common::{PaginationMeta, PaginationQuery};
use crate::models::fixture::{
    CreateFixtureRequest, Fixture, FixtureDetailResponse, FixtureListResponse,
};
use crate::services::NotificationService;

const DEFAULT_PAGE_SIZE: i64 = 15;
const MAX_PAGE_SIZE: i64 = 50;

/// Create a fixture with its full two-team slot layout.
#[tracing::instrument(
    name = "Create fixture",
    skip(request, pool, notifier, claims),
    fields(
        user = %claims.username,
        request = %request
    )
)]
pub async fn create_fixture(
    request: web::Json<CreateFixtureRequest>,
    pool: web::Data<PgPool>,
    notifier: web::Data<NotificationService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    if request.venue.trim().is_empty() || request.formation_size.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "venue, starts_at and formation_size are required"
        })));
    }

    let size = FormationSize::parse(&request.formation_size);
    let fixture_id = Uuid::new_v4();

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            tracing::error!("Failed to begin transaction: {}", e);
            return Ok(internal_error());
        }
    };

    let insert_fixture = sqlx::query(
        r#"
        INSERT INTO fixtures (id, venue, starts_at, formation_size, status)
        VALUES ($1, $2, $3, $4, 'open')
        "#,
    )
    .bind(fixture_id)
    .bind(request.venue.trim())
    .bind(request.starts_at)
    .bind(size.as_str())
    .execute(&mut *tx)
    .await;

    if let Err(e) = insert_fixture {
        tracing::error!("Failed to insert fixture: {}", e);
        return Ok(internal_error());
    }

    // One slot per team per formation entry, all in the same transaction
    // as the fixture row.
    for team in ["A", "B"] {
        for definition in formation_layout(size) {
            let inserted = sqlx::query(
                r#"
                INSERT INTO fixture_slots (id, fixture_id, team, position_code, label, role)
                VALUES ($1, $2, $3, $4, $5, $6)
                "#,
            )
            .bind(Uuid::new_v4())
            .bind(fixture_id)
            .bind(team)
            .bind(definition.code)
            .bind(definition.label)
            .bind(definition.role.as_str())
            .execute(&mut *tx)
            .await;

            if let Err(e) = inserted {
                tracing::error!("Failed to insert slot {}/{}: {}", team, definition.code, e);
                return Ok(internal_error());
            }
        }
    }

    if let Err(e) = tx.commit().await {
        tracing::error!("Failed to commit fixture creation: {}", e);
        return Ok(internal_error());
    }

    tracing::info!("Fixture {} created by {}", fixture_id, claims.username);

    // Best effort: a broadcast failure must never fail fixture creation.
    notifier.broadcast_to_all(
        "New match published".to_string(),
        "A new match is open for booking, check the match list".to_string(),
    );

    Ok(HttpResponse::Created().json(json!({
        "success": true,
        "message": "Fixture created",
        "data": { "fixture_id": fixture_id }
    })))
}

/// List fixtures ordered by kick-off time, with pagination metadata and
/// the server clock for countdown reconciliation.
pub async fn list_fixtures(
    query: web::Query<PaginationQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let page = query.page.unwrap_or(1).max(1);
    let limit = query
        .limit
        .unwrap_or(DEFAULT_PAGE_SIZE)
        .clamp(1, MAX_PAGE_SIZE);
    let offset = (page - 1) * limit;

    let total: i64 = match sqlx::query_scalar("SELECT COUNT(*) FROM fixtures")
        .fetch_one(pool.get_ref())
        .await
    {
        Ok(total) => total,
        Err(e) => {
            tracing::error!("Failed to count fixtures: {}", e);
            return Ok(internal_error());
        }
    };

    let fixtures = match sqlx::query_as::<_, Fixture>(
        r#"
        SELECT id, venue, starts_at, formation_size, status, created_at, updated_at
        FROM fixtures
        ORDER BY starts_at ASC
        LIMIT $1 OFFSET $2
        "#,
    )
    .bind(limit)
    .bind(offset)
    .fetch_all(pool.get_ref())
    .await
    {
        Ok(fixtures) => fixtures,
        Err(e) => {
            tracing::error!("Failed to list fixtures: {}", e);
            return Ok(internal_error());
        }
    };

    let pagination = PaginationMeta::new(page, limit, total, fixtures.len());

    Ok(HttpResponse::Ok().json(FixtureListResponse {
        data: fixtures,
        pagination,
        server_now: Utc::now(),
    }))
}

/// Fixture detail: the fixture plus every slot with its occupant profile.
pub async fn get_fixture(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();

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

    let slots = match fixture_queries::get_slots_with_occupants(pool.get_ref(), fixture_id).await {
        Ok(slots) => slots,
        Err(e) => {
            tracing::error!("Failed to fetch slots for fixture {}: {}", fixture_id, e);
            return Ok(internal_error());
        }
    };

    Ok(HttpResponse::Ok().json(FixtureDetailResponse { fixture, slots }))
}

/// Delete a fixture and everything it owns. Slots are removed in the same
/// transaction; statistics rows follow via the cascade.
#[tracing::instrument(name = "Delete fixture", skip(pool, claims), fields(user = %claims.username))]
pub async fn delete_fixture(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = path.into_inner();

    let mut tx = match pool.begin().await {
        Ok(tx) => tx,
        Err(e) => {
            tracing::error!("Failed to begin transaction: {}", e);
            return Ok(internal_error());
        }
    };

    let fixture = sqlx::query("SELECT id FROM fixtures WHERE id = $1")
        .bind(fixture_id)
        .fetch_optional(&mut *tx)
        .await;

    match fixture {
        Ok(Some(_)) => {}
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
    }

    let deleted_slots = sqlx::query("DELETE FROM fixture_slots WHERE fixture_id = $1")
        .bind(fixture_id)
        .execute(&mut *tx)
        .await;
    if let Err(e) = deleted_slots {
        tracing::error!("Failed to delete slots for fixture {}: {}", fixture_id, e);
        return Ok(internal_error());
    }

    let deleted = sqlx::query("DELETE FROM fixtures WHERE id = $1")
        .bind(fixture_id)
        .execute(&mut *tx)
        .await;
    if let Err(e) = deleted {
        tracing::error!("Failed to delete fixture {}: {}", fixture_id, e);
        return Ok(internal_error());
    }

    if let Err(e) = tx.commit().await {
        tracing::error!("Failed to commit fixture deletion: {}", e);
        return Ok(internal_error());
    }

    tracing::info!("Fixture {} deleted by {}", fixture_id, claims.username);

    Ok(HttpResponse::Ok().json(json!({
        "success": true,
        "message": "Fixture deleted",
        "data": { "fixture_id": fixture_id }
    })))
}

fn internal_error() -> HttpResponse {
    HttpResponse::InternalServerError().json(json!({
        "success": false,
        "message": "Internal server error"
    }))
}

use actix_web::{delete, get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::fixtures::fixture_handler;
use crate::middleware::auth::Claims;
use crate::models::common::PaginationQuery;
use crate::models::fixture::CreateFixtureRequest;
use crate::services::NotificationService;

/// Create a fixture with its slot layout (admin scope)
#[post("/fixtures")]
async fn create_fixture(
    request: web::Json<CreateFixtureRequest>,
    pool: web::Data<PgPool>,
    notifier: web::Data<NotificationService>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    fixture_handler::create_fixture(request, pool, notifier, claims).await
}

/// List fixtures by kick-off time (paginated)
#[get("/fixtures")]
async fn list_fixtures(
    query: web::Query<PaginationQuery>,
    pool: web::Data<PgPool>,
) -> Result<HttpResponse> {
    fixture_handler::list_fixtures(query, pool).await
}

/// Fixture detail with slots and occupants
#[get("/fixtures/{fixture_id}")]
async fn get_fixture(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    fixture_handler::get_fixture(path, pool).await
}

/// Delete a fixture and its slots (admin scope)
#[delete("/fixtures/{fixture_id}")]
async fn delete_fixture(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    fixture_handler::delete_fixture(path, pool, claims).await
}

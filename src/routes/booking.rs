use actix_web::{post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::fixtures::booking_handler;
use crate::middleware::auth::Claims;
use crate::models::fixture::BookSlotRequest;

/// Reserve a (team, position) slot
#[post("/fixtures/{fixture_id}/book")]
async fn book_slot(
    path: web::Path<Uuid>,
    request: web::Json<BookSlotRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    booking_handler::book_slot(path, request, pool, claims).await
}

/// Cancel the caller's reservation
#[post("/fixtures/{fixture_id}/unbook")]
async fn unbook_slot(
    path: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    booking_handler::unbook_slot(path, pool, claims).await
}

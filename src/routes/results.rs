use actix_web::{get, post, web, HttpResponse, Result};
use sqlx::PgPool;
use uuid::Uuid;

use crate::handlers::results::results_handler;
use crate::middleware::auth::Claims;
use crate::models::results::SubmitResultsRequest;

/// Record match results and close the fixture (admin scope)
#[post("/fixtures/{fixture_id}/results")]
async fn submit_results(
    path: web::Path<Uuid>,
    request: web::Json<SubmitResultsRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    results_handler::submit_results(path, request, pool, claims).await
}

/// Full results view with lineups and aggregates
#[get("/fixtures/{fixture_id}/results")]
async fn get_results(path: web::Path<Uuid>, pool: web::Data<PgPool>) -> Result<HttpResponse> {
    results_handler::get_results(path, pool).await
}

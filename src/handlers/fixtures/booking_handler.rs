use actix_web::{web, HttpResponse, Result};
use serde_json::json;
use sqlx::PgPool;
use uuid::Uuid;

use crate::booking::{self, BookingError};
use crate::middleware::auth::Claims;
use crate::models::common::ApiResponse;
use crate::models::fixture::BookSlotRequest;

/// Reserve a slot in a fixture for the authenticated user.
#[tracing::instrument(
    name = "Book slot",
    skip(request, pool, claims),
    fields(
        user = %claims.username,
        fixture_id = %fixture_id
    )
)]
pub async fn book_slot(
    fixture_id: web::Path<Uuid>,
    request: web::Json<BookSlotRequest>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = fixture_id.into_inner();

    let Some(user_id) = claims.user_id() else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Invalid user ID"
        })));
    };

    if request.position_code.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "team and position_code are required"
        })));
    }

    match booking::book_slot(
        pool.get_ref(),
        fixture_id,
        user_id,
        request.team,
        request.position_code.trim(),
    )
    .await
    {
        Ok(slot) => Ok(HttpResponse::Ok().json(ApiResponse::success("Slot booked", slot))),
        Err(e) => Ok(booking_error_response(e)),
    }
}

/// Cancel the authenticated user's reservation in a fixture.
#[tracing::instrument(
    name = "Unbook slot",
    skip(pool, claims),
    fields(
        user = %claims.username,
        fixture_id = %fixture_id
    )
)]
pub async fn unbook_slot(
    fixture_id: web::Path<Uuid>,
    pool: web::Data<PgPool>,
    claims: web::ReqData<Claims>,
) -> Result<HttpResponse> {
    let fixture_id = fixture_id.into_inner();

    let Some(user_id) = claims.user_id() else {
        return Ok(HttpResponse::BadRequest().json(json!({
            "success": false,
            "message": "Invalid user ID"
        })));
    };

    match booking::unbook_slot(pool.get_ref(), fixture_id, user_id).await {
        Ok(()) => Ok(HttpResponse::Ok().json(json!({
            "success": true,
            "message": "Reservation cancelled"
        }))),
        Err(e) => Ok(booking_error_response(e)),
    }
}

fn booking_error_response(error: BookingError) -> HttpResponse {
    let body = |message: &str| {
        json!({
            "success": false,
            "message": message
        })
    };

    match error {
        BookingError::FixtureNotFound => HttpResponse::NotFound().json(body("Fixture not found")),
        BookingError::BookingClosed => {
            HttpResponse::Forbidden().json(body("Booking is closed for this fixture"))
        }
        BookingError::UserNotFound => HttpResponse::NotFound().json(body("User not found")),
        BookingError::AlreadyBooked => {
            HttpResponse::Conflict().json(body("You already hold a slot in this fixture"))
        }
        BookingError::SlotNotFound => HttpResponse::NotFound().json(body("Slot not found")),
        BookingError::SlotTaken => {
            HttpResponse::Conflict().json(body("This slot is already taken"))
        }
        BookingError::NoReservation => {
            HttpResponse::NotFound().json(body("You have no reservation in this fixture"))
        }
        BookingError::Database(e) => {
            tracing::error!("Booking database error: {}", e);
            HttpResponse::InternalServerError().json(body("Internal server error"))
        }
    }
}

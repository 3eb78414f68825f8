use axum::{extract::{Path, Query, State}, http::StatusCode, response::IntoResponse, Json};
use crate::state::AppState;
use crate::api::dtos::requests::{BookingOwnerQuery, CreateBookingRequest};
use crate::api::dtos::responses::BookingListResponse;
use crate::error::AppError;
use std::sync::Arc;
use tracing::warn;

pub async fn create_booking(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
    Json(payload): Json<CreateBookingRequest>,
) -> Result<impl IntoResponse, AppError> {
    match state.capacity_guard.create_booking(&payload.account_id, &event_id).await {
        Ok(booking) => Ok((StatusCode::CREATED, Json(booking))),
        Err(e @ (AppError::EventFull | AppError::DuplicateBooking)) => {
            warn!(event_id = %event_id, account_id = %payload.account_id, "Booking refused: {}", e);
            Err(e)
        }
        Err(e) => Err(e),
    }
}

pub async fn list_bookings(
    State(state): State<Arc<AppState>>,
    Path(event_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    let bookings = state.capacity_guard.list_bookings(&event_id).await?;
    Ok(Json(BookingListResponse { event_id, booked: bookings.len(), bookings }))
}

pub async fn delete_booking(
    State(state): State<Arc<AppState>>,
    Path(booking_id): Path<String>,
    Query(owner): Query<BookingOwnerQuery>,
) -> Result<impl IntoResponse, AppError> {
    state.capacity_guard.delete_booking(&booking_id, &owner.account_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;
use serde_json::json;
use thiserror::Error;
use tracing::error;

use crate::domain::models::event_state::{EventState, Transition};

/// Broad classification callers can branch on without matching every variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorKind {
    Validation,
    State,
    Capacity,
    Reference,
    Consistency,
    Forbidden,
    Storage,
    Internal,
}

#[derive(Error, Debug)]
pub enum AppError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),
    #[error("Migration failed: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
    #[error("Resource not found: {0}")]
    NotFound(String),
    #[error("Invalid input: {0}")]
    Validation(String),
    #[error("Cannot {transition} from state {from}")]
    InvalidStateTransition { from: EventState, transition: Transition },
    #[error("Event cannot be edited in the current state: {0}")]
    EditNotAllowed(EventState),
    #[error("Event is not open for booking in state {0}")]
    NotBookable(EventState),
    #[error("Event cannot be reviewed in state {0}")]
    NotReviewable(EventState),
    #[error("Booking for this event already exists")]
    DuplicateBooking,
    #[error("Fully booked event")]
    EventFull,
    #[error("Promoters must not be empty")]
    EmptyPromoterSet,
    #[error("Invalid promoter: {0}")]
    InvalidPromoter(String),
    #[error("Review already exists for this event")]
    DuplicateReview,
    #[error("Event {0} was modified concurrently, reload and retry")]
    ConcurrentModification(String),
    #[error("Consistency error: {0}")]
    Consistency(String),
    #[error("Forbidden: {0}")]
    Forbidden(String),
    #[error("Internal server error: {0}")]
    Internal(String),
}

impl AppError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AppError::Database(_) | AppError::Migration(_) => ErrorKind::Storage,
            AppError::NotFound(_) | AppError::InvalidPromoter(_) => ErrorKind::Reference,
            AppError::Validation(_) => ErrorKind::Validation,
            AppError::InvalidStateTransition { .. }
            | AppError::EditNotAllowed(_)
            | AppError::NotBookable(_)
            | AppError::NotReviewable(_) => ErrorKind::State,
            AppError::DuplicateBooking | AppError::EventFull => ErrorKind::Capacity,
            AppError::EmptyPromoterSet
            | AppError::DuplicateReview
            | AppError::ConcurrentModification(_)
            | AppError::Consistency(_) => ErrorKind::Consistency,
            AppError::Forbidden(_) => ErrorKind::Forbidden,
            AppError::Internal(_) => ErrorKind::Internal,
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let kind = self.kind();
        let (status, message) = match &self {
            AppError::Database(e) => {
                if let Some(db_err) = e.as_database_error()
                    && db_err.is_unique_violation() {
                    return (
                        StatusCode::CONFLICT,
                        Json(json!({ "error": "Resource already exists (duplicate entry)", "kind": ErrorKind::Consistency }))
                    ).into_response();
                }

                error!("Database error: {:?}", e);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal server error".to_string())
            }
            AppError::Internal(msg) => {
                error!("Internal error: {}", msg);
                (StatusCode::INTERNAL_SERVER_ERROR, "Internal error".to_string())
            }
            AppError::InvalidPromoter(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            _ => {
                let status = match kind {
                    ErrorKind::Validation => StatusCode::BAD_REQUEST,
                    ErrorKind::Reference => StatusCode::NOT_FOUND,
                    ErrorKind::Forbidden => StatusCode::FORBIDDEN,
                    ErrorKind::State | ErrorKind::Capacity | ErrorKind::Consistency => StatusCode::CONFLICT,
                    ErrorKind::Storage | ErrorKind::Internal => StatusCode::INTERNAL_SERVER_ERROR,
                };
                (status, self.to_string())
            }
        };

        let body = Json(json!({
            "error": message,
            "kind": kind,
        }));

        (status, body).into_response()
    }
}

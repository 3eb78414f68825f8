pub mod sqlite_account_repo;
pub mod sqlite_association_repo;
pub mod sqlite_booking_repo;
pub mod sqlite_event_repo;
pub mod sqlite_review_repo;

pub mod postgres_account_repo;
pub mod postgres_association_repo;
pub mod postgres_booking_repo;
pub mod postgres_event_repo;
pub mod postgres_review_repo;

use crate::domain::models::event_state::{EventState, UnknownEventState};
use crate::error::AppError;

/// Turns a unique-constraint violation into the domain error for it; everything else stays a database error.
pub(crate) fn map_unique_violation(err: sqlx::Error, on_unique: impl FnOnce() -> AppError) -> AppError {
    let unique = err
        .as_database_error()
        .is_some_and(|db_err| db_err.is_unique_violation());

    if unique {
        on_unique()
    } else {
        AppError::Database(err)
    }
}

pub(crate) fn parse_state(raw: &str) -> Result<EventState, AppError> {
    raw.parse().map_err(|e: UnknownEventState| AppError::Internal(e.to_string()))
}

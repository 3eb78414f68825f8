use chrono::{DateTime, Duration, Utc};

use crate::domain::models::event::EventDetails;
use crate::domain::models::review::{MAX_DESCRIPTION_LEN, MAX_SCORE, MAX_TITLE_LEN, MIN_SCORE};
use crate::error::AppError;

fn require_text(value: &str, field: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(format!("Event {} must not be empty.", field)));
    }
    Ok(())
}

/// Field rules every event must satisfy while it can still be scheduled.
pub fn validate_event_details(details: &EventDetails, now: DateTime<Utc>) -> Result<(), AppError> {
    require_text(&details.title, "title")?;
    require_text(&details.description, "description")?;
    require_text(&details.place, "place")?;

    if details.date < now.date_naive() {
        return Err(AppError::Validation("Event date must be in the future.".into()));
    }
    let starts_at = details.date.and_time(details.time).and_utc();
    if starts_at <= now {
        return Err(AppError::Validation("Event date and time must be in the future.".into()));
    }
    if details.duration_min <= 0 {
        return Err(AppError::Validation("Event duration must be positive.".into()));
    }
    if starts_at.checked_add_signed(Duration::minutes(details.duration_min as i64)).is_none() {
        return Err(AppError::Validation("Event end is out of range.".into()));
    }
    if details.max_participants <= 0 {
        return Err(AppError::Validation("Maximum number of participants must be greater than zero.".into()));
    }
    Ok(())
}

pub fn validate_review_fields(score: i32, title: &str, description: &str) -> Result<(), AppError> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("Title must not be empty.".into()));
    }
    if title.chars().count() > MAX_TITLE_LEN {
        return Err(AppError::Validation("Title is too long.".into()));
    }
    if description.trim().is_empty() {
        return Err(AppError::Validation("Description must not be empty.".into()));
    }
    if description.chars().count() > MAX_DESCRIPTION_LEN {
        return Err(AppError::Validation("Description is too long.".into()));
    }
    if !(MIN_SCORE..=MAX_SCORE).contains(&score) {
        return Err(AppError::Validation(format!("Score must be between {} and {}.", MIN_SCORE, MAX_SCORE)));
    }
    Ok(())
}

pub fn validate_account_fields(email: &str, name: &str) -> Result<(), AppError> {
    let email = email.trim();
    if email.is_empty() || !email.contains('@') {
        return Err(AppError::Validation("A valid email is required.".into()));
    }
    if name.trim().is_empty() {
        return Err(AppError::Validation("Name must not be empty.".into()));
    }
    Ok(())
}

use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Utc};
use sqlx::FromRow;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Booking {
    pub id: String,
    pub event_id: String,
    pub account_id: String,
    pub created_at: DateTime<Utc>,
}

impl Booking {
    pub fn new(event_id: String, account_id: String) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            event_id,
            account_id,
            created_at: Utc::now(),
        }
    }
}

/// What the capacity guard sees of an event while holding its row lock.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CapacitySnapshot {
    pub already_booked: bool,
    pub booked: i64,
    pub max_participants: i32,
}

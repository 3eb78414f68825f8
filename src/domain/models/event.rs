use serde::{Deserialize, Serialize};
use uuid::Uuid;
use chrono::{DateTime, Duration, NaiveDate, NaiveTime, Utc};
use sqlx::FromRow;
use std::collections::BTreeSet;

use crate::domain::models::event_state::EventState;

#[derive(Debug, Serialize, Deserialize, FromRow, Clone)]
pub struct Event {
    pub id: String,
    pub title: String,
    pub description: String,
    pub place: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_min: i32,
    pub max_participants: i32,
    pub average_score: Option<f64>,
    #[sqlx(try_from = "String")]
    pub state: EventState,
    pub version: i64,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// The mutable part of an event. Only ever written while the event is a draft.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct EventDetails {
    pub title: String,
    pub description: String,
    pub place: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_min: i32,
    pub max_participants: i32,
}

/// An event together with the promoters currently associated with it and
/// the number of seats already booked.
#[derive(Debug, Serialize, Clone)]
pub struct PromotedEvent {
    #[serde(flatten)]
    pub event: Event,
    pub promoter_ids: BTreeSet<String>,
    pub current_participants: i64,
}

impl Event {
    pub fn new_draft(details: EventDetails) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4().to_string(),
            title: details.title,
            description: details.description,
            place: details.place,
            date: details.date,
            time: details.time,
            duration_min: details.duration_min,
            max_participants: details.max_participants,
            average_score: None,
            state: EventState::Draft,
            version: 0,
            created_at: now,
            updated_at: now,
        }
    }

    pub fn details(&self) -> EventDetails {
        EventDetails {
            title: self.title.clone(),
            description: self.description.clone(),
            place: self.place.clone(),
            date: self.date,
            time: self.time,
            duration_min: self.duration_min,
            max_participants: self.max_participants,
        }
    }

    pub fn apply_details(&mut self, details: EventDetails) {
        self.title = details.title;
        self.description = details.description;
        self.place = details.place;
        self.date = details.date;
        self.time = details.time;
        self.duration_min = details.duration_min;
        self.max_participants = details.max_participants;
    }

    pub fn starts_at(&self) -> DateTime<Utc> {
        self.date.and_time(self.time).and_utc()
    }

    /// `None` when the end falls outside the representable calendar.
    pub fn ends_at(&self) -> Option<DateTime<Utc>> {
        self.starts_at().checked_add_signed(Duration::minutes(self.duration_min as i64))
    }

    pub fn is_over(&self, now: DateTime<Utc>) -> bool {
        self.ends_at().is_some_and(|end| end <= now)
    }
}

use crate::domain::models::{account::AccountType, event::EventDetails, event_state::EventState};
use chrono::{NaiveDate, NaiveTime};
use serde::Deserialize;

#[derive(Deserialize)]
pub struct CreateAccountRequest {
    pub email: String,
    pub name: String,
    pub account_type: AccountType,
}

/// Body of both draft creation and draft update; the promoter list is the full desired set.
#[derive(Deserialize)]
pub struct EventRequest {
    pub title: String,
    pub description: String,
    pub place: String,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub duration_min: i32,
    pub max_participants: i32,
    pub promoter_ids: Vec<String>,
}

impl EventRequest {
    pub fn into_parts(self) -> (EventDetails, Vec<String>) {
        let details = EventDetails {
            title: self.title,
            description: self.description,
            place: self.place,
            date: self.date,
            time: self.time,
            duration_min: self.duration_min,
            max_participants: self.max_participants,
        };
        (details, self.promoter_ids)
    }
}

#[derive(Deserialize)]
pub struct ListEventsQuery {
    pub state: Option<EventState>,
    pub promoter_id: Option<String>,
}

#[derive(Deserialize)]
pub struct ReconcilePromotersRequest {
    pub promoter_ids: Vec<String>,
}

#[derive(Deserialize)]
pub struct MoveToStateRequest {
    pub state: EventState,
}

#[derive(Deserialize)]
pub struct SubmitForReviewRequest {
    pub promoter_id: String,
}

#[derive(Deserialize)]
pub struct CreateBookingRequest {
    pub account_id: String,
}

#[derive(Deserialize)]
pub struct BookingOwnerQuery {
    pub account_id: String,
}

#[derive(Deserialize)]
pub struct CreateReviewRequest {
    pub consumer_id: String,
    pub score: i32,
    pub title: String,
    pub description: String,
}

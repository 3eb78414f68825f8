use crate::domain::models::{booking::Booking, event_state::EventState};
use serde::Serialize;
use std::collections::BTreeSet;

#[derive(Serialize)]
pub struct StateResponse {
    pub event_id: String,
    pub state: EventState,
}

#[derive(Serialize)]
pub struct ReconcileResponse {
    pub event_id: String,
    pub added: BTreeSet<String>,
    pub removed: BTreeSet<String>,
}

#[derive(Serialize)]
pub struct ScoreResponse {
    pub event_id: String,
    pub average_score: Option<f64>,
}

#[derive(Serialize)]
pub struct BookingListResponse {
    pub event_id: String,
    pub booked: usize,
    pub bookings: Vec<Booking>,
}

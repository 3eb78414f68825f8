use crate::domain::models::{
    account::Account, association::PromoterDiff, booking::Booking, event::Event,
    event_state::EventState, review::{Review, ScoredReview},
};
use crate::error::AppError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use std::collections::BTreeSet;

pub trait Clock: Send + Sync {
    fn now(&self) -> DateTime<Utc>;
}

#[async_trait]
pub trait AccountDirectory: Send + Sync {
    async fn create(&self, account: &Account) -> Result<Account, AppError>;
    async fn lookup(&self, id: &str) -> Result<Option<Account>, AppError>;
}

#[async_trait]
pub trait EventRepository: Send + Sync {
    /// Inserts the draft and its initial associations in one transaction.
    async fn create_with_promoters(&self, event: &Event, promoter_ids: &BTreeSet<String>) -> Result<Event, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError>;
    async fn list(&self, state: Option<EventState>, promoter_id: Option<&str>) -> Result<Vec<Event>, AppError>;
    /// Writes the draft fields and applies the promoter diff in one transaction.
    /// `event.version` is the version the caller read; the row must still be a draft at that version.
    async fn update_draft(&self, event: &Event, diff: &PromoterDiff) -> Result<Event, AppError>;
    async fn update_state(&self, id: &str, expected_version: i64, state: EventState) -> Result<Event, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait PromoterAssociationRepository: Send + Sync {
    async fn promoter_ids(&self, event_id: &str) -> Result<BTreeSet<String>, AppError>;
}

#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Checks uniqueness and capacity and inserts, all under a lock on the event row.
    async fn create_within_capacity(&self, booking: &Booking) -> Result<Booking, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError>;
    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError>;
    async fn delete(&self, id: &str) -> Result<(), AppError>;
}

#[async_trait]
pub trait ReviewRepository: Send + Sync {
    /// Inserts the review and recomputes the event average in the same transaction.
    async fn create_and_refresh(&self, review: &Review) -> Result<ScoredReview, AppError>;
    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, AppError>;
    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Review>, AppError>;
    /// Deletes the review and recomputes the event average in the same transaction.
    async fn delete_and_refresh(&self, id: &str) -> Result<Option<f64>, AppError>;
    async fn refresh_average(&self, event_id: &str) -> Result<Option<f64>, AppError>;
}

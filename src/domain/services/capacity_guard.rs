use std::sync::Arc;
use tracing::info;

use crate::domain::{
    models::booking::{Booking, CapacitySnapshot},
    ports::{AccountDirectory, BookingRepository, EventRepository},
};
use crate::error::AppError;

/// Decides whether one more booking fits. Duplicates are reported before fullness,
/// so a holder re-booking a full event still learns it already has a seat.
pub fn admit(snapshot: &CapacitySnapshot) -> Result<(), AppError> {
    if snapshot.already_booked {
        return Err(AppError::DuplicateBooking);
    }
    if snapshot.booked >= snapshot.max_participants as i64 {
        return Err(AppError::EventFull);
    }
    Ok(())
}

pub struct BookingCapacityGuard {
    events: Arc<dyn EventRepository>,
    accounts: Arc<dyn AccountDirectory>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingCapacityGuard {
    pub fn new(
        events: Arc<dyn EventRepository>,
        accounts: Arc<dyn AccountDirectory>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self { events, accounts, bookings }
    }

    pub async fn create_booking(&self, account_id: &str, event_id: &str) -> Result<Booking, AppError> {
        let event = self.events.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;

        self.accounts.lookup(account_id).await?
            .ok_or(AppError::NotFound("Account not found".into()))?;

        if !event.state.is_bookable() {
            return Err(AppError::NotBookable(event.state));
        }

        let booking = Booking::new(event.id.clone(), account_id.to_string());
        let created = self.bookings.create_within_capacity(&booking).await?;

        info!(event_id = %event.id, booking_id = %created.id, "Booking confirmed");
        Ok(created)
    }

    /// Ownership is checked against the account the caller acts for.
    pub async fn delete_booking(&self, booking_id: &str, account_id: &str) -> Result<(), AppError> {
        let booking = self.bookings.find_by_id(booking_id).await?
            .ok_or(AppError::NotFound("Booking not found".into()))?;

        if booking.account_id != account_id {
            return Err(AppError::Forbidden("Booking belongs to another account".into()));
        }

        self.bookings.delete(&booking.id).await?;
        info!(event_id = %booking.event_id, booking_id = %booking.id, "Booking cancelled");
        Ok(())
    }

    pub async fn list_bookings(&self, event_id: &str) -> Result<Vec<Booking>, AppError> {
        self.events.find_by_id(event_id).await?
            .ok_or(AppError::NotFound("Event not found".into()))?;
        self.bookings.list_by_event(event_id).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn snapshot(already_booked: bool, booked: i64, max_participants: i32) -> CapacitySnapshot {
        CapacitySnapshot { already_booked, booked, max_participants }
    }

    #[test]
    fn admits_while_seats_remain() {
        assert!(admit(&snapshot(false, 0, 1)).is_ok());
        assert!(admit(&snapshot(false, 9, 10)).is_ok());
    }

    #[test]
    fn refuses_when_full() {
        assert!(matches!(admit(&snapshot(false, 1, 1)), Err(AppError::EventFull)));
        assert!(matches!(admit(&snapshot(false, 12, 10)), Err(AppError::EventFull)));
    }

    #[test]
    fn duplicate_is_reported_before_fullness() {
        assert!(matches!(admit(&snapshot(true, 1, 1)), Err(AppError::DuplicateBooking)));
        assert!(matches!(admit(&snapshot(true, 0, 5)), Err(AppError::DuplicateBooking)));
    }
}

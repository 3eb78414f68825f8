use crate::domain::{
    models::booking::{Booking, CapacitySnapshot},
    ports::BookingRepository,
    services::capacity_guard::admit,
};
use crate::error::AppError;
use crate::infra::repositories::{map_unique_violation, parse_state};
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteBookingRepo {
    pool: SqlitePool,
}

impl SqliteBookingRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl BookingRepository for SqliteBookingRepo {
    async fn create_within_capacity(&self, booking: &Booking) -> Result<Booking, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;

        // SQLite has no FOR UPDATE. A self-assignment as the first statement takes the
        // database write lock, so the count below cannot go stale before the insert.
        let locked: Option<(String, i32)> = sqlx::query_as(
            "UPDATE events SET max_participants = max_participants WHERE id = ? RETURNING state, max_participants"
        )
            .bind(&booking.event_id)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        let (raw_state, max_participants) = locked.ok_or(AppError::NotFound("Event not found".into()))?;
        let state = parse_state(&raw_state)?;
        if !state.is_bookable() {
            return Err(AppError::NotBookable(state));
        }

        let already_booked: bool = sqlx::query_scalar("SELECT EXISTS(SELECT 1 FROM bookings WHERE event_id = ? AND account_id = ?)")
            .bind(&booking.event_id).bind(&booking.account_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;
        let booked: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE event_id = ?")
            .bind(&booking.event_id)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        admit(&CapacitySnapshot { already_booked, booked, max_participants })?;

        let created = sqlx::query_as::<_, Booking>(
            "INSERT INTO bookings (id, event_id, account_id, created_at) VALUES (?, ?, ?, ?) RETURNING *"
        )
            .bind(&booking.id).bind(&booking.event_id).bind(&booking.account_id).bind(booking.created_at)
            .fetch_one(&mut *tx).await
            .map_err(|e| map_unique_violation(e, || AppError::DuplicateBooking))?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Booking>, AppError> {
        sqlx::query_as::<_, Booking>("SELECT * FROM bookings WHERE event_id = ? ORDER BY created_at ASC").bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn count_by_event(&self, event_id: &str) -> Result<i64, AppError> {
        sqlx::query_scalar("SELECT COUNT(*) FROM bookings WHERE event_id = ?").bind(event_id).fetch_one(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM bookings WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Booking not found".into())); }
        Ok(())
    }
}

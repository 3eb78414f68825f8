use crate::domain::{
    models::{association::PromoterDiff, event::Event, event_state::EventState},
    ports::EventRepository,
};
use crate::error::AppError;
use crate::infra::repositories::{map_unique_violation, parse_state};
use async_trait::async_trait;
use chrono::Utc;
use sqlx::{Sqlite, SqlitePool, Transaction};
use std::collections::BTreeSet;

pub struct SqliteEventRepo {
    pool: SqlitePool,
}

impl SqliteEventRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Adds before removing, so the event never passes through an empty promoter set.
async fn apply_promoter_diff(tx: &mut Transaction<'_, Sqlite>, event_id: &str, diff: &PromoterDiff) -> Result<(), AppError> {
    let now = Utc::now();
    for promoter_id in &diff.to_add {
        // The account type is re-checked here so a concurrent demotion cannot slip through.
        let result = sqlx::query(
            "INSERT INTO event_promoters (event_id, promoter_id, created_at)
             SELECT ?, a.id, ? FROM accounts a
             WHERE a.id = ? AND a.account_type = 'PROMOTER'
               AND NOT EXISTS (SELECT 1 FROM event_promoters ep WHERE ep.event_id = ? AND ep.promoter_id = a.id)"
        )
            .bind(event_id).bind(now).bind(promoter_id).bind(event_id)
            .execute(&mut **tx).await
            .map_err(|e| map_unique_violation(e, || AppError::Consistency(format!("Promoter {} associated concurrently", promoter_id))))?;

        if result.rows_affected() == 0 {
            return Err(AppError::InvalidPromoter(format!("account {} is not an unassociated promoter", promoter_id)));
        }
    }

    for promoter_id in &diff.to_remove {
        let result = sqlx::query("DELETE FROM event_promoters WHERE event_id = ? AND promoter_id = ?")
            .bind(event_id).bind(promoter_id)
            .execute(&mut **tx).await.map_err(AppError::Database)?;

        if result.rows_affected() != 1 {
            return Err(AppError::Consistency(format!("stale association {} on event {}", promoter_id, event_id)));
        }
    }
    Ok(())
}

/// Works out why a guarded write matched no row.
async fn explain_rejected_write(tx: &mut Transaction<'_, Sqlite>, id: &str, require_draft: bool) -> Result<AppError, AppError> {
    let state: Option<String> = sqlx::query_scalar("SELECT state FROM events WHERE id = ?")
        .bind(id).fetch_optional(&mut **tx).await.map_err(AppError::Database)?;

    Ok(match state {
        None => AppError::NotFound("Event not found".into()),
        Some(raw) => {
            let state = parse_state(&raw)?;
            if require_draft && !state.can_edit() {
                AppError::EditNotAllowed(state)
            } else {
                AppError::ConcurrentModification(id.to_string())
            }
        }
    })
}

#[async_trait]
impl EventRepository for SqliteEventRepo {
    async fn create_with_promoters(&self, event: &Event, promoter_ids: &BTreeSet<String>) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let created = sqlx::query_as::<_, Event>(
            "INSERT INTO events (id, title, description, place, date, time, duration_min, max_participants, average_score, state, version, created_at, updated_at)
             VALUES (?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&event.id).bind(&event.title).bind(&event.description).bind(&event.place)
            .bind(event.date).bind(event.time).bind(event.duration_min).bind(event.max_participants)
            .bind(event.average_score).bind(event.state.as_str()).bind(event.version)
            .bind(event.created_at).bind(event.updated_at)
            .fetch_one(&mut *tx).await.map_err(AppError::Database)?;

        let initial = PromoterDiff { to_add: promoter_ids.clone(), to_remove: BTreeSet::new() };
        apply_promoter_diff(&mut tx, &created.id, &initial).await?;

        tx.commit().await.map_err(AppError::Database)?;
        Ok(created)
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Event>, AppError> {
        sqlx::query_as::<_, Event>("SELECT * FROM events WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list(&self, state: Option<EventState>, promoter_id: Option<&str>) -> Result<Vec<Event>, AppError> {
        let state = state.map(|s| s.as_str());
        sqlx::query_as::<_, Event>(
            "SELECT e.* FROM events e
             WHERE (? IS NULL OR e.state = ?)
               AND (? IS NULL OR EXISTS (
                   SELECT 1 FROM event_promoters ep WHERE ep.event_id = e.id AND ep.promoter_id = ?))
             ORDER BY e.date ASC, e.time ASC"
        )
            .bind(state).bind(state)
            .bind(promoter_id).bind(promoter_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)
    }

    async fn update_draft(&self, event: &Event, diff: &PromoterDiff) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let updated = sqlx::query_as::<_, Event>(
            "UPDATE events SET title=?, description=?, place=?, date=?, time=?, duration_min=?, max_participants=?, version = version + 1, updated_at=?
             WHERE id=? AND version=? AND state='DRAFT'
             RETURNING *"
        )
            .bind(&event.title).bind(&event.description).bind(&event.place)
            .bind(event.date).bind(event.time).bind(event.duration_min).bind(event.max_participants)
            .bind(Utc::now()).bind(&event.id).bind(event.version)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        let Some(updated) = updated else {
            return Err(explain_rejected_write(&mut tx, &event.id, true).await?);
        };

        apply_promoter_diff(&mut tx, &updated.id, diff).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn update_state(&self, id: &str, expected_version: i64, state: EventState) -> Result<Event, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let updated = sqlx::query_as::<_, Event>(
            "UPDATE events SET state=?, version = version + 1, updated_at=? WHERE id=? AND version=? RETURNING *"
        )
            .bind(state.as_str()).bind(Utc::now()).bind(id).bind(expected_version)
            .fetch_optional(&mut *tx).await.map_err(AppError::Database)?;

        let Some(updated) = updated else {
            return Err(explain_rejected_write(&mut tx, id, false).await?);
        };

        tx.commit().await.map_err(AppError::Database)?;
        Ok(updated)
    }

    async fn delete(&self, id: &str) -> Result<(), AppError> {
        let result = sqlx::query("DELETE FROM events WHERE id = ?").bind(id).execute(&self.pool).await.map_err(AppError::Database)?;
        if result.rows_affected() == 0 { return Err(AppError::NotFound("Event not found".into())); }
        Ok(())
    }
}

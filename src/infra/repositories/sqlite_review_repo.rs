use crate::domain::{
    models::review::{Review, ScoredReview},
    ports::ReviewRepository,
    services::review_scores::mean_score,
};
use crate::error::AppError;
use crate::infra::repositories::map_unique_violation;
use async_trait::async_trait;
use sqlx::{Sqlite, SqlitePool, Transaction};

pub struct SqliteReviewRepo {
    pool: SqlitePool,
}

impl SqliteReviewRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

/// Takes the write lock through the event row so score writers serialize.
async fn lock_event(tx: &mut Transaction<'_, Sqlite>, event_id: &str) -> Result<(), AppError> {
    let locked: Option<String> = sqlx::query_scalar("UPDATE events SET average_score = average_score WHERE id = ? RETURNING id")
        .bind(event_id).fetch_optional(&mut **tx).await.map_err(AppError::Database)?;
    locked.map(|_| ()).ok_or(AppError::NotFound("Event not found".into()))
}

async fn store_average(tx: &mut Transaction<'_, Sqlite>, event_id: &str) -> Result<Option<f64>, AppError> {
    let scores: Vec<i32> = sqlx::query_scalar("SELECT score FROM reviews WHERE event_id = ?")
        .bind(event_id).fetch_all(&mut **tx).await.map_err(AppError::Database)?;
    let average = mean_score(&scores);

    sqlx::query("UPDATE events SET average_score = ? WHERE id = ?")
        .bind(average).bind(event_id)
        .execute(&mut **tx).await.map_err(AppError::Database)?;
    Ok(average)
}

#[async_trait]
impl ReviewRepository for SqliteReviewRepo {
    async fn create_and_refresh(&self, review: &Review) -> Result<ScoredReview, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        lock_event(&mut tx, &review.event_id).await?;

        let created = sqlx::query_as::<_, Review>(
            "INSERT INTO reviews (id, event_id, consumer_id, score, title, description, created_at)
             VALUES (?, ?, ?, ?, ?, ?, ?)
             RETURNING *"
        )
            .bind(&review.id).bind(&review.event_id).bind(&review.consumer_id).bind(review.score)
            .bind(&review.title).bind(&review.description).bind(review.created_at)
            .fetch_one(&mut *tx).await
            .map_err(|e| map_unique_violation(e, || AppError::DuplicateReview))?;

        let average_score = store_average(&mut tx, &created.event_id).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(ScoredReview { review: created, average_score })
    }

    async fn find_by_id(&self, id: &str) -> Result<Option<Review>, AppError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }

    async fn list_by_event(&self, event_id: &str) -> Result<Vec<Review>, AppError> {
        sqlx::query_as::<_, Review>("SELECT * FROM reviews WHERE event_id = ? ORDER BY created_at ASC").bind(event_id).fetch_all(&self.pool).await.map_err(AppError::Database)
    }

    async fn delete_and_refresh(&self, id: &str) -> Result<Option<f64>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        let event_id: Option<String> = sqlx::query_scalar("DELETE FROM reviews WHERE id = ? RETURNING event_id")
            .bind(id).fetch_optional(&mut *tx).await.map_err(AppError::Database)?;
        let event_id = event_id.ok_or(AppError::NotFound("Review not found".into()))?;

        let average = store_average(&mut tx, &event_id).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(average)
    }

    async fn refresh_average(&self, event_id: &str) -> Result<Option<f64>, AppError> {
        let mut tx = self.pool.begin().await.map_err(AppError::Database)?;
        lock_event(&mut tx, event_id).await?;
        let average = store_average(&mut tx, event_id).await?;
        tx.commit().await.map_err(AppError::Database)?;
        Ok(average)
    }
}

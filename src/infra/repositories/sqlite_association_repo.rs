use crate::domain::ports::PromoterAssociationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::SqlitePool;
use std::collections::BTreeSet;

pub struct SqliteAssociationRepo {
    pool: SqlitePool,
}

impl SqliteAssociationRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoterAssociationRepository for SqliteAssociationRepo {
    async fn promoter_ids(&self, event_id: &str) -> Result<BTreeSet<String>, AppError> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT promoter_id FROM event_promoters WHERE event_id = ?")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(ids.into_iter().collect())
    }
}

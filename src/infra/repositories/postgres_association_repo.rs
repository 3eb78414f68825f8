use crate::domain::ports::PromoterAssociationRepository;
use crate::error::AppError;
use async_trait::async_trait;
use sqlx::PgPool;
use std::collections::BTreeSet;

pub struct PostgresAssociationRepo {
    pool: PgPool,
}

impl PostgresAssociationRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl PromoterAssociationRepository for PostgresAssociationRepo {
    async fn promoter_ids(&self, event_id: &str) -> Result<BTreeSet<String>, AppError> {
        let ids: Vec<String> = sqlx::query_scalar("SELECT promoter_id FROM event_promoters WHERE event_id = $1")
            .bind(event_id)
            .fetch_all(&self.pool)
            .await
            .map_err(AppError::Database)?;
        Ok(ids.into_iter().collect())
    }
}

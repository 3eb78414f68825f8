use crate::domain::{models::account::Account, ports::AccountDirectory};
use crate::error::AppError;
use crate::infra::repositories::map_unique_violation;
use async_trait::async_trait;
use sqlx::SqlitePool;

pub struct SqliteAccountRepo {
    pool: SqlitePool,
}

impl SqliteAccountRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AccountDirectory for SqliteAccountRepo {
    async fn create(&self, account: &Account) -> Result<Account, AppError> {
        sqlx::query_as::<_, Account>(
            "INSERT INTO accounts (id, email, name, account_type, created_at) VALUES (?, ?, ?, ?, ?) RETURNING *"
        )
            .bind(&account.id).bind(&account.email).bind(&account.name)
            .bind(account.account_type.as_str()).bind(account.created_at)
            .fetch_one(&self.pool).await
            .map_err(|e| map_unique_violation(e, || AppError::Consistency(format!("Email {} is already registered", account.email))))
    }

    async fn lookup(&self, id: &str) -> Result<Option<Account>, AppError> {
        sqlx::query_as::<_, Account>("SELECT * FROM accounts WHERE id = ?").bind(id).fetch_optional(&self.pool).await.map_err(AppError::Database)
    }
}

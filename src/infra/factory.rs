use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;
use sqlx::{postgres::{PgPoolOptions, PgConnectOptions}, sqlite::{SqlitePoolOptions, SqliteJournalMode, SqliteConnectOptions}};
use sqlx::{PgPool, SqlitePool, ConnectOptions};
use tracing::info;
use tracing::log::LevelFilter;

use crate::config::Config;
use crate::error::AppError;
use crate::state::{AppState, Repositories};
use crate::infra::clock::SystemClock;
use crate::infra::repositories::{
    postgres_account_repo::PostgresAccountRepo, postgres_association_repo::PostgresAssociationRepo,
    postgres_booking_repo::PostgresBookingRepo, postgres_event_repo::PostgresEventRepo,
    postgres_review_repo::PostgresReviewRepo,
    sqlite_account_repo::SqliteAccountRepo, sqlite_association_repo::SqliteAssociationRepo,
    sqlite_booking_repo::SqliteBookingRepo, sqlite_event_repo::SqliteEventRepo,
    sqlite_review_repo::SqliteReviewRepo,
};

const SQLITE_DEFAULT_CONNECTIONS: u32 = 5;
const POSTGRES_DEFAULT_CONNECTIONS: u32 = 10;

pub async fn bootstrap_state(config: &Config) -> Result<AppState, AppError> {
    let repos = if config.is_postgres() {
        info!("Initializing PostgreSQL connection...");
        let pool = connect_postgres(config).await?;
        postgres_repositories(pool)
    } else {
        info!("Initializing SQLite connection with WAL Mode...");
        let pool = connect_sqlite(config).await?;
        sqlite_repositories(pool)
    };

    Ok(AppState::assemble(config.clone(), repos, Arc::new(SystemClock)))
}

pub async fn connect_postgres(config: &Config) -> Result<PgPool, AppError> {
    let opts: PgConnectOptions = config.database_url.parse().map_err(AppError::Database)?;
    let opts = opts.log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = PgPoolOptions::new()
        .max_connections(config.db_max_connections.unwrap_or(POSTGRES_DEFAULT_CONNECTIONS))
        .connect_with(opts)
        .await
        .map_err(AppError::Database)?;

    sqlx::migrate!("./migrations/postgres").run(&pool).await?;
    Ok(pool)
}

pub async fn connect_sqlite(config: &Config) -> Result<SqlitePool, AppError> {
    let opts = SqliteConnectOptions::from_str(&config.database_url)
        .map_err(AppError::Database)?
        .create_if_missing(true)
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(Duration::from_secs(5))
        .log_statements(LevelFilter::Debug)
        .log_slow_statements(LevelFilter::Warn, Duration::from_millis(500));

    let pool = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections.unwrap_or(SQLITE_DEFAULT_CONNECTIONS))
        .connect_with(opts)
        .await
        .map_err(AppError::Database)?;

    sqlx::migrate!("./migrations/sqlite").run(&pool).await?;
    Ok(pool)
}

pub fn sqlite_repositories(pool: SqlitePool) -> Repositories {
    Repositories {
        accounts: Arc::new(SqliteAccountRepo::new(pool.clone())),
        events: Arc::new(SqliteEventRepo::new(pool.clone())),
        associations: Arc::new(SqliteAssociationRepo::new(pool.clone())),
        bookings: Arc::new(SqliteBookingRepo::new(pool.clone())),
        reviews: Arc::new(SqliteReviewRepo::new(pool)),
    }
}

pub fn postgres_repositories(pool: PgPool) -> Repositories {
    Repositories {
        accounts: Arc::new(PostgresAccountRepo::new(pool.clone())),
        events: Arc::new(PostgresEventRepo::new(pool.clone())),
        associations: Arc::new(PostgresAssociationRepo::new(pool.clone())),
        bookings: Arc::new(PostgresBookingRepo::new(pool.clone())),
        reviews: Arc::new(PostgresReviewRepo::new(pool)),
    }
}

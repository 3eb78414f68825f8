use std::env;

#[derive(Clone)]
pub struct Config {
    pub database_url: String,
    pub port: u16,
    /// Pool size; falls back to a per-backend default when unset.
    pub db_max_connections: Option<u32>,
}

impl Config {
    pub fn from_env() -> Self {
        Self {
            database_url: env::var("DATABASE_URL").expect("DATABASE_URL must be set"),
            port: env::var("PORT").unwrap_or_else(|_| "3000".to_string()).parse().expect("PORT must be a number"),
            db_max_connections: env::var("DB_MAX_CONNECTIONS")
                .ok()
                .map(|v| v.parse().expect("DB_MAX_CONNECTIONS must be a number")),
        }
    }

    pub fn is_postgres(&self) -> bool {
        self.database_url.starts_with("postgres://") || self.database_url.starts_with("postgresql://")
    }
}

use promo_events_backend::{
    api::router::create_router,
    config::Config,
    domain::{
        models::{
            account::{Account, AccountType},
            event::{EventDetails, PromotedEvent},
            event_state::EventState,
        },
        ports::Clock,
    },
    infra::factory::sqlite_repositories,
    state::AppState,
};
use axum::{body::Body, http::Request, Router};
use chrono::{DateTime, Duration, NaiveTime, Utc};
use serde_json::Value;
use sqlx::{sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions}, Pool, Sqlite};
use std::str::FromStr;
use std::sync::{Arc, Mutex};
use tower::ServiceExt;
use uuid::Uuid;

/// Clock the tests can move, so events can be authored in the future and reviewed after they end.
pub struct MockClock {
    now: Mutex<DateTime<Utc>>,
}

impl MockClock {
    pub fn new(now: DateTime<Utc>) -> Self {
        Self { now: Mutex::new(now) }
    }

    #[allow(dead_code)]
    pub fn advance(&self, by: Duration) {
        let mut now = self.now.lock().unwrap();
        *now += by;
    }
}

impl Clock for MockClock {
    fn now(&self) -> DateTime<Utc> {
        *self.now.lock().unwrap()
    }
}

#[allow(dead_code)]
pub struct TestApp {
    pub router: Router,
    pub pool: Pool<Sqlite>,
    pub db_filename: String,
    pub state: Arc<AppState>,
    pub clock: Arc<MockClock>,
}

#[allow(dead_code)]
impl TestApp {
    pub async fn new() -> Self {
        let db_filename = format!("test_{}.db", Uuid::new_v4());
        let db_url = format!("sqlite://{}?mode=rwc", db_filename);

        let connection_options = SqliteConnectOptions::from_str(&db_url)
            .unwrap()
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(std::time::Duration::from_secs(10));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect_with(connection_options)
            .await
            .expect("Failed to connect to test db");

        sqlx::migrate!("./migrations/sqlite")
            .run(&pool)
            .await
            .expect("Failed to migrate test db");

        let config = Config {
            database_url: db_url,
            port: 0,
            db_max_connections: Some(5),
        };

        let clock = Arc::new(MockClock::new(Utc::now()));
        let state = Arc::new(AppState::assemble(config, sqlite_repositories(pool.clone()), clock.clone()));
        let router = create_router(state.clone());

        Self {
            router,
            pool,
            db_filename,
            state,
            clock,
        }
    }

    pub async fn account(&self, account_type: AccountType) -> Account {
        let tag = Uuid::new_v4().simple().to_string();
        let account = Account::new(format!("{}@example.com", tag), format!("user-{}", &tag[..8]), account_type);
        self.state.account_repo.create(&account).await.expect("Failed to create account")
    }

    pub async fn promoter(&self) -> Account {
        self.account(AccountType::Promoter).await
    }

    pub async fn consumer(&self) -> Account {
        self.account(AccountType::Consumer).await
    }

    /// A valid draft starting a week from the clock's current time.
    pub fn details(&self, max_participants: i32) -> EventDetails {
        let start = self.clock.now() + Duration::days(7);
        EventDetails {
            title: "Harbour lights".into(),
            description: "Evening concert by the docks".into(),
            place: "Pier 4".into(),
            date: start.date_naive(),
            time: NaiveTime::from_hms_opt(19, 0, 0).unwrap(),
            duration_min: 120,
            max_participants,
        }
    }

    pub async fn draft<S: AsRef<str>>(&self, promoter_ids: &[S], max_participants: i32) -> PromotedEvent {
        self.state.lifecycle
            .create_draft(self.details(max_participants), promoter_ids.iter().map(|s| s.as_ref().to_string()).collect())
            .await
            .expect("Failed to create draft")
    }

    pub async fn published(&self, max_participants: i32) -> PromotedEvent {
        let promoter = self.promoter().await;
        let event = self.draft(&[&promoter.id], max_participants).await;
        self.state.lifecycle.move_forward(&event.event.id).await.unwrap();
        let state = self.state.lifecycle.move_forward(&event.event.id).await.unwrap();
        assert_eq!(state, EventState::Published);
        event
    }

    pub async fn send(&self, request: Request<Body>) -> (axum::http::StatusCode, Value) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        (status, parse_body(response).await)
    }
}

#[allow(dead_code)]
pub async fn parse_body(response: axum::response::Response) -> Value {
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX).await.unwrap();
    if bytes.is_empty() {
        return Value::Null;
    }
    serde_json::from_slice(&bytes).unwrap()
}

impl Drop for TestApp {
    fn drop(&mut self) {
        let _ = std::fs::remove_file(&self.db_filename);
        let _ = std::fs::remove_file(format!("{}-wal", self.db_filename));
        let _ = std::fs::remove_file(format!("{}-shm", self.db_filename));
    }
}

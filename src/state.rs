use std::{sync::Arc, time::Duration};

use chrono::{Local, NaiveDate};
use sqlx::{
    sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions},
    SqlitePool,
};

use crate::{config::Config, publisher::EventPublisher};

/// How long a statement waits for another connection's write lock
const BUSY_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Clone)]
pub struct AppState {
    pub db: SqlitePool,
    pub events: EventPublisher,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(db: SqlitePool, events: EventPublisher, config: Config) -> Self {
        Self { db, events, config: Arc::new(config) }
    }

    /// The calendar day used for every "not after today" rule
    pub fn today(&self) -> NaiveDate { Local::now().date_naive() }
}

/// Opens the pool and brings the schema up to date
pub async fn connect_database(config: &Config) -> Result<SqlitePool, sqlx::Error> {
    let options: SqliteConnectOptions = config.database_url.parse()?;
    // in-memory databases ignore the WAL request and keep their own journal
    let options = options
        .foreign_keys(true)
        .journal_mode(SqliteJournalMode::Wal)
        .busy_timeout(BUSY_TIMEOUT);
    let db = SqlitePoolOptions::new()
        .max_connections(config.db_max_connections)
        // an in-memory database lives only as long as its connection
        .idle_timeout(None)
        .max_lifetime(None)
        .connect_with(options)
        .await?;
    sqlx::migrate!("./migrations").run(&db).await?;
    Ok(db)
}

use std::str::FromStr;
use std::sync::Arc;
use std::time::Duration;

use sqlx::SqlitePool;
use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use thiserror::Error;

use crate::repository::Storage;

mod category_repo;
mod mapping;
mod migrate;
mod question_repo;

/// Both repository traits over one `SQLite` pool.
#[derive(Clone)]
pub struct SqliteRepository {
    pool: SqlitePool,
}

#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SqliteInitError {
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
}

impl SqliteRepository {
    /// Open the database at `database_url` and bring its schema up to date.
    ///
    /// # Errors
    ///
    /// Returns `SqliteInitError` if the URL is malformed, the database cannot
    /// be opened, or a migration fails.
    pub async fn open(database_url: &str) -> Result<Self, SqliteInitError> {
        let options = SqliteConnectOptions::from_str(database_url)?
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(5));
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        migrate::run_migrations(&pool).await?;
        tracing::debug!(database_url, "sqlite question bank ready");
        Ok(Self { pool })
    }
}

impl Storage {
    /// Build a `Storage` backed by `SQLite`.
    ///
    /// # Errors
    ///
    /// See [`SqliteRepository::open`].
    pub async fn sqlite(database_url: &str) -> Result<Self, SqliteInitError> {
        let repo = SqliteRepository::open(database_url).await?;
        Ok(Self {
            categories: Arc::new(repo.clone()),
            questions: Arc::new(repo),
        })
    }
}

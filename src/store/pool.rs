//! Connection pool for the quiz database

use std::str::FromStr;
use std::time::Duration;

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePool, SqlitePoolOptions};

use super::errors::{StoreError, StoreResult};
use super::schema;
use super::session::Session;

/// Pool settings taken from the process configuration
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StoreConfig {
    pub database_url: String,
    pub max_connections: u32,
    pub acquire_timeout: Duration,
}

impl StoreConfig {
    /// Config for the given URL with default pool sizing
    pub fn new(database_url: impl Into<String>) -> Self {
        Self {
            database_url: database_url.into(),
            max_connections: 5,
            acquire_timeout: Duration::from_secs(5),
        }
    }
}

/// Handle to the quiz database.
///
/// Cloning is cheap; all clones share one pool. The pool is the only
/// state shared between requests.
#[derive(Debug, Clone)]
pub struct Store {
    pool: SqlitePool,
}

impl Store {
    /// Open the pool. The database file is created if missing and
    /// foreign keys are enforced on every connection.
    ///
    /// The database runs in WAL mode so an open read transaction never
    /// blocks another session's commit.
    pub async fn connect(config: &StoreConfig) -> StoreResult<Self> {
        let options = SqliteConnectOptions::from_str(&config.database_url)
            .map_err(|source| StoreError::InvalidUrl {
                url: config.database_url.clone(),
                source,
            })?
            .create_if_missing(true)
            .foreign_keys(true)
            .journal_mode(SqliteJournalMode::Wal);

        let pool = SqlitePoolOptions::new()
            .max_connections(config.max_connections)
            .acquire_timeout(config.acquire_timeout)
            .connect_with(options)
            .await
            .map_err(StoreError::Connect)?;

        Ok(Self { pool })
    }

    /// Connect and make sure both tables exist
    pub async fn open(config: &StoreConfig) -> StoreResult<Self> {
        let store = Self::connect(config).await?;
        store.create_schema().await?;
        Ok(store)
    }

    /// Create the tables if absent
    pub async fn create_schema(&self) -> StoreResult<()> {
        schema::create_all(&self.pool).await
    }

    /// Acquire a session for one unit of work
    pub async fn session(&self) -> StoreResult<Session> {
        Session::begin(&self.pool).await
    }

    /// Close every pooled connection
    pub async fn close(&self) {
        self.pool.close().await;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    async fn temp_store() -> (TempDir, Store) {
        let tmp = TempDir::new().unwrap();
        let url = format!("sqlite://{}", tmp.path().join("quiz.db").display());
        let store = Store::open(&StoreConfig::new(url)).await.unwrap();
        (tmp, store)
    }

    #[test]
    fn test_default_pool_settings() {
        let config = StoreConfig::new("sqlite://quiz.db");
        assert_eq!(config.max_connections, 5);
        assert_eq!(config.acquire_timeout, Duration::from_secs(5));
    }

    #[tokio::test]
    async fn test_unreachable_database_fails_to_connect() {
        let tmp = TempDir::new().unwrap();
        let url = format!(
            "sqlite://{}",
            tmp.path().join("missing").join("quiz.db").display()
        );

        let err = Store::connect(&StoreConfig::new(url)).await.unwrap_err();
        assert_eq!(err.code(), "QUIZ_STORE_CONNECT_FAILED");
    }

    #[tokio::test]
    async fn test_malformed_url_is_rejected() {
        let err = Store::connect(&StoreConfig::new("sqlite://quiz.db?mode=bogus"))
            .await
            .unwrap_err();
        assert!(matches!(err, StoreError::InvalidUrl { .. }));
        assert_eq!(err.code(), "QUIZ_STORE_INVALID_URL");
        assert!(err.to_string().contains("sqlite://quiz.db?mode=bogus"));
    }

    #[tokio::test]
    async fn test_database_runs_in_wal_mode() {
        let (_tmp, store) = temp_store().await;
        let mode: String = sqlx::query_scalar("PRAGMA journal_mode")
            .fetch_one(&store.pool)
            .await
            .unwrap();
        assert_eq!(mode.to_lowercase(), "wal");
    }

    #[tokio::test]
    async fn test_schema_creation_is_repeatable() {
        let (_tmp, store) = temp_store().await;
        store.create_schema().await.unwrap();
        store.create_schema().await.unwrap();
    }

    #[tokio::test]
    async fn test_database_file_is_created() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("fresh.db");
        let url = format!("sqlite://{}", path.display());

        let store = Store::open(&StoreConfig::new(url)).await.unwrap();
        assert!(path.exists());
        store.close().await;
    }
}

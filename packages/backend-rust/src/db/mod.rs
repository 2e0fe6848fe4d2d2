pub mod schema;
pub mod vocabulary;

use std::str::FromStr;
use std::time::{Duration, Instant};

use sqlx::sqlite::{SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions};
use sqlx::SqlitePool;
use thiserror::Error;
use wortkarten_algo::DataIntegrityError;

use crate::db::schema::VOCABULARY_SCHEMA;

const HEALTH_CHECK_TIMEOUT: Duration = Duration::from_secs(2);

#[derive(Debug, Error)]
pub enum CatalogError {
    #[error("invalid database url: {0}")]
    Config(String),
    #[error(transparent)]
    Sqlx(#[from] sqlx::Error),
    #[error("malformed vocabulary row: {0}")]
    MalformedRow(String),
    #[error(transparent)]
    DataIntegrity(#[from] DataIntegrityError),
    #[error("seed file error: {0}")]
    Seed(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogHealth {
    Connected { latency_ms: u64 },
    Timeout,
    Disconnected,
}

/// Vocabulary catalog backed by a SQLite pool
#[derive(Clone)]
pub struct Catalog {
    pool: SqlitePool,
}

impl Catalog {
    pub async fn connect(database_url: &str) -> Result<Self, CatalogError> {
        ensure_parent_dir(database_url);

        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| CatalogError::Config(e.to_string()))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .busy_timeout(Duration::from_secs(30));

        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .acquire_timeout(Duration::from_secs(5))
            .connect_with(options)
            .await?;

        let catalog = Self { pool };
        catalog.migrate().await?;
        Ok(catalog)
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    pub async fn migrate(&self) -> Result<(), CatalogError> {
        for statement in VOCABULARY_SCHEMA {
            sqlx::query(statement).execute(&self.pool).await?;
        }
        Ok(())
    }

    pub async fn health_check(&self) -> CatalogHealth {
        let started = Instant::now();
        let query = sqlx::query("SELECT 1").execute(&self.pool);

        match tokio::time::timeout(HEALTH_CHECK_TIMEOUT, query).await {
            Ok(Ok(_)) => CatalogHealth::Connected {
                latency_ms: started.elapsed().as_millis() as u64,
            },
            Ok(Err(err)) => {
                tracing::warn!(error = %err, "catalog health check failed");
                CatalogHealth::Disconnected
            }
            Err(_) => CatalogHealth::Timeout,
        }
    }
}

fn ensure_parent_dir(database_url: &str) {
    let path = database_url
        .trim_start_matches("sqlite://")
        .trim_start_matches("sqlite:");
    let path = path.split('?').next().unwrap_or_default();
    if path.is_empty() || path == ":memory:" {
        return;
    }

    if let Some(parent) = std::path::Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            if let Err(err) = std::fs::create_dir_all(parent) {
                tracing::warn!(error = %err, path = %parent.display(), "failed to create catalog directory");
            }
        }
    }
}

//! CookieStore — SQLite persistence for encrypted cookies.

use crate::crypto::CookieCipher;
use crate::error::{Result, StoreError};
use crate::secure_string::SecureString;
use sqlx::sqlite::{SqlitePool, SqlitePoolOptions};
use sqlx::Row;
use std::path::PathBuf;
use tokio::sync::RwLock;
use tracing::{debug, info};

/// Sentinel path selecting an in-memory database.
const MEMORY_PATH: &str = ":memory:";

/// User id written and removed again by the startup self-test.
const SELF_TEST_USER: &str = "test_user";
const SELF_TEST_COOKIE: &str = "test_cookie";

/// Cookie store configuration.
pub struct StoreConfig {
    /// Path of the SQLite database file.
    pub db_path: PathBuf,
    /// Process-wide encryption key. Required; there is no default.
    pub encryption_key: String,
}

impl std::fmt::Debug for StoreConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StoreConfig")
            .field("db_path", &self.db_path)
            .field("encryption_key", &"[REDACTED]")
            .finish()
    }
}

impl StoreConfig {
    /// Create from environment variables.
    ///
    /// `ENCRYPTION_KEY` is required; a missing or empty value is a fatal
    /// configuration error. `LIKEDIN_DB_PATH` overrides the default
    /// database location.
    pub fn from_env() -> Result<Self> {
        let encryption_key = std::env::var("ENCRYPTION_KEY")
            .ok()
            .filter(|k| !k.is_empty())
            .ok_or_else(|| StoreError::Configuration("ENCRYPTION_KEY is not set".to_string()))?;

        let db_path = std::env::var("LIKEDIN_DB_PATH")
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from("data/likedin.sqlite"));

        Ok(Self {
            db_path,
            encryption_key,
        })
    }

    /// Create with explicit values.
    #[must_use]
    pub fn new(db_path: impl Into<PathBuf>, encryption_key: impl Into<String>) -> Self {
        Self {
            db_path: db_path.into(),
            encryption_key: encryption_key.into(),
        }
    }
}

/// SQLite-backed store holding one encrypted cookie per user id.
///
/// The pool handle lives behind `RwLock<Option<...>>` so the lifecycle is
/// explicit: before `initialize()` and after `close()` every operation
/// fails with [`StoreError::NotInitialized`].
pub struct CookieStore {
    pool: RwLock<Option<SqlitePool>>,
    cipher: CookieCipher,
    db_path: PathBuf,
}

impl CookieStore {
    /// Create a store from configuration. No I/O happens until
    /// [`CookieStore::initialize`].
    #[must_use]
    pub fn new(config: StoreConfig) -> Self {
        Self {
            pool: RwLock::new(None),
            cipher: CookieCipher::new(&config.encryption_key),
            db_path: config.db_path,
        }
    }

    /// In-memory store (for tests).
    #[must_use]
    pub fn in_memory(encryption_key: &str) -> Self {
        Self::new(StoreConfig::new(MEMORY_PATH, encryption_key))
    }

    /// Open the database, ensure the schema exists, and run the startup
    /// self-test. Idempotent: calling on an already-initialized store is a
    /// no-op.
    pub async fn initialize(&self) -> Result<()> {
        {
            let mut guard = self.pool.write().await;
            if guard.is_some() {
                debug!("cookie store already initialized");
                return Ok(());
            }

            let pool = self.open_pool().await?;

            sqlx::query(
                "CREATE TABLE IF NOT EXISTS cookies (
                    user_id      TEXT PRIMARY KEY,
                    cookie_value TEXT NOT NULL
                )",
            )
            .execute(&pool)
            .await?;

            *guard = Some(pool);
        }

        // Verify the encrypt-store-decrypt path end to end before the
        // process accepts any traffic.
        if let Err(e) = self.self_test().await {
            self.close().await;
            return Err(e);
        }

        info!(db_path = %self.db_path.display(), "cookie store initialized");
        Ok(())
    }

    async fn open_pool(&self) -> Result<SqlitePool> {
        if self.db_path.as_os_str() == MEMORY_PATH {
            let pool = SqlitePoolOptions::new()
                .max_connections(1)
                .connect("sqlite::memory:")
                .await?;
            return Ok(pool);
        }

        if let Some(parent) = self.db_path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent)
                    .map_err(|e| StoreError::Configuration(format!("mkdir: {e}")))?;
            }
        }
        let url = format!("sqlite:{}?mode=rwc", self.db_path.display());
        let pool = SqlitePoolOptions::new()
            .max_connections(5)
            .connect(&url)
            .await?;

        // WAL for read/write concurrency across handlers
        sqlx::query("PRAGMA journal_mode=WAL").execute(&pool).await?;

        Ok(pool)
    }

    /// Write-read-delete round-trip with a known record; leaves no residue.
    async fn self_test(&self) -> Result<()> {
        self.put(SELF_TEST_USER, SELF_TEST_COOKIE).await?;

        let got = self.get(SELF_TEST_USER).await?.ok_or_else(|| {
            StoreError::SelfTest("written record was not found on read-back".to_string())
        })?;
        if got.expose() != SELF_TEST_COOKIE {
            return Err(StoreError::SelfTest(
                "read-back value does not match what was written".to_string(),
            ));
        }

        self.delete(SELF_TEST_USER).await?;
        debug!("store write-read self-test passed");
        Ok(())
    }

    async fn pool(&self) -> Result<SqlitePool> {
        self.pool
            .read()
            .await
            .clone()
            .ok_or(StoreError::NotInitialized)
    }

    /// Encrypt and upsert a cookie for a user. A second `put` for the same
    /// user overwrites, never duplicates.
    pub async fn put(&self, user_id: &str, cookie_value: &str) -> Result<()> {
        let pool = self.pool().await?;
        let encrypted = self.cipher.encrypt(cookie_value)?;

        sqlx::query("INSERT OR REPLACE INTO cookies (user_id, cookie_value) VALUES (?1, ?2)")
            .bind(user_id)
            .bind(encrypted)
            .execute(&pool)
            .await?;

        debug!(user_id = %user_id, "cookie stored");
        Ok(())
    }

    /// Fetch and decrypt a user's cookie. `Ok(None)` when the user has
    /// never stored one.
    pub async fn get(&self, user_id: &str) -> Result<Option<SecureString>> {
        let pool = self.pool().await?;

        let row = sqlx::query("SELECT cookie_value FROM cookies WHERE user_id = ?1")
            .bind(user_id)
            .fetch_optional(&pool)
            .await?;

        match row {
            Some(row) => {
                let encrypted: String = row.try_get("cookie_value")?;
                let cookie = self.cipher.decrypt(&encrypted)?;
                debug!(user_id = %user_id, "cookie retrieved");
                Ok(Some(cookie))
            }
            None => {
                debug!(user_id = %user_id, "no cookie found");
                Ok(None)
            }
        }
    }

    /// Remove a user's cookie. Used by the startup self-test.
    pub async fn delete(&self, user_id: &str) -> Result<()> {
        let pool = self.pool().await?;

        sqlx::query("DELETE FROM cookies WHERE user_id = ?1")
            .bind(user_id)
            .execute(&pool)
            .await?;
        Ok(())
    }

    /// Close the database. Subsequent `get`/`put` calls fail with
    /// `NotInitialized` until `initialize()` is called again.
    pub async fn close(&self) {
        let mut guard = self.pool.write().await;
        if let Some(pool) = guard.take() {
            pool.close().await;
            info!("cookie store closed");
        }
    }
}

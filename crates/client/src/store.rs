//! Durable token storage.
//!
//! A pure key-value cache of the two token strings: no expiry, no validation.
//! Whatever is saved is returned by `load` until `clear`.

use std::collections::HashMap;
use std::path::Path;
use std::sync::RwLock;

use async_trait::async_trait;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{Row, SqlitePool};
use thiserror::Error;
use tracing::{debug, info};

use stockdesk_auth::Credential;

/// Key holding the access token.
pub const ACCESS_KEY: &str = "token";
/// Key holding the refresh token.
pub const REFRESH_KEY: &str = "refresh";

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("token storage unavailable: {0}")]
    Unavailable(String),

    #[error("token storage query failed: {0}")]
    Query(String),
}

impl From<sqlx::Error> for StoreError {
    fn from(e: sqlx::Error) -> Self {
        StoreError::Query(e.to_string())
    }
}

/// Persistence for the session credential.
#[async_trait]
pub trait TokenStore: Send + Sync {
    /// Persist both tokens atomically, replacing whatever was stored.
    async fn save(&self, credential: &Credential) -> Result<(), StoreError>;

    /// The stored credential, if **both** tokens are present.
    async fn load(&self) -> Result<Option<Credential>, StoreError>;

    /// Remove both tokens. Clearing an empty store is not an error.
    async fn clear(&self) -> Result<(), StoreError>;
}

fn assemble(mut entries: HashMap<String, String>) -> Option<Credential> {
    let access = entries.remove(ACCESS_KEY)?;
    let refresh = entries.remove(REFRESH_KEY)?;
    Some(Credential::new(access, refresh))
}

/// In-memory token store.
///
/// Intended for tests/dev; nothing survives the process.
#[derive(Debug, Default)]
pub struct InMemoryTokenStore {
    entries: RwLock<HashMap<String, String>>,
}

impl InMemoryTokenStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Write a single raw key, bypassing `save`.
    pub fn set_raw(&self, key: &str, value: &str) {
        let mut entries = self.entries.write().unwrap_or_else(|e| e.into_inner());
        entries.insert(key.to_string(), value.to_string());
    }

    pub fn get_raw(&self, key: &str) -> Option<String> {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.get(key).cloned()
    }

    pub fn is_empty(&self) -> bool {
        let entries = self.entries.read().unwrap_or_else(|e| e.into_inner());
        entries.is_empty()
    }
}

#[async_trait]
impl TokenStore for InMemoryTokenStore {
    async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        entries.insert(ACCESS_KEY.to_string(), credential.access_token.clone());
        entries.insert(REFRESH_KEY.to_string(), credential.refresh_token.clone());
        Ok(())
    }

    async fn load(&self) -> Result<Option<Credential>, StoreError> {
        let entries = self
            .entries
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(assemble(entries.clone()))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        let mut entries = self
            .entries
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        entries.remove(ACCESS_KEY);
        entries.remove(REFRESH_KEY);
        Ok(())
    }
}

/// SQLite-backed token store (durable across restarts).
#[derive(Debug, Clone)]
pub struct SqliteTokenStore {
    pool: SqlitePool,
}

impl SqliteTokenStore {
    /// Open (creating if needed) the store at `path`.
    pub async fn open(path: &Path) -> Result<Self, StoreError> {
        if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
            std::fs::create_dir_all(parent).map_err(|e| {
                StoreError::Unavailable(format!("failed to create {}: {e}", parent.display()))
            })?;
        }

        let options = SqliteConnectOptions::new()
            .filename(path)
            .create_if_missing(true);

        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(options)
            .await
            .map_err(|e| {
                StoreError::Unavailable(format!("failed to open {}: {e}", path.display()))
            })?;

        debug!(path = %path.display(), "opened token store");
        Self::with_pool(pool).await
    }

    /// A private in-memory database; nothing survives the store.
    pub async fn in_memory() -> Result<Self, StoreError> {
        // One connection that never idles out: each new connection would get
        // a fresh, empty in-memory database.
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .min_connections(1)
            .idle_timeout(None)
            .max_lifetime(None)
            .connect("sqlite::memory:")
            .await
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        Self::with_pool(pool).await
    }

    async fn with_pool(pool: SqlitePool) -> Result<Self, StoreError> {
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS local_storage (
                key   TEXT PRIMARY KEY NOT NULL,
                value TEXT NOT NULL
            )
            "#,
        )
        .execute(&pool)
        .await?;

        Ok(Self { pool })
    }
}

#[async_trait]
impl TokenStore for SqliteTokenStore {
    async fn save(&self, credential: &Credential) -> Result<(), StoreError> {
        let mut tx = self.pool.begin().await?;

        for (key, value) in [
            (ACCESS_KEY, credential.access_token.as_str()),
            (REFRESH_KEY, credential.refresh_token.as_str()),
        ] {
            sqlx::query(
                r#"
                INSERT INTO local_storage (key, value)
                VALUES (?1, ?2)
                ON CONFLICT(key) DO UPDATE SET value = excluded.value
                "#,
            )
            .bind(key)
            .bind(value)
            .execute(&mut *tx)
            .await?;
        }

        tx.commit().await?;
        info!("session tokens persisted");
        Ok(())
    }

    async fn load(&self) -> Result<Option<Credential>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT key, value
            FROM local_storage
            WHERE key IN (?1, ?2)
            "#,
        )
        .bind(ACCESS_KEY)
        .bind(REFRESH_KEY)
        .fetch_all(&self.pool)
        .await?;

        let mut entries = HashMap::with_capacity(rows.len());
        for row in rows {
            let key: String = row.try_get("key")?;
            let value: String = row.try_get("value")?;
            entries.insert(key, value);
        }

        Ok(assemble(entries))
    }

    async fn clear(&self) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            DELETE FROM local_storage
            WHERE key IN (?1, ?2)
            "#,
        )
        .bind(ACCESS_KEY)
        .bind(REFRESH_KEY)
        .execute(&self.pool)
        .await?;

        info!("session tokens cleared");
        Ok(())
    }
}

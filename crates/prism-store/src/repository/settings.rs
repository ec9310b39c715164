//! # Settings Repository
//!
//! Global key/value settings shared by every session.
//!
//! | key                    | value                       |
//! |------------------------|-----------------------------|
//! | `default_theme`        | theme id                    |
//! | `monetization_enabled` | `"true"` / `"false"`        |
//!
//! Both rows are inserted by the initial migration, so a missing row means
//! the database was tampered with and is reported as `NotFound`.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::{debug, info};

use crate::error::{StoreError, StoreResult};

const DEFAULT_THEME_KEY: &str = "default_theme";
const MONETIZATION_KEY: &str = "monetization_enabled";

/// Repository for global settings.
#[derive(Debug, Clone)]
pub struct SettingsRepository {
    pool: SqlitePool,
}

impl SettingsRepository {
    /// Creates a new SettingsRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SettingsRepository { pool }
    }

    /// Returns the id of the theme sessions fall back to.
    pub async fn default_theme(&self) -> StoreResult<String> {
        self.get(DEFAULT_THEME_KEY).await
    }

    /// Sets the fallback theme id.
    ///
    /// The id is not checked against the catalog here; a session that loads
    /// an unknown default rejects the whole configuration.
    pub async fn set_default_theme(&self, theme_id: &str) -> StoreResult<()> {
        self.set(DEFAULT_THEME_KEY, theme_id).await
    }

    /// Returns whether premium gating is active.
    pub async fn monetization_enabled(&self) -> StoreResult<bool> {
        let value = self.get(MONETIZATION_KEY).await?;
        value.parse::<bool>().map_err(|_| {
            StoreError::corrupt(
                "Setting",
                MONETIZATION_KEY,
                format!("not a boolean: '{value}'"),
            )
        })
    }

    /// Turns premium gating on or off.
    pub async fn set_monetization_enabled(&self, enabled: bool) -> StoreResult<()> {
        info!(enabled, "Persisting monetization flag");
        self.set(MONETIZATION_KEY, if enabled { "true" } else { "false" })
            .await
    }

    async fn get(&self, key: &str) -> StoreResult<String> {
        let value: Option<String> =
            sqlx::query_scalar("SELECT value FROM settings WHERE key = ?1")
                .bind(key)
                .fetch_optional(&self.pool)
                .await?;

        value.ok_or_else(|| StoreError::not_found("Setting", key))
    }

    async fn set(&self, key: &str, value: &str) -> StoreResult<()> {
        debug!(key, value, "Writing setting");

        sqlx::query(
            r#"
            INSERT INTO settings (key, value, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(key)
        .bind(value)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig, StoreError};

    #[tokio::test]
    async fn test_migration_defaults() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db.settings();

        assert_eq!(settings.default_theme().await.unwrap(), "default");
        assert!(!settings.monetization_enabled().await.unwrap());
    }

    #[tokio::test]
    async fn test_set_and_read_back() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let settings = db.settings();

        settings.set_monetization_enabled(true).await.unwrap();
        settings.set_default_theme("minimalist").await.unwrap();

        assert!(settings.monetization_enabled().await.unwrap());
        assert_eq!(settings.default_theme().await.unwrap(), "minimalist");
    }

    #[tokio::test]
    async fn test_malformed_flag_is_corrupt() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("UPDATE settings SET value = 'maybe' WHERE key = 'monetization_enabled'")
            .execute(db.pool())
            .await
            .unwrap();

        assert!(matches!(
            db.settings().monetization_enabled().await,
            Err(StoreError::Corrupt { .. })
        ));
    }

    #[tokio::test]
    async fn test_missing_row_is_not_found() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        sqlx::query("DELETE FROM settings WHERE key = 'default_theme'")
            .execute(db.pool())
            .await
            .unwrap();

        assert!(matches!(
            db.settings().default_theme().await,
            Err(StoreError::NotFound { .. })
        ));
    }
}

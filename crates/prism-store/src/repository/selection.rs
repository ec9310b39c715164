//! # Selection Repository
//!
//! The theme each user last switched to, keyed by user id. The theme id is
//! stored as-is: a selection may name a theme that no longer exists, and
//! readers are expected to fall back to the default theme.

use chrono::Utc;
use sqlx::SqlitePool;
use tracing::debug;

use crate::error::StoreResult;

/// Repository for per-user theme selections.
#[derive(Debug, Clone)]
pub struct SelectionRepository {
    pool: SqlitePool,
}

impl SelectionRepository {
    /// Creates a new SelectionRepository.
    pub fn new(pool: SqlitePool) -> Self {
        SelectionRepository { pool }
    }

    /// Returns the persisted theme id for a user, if any.
    pub async fn get(&self, user_id: &str) -> StoreResult<Option<String>> {
        let theme_id: Option<String> =
            sqlx::query_scalar("SELECT theme_id FROM user_themes WHERE user_id = ?1")
                .bind(user_id)
                .fetch_optional(&self.pool)
                .await?;

        Ok(theme_id)
    }

    /// Records the user's theme, replacing any previous selection.
    pub async fn set(&self, user_id: &str, theme_id: &str) -> StoreResult<()> {
        debug!(user_id = %user_id, theme_id = %theme_id, "Persisting theme selection");

        sqlx::query(
            r#"
            INSERT INTO user_themes (user_id, theme_id, updated_at)
            VALUES (?1, ?2, ?3)
            ON CONFLICT(user_id) DO UPDATE SET
                theme_id = excluded.theme_id,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(user_id)
        .bind(theme_id)
        .bind(Utc::now())
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};

    #[tokio::test]
    async fn test_selection_is_per_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.selections();

        assert_eq!(repo.get("alice").await.unwrap(), None);

        repo.set("alice", "retro").await.unwrap();
        repo.set("bob", "minimalist").await.unwrap();
        repo.set("alice", "neumorphic").await.unwrap();

        assert_eq!(repo.get("alice").await.unwrap().as_deref(), Some("neumorphic"));
        assert_eq!(repo.get("bob").await.unwrap().as_deref(), Some("minimalist"));
    }
}

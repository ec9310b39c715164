//! # User Repository
//!
//! Users known to this installation, with the role and premium flag the
//! entitlement rules are evaluated against.

use chrono::Utc;
use sqlx::{FromRow, SqlitePool};
use tracing::debug;

use crate::error::StoreResult;
use prism_core::{Role, User};

#[derive(Debug, FromRow)]
struct UserRow {
    id: String,
    name: Option<String>,
    email: Option<String>,
    role: Role,
    is_premium: bool,
}

impl From<UserRow> for User {
    fn from(row: UserRow) -> Self {
        User {
            id: row.id,
            name: row.name,
            email: row.email,
            role: row.role,
            is_premium: row.is_premium,
        }
    }
}

/// Repository for user records.
#[derive(Debug, Clone)]
pub struct UserRepository {
    pool: SqlitePool,
}

impl UserRepository {
    /// Creates a new UserRepository.
    pub fn new(pool: SqlitePool) -> Self {
        UserRepository { pool }
    }

    /// Gets a user by id.
    ///
    /// ## Returns
    /// * `Ok(Some(User))` - User found
    /// * `Ok(None)` - Unknown user
    pub async fn get(&self, id: &str) -> StoreResult<Option<User>> {
        let row: Option<UserRow> = sqlx::query_as(
            "SELECT id, name, email, role, is_premium FROM users WHERE id = ?1",
        )
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(row.map(User::from))
    }

    /// Inserts a user or updates the existing row with the same id.
    pub async fn upsert(&self, user: &User) -> StoreResult<()> {
        debug!(user_id = %user.id, role = %user.role, "Upserting user");

        let now = Utc::now();
        sqlx::query(
            r#"
            INSERT INTO users (id, name, email, role, is_premium, created_at, updated_at)
            VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?6)
            ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                email = excluded.email,
                role = excluded.role,
                is_premium = excluded.is_premium,
                updated_at = excluded.updated_at
            "#,
        )
        .bind(&user.id)
        .bind(&user.name)
        .bind(&user.email)
        .bind(user.role)
        .bind(user.is_premium)
        .bind(now)
        .execute(&self.pool)
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::{Database, DbConfig};
    use prism_core::{Role, User};

    #[tokio::test]
    async fn test_upsert_then_get() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        let repo = db.users();

        let mut user = User::new("user-1", Role::Vendor, true);
        user.email = Some("vendor@example.com".to_string());
        repo.upsert(&user).await.unwrap();

        assert_eq!(repo.get("user-1").await.unwrap(), Some(user.clone()));

        user.role = Role::Admin;
        user.is_premium = false;
        repo.upsert(&user).await.unwrap();

        let loaded = repo.get("user-1").await.unwrap().unwrap();
        assert_eq!(loaded.role, Role::Admin);
        assert!(!loaded.is_premium);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        assert!(db.users().get("ghost").await.unwrap().is_none());
    }
}

//! SQLite-backed config store.

use prism_core::catalog::generate_theme_id;
use prism_core::{NewTheme, Theme, ThemeConfig, User};
use prism_store::{Database, StoreError};
use tracing::{debug, info};

use super::ConfigStore;
use crate::config::SessionConfig;
use crate::error::{GatewayError, GatewayResult};

/// Durable config store for one user, over a shared [`Database`].
///
/// ## Usage
/// ```rust,ignore
/// let db = Database::new(DbConfig::new("./prism.db")).await?;
/// let store = SqliteStore::new(db, "user-123");
/// let session = ThemeSession::new(store, PresentationSurface::new());
/// ```
#[derive(Debug, Clone)]
pub struct SqliteStore {
    db: Database,
    user_id: String,
}

impl SqliteStore {
    /// Creates a store that reports `user_id` as the current user.
    pub fn new(db: Database, user_id: impl Into<String>) -> Self {
        SqliteStore {
            db,
            user_id: user_id.into(),
        }
    }

    /// Opens the configured database and serves the configured user.
    ///
    /// Migrations run on connect; the built-in catalog is inserted if the
    /// database has no themes yet.
    pub async fn connect(config: &SessionConfig) -> GatewayResult<Self> {
        let db = Database::new(config.db_config()).await?;
        db.seed_builtin_catalog().await?;
        Ok(Self::new(db, config.session.user_id.clone()))
    }

    /// Returns the underlying database handle.
    pub fn database(&self) -> &Database {
        &self.db
    }

    /// Returns the id of the user this store serves.
    pub fn user_id(&self) -> &str {
        &self.user_id
    }
}

impl ConfigStore for SqliteStore {
    async fn get_current_user(&self) -> GatewayResult<User> {
        self.db
            .users()
            .get(&self.user_id)
            .await?
            .ok_or_else(|| GatewayError::UserNotFound(self.user_id.clone()))
    }

    async fn get_theme_config(&self) -> GatewayResult<ThemeConfig> {
        Ok(self.db.load_theme_config().await?)
    }

    async fn get_user_theme(&self, user_id: &str) -> GatewayResult<Option<String>> {
        Ok(self.db.selections().get(user_id).await?)
    }

    async fn set_user_theme(&self, user_id: &str, theme_id: &str) -> GatewayResult<()> {
        Ok(self.db.selections().set(user_id, theme_id).await?)
    }

    async fn set_monetization(&self, enabled: bool) -> GatewayResult<()> {
        Ok(self.db.settings().set_monetization_enabled(enabled).await?)
    }

    async fn create_theme(&self, data: NewTheme) -> GatewayResult<Theme> {
        data.validate().map_err(StoreError::from)?;

        let theme = data.into_theme(generate_theme_id());
        debug!(theme_id = %theme.id, name = %theme.name, "Storing custom theme");
        self.db.themes().insert(&theme).await?;

        info!(theme_id = %theme.id, "Custom theme created");
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::session::ThemeSession;
    use crate::sink::PresentationSurface;
    use crate::SessionError;
    use prism_core::builtin::builtin_themes;
    use prism_core::{Denial, Role};
    use prism_store::DbConfig;
    use std::collections::BTreeSet;
    use std::sync::Arc;

    async fn setup_db(users: &[User]) -> Database {
        let db = Database::new(DbConfig::in_memory()).await.unwrap();
        db.seed_builtin_catalog().await.unwrap();
        for user in users {
            db.users().upsert(user).await.unwrap();
        }
        db
    }

    fn session(
        db: &Database,
        user_id: &str,
    ) -> ThemeSession<SqliteStore, Arc<PresentationSurface>> {
        ThemeSession::new(
            SqliteStore::new(db.clone(), user_id),
            Arc::new(PresentationSurface::new()),
        )
    }

    #[tokio::test]
    async fn test_connect_creates_data_directory() {
        let dir = std::env::temp_dir().join(format!("prism-session-{}", std::process::id()));
        let _ = std::fs::remove_dir_all(&dir);

        let mut config = SessionConfig::default();
        config.session.user_id = "u1".to_string();
        config.store.database_path = dir.join("data").join("prism.db");

        let store = SqliteStore::connect(&config).await.unwrap();
        assert!(config.store.database_path.exists());
        assert_eq!(store.database().themes().count().await.unwrap(), 5);

        store.database().close().await;
        let _ = std::fs::remove_dir_all(&dir);
    }

    #[tokio::test]
    async fn test_unknown_user() {
        let db = setup_db(&[]).await;
        let store = SqliteStore::new(db, "ghost");

        assert!(matches!(
            store.get_current_user().await,
            Err(GatewayError::UserNotFound(ref id)) if id == "ghost"
        ));
    }

    #[tokio::test]
    async fn test_store_reads_seeded_config() {
        let db = setup_db(&[User::new("u1", Role::User, false)]).await;
        let store = SqliteStore::new(db, "u1");

        let config = store.get_theme_config().await.unwrap();
        assert_eq!(config.themes, builtin_themes());
        assert_eq!(config.default_theme, "default");
        assert!(!config.monetization_enabled);
        assert_eq!(store.get_user_theme("u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_selection_survives_new_session() {
        let db = setup_db(&[User::new("v1", Role::Vendor, true)]).await;
        db.settings().set_monetization_enabled(true).await.unwrap();

        let first = session(&db, "v1");
        first.initialize().await.unwrap();
        first.switch_theme("neumorphic").await.unwrap();
        assert_eq!(
            db.selections().get("v1").await.unwrap().as_deref(),
            Some("neumorphic")
        );

        let second = session(&db, "v1");
        second.initialize().await.unwrap();
        assert_eq!(second.current_theme_id().as_deref(), Some("neumorphic"));
        assert_eq!(
            second.sink().variable("primary-color").as_deref(),
            Some("#6366f1")
        );
    }

    #[tokio::test]
    async fn test_glow_denied_to_regular_user() {
        let db = setup_db(&[User::new("u1", Role::User, false)]).await;
        db.settings().set_monetization_enabled(true).await.unwrap();

        let session = session(&db, "u1");
        session.initialize().await.unwrap();

        let err = session.switch_theme("glow").await.unwrap_err();
        assert!(matches!(
            err,
            SessionError::AccessDenied { reason: Denial::InsufficientRole, .. }
        ));
        assert_eq!(db.selections().get("u1").await.unwrap(), None);
        assert_eq!(session.current_theme_id().as_deref(), Some("default"));
    }

    #[tokio::test]
    async fn test_monetization_toggle_is_persisted() {
        let db = setup_db(&[
            User::new("root", Role::Superadmin, false),
            User::new("u1", Role::User, false),
        ])
        .await;

        let admin = session(&db, "root");
        admin.initialize().await.unwrap();
        assert!(admin.toggle_monetization().await.unwrap());
        assert!(db.settings().monetization_enabled().await.unwrap());

        // Another user's session picks up the flag on load
        let user = session(&db, "u1");
        user.initialize().await.unwrap();
        assert!(user.monetization_enabled());
        assert_eq!(user.accessible_themes().len(), 2);
    }

    #[tokio::test]
    async fn test_created_theme_is_durable() {
        let db = setup_db(&[
            User::new("a1", Role::Admin, false),
            User::new("u1", Role::User, false),
        ])
        .await;

        let admin = session(&db, "a1");
        admin.initialize().await.unwrap();
        let theme = admin
            .create_theme(NewTheme {
                name: "Forest".to_string(),
                description: "Greens".to_string(),
                is_premium: false,
                super_admin_only: false,
                allowed_roles: BTreeSet::from([Role::User]),
                css_variables: builtin_themes()[0].css_variables.clone(),
            })
            .await
            .unwrap();

        assert_eq!(db.themes().count().await.unwrap(), 6);

        let user = session(&db, "u1");
        user.initialize().await.unwrap();
        assert_eq!(user.available_themes().last(), Some(&theme));
        user.switch_theme(&theme.id).await.unwrap();
        assert_eq!(
            user.sink().active_class(),
            Some(prism_core::marker_class(&theme.id))
        );
    }

    #[tokio::test]
    async fn test_stale_selection_falls_back_to_default() {
        let db = setup_db(&[User::new("u1", Role::User, false)]).await;
        db.selections().set("u1", "removed").await.unwrap();

        let session = session(&db, "u1");
        session.initialize().await.unwrap();

        assert_eq!(session.current_theme_id().as_deref(), Some("default"));
    }
}

//! # Theme Repository
//!
//! Database operations for the theme catalog.
//!
//! ## Row Layout
//! ```text
//! ┌──────────┬───────────┬──────────────┬───────────────────────────────────┐
//! │ position │ id        │ allowed_roles│ css_variables                     │
//! ├──────────┼───────────┼──────────────┼───────────────────────────────────┤
//! │ 1        │ default   │ ["user",…]   │ {"primary-color":"#3b82f6",…}     │
//! │ 2        │ neumorph… │ ["vendor",…] │ {"primary-color":"#6366f1",…}     │
//! │ …        │ custom-…  │ …            │ …                                 │
//! └──────────┴───────────┴──────────────┴───────────────────────────────────┘
//! ```
//!
//! `position` is an autoincrement key, so `ORDER BY position` is the order
//! themes were inserted in. The two map/set columns are JSON text; a row
//! whose JSON no longer parses is reported as [`StoreError::Corrupt`].

use std::collections::BTreeSet;

use chrono::Utc;
use sqlx::{Executor, FromRow, Sqlite, SqlitePool};
use tracing::debug;

use crate::error::{StoreError, StoreResult};
use prism_core::{CssVariables, Role, Theme};

const THEME_COLUMNS: &str = "id, name, description, is_premium, super_admin_only, \
                             allowed_roles, css_variables, seo_optimized";

/// Raw `themes` row before the JSON columns are decoded.
#[derive(Debug, FromRow)]
struct ThemeRow {
    id: String,
    name: String,
    description: String,
    is_premium: bool,
    super_admin_only: bool,
    allowed_roles: String,
    css_variables: String,
    seo_optimized: bool,
}

impl TryFrom<ThemeRow> for Theme {
    type Error = StoreError;

    fn try_from(row: ThemeRow) -> StoreResult<Self> {
        let allowed_roles: BTreeSet<Role> = serde_json::from_str(&row.allowed_roles)
            .map_err(|e| StoreError::corrupt("Theme", &row.id, format!("allowed_roles: {e}")))?;
        let css_variables: CssVariables = serde_json::from_str(&row.css_variables)
            .map_err(|e| StoreError::corrupt("Theme", &row.id, format!("css_variables: {e}")))?;

        Ok(Theme {
            id: row.id,
            name: row.name,
            description: row.description,
            is_premium: row.is_premium,
            super_admin_only: row.super_admin_only,
            allowed_roles,
            css_variables,
            seo_optimized: row.seo_optimized,
        })
    }
}

/// Repository for theme catalog operations.
///
/// ## Usage
/// ```rust,ignore
/// let repo = ThemeRepository::new(pool);
///
/// let themes = repo.list().await?;        // catalog order
/// let glow = repo.get("glow").await?;     // Option<Theme>
/// ```
#[derive(Debug, Clone)]
pub struct ThemeRepository {
    pool: SqlitePool,
}

impl ThemeRepository {
    /// Creates a new ThemeRepository.
    pub fn new(pool: SqlitePool) -> Self {
        ThemeRepository { pool }
    }

    /// Lists every theme in catalog order.
    pub async fn list(&self) -> StoreResult<Vec<Theme>> {
        let sql = format!("SELECT {THEME_COLUMNS} FROM themes ORDER BY position");
        let rows: Vec<ThemeRow> = sqlx::query_as(&sql).fetch_all(&self.pool).await?;

        debug!(count = rows.len(), "Listed themes");
        rows.into_iter().map(Theme::try_from).collect()
    }

    /// Gets a theme by its id.
    ///
    /// ## Returns
    /// * `Ok(Some(Theme))` - Theme found
    /// * `Ok(None)` - No theme with this id
    pub async fn get(&self, id: &str) -> StoreResult<Option<Theme>> {
        let sql = format!("SELECT {THEME_COLUMNS} FROM themes WHERE id = ?1");
        let row: Option<ThemeRow> = sqlx::query_as(&sql)
            .bind(id)
            .fetch_optional(&self.pool)
            .await?;

        row.map(Theme::try_from).transpose()
    }

    /// Appends a theme to the end of the catalog.
    ///
    /// The theme is validated first; an invalid definition is never stored.
    ///
    /// ## Returns
    /// * `Err(StoreError::UniqueViolation)` - A theme with this id exists
    /// * `Err(StoreError::Validation)` - The definition is malformed
    pub async fn insert(&self, theme: &Theme) -> StoreResult<()> {
        debug!(theme_id = %theme.id, "Inserting theme");
        insert_theme(&self.pool, theme).await
    }

    /// Appends several themes in one transaction, preserving slice order.
    ///
    /// Either every theme is stored or none is.
    pub async fn insert_all(&self, themes: &[Theme]) -> StoreResult<()> {
        let mut tx = self.pool.begin().await?;

        for theme in themes {
            insert_theme(&mut *tx, theme).await?;
        }

        tx.commit().await?;
        debug!(count = themes.len(), "Inserted themes");
        Ok(())
    }

    /// Counts the themes in the catalog.
    pub async fn count(&self) -> StoreResult<i64> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM themes")
            .fetch_one(&self.pool)
            .await?;

        Ok(count)
    }
}

async fn insert_theme<'e, E>(executor: E, theme: &Theme) -> StoreResult<()>
where
    E: Executor<'e, Database = Sqlite>,
{
    prism_core::validation::validate_theme(theme)?;

    let allowed_roles = serde_json::to_string(&theme.allowed_roles)
        .map_err(|e| StoreError::Internal(e.to_string()))?;
    let css_variables = serde_json::to_string(&theme.css_variables)
        .map_err(|e| StoreError::Internal(e.to_string()))?;

    sqlx::query(
        r#"
        INSERT INTO themes (
            id, name, description, is_premium, super_admin_only,
            allowed_roles, css_variables, seo_optimized, created_at
        ) VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9)
        "#,
    )
    .bind(&theme.id)
    .bind(&theme.name)
    .bind(&theme.description)
    .bind(theme.is_premium)
    .bind(theme.super_admin_only)
    .bind(allowed_roles)
    .bind(css_variables)
    .bind(theme.seo_optimized)
    .bind(Utc::now())
    .execute(executor)
    .await
    .map_err(|e| match StoreError::from(e) {
        StoreError::UniqueViolation { field, .. } => StoreError::duplicate(field, &theme.id),
        other => other,
    })?;

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

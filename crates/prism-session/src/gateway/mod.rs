//! # Config Store Gateway
//!
//! The session's only path to durable state.
//!
//! ## Keys
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │  current user          ─► User { id, role, is_premium }                 │
//! │  theme config          ─► ThemeConfig { themes, default_theme,          │
//! │                                         monetization_enabled }          │
//! │  user theme (per user) ─► Option<theme id>                              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Operations are independent: nothing is atomic across keys, and any call
//! may fail with a [`GatewayError`].
//!
//! ## Implementations
//! - [`SqliteStore`] - durable, backed by `prism-store`
//! - [`MemoryStore`] - in-process, with failure switches for tests

use std::future::Future;
use std::sync::Arc;

use prism_core::{NewTheme, Theme, ThemeConfig, User};

use crate::error::GatewayResult;

mod memory;
mod sqlite;

pub use memory::MemoryStore;
pub use sqlite::SqliteStore;

/// Async access to users, the theme catalog and per-user selections.
pub trait ConfigStore: Send + Sync {
    /// Returns the user this session runs for.
    fn get_current_user(&self) -> impl Future<Output = GatewayResult<User>> + Send;

    /// Returns the catalog, default theme and monetization flag.
    fn get_theme_config(&self) -> impl Future<Output = GatewayResult<ThemeConfig>> + Send;

    /// Returns the theme id last persisted for `user_id`.
    fn get_user_theme(
        &self,
        user_id: &str,
    ) -> impl Future<Output = GatewayResult<Option<String>>> + Send;

    /// Persists `theme_id` as the selection of `user_id`.
    fn set_user_theme(
        &self,
        user_id: &str,
        theme_id: &str,
    ) -> impl Future<Output = GatewayResult<()>> + Send;

    /// Persists the global monetization flag.
    fn set_monetization(&self, enabled: bool) -> impl Future<Output = GatewayResult<()>> + Send;

    /// Stores a new custom theme and returns it with its assigned id.
    fn create_theme(&self, data: NewTheme) -> impl Future<Output = GatewayResult<Theme>> + Send;
}

impl<T: ConfigStore> ConfigStore for Arc<T> {
    fn get_current_user(&self) -> impl Future<Output = GatewayResult<User>> + Send {
        (**self).get_current_user()
    }

    fn get_theme_config(&self) -> impl Future<Output = GatewayResult<ThemeConfig>> + Send {
        (**self).get_theme_config()
    }

    fn get_user_theme(
        &self,
        user_id: &str,
    ) -> impl Future<Output = GatewayResult<Option<String>>> + Send {
        (**self).get_user_theme(user_id)
    }

    fn set_user_theme(
        &self,
        user_id: &str,
        theme_id: &str,
    ) -> impl Future<Output = GatewayResult<()>> + Send {
        (**self).set_user_theme(user_id, theme_id)
    }

    fn set_monetization(&self, enabled: bool) -> impl Future<Output = GatewayResult<()>> + Send {
        (**self).set_monetization(enabled)
    }

    fn create_theme(&self, data: NewTheme) -> impl Future<Output = GatewayResult<Theme>> + Send {
        (**self).create_theme(data)
    }
}

//! In-process config store.
//!
//! Seeded from the built-in catalog. Reads and writes can be made to fail on
//! demand, writes can be made to hang, and every successful write is counted, which is what the session
//! tests use to prove that rejected operations never reach the store.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, AtomicU64, Ordering};
use std::sync::{Mutex, MutexGuard, PoisonError};

use prism_core::builtin::builtin_config;
use prism_core::catalog::generate_theme_id;
use prism_core::{NewTheme, Theme, ThemeConfig, User};
use prism_store::StoreError;

use super::ConfigStore;
use crate::error::{GatewayError, GatewayResult};

#[derive(Debug)]
struct MemoryState {
    user: User,
    config: ThemeConfig,
    selections: HashMap<String, String>,
}

/// Config store held entirely in memory.
#[derive(Debug)]
pub struct MemoryStore {
    state: Mutex<MemoryState>,
    fail_reads: AtomicBool,
    fail_writes: AtomicBool,
    stall_writes: AtomicBool,
    writes: AtomicU64,
}

impl MemoryStore {
    /// Creates a store for `user` over the built-in catalog.
    pub fn new(user: User) -> Self {
        Self::with_config(user, builtin_config())
    }

    /// Creates a store for `user` over an arbitrary configuration.
    ///
    /// The configuration is not validated here; the session does that.
    pub fn with_config(user: User, config: ThemeConfig) -> Self {
        MemoryStore {
            state: Mutex::new(MemoryState {
                user,
                config,
                selections: HashMap::new(),
            }),
            fail_reads: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            stall_writes: AtomicBool::new(false),
            writes: AtomicU64::new(0),
        }
    }

    /// Makes every subsequent read fail (or succeed again).
    pub fn set_fail_reads(&self, fail: bool) {
        self.fail_reads.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write fail (or succeed again).
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    /// Makes every subsequent write hang until its future is dropped.
    pub fn set_stall_writes(&self, stall: bool) {
        self.stall_writes.store(stall, Ordering::SeqCst);
    }

    /// Replaces the current user, e.g. to simulate a role change.
    pub fn set_user(&self, user: User) {
        self.lock().user = user;
    }

    /// Pre-populates a persisted selection.
    pub fn seed_selection(&self, user_id: &str, theme_id: &str) {
        self.lock()
            .selections
            .insert(user_id.to_string(), theme_id.to_string());
    }

    /// Returns the persisted selection for a user.
    pub fn selection(&self, user_id: &str) -> Option<String> {
        self.lock().selections.get(user_id).cloned()
    }

    /// Returns the persisted monetization flag.
    pub fn monetization_enabled(&self) -> bool {
        self.lock().config.monetization_enabled
    }

    /// Returns the persisted catalog size.
    pub fn theme_count(&self) -> usize {
        self.lock().config.themes.len()
    }

    /// Number of writes that succeeded.
    pub fn write_count(&self) -> u64 {
        self.writes.load(Ordering::SeqCst)
    }

    fn lock(&self) -> MutexGuard<'_, MemoryState> {
        self.state.lock().unwrap_or_else(PoisonError::into_inner)
    }

    fn check_read(&self) -> GatewayResult<()> {
        if self.fail_reads.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("read failed".to_string()));
        }
        Ok(())
    }

    async fn check_write(&self) -> GatewayResult<()> {
        if self.stall_writes.load(Ordering::SeqCst) {
            std::future::pending::<()>().await;
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err(GatewayError::Unavailable("write failed".to_string()));
        }
        Ok(())
    }

    fn record_write(&self) {
        self.writes.fetch_add(1, Ordering::SeqCst);
    }
}

impl ConfigStore for MemoryStore {
    async fn get_current_user(&self) -> GatewayResult<User> {
        self.check_read()?;
        Ok(self.lock().user.clone())
    }

    async fn get_theme_config(&self) -> GatewayResult<ThemeConfig> {
        self.check_read()?;
        Ok(self.lock().config.clone())
    }

    async fn get_user_theme(&self, user_id: &str) -> GatewayResult<Option<String>> {
        self.check_read()?;
        Ok(self.selection(user_id))
    }

    async fn set_user_theme(&self, user_id: &str, theme_id: &str) -> GatewayResult<()> {
        self.check_write().await?;
        self.seed_selection(user_id, theme_id);
        self.record_write();
        Ok(())
    }

    async fn set_monetization(&self, enabled: bool) -> GatewayResult<()> {
        self.check_write().await?;
        self.lock().config.monetization_enabled = enabled;
        self.record_write();
        Ok(())
    }

    async fn create_theme(&self, data: NewTheme) -> GatewayResult<Theme> {
        self.check_write().await?;
        data.validate().map_err(StoreError::from)?;

        let theme = {
            let mut state = self.lock();
            let mut id = generate_theme_id();
            while state.config.themes.iter().any(|t| t.id == id) {
                id = generate_theme_id();
            }
            let theme = data.into_theme(id);
            state.config.themes.push(theme.clone());
            theme
        };

        self.record_write();
        Ok(theme)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use prism_core::Role;

    #[tokio::test]
    async fn test_reads_builtin_config() {
        let store = MemoryStore::new(User::new("u1", Role::User, false));

        let config = store.get_theme_config().await.unwrap();
        assert_eq!(config.themes.len(), 5);
        assert_eq!(store.get_current_user().await.unwrap().id, "u1");
        assert_eq!(store.get_user_theme("u1").await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_failure_switches() {
        let store = MemoryStore::new(User::new("u1", Role::User, false));

        store.set_fail_writes(true);
        assert!(store.set_user_theme("u1", "retro").await.is_err());
        assert_eq!(store.selection("u1"), None);
        assert_eq!(store.write_count(), 0);

        store.set_fail_writes(false);
        store.set_user_theme("u1", "retro").await.unwrap();
        assert_eq!(store.selection("u1").as_deref(), Some("retro"));
        assert_eq!(store.write_count(), 1);

        store.set_fail_reads(true);
        assert!(matches!(
            store.get_current_user().await,
            Err(GatewayError::Unavailable(_))
        ));
    }
}

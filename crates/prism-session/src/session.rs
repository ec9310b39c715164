//! # Theme Session
//!
//! One user's theme state: what is loaded, what is active, what went wrong.
//!
//! ## State Machine
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │   Uninitialized ──initialize()──► Loading ──ok──► Ready ◄─────────┐     │
//! │                                      │              │             │     │
//! │                                      └──err──► Errored            │     │
//! │                                                     │             │     │
//! │                                      switch_theme() ▼             │     │
//! │                                                 Switching ──ok/err┘     │
//! │                                                                         │
//! │   initialize() may be re-run from Ready or Errored.                     │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Switch Pipeline
//! ```text
//! switch_theme("retro")
//!   │
//!   ├─ a. resolve in catalog ─────────► ThemeNotFound       (no mutation)
//!   ├─ b. authorize ──────────────────► AccessDenied        (no mutation)
//!   ├─ c. gateway.set_user_theme ─────► Persistence         (no mutation)
//!   └─ d. current_theme_id = "retro", sink.apply(variables)
//! ```
//!
//! Mutating operations hold an async mutex for their whole duration, so two
//! switches on one session never interleave. Reads only take the short
//! state lock and never wait on the gateway.

use std::sync::{PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};

use prism_core::entitlement::accessible_themes;
use prism_core::validation::validate_theme_config;
use prism_core::{authorize, NewTheme, Role, Theme, ThemeCatalog, ThemeConfig, User};
use serde::{Deserialize, Serialize};
use tokio::sync::Mutex;
use tracing::{debug, error, info, warn};
use ts_rs::TS;

use crate::error::{SessionError, SessionResult};
use crate::gateway::ConfigStore;
use crate::sink::StyleSink;

// =============================================================================
// Phase & Snapshot
// =============================================================================

/// Lifecycle phase of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum SessionPhase {
    /// Created, `initialize()` not yet called.
    #[default]
    Uninitialized,
    /// `initialize()` in progress.
    Loading,
    /// Loaded and accepting operations.
    Ready,
    /// A switch is being persisted.
    Switching,
    /// Initialization failed; only `initialize()` is accepted.
    Errored,
}

/// Serializable view of a session for the host UI.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct SessionState {
    pub phase: SessionPhase,
    pub loading: bool,
    pub error: Option<String>,
    pub current_theme_id: Option<String>,
    pub theme_config: Option<ThemeConfig>,
    pub user_id: Option<String>,
    pub user_role: Option<Role>,
    pub is_premium_user: bool,
}

// =============================================================================
// Inner State
// =============================================================================

#[derive(Debug, Default)]
struct Inner {
    phase: SessionPhase,
    error: Option<String>,
    user: Option<User>,
    catalog: ThemeCatalog,
    default_theme: String,
    monetization_enabled: bool,
    current_theme_id: Option<String>,
}

impl Inner {
    fn ensure_ready(&self) -> SessionResult<&User> {
        match (&self.phase, &self.user) {
            (SessionPhase::Ready, Some(user)) => Ok(user),
            _ => Err(SessionError::NotReady),
        }
    }

    fn record_failure(&mut self, err: &SessionError) {
        self.error = Some(err.to_string());
    }

    fn current_theme(&self) -> Option<&Theme> {
        self.current_theme_id
            .as_deref()
            .and_then(|id| self.catalog.get(id).ok())
    }
}

/// Everything `initialize()` loads before it touches the session.
struct Loaded {
    user: User,
    catalog: ThemeCatalog,
    default_theme: String,
    monetization_enabled: bool,
    current_theme_id: String,
}

/// Returns a session still in `Switching` to `Ready` when dropped, e.g. when
/// the caller cancels `switch_theme` mid-write.
struct SwitchingGuard<'a> {
    state: &'a RwLock<Inner>,
}

impl Drop for SwitchingGuard<'_> {
    fn drop(&mut self) {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.phase == SessionPhase::Switching {
            state.phase = SessionPhase::Ready;
        }
    }
}

// =============================================================================
// Theme Session
// =============================================================================

/// Theme session for one user, over a config store `S` and a style sink `K`.
///
/// ## Usage
/// ```rust,ignore
/// let session = ThemeSession::new(store, PresentationSurface::new());
/// session.initialize().await?;
///
/// match session.switch_theme("glow").await {
///     Ok(theme) => println!("now using {}", theme.name),
///     Err(e) => println!("{}: {}", serde_json::to_string(&e.code())?, e),
/// }
/// ```
pub struct ThemeSession<S, K> {
    store: S,
    sink: K,
    state: RwLock<Inner>,
    ops: Mutex<()>,
}

impl<S: ConfigStore, K: StyleSink> ThemeSession<S, K> {
    /// Creates an uninitialized session.
    pub fn new(store: S, sink: K) -> Self {
        ThemeSession {
            store,
            sink,
            state: RwLock::new(Inner::default()),
            ops: Mutex::new(()),
        }
    }

    /// Returns the config store.
    pub fn store(&self) -> &S {
        &self.store
    }

    /// Returns the style sink.
    pub fn sink(&self) -> &K {
        &self.sink
    }

    // =========================================================================
    // Operations
    // =========================================================================

    /// Loads the user, catalog and persisted selection, then applies the
    /// selected theme.
    ///
    /// ## Selection
    /// The persisted theme id wins if it is still in the catalog; otherwise
    /// the configured default theme is used.
    ///
    /// ## Returns
    /// * `Ok(())` - Session is `Ready`
    /// * `Err(SessionError::Initialization)` - Session is `Errored`
    pub async fn initialize(&self) -> SessionResult<()> {
        let _op = self.ops.lock().await;

        {
            let mut state = self.write_state();
            state.phase = SessionPhase::Loading;
            state.error = None;
        }
        info!("Initializing theme session");

        match self.load().await {
            Ok(loaded) => {
                let theme = {
                    let mut state = self.write_state();
                    state.user = Some(loaded.user);
                    state.catalog = loaded.catalog;
                    state.default_theme = loaded.default_theme;
                    state.monetization_enabled = loaded.monetization_enabled;
                    state.current_theme_id = Some(loaded.current_theme_id);
                    state.phase = SessionPhase::Ready;
                    state.current_theme().cloned()
                };

                if let Some(theme) = theme {
                    info!(theme_id = %theme.id, "Theme session ready");
                    self.sink.apply(&theme.css_variables, &theme.id);
                }
                Ok(())
            }
            Err(err) => {
                error!(error = %err, "Theme session initialization failed");
                let mut state = self.write_state();
                *state = Inner {
                    phase: SessionPhase::Errored,
                    error: Some(err.to_string()),
                    ..Inner::default()
                };
                Err(err)
            }
        }
    }

    /// Switches the active theme.
    ///
    /// ## Returns
    /// * `Ok(Theme)` - The theme now active
    /// * `Err(SessionError::ThemeNotFound)` - Unknown id
    /// * `Err(SessionError::AccessDenied)` - Role or premium gate refused
    /// * `Err(SessionError::Persistence)` - Gateway write failed
    /// * `Err(SessionError::NotReady)` - Session not initialized
    ///
    /// On any error the active theme is unchanged and the sink is not
    /// called.
    pub async fn switch_theme(&self, theme_id: &str) -> SessionResult<Theme> {
        let _op = self.ops.lock().await;

        let (theme, user_id) = {
            let mut state = self.write_state();
            let resolved = state.ensure_ready().cloned().and_then(|user| {
                let theme = state.catalog.get(theme_id)?;
                authorize(theme, &user, state.monetization_enabled)?;
                Ok((theme.clone(), user.id))
            });

            match resolved {
                Ok(resolved) => {
                    state.phase = SessionPhase::Switching;
                    resolved
                }
                Err(SessionError::NotReady) => return Err(SessionError::NotReady),
                Err(err) => {
                    warn!(theme_id = %theme_id, error = %err, "Theme switch rejected");
                    state.record_failure(&err);
                    return Err(err);
                }
            }
        };

        let _switching = SwitchingGuard { state: &self.state };
        debug!(theme_id = %theme.id, user_id = %user_id, "Persisting theme selection");

        if let Err(err) = self.store.set_user_theme(&user_id, &theme.id).await {
            let err = SessionError::Persistence(err);
            warn!(theme_id = %theme.id, error = %err, "Theme switch not persisted");
            let mut state = self.write_state();
            state.phase = SessionPhase::Ready;
            state.record_failure(&err);
            return Err(err);
        }

        {
            let mut state = self.write_state();
            state.current_theme_id = Some(theme.id.clone());
            state.phase = SessionPhase::Ready;
            state.error = None;
        }
        self.sink.apply(&theme.css_variables, &theme.id);

        info!(theme_id = %theme.id, user_id = %user_id, "Theme switched");
        Ok(theme)
    }

    /// Flips the global monetization flag. Superadmin only.
    ///
    /// The new value is persisted first and only then applied to the
    /// session, so a failed write leaves the flag unchanged.
    ///
    /// ## Returns
    /// The new flag value.
    pub async fn toggle_monetization(&self) -> SessionResult<bool> {
        let _op = self.ops.lock().await;

        let enabled = {
            let mut state = self.write_state();
            let role = state.ensure_ready()?.role;
            if role != Role::Superadmin {
                let err = SessionError::forbidden("only superadmin may toggle monetization");
                warn!(role = %role, "Monetization toggle rejected");
                state.record_failure(&err);
                return Err(err);
            }
            !state.monetization_enabled
        };

        if let Err(err) = self.store.set_monetization(enabled).await {
            let err = SessionError::Persistence(err);
            warn!(error = %err, "Monetization toggle not persisted");
            self.write_state().record_failure(&err);
            return Err(err);
        }

        {
            let mut state = self.write_state();
            state.monetization_enabled = enabled;
            state.error = None;
        }

        info!(enabled, "Monetization toggled");
        Ok(enabled)
    }

    /// Creates a custom theme and adds it to the catalog. Admin and
    /// superadmin only.
    pub async fn create_theme(&self, data: NewTheme) -> SessionResult<Theme> {
        let _op = self.ops.lock().await;

        {
            let mut state = self.write_state();
            let role = state.ensure_ready()?.role;
            if !role.is_admin() {
                let err = SessionError::forbidden("only admins may create themes");
                warn!(role = %role, "Theme creation rejected");
                state.record_failure(&err);
                return Err(err);
            }
            if let Err(e) = data.validate() {
                let err = SessionError::InvalidTheme(e);
                state.record_failure(&err);
                return Err(err);
            }
        }

        let theme = match self.store.create_theme(data).await {
            Ok(theme) => theme,
            Err(err) => {
                let err = SessionError::Persistence(err);
                warn!(error = %err, "Theme creation not persisted");
                self.write_state().record_failure(&err);
                return Err(err);
            }
        };

        let mut state = self.write_state();
        if let Err(e) = state.catalog.insert(theme.clone()) {
            let err = SessionError::from(e);
            state.record_failure(&err);
            return Err(err);
        }
        state.error = None;

        info!(theme_id = %theme.id, name = %theme.name, "Theme created");
        Ok(theme)
    }

    // =========================================================================
    // Read-only Accessors
    // =========================================================================

    /// Returns the active theme.
    pub fn get_current_theme(&self) -> Option<Theme> {
        self.read_state().current_theme().cloned()
    }

    /// Returns the active theme id.
    pub fn current_theme_id(&self) -> Option<String> {
        self.read_state().current_theme_id.clone()
    }

    /// Returns the whole catalog in display order.
    pub fn available_themes(&self) -> Vec<Theme> {
        self.read_state().catalog.list().to_vec()
    }

    /// Returns the themes the current user may switch to, in display order.
    pub fn accessible_themes(&self) -> Vec<Theme> {
        let state = self.read_state();
        let Some(user) = state.user.as_ref() else {
            return Vec::new();
        };
        accessible_themes(
            state.catalog.list(),
            user.role,
            user.is_premium,
            state.monetization_enabled,
        )
        .into_iter()
        .cloned()
        .collect()
    }

    /// Returns the current user's role, once loaded.
    pub fn user_role(&self) -> Option<Role> {
        self.read_state().user.as_ref().map(|user| user.role)
    }

    /// Returns whether the current user holds a premium subscription.
    pub fn is_premium_user(&self) -> bool {
        self.read_state()
            .user
            .as_ref()
            .is_some_and(|user| user.is_premium)
    }

    /// Returns whether premium gating is active.
    pub fn monetization_enabled(&self) -> bool {
        self.read_state().monetization_enabled
    }

    /// Returns true until the first `initialize()` settles.
    pub fn loading(&self) -> bool {
        matches!(
            self.read_state().phase,
            SessionPhase::Uninitialized | SessionPhase::Loading
        )
    }

    /// Returns the message of the last failed operation, if any.
    pub fn error(&self) -> Option<String> {
        self.read_state().error.clone()
    }

    /// Returns the lifecycle phase.
    pub fn phase(&self) -> SessionPhase {
        self.read_state().phase
    }

    /// Returns a serializable copy of the whole session.
    pub fn snapshot(&self) -> SessionState {
        let state = self.read_state();
        let loaded = state.user.is_some();

        SessionState {
            phase: state.phase,
            loading: matches!(
                state.phase,
                SessionPhase::Uninitialized | SessionPhase::Loading
            ),
            error: state.error.clone(),
            current_theme_id: state.current_theme_id.clone(),
            theme_config: loaded.then(|| ThemeConfig {
                themes: state.catalog.list().to_vec(),
                default_theme: state.default_theme.clone(),
                monetization_enabled: state.monetization_enabled,
            }),
            user_id: state.user.as_ref().map(|user| user.id.clone()),
            user_role: state.user.as_ref().map(|user| user.role),
            is_premium_user: state.user.as_ref().is_some_and(|user| user.is_premium),
        }
    }

    // =========================================================================
    // Internals
    // =========================================================================

    async fn load(&self) -> SessionResult<Loaded> {
        let (user, config) = tokio::try_join!(
            self.store.get_current_user(),
            self.store.get_theme_config()
        )
        .map_err(SessionError::initialization)?;

        validate_theme_config(&config).map_err(SessionError::initialization)?;

        let persisted = self
            .store
            .get_user_theme(&user.id)
            .await
            .map_err(SessionError::initialization)?;

        let ThemeConfig {
            themes,
            default_theme,
            monetization_enabled,
        } = config;
        let catalog = ThemeCatalog::from_themes(themes).map_err(SessionError::initialization)?;

        let current_theme_id = match persisted {
            Some(id) if catalog.contains(&id) => id,
            Some(id) => {
                warn!(
                    user_id = %user.id,
                    theme_id = %id,
                    "Persisted theme no longer in catalog, using default"
                );
                default_theme.clone()
            }
            None => default_theme.clone(),
        };

        debug!(
            user_id = %user.id,
            role = %user.role,
            themes = catalog.len(),
            monetization_enabled,
            "Theme session loaded"
        );

        Ok(Loaded {
            user,
            catalog,
            default_theme,
            monetization_enabled,
            current_theme_id,
        })
    }

    fn read_state(&self) -> RwLockReadGuard<'_, Inner> {
        self.state.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write_state(&self) -> RwLockWriteGuard<'_, Inner> {
        self.state.write().unwrap_or_else(PoisonError::into_inner)
    }
}

// =============================================================================
// Unit Tests
// =============================================================================

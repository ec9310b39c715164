//! # prism-session: Theme Sessions for Prism
//!
//! The crate a host UI embeds. A [`ThemeSession`] loads one user's theme
//! state through a [`ConfigStore`], enforces the entitlement rules from
//! `prism-core`, and publishes the active theme to a [`StyleSink`].
//!
//! ## Architecture Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Theme Session                                  │
//! │                                                                         │
//! │  Host UI                                                               │
//! │    │ initialize() / switch_theme() / toggle_monetization()             │
//! │    ▼                                                                    │
//! │  ┌──────────────────────────────────────────────────────────────────┐  │
//! │  │                  ThemeSession<S, K>                              │  │
//! │  │                                                                  │  │
//! │  │  catalog ─► authorize ─► S::set_user_theme ─► K::apply           │  │
//! │  └──────────┬───────────────────────────────────────────┬───────────┘  │
//! │             ▼                                           ▼              │
//! │  ┌────────────────────────┐                 ┌────────────────────────┐ │
//! │  │ ConfigStore (S)        │                 │ StyleSink (K)          │ │
//! │  │  SqliteStore           │                 │  PresentationSurface   │ │
//! │  │  MemoryStore           │                 │  (:root custom props)  │ │
//! │  └────────────────────────┘                 └────────────────────────┘ │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//! - [`session`] - The session state machine
//! - [`gateway`] - Config store trait and implementations
//! - [`sink`] - Style sink trait and the in-process surface
//! - [`config`] - TOML / environment configuration
//! - [`logging`] - Tracing subscriber setup
//! - [`error`] - Session, gateway and config errors
//!
//! ## Usage
//! ```rust,ignore
//! use std::sync::Arc;
//! use prism_session::{init_tracing, PresentationSurface, SessionConfig, SqliteStore, ThemeSession};
//!
//! let config = SessionConfig::load(None)?;
//! init_tracing(&config.logging.filter);
//!
//! let surface = Arc::new(PresentationSurface::new());
//! let session = ThemeSession::new(SqliteStore::connect(&config).await?, surface.clone());
//!
//! session.initialize().await?;
//! session.switch_theme("minimalist").await?;
//! println!("{}", surface.to_css());
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod session;
pub mod sink;

// =============================================================================
// Re-exports
// =============================================================================

pub use config::SessionConfig;
pub use error::{
    ConfigError, ConfigResult, ErrorCode, ErrorReport, GatewayError, GatewayResult, SessionError,
    SessionResult,
};
pub use gateway::{ConfigStore, MemoryStore, SqliteStore};
pub use logging::init_tracing;
pub use session::{SessionPhase, SessionState, ThemeSession};
pub use sink::{PresentationSurface, StyleSink};

//! # prism-store: Durable Store for Prism
//!
//! This crate provides database access for Prism. It uses SQLite for local
//! storage with sqlx for async operations, and is the single source of truth
//! for everything that outlives a session.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Prism Data Flow                                │
//! │                                                                         │
//! │  ThemeSession::initialize / switch_theme                               │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SqliteStore (prism-session gateway)                                   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    prism-store (THIS CRATE)                     │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────────┐    ┌────────────────┐   ┌──────────────┐  │   │
//! │  │   │   Database    │    │  Repositories  │   │  Migrations  │  │   │
//! │  │   │   (pool.rs)   │    │                │   │  (embedded)  │  │   │
//! │  │   │               │    │ ThemeRepo      │   │              │  │   │
//! │  │   │ SqlitePool    │◄───│ UserRepo       │   │ 001_initial_ │  │   │
//! │  │   │ Connection    │    │ SelectionRepo  │   │   schema.sql │  │   │
//! │  │   │ Management    │    │ SettingsRepo   │   │              │  │   │
//! │  │   └───────────────┘    └────────────────┘   └──────────────┘  │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  SQLite file (prism.db)                                                │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Module Organization
//!
//! - [`pool`] - Connection pool creation and configuration
//! - [`migrations`] - Embedded database migrations
//! - [`error`] - Store error types
//! - [`repository`] - Repository implementations
//!
//! ## Usage
//!
//! ```rust,ignore
//! use prism_store::{Database, DbConfig};
//!
//! let db = Database::new(DbConfig::new("path/to/prism.db")).await?;
//! db.seed_builtin_catalog().await?;
//!
//! let config = db.load_theme_config().await?;
//! db.selections().set("user-123", "minimalist").await?;
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod error;
pub mod migrations;
pub mod pool;
pub mod repository;

// =============================================================================
// Re-exports
// =============================================================================

pub use error::{StoreError, StoreResult};
pub use pool::{Database, DbConfig};

// Repository re-exports for convenience
pub use repository::selection::SelectionRepository;
pub use repository::settings::SettingsRepository;
pub use repository::theme::ThemeRepository;
pub use repository::user::UserRepository;

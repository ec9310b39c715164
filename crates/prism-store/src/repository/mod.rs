//! # Repository Module
//!
//! Database repository implementations for Prism.
//!
//! ## Repository Pattern
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                                                                         │
//! │  SqliteStore (gateway)                                                 │
//! │       │                                                                 │
//! │       │  db.selections().set("user-123", "retro")                      │
//! │       ▼                                                                 │
//! │  SelectionRepository                                                   │
//! │  ├── get(&self, user_id)                                               │
//! │  └── set(&self, user_id, theme_id)                                     │
//! │       │                                                                 │
//! │       │  SQL Query                                                      │
//! │       ▼                                                                 │
//! │  SQLite Database                                                       │
//! │                                                                         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Available Repositories
//!
//! - [`ThemeRepository`](theme::ThemeRepository) - Theme catalog rows
//! - [`UserRepository`](user::UserRepository) - Users and their entitlements
//! - [`SelectionRepository`](selection::SelectionRepository) - Per-user theme choice
//! - [`SettingsRepository`](settings::SettingsRepository) - Global settings

pub mod selection;
pub mod settings;
pub mod theme;
pub mod user;

//! # prism-core: Pure Theme & Entitlement Logic for Prism
//!
//! This crate is the **heart** of Prism. It decides which themes a user may
//! select and keeps the catalog consistent, with zero I/O dependencies.
//!
//! ## Architecture Position
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                          Prism Architecture                             │
//! │                                                                         │
//! │  ┌─────────────────────────────────────────────────────────────────┐   │
//! │  │                    Host UI (theme picker, admin)                │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    prism-session                                │   │
//! │  │    initialize, switch_theme, toggle_monetization, ...           │   │
//! │  └─────────────────────────────┬───────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │               ★ prism-core (THIS CRATE) ★                       │   │
//! │  │                                                                 │   │
//! │  │   ┌───────────┐  ┌───────────┐  ┌─────────────┐  ┌──────────┐  │   │
//! │  │   │   types   │  │  catalog  │  │ entitlement │  │validation│  │   │
//! │  │   │   Theme   │  │  ordered  │  │ can_access  │  │  themes  │  │   │
//! │  │   │   Role    │  │  registry │  │   Denial    │  │  config  │  │   │
//! │  │   └───────────┘  └───────────┘  └─────────────┘  └──────────┘  │   │
//! │  │                                                                 │   │
//! │  │   NO I/O • NO DATABASE • NO NETWORK • PURE FUNCTIONS           │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! │                                │                                        │
//! │  ┌─────────────────────────────▼───────────────────────────────────┐   │
//! │  │                    prism-store (Database Layer)                 │   │
//! │  └─────────────────────────────────────────────────────────────────┘   │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Modules
//!
//! - [`types`] - Domain types (Theme, Role, User, ThemeConfig)
//! - [`catalog`] - Ordered theme registry
//! - [`entitlement`] - The access decision table
//! - [`validation`] - Theme and catalog validation
//! - [`builtin`] - The themes shipped with Prism
//! - [`error`] - Domain error types
//!
//! ## Example Usage
//!
//! ```rust
//! use prism_core::builtin::builtin_catalog;
//! use prism_core::entitlement::can_access;
//! use prism_core::Role;
//!
//! let catalog = builtin_catalog();
//! let glow = catalog.get("glow").unwrap();
//!
//! // Super-admin-only theme: a regular user never gets it
//! assert!(!can_access(glow, Role::User, true, false));
//! assert!(can_access(glow, Role::Superadmin, false, true));
//! ```

// =============================================================================
// Module Declarations
// =============================================================================

pub mod builtin;
pub mod catalog;
pub mod entitlement;
pub mod error;
pub mod types;
pub mod validation;

// =============================================================================
// Re-exports for Convenience
// =============================================================================

pub use catalog::ThemeCatalog;
pub use entitlement::{authorize, can_access, check_access, Denial};
pub use error::{CoreError, CoreResult, ValidationError};
pub use types::*;

// =============================================================================
// Crate-Level Constants
// =============================================================================

/// Style variables every theme must define.
///
/// A theme missing any of these is rejected when the catalog is loaded,
/// not when it is first applied.
pub const REQUIRED_CSS_VARIABLES: [&str; 6] = [
    "primary-color",
    "secondary-color",
    "background-color",
    "text-color",
    "border-radius",
    "shadow",
];

/// Id of the theme every fresh installation falls back to.
pub const DEFAULT_THEME_ID: &str = "default";

/// Prefix of ids assigned to themes created at runtime.
pub const CUSTOM_THEME_PREFIX: &str = "custom-";

/// Maximum length of a theme id.
pub const MAX_THEME_ID_LEN: usize = 64;

/// Maximum length of a theme display name.
pub const MAX_THEME_NAME_LEN: usize = 100;

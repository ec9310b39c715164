//! # Domain Types
//!
//! Core domain types used throughout Prism.
//!
//! ## Type Overview
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Domain Types                                    │
//! │                                                                         │
//! │  ┌──────────────────┐   ┌─────────────────┐   ┌──────────────────┐     │
//! │  │      Theme       │   │      User       │   │   ThemeConfig    │     │
//! │  │  ──────────────  │   │  ─────────────  │   │  ──────────────  │     │
//! │  │  id (unique)     │   │  id             │   │  themes (order)  │     │
//! │  │  is_premium      │   │  role           │   │  default_theme   │     │
//! │  │  super_admin_only│   │  is_premium     │   │  monetization_   │     │
//! │  │  allowed_roles   │   └─────────────────┘   │    enabled       │     │
//! │  │  css_variables   │                         └──────────────────┘     │
//! │  └──────────────────┘                                                   │
//! │                                                                         │
//! │  Role: User < Vendor < Admin < Superadmin                               │
//! │  (ordering is informational: access checks never compare ranks)         │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::CoreError;
use crate::validation::ValidationResult;
use crate::ValidationError;

/// Style variable name → value (e.g. `primary-color` → `#3b82f6`).
///
/// Names are stored without the leading `--`; the sink adds it.
pub type CssVariables = BTreeMap<String, String>;

// =============================================================================
// Role
// =============================================================================

/// The role of a user.
///
/// Variants are declared in privilege order so `Ord` reflects rank, but the
/// entitlement resolver only ever checks explicit membership.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize, TS,
)]
#[cfg_attr(feature = "sqlx", derive(sqlx::Type))]
#[cfg_attr(feature = "sqlx", sqlx(rename_all = "lowercase"))]
#[ts(export)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// Regular end user.
    User,
    /// Seller with a storefront.
    Vendor,
    /// Platform administrator.
    Admin,
    /// Owner of the platform; bypasses every theme gate.
    Superadmin,
}

impl Role {
    /// Every role, lowest privilege first.
    pub const ALL: [Role; 4] = [Role::User, Role::Vendor, Role::Admin, Role::Superadmin];

    /// Returns the wire name of the role.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Role::User => "user",
            Role::Vendor => "vendor",
            Role::Admin => "admin",
            Role::Superadmin => "superadmin",
        }
    }

    /// Returns true for roles allowed to manage the theme library.
    pub const fn is_admin(&self) -> bool {
        matches!(self, Role::Admin | Role::Superadmin)
    }
}

impl Default for Role {
    fn default() -> Self {
        Role::User
    }
}

impl std::fmt::Display for Role {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Role {
    type Err = CoreError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "user" => Ok(Role::User),
            "vendor" => Ok(Role::Vendor),
            "admin" => Ok(Role::Admin),
            "superadmin" => Ok(Role::Superadmin),
            other => Err(ValidationError::InvalidFormat {
                field: "role".to_string(),
                reason: format!(
                    "unknown role '{}', expected one of: user, vendor, admin, superadmin",
                    other
                ),
            }
            .into()),
        }
    }
}

// =============================================================================
// Theme
// =============================================================================

/// A named bundle of style variables plus access-control metadata.
///
/// ## Invariants (checked by [`crate::validation::validate_theme`])
/// - `id` and `name` are non-empty
/// - `css_variables` defines every [`crate::REQUIRED_CSS_VARIABLES`] entry
/// - `super_admin_only` implies `allowed_roles == {Superadmin}`
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct Theme {
    /// Unique identifier (`default`, `glow`, `custom-<uuid>`).
    pub id: String,

    /// Display name shown in the theme picker.
    pub name: String,

    /// One-line description.
    #[serde(default)]
    pub description: String,

    /// Gated behind a subscription while monetization is enabled.
    pub is_premium: bool,

    /// Only superadmins may select this theme.
    pub super_admin_only: bool,

    /// Roles explicitly allowed to select this theme.
    pub allowed_roles: BTreeSet<Role>,

    /// Style variables applied to the presentation surface.
    pub css_variables: CssVariables,

    /// Informational only.
    #[serde(default = "default_seo_optimized")]
    pub seo_optimized: bool,
}

fn default_seo_optimized() -> bool {
    true
}

impl Theme {
    /// Checks explicit membership of `role` in `allowed_roles`.
    #[inline]
    pub fn allows_role(&self, role: Role) -> bool {
        self.allowed_roles.contains(&role)
    }

    /// Looks up a single style variable.
    pub fn variable(&self, name: &str) -> Option<&str> {
        self.css_variables.get(name).map(String::as_str)
    }

    /// Class name marking this theme as active (`theme-<id>`).
    pub fn marker_class(&self) -> String {
        marker_class(&self.id)
    }
}

/// Class name marking the theme with the given id as active.
pub fn marker_class(theme_id: &str) -> String {
    format!("theme-{}", theme_id)
}

// =============================================================================
// New Theme
// =============================================================================

/// Payload for creating a custom theme.
///
/// The id is always assigned by the catalog (or the store), never by the
/// caller, and `seo_optimized` defaults to true.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct NewTheme {
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub is_premium: bool,
    #[serde(default)]
    pub super_admin_only: bool,
    pub allowed_roles: BTreeSet<Role>,
    pub css_variables: CssVariables,
}

impl NewTheme {
    /// Builds the full theme under the given id.
    pub fn into_theme(self, id: String) -> Theme {
        Theme {
            id,
            name: self.name,
            description: self.description,
            is_premium: self.is_premium,
            super_admin_only: self.super_admin_only,
            allowed_roles: self.allowed_roles,
            css_variables: self.css_variables,
            seo_optimized: true,
        }
    }

    /// Validates the payload as it would be stored.
    pub fn validate(&self) -> ValidationResult<()> {
        crate::validation::validate_new_theme(self)
    }
}

// =============================================================================
// User
// =============================================================================

/// The user a session runs for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct User {
    pub id: String,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    pub role: Role,
    /// Subscription status, independent of role.
    pub is_premium: bool,
}

impl User {
    /// Creates a user with no display details.
    pub fn new(id: impl Into<String>, role: Role, is_premium: bool) -> Self {
        User {
            id: id.into(),
            name: None,
            email: None,
            role,
            is_premium,
        }
    }
}

// =============================================================================
// Theme Config
// =============================================================================

/// Process-wide theme configuration, loaded once per session.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ThemeConfig {
    /// Catalog in display order.
    pub themes: Vec<Theme>,

    /// Theme selected when the user has no (valid) persisted choice.
    pub default_theme: String,

    /// Activates the premium gate.
    pub monetization_enabled: bool,
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_parsing() {
        assert_eq!("user".parse::<Role>().unwrap(), Role::User);
        assert_eq!("Vendor".parse::<Role>().unwrap(), Role::Vendor);
        assert_eq!(" admin ".parse::<Role>().unwrap(), Role::Admin);
        assert_eq!("superadmin".parse::<Role>().unwrap(), Role::Superadmin);
        assert!("root".parse::<Role>().is_err());
    }

    #[test]
    fn test_role_display_matches_wire_name() {
        for role in Role::ALL {
            let json = serde_json::to_string(&role).unwrap();
            assert_eq!(json, format!("\"{}\"", role));
        }
    }

    #[test]
    fn test_role_order_is_privilege_order() {
        assert!(Role::User < Role::Vendor);
        assert!(Role::Vendor < Role::Admin);
        assert!(Role::Admin < Role::Superadmin);
        assert_eq!(Role::default(), Role::User);
    }

    #[test]
    fn test_theme_wire_format_is_camel_case() {
        let json = r##"{
            "id": "mono",
            "name": "Mono",
            "isPremium": false,
            "superAdminOnly": false,
            "allowedRoles": ["user", "admin"],
            "cssVariables": { "primary-color": "#000" }
        }"##;
        let theme: Theme = serde_json::from_str(json).unwrap();

        assert_eq!(theme.id, "mono");
        assert!(theme.seo_optimized);
        assert!(theme.allows_role(Role::Admin));
        assert!(!theme.allows_role(Role::Vendor));
        assert_eq!(theme.variable("primary-color"), Some("#000"));
        assert_eq!(theme.marker_class(), "theme-mono");
    }

    #[test]
    fn test_new_theme_into_theme_defaults_seo() {
        let new_theme = NewTheme {
            name: "Ocean".to_string(),
            description: String::new(),
            is_premium: true,
            super_admin_only: false,
            allowed_roles: BTreeSet::from([Role::Vendor]),
            css_variables: CssVariables::new(),
        };
        let theme = new_theme.into_theme("custom-1".to_string());

        assert_eq!(theme.id, "custom-1");
        assert!(theme.seo_optimized);
        assert!(theme.is_premium);
    }
}

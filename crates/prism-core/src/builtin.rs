//! # Built-in Themes
//!
//! The catalog every fresh Prism installation starts with.
//!
//! | Id           | Premium | Super admin only | Allowed roles                  |
//! |--------------|---------|------------------|--------------------------------|
//! | `default`    | no      | no               | user, vendor, admin, superadmin|
//! | `neumorphic` | yes     | no               | vendor, admin, superadmin      |
//! | `minimalist` | no      | no               | user, vendor, admin, superadmin|
//! | `retro`      | yes     | no               | vendor, admin, superadmin      |
//! | `glow`       | yes     | yes              | superadmin                     |

use std::collections::BTreeSet;

use crate::catalog::ThemeCatalog;
use crate::types::{CssVariables, Role, Theme, ThemeConfig};
use crate::DEFAULT_THEME_ID;

fn css(pairs: [(&str, &str); 6]) -> CssVariables {
    pairs
        .into_iter()
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect()
}

fn roles(roles: &[Role]) -> BTreeSet<Role> {
    roles.iter().copied().collect()
}

fn theme(
    id: &str,
    name: &str,
    description: &str,
    is_premium: bool,
    allowed_roles: &[Role],
    css_variables: CssVariables,
) -> Theme {
    let super_admin_only = allowed_roles == [Role::Superadmin];
    Theme {
        id: id.to_string(),
        name: name.to_string(),
        description: description.to_string(),
        is_premium,
        super_admin_only,
        allowed_roles: roles(allowed_roles),
        css_variables,
        seo_optimized: true,
    }
}

/// Returns the built-in themes in catalog order.
pub fn builtin_themes() -> Vec<Theme> {
    const EVERYONE: &[Role] = &Role::ALL;
    const SELLERS_AND_UP: &[Role] = &[Role::Vendor, Role::Admin, Role::Superadmin];

    vec![
        theme(
            DEFAULT_THEME_ID,
            "Default",
            "Clean and professional default theme",
            false,
            EVERYONE,
            css([
                ("primary-color", "#3b82f6"),
                ("secondary-color", "#64748b"),
                ("background-color", "#ffffff"),
                ("text-color", "#1f2937"),
                ("border-radius", "0.5rem"),
                ("shadow", "0 1px 3px 0 rgb(0 0 0 / 0.1)"),
            ]),
        ),
        theme(
            "neumorphic",
            "Neumorphic",
            "Soft, tactile design with subtle shadows",
            true,
            SELLERS_AND_UP,
            css([
                ("primary-color", "#6366f1"),
                ("secondary-color", "#8b5cf6"),
                ("background-color", "#f1f5f9"),
                ("text-color", "#334155"),
                ("border-radius", "1rem"),
                (
                    "shadow",
                    "inset 5px 5px 10px #d1d5db, inset -5px -5px 10px #ffffff",
                ),
            ]),
        ),
        theme(
            "minimalist",
            "Minimalist",
            "Ultra-clean design with maximum whitespace",
            false,
            EVERYONE,
            css([
                ("primary-color", "#000000"),
                ("secondary-color", "#6b7280"),
                ("background-color", "#ffffff"),
                ("text-color", "#111827"),
                ("border-radius", "0.25rem"),
                ("shadow", "0 1px 2px 0 rgb(0 0 0 / 0.05)"),
            ]),
        ),
        theme(
            "retro",
            "Retro",
            "Nostalgic design with vintage colors",
            true,
            SELLERS_AND_UP,
            css([
                ("primary-color", "#f59e0b"),
                ("secondary-color", "#dc2626"),
                ("background-color", "#fef3c7"),
                ("text-color", "#92400e"),
                ("border-radius", "0.75rem"),
                ("shadow", "0 4px 6px -1px rgb(0 0 0 / 0.1)"),
            ]),
        ),
        theme(
            "glow",
            "Glow",
            "Futuristic design with neon accents",
            true,
            &[Role::Superadmin],
            css([
                ("primary-color", "#06b6d4"),
                ("secondary-color", "#8b5cf6"),
                ("background-color", "#0f172a"),
                ("text-color", "#f1f5f9"),
                ("border-radius", "0.5rem"),
                ("shadow", "0 0 20px rgb(6 182 212 / 0.5)"),
            ]),
        ),
    ]
}

/// Returns the built-in configuration: default theme, monetization off.
pub fn builtin_config() -> ThemeConfig {
    ThemeConfig {
        themes: builtin_themes(),
        default_theme: DEFAULT_THEME_ID.to_string(),
        monetization_enabled: false,
    }
}

/// Returns the built-in themes as a catalog.
pub fn builtin_catalog() -> ThemeCatalog {
    // Built-in ids are distinct literals
    ThemeCatalog::from_themes(builtin_themes()).unwrap_or_default()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_order_and_flags() {
        let themes = builtin_themes();
        let ids: Vec<&str> = themes.iter().map(|t| t.id.as_str()).collect();
        assert_eq!(ids, ["default", "neumorphic", "minimalist", "retro", "glow"]);

        let glow = &themes[4];
        assert!(glow.super_admin_only);
        assert!(glow.is_premium);
        assert_eq!(glow.allowed_roles, roles(&[Role::Superadmin]));

        let neumorphic = &themes[1];
        assert!(!neumorphic.super_admin_only);
        assert!(neumorphic.allows_role(Role::Vendor));
        assert!(!neumorphic.allows_role(Role::User));
    }

    #[test]
    fn test_every_builtin_has_six_variables() {
        for theme in builtin_themes() {
            assert_eq!(theme.css_variables.len(), 6, "{}", theme.id);
        }
    }

    #[test]
    fn test_builtin_catalog_is_complete() {
        assert_eq!(builtin_catalog().len(), 5);
        assert!(!builtin_config().monetization_enabled);
    }
}

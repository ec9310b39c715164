//! # Entitlement Resolver
//!
//! Decides whether a user may select a theme.
//!
//! ## Decision Table
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      check_access(theme, role, ...)                     │
//! │                                                                         │
//! │  role == Superadmin ───────────────────────────────► ALLOW (final)     │
//! │       │                                                                 │
//! │       ▼                                                                 │
//! │  role == Admin ──► theme.super_admin_only? ──yes──► DENY (role)        │
//! │       │                     │ no                                        │
//! │       │                     ▼                                           │
//! │       │               premium gate ◄────────────┐                       │
//! │       ▼                                         │                       │
//! │  role ∈ theme.allowed_roles? ──no──► DENY (role)│                       │
//! │       │ yes                                     │                       │
//! │       └─────────────────────────────────────────┘                       │
//! │                                                                         │
//! │  premium gate:                                                          │
//! │    theme.is_premium && monetization_enabled && !is_premium_user         │
//! │       ──yes──► DENY (premium)        ──no──► ALLOW                      │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Superadmin returns before the premium gate runs, so it is exempt from
//! monetization as well as from the role allow-list.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::error::{CoreError, CoreResult};
use crate::types::{Role, Theme, User};

/// Why access to a theme was refused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export)]
#[serde(rename_all = "snake_case")]
pub enum Denial {
    /// The role is not allowed to use the theme.
    InsufficientRole,
    /// The theme needs a subscription while monetization is enabled.
    PremiumRequired,
}

impl std::fmt::Display for Denial {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Denial::InsufficientRole => write!(f, "Insufficient permissions for this theme"),
            Denial::PremiumRequired => write!(f, "Premium theme requires subscription"),
        }
    }
}

/// Evaluates the decision table and reports the reason on refusal.
pub fn check_access(
    theme: &Theme,
    role: Role,
    is_premium_user: bool,
    monetization_enabled: bool,
) -> Result<(), Denial> {
    let role_allowed = match role {
        Role::Superadmin => return Ok(()),
        Role::Admin => !theme.super_admin_only,
        Role::User | Role::Vendor => theme.allows_role(role),
    };

    if !role_allowed {
        return Err(Denial::InsufficientRole);
    }

    if theme.is_premium && monetization_enabled && !is_premium_user {
        return Err(Denial::PremiumRequired);
    }

    Ok(())
}

/// Returns true when the user may select the theme.
#[inline]
pub fn can_access(
    theme: &Theme,
    role: Role,
    is_premium_user: bool,
    monetization_enabled: bool,
) -> bool {
    check_access(theme, role, is_premium_user, monetization_enabled).is_ok()
}

/// Checks `user` against `theme`, reporting a refusal as
/// [`CoreError::AccessDenied`].
pub fn authorize(theme: &Theme, user: &User, monetization_enabled: bool) -> CoreResult<()> {
    check_access(theme, user.role, user.is_premium, monetization_enabled).map_err(|reason| {
        CoreError::AccessDenied {
            theme_id: theme.id.clone(),
            reason,
        }
    })
}

/// Filters an ordered catalog down to the themes the user may select.
///
/// Catalog order is preserved.
pub fn accessible_themes<'a>(
    themes: &'a [Theme],
    role: Role,
    is_premium_user: bool,
    monetization_enabled: bool,
) -> Vec<&'a Theme> {
    themes
        .iter()
        .filter(|theme| can_access(theme, role, is_premium_user, monetization_enabled))
        .collect()
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::CssVariables;
    use std::collections::BTreeSet;

    fn theme(is_premium: bool, super_admin_only: bool, allowed: &[Role]) -> Theme {
        Theme {
            id: "t".to_string(),
            name: "T".to_string(),
            description: String::new(),
            is_premium,
            super_admin_only,
            allowed_roles: allowed.iter().copied().collect::<BTreeSet<_>>(),
            css_variables: CssVariables::new(),
            seo_optimized: true,
        }
    }

    const A: Result<(), Denial> = Ok(());
    const R: Result<(), Denial> = Err(Denial::InsufficientRole);
    const P: Result<(), Denial> = Err(Denial::PremiumRequired);

    /// (monetization_enabled, is_premium_user) for each outcome column.
    const FLAGS: [(bool, bool); 4] = [(false, false), (false, true), (true, false), (true, true)];

    fn shape(name: &str) -> Theme {
        const EVERYONE: &[Role] = &Role::ALL;
        const SELLERS: &[Role] = &[Role::Vendor, Role::Admin, Role::Superadmin];
        const SUPER: &[Role] = &[Role::Superadmin];

        match name {
            "open" => theme(false, false, EVERYONE),
            "open-premium" => theme(true, false, EVERYONE),
            "sellers" => theme(false, false, SELLERS),
            "sellers-premium" => theme(true, false, SELLERS),
            "super" => theme(false, true, SUPER),
            "super-premium" => theme(true, true, SUPER),
            other => panic!("unknown shape {other}"),
        }
    }

    #[rustfmt::skip]
    const MATRIX: [(&str, Role, [Result<(), Denial>; 4]); 24] = [
        ("open",            Role::User,       [A, A, A, A]),
        ("open",            Role::Vendor,     [A, A, A, A]),
        ("open",            Role::Admin,      [A, A, A, A]),
        ("open",            Role::Superadmin, [A, A, A, A]),
        ("open-premium",    Role::User,       [A, A, P, A]),
        ("open-premium",    Role::Vendor,     [A, A, P, A]),
        ("open-premium",    Role::Admin,      [A, A, P, A]),
        ("open-premium",    Role::Superadmin, [A, A, A, A]),
        ("sellers",         Role::User,       [R, R, R, R]),
        ("sellers",         Role::Vendor,     [A, A, A, A]),
        ("sellers",         Role::Admin,      [A, A, A, A]),
        ("sellers",         Role::Superadmin, [A, A, A, A]),
        ("sellers-premium", Role::User,       [R, R, R, R]),
        ("sellers-premium", Role::Vendor,     [A, A, P, A]),
        ("sellers-premium", Role::Admin,      [A, A, P, A]),
        ("sellers-premium", Role::Superadmin, [A, A, A, A]),
        ("super",           Role::User,       [R, R, R, R]),
        ("super",           Role::Vendor,     [R, R, R, R]),
        ("super",           Role::Admin,      [R, R, R, R]),
        ("super",           Role::Superadmin, [A, A, A, A]),
        ("super-premium",   Role::User,       [R, R, R, R]),
        ("super-premium",   Role::Vendor,     [R, R, R, R]),
        ("super-premium",   Role::Admin,      [R, R, R, R]),
        ("super-premium",   Role::Superadmin, [A, A, A, A]),
    ];

    #[test]
    fn test_full_matrix() {
        let mut checked = 0;
        for (name, role, outcomes) in MATRIX {
            let t = shape(name);
            for ((monetization, premium_user), expected) in FLAGS.into_iter().zip(outcomes) {
                assert_eq!(
                    check_access(&t, role, premium_user, monetization),
                    expected,
                    "theme={name} role={role} monetization={monetization} \
                     premium_user={premium_user}"
                );
                checked += 1;
            }
        }
        assert_eq!(checked, 96);
    }

    #[test]
    fn test_superadmin_bypasses_everything() {
        let t = theme(true, true, &[Role::Superadmin]);
        for monetization in [false, true] {
            for premium_user in [false, true] {
                assert!(can_access(&t, Role::Superadmin, premium_user, monetization));
            }
        }
        // Even a theme that forgot to list superadmin
        let t = theme(true, false, &[Role::User]);
        assert!(can_access(&t, Role::Superadmin, false, true));
    }

    #[test]
    fn test_super_admin_only_denies_other_roles() {
        let t = theme(false, true, &[Role::Superadmin]);
        for role in [Role::User, Role::Vendor, Role::Admin] {
            assert_eq!(
                check_access(&t, role, true, false),
                Err(Denial::InsufficientRole)
            );
        }
    }

    #[test]
    fn test_admin_ignores_allow_list() {
        let t = theme(false, false, &[Role::User]);
        assert!(can_access(&t, Role::Admin, false, false));
    }

    #[test]
    fn test_premium_gate_downgrades_role_access() {
        let t = theme(true, false, &[Role::User, Role::Vendor]);

        assert_eq!(
            check_access(&t, Role::Vendor, false, true),
            Err(Denial::PremiumRequired)
        );
        assert!(can_access(&t, Role::Vendor, true, true));
        assert!(can_access(&t, Role::Vendor, false, false));
        assert_eq!(
            check_access(&t, Role::Admin, false, true),
            Err(Denial::PremiumRequired)
        );
    }

    #[test]
    fn test_role_denial_wins_over_premium_denial() {
        let t = theme(true, false, &[Role::Vendor]);
        assert_eq!(
            check_access(&t, Role::User, false, true),
            Err(Denial::InsufficientRole)
        );
    }

    #[test]
    fn test_authorize_names_the_theme() {
        let mut t = theme(true, false, &[Role::Vendor]);
        t.id = "retro".to_string();

        let err = authorize(&t, &User::new("u1", Role::Vendor, false), true).unwrap_err();
        assert!(matches!(
            err,
            CoreError::AccessDenied { ref theme_id, reason: Denial::PremiumRequired }
                if theme_id == "retro"
        ));
        assert!(authorize(&t, &User::new("u1", Role::Vendor, true), true).is_ok());
    }

    #[test]
    fn test_accessible_themes_keeps_order() {
        let mut a = theme(false, false, &[Role::User]);
        a.id = "a".to_string();
        let mut b = theme(false, true, &[Role::Superadmin]);
        b.id = "b".to_string();
        let mut c = theme(true, false, &[Role::User]);
        c.id = "c".to_string();
        let themes = vec![a, b, c];

        let ids: Vec<&str> = accessible_themes(&themes, Role::User, false, false)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a", "c"]);

        let ids: Vec<&str> = accessible_themes(&themes, Role::User, false, true)
            .into_iter()
            .map(|t| t.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a"]);
    }

    #[test]
    fn test_denial_messages() {
        assert_eq!(
            Denial::PremiumRequired.to_string(),
            "Premium theme requires subscription"
        );
        assert_eq!(
            Denial::InsufficientRole.to_string(),
            "Insufficient permissions for this theme"
        );
    }
}

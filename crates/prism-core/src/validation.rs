//! # Validation Module
//!
//! Theme and catalog validation for Prism.
//!
//! ## When Validation Runs
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                      Validation Points                                  │
//! │                                                                         │
//! │  Session initialize()                                                   │
//! │  └── validate_theme_config ← whole catalog, rejected as one unit        │
//! │                                                                         │
//! │  Admin create_theme()                                                   │
//! │  └── validate_new_theme    ← before the payload reaches the store       │
//! │                                                                         │
//! │  Store insert                                                           │
//! │  └── validate_theme        ← nothing malformed is ever persisted        │
//! │                                                                         │
//! │  A malformed theme fails at load time, never on first use.              │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//! ```rust
//! use prism_core::builtin::builtin_config;
//! use prism_core::validation::{validate_theme_config, validate_theme_id};
//!
//! validate_theme_id("neumorphic").unwrap();
//! assert!(validate_theme_id("has space").is_err());
//!
//! validate_theme_config(&builtin_config()).unwrap();
//! ```

use std::collections::HashSet;

use crate::error::ValidationError;
use crate::types::{CssVariables, NewTheme, Role, Theme, ThemeConfig};
use crate::{MAX_THEME_ID_LEN, MAX_THEME_NAME_LEN, REQUIRED_CSS_VARIABLES};

/// Result type for validation operations.
pub type ValidationResult<T> = Result<T, ValidationError>;

// =============================================================================
// Field Validators
// =============================================================================

/// Validates a theme id.
///
/// ## Rules
/// - Must not be empty
/// - At most 64 characters
/// - Letters, numbers, hyphens and underscores only (it ends up in a class name)
pub fn validate_theme_id(id: &str) -> ValidationResult<()> {
    if id.trim().is_empty() {
        return Err(ValidationError::Required {
            field: "id".to_string(),
        });
    }

    if id.len() > MAX_THEME_ID_LEN {
        return Err(ValidationError::TooLong {
            field: "id".to_string(),
            max: MAX_THEME_ID_LEN,
        });
    }

    if !id
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
    {
        return Err(ValidationError::InvalidFormat {
            field: "id".to_string(),
            reason: "must contain only letters, numbers, hyphens, and underscores".to_string(),
        });
    }

    Ok(())
}

/// Validates a theme display name.
pub fn validate_theme_name(name: &str) -> ValidationResult<()> {
    let name = name.trim();

    if name.is_empty() {
        return Err(ValidationError::Required {
            field: "name".to_string(),
        });
    }

    if name.chars().count() > MAX_THEME_NAME_LEN {
        return Err(ValidationError::TooLong {
            field: "name".to_string(),
            max: MAX_THEME_NAME_LEN,
        });
    }

    Ok(())
}

/// Checks that every required style variable is present and non-empty.
pub fn validate_css_variables(theme_id: &str, variables: &CssVariables) -> ValidationResult<()> {
    for required in REQUIRED_CSS_VARIABLES {
        let present = variables
            .get(required)
            .map(|value| !value.trim().is_empty())
            .unwrap_or(false);

        if !present {
            return Err(ValidationError::MissingVariable {
                theme_id: theme_id.to_string(),
                variable: required.to_string(),
            });
        }
    }

    for name in variables.keys() {
        if name.is_empty() || name.starts_with("--") || name.contains(char::is_whitespace) {
            return Err(ValidationError::InvalidFormat {
                field: format!("cssVariables.{}", name),
                reason: "variable names are bare identifiers without a leading '--'".to_string(),
            });
        }
    }

    Ok(())
}

/// Enforces `super_admin_only` ⇒ `allowed_roles == {Superadmin}`.
fn validate_role_invariant(
    theme_id: &str,
    super_admin_only: bool,
    allowed_roles: &std::collections::BTreeSet<Role>,
) -> ValidationResult<()> {
    if super_admin_only && !(allowed_roles.len() == 1 && allowed_roles.contains(&Role::Superadmin))
    {
        return Err(ValidationError::SuperAdminRoles {
            theme_id: theme_id.to_string(),
        });
    }
    Ok(())
}

// =============================================================================
// Theme Validators
// =============================================================================

/// Validates a complete theme definition.
pub fn validate_theme(theme: &Theme) -> ValidationResult<()> {
    validate_theme_id(&theme.id)?;
    validate_theme_name(&theme.name)?;
    validate_css_variables(&theme.id, &theme.css_variables)?;
    validate_role_invariant(&theme.id, theme.super_admin_only, &theme.allowed_roles)?;
    Ok(())
}

/// Validates a custom theme payload before an id is assigned.
pub fn validate_new_theme(new_theme: &NewTheme) -> ValidationResult<()> {
    // Name doubles as the label in error messages until an id exists
    let label = new_theme.name.trim();
    validate_theme_name(&new_theme.name)?;
    validate_css_variables(label, &new_theme.css_variables)?;
    validate_role_invariant(label, new_theme.super_admin_only, &new_theme.allowed_roles)?;
    Ok(())
}

/// Validates a whole configuration as loaded from the config store.
///
/// ## Rules
/// - Every theme passes [`validate_theme`]
/// - No two themes share an id
/// - `default_theme` names a theme in the catalog
pub fn validate_theme_config(config: &ThemeConfig) -> ValidationResult<()> {
    let mut seen = HashSet::with_capacity(config.themes.len());

    for theme in &config.themes {
        validate_theme(theme)?;

        if !seen.insert(theme.id.as_str()) {
            return Err(ValidationError::Duplicate {
                field: "theme id".to_string(),
                value: theme.id.clone(),
            });
        }
    }

    if !seen.contains(config.default_theme.as_str()) {
        return Err(ValidationError::UnknownDefaultTheme(
            config.default_theme.clone(),
        ));
    }

    Ok(())
}

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builtin::{builtin_config, builtin_themes};
    use std::collections::BTreeSet;

    #[test]
    fn test_validate_theme_id() {
        assert!(validate_theme_id("default").is_ok());
        assert!(validate_theme_id("custom-1a2b_3").is_ok());
        assert!(validate_theme_id("").is_err());
        assert!(validate_theme_id("   ").is_err());
        assert!(validate_theme_id("theme one").is_err());
        assert!(validate_theme_id(&"x".repeat(65)).is_err());
    }

    #[test]
    fn test_validate_theme_name() {
        assert!(validate_theme_name("Neumorphic").is_ok());
        assert!(matches!(
            validate_theme_name("  "),
            Err(ValidationError::Required { .. })
        ));
        assert!(matches!(
            validate_theme_name(&"n".repeat(101)),
            Err(ValidationError::TooLong { max: 100, .. })
        ));
    }

    #[test]
    fn test_builtin_themes_are_valid() {
        for theme in builtin_themes() {
            validate_theme(&theme).unwrap();
        }
        validate_theme_config(&builtin_config()).unwrap();
    }

    #[test]
    fn test_missing_variable_is_rejected() {
        let mut theme = builtin_themes().remove(0);
        theme.css_variables.remove("shadow");

        let err = validate_theme(&theme).unwrap_err();
        assert!(matches!(
            err,
            ValidationError::MissingVariable { ref variable, .. } if variable == "shadow"
        ));
    }

    #[test]
    fn test_blank_variable_is_rejected() {
        let mut theme = builtin_themes().remove(0);
        theme
            .css_variables
            .insert("text-color".to_string(), "  ".to_string());
        assert!(validate_theme(&theme).is_err());
    }

    #[test]
    fn test_prefixed_variable_name_is_rejected() {
        let mut theme = builtin_themes().remove(0);
        theme
            .css_variables
            .insert("--accent".to_string(), "#fff".to_string());
        assert!(matches!(
            validate_theme(&theme),
            Err(ValidationError::InvalidFormat { .. })
        ));
    }

    #[test]
    fn test_super_admin_only_invariant() {
        let mut theme = builtin_themes()
            .into_iter()
            .find(|t| t.id == "glow")
            .unwrap();
        assert!(validate_theme(&theme).is_ok());

        theme.allowed_roles.insert(Role::Admin);
        assert!(matches!(
            validate_theme(&theme),
            Err(ValidationError::SuperAdminRoles { .. })
        ));

        theme.allowed_roles = BTreeSet::new();
        assert!(validate_theme(&theme).is_err());
    }

    #[test]
    fn test_duplicate_ids_are_rejected() {
        let mut config = builtin_config();
        let copy = config.themes[1].clone();
        config.themes.push(copy);

        assert!(matches!(
            validate_theme_config(&config),
            Err(ValidationError::Duplicate { ref value, .. }) if value == "neumorphic"
        ));
    }

    #[test]
    fn test_unknown_default_theme_is_rejected() {
        let mut config = builtin_config();
        config.default_theme = "vanished".to_string();

        assert!(matches!(
            validate_theme_config(&config),
            Err(ValidationError::UnknownDefaultTheme(_))
        ));
    }

    #[test]
    fn test_validate_new_theme() {
        let base = builtin_themes().remove(0);
        let mut new_theme = NewTheme {
            name: "Ocean".to_string(),
            description: "Blue".to_string(),
            is_premium: false,
            super_admin_only: false,
            allowed_roles: BTreeSet::from([Role::User]),
            css_variables: base.css_variables.clone(),
        };
        assert!(validate_new_theme(&new_theme).is_ok());

        new_theme.super_admin_only = true;
        assert!(validate_new_theme(&new_theme).is_err());

        new_theme.super_admin_only = false;
        new_theme.css_variables.clear();
        assert!(validate_new_theme(&new_theme).is_err());
    }
}

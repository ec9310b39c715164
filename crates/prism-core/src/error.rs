//! # Error Types
//!
//! Domain-specific error types for prism-core.
//!
//! ## Error Hierarchy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Error Types                                     │
//! │                                                                         │
//! │  prism-core errors (this file)                                         │
//! │  ├── CoreError        - Catalog and entitlement failures               │
//! │  └── ValidationError  - Malformed theme definitions                    │
//! │                                                                         │
//! │  prism-store errors (separate crate)                                   │
//! │  └── StoreError       - Database operation failures                    │
//! │                                                                         │
//! │  prism-session errors                                                  │
//! │  ├── GatewayError     - Transport failures of the config store         │
//! │  └── SessionError     - What the host UI sees                          │
//! │                                                                         │
//! │  Flow: ValidationError → CoreError → SessionError → Host UI            │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use thiserror::Error;

use crate::entitlement::Denial;

// =============================================================================
// Core Error
// =============================================================================

/// Core domain errors.
#[derive(Debug, Error)]
pub enum CoreError {
    /// No theme with this id exists in the catalog.
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),

    /// The entitlement resolver refused access.
    ///
    /// ## When This Occurs
    /// - Role is not in the theme's `allowed_roles`
    /// - Theme is super-admin-only and the role is not superadmin
    /// - Theme is premium, monetization is on and the user is not premium
    #[error("Access to theme {theme_id} denied: {reason}")]
    AccessDenied { theme_id: String, reason: Denial },

    /// A theme with this id is already registered.
    #[error("Theme '{0}' already exists")]
    DuplicateTheme(String),

    /// Validation error (wraps ValidationError).
    #[error("Validation error: {0}")]
    Validation(#[from] ValidationError),
}

// =============================================================================
// Validation Error
// =============================================================================

/// Theme definition validation errors.
///
/// Raised when a catalog is loaded or a custom theme is created, so that a
/// malformed theme never reaches the style sink.
#[derive(Debug, Error)]
pub enum ValidationError {
    /// A required field is missing or empty.
    #[error("{field} is required")]
    Required { field: String },

    /// Field value is too long.
    #[error("{field} must be at most {max} characters")]
    TooLong { field: String, max: usize },

    /// Invalid format (e.g. whitespace in a theme id).
    #[error("{field} has invalid format: {reason}")]
    InvalidFormat { field: String, reason: String },

    /// A theme does not define one of the required style variables.
    #[error("Theme {theme_id} is missing css variable '{variable}'")]
    MissingVariable { theme_id: String, variable: String },

    /// A super-admin-only theme lists roles other than superadmin.
    #[error("Theme {theme_id} is super-admin-only but allows other roles")]
    SuperAdminRoles { theme_id: String },

    /// Duplicate value (e.g. two themes with the same id).
    #[error("{field} '{value}' already exists")]
    Duplicate { field: String, value: String },

    /// The configured default theme is not part of the catalog.
    #[error("Default theme '{0}' is not in the catalog")]
    UnknownDefaultTheme(String),
}

// =============================================================================
// Result Type Alias
// =============================================================================

/// Convenience type alias for Results with CoreError.
pub type CoreResult<T> = Result<T, CoreError>;

// =============================================================================
// Unit Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = CoreError::AccessDenied {
            theme_id: "glow".to_string(),
            reason: Denial::InsufficientRole,
        };
        assert_eq!(
            err.to_string(),
            "Access to theme glow denied: Insufficient permissions for this theme"
        );

        let err = CoreError::ThemeNotFound("nope".to_string());
        assert_eq!(err.to_string(), "Theme not found: nope");
    }

    #[test]
    fn test_validation_error_messages() {
        let err = ValidationError::MissingVariable {
            theme_id: "retro".to_string(),
            variable: "shadow".to_string(),
        };
        assert_eq!(
            err.to_string(),
            "Theme retro is missing css variable 'shadow'"
        );

        let err = ValidationError::UnknownDefaultTheme("gone".to_string());
        assert_eq!(err.to_string(), "Default theme 'gone' is not in the catalog");
    }

    #[test]
    fn test_validation_converts_to_core_error() {
        let validation_err = ValidationError::Required {
            field: "name".to_string(),
        };
        let core_err: CoreError = validation_err.into();
        assert!(matches!(core_err, CoreError::Validation(_)));
    }
}

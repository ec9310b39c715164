//! # Session Error Types
//!
//! Errors a theme session reports to the host UI.
//!
//! ## Error Flow
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                    Error Flow in Prism                                  │
//! │                                                                         │
//! │  sqlx::Error ──► StoreError ──► GatewayError ──┐                       │
//! │                                                 ▼                       │
//! │  ValidationError ──► CoreError ──────────► SessionError ──► ErrorReport│
//! │                                                 │            (code +    │
//! │  Denial (entitlement) ─────────────────────────┘             message)  │
//! │                                                                         │
//! │  Host UI:                                                               │
//! │    switch (report.code) {                                               │
//! │      case 'PREMIUM_REQUIRED':  showUpsell(); break;                    │
//! │      case 'INSUFFICIENT_ROLE': showLocked(); break;                    │
//! │      default:                  showError(report.message);              │
//! │    }                                                                    │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```
//!
//! Everything except `Initialization` is recoverable: the session stays
//! `Ready` and the caller may retry or pick another theme.

use prism_core::{CoreError, Denial, ValidationError};
use prism_store::StoreError;
use serde::Serialize;
use thiserror::Error;
use ts_rs::TS;

// =============================================================================
// Gateway Errors
// =============================================================================

/// Transport-level failure of a config store.
#[derive(Debug, Error)]
pub enum GatewayError {
    /// The durable store failed.
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// The configured current user does not exist.
    #[error("Current user not found: {0}")]
    UserNotFound(String),

    /// The store cannot be reached.
    #[error("Config store unavailable: {0}")]
    Unavailable(String),
}

/// Result type for gateway operations.
pub type GatewayResult<T> = Result<T, GatewayError>;

// =============================================================================
// Configuration Errors
// =============================================================================

/// Failure to load or save a [`SessionConfig`](crate::SessionConfig).
#[derive(Debug, Error)]
pub enum ConfigError {
    /// An explicitly requested config file does not exist.
    #[error("Config file not found: {}", .0.display())]
    NotFound(std::path::PathBuf),

    /// Reading or writing the file failed.
    #[error("Config I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// The file is not valid TOML for this schema.
    #[error("Failed to parse config: {0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be rendered as TOML.
    #[error("Failed to serialize config: {0}")]
    Serialize(#[from] toml::ser::Error),

    /// A value is out of range or missing.
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}

/// Result type for configuration operations.
pub type ConfigResult<T> = Result<T, ConfigError>;

// =============================================================================
// Session Errors
// =============================================================================

/// Errors returned by [`ThemeSession`](crate::ThemeSession) operations.
#[derive(Debug, Error)]
pub enum SessionError {
    /// Loading the user or catalog failed. The session is `Errored`.
    #[error("Initialization failed: {0}")]
    Initialization(String),

    /// The requested theme id is not in the catalog.
    #[error("Theme not found: {0}")]
    ThemeNotFound(String),

    /// The user may not select this theme.
    #[error("Access to theme {theme_id} denied: {reason}")]
    AccessDenied { theme_id: String, reason: Denial },

    /// The user's role does not permit this action.
    #[error("Forbidden: {0}")]
    Forbidden(String),

    /// The gateway failed to persist a change; nothing was applied.
    #[error("Failed to persist change: {0}")]
    Persistence(#[from] GatewayError),

    /// A mutating operation was called before the session became ready.
    #[error("Theme session is not ready")]
    NotReady,

    /// A theme payload failed validation.
    #[error("Invalid theme: {0}")]
    InvalidTheme(#[from] ValidationError),
}

impl SessionError {
    /// Creates an initialization error.
    pub fn initialization(message: impl std::fmt::Display) -> Self {
        SessionError::Initialization(message.to_string())
    }

    /// Creates a forbidden error.
    pub fn forbidden(message: impl Into<String>) -> Self {
        SessionError::Forbidden(message.into())
    }

    /// Returns the machine-readable code for this error.
    pub fn code(&self) -> ErrorCode {
        match self {
            SessionError::Initialization(_) => ErrorCode::InitializationFailed,
            SessionError::ThemeNotFound(_) => ErrorCode::ThemeNotFound,
            SessionError::AccessDenied {
                reason: Denial::PremiumRequired,
                ..
            } => ErrorCode::PremiumRequired,
            SessionError::AccessDenied {
                reason: Denial::InsufficientRole,
                ..
            } => ErrorCode::InsufficientRole,
            SessionError::Forbidden(_) => ErrorCode::Forbidden,
            SessionError::Persistence(_) => ErrorCode::PersistenceFailed,
            SessionError::NotReady => ErrorCode::NotReady,
            SessionError::InvalidTheme(_) => ErrorCode::ValidationError,
        }
    }

    /// Returns true if the session remains usable after this error.
    pub fn is_recoverable(&self) -> bool {
        !matches!(self, SessionError::Initialization(_))
    }
}

impl From<CoreError> for SessionError {
    fn from(err: CoreError) -> Self {
        match err {
            CoreError::ThemeNotFound(id) => SessionError::ThemeNotFound(id),
            CoreError::AccessDenied { theme_id, reason } => {
                SessionError::AccessDenied { theme_id, reason }
            }
            CoreError::Validation(e) => SessionError::InvalidTheme(e),
            CoreError::DuplicateTheme(id) => {
                SessionError::InvalidTheme(ValidationError::Duplicate {
                    field: "id".to_string(),
                    value: id,
                })
            }
        }
    }
}

/// Result type for session operations.
pub type SessionResult<T> = Result<T, SessionError>;

// =============================================================================
// Host-facing Error Report
// =============================================================================

/// Error codes for the host UI.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    /// Session could not load its user or catalog
    InitializationFailed,

    /// Unknown theme id
    ThemeNotFound,

    /// Premium theme, monetization on, user not premium
    PremiumRequired,

    /// Role not allowed for this theme
    InsufficientRole,

    /// Action reserved for a higher role
    Forbidden,

    /// Gateway write failed
    PersistenceFailed,

    /// Called before initialize() finished
    NotReady,

    /// Malformed theme payload
    ValidationError,
}

/// Serializable error the host UI receives.
///
/// ```json
/// { "code": "PREMIUM_REQUIRED", "message": "Access to theme glow denied: Premium theme requires subscription" }
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, TS)]
#[ts(export)]
#[serde(rename_all = "camelCase")]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&SessionError> for ErrorReport {
    fn from(err: &SessionError) -> Self {
        ErrorReport {
            code: err.code(),
            message: err.to_string(),
        }
    }
}

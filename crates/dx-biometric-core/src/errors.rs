//! Error vocabulary for DX biometric authentication
//!
//! `BiometricErrorKind` is the only error type that crosses into caller-visible
//! results. It carries no localized text: callers look up their own messages
//! through [`BiometricErrorKind::identifier`].

use serde::{Deserialize, Serialize};

/// Semantic failure categories reported to the calling application
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, thiserror::Error)]
pub enum BiometricErrorKind {
    /// Biometric authentication is not available on this device
    #[error("Biometric authentication is not available")]
    NotAvailable,

    /// No biometric data (or no device passcode) is enrolled
    #[error("No biometric identity is enrolled")]
    NotEnrolled,

    /// Locked out after too many failed attempts
    #[error("Biometric authentication is locked out")]
    Lockout,

    /// Cancelled by the user, the application or the system
    #[error("Biometric authentication was cancelled")]
    Cancelled,

    /// User chose the fallback button
    #[error("User chose the fallback method")]
    Fallback,

    /// Presented credential did not match
    #[error("Biometric authentication failed")]
    AuthenticationFailed,

    /// Platform-level failure outside the biometric vocabulary
    #[error("System error: {0}")]
    SystemError(String),

    /// Missing or unrecognized platform error detail
    #[error("Unknown biometric error")]
    Unknown,
}

impl BiometricErrorKind {
    /// Every identifier, in declaration order
    pub const ALL_IDENTIFIERS: [&'static str; 8] = [
        "biometric_error_not_available",
        "biometric_error_not_enrolled",
        "biometric_error_lockout",
        "biometric_error_cancelled",
        "biometric_error_fallback",
        "biometric_error_authentication_failed",
        "biometric_error_system",
        "biometric_error_unknown",
    ];

    /// Stable identifier for caller-side localization lookup.
    ///
    /// `SystemError` has a single identifier regardless of its message.
    pub fn identifier(&self) -> &'static str {
        match self {
            BiometricErrorKind::NotAvailable => "biometric_error_not_available",
            BiometricErrorKind::NotEnrolled => "biometric_error_not_enrolled",
            BiometricErrorKind::Lockout => "biometric_error_lockout",
            BiometricErrorKind::Cancelled => "biometric_error_cancelled",
            BiometricErrorKind::Fallback => "biometric_error_fallback",
            BiometricErrorKind::AuthenticationFailed => "biometric_error_authentication_failed",
            BiometricErrorKind::SystemError(_) => "biometric_error_system",
            BiometricErrorKind::Unknown => "biometric_error_unknown",
        }
    }

    /// Create a system error
    pub fn system(message: impl Into<String>) -> Self {
        Self::SystemError(message.into())
    }
}

/// Configuration and shared-instance errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// Configuration file could not be read
    #[error("Failed to read config file {path}: {source}")]
    Io {
        /// Path that was being read
        path: String,
        /// Underlying I/O error
        #[source]
        source: std::io::Error,
    },

    /// Configuration text is not valid TOML for this schema
    #[error("Invalid config: {0}")]
    Parse(#[from] toml::de::Error),

    /// A field holds an unusable value
    #[error("Invalid value for `{field}`: {reason}")]
    InvalidValue {
        /// Offending field name
        field: &'static str,
        /// What is wrong with it
        reason: String,
    },

    /// The process-wide instance was already built or installed
    #[error("Shared biometric instance is already initialized")]
    SharedAlreadyInitialized,
}

impl ConfigError {
    /// Create an invalid value error
    pub fn invalid_value(field: &'static str, reason: impl Into<String>) -> Self {
        Self::InvalidValue {
            field,
            reason: reason.into(),
        }
    }
}

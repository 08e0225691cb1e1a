//! Biometric value types
//!
//! Both types are produced fresh on every query or attempt and carry no
//! identity beyond their tag.

use crate::errors::BiometricErrorKind;
use serde::{Deserialize, Serialize};

/// Biometric sensing technology available for device-owner verification
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum BiometricModality {
    /// Face recognition (including newer face-like sensors)
    Face,
    /// Fingerprint recognition
    Fingerprint,
    /// No usable biometric modality
    None,
}

impl BiometricModality {
    /// Human-readable name for the modality
    pub fn display_name(&self) -> &'static str {
        match self {
            BiometricModality::Face => "Face ID",
            BiometricModality::Fingerprint => "Touch ID",
            BiometricModality::None => "None",
        }
    }

    /// Whether a sensor is usable for authentication
    pub fn is_available(&self) -> bool {
        !matches!(self, BiometricModality::None)
    }
}

/// Result of one authentication attempt
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub enum AuthOutcome {
    /// The device owner was verified
    Success,
    /// Verification did not succeed
    Failure(BiometricErrorKind),
}

impl AuthOutcome {
    /// Check whether the attempt succeeded
    pub fn is_success(&self) -> bool {
        matches!(self, AuthOutcome::Success)
    }

    /// The failure kind, if any
    pub fn error(&self) -> Option<&BiometricErrorKind> {
        match self {
            AuthOutcome::Success => None,
            AuthOutcome::Failure(kind) => Some(kind),
        }
    }

    /// Convert into a `Result` for `?`-style callers
    pub fn into_result(self) -> Result<(), BiometricErrorKind> {
        match self {
            AuthOutcome::Success => Ok(()),
            AuthOutcome::Failure(kind) => Err(kind),
        }
    }
}

impl From<Result<(), BiometricErrorKind>> for AuthOutcome {
    fn from(result: Result<(), BiometricErrorKind>) -> Self {
        match result {
            Ok(()) => AuthOutcome::Success,
            Err(kind) => AuthOutcome::Failure(kind),
        }
    }
}

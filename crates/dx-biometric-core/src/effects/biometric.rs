//! Biometric Authentication Effects Trait Definition
//!
//! This module defines the app-facing interface for biometric device-owner
//! verification (Touch ID, Face ID, and similar host services).
//!
//! # Effect Classification
//!
//! - **Category**: Application Effect
//! - **Implementation**: `dx-biometric` (`BiometricAuth`)
//! - **Usage**: application code that gates UI on biometric verification
//!
//! Applications should depend on this trait rather than on the concrete
//! façade so they can substitute a fake in their own tests.
//!
//! ## Contract
//!
//! - Capability queries are synchronous, side-effect free and never cached.
//! - `authenticate` issues at most one host challenge and resolves exactly once.
//! - Failures are always one of the closed [`BiometricErrorKind`] values.
//!
//! [`BiometricErrorKind`]: crate::BiometricErrorKind

use crate::types::{AuthOutcome, BiometricModality};
use async_trait::async_trait;

/// App-facing biometric authentication interface
///
/// # Stability: EXPERIMENTAL
/// This API is under development and may change in future versions.
#[async_trait]
pub trait BiometricEffects: Send + Sync {
    /// Which modality the device can currently use.
    ///
    /// Returns [`BiometricModality::None`] whenever evaluation is impossible,
    /// even if a sensor is physically present.
    fn available_modality(&self) -> BiometricModality;

    /// Whether biometric verification can be attempted right now
    fn is_available(&self) -> bool;

    /// Perform one biometric verification.
    ///
    /// # Parameters
    /// - `reason`: justification shown in the host prompt; blank values are
    ///   replaced by a configured default
    /// - `fallback_title`: title for the host's fallback button
    async fn authenticate(&self, reason: &str, fallback_title: Option<&str>) -> AuthOutcome;
}

//! Capability detection
//!
//! Every query probes a fresh platform context; results are never cached
//! because enrollment state can change between calls.

use dx_biometric_core::{BiometricModality, PlatformBiometry, PlatformContextFactory, PlatformError};
use std::sync::Arc;

/// Classifies the device's biometric modality and availability
#[derive(Clone)]
pub struct CapabilityDetector {
    factory: Arc<dyn PlatformContextFactory>,
}

impl CapabilityDetector {
    /// Create a detector probing contexts from `factory`
    pub fn new(factory: Arc<dyn PlatformContextFactory>) -> Self {
        Self { factory }
    }

    /// Modality usable for authentication right now.
    ///
    /// A failed pre-flight check yields [`BiometricModality::None`] whatever
    /// sensor the host reports.
    pub fn detect_modality(&self) -> BiometricModality {
        let context = self.factory.create();

        if let Err(error) = context.can_evaluate() {
            tracing::debug!(%error, "Biometric evaluation unavailable");
            return BiometricModality::None;
        }

        let biometry = context.biometry();
        let modality = modality_for(biometry);
        tracing::debug!(?biometry, ?modality, "Detected biometric modality");
        modality
    }

    /// Whether biometric evaluation can be attempted
    pub fn is_available(&self) -> bool {
        self.availability().is_ok()
    }

    /// Pre-flight result including the host diagnostic on failure
    pub fn availability(&self) -> Result<(), PlatformError> {
        let result = self.factory.create().can_evaluate();
        if let Err(error) = &result {
            tracing::debug!(%error, "Biometric evaluation unavailable");
        }
        result
    }
}

impl std::fmt::Debug for CapabilityDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CapabilityDetector").finish_non_exhaustive()
    }
}

/// Map the host modality code to the app-facing modality
pub fn modality_for(biometry: PlatformBiometry) -> BiometricModality {
    match biometry {
        PlatformBiometry::FaceId => BiometricModality::Face,
        PlatformBiometry::TouchId => BiometricModality::Fingerprint,
        // Optic sensors present as face authentication
        PlatformBiometry::OpticId => BiometricModality::Face,
        PlatformBiometry::None | PlatformBiometry::Unrecognized(_) => BiometricModality::None,
    }
}

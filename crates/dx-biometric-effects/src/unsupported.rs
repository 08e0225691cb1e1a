//! Platform context for hosts without a biometric service
//!
//! This handler implements the Null Object Pattern: it reports that biometric
//! verification is unavailable and answers every challenge with
//! `BiometryNotAvailable`. It lets code run on servers, CI machines and
//! desktops without sensors, with no compile-time feature flags.

use dx_biometric_core::{
    EvaluationReply, PlatformBiometry, PlatformContext, PlatformContextFactory, PlatformError,
    PlatformErrorCode,
};

/// Platform context for hosts without biometric hardware.
///
/// # Usage
///
/// ```rust
/// use dx_biometric_core::PlatformContext;
/// use dx_biometric_effects::UnsupportedPlatformContext;
///
/// let context = UnsupportedPlatformContext::new();
/// assert!(context.can_evaluate().is_err());
/// ```
#[derive(Debug, Default)]
pub struct UnsupportedPlatformContext {
    fallback_label: Option<String>,
}

impl UnsupportedPlatformContext {
    /// Create a new unsupported-platform context
    pub fn new() -> Self {
        Self::default()
    }
}

impl PlatformContext for UnsupportedPlatformContext {
    fn can_evaluate(&self) -> Result<(), PlatformError> {
        Err(PlatformErrorCode::BiometryNotAvailable.into())
    }

    fn biometry(&self) -> PlatformBiometry {
        PlatformBiometry::None
    }

    fn evaluate(self: Box<Self>, _reason: &str, reply: EvaluationReply) {
        tracing::debug!("Biometric evaluation requested on a host without biometric support");
        reply.reply(false, Some(PlatformErrorCode::BiometryNotAvailable.into()));
    }

    fn fallback_label(&self) -> Option<&str> {
        self.fallback_label.as_deref()
    }

    fn set_fallback_label(&mut self, label: Option<String>) {
        self.fallback_label = label;
    }
}

/// Factory producing [`UnsupportedPlatformContext`] sessions
pub fn unsupported_factory() -> impl PlatformContextFactory {
    || Box::new(UnsupportedPlatformContext::new()) as Box<dyn PlatformContext>
}

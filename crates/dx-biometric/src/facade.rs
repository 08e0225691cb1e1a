//! Public entry point
//!
//! [`BiometricAuth`] composes capability detection and authentication, adds
//! a pre-flight availability gate, and substitutes a default prompt reason
//! for blank ones.
//!
//! Availability is probed again on every call. Enrollment can still change
//! between that probe and the host challenge; the host then reports the
//! failure itself.

use crate::authenticator::Authenticator;
use crate::capability::CapabilityDetector;
use crate::completion::CompletionContext;
use async_trait::async_trait;
use dx_biometric_core::{
    AuthOutcome, BiometricConfig, BiometricEffects, BiometricErrorKind, BiometricModality,
    ConfigError, PlatformContextFactory,
};
use dx_biometric_effects::unsupported_factory;
use once_cell::sync::OnceCell;
use std::sync::Arc;

static SHARED: OnceCell<BiometricAuth> = OnceCell::new();

/// Biometric authentication façade
#[derive(Debug, Clone)]
pub struct BiometricAuth {
    detector: CapabilityDetector,
    authenticator: Authenticator,
    config: BiometricConfig,
}

impl BiometricAuth {
    /// Create a façade over `factory` with the default configuration
    pub fn new(factory: impl PlatformContextFactory + 'static) -> Self {
        Self::from_parts(Arc::new(factory), BiometricConfig::default())
    }

    /// Create a façade over `factory` with a validated configuration
    pub fn with_config(
        factory: impl PlatformContextFactory + 'static,
        config: BiometricConfig,
    ) -> Result<Self, ConfigError> {
        config.validate()?;
        Ok(Self::from_parts(Arc::new(factory), config))
    }

    fn from_parts(factory: Arc<dyn PlatformContextFactory>, config: BiometricConfig) -> Self {
        Self {
            detector: CapabilityDetector::new(factory.clone()),
            authenticator: Authenticator::new(factory),
            config,
        }
    }

    /// Deliver callback-style outcomes on `completion` instead of the
    /// process-wide delivery thread
    pub fn with_completion_context(mut self, completion: impl CompletionContext + 'static) -> Self {
        self.authenticator = self
            .authenticator
            .with_completion_context(Arc::new(completion));
        self
    }

    /// Process-wide instance.
    ///
    /// Built on first use from [`install_shared`](Self::install_shared) or,
    /// failing that, with the host binding and environment configuration.
    pub fn shared() -> &'static BiometricAuth {
        SHARED.get_or_init(|| {
            let mut config = BiometricConfig::default();
            if let Err(error) = config.merge_with_env() {
                tracing::warn!(%error, "Ignoring invalid biometric environment config");
                config = BiometricConfig::default();
            }
            Self::from_parts(Arc::new(unsupported_factory()), config)
        })
    }

    /// Install the process-wide instance before its first use
    pub fn install_shared(auth: BiometricAuth) -> Result<(), ConfigError> {
        SHARED
            .set(auth)
            .map_err(|_| ConfigError::SharedAlreadyInitialized)
    }

    /// Active configuration
    pub fn config(&self) -> &BiometricConfig {
        &self.config
    }

    /// Modality usable for authentication right now
    pub fn available_modality(&self) -> BiometricModality {
        self.detector.detect_modality()
    }

    /// Whether biometric evaluation can be attempted
    pub fn is_available(&self) -> bool {
        self.detector.is_available()
    }

    /// Authenticate and wait for the outcome
    pub async fn authenticate(&self, reason: &str, fallback_title: Option<&str>) -> AuthOutcome {
        if !self.passes_preflight() {
            return AuthOutcome::Failure(BiometricErrorKind::NotAvailable);
        }

        self.authenticator
            .authenticate(self.sanitize_reason(reason), self.fallback_title(fallback_title))
            .await
    }

    /// Authenticate with the configured default reason
    pub async fn authenticate_default(&self, fallback_title: Option<&str>) -> AuthOutcome {
        self.authenticate("", fallback_title).await
    }

    /// Authenticate and hand the outcome to `on_complete` on the completion
    /// context, exactly once
    pub fn authenticate_with<F>(&self, reason: &str, fallback_title: Option<&str>, on_complete: F)
    where
        F: FnOnce(AuthOutcome) + Send + 'static,
    {
        if !self.passes_preflight() {
            let outcome = AuthOutcome::Failure(BiometricErrorKind::NotAvailable);
            self.authenticator
                .completion_context()
                .dispatch(Box::new(move || on_complete(outcome)));
            return;
        }

        self.authenticator.authenticate_with(
            self.sanitize_reason(reason),
            self.fallback_title(fallback_title),
            on_complete,
        );
    }

    fn passes_preflight(&self) -> bool {
        let modality = self.available_modality();
        if !modality.is_available() {
            tracing::info!("Biometrics unavailable; skipping platform challenge");
        }
        modality.is_available()
    }

    fn sanitize_reason<'a>(&'a self, reason: &'a str) -> &'a str {
        sanitize_reason(reason, &self.config.default_reason)
    }

    fn fallback_title<'a>(&'a self, fallback_title: Option<&'a str>) -> Option<&'a str> {
        fallback_title.or(self.config.default_fallback_title.as_deref())
    }
}

/// Replace a blank reason with `default`
pub fn sanitize_reason<'a>(reason: &'a str, default: &'a str) -> &'a str {
    if reason.trim().is_empty() {
        default
    } else {
        reason
    }
}

#[async_trait]
impl BiometricEffects for BiometricAuth {
    fn available_modality(&self) -> BiometricModality {
        BiometricAuth::available_modality(self)
    }

    fn is_available(&self) -> bool {
        BiometricAuth::is_available(self)
    }

    async fn authenticate(&self, reason: &str, fallback_title: Option<&str>) -> AuthOutcome {
        BiometricAuth::authenticate(self, reason, fallback_title).await
    }
}

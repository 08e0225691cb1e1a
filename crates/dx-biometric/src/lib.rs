//! DX Biometric
//!
//! Simplified façade over the host's biometric device-owner verification
//! (Face ID, Touch ID and similar). It detects whether biometrics are usable,
//! drives a single host challenge, and reports a normalized [`AuthOutcome`]
//! with a closed set of [`BiometricErrorKind`] values.
//!
//! ```rust,ignore
//! use dx_biometric::BiometricAuth;
//!
//! let auth = BiometricAuth::shared();
//! match auth.authenticate("Unlock your vault", None).await {
//!     AuthOutcome::Success => unlock(),
//!     AuthOutcome::Failure(kind) => show_message(kind.identifier()),
//! }
//! ```
//!
//! Components, leaf first:
//! - [`CapabilityDetector`]: modality and availability probing
//! - [`Authenticator`]: one challenge, single delivery, error mapping
//! - [`BiometricAuth`]: pre-flight gate, reason sanitization, shared instance

#![forbid(unsafe_code)]

pub mod authenticator;
pub mod capability;
pub mod completion;
pub mod facade;
pub mod mapping;

pub use authenticator::Authenticator;
pub use capability::CapabilityDetector;
pub use completion::{
    default_context, default_delivery_thread, main_queue, CompletionContext, CompletionJob,
    DeliveryThread, InlineContext, MainLoop, MainQueue,
};
pub use facade::BiometricAuth;
pub use mapping::map_platform_error;

// Re-export the vocabulary so callers need a single dependency
pub use dx_biometric_core::{
    AuthOutcome, BiometricConfig, BiometricEffects, BiometricErrorKind, BiometricModality,
    ConfigError, PlatformContext, PlatformContextFactory,
};

//! Layer 1: Effect Trait Definitions
//!
//! Pure trait definitions for the side effects DX biometric authentication
//! performs. This module defines **what** can be asked of the host; handlers
//! in `dx-biometric-effects` (production) and `dx-biometric-testkit`
//! (testing) define **how**.
//!
//! - **Platform**: one session against the host biometric service
//! - **Biometric**: the app-facing authentication surface

pub mod biometric;
pub mod platform;

pub use biometric::BiometricEffects;
pub use platform::{
    EvaluationReply, PlatformBiometry, PlatformContext, PlatformContextFactory, PlatformError,
    PlatformErrorCode,
};

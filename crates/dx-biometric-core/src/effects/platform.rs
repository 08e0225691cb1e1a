//! Platform Biometric Service Interface
//!
//! This module defines the seam between DX biometric authentication and the
//! host operating system's biometric service (LocalAuthentication on Apple
//! platforms, BiometricPrompt on Android, Windows Hello, ...).
//!
//! # Effect Classification
//!
//! - **Category**: Infrastructure Effect
//! - **Implementation**: `dx-biometric-effects` (Layer 3), `dx-biometric-testkit` (Layer 8)
//! - **Usage**: capability probing, modality reporting and one-shot challenges
//!
//! A [`PlatformContext`] represents exactly one authentication session. The
//! host renders the prompt and owns enrollment, template storage and matching;
//! this interface only hands over a reason string and receives a final reply.

use std::fmt;
use std::sync::Arc;

/// Modality code reported by the host biometric service
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformBiometry {
    /// No biometric sensor reported
    None,
    /// Fingerprint sensor
    TouchId,
    /// Face sensor
    FaceId,
    /// Iris/optic sensor (face-like for presentation purposes)
    OpticId,
    /// A code this crate does not know about yet
    Unrecognized(i64),
}

/// Error codes from the host biometric service's own error domain
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PlatformErrorCode {
    /// Valid credentials were not presented
    AuthenticationFailed,
    /// User tapped cancel
    UserCancel,
    /// User tapped the fallback button
    UserFallback,
    /// System cancelled (e.g. another app came to the foreground)
    SystemCancel,
    /// No device passcode is set
    PasscodeNotSet,
    /// Biometry hardware is missing or disabled
    BiometryNotAvailable,
    /// No biometric identity is enrolled
    BiometryNotEnrolled,
    /// Too many failed attempts
    BiometryLockout,
    /// The application invalidated the session
    AppCancel,
    /// The session was already invalidated
    InvalidContext,
    /// Any other code within the service's domain
    Unrecognized(i64),
}

impl PlatformErrorCode {
    /// Decode a raw numeric code as reported by the host service
    pub fn from_raw(raw: i64) -> Self {
        match raw {
            -1 => Self::AuthenticationFailed,
            -2 => Self::UserCancel,
            -3 => Self::UserFallback,
            -4 => Self::SystemCancel,
            -5 => Self::PasscodeNotSet,
            -6 => Self::BiometryNotAvailable,
            -7 => Self::BiometryNotEnrolled,
            -8 => Self::BiometryLockout,
            -9 => Self::AppCancel,
            -10 => Self::InvalidContext,
            other => Self::Unrecognized(other),
        }
    }

    /// Raw numeric code as used by the host service
    pub fn raw(&self) -> i64 {
        match self {
            Self::AuthenticationFailed => -1,
            Self::UserCancel => -2,
            Self::UserFallback => -3,
            Self::SystemCancel => -4,
            Self::PasscodeNotSet => -5,
            Self::BiometryNotAvailable => -6,
            Self::BiometryNotEnrolled => -7,
            Self::BiometryLockout => -8,
            Self::AppCancel => -9,
            Self::InvalidContext => -10,
            Self::Unrecognized(raw) => *raw,
        }
    }
}

/// Error reported by the host alongside a failed probe or challenge
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum PlatformError {
    /// Error from the biometric service's own domain
    #[error("biometric service error (code {})", .0.raw())]
    Service(PlatformErrorCode),

    /// Error from some other platform domain
    #[error("{domain}: {message}")]
    Foreign {
        /// Name of the originating error domain
        domain: String,
        /// Platform-supplied human-readable description
        message: String,
    },
}

impl PlatformError {
    /// Create a foreign-domain error
    pub fn foreign(domain: impl Into<String>, message: impl Into<String>) -> Self {
        Self::Foreign {
            domain: domain.into(),
            message: message.into(),
        }
    }
}

impl From<PlatformErrorCode> for PlatformError {
    fn from(code: PlatformErrorCode) -> Self {
        Self::Service(code)
    }
}

/// Reply channel handed to [`PlatformContext::evaluate`].
///
/// The host may invoke it from any thread. Nothing in the type prevents a
/// second invocation; consumers must enforce single delivery themselves.
#[derive(Clone)]
pub struct EvaluationReply {
    inner: Arc<dyn Fn(bool, Option<PlatformError>) + Send + Sync>,
}

impl EvaluationReply {
    /// Wrap a reply handler
    pub fn new<F>(handler: F) -> Self
    where
        F: Fn(bool, Option<PlatformError>) + Send + Sync + 'static,
    {
        Self {
            inner: Arc::new(handler),
        }
    }

    /// Report the final result of the challenge
    pub fn reply(&self, success: bool, error: Option<PlatformError>) {
        (self.inner)(success, error);
    }
}

impl fmt::Debug for EvaluationReply {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("EvaluationReply").finish_non_exhaustive()
    }
}

/// One session against the host biometric service
///
/// # Implementation Notes
///
/// - Production: wraps the OS context object (e.g. `LAContext`)
/// - Testing: scripted replies with call recording
///
/// A context is created per authentication attempt and never reused.
pub trait PlatformContext: Send {
    /// Pre-flight check for biometric-only device-owner authentication.
    ///
    /// Side-effect free. `Err` carries the host's diagnostic.
    fn can_evaluate(&self) -> Result<(), PlatformError>;

    /// Modality reported by the host
    fn biometry(&self) -> PlatformBiometry;

    /// Start one host-mediated challenge.
    ///
    /// Returns immediately; `reply` fires later on a host-owned thread. The
    /// context is handed over with the challenge: implementations keep it
    /// alive for as long as they may still reply and drop it afterwards.
    /// Dropping every handle of `reply` unanswered counts as a failed
    /// challenge without error detail.
    fn evaluate(self: Box<Self>, reason: &str, reply: EvaluationReply);

    /// Title of the fallback button, if configured
    fn fallback_label(&self) -> Option<&str>;

    /// Configure the fallback button title before `evaluate`
    fn set_fallback_label(&mut self, label: Option<String>);
}

/// Produces fresh [`PlatformContext`] sessions
pub trait PlatformContextFactory: Send + Sync {
    /// Create a new, unused session
    fn create(&self) -> Box<dyn PlatformContext>;
}

impl<F> PlatformContextFactory for F
where
    F: Fn() -> Box<dyn PlatformContext> + Send + Sync,
{
    fn create(&self) -> Box<dyn PlatformContext> {
        self()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    #[test]
    fn test_known_raw_codes() {
        assert_eq!(PlatformErrorCode::from_raw(-2), PlatformErrorCode::UserCancel);
        assert_eq!(PlatformErrorCode::from_raw(-8), PlatformErrorCode::BiometryLockout);
        assert_eq!(PlatformErrorCode::from_raw(-10), PlatformErrorCode::InvalidContext);
        assert_eq!(
            PlatformErrorCode::from_raw(-1004),
            PlatformErrorCode::Unrecognized(-1004)
        );
    }

    proptest! {
        #[test]
        fn raw_code_decoding_is_lossless(raw in any::<i64>()) {
            prop_assert_eq!(PlatformErrorCode::from_raw(raw).raw(), raw);
        }
    }

    #[test]
    fn test_reply_can_be_cloned_and_invoked() {
        let calls = Arc::new(AtomicUsize::new(0));
        let counter = calls.clone();
        let reply = EvaluationReply::new(move |_, _| {
            counter.fetch_add(1, Ordering::SeqCst);
        });

        let copy = reply.clone();
        reply.reply(true, None);
        copy.reply(false, Some(PlatformErrorCode::UserCancel.into()));
        assert_eq!(calls.load(Ordering::SeqCst), 2);
    }

    #[test]
    fn test_foreign_error_display() {
        let err = PlatformError::foreign("NSCocoaErrorDomain", "disk full");
        assert_eq!(err.to_string(), "NSCocoaErrorDomain: disk full");
    }
}

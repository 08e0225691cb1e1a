//! # DX Biometric Testkit
//!
//! Deterministic test doubles for the host biometric service and shared
//! test setup.
//!
//! ```rust,ignore
//! use dx_biometric_testkit::{ScriptedPlatform, ScriptedReply};
//!
//! let platform = ScriptedPlatform::new()
//!     .with_reply(ScriptedReply::failure(PlatformErrorCode::BiometryLockout));
//! let auth = BiometricAuth::new(platform.factory());
//! // ...
//! assert_eq!(platform.evaluate_calls(), 1);
//! ```

#![allow(clippy::unwrap_used, clippy::expect_used)]

pub mod platform;

pub use platform::{EvaluationRecord, ReplyThread, ScriptedPlatform, ScriptedReply};

/// Install a test-friendly tracing subscriber.
///
/// Honors `RUST_LOG`; defaults to `warn`. Safe to call from every test.
pub fn init_test_tracing() {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("warn"));

    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_test_writer()
        .try_init();
}

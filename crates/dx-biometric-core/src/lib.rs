//! DX Biometric Core - Interfaces and Vocabulary
//!
//! This crate provides the foundational value types and effect interfaces for
//! DX biometric authentication. It contains no platform integration and no
//! orchestration logic; those live in `dx-biometric-effects` and
//! `dx-biometric` respectively.
//!
//! # Architecture Layers
//!
//! ## Value Types
//! - `BiometricModality`: which sensing technology the device offers
//! - `AuthOutcome`: the single result of one authentication attempt
//! - `BiometricErrorKind`: closed, app-facing error vocabulary with stable identifiers
//!
//! ## Effect Interfaces
//! - `PlatformContext`: one session against the host biometric service
//! - `PlatformContextFactory`: produces a fresh session per attempt
//! - `BiometricEffects`: the app-facing authentication surface
//!
//! ## Configuration
//! - `BiometricConfig`: default prompt reason and fallback title

#![forbid(unsafe_code)]

/// Value types produced by capability queries and authentication attempts
pub mod types;

/// Error vocabulary and configuration errors
pub mod errors;

/// Effect interfaces (no implementations)
pub mod effects;

/// Façade configuration
pub mod config;

pub use config::BiometricConfig;
pub use effects::{
    BiometricEffects, EvaluationReply, PlatformBiometry, PlatformContext,
    PlatformContextFactory, PlatformError, PlatformErrorCode,
};
pub use errors::{BiometricErrorKind, ConfigError};
pub use types::{AuthOutcome, BiometricModality};

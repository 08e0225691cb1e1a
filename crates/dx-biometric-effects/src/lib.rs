//! Layer 3: Platform Context Handlers
//!
//! Stateless production bindings of [`PlatformContext`] for
//! `dx-biometric`. Native bindings to a host biometric service implement the
//! same trait and are plugged in through a [`PlatformContextFactory`].
//!
//! **For testing**: use `ScriptedPlatform` from `dx-biometric-testkit` (Layer 8).
//!
//! [`PlatformContext`]: dx_biometric_core::PlatformContext
//! [`PlatformContextFactory`]: dx_biometric_core::PlatformContextFactory

#![forbid(unsafe_code)]

pub mod unsupported;

pub use unsupported::{unsupported_factory, UnsupportedPlatformContext};

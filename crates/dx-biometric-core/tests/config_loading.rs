//! Configuration loading from files and the process environment

#![allow(clippy::unwrap_used)]

use dx_biometric_core::config::{ENV_DEFAULT_REASON, ENV_FALLBACK_TITLE};
use dx_biometric_core::{BiometricConfig, ConfigError};
use serial_test::serial;
use std::io::Write;

#[test]
fn test_load_from_file() {
    let mut file = tempfile::NamedTempFile::new().unwrap();
    writeln!(file, "default_reason = \"Unlock your vault\"").unwrap();
    writeln!(file, "default_fallback_title = \"Use Passcode\"").unwrap();

    let config = BiometricConfig::load_from_file(file.path()).unwrap();
    assert_eq!(config.default_reason, "Unlock your vault");
    assert_eq!(config.default_fallback_title.as_deref(), Some("Use Passcode"));
}

#[test]
fn test_missing_file_reports_path() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("absent.toml");

    let err = BiometricConfig::load_from_file(&path).unwrap_err();
    match err {
        ConfigError::Io { path: reported, .. } => assert!(reported.ends_with("absent.toml")),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
#[serial]
fn test_merge_with_process_env() {
    std::env::set_var(ENV_DEFAULT_REASON, "Sign in to DX");
    std::env::set_var(ENV_FALLBACK_TITLE, "Enter Passcode");

    let mut config = BiometricConfig::default();
    let result = config.merge_with_env();

    std::env::remove_var(ENV_DEFAULT_REASON);
    std::env::remove_var(ENV_FALLBACK_TITLE);

    result.unwrap();
    assert_eq!(config.default_reason, "Sign in to DX");
    assert_eq!(config.default_fallback_title.as_deref(), Some("Enter Passcode"));
}

#[test]
#[serial]
fn test_blank_env_reason_rejected() {
    std::env::set_var(ENV_DEFAULT_REASON, "   ");

    let mut config = BiometricConfig::default();
    let result = config.merge_with_env();

    std::env::remove_var(ENV_DEFAULT_REASON);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue {
            field: "default_reason",
            ..
        })
    ));
}

#[cfg(unix)]
#[test]
#[serial]
fn test_unrelated_non_utf8_env_is_ignored() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    std::env::set_var("DX_BIOMETRIC_TEST_BINARY", OsStr::from_bytes(b"\xff\xfe"));
    std::env::set_var(ENV_DEFAULT_REASON, "Sign in to DX");

    let mut config = BiometricConfig::default();
    let result = config.merge_with_env();

    std::env::remove_var("DX_BIOMETRIC_TEST_BINARY");
    std::env::remove_var(ENV_DEFAULT_REASON);

    result.unwrap();
    assert_eq!(config.default_reason, "Sign in to DX");
}

#[cfg(unix)]
#[test]
#[serial]
fn test_non_utf8_override_rejected() {
    use std::ffi::OsStr;
    use std::os::unix::ffi::OsStrExt;

    std::env::set_var(ENV_FALLBACK_TITLE, OsStr::from_bytes(b"PIN\xff"));

    let mut config = BiometricConfig::default();
    let result = config.merge_with_env();

    std::env::remove_var(ENV_FALLBACK_TITLE);

    assert!(matches!(
        result,
        Err(ConfigError::InvalidValue {
            field: "default_fallback_title",
            ..
        })
    ));
    assert_eq!(config, BiometricConfig::default());
}

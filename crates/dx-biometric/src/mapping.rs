//! Translation of host errors into the app-facing vocabulary
//!
//! Every platform error lands in exactly one [`BiometricErrorKind`]; raw
//! platform errors never reach callers.

use dx_biometric_core::{BiometricErrorKind, PlatformError, PlatformErrorCode};

/// Map the error accompanying a failed challenge
pub fn map_platform_error(error: Option<&PlatformError>) -> BiometricErrorKind {
    let Some(error) = error else {
        return BiometricErrorKind::Unknown;
    };

    match error {
        PlatformError::Foreign { message, .. } => BiometricErrorKind::SystemError(message.clone()),
        PlatformError::Service(code) => map_service_code(*code),
    }
}

fn map_service_code(code: PlatformErrorCode) -> BiometricErrorKind {
    match code {
        PlatformErrorCode::UserCancel => BiometricErrorKind::Cancelled,
        PlatformErrorCode::UserFallback => BiometricErrorKind::Fallback,
        PlatformErrorCode::BiometryNotAvailable => BiometricErrorKind::NotAvailable,
        PlatformErrorCode::BiometryNotEnrolled => BiometricErrorKind::NotEnrolled,
        PlatformErrorCode::BiometryLockout => BiometricErrorKind::Lockout,
        PlatformErrorCode::AuthenticationFailed => BiometricErrorKind::AuthenticationFailed,
        PlatformErrorCode::AppCancel | PlatformErrorCode::SystemCancel => {
            BiometricErrorKind::Cancelled
        }
        PlatformErrorCode::InvalidContext => BiometricErrorKind::system("Invalid context"),
        // Biometric enrollment requires a device passcode
        PlatformErrorCode::PasscodeNotSet => BiometricErrorKind::NotEnrolled,
        PlatformErrorCode::Unrecognized(_) => BiometricErrorKind::Unknown,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn map_code(code: PlatformErrorCode) -> BiometricErrorKind {
        map_platform_error(Some(&PlatformError::Service(code)))
    }

    #[test]
    fn test_mapping_table() {
        let table = [
            (PlatformErrorCode::UserCancel, BiometricErrorKind::Cancelled),
            (PlatformErrorCode::UserFallback, BiometricErrorKind::Fallback),
            (PlatformErrorCode::BiometryNotAvailable, BiometricErrorKind::NotAvailable),
            (PlatformErrorCode::BiometryNotEnrolled, BiometricErrorKind::NotEnrolled),
            (PlatformErrorCode::BiometryLockout, BiometricErrorKind::Lockout),
            (
                PlatformErrorCode::AuthenticationFailed,
                BiometricErrorKind::AuthenticationFailed,
            ),
            (PlatformErrorCode::AppCancel, BiometricErrorKind::Cancelled),
            (PlatformErrorCode::SystemCancel, BiometricErrorKind::Cancelled),
            (
                PlatformErrorCode::InvalidContext,
                BiometricErrorKind::system("Invalid context"),
            ),
            (PlatformErrorCode::PasscodeNotSet, BiometricErrorKind::NotEnrolled),
            (PlatformErrorCode::Unrecognized(-1004), BiometricErrorKind::Unknown),
        ];

        for (code, expected) in table {
            assert_eq!(map_code(code), expected, "code {code:?}");
        }
    }

    #[test]
    fn test_raw_codes_map_through_decoding() {
        assert_eq!(map_code(PlatformErrorCode::from_raw(-8)), BiometricErrorKind::Lockout);
        assert_eq!(map_code(PlatformErrorCode::from_raw(42)), BiometricErrorKind::Unknown);
    }

    #[test]
    fn test_foreign_domain_keeps_platform_message() {
        let error = PlatformError::foreign("NSOSStatusErrorDomain", "Keychain unavailable");
        assert_eq!(
            map_platform_error(Some(&error)),
            BiometricErrorKind::system("Keychain unavailable")
        );
    }

    #[test]
    fn test_missing_error_is_unknown() {
        assert_eq!(map_platform_error(None), BiometricErrorKind::Unknown);
    }
}

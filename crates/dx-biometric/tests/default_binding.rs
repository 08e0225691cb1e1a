//! Behaviour of the default host binding on machines without biometrics

#![allow(clippy::unwrap_used)]

use dx_biometric::{
    default_delivery_thread, AuthOutcome, BiometricAuth, BiometricErrorKind, BiometricModality,
};
use dx_biometric_effects::unsupported_factory;
use std::sync::mpsc;
use std::time::Duration;

#[tokio::test]
async fn test_unsupported_host_is_never_challenged() {
    let auth = BiometricAuth::new(unsupported_factory());

    assert_eq!(auth.available_modality(), BiometricModality::None);
    assert!(!auth.is_available());
    assert_eq!(
        auth.authenticate("Login", None).await,
        AuthOutcome::Failure(BiometricErrorKind::NotAvailable)
    );
}

#[tokio::test]
async fn test_shared_instance_defaults_to_host_binding() {
    let shared = BiometricAuth::shared();

    assert_eq!(shared.available_modality(), BiometricModality::None);
    assert_eq!(
        shared.authenticate_default(None).await,
        AuthOutcome::Failure(BiometricErrorKind::NotAvailable)
    );
}

#[test]
fn test_shared_instance_delivers_on_delivery_thread() {
    let (tx, rx) = mpsc::channel();

    BiometricAuth::shared().authenticate_with("Login", None, move |outcome| {
        tx.send((outcome, std::thread::current().id())).unwrap();
    });

    let (outcome, thread) = rx.recv_timeout(Duration::from_secs(5)).unwrap();
    assert_eq!(outcome, AuthOutcome::Failure(BiometricErrorKind::NotAvailable));
    assert_eq!(thread, default_delivery_thread().unwrap().thread_id());
}

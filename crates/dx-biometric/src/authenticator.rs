//! Single-challenge biometric authentication
//!
//! Each attempt creates a fresh platform context, issues exactly one
//! challenge, and delivers exactly one [`AuthOutcome`]. The host prompt
//! already grants the user several tries, so no retry happens here.
//!
//! Fallback button policy: a caller-supplied title is passed through to the
//! context; without one the host default applies.

use crate::completion::{default_context, CompletionContext};
use crate::mapping::map_platform_error;
use dx_biometric_core::{
    AuthOutcome, BiometricErrorKind, EvaluationReply, PlatformContextFactory, PlatformError,
};
use parking_lot::Mutex;
use std::sync::Arc;
use tokio::sync::oneshot;

/// Where the single outcome of an attempt goes
enum Delivery {
    Channel(oneshot::Sender<AuthOutcome>),
    Callback {
        on_complete: Box<dyn FnOnce(AuthOutcome) + Send>,
        context: Arc<dyn CompletionContext>,
    },
}

impl Delivery {
    fn deliver(self, outcome: AuthOutcome) {
        match self {
            Delivery::Channel(sender) => {
                // Receiver gone means the caller stopped waiting
                let _ = sender.send(outcome);
            }
            Delivery::Callback {
                on_complete,
                context,
            } => context.dispatch(Box::new(move || on_complete(outcome))),
        }
    }
}

/// Delivery slot shared by every handle of an attempt's reply.
///
/// Dropping the last handle unanswered delivers `Failure(Unknown)`.
struct PendingAttempt {
    delivery: Option<Delivery>,
}

impl PendingAttempt {
    /// Claim the single delivery slot
    fn claim(&mut self) -> Option<Delivery> {
        self.delivery.take()
    }
}

impl Drop for PendingAttempt {
    fn drop(&mut self) {
        if let Some(delivery) = self.delivery.take() {
            tracing::warn!("Platform dropped biometric reply without answering");
            let outcome = AuthOutcome::Failure(BiometricErrorKind::Unknown);
            log_outcome(&outcome);
            delivery.deliver(outcome);
        }
    }
}

fn outcome_for(success: bool, error: Option<&PlatformError>) -> AuthOutcome {
    if success {
        AuthOutcome::Success
    } else {
        AuthOutcome::Failure(map_platform_error(error))
    }
}

fn log_outcome(outcome: &AuthOutcome) {
    match outcome {
        AuthOutcome::Success => tracing::info!("Biometric authentication succeeded"),
        AuthOutcome::Failure(kind) => tracing::info!(
            error = kind.identifier(),
            "Biometric authentication failed"
        ),
    }
}

/// Drives one host challenge per call
#[derive(Clone)]
pub struct Authenticator {
    factory: Arc<dyn PlatformContextFactory>,
    completion: Arc<dyn CompletionContext>,
}

impl Authenticator {
    /// Create an authenticator delivering callbacks on the process-wide
    /// delivery thread
    pub fn new(factory: Arc<dyn PlatformContextFactory>) -> Self {
        Self {
            factory,
            completion: default_context(),
        }
    }

    /// Deliver callback-style completions on `completion`
    pub fn with_completion_context(mut self, completion: Arc<dyn CompletionContext>) -> Self {
        self.completion = completion;
        self
    }

    /// Context callback-style completions are delivered on
    pub fn completion_context(&self) -> Arc<dyn CompletionContext> {
        self.completion.clone()
    }

    /// Perform one challenge and wait for its outcome.
    ///
    /// The outcome is delivered to the awaiting task exactly once.
    pub async fn authenticate(&self, reason: &str, fallback_title: Option<&str>) -> AuthOutcome {
        let (sender, receiver) = oneshot::channel();
        self.start(reason, fallback_title, Delivery::Channel(sender));

        receiver
            .await
            .unwrap_or(AuthOutcome::Failure(BiometricErrorKind::Unknown))
    }

    /// Perform one challenge and hand the outcome to `on_complete`.
    ///
    /// `on_complete` runs exactly once, on this authenticator's completion
    /// context.
    pub fn authenticate_with<F>(&self, reason: &str, fallback_title: Option<&str>, on_complete: F)
    where
        F: FnOnce(AuthOutcome) + Send + 'static,
    {
        self.start(
            reason,
            fallback_title,
            Delivery::Callback {
                on_complete: Box::new(on_complete),
                context: self.completion.clone(),
            },
        );
    }

    fn start(&self, reason: &str, fallback_title: Option<&str>, delivery: Delivery) {
        let mut context = self.factory.create();

        if let Some(title) = fallback_title {
            context.set_fallback_label(Some(title.to_string()));
        }

        let pending = Arc::new(Mutex::new(PendingAttempt {
            delivery: Some(delivery),
        }));

        let reply = EvaluationReply::new(move |success, error| {
            let claimed = pending.lock().claim();
            let Some(delivery) = claimed else {
                tracing::warn!(success, "Ignoring duplicate biometric reply from platform");
                return;
            };

            let outcome = outcome_for(success, error.as_ref());
            log_outcome(&outcome);
            delivery.deliver(outcome);
        });

        tracing::debug!(
            reason_len = reason.len(),
            fallback_label = context.fallback_label().is_some(),
            "Starting biometric evaluation"
        );
        // The context now belongs to the host until it replies
        context.evaluate(reason, reply);
    }
}

impl std::fmt::Debug for Authenticator {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Authenticator").finish_non_exhaustive()
    }
}

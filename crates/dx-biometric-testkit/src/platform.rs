//! Scripted platform biometric service
//!
//! [`ScriptedPlatform`] stands in for the host biometric service. Every
//! context it creates shares one script and one call log, so tests can
//! configure responses up front and inspect what the code under test asked
//! for afterwards.

use dx_biometric_core::{
    EvaluationReply, PlatformBiometry, PlatformContext, PlatformContextFactory, PlatformError,
};
use parking_lot::Mutex;
use std::collections::VecDeque;
use std::sync::Arc;
use std::thread::JoinHandle;

/// Responses one challenge produces, in order.
///
/// Zero responses model a host that drops the reply; more than one model a
/// misbehaving host.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScriptedReply {
    responses: Vec<(bool, Option<PlatformError>)>,
}

impl ScriptedReply {
    /// Successful verification
    pub fn success() -> Self {
        Self {
            responses: vec![(true, None)],
        }
    }

    /// Failed verification with an error
    pub fn failure(error: impl Into<PlatformError>) -> Self {
        Self {
            responses: vec![(false, Some(error.into()))],
        }
    }

    /// Failed verification without any error detail
    pub fn failure_without_error() -> Self {
        Self {
            responses: vec![(false, None)],
        }
    }

    /// Never answer
    pub fn silent() -> Self {
        Self {
            responses: Vec::new(),
        }
    }

    /// Answer again after the previous responses
    pub fn then(mut self, success: bool, error: Option<PlatformError>) -> Self {
        self.responses.push((success, error));
        self
    }
}

/// Thread on which scripted replies are delivered
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReplyThread {
    /// A freshly spawned thread, like a host-owned callback queue
    Spawned,
    /// The thread calling `evaluate`, before it returns
    Inline,
}

/// One recorded `evaluate` call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EvaluationRecord {
    /// Context the challenge ran on
    pub context_id: u64,
    /// Reason passed to the host
    pub reason: String,
    /// Fallback label configured when the challenge started
    pub fallback_label: Option<String>,
}

#[derive(Debug)]
struct ScriptState {
    availability: VecDeque<Result<(), PlatformError>>,
    default_availability: Result<(), PlatformError>,
    biometry: PlatformBiometry,
    replies: VecDeque<ScriptedReply>,
    default_reply: ScriptedReply,
    reply_thread: ReplyThread,
    contexts_created: u64,
    live_contexts: usize,
    can_evaluate_calls: usize,
    evaluations: Vec<EvaluationRecord>,
    reply_threads: Vec<JoinHandle<()>>,
}

impl Default for ScriptState {
    fn default() -> Self {
        Self {
            availability: VecDeque::new(),
            default_availability: Ok(()),
            biometry: PlatformBiometry::FaceId,
            replies: VecDeque::new(),
            default_reply: ScriptedReply::success(),
            reply_thread: ReplyThread::Spawned,
            contexts_created: 0,
            live_contexts: 0,
            can_evaluate_calls: 0,
            evaluations: Vec::new(),
            reply_threads: Vec::new(),
        }
    }
}

/// Scriptable, recording stand-in for the host biometric service.
///
/// Defaults: evaluation possible, Face ID reported, every challenge succeeds
/// on a spawned thread.
#[derive(Debug, Clone, Default)]
pub struct ScriptedPlatform {
    state: Arc<Mutex<ScriptState>>,
}

impl ScriptedPlatform {
    /// Create a platform with the default script
    pub fn new() -> Self {
        Self::default()
    }

    /// Report `biometry` as the device modality
    pub fn with_biometry(self, biometry: PlatformBiometry) -> Self {
        self.state.lock().biometry = biometry;
        self
    }

    /// Fail every pre-flight check with `error`
    pub fn unavailable(self, error: impl Into<PlatformError>) -> Self {
        self.state.lock().default_availability = Err(error.into());
        self
    }

    /// Answer successive pre-flight checks from `results`, then the default
    pub fn with_availability_sequence(self, results: Vec<Result<(), PlatformError>>) -> Self {
        self.state.lock().availability = results.into();
        self
    }

    /// Queue the reply for the next unscripted challenge
    pub fn with_reply(self, reply: ScriptedReply) -> Self {
        self.state.lock().replies.push_back(reply);
        self
    }

    /// Reply used once the queue is exhausted
    pub fn with_default_reply(self, reply: ScriptedReply) -> Self {
        self.state.lock().default_reply = reply;
        self
    }

    /// Deliver replies on the evaluating thread before `evaluate` returns
    pub fn reply_inline(self) -> Self {
        self.state.lock().reply_thread = ReplyThread::Inline;
        self
    }

    /// Factory handing out contexts bound to this script
    pub fn factory(&self) -> impl PlatformContextFactory + 'static {
        let platform = self.clone();
        move || Box::new(platform.new_context()) as Box<dyn PlatformContext>
    }

    fn new_context(&self) -> ScriptedContext {
        let mut state = self.state.lock();
        state.contexts_created += 1;
        state.live_contexts += 1;
        ScriptedContext {
            id: state.contexts_created,
            state: self.state.clone(),
            fallback_label: None,
        }
    }

    /// Number of contexts created so far
    pub fn contexts_created(&self) -> u64 {
        self.state.lock().contexts_created
    }

    /// Number of contexts not yet dropped
    pub fn live_contexts(&self) -> usize {
        self.state.lock().live_contexts
    }

    /// Number of pre-flight checks performed
    pub fn can_evaluate_calls(&self) -> usize {
        self.state.lock().can_evaluate_calls
    }

    /// Number of challenges started
    pub fn evaluate_calls(&self) -> usize {
        self.state.lock().evaluations.len()
    }

    /// Every challenge started, in order
    pub fn evaluations(&self) -> Vec<EvaluationRecord> {
        self.state.lock().evaluations.clone()
    }

    /// Reason passed to the most recent challenge
    pub fn last_reason(&self) -> Option<String> {
        self.state
            .lock()
            .evaluations
            .last()
            .map(|record| record.reason.clone())
    }

    /// Block until every spawned reply thread has finished
    pub fn wait_for_replies(&self) {
        let threads = std::mem::take(&mut self.state.lock().reply_threads);
        for thread in threads {
            thread.join().expect("reply thread panicked");
        }
    }
}

/// Context handed out by [`ScriptedPlatform::factory`]
#[derive(Debug)]
struct ScriptedContext {
    id: u64,
    state: Arc<Mutex<ScriptState>>,
    fallback_label: Option<String>,
}

impl PlatformContext for ScriptedContext {
    fn can_evaluate(&self) -> Result<(), PlatformError> {
        let mut state = self.state.lock();
        state.can_evaluate_calls += 1;
        let default = state.default_availability.clone();
        state.availability.pop_front().unwrap_or(default)
    }

    fn biometry(&self) -> PlatformBiometry {
        self.state.lock().biometry
    }

    fn evaluate(self: Box<Self>, reason: &str, reply: EvaluationReply) {
        let (script, reply_thread) = {
            let mut state = self.state.lock();
            state.evaluations.push(EvaluationRecord {
                context_id: self.id,
                reason: reason.to_string(),
                fallback_label: self.fallback_label.clone(),
            });
            let default = state.default_reply.clone();
            let script = state.replies.pop_front().unwrap_or(default);
            (script, state.reply_thread)
        };

        tracing::debug!(context_id = self.id, ?script, "Scripted biometric evaluation");

        match reply_thread {
            ReplyThread::Inline => {
                for (success, error) in script.responses {
                    reply.reply(success, error);
                }
            }
            ReplyThread::Spawned => {
                if script.responses.is_empty() {
                    return;
                }
                // The context lives on the reply thread until it has answered
                let state = self.state.clone();
                let handle = std::thread::spawn(move || {
                    for (success, error) in script.responses {
                        reply.reply(success, error);
                    }
                    drop(self);
                });
                state.lock().reply_threads.push(handle);
            }
        }
    }

    fn fallback_label(&self) -> Option<&str> {
        self.fallback_label.as_deref()
    }

    fn set_fallback_label(&mut self, label: Option<String>) {
        self.fallback_label = label;
    }
}

impl Drop for ScriptedContext {
    fn drop(&mut self) {
        self.state.lock().live_contexts -= 1;
    }
}

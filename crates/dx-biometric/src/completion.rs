//! Completion delivery contexts
//!
//! The host replies on a thread it owns. Callback-style callers receive the
//! outcome through a [`CompletionContext`] instead, so UI code always runs on
//! one consistent context. Unless configured otherwise that context is the
//! process-wide [`DeliveryThread`].

use once_cell::sync::OnceCell;
use std::panic::AssertUnwindSafe;
use std::sync::Arc;
use std::thread::ThreadId;
use tokio::sync::mpsc;

static DEFAULT_DELIVERY: OnceCell<DeliveryThread> = OnceCell::new();

/// Name of the thread backing [`default_context`]
pub const DELIVERY_THREAD_NAME: &str = "dx-biometric-delivery";

/// Deferred completion handler
pub type CompletionJob = Box<dyn FnOnce() + Send + 'static>;

/// Execution context on which completion handlers run
pub trait CompletionContext: Send + Sync {
    /// Schedule `job` to run on this context
    fn dispatch(&self, job: CompletionJob);
}

/// Runs completion handlers immediately on the delivering thread.
///
/// Handlers then run on whichever thread the host replied on; opt in only
/// when that is acceptable.
#[derive(Debug, Default, Clone, Copy)]
pub struct InlineContext;

impl CompletionContext for InlineContext {
    fn dispatch(&self, job: CompletionJob) {
        job();
    }
}

/// Runs completion handlers in order on one dedicated thread
#[derive(Debug, Clone)]
pub struct DeliveryThread {
    tx: mpsc::UnboundedSender<CompletionJob>,
    thread: ThreadId,
}

impl DeliveryThread {
    /// Start a delivery thread named `name`.
    ///
    /// The thread exits once every clone of the returned handle is dropped.
    pub fn spawn(name: &str) -> std::io::Result<Self> {
        let (tx, mut rx) = mpsc::unbounded_channel::<CompletionJob>();
        let handle = std::thread::Builder::new()
            .name(name.to_string())
            .spawn(move || {
                while let Some(job) = rx.blocking_recv() {
                    // A panicking handler must not stop later deliveries
                    if std::panic::catch_unwind(AssertUnwindSafe(job)).is_err() {
                        tracing::error!("Biometric completion handler panicked");
                    }
                }
            })?;

        Ok(Self {
            tx,
            thread: handle.thread().id(),
        })
    }

    /// Identifier of the thread handlers run on
    pub fn thread_id(&self) -> ThreadId {
        self.thread
    }
}

impl CompletionContext for DeliveryThread {
    fn dispatch(&self, job: CompletionJob) {
        if self.tx.send(job).is_err() {
            tracing::warn!("Delivery thread has shut down; dropping biometric completion");
        }
    }
}

/// Process-wide delivery thread, started on first use
pub fn default_delivery_thread() -> std::io::Result<&'static DeliveryThread> {
    DEFAULT_DELIVERY.get_or_try_init(|| DeliveryThread::spawn(DELIVERY_THREAD_NAME))
}

/// Context used when none is configured: the process-wide delivery thread
pub fn default_context() -> Arc<dyn CompletionContext> {
    match default_delivery_thread() {
        Ok(thread) => Arc::new(thread.clone()),
        Err(error) => {
            tracing::error!(%error, "Cannot start biometric delivery thread; delivering inline");
            Arc::new(InlineContext)
        }
    }
}

/// Create a main-thread queue and the loop that drains it
pub fn main_queue() -> (MainQueue, MainLoop) {
    let (tx, rx) = mpsc::unbounded_channel();
    (MainQueue { tx }, MainLoop { rx })
}

/// Sending half of a main-thread queue
///
/// Jobs run on whichever thread drives the paired [`MainLoop`].
#[derive(Debug, Clone)]
pub struct MainQueue {
    tx: mpsc::UnboundedSender<CompletionJob>,
}

impl CompletionContext for MainQueue {
    fn dispatch(&self, job: CompletionJob) {
        if self.tx.send(job).is_err() {
            tracing::warn!("Main loop has shut down; dropping biometric completion");
        }
    }
}

/// Receiving half of a main-thread queue
#[derive(Debug)]
pub struct MainLoop {
    rx: mpsc::UnboundedReceiver<CompletionJob>,
}

impl MainLoop {
    /// Run every job queued so far; returns how many ran
    pub fn run_pending(&mut self) -> usize {
        let mut ran = 0;
        while let Ok(job) = self.rx.try_recv() {
            job();
            ran += 1;
        }
        ran
    }

    /// Wait for the next job and run it.
    ///
    /// Returns `false` once every [`MainQueue`] has been dropped.
    pub async fn run_next(&mut self) -> bool {
        match self.rx.recv().await {
            Some(job) => {
                job();
                true
            }
            None => false,
        }
    }

    /// Run jobs until every [`MainQueue`] has been dropped
    pub async fn run(mut self) {
        while self.run_next().await {}
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};
    use std::sync::Arc;

    #[test]
    fn test_inline_runs_immediately() {
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = ran.clone();
        InlineContext.dispatch(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_main_queue_defers_until_drained() {
        let (queue, mut main_loop) = main_queue();
        let ran = Arc::new(AtomicUsize::new(0));

        for _ in 0..3 {
            let counter = ran.clone();
            queue.dispatch(Box::new(move || {
                counter.fetch_add(1, Ordering::SeqCst);
            }));
        }

        assert_eq!(ran.load(Ordering::SeqCst), 0);
        assert_eq!(main_loop.run_pending(), 3);
        assert_eq!(ran.load(Ordering::SeqCst), 3);
        assert_eq!(main_loop.run_pending(), 0);
    }

    #[tokio::test]
    async fn test_run_stops_when_queues_dropped() {
        let (queue, main_loop) = main_queue();
        let ran = Arc::new(AtomicUsize::new(0));
        let counter = ran.clone();
        queue.dispatch(Box::new(move || {
            counter.fetch_add(1, Ordering::SeqCst);
        }));
        drop(queue);

        main_loop.run().await;
        assert_eq!(ran.load(Ordering::SeqCst), 1);
    }

    #[test]
    fn test_delivery_thread_runs_jobs_in_order_on_one_thread() {
        let delivery = DeliveryThread::spawn("test-delivery").unwrap();
        let (tx, rx) = std::sync::mpsc::channel();

        for index in 0..3 {
            let tx = tx.clone();
            delivery.dispatch(Box::new(move || {
                tx.send((index, std::thread::current().id())).unwrap();
            }));
        }

        let timeout = std::time::Duration::from_secs(5);
        for expected in 0..3 {
            let (index, thread) = rx.recv_timeout(timeout).unwrap();
            assert_eq!(index, expected);
            assert_eq!(thread, delivery.thread_id());
        }
        assert_ne!(delivery.thread_id(), std::thread::current().id());
    }

    #[test]
    fn test_delivery_thread_survives_panicking_job() {
        let delivery = DeliveryThread::spawn("test-delivery").unwrap();
        let (tx, rx) = std::sync::mpsc::channel();

        delivery.dispatch(Box::new(|| panic!("handler failure")));
        delivery.dispatch(Box::new(move || tx.send(()).unwrap()));

        assert!(rx.recv_timeout(std::time::Duration::from_secs(5)).is_ok());
    }

    #[test]
    fn test_default_context_is_shared_thread() {
        let first = default_delivery_thread().unwrap().thread_id();
        let second = default_delivery_thread().unwrap().thread_id();
        assert_eq!(first, second);
    }

    #[test]
    fn test_dispatch_after_shutdown_is_dropped() {
        let (queue, main_loop) = main_queue();
        drop(main_loop);
        queue.dispatch(Box::new(|| panic!("must not run")));
    }
}

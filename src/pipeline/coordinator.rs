//! Detection coordinator: turns a text into exactly one callback.
//!
//! [`DetectionCoordinator::detect`] returns immediately.  The request runs on
//! the tokio runtime and finishes with exactly one call to
//! [`DetectionListener::on_success`] or [`DetectionListener::on_failure`]:
//!
//! ```text
//! detect(text)
//!   └─▶ ""  → default text
//!   └─▶ spawn ─▶ detector.detect(text)        (own task, so panics are caught)
//!                 ├─ Ok(result)  ─▶ on_success(request, result)
//!                 ├─ Err(e)      ─▶ on_failure(request, e.to_string())
//!                 ├─ panic       ─▶ on_failure(request, "Detection failed: …")
//!                 └─ timeout     ─▶ on_failure(request, "Detection timed out …")
//! ```
//!
//! There is no cancellation.  Each request gets a fresh [`RequestId`] so the
//! presentation side can drop results that arrive after a newer request was
//! issued.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio::runtime::Handle;
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use crate::config::AppConfig;
use crate::detect::{DetectionResult, DetectorError, LanguageDetector};

/// Sequence number of a `detect` call, starting at 1.
pub type RequestId = u64;

// ---------------------------------------------------------------------------
// Events and listeners
// ---------------------------------------------------------------------------

/// How a detection request ended.
#[derive(Debug, Clone, PartialEq)]
pub enum DetectionOutcome {
    Success(DetectionResult),
    Failure(String),
}

/// A finished request, as carried to the presentation thread.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionEvent {
    pub request: RequestId,
    pub outcome: DetectionOutcome,
}

/// Receives the completion of each request.  Called from a tokio worker.
pub trait DetectionListener: Send + Sync {
    fn on_success(&self, request: RequestId, result: DetectionResult);
    fn on_failure(&self, request: RequestId, message: String);
}

/// Forwards completions as [`DetectionEvent`]s over an unbounded channel.
///
/// The receiving end belongs to whichever thread owns the presentation
/// state; it drains the channel with `try_recv` once per frame.
#[derive(Debug, Clone)]
pub struct ChannelListener {
    tx: mpsc::UnboundedSender<DetectionEvent>,
}

impl ChannelListener {
    pub fn new() -> (Self, mpsc::UnboundedReceiver<DetectionEvent>) {
        let (tx, rx) = mpsc::unbounded_channel();
        (Self { tx }, rx)
    }

    fn forward(&self, event: DetectionEvent) {
        if self.tx.send(event).is_err() {
            log::debug!("coordinator: presentation side gone, result dropped");
        }
    }
}

impl DetectionListener for ChannelListener {
    fn on_success(&self, request: RequestId, result: DetectionResult) {
        self.forward(DetectionEvent {
            request,
            outcome: DetectionOutcome::Success(result),
        });
    }

    fn on_failure(&self, request: RequestId, message: String) {
        self.forward(DetectionEvent {
            request,
            outcome: DetectionOutcome::Failure(message),
        });
    }
}

// ---------------------------------------------------------------------------
// PendingDetection
// ---------------------------------------------------------------------------

/// Handle to an in-flight request.  Dropping it does not cancel anything.
#[derive(Debug)]
pub struct PendingDetection {
    request: RequestId,
    task: JoinHandle<()>,
}

impl PendingDetection {
    pub fn id(&self) -> RequestId {
        self.request
    }

    /// Wait until the listener has been called.
    pub async fn finished(self) {
        if let Err(e) = self.task.await {
            log::error!("coordinator: request {} task failed: {e}", self.request);
        }
    }
}

// ---------------------------------------------------------------------------
// DetectionCoordinator
// ---------------------------------------------------------------------------

/// Submits texts to a [`LanguageDetector`] and reports each result once.
pub struct DetectionCoordinator {
    detector: Arc<dyn LanguageDetector>,
    listener: Arc<dyn DetectionListener>,
    default_text: String,
    timeout: Option<Duration>,
    runtime: Handle,
    next_request: AtomicU64,
}

impl DetectionCoordinator {
    /// Create a coordinator without a timeout.
    ///
    /// * `default_text`: submitted when `detect` is given an empty string.
    /// * `runtime`     : where requests run; `detect` may be called from any
    ///   thread, inside or outside that runtime.
    pub fn new(
        detector: Arc<dyn LanguageDetector>,
        listener: Arc<dyn DetectionListener>,
        default_text: impl Into<String>,
        runtime: Handle,
    ) -> Self {
        Self {
            detector,
            listener,
            default_text: default_text.into(),
            timeout: None,
            runtime,
            next_request: AtomicU64::new(0),
        }
    }

    /// Create a coordinator using the detector section of `config`.
    pub fn from_config(
        config: &AppConfig,
        detector: Arc<dyn LanguageDetector>,
        listener: Arc<dyn DetectionListener>,
        runtime: Handle,
    ) -> Self {
        Self::new(detector, listener, config.detector.default_text.clone(), runtime)
            .with_timeout(config.detection_timeout())
    }

    /// Fail requests that take longer than `timeout`.  `None` waits forever.
    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn default_text(&self) -> &str {
        &self.default_text
    }

    /// The text that will actually be submitted for `text`.
    pub fn effective_text<'a>(&'a self, text: &'a str) -> &'a str {
        if text.is_empty() {
            &self.default_text
        } else {
            text
        }
    }

    /// Start detecting the language of `text`.  Never blocks.
    pub fn detect(&self, text: &str) -> PendingDetection {
        let request = self.next_request.fetch_add(1, Ordering::Relaxed) + 1;
        let text = self.effective_text(text).to_string();
        let detector = Arc::clone(&self.detector);
        let listener = Arc::clone(&self.listener);
        let timeout = self.timeout;

        log::debug!("coordinator: request {request} submitted ({} chars)", text.chars().count());

        let task = self.runtime.spawn(async move {
            match run_detection(detector, text, timeout).await {
                Ok(result) => {
                    log::debug!(
                        "coordinator: request {request} done in {} ms",
                        result.inference_time_ms()
                    );
                    listener.on_success(request, result);
                }
                Err(e) => {
                    log::warn!("coordinator: request {request} failed: {e}");
                    listener.on_failure(request, e.to_string());
                }
            }
        });

        PendingDetection { request, task }
    }
}

async fn run_detection(
    detector: Arc<dyn LanguageDetector>,
    text: String,
    timeout: Option<Duration>,
) -> Result<DetectionResult, DetectorError> {
    let mut inner = tokio::spawn(async move { detector.detect(&text).await });

    let joined = match timeout {
        Some(limit) => match tokio::time::timeout(limit, &mut inner).await {
            Ok(joined) => joined,
            Err(_) => {
                inner.abort();
                return Err(DetectorError::Timeout(limit.as_secs()));
            }
        },
        None => inner.await,
    };

    joined.map_err(|e| DetectorError::Inference(e.to_string()))?
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use std::sync::atomic::AtomicUsize;

    use async_trait::async_trait;

    use super::*;
    use crate::detect::{DetectionCandidate, MockDetector};

    // -----------------------------------------------------------------------
    // Test doubles
    // -----------------------------------------------------------------------

    #[derive(Default)]
    struct CountingListener {
        successes: AtomicUsize,
        failures: AtomicUsize,
    }

    impl CountingListener {
        fn counts(&self) -> (usize, usize) {
            (
                self.successes.load(Ordering::SeqCst),
                self.failures.load(Ordering::SeqCst),
            )
        }
    }

    impl DetectionListener for CountingListener {
        fn on_success(&self, _request: RequestId, _result: DetectionResult) {
            self.successes.fetch_add(1, Ordering::SeqCst);
        }

        fn on_failure(&self, _request: RequestId, _message: String) {
            self.failures.fetch_add(1, Ordering::SeqCst);
        }
    }

    struct PanickingDetector;

    #[async_trait]
    impl LanguageDetector for PanickingDetector {
        async fn detect(&self, _text: &str) -> Result<DetectionResult, DetectorError> {
            panic!("model exploded");
        }
    }

    // -----------------------------------------------------------------------
    // Helpers
    // -----------------------------------------------------------------------

    fn french_first() -> DetectionResult {
        DetectionResult::new(
            vec![
                DetectionCandidate::new("en", 0.2),
                DetectionCandidate::new("fr", 0.9),
                DetectionCandidate::new("es", 0.3),
            ],
            7,
        )
    }

    fn coordinator(
        detector: Arc<dyn LanguageDetector>,
        listener: Arc<dyn DetectionListener>,
    ) -> DetectionCoordinator {
        DetectionCoordinator::new(detector, listener, "default text", Handle::current())
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn success_fires_exactly_once() {
        let listener = Arc::new(CountingListener::default());
        let coord = coordinator(Arc::new(MockDetector::ok(french_first())), listener.clone());

        coord.detect("bonjour").finished().await;
        assert_eq!(listener.counts(), (1, 0));
    }

    #[tokio::test]
    async fn failure_fires_exactly_once() {
        let listener = Arc::new(CountingListener::default());
        let coord = coordinator(
            Arc::new(MockDetector::err(DetectorError::Inference("boom".into()))),
            listener.clone(),
        );

        coord.detect("bonjour").finished().await;
        assert_eq!(listener.counts(), (0, 1));
    }

    #[tokio::test]
    async fn channel_listener_delivers_result() {
        let (listener, mut rx) = ChannelListener::new();
        let coord = coordinator(Arc::new(MockDetector::ok(french_first())), Arc::new(listener));

        let pending = coord.detect("bonjour");
        let id = pending.id();
        pending.finished().await;

        let event = rx.recv().await.expect("one event");
        assert_eq!(event.request, id);
        assert_eq!(event.outcome, DetectionOutcome::Success(french_first()));
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn failure_message_is_verbatim() {
        let (listener, mut rx) = ChannelListener::new();
        let error = DetectorError::ModelLoad("missing model".into());
        let coord = coordinator(Arc::new(MockDetector::err(error.clone())), Arc::new(listener));

        coord.detect("hola").finished().await;

        let event = rx.recv().await.expect("one event");
        assert_eq!(event.outcome, DetectionOutcome::Failure(error.to_string()));
    }

    #[tokio::test]
    async fn empty_text_uses_default_text() {
        let detector = Arc::new(MockDetector::ok(french_first()));
        let (listener, mut rx) = ChannelListener::new();
        let coord = coordinator(detector.clone(), Arc::new(listener));

        coord.detect("").finished().await;
        coord.detect("default text").finished().await;

        assert_eq!(detector.seen(), ["default text", "default text"]);
        let first = rx.recv().await.unwrap();
        let second = rx.recv().await.unwrap();
        assert_eq!(first.outcome, second.outcome);
    }

    #[tokio::test]
    async fn effective_text_keeps_non_empty_input() {
        let coord = coordinator(
            Arc::new(MockDetector::ok(french_first())),
            Arc::new(CountingListener::default()),
        );
        assert_eq!(coord.effective_text(""), "default text");
        assert_eq!(coord.effective_text(" "), " ");
        assert_eq!(coord.effective_text("ciao"), "ciao");
    }

    #[tokio::test]
    async fn slow_detector_times_out_once() {
        let (listener, mut rx) = ChannelListener::new();
        let detector = MockDetector::ok(french_first()).with_delay(Duration::from_secs(5));
        let coord = coordinator(Arc::new(detector), Arc::new(listener))
            .with_timeout(Some(Duration::from_millis(50)));

        coord.detect("lent").finished().await;

        let event = rx.recv().await.expect("one event");
        match event.outcome {
            DetectionOutcome::Failure(message) => assert!(message.contains("timed out")),
            other => panic!("expected failure, got {other:?}"),
        }
        assert!(rx.try_recv().is_err());
    }

    #[tokio::test]
    async fn panicking_detector_reports_failure() {
        let listener = Arc::new(CountingListener::default());
        let coord = coordinator(Arc::new(PanickingDetector), listener.clone());

        coord.detect("x").finished().await;
        assert_eq!(listener.counts(), (0, 1));
    }

    #[tokio::test]
    async fn request_ids_increase() {
        let coord = coordinator(
            Arc::new(MockDetector::ok(french_first())),
            Arc::new(CountingListener::default()),
        );
        let a = coord.detect("a");
        let b = coord.detect("b");
        assert_eq!(a.id(), 1);
        assert_eq!(b.id(), 2);
        a.finished().await;
        b.finished().await;
    }

    #[tokio::test]
    async fn from_config_reads_default_text_and_timeout() {
        let mut config = AppConfig::default();
        config.detector.default_text = "configured".into();
        config.detector.timeout_secs = 3;

        let coord = DetectionCoordinator::from_config(
            &config,
            Arc::new(MockDetector::ok(french_first())),
            Arc::new(CountingListener::default()),
            Handle::current(),
        );
        assert_eq!(coord.default_text(), "configured");
        assert_eq!(coord.timeout, Some(Duration::from_secs(3)));
    }
}

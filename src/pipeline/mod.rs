//! Detection pipeline: request coordination and result presentation.
//!
//! # Architecture
//!
//! ```text
//! UI thread                         tokio runtime
//! ─────────                         ─────────────
//! Detect clicked
//!   ├─ coordinator.detect(text) ──▶ detector.detect(text)
//!   ├─ presenter.begin(id)                │
//!   └─ view.start_detecting()             ▼
//!                                   ChannelListener::on_success / on_failure
//!                                         │  (unbounded mpsc, one event per request)
//! every frame: rx.try_recv() ◀────────────┘
//!   └─ presenter.apply(event, &mut view)
//!        ├─ rank, resolve label ─▶ view.show_result(...)
//!        └─ speech.speak(label, locale)
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use std::sync::Arc;
//! use language_detector::config::AppConfig;
//! use language_detector::detect::{LanguageDetector, LinguaDetector};
//! use language_detector::pipeline::{ChannelListener, DetectionCoordinator, ResultPresenter, ResultView};
//! use language_detector::speech::LogSpeechSink;
//!
//! #[tokio::main]
//! async fn main() {
//!     let config = AppConfig::default();
//!     let detector: Arc<dyn LanguageDetector> =
//!         Arc::new(LinguaDetector::from_config(&config.detector).unwrap());
//!     let (listener, mut rx) = ChannelListener::new();
//!     let coordinator = DetectionCoordinator::from_config(
//!         &config,
//!         detector,
//!         Arc::new(listener),
//!         tokio::runtime::Handle::current(),
//!     );
//!     let mut presenter = ResultPresenter::new(Arc::new(LogSpeechSink), "ar");
//!     let mut view = ResultView::new();
//!
//!     let pending = coordinator.detect("");
//!     presenter.begin(pending.id());
//!     if let Some(event) = rx.recv().await {
//!         presenter.apply(event, &mut view);
//!     }
//!     println!("{:?}", view.spoken_label);
//! }
//! ```

pub mod coordinator;
pub mod presenter;
pub mod state;

// ---------------------------------------------------------------------------
// Public re-exports
// ---------------------------------------------------------------------------

pub use coordinator::{
    ChannelListener, DetectionCoordinator, DetectionEvent, DetectionListener, DetectionOutcome,
    PendingDetection, RequestId,
};
pub use presenter::{format_inference_time, PresentationSink, ResultPresenter};
pub use state::{DetectionState, Notification, ResultRow, ResultView};

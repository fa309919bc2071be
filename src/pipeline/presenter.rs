//! Applies finished detections to the presentation and speech sinks.
//!
//! [`ResultPresenter`] runs on the thread that owns the presentation state.
//! For a successful request it ranks the candidates, resolves the top
//! candidate's label, hands the ranked list and label to the
//! [`PresentationSink`] and then speaks the label.  Speech failures are
//! logged and never touch the displayed result.

use std::sync::Arc;

use crate::detect::{DetectionCandidate, DetectionResult};
use crate::label::LabelTable;
use crate::speech::{SpeechError, SpeechSink};

use super::coordinator::{DetectionEvent, DetectionOutcome, RequestId};

/// Where ranked results and error notifications end up.
pub trait PresentationSink {
    /// Show a finished detection.  `ranked` is ordered by descending
    /// probability; `label` is the spoken name of `ranked[0]`.
    fn show_result(&mut self, inference_time: &str, ranked: &[DetectionCandidate], label: &str);

    /// Show a transient error notification.
    fn show_error(&mut self, message: &str);
}

/// Renders an inference time for display.
///
/// ```
/// assert_eq!(language_detector::pipeline::format_inference_time(42), "42 ms");
/// ```
pub fn format_inference_time(ms: u64) -> String {
    format!("{ms} ms")
}

/// Turns [`DetectionEvent`]s into presentation and speech side effects.
pub struct ResultPresenter {
    speech: Arc<dyn SpeechSink>,
    locale: String,
    labels: &'static LabelTable,
    latest: Option<RequestId>,
}

impl ResultPresenter {
    /// Speak labels from [`LabelTable::arabic`] with a voice for `locale`.
    pub fn new(speech: Arc<dyn SpeechSink>, locale: impl Into<String>) -> Self {
        Self {
            speech,
            locale: locale.into(),
            labels: LabelTable::arabic(),
            latest: None,
        }
    }

    pub fn with_labels(mut self, labels: &'static LabelTable) -> Self {
        self.labels = labels;
        self
    }

    /// Record `request` as the newest one issued.  Events for older
    /// requests are dropped from now on.
    pub fn begin(&mut self, request: RequestId) {
        self.latest = Some(request);
    }

    pub fn latest(&self) -> Option<RequestId> {
        self.latest
    }

    /// Apply `event` to `sink`.  Returns `false` when the event was stale and
    /// ignored.
    pub fn apply(&mut self, event: DetectionEvent, sink: &mut dyn PresentationSink) -> bool {
        if self.latest.is_some_and(|latest| event.request < latest) {
            log::debug!(
                "presenter: dropping stale result for request {} (latest {:?})",
                event.request,
                self.latest
            );
            return false;
        }

        match event.outcome {
            DetectionOutcome::Success(result) => self.present(&result, sink),
            DetectionOutcome::Failure(message) => sink.show_error(&message),
        }
        true
    }

    fn present(&self, result: &DetectionResult, sink: &mut dyn PresentationSink) {
        let ranked = result.ranked();
        let top_code = ranked.first().map(|c| c.language_code()).unwrap_or_default();
        let label = self.labels.get(top_code);

        sink.show_result(
            &format_inference_time(result.inference_time_ms()),
            &ranked,
            label,
        );

        if let Err(e) = self.speech.speak(label, &self.locale) {
            match &e {
                SpeechError::UnsupportedLocale(_) => log::error!("speech: {e}"),
                SpeechError::Backend(_) => log::warn!("speech: {e}"),
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

//! Detection state machine and the view model the window renders.
//!
//! [`ResultView`] is the single source of truth for the UI: current
//! [`DetectionState`], the last ranked result list, and any pending error
//! notification.  It is owned by the UI thread and implements
//! [`PresentationSink`], so the presenter writes straight into it.

use std::time::{Duration, Instant};

use crate::detect::DetectionCandidate;
use crate::label;

use super::presenter::PresentationSink;

// ---------------------------------------------------------------------------
// DetectionState
// ---------------------------------------------------------------------------

/// ```text
/// Idle ──detect──▶ Detecting ──result──▶ Result
///                            ──error───▶ Error
/// Result / Error ──detect──▶ Detecting
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum DetectionState {
    /// Nothing submitted yet.
    #[default]
    Idle,
    /// A request is in flight; the trigger is disabled.
    Detecting,
    /// The latest request produced a result.
    Result,
    /// The latest request failed.  The previous result list stays visible.
    Error,
}

impl DetectionState {
    /// Returns `true` while a request is in flight.
    ///
    /// ```
    /// use language_detector::pipeline::DetectionState;
    ///
    /// assert!(DetectionState::Detecting.is_busy());
    /// assert!(!DetectionState::Result.is_busy());
    /// ```
    pub fn is_busy(&self) -> bool {
        matches!(self, DetectionState::Detecting)
    }

    /// A short human-readable label for the status line.
    pub fn label(&self) -> &'static str {
        match self {
            DetectionState::Idle => "Ready",
            DetectionState::Detecting => "Detecting…",
            DetectionState::Result => "Done",
            DetectionState::Error => "Error",
        }
    }
}

// ---------------------------------------------------------------------------
// ResultRow
// ---------------------------------------------------------------------------

/// One line of the result list.
#[derive(Debug, Clone, PartialEq)]
pub struct ResultRow {
    pub language_code: String,
    pub label: &'static str,
    pub probability: f64,
}

impl ResultRow {
    /// Probability as a percentage with two decimals, e.g. `"87.50%"`.
    pub fn percent(&self) -> String {
        format!("{:.2}%", self.probability * 100.0)
    }
}

// ---------------------------------------------------------------------------
// Notification
// ---------------------------------------------------------------------------

/// A transient message shown over the window.
#[derive(Debug, Clone, PartialEq)]
pub struct Notification {
    pub message: String,
    pub shown_at: Instant,
}

// ---------------------------------------------------------------------------
// ResultView
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct ResultView {
    pub state: DetectionState,
    /// Rendered inference time of the last result, e.g. `"12 ms"`.
    pub inference_time: Option<String>,
    /// Last result list, most probable first.
    pub rows: Vec<ResultRow>,
    /// Label spoken for the last result.
    pub spoken_label: Option<String>,
    pub notification: Option<Notification>,
}

impl ResultView {
    pub fn new() -> Self {
        Self::default()
    }

    /// Enter `Detecting`.
    pub fn start_detecting(&mut self) {
        self.state = DetectionState::Detecting;
    }

    /// Drop the notification once it has been visible for `ttl`.
    pub fn expire_notification(&mut self, now: Instant, ttl: Duration) {
        if self
            .notification
            .as_ref()
            .is_some_and(|n| now.saturating_duration_since(n.shown_at) >= ttl)
        {
            self.notification = None;
        }
    }
}

impl PresentationSink for ResultView {
    fn show_result(&mut self, inference_time: &str, ranked: &[DetectionCandidate], label: &str) {
        self.state = DetectionState::Result;
        self.inference_time = Some(inference_time.to_string());
        self.rows = ranked
            .iter()
            .map(|c| ResultRow {
                language_code: c.language_code().to_string(),
                label: label::resolve(c.language_code()),
                probability: c.probability(),
            })
            .collect();
        self.spoken_label = Some(label.to_string());
    }

    fn show_error(&mut self, message: &str) {
        self.state = DetectionState::Error;
        self.notification = Some(Notification {
            message: message.to_string(),
            shown_at: Instant::now(),
        });
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_detecting_is_busy() {
        assert!(!DetectionState::Idle.is_busy());
        assert!(DetectionState::Detecting.is_busy());
        assert!(!DetectionState::Result.is_busy());
        assert!(!DetectionState::Error.is_busy());
    }

    #[test]
    fn default_state_is_idle() {
        assert_eq!(DetectionState::default(), DetectionState::Idle);
        assert_eq!(DetectionState::Idle.label(), "Ready");
    }

    #[test]
    fn show_result_fills_rows() {
        let mut view = ResultView::new();
        view.start_detecting();
        let ranked = [
            DetectionCandidate::new("fr", 0.875),
            DetectionCandidate::new("xx", 0.125),
        ];

        view.show_result("9 ms", &ranked, "اللغة الفرنسية");

        assert_eq!(view.state, DetectionState::Result);
        assert_eq!(view.inference_time.as_deref(), Some("9 ms"));
        assert_eq!(view.rows.len(), 2);
        assert_eq!(view.rows[0].label, "اللغة الفرنسية");
        assert_eq!(view.rows[0].percent(), "87.50%");
        assert_eq!(view.rows[1].label, label::UNKNOWN_LANGUAGE_LABEL);
        assert_eq!(view.spoken_label.as_deref(), Some("اللغة الفرنسية"));
    }

    #[test]
    fn show_error_keeps_previous_rows() {
        let mut view = ResultView::new();
        view.show_result("1 ms", &[DetectionCandidate::new("en", 1.0)], "اللغة الإنجليزية");
        view.start_detecting();

        view.show_error("Detection failed: boom");

        assert_eq!(view.state, DetectionState::Error);
        assert_eq!(view.rows.len(), 1);
        assert_eq!(
            view.notification.as_ref().map(|n| n.message.as_str()),
            Some("Detection failed: boom")
        );
    }

    #[test]
    fn notification_expires_after_ttl() {
        let mut view = ResultView::new();
        view.show_error("oops");
        let shown = view.notification.as_ref().unwrap().shown_at;

        view.expire_notification(shown + Duration::from_millis(500), Duration::from_secs(2));
        assert!(view.notification.is_some());

        view.expire_notification(shown + Duration::from_secs(2), Duration::from_secs(2));
        assert!(view.notification.is_none());
    }
}

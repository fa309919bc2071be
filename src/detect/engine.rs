//! Core detector trait and the stand-in used when no model is available.
//!
//! [`LanguageDetector`] is the interface the coordinator drives.  It is
//! object-safe and `Send + Sync` so it can be held behind an
//! `Arc<dyn LanguageDetector>` and called from any tokio worker.
//!
//! [`MockDetector`] (available under `#[cfg(test)]`) returns a
//! pre-configured response, optionally after a delay, and records every text
//! it was asked about.

use async_trait::async_trait;
use thiserror::Error;

use crate::detect::result::DetectionResult;

// ---------------------------------------------------------------------------
// DetectorError
// ---------------------------------------------------------------------------

/// Everything that can stop a detector from producing a result.
///
/// The display string is what the user sees in the error notification.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum DetectorError {
    /// The detector model could not be built.
    #[error("Language model unavailable: {0}")]
    ModelLoad(String),

    /// The input cannot be classified (empty or whitespace only).
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The model ran but no language scored above the threshold.
    #[error("No language could be detected")]
    NoCandidates,

    /// The inference task failed.
    #[error("Detection failed: {0}")]
    Inference(String),

    /// The detector did not answer in time.
    #[error("Detection timed out after {0} s")]
    Timeout(u64),
}

// ---------------------------------------------------------------------------
// LanguageDetector trait
// ---------------------------------------------------------------------------

/// Asynchronous, thread-safe language detection.
///
/// # Contract
///
/// - `text` is non-empty; callers substitute their default text first.
/// - Resolves to exactly one `Ok` or `Err`.
/// - Candidates may come back in any order.
#[async_trait]
pub trait LanguageDetector: Send + Sync {
    async fn detect(&self, text: &str) -> Result<DetectionResult, DetectorError>;
}

const _: fn() = || {
    fn _assert_object_safe(_: Box<dyn LanguageDetector>) {}
};

// ---------------------------------------------------------------------------
// UnavailableDetector
// ---------------------------------------------------------------------------

/// Fails every request with the reason the real detector could not be built,
/// so the window still opens and explains itself.
#[derive(Debug, Clone)]
pub struct UnavailableDetector {
    reason: String,
}

impl UnavailableDetector {
    pub fn new(reason: impl Into<String>) -> Self {
        Self {
            reason: reason.into(),
        }
    }
}

#[async_trait]
impl LanguageDetector for UnavailableDetector {
    async fn detect(&self, _text: &str) -> Result<DetectionResult, DetectorError> {
        Err(DetectorError::ModelLoad(self.reason.clone()))
    }
}

// ---------------------------------------------------------------------------
// MockDetector  (test-only)
// ---------------------------------------------------------------------------

#[cfg(test)]
pub struct MockDetector {
    response: Result<DetectionResult, DetectorError>,
    delay: Option<std::time::Duration>,
    seen: std::sync::Mutex<Vec<String>>,
}

#[cfg(test)]
impl MockDetector {
    /// Always resolves to `Ok(result)`.
    pub fn ok(result: DetectionResult) -> Self {
        Self {
            response: Ok(result),
            delay: None,
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Always resolves to `Err(error)`.
    pub fn err(error: DetectorError) -> Self {
        Self {
            response: Err(error),
            delay: None,
            seen: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// Sleep for `delay` before answering.
    pub fn with_delay(mut self, delay: std::time::Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    /// Every text passed to `detect`, in call order.
    pub fn seen(&self) -> Vec<String> {
        self.seen.lock().unwrap().clone()
    }
}

#[cfg(test)]
#[async_trait]
impl LanguageDetector for MockDetector {
    async fn detect(&self, text: &str) -> Result<DetectionResult, DetectorError> {
        self.seen.lock().unwrap().push(text.to_string());
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        self.response.clone()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

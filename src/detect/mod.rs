//! Language detection.
//!
//! ```text
//! LanguageDetector (trait, async)
//!   ├─ LinguaDetector       lingua model, scoring on spawn_blocking
//!   └─ UnavailableDetector  always fails with the load error
//!
//! detect(text) ──▶ DetectionResult { candidates (any order), inference_time_ms }
//! ```
//!
//! # Quick start
//!
//! ```rust,no_run
//! use language_detector::config::DetectorConfig;
//! use language_detector::detect::{LanguageDetector, LinguaDetector};
//!
//! #[tokio::main]
//! async fn main() {
//!     let detector = LinguaDetector::from_config(&DetectorConfig::default()).unwrap();
//!     let result = detector.detect("Buongiorno a tutti").await.unwrap();
//!     for candidate in result.ranked() {
//!         println!("{} {:.2}", candidate.language_code(), candidate.probability());
//!     }
//! }
//! ```

pub mod engine;
pub mod lingua_detector;
pub mod result;

// ── Public re-exports ──────────────────────────────────────────────────────

pub use engine::{DetectorError, LanguageDetector, UnavailableDetector};
pub use lingua_detector::LinguaDetector;
pub use result::{DetectionCandidate, DetectionResult};

#[cfg(test)]
pub use engine::MockDetector;

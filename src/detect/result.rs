//! Detection candidates and per-call results.

use std::cmp::Ordering;

/// One language the detector considers possible for the input text.
#[derive(Debug, Clone, PartialEq)]
pub struct DetectionCandidate {
    language_code: String,
    probability: f64,
}

impl DetectionCandidate {
    /// Create a candidate.  `probability` is clamped to `[0, 1]`; NaN is kept
    /// as-is so ranking can push it last.
    pub fn new(language_code: impl Into<String>, probability: f64) -> Self {
        Self {
            language_code: language_code.into(),
            probability: if probability.is_nan() {
                probability
            } else {
                probability.clamp(0.0, 1.0)
            },
        }
    }

    /// Short language identifier, usually ISO 639-1 (`"en"`, `"fr"` …).
    pub fn language_code(&self) -> &str {
        &self.language_code
    }

    pub fn probability(&self) -> f64 {
        self.probability
    }
}

/// Descending by probability; NaN sorts after every number.
fn by_descending_probability(a: &DetectionCandidate, b: &DetectionCandidate) -> Ordering {
    match (a.probability.is_nan(), b.probability.is_nan()) {
        (false, false) => b.probability.total_cmp(&a.probability),
        (true, false) => Ordering::Greater,
        (false, true) => Ordering::Less,
        (true, true) => Ordering::Equal,
    }
}

/// Output of a single detection call.
///
/// Candidates keep the order the detector produced them in; use
/// [`ranked`](Self::ranked) or [`top`](Self::top) before presenting them.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct DetectionResult {
    candidates: Vec<DetectionCandidate>,
    inference_time_ms: u64,
}

impl DetectionResult {
    pub fn new(candidates: Vec<DetectionCandidate>, inference_time_ms: u64) -> Self {
        Self {
            candidates,
            inference_time_ms,
        }
    }

    /// Candidates in detector order.
    pub fn candidates(&self) -> &[DetectionCandidate] {
        &self.candidates
    }

    /// Wall-clock time the detector spent on the request.
    pub fn inference_time_ms(&self) -> u64 {
        self.inference_time_ms
    }

    pub fn is_empty(&self) -> bool {
        self.candidates.is_empty()
    }

    /// Candidates sorted by descending probability.  Ties keep detector
    /// order.
    ///
    /// ```
    /// use language_detector::detect::{DetectionCandidate, DetectionResult};
    ///
    /// let result = DetectionResult::new(
    ///     vec![
    ///         DetectionCandidate::new("en", 0.2),
    ///         DetectionCandidate::new("fr", 0.9),
    ///         DetectionCandidate::new("es", 0.3),
    ///     ],
    ///     4,
    /// );
    /// let codes: Vec<_> = result.ranked().iter().map(|c| c.language_code().to_owned()).collect();
    /// assert_eq!(codes, ["fr", "es", "en"]);
    /// ```
    pub fn ranked(&self) -> Vec<DetectionCandidate> {
        let mut ranked = self.candidates.clone();
        ranked.sort_by(by_descending_probability);
        ranked
    }

    /// The most probable candidate, wherever the detector placed it.
    pub fn top(&self) -> Option<&DetectionCandidate> {
        self.candidates
            .iter()
            .reduce(|best, c| {
                if by_descending_probability(c, best) == Ordering::Less {
                    c
                } else {
                    best
                }
            })
    }
}

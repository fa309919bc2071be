//! On-device detection backed by the `lingua` crate.

use std::str::FromStr;
use std::sync::Arc;
use std::time::Instant;

use async_trait::async_trait;
use lingua::{IsoCode639_1, Language, LanguageDetectorBuilder};

use crate::config::DetectorConfig;
use crate::detect::engine::{DetectorError, LanguageDetector};
use crate::detect::result::{DetectionCandidate, DetectionResult};

/// Production detector.
///
/// The lingua model is read-only after construction, so one instance is
/// shared by every request.  Scoring runs on the blocking thread pool.
pub struct LinguaDetector {
    model: Arc<lingua::LanguageDetector>,
    languages: Vec<String>,
    min_relative_distance: f64,
    score_threshold: f64,
    max_results: Option<usize>,
}

impl std::fmt::Debug for LinguaDetector {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("LinguaDetector")
            .field("languages", &self.languages)
            .field("score_threshold", &self.score_threshold)
            .field("max_results", &self.max_results)
            .finish_non_exhaustive()
    }
}

impl LinguaDetector {
    /// Build a detector restricted to `config.languages`.
    ///
    /// # Errors
    ///
    /// [`DetectorError::ModelLoad`] when a code is not a known ISO 639-1
    /// code, names a language this build does not ship, or fewer than two
    /// distinct languages remain.
    pub fn from_config(config: &DetectorConfig) -> Result<Self, DetectorError> {
        let mut languages: Vec<Language> = Vec::with_capacity(config.languages.len());
        for code in &config.languages {
            let language = parse_language(code)?;
            if !languages.contains(&language) {
                languages.push(language);
            }
        }

        if languages.len() < 2 {
            return Err(DetectorError::ModelLoad(format!(
                "at least two languages are required, got {}",
                languages.len()
            )));
        }

        let model = LanguageDetectorBuilder::from_languages(&languages).build();
        log::info!("lingua detector ready ({} languages)", languages.len());

        Ok(Self {
            model: Arc::new(model),
            languages: languages.iter().map(language_code).collect(),
            min_relative_distance: config.min_relative_distance.max(0.0),
            score_threshold: config.score_threshold.max(0.0),
            max_results: config.max_results,
        })
    }

    /// ISO 639-1 codes this detector chooses between.
    pub fn languages(&self) -> &[String] {
        &self.languages
    }

    /// Apply the threshold, rank, then the relative-distance and
    /// max-results limits.
    fn select(&self, scores: Vec<(Language, f64)>) -> Result<Vec<DetectionCandidate>, DetectorError> {
        let mut candidates: Vec<DetectionCandidate> = scores
            .into_iter()
            .filter(|(_, p)| *p > 0.0 && *p >= self.score_threshold)
            .map(|(language, p)| DetectionCandidate::new(language_code(&language), p))
            .collect();

        candidates.sort_by(|a, b| b.probability().total_cmp(&a.probability()));

        if candidates.is_empty() {
            return Err(DetectorError::NoCandidates);
        }
        if let [first, second, ..] = candidates.as_slice() {
            if first.probability() - second.probability() < self.min_relative_distance {
                log::debug!(
                    "detect: top candidates {} and {} too close",
                    first.language_code(),
                    second.language_code()
                );
                return Err(DetectorError::NoCandidates);
            }
        }
        if let Some(max) = self.max_results {
            candidates.truncate(max.max(1));
        }
        Ok(candidates)
    }
}

#[async_trait]
impl LanguageDetector for LinguaDetector {
    async fn detect(&self, text: &str) -> Result<DetectionResult, DetectorError> {
        if text.trim().is_empty() {
            return Err(DetectorError::InvalidInput("text is empty".into()));
        }

        let model = Arc::clone(&self.model);
        let owned = text.to_string();
        let started = Instant::now();

        let scores = tokio::task::spawn_blocking(move || {
            model.compute_language_confidence_values(owned)
        })
        .await
        .map_err(|e| DetectorError::Inference(e.to_string()))?;

        let elapsed_ms = started.elapsed().as_millis() as u64;
        let candidates = self.select(scores)?;
        log::debug!(
            "detect: {} candidates in {elapsed_ms} ms, top = {}",
            candidates.len(),
            candidates[0].language_code()
        );

        Ok(DetectionResult::new(candidates, elapsed_ms))
    }
}

fn parse_language(code: &str) -> Result<Language, DetectorError> {
    let iso = IsoCode639_1::from_str(&code.trim().to_lowercase()).map_err(|_| {
        DetectorError::ModelLoad(format!("unsupported language code {code:?}"))
    })?;
    Ok(Language::from_iso_code_639_1(&iso))
}

fn language_code(language: &Language) -> String {
    language.iso_code_639_1().to_string().to_lowercase()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn config(languages: &[&str]) -> DetectorConfig {
        DetectorConfig {
            languages: languages.iter().map(|s| s.to_string()).collect(),
            ..DetectorConfig::default()
        }
    }

    #[test]
    fn rejects_unknown_code() {
        let err = LinguaDetector::from_config(&config(&["en", "qq"])).unwrap_err();
        assert!(matches!(err, DetectorError::ModelLoad(_)));
        assert!(err.to_string().contains("qq"));
    }

    #[test]
    fn rejects_single_language() {
        let err = LinguaDetector::from_config(&config(&["en", "EN"])).unwrap_err();
        assert!(matches!(err, DetectorError::ModelLoad(_)));
    }

    #[test]
    fn normalises_configured_codes() {
        let detector = LinguaDetector::from_config(&config(&["EN", " fr "])).unwrap();
        assert_eq!(detector.languages(), ["en", "fr"]);
    }

    #[tokio::test]
    async fn whitespace_is_invalid_input() {
        let detector = LinguaDetector::from_config(&config(&["en", "fr"])).unwrap();
        let err = detector.detect("   ").await.unwrap_err();
        assert!(matches!(err, DetectorError::InvalidInput(_)));
    }

    #[tokio::test]
    async fn french_sentence_ranks_french_first() {
        let detector = LinguaDetector::from_config(&DetectorConfig::default()).unwrap();
        let result = detector
            .detect("Bonjour, je voudrais réserver une table pour deux personnes ce soir.")
            .await
            .unwrap();

        assert_eq!(result.top().map(|c| c.language_code()), Some("fr"));
        let ranked = result.ranked();
        assert!(ranked
            .windows(2)
            .all(|w| w[0].probability() >= w[1].probability()));
        assert!(ranked.iter().all(|c| (0.0..=1.0).contains(&c.probability())));
    }

    #[tokio::test]
    async fn max_results_limits_candidates() {
        let mut cfg = DetectorConfig::default();
        cfg.max_results = Some(2);
        let detector = LinguaDetector::from_config(&cfg).unwrap();
        let result = detector
            .detect("Das ist ein ganz normaler deutscher Satz über das Wetter.")
            .await
            .unwrap();
        assert!(result.candidates().len() <= 2);
        assert_eq!(result.top().map(|c| c.language_code()), Some("de"));
    }

    #[tokio::test]
    async fn digits_only_have_no_candidates() {
        let detector = LinguaDetector::from_config(&config(&["en", "fr"])).unwrap();
        let err = detector.detect("1234 5678").await.unwrap_err();
        assert_eq!(err, DetectorError::NoCandidates);
    }

    #[test]
    fn select_applies_threshold_and_distance() {
        let mut cfg = config(&["en", "fr"]);
        cfg.score_threshold = 0.3;
        cfg.min_relative_distance = 0.5;
        let detector = LinguaDetector::from_config(&cfg).unwrap();

        let kept = detector
            .select(vec![(Language::English, 0.1), (Language::French, 0.9)])
            .unwrap();
        assert_eq!(kept.len(), 1);
        assert_eq!(kept[0].language_code(), "fr");

        let too_close = detector.select(vec![(Language::English, 0.45), (Language::French, 0.55)]);
        assert_eq!(too_close.unwrap_err(), DetectorError::NoCandidates);
    }
}

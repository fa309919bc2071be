//! Application settings structs, defaults and TOML persistence.
//!
//! All structs implement `Serialize`, `Deserialize`, `Default` and `Clone`
//! so they can be round-tripped through TOML files and shared across threads.

use anyhow::Result;
use serde::{Deserialize, Serialize};

use super::AppPaths;

/// Text detected when the input box is left empty.
pub const DEFAULT_TEXT: &str = "Bonjour, comment allez-vous ? J'espère que vous passez une bonne journée.";

// ---------------------------------------------------------------------------
// DetectorConfig
// ---------------------------------------------------------------------------

/// Settings for the language detector.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct DetectorConfig {
    /// Text submitted instead of an empty input.
    pub default_text: String,
    /// ISO 639-1 codes the detector chooses between.  At least two.
    pub languages: Vec<String>,
    /// Minimum probability gap between the top two candidates before the
    /// detector commits to an answer.  `0.0` always answers.
    pub min_relative_distance: f64,
    /// Candidates scoring below this probability are dropped.
    pub score_threshold: f64,
    /// Keep at most this many candidates after ranking.  `None` keeps all.
    pub max_results: Option<usize>,
    /// Seconds before a pending detection is reported as failed.
    /// `0` waits forever.
    pub timeout_secs: u64,
}

impl Default for DetectorConfig {
    fn default() -> Self {
        Self {
            default_text: DEFAULT_TEXT.into(),
            languages: ["en", "fr", "es", "de", "ar", "it", "pt", "nl", "ru", "tr"]
                .iter()
                .map(|s| s.to_string())
                .collect(),
            min_relative_distance: 0.0,
            score_threshold: 0.0,
            max_results: None,
            timeout_secs: 10,
        }
    }
}

// ---------------------------------------------------------------------------
// SpeechConfig
// ---------------------------------------------------------------------------

/// Settings for announcing the detected language.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SpeechConfig {
    /// Speak the label of the top candidate after each detection.
    pub enabled: bool,
    /// BCP-47 tag of the voice used for the labels.
    pub locale: String,
}

impl Default for SpeechConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            locale: "ar".into(),
        }
    }
}

// ---------------------------------------------------------------------------
// UiConfig
// ---------------------------------------------------------------------------

/// Window appearance and behaviour settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct UiConfig {
    /// Initial inner window size in points.
    pub window_size: (f32, f32),
    /// Keep the window floating above all other windows.
    pub always_on_top: bool,
    /// Seconds an error notification stays visible.
    pub toast_secs: u64,
    /// Extra font with Arabic glyphs (e.g. Noto Naskh Arabic), appended as a
    /// fallback to the bundled fonts.
    pub font_path: Option<std::path::PathBuf>,
}

impl Default for UiConfig {
    fn default() -> Self {
        Self {
            window_size: (420.0, 560.0),
            always_on_top: false,
            toast_secs: 2,
            font_path: None,
        }
    }
}

// ---------------------------------------------------------------------------
// AppConfig  (top-level)
// ---------------------------------------------------------------------------

/// Top-level application configuration, serialised as `settings.toml`.
///
/// # Persistence
///
/// ```rust,no_run
/// use language_detector::config::AppConfig;
///
/// // Load (returns Default when file is missing)
/// let config = AppConfig::load().unwrap();
///
/// // Modify and save
/// // config.save().unwrap();
/// ```
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Detector settings.
    pub detector: DetectorConfig,
    /// Speech output settings.
    pub speech: SpeechConfig,
    /// Window settings.
    pub ui: UiConfig,
}

impl AppConfig {
    /// Load configuration from the platform-appropriate `settings.toml`.
    ///
    /// Returns `Ok(AppConfig::default())` when the file does not exist yet.
    pub fn load() -> Result<Self> {
        Self::load_from(&AppPaths::new().settings_file)
    }

    /// Load from an explicit path.
    pub fn load_from(path: &std::path::Path) -> Result<Self> {
        if !path.exists() {
            return Ok(Self::default());
        }
        let content = std::fs::read_to_string(path)?;
        let config: Self = toml::from_str(&content)?;
        Ok(config)
    }

    /// Save configuration to the platform-appropriate `settings.toml`,
    /// creating parent directories as needed.
    pub fn save(&self) -> Result<()> {
        self.save_to(&AppPaths::new().settings_file)
    }

    /// Save to an explicit path.
    pub fn save_to(&self, path: &std::path::Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }
        let content = toml::to_string_pretty(self)?;
        std::fs::write(path, content)?;
        Ok(())
    }

    /// The detection timeout, or `None` when disabled.
    pub fn detection_timeout(&self) -> Option<std::time::Duration> {
        match self.detector.timeout_secs {
            0 => None,
            secs => Some(std::time::Duration::from_secs(secs)),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn round_trip_toml() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("settings.toml");

        let original = AppConfig::default();
        original.save_to(&path).expect("save");

        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(original.detector.default_text, loaded.detector.default_text);
        assert_eq!(original.detector.languages, loaded.detector.languages);
        assert_eq!(original.detector.max_results, loaded.detector.max_results);
        assert_eq!(original.detector.timeout_secs, loaded.detector.timeout_secs);
        assert_eq!(original.speech.enabled, loaded.speech.enabled);
        assert_eq!(original.speech.locale, loaded.speech.locale);
        assert_eq!(original.ui.window_size, loaded.ui.window_size);
        assert_eq!(original.ui.toast_secs, loaded.ui.toast_secs);
    }

    /// `load_from` on a non-existent path must return `Default` without error.
    #[test]
    fn load_missing_returns_default() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("nonexistent.toml");

        let config = AppConfig::load_from(&path).expect("should not error");
        assert_eq!(config.detector.default_text, DEFAULT_TEXT);
        assert_eq!(config.speech.locale, "ar");
    }

    #[test]
    fn default_values() {
        let cfg = AppConfig::default();

        assert!(!cfg.detector.default_text.is_empty());
        assert!(cfg.detector.languages.len() >= 2);
        for code in ["en", "fr", "es", "de", "ar", "it"] {
            assert!(cfg.detector.languages.iter().any(|l| l == code), "{code}");
        }
        assert_eq!(cfg.detector.max_results, None);
        assert_eq!(cfg.detector.timeout_secs, 10);
        assert!(cfg.speech.enabled);
        assert_eq!(cfg.speech.locale, "ar");
        assert_eq!(cfg.ui.toast_secs, 2);
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("partial.toml");
        std::fs::write(&path, "[speech]\nenabled = false\n").unwrap();

        let cfg = AppConfig::load_from(&path).expect("load");
        assert!(!cfg.speech.enabled);
        assert_eq!(cfg.speech.locale, "ar");
        assert_eq!(cfg.detector.timeout_secs, 10);
    }

    #[test]
    fn round_trip_modified_values() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("modified.toml");

        let mut cfg = AppConfig::default();
        cfg.detector.default_text = "Hello there".into();
        cfg.detector.languages = vec!["en".into(), "de".into()];
        cfg.detector.max_results = Some(3);
        cfg.detector.score_threshold = 0.05;
        cfg.detector.timeout_secs = 0;
        cfg.speech.locale = "en-GB".into();
        cfg.ui.always_on_top = true;
        cfg.ui.font_path = Some("/usr/share/fonts/NotoNaskhArabic.ttf".into());

        cfg.save_to(&path).expect("save");
        let loaded = AppConfig::load_from(&path).expect("load");

        assert_eq!(loaded.detector.default_text, "Hello there");
        assert_eq!(loaded.detector.languages, vec!["en", "de"]);
        assert_eq!(loaded.detector.max_results, Some(3));
        assert_eq!(loaded.detector.score_threshold, 0.05);
        assert_eq!(loaded.speech.locale, "en-GB");
        assert!(loaded.ui.always_on_top);
        assert_eq!(
            loaded.ui.font_path.as_deref(),
            Some(std::path::Path::new("/usr/share/fonts/NotoNaskhArabic.ttf"))
        );
        assert_eq!(loaded.detection_timeout(), None);
    }

    #[test]
    fn malformed_file_is_an_error() {
        let dir = tempdir().expect("temp dir");
        let path = dir.path().join("broken.toml");
        std::fs::write(&path, "detector = [not toml").unwrap();

        assert!(AppConfig::load_from(&path).is_err());
    }

    #[test]
    fn detection_timeout_uses_seconds() {
        let cfg = AppConfig::default();
        assert_eq!(
            cfg.detection_timeout(),
            Some(std::time::Duration::from_secs(10))
        );
    }
}

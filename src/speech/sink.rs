//! Speech sink trait and the built-in sinks that need no speech engine.

use thiserror::Error;

// ---------------------------------------------------------------------------
// SpeechError
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Error)]
pub enum SpeechError {
    /// No installed voice speaks the requested language.
    #[error("The language {0:?} is not supported by the speech engine")]
    UnsupportedLocale(String),

    /// The platform speech engine failed.
    #[error("Speech engine error: {0}")]
    Backend(String),
}

// ---------------------------------------------------------------------------
// SpeechSink trait
// ---------------------------------------------------------------------------

/// Something that can say a short text aloud.
///
/// `speak` must not block until the utterance ends; a new utterance replaces
/// whatever is still being spoken.
pub trait SpeechSink: Send + Sync {
    /// Speak `text` with a voice for `locale` (a BCP-47 tag such as `"ar"`).
    fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError>;

    /// Whether a voice for `locale` is available.
    fn supports_locale(&self, locale: &str) -> bool;
}

/// Returns `true` when the voice tag `available` can serve `wanted`.
///
/// A bare language (`"ar"`) matches any region of that language; a tag with
/// a region (`"en-GB"`) only matches the same region.  Case-insensitive,
/// `_` and `-` are interchangeable.
///
/// ```
/// use language_detector::speech::locale_matches;
///
/// assert!(locale_matches("ar-SA", "ar"));
/// assert!(!locale_matches("en-US", "en-GB"));
/// ```
pub fn locale_matches(available: &str, wanted: &str) -> bool {
    let norm = |tag: &str| tag.trim().replace('_', "-").to_ascii_lowercase();
    let available = norm(available);
    let wanted = norm(wanted);
    if wanted.is_empty() {
        return false;
    }
    if wanted.contains('-') {
        available == wanted
    } else {
        available.split('-').next() == Some(wanted.as_str())
    }
}

// ---------------------------------------------------------------------------
// LogSpeechSink
// ---------------------------------------------------------------------------

/// Writes each utterance to the log instead of the speakers.
///
/// Used when the crate is built without the `native-tts` feature.
#[derive(Debug, Default, Clone)]
pub struct LogSpeechSink;

impl SpeechSink for LogSpeechSink {
    fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
        log::info!("speech [{locale}]: {text}");
        Ok(())
    }

    fn supports_locale(&self, locale: &str) -> bool {
        !locale.trim().is_empty()
    }
}

// ---------------------------------------------------------------------------
// MutedSpeechSink
// ---------------------------------------------------------------------------

/// Accepts everything and says nothing (speech disabled in settings).
#[derive(Debug, Default, Clone)]
pub struct MutedSpeechSink;

impl SpeechSink for MutedSpeechSink {
    fn speak(&self, _text: &str, _locale: &str) -> Result<(), SpeechError> {
        Ok(())
    }

    fn supports_locale(&self, _locale: &str) -> bool {
        true
    }
}

// ---------------------------------------------------------------------------
// RecordingSpeechSink  (test-only)
// ---------------------------------------------------------------------------

/// Records utterances; fails with `UnsupportedLocale` for locales outside
/// its list.
#[cfg(test)]
pub struct RecordingSpeechSink {
    locales: Vec<String>,
    spoken: std::sync::Mutex<Vec<(String, String)>>,
}

#[cfg(test)]
impl RecordingSpeechSink {
    pub fn new(locales: &[&str]) -> Self {
        Self {
            locales: locales.iter().map(|s| s.to_string()).collect(),
            spoken: std::sync::Mutex::new(Vec::new()),
        }
    }

    /// `(text, locale)` pairs, in order.
    pub fn spoken(&self) -> Vec<(String, String)> {
        self.spoken.lock().unwrap().clone()
    }
}

#[cfg(test)]
impl SpeechSink for RecordingSpeechSink {
    fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
        if !self.supports_locale(locale) {
            return Err(SpeechError::UnsupportedLocale(locale.to_string()));
        }
        self.spoken
            .lock()
            .unwrap()
            .push((text.to_string(), locale.to_string()));
        Ok(())
    }

    fn supports_locale(&self, locale: &str) -> bool {
        self.locales.iter().any(|l| locale_matches(l, locale))
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

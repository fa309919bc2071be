//! Platform speech engine via the `tts` crate (`native-tts` feature).

use std::sync::Mutex;

use tts::Tts;

use crate::speech::sink::{locale_matches, SpeechError, SpeechSink};

/// Speaks through the operating system's TTS service.
///
/// The voice is re-selected only when the requested locale changes.
pub struct NativeSpeechSink {
    inner: Mutex<NativeState>,
}

struct NativeState {
    tts: Tts,
    locale: Option<String>,
}

impl NativeSpeechSink {
    /// Connect to the platform speech engine.
    pub fn new() -> Result<Self, SpeechError> {
        let tts = Tts::default().map_err(|e| SpeechError::Backend(e.to_string()))?;
        Ok(Self {
            inner: Mutex::new(NativeState { tts, locale: None }),
        })
    }

    fn voice_languages(tts: &Tts) -> Vec<String> {
        match tts.voices() {
            Ok(voices) => voices
                .iter()
                .map(|v| v.language().as_str().to_string())
                .collect(),
            Err(e) => {
                log::debug!("speech: cannot list voices: {e}");
                Vec::new()
            }
        }
    }
}

impl NativeState {
    fn select_voice(&mut self, locale: &str) -> Result<(), SpeechError> {
        if self.locale.as_deref() == Some(locale) {
            return Ok(());
        }
        let voices = self
            .tts
            .voices()
            .map_err(|e| SpeechError::Backend(e.to_string()))?;
        let voice = voices
            .into_iter()
            .find(|v| locale_matches(v.language().as_str(), locale))
            .ok_or_else(|| SpeechError::UnsupportedLocale(locale.to_string()))?;
        self.tts
            .set_voice(&voice)
            .map_err(|e| SpeechError::Backend(e.to_string()))?;
        self.locale = Some(locale.to_string());
        Ok(())
    }
}

impl SpeechSink for NativeSpeechSink {
    fn speak(&self, text: &str, locale: &str) -> Result<(), SpeechError> {
        let mut state = self
            .inner
            .lock()
            .map_err(|e| SpeechError::Backend(format!("speech lock poisoned: {e}")))?;
        state.select_voice(locale)?;
        state
            .tts
            .speak(text, true)
            .map_err(|e| SpeechError::Backend(e.to_string()))?;
        Ok(())
    }

    fn supports_locale(&self, locale: &str) -> bool {
        let Ok(state) = self.inner.lock() else {
            return false;
        };
        Self::voice_languages(&state.tts)
            .iter()
            .any(|tag| locale_matches(tag, locale))
    }
}

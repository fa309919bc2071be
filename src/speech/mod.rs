//! Speech output for the detected language's label.
//!
//! * [`SpeechSink`]: trait the presenter speaks through.
//! * [`LogSpeechSink`]: logs utterances (default build).
//! * [`MutedSpeechSink`]: used when speech is disabled in settings.
//! * `NativeSpeechSink`: platform TTS, behind the `native-tts` feature.
//!
//! An unsupported locale is a diagnostic, never a user-facing error: the
//! label is still shown in the result list.

#[cfg(feature = "native-tts")]
pub mod native;
pub mod sink;

use std::sync::Arc;

use crate::config::SpeechConfig;

#[cfg(feature = "native-tts")]
pub use native::NativeSpeechSink;
pub use sink::{locale_matches, LogSpeechSink, MutedSpeechSink, SpeechError, SpeechSink};

#[cfg(test)]
pub use sink::RecordingSpeechSink;

/// Build the sink described by `config` and report whether its locale has a
/// voice.  Never fails: an engine that cannot start degrades to
/// [`LogSpeechSink`].
pub fn sink_from_config(config: &SpeechConfig) -> Arc<dyn SpeechSink> {
    if !config.enabled {
        log::info!("speech disabled in settings");
        return Arc::new(MutedSpeechSink);
    }

    let sink = platform_sink();
    if !sink.supports_locale(&config.locale) {
        log::error!(
            "speech: {}",
            SpeechError::UnsupportedLocale(config.locale.clone())
        );
    }
    sink
}

#[cfg(feature = "native-tts")]
fn platform_sink() -> Arc<dyn SpeechSink> {
    match NativeSpeechSink::new() {
        Ok(sink) => Arc::new(sink),
        Err(e) => {
            log::warn!("speech: native engine unavailable ({e}); logging labels instead");
            Arc::new(LogSpeechSink)
        }
    }
}

#[cfg(not(feature = "native-tts"))]
fn platform_sink() -> Arc<dyn SpeechSink> {
    Arc::new(LogSpeechSink)
}

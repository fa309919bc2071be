//! Configuration module.
//!
//! Provides `AppConfig` (top-level settings), sub-configs for the detector,
//! speech output and window, `AppPaths` for the platform config directory,
//! and TOML persistence via `AppConfig::load` / `AppConfig::save`.

pub mod paths;
pub mod settings;

pub use paths::AppPaths;
pub use settings::{AppConfig, DetectorConfig, SpeechConfig, UiConfig, DEFAULT_TEXT};

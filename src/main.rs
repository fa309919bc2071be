//! Application entry point: Language Detector.
//!
//! # Startup sequence
//!
//! 1. Initialise logging.
//! 2. Load [`AppConfig`] from disk (returns default on first run).
//! 3. Create the [`tokio`] runtime (multi-thread, 2 workers).
//! 4. Build the lingua detector (or a stand-in that reports why it failed).
//! 5. Build the speech sink and check its locale.
//! 6. Wire coordinator → channel → presenter.
//! 7. Run [`eframe::run_native`]: blocks the main thread until the window
//!    is closed.

use std::sync::Arc;

use eframe::egui;
use language_detector::{
    app::{install_fallback_font, LanguageDetectorApp},
    config::AppConfig,
    detect::{LanguageDetector, LinguaDetector, UnavailableDetector},
    pipeline::{ChannelListener, DetectionCoordinator, ResultPresenter},
    speech,
};

fn native_options(config: &AppConfig) -> eframe::NativeOptions {
    let (width, height) = config.ui.window_size;
    let mut vp = egui::ViewportBuilder::default()
        .with_title("Language Detector")
        .with_inner_size([width, height])
        .with_min_inner_size([320.0, 400.0]);

    if config.ui.always_on_top {
        vp = vp.with_always_on_top();
    }

    eframe::NativeOptions {
        viewport: vp,
        ..Default::default()
    }
}

fn main() -> eframe::Result<()> {
    // 1. Logging
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Language Detector starting up");

    // 2. Configuration
    let config = AppConfig::load().unwrap_or_else(|e| {
        log::warn!("Failed to load config ({e}); using defaults");
        AppConfig::default()
    });

    // 3. Tokio runtime
    let rt = tokio::runtime::Builder::new_multi_thread()
        .worker_threads(2)
        .enable_all()
        .build()
        .expect("failed to create tokio runtime");

    // 4. Detector
    let detector: Arc<dyn LanguageDetector> = match LinguaDetector::from_config(&config.detector) {
        Ok(detector) => {
            log::info!("Detector languages: {}", detector.languages().join(", "));
            Arc::new(detector)
        }
        Err(e) => {
            log::error!("Could not build detector: {e}. Every request will fail.");
            Arc::new(UnavailableDetector::new(e.to_string()))
        }
    };

    // 5. Speech
    let speech = speech::sink_from_config(&config.speech);

    // 6. Pipeline wiring
    let (listener, event_rx) = ChannelListener::new();
    let coordinator =
        DetectionCoordinator::from_config(&config, detector, Arc::new(listener), rt.handle().clone());
    let presenter = ResultPresenter::new(speech, config.speech.locale.clone());

    // 7. Window
    let font_path = config.ui.font_path.clone();
    let app = LanguageDetectorApp::new(coordinator, presenter, event_rx, config.clone());
    let options = native_options(&config);

    let result = eframe::run_native(
        "Language Detector",
        options,
        Box::new(move |cc| {
            if let Some(path) = font_path {
                match install_fallback_font(&cc.egui_ctx, &path) {
                    Ok(()) => log::info!("Loaded label font {}", path.display()),
                    Err(e) => log::warn!("Could not load font {} ({e})", path.display()),
                }
            }
            Ok(Box::new(app))
        }),
    );

    rt.shutdown_background();
    result
}

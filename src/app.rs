//! Language detector window: egui/eframe application.
//!
//! # Architecture
//!
//! [`LanguageDetectorApp`] is the top-level [`eframe::App`].  It owns the
//! [`ResultView`] and is the only code that mutates it:
//!
//! * the Detect button calls [`DetectionCoordinator::detect`] and records the
//!   request with the [`ResultPresenter`];
//! * every frame, finished requests are drained from `event_rx` and applied
//!   through the presenter, so results always land on the UI thread.
//!
//! # Layout
//!
//! | Area | Content |
//! |------|---------|
//! | Top | Multiline input (hint = default text) + Detect button |
//! | Bottom panel | Inference time + ranked list (code, label, probability) |
//! | Overlay | Error notification, cleared after `ui.toast_secs` |

use std::path::Path;
use std::sync::Arc;
use std::time::{Duration, Instant};

use eframe::egui;
use tokio::sync::mpsc;

use crate::config::AppConfig;
use crate::pipeline::{
    DetectionCoordinator, DetectionEvent, DetectionState, ResultPresenter, ResultView,
};

// ---------------------------------------------------------------------------
// LanguageDetectorApp
// ---------------------------------------------------------------------------

pub struct LanguageDetectorApp {
    // ── Input ────────────────────────────────────────────────────────────
    /// Text typed by the user.
    pub input: String,

    // ── Presentation ─────────────────────────────────────────────────────
    view: ResultView,
    presenter: ResultPresenter,

    // ── Pipeline ─────────────────────────────────────────────────────────
    coordinator: DetectionCoordinator,
    event_rx: mpsc::UnboundedReceiver<DetectionEvent>,

    // ── UI state ─────────────────────────────────────────────────────────
    show_settings: bool,
    spinner_phase: f32,

    /// Application configuration (read-only after startup).
    pub config: AppConfig,
}

impl LanguageDetectorApp {
    /// Create a new [`LanguageDetectorApp`].
    ///
    /// * `coordinator`: submits detection requests.
    /// * `presenter`  : applies finished requests to the view and speaks.
    /// * `event_rx`   : receiver paired with the coordinator's
    ///   `ChannelListener`.
    pub fn new(
        coordinator: DetectionCoordinator,
        presenter: ResultPresenter,
        event_rx: mpsc::UnboundedReceiver<DetectionEvent>,
        config: AppConfig,
    ) -> Self {
        Self {
            input: String::new(),
            view: ResultView::new(),
            presenter,
            coordinator,
            event_rx,
            show_settings: false,
            spinner_phase: 0.0,
            config,
        }
    }

    pub fn view(&self) -> &ResultView {
        &self.view
    }

    // ── Actions ──────────────────────────────────────────────────────────

    /// Submit the current input.  Ignored while a request is in flight.
    pub fn submit(&mut self) {
        if self.view.state.is_busy() {
            log::debug!("app: detect ignored, request still pending");
            return;
        }
        let pending = self.coordinator.detect(&self.input);
        self.presenter.begin(pending.id());
        self.view.start_detecting();
    }

    /// Apply every finished request (non-blocking).
    pub fn poll_events(&mut self) {
        while let Ok(event) = self.event_rx.try_recv() {
            self.presenter.apply(event, &mut self.view);
        }
    }

    fn toast_ttl(&self) -> Duration {
        Duration::from_secs(self.config.ui.toast_secs.max(1))
    }

    // ── Panels ───────────────────────────────────────────────────────────

    fn draw_header(&mut self, ui: &mut egui::Ui) {
        ui.horizontal(|ui| {
            ui.label(
                egui::RichText::new("Language Detector")
                    .color(egui::Color32::from_rgb(200, 200, 200))
                    .size(15.0),
            );
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                if ui
                    .add(egui::Button::new(egui::RichText::new("=").size(12.0)).frame(false))
                    .clicked()
                {
                    self.show_settings = !self.show_settings;
                }
                ui.label(
                    egui::RichText::new(self.view.state.label())
                        .color(self.state_color())
                        .size(12.0),
                );
            });
        });
    }

    fn draw_input(&mut self, ui: &mut egui::Ui) {
        let hint = self.coordinator.default_text().to_string();
        ui.add(
            egui::TextEdit::multiline(&mut self.input)
                .hint_text(hint)
                .desired_rows(5)
                .desired_width(f32::INFINITY),
        );

        ui.add_space(6.0);
        ui.horizontal(|ui| {
            let busy = self.view.state.is_busy();
            let clicked = ui
                .add_enabled(!busy, egui::Button::new(egui::RichText::new("Detect").size(14.0)))
                .clicked();
            let shortcut = ui.input(|i| i.key_pressed(egui::Key::Enter) && i.modifiers.command);
            if clicked || (shortcut && !busy) {
                self.submit();
            }
            if busy {
                ui.label(
                    egui::RichText::new(self.spinner_char().to_string())
                        .color(egui::Color32::from_rgb(68, 136, 255)),
                );
            }
        });
    }

    fn draw_results(&self, ui: &mut egui::Ui) {
        ui.add_space(4.0);
        ui.horizontal(|ui| {
            ui.label(egui::RichText::new("Inference time").size(12.0));
            ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                ui.label(
                    egui::RichText::new(self.view.inference_time.as_deref().unwrap_or("-"))
                        .size(12.0),
                );
            });
        });
        ui.separator();

        if self.view.rows.is_empty() {
            ui.label(
                egui::RichText::new("No results yet")
                    .color(egui::Color32::from_rgb(120, 120, 120))
                    .size(12.0),
            );
            return;
        }

        egui::ScrollArea::vertical().show(ui, |ui| {
            egui::Grid::new("results")
                .num_columns(3)
                .striped(true)
                .show(ui, |ui| {
                    for (i, row) in self.view.rows.iter().enumerate() {
                        let color = if i == 0 {
                            egui::Color32::from_rgb(80, 200, 120)
                        } else {
                            egui::Color32::from_rgb(180, 180, 180)
                        };
                        ui.label(egui::RichText::new(&row.language_code).color(color));
                        ui.label(egui::RichText::new(row.label).color(color));
                        ui.label(egui::RichText::new(row.percent()).color(color));
                        ui.end_row();
                    }
                });
        });
    }

    fn draw_notification(&self, ctx: &egui::Context) {
        let Some(notification) = &self.view.notification else {
            return;
        };
        egui::Area::new(egui::Id::new("notification"))
            .anchor(egui::Align2::CENTER_BOTTOM, egui::vec2(0.0, -24.0))
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(
                        egui::RichText::new(notification.message.as_str())
                            .color(egui::Color32::from_rgb(255, 136, 68))
                            .size(12.0),
                    );
                });
            });
    }

    fn draw_settings(&self, ui: &mut egui::Ui) {
        let line = |ui: &mut egui::Ui, text: String| {
            ui.label(
                egui::RichText::new(text)
                    .color(egui::Color32::from_rgb(140, 140, 140))
                    .size(11.0),
            );
        };
        ui.add_space(4.0);
        line(ui, format!("Languages: {}", self.config.detector.languages.join(", ")));
        line(ui, format!("Timeout: {} s", self.config.detector.timeout_secs));
        line(
            ui,
            format!(
                "Speech: {} ({})",
                if self.config.speech.enabled { "on" } else { "off" },
                self.config.speech.locale
            ),
        );
    }

    // ── Helpers ──────────────────────────────────────────────────────────

    fn spinner_char(&self) -> char {
        let chars = ['|', '/', '-', '\\'];
        let idx = (self.spinner_phase as usize) % chars.len();
        chars[idx]
    }

    fn state_color(&self) -> egui::Color32 {
        match self.view.state {
            DetectionState::Idle => egui::Color32::from_rgb(120, 120, 120),
            DetectionState::Detecting => egui::Color32::from_rgb(68, 136, 255),
            DetectionState::Result => egui::Color32::from_rgb(80, 200, 120),
            DetectionState::Error => egui::Color32::from_rgb(255, 136, 68),
        }
    }
}

// ---------------------------------------------------------------------------
// eframe::App impl
// ---------------------------------------------------------------------------

impl eframe::App for LanguageDetectorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.poll_events();
        self.view.expire_notification(Instant::now(), self.toast_ttl());

        self.spinner_phase += 0.08;
        if self.spinner_phase >= 4.0 {
            self.spinner_phase = 0.0;
        }

        if self.view.state.is_busy() {
            // Keep polling the channel and animating the spinner.
            ctx.request_repaint_after(Duration::from_millis(66));
        } else if self.view.notification.is_some() {
            ctx.request_repaint_after(Duration::from_millis(500));
        }

        egui::TopBottomPanel::bottom("results_panel")
            .resizable(true)
            .min_height(180.0)
            .show(ctx, |ui| self.draw_results(ui));

        egui::CentralPanel::default().show(ctx, |ui| {
            self.draw_header(ui);
            ui.separator();
            if self.show_settings {
                self.draw_settings(ui);
                ui.separator();
            }
            self.draw_input(ui);
        });

        self.draw_notification(ctx);
    }

    fn on_exit(&mut self, _gl: Option<&eframe::glow::Context>) {
        log::info!("language detector window closing");
    }
}

// ---------------------------------------------------------------------------
// Fonts
// ---------------------------------------------------------------------------

/// Append the font at `path` as a fallback for proportional and monospace
/// text.  The bundled egui fonts carry no Arabic glyphs.
pub fn install_fallback_font(ctx: &egui::Context, path: &Path) -> anyhow::Result<()> {
    let bytes = std::fs::read(path)?;
    let name = "label-fallback".to_string();

    let mut fonts = egui::FontDefinitions::default();
    fonts
        .font_data
        .insert(name.clone(), Arc::new(egui::FontData::from_owned(bytes)));
    for family in [egui::FontFamily::Proportional, egui::FontFamily::Monospace] {
        fonts.families.entry(family).or_default().push(name.clone());
    }
    ctx.set_fonts(fonts);
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

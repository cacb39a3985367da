//! Main application for the YouTube audio downloader GUI

// yt-dlp process spawning and argument assembly
mod downloader;
// ffmpeg PATH detection
mod ffmpeg;
// Data models shared between worker and UI
mod model;
// Progress template parsing
mod progress;
// URL shape validation
mod validator;
// Idle/Busy state machine owning all UI-visible state
mod controller;

use controller::{Controller, StatusTone};
use downloader::spawn_download;
use model::{AudioFormat, WorkerMessage};

// eframe/egui for GUI application framework
use eframe::{egui, App, Frame};
// OnceCell for single-time runtime initialization
use once_cell::sync::OnceCell;
use std::sync::Arc;
use tokio::{
    runtime::Runtime,
    sync::mpsc::{unbounded_channel, UnboundedReceiver},
};
use egui::{Color32, Visuals};

// Global Tokio runtime stored in a OnceCell for lazy init
static RUNTIME: OnceCell<Arc<Runtime>> = OnceCell::new();

/// Program entry point: initializes diagnostics and runtime, launches GUI
fn main() -> Result<(), eframe::Error> {
    tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    // Create a new Tokio runtime and store it globally
    let rt = Arc::new(Runtime::new().expect("failed to build tokio runtime"));
    RUNTIME.set(rt).expect("runtime already initialized");

    let options = eframe::NativeOptions {
        viewport: egui::ViewportBuilder::default().with_inner_size([550.0, 380.0]),
        ..Default::default()
    };
    eframe::run_native(
        "Music Downloader from YouTube",
        options,
        Box::new(|cc| {
            // Use dark theme visuals
            cc.egui_ctx.set_visuals(Visuals::dark());
            Box::new(DownloaderApp::new())
        }),
    )
}

/// Application shell: owns the controller, the worker channel, and nothing else
struct DownloaderApp {
    /// All UI-visible state and the Idle/Busy transitions
    controller: Controller,
    /// ffmpeg availability, checked once at startup
    tool_status: ffmpeg::ToolStatus,
    /// Receiving end of the in-flight worker's channel, if any
    worker_rx: Option<UnboundedReceiver<WorkerMessage>>,
}

impl DownloaderApp {
    fn new() -> Self {
        Self {
            controller: Controller::default(),
            tool_status: ffmpeg::check(),
            worker_rx: None,
        }
    }

    /// Captures a request from the controller and spawns the worker task.
    /// No-op when the controller refuses (invalid URL or already Busy).
    fn start_download(&mut self) {
        if let Some(request) = self.controller.try_start() {
            let (tx, rx) = unbounded_channel();
            self.worker_rx = Some(rx);
            if let Some(rt) = RUNTIME.get() {
                rt.spawn(spawn_download(request, tx));
            }
        }
    }

    fn status_color(tone: StatusTone) -> Color32 {
        match tone {
            StatusTone::Info => Color32::LIGHT_BLUE,
            StatusTone::Success => Color32::LIGHT_GREEN,
            StatusTone::Error => Color32::LIGHT_RED,
        }
    }
}

/// GUI update loop: called each frame to redraw and handle interactions
impl App for DownloaderApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut Frame) {
        // Drain pending worker messages before drawing; the channel keeps
        // progress ordered ahead of the terminal Done message.
        if let Some(rx) = self.worker_rx.as_mut() {
            while let Ok(message) = rx.try_recv() {
                let done = matches!(message, WorkerMessage::Done(_));
                self.controller.apply(message);
                if done {
                    self.worker_rx = None;
                    break;
                }
            }
        }

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.vertical_centered(|ui| {
                ui.heading("Music Downloader from YouTube");
                let tool_color = if self.tool_status.ok {
                    Color32::LIGHT_GREEN
                } else {
                    Color32::from_rgb(255, 180, 80)
                };
                ui.colored_label(tool_color, &self.tool_status.message);
            });
            ui.separator();

            let enabled = self.controller.controls_enabled();

            // URL input field
            ui.label("Paste the video or playlist URL:");
            ui.add_enabled(
                enabled,
                egui::TextEdit::singleline(&mut self.controller.url_input)
                    .desired_width(f32::INFINITY),
            );
            ui.add_space(8.0);

            // Format dropdown and thumbnail toggle
            ui.horizontal(|ui| {
                ui.label("Format:");
                ui.add_enabled_ui(enabled, |ui| {
                    egui::ComboBox::from_id_source("format")
                        .selected_text(self.controller.format.to_string())
                        .show_ui(ui, |ui| {
                            for format in AudioFormat::ALL {
                                ui.selectable_value(
                                    &mut self.controller.format,
                                    format,
                                    format.to_string(),
                                );
                            }
                        });
                });
                ui.add_enabled(
                    enabled,
                    egui::Checkbox::new(&mut self.controller.embed_thumbnail, "Embed cover art"),
                );
            });
            ui.add_space(12.0);

            // Download trigger
            ui.vertical_centered(|ui| {
                if ui.add_enabled(enabled, egui::Button::new("Download")).clicked() {
                    self.start_download();
                }
            });
            ui.add_space(12.0);

            // Progress indicator: bar with percentage while downloading,
            // spinner while yt-dlp post-processes (no determinate fraction)
            if self.controller.progress.visible {
                ui.horizontal(|ui| {
                    match self.controller.progress.fraction {
                        Some(fraction) => {
                            ui.add(egui::ProgressBar::new(fraction).desired_width(400.0));
                            ui.label(&self.controller.progress.label);
                        }
                        None => {
                            ui.spinner();
                        }
                    }
                });
            }

            // Status line
            if let Some(status) = &self.controller.status {
                ui.colored_label(Self::status_color(status.tone), &status.text);
            }
        });

        // Request periodic repaint so worker messages are picked up
        ctx.request_repaint_after(std::time::Duration::from_millis(100));
    }
}

use crate::model::{AudioFormat, DownloadRequest, ProgressEvent, WorkerMessage};
use crate::validator::is_valid_youtube_url;

/// Lifecycle of the one allowed in-flight download
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Phase {
    Idle,
    Busy,
}

/// Rendering emphasis for the status line
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatusTone {
    Info,
    Success,
    Error,
}

#[derive(Debug, Clone)]
pub struct StatusLine {
    pub text: String,
    pub tone: StatusTone,
}

/// Progress indicator state. `fraction == None` while visible means
/// indeterminate (post-processing is running, show a busy indicator).
#[derive(Debug, Clone)]
pub struct ProgressDisplay {
    pub visible: bool,
    pub fraction: Option<f32>,
    pub label: String,
}

/// Owns everything the window shows, as plain data. The egui shell renders
/// from it each frame and funnels every mutation through the transition
/// methods below, so tests can drive the whole flow without a window.
pub struct Controller {
    pub url_input: String,
    pub format: AudioFormat,
    pub embed_thumbnail: bool,
    pub phase: Phase,
    pub status: Option<StatusLine>,
    pub progress: ProgressDisplay,
}

impl Default for Controller {
    fn default() -> Self {
        Self {
            url_input: String::new(),
            format: AudioFormat::Mp3,
            embed_thumbnail: true,
            phase: Phase::Idle,
            status: None,
            progress: ProgressDisplay {
                visible: false,
                fraction: None,
                label: String::new(),
            },
        }
    }
}

impl Controller {
    /// Input widgets and the download trigger are live only while Idle
    pub fn controls_enabled(&self) -> bool {
        self.phase == Phase::Idle
    }

    /// Idle -> Busy transition, guarded by URL validation. Returns the
    /// captured request for the caller to hand to a worker, or None when
    /// nothing was started (already Busy, or the URL failed validation).
    pub fn try_start(&mut self) -> Option<DownloadRequest> {
        if self.phase == Phase::Busy {
            return None;
        }
        let url = self.url_input.trim().to_string();
        if !is_valid_youtube_url(&url) {
            self.set_status("Please enter a valid YouTube URL.", StatusTone::Error);
            return None;
        }

        self.phase = Phase::Busy;
        self.progress = ProgressDisplay {
            visible: true,
            fraction: Some(0.0),
            label: String::new(),
        };
        self.set_status("Starting download...", StatusTone::Info);

        Some(DownloadRequest {
            url,
            format: self.format,
            embed_thumbnail: self.embed_thumbnail,
        })
    }

    /// Applies one worker message. Progress updates mutate the indicator in
    /// place; the terminal Done message performs the Busy -> Idle transition
    /// unconditionally. Messages arriving while Idle cannot happen (the
    /// worker only sends while running) and are dropped.
    pub fn apply(&mut self, message: WorkerMessage) {
        if self.phase == Phase::Idle {
            return;
        }
        match message {
            WorkerMessage::Progress(ProgressEvent::Downloading { fraction, label }) => {
                self.progress.fraction = Some(fraction);
                self.progress.label = label;
            }
            WorkerMessage::Progress(ProgressEvent::Finished) => {
                self.progress.fraction = None;
                self.progress.label.clear();
                self.set_status("Processing file...", StatusTone::Info);
            }
            WorkerMessage::Done(result) => {
                self.phase = Phase::Idle;
                self.progress.visible = false;
                match result {
                    Ok(message) => {
                        // Clear the URL so the next paste starts fresh
                        self.url_input.clear();
                        self.set_status(&message, StatusTone::Success);
                    }
                    Err(message) => {
                        // URL stays put so the user can retry without re-typing
                        self.set_status(&format!("Error: {}", message), StatusTone::Error);
                    }
                }
            }
        }
    }

    fn set_status(&mut self, text: &str, tone: StatusTone) {
        self.status = Some(StatusLine {
            text: text.to_string(),
            tone,
        });
    }
}

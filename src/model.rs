use std::fmt;

/// Audio container/codec the user can pick in the format dropdown
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AudioFormat {
    Mp3,
    M4a,
    Wav,
}

impl AudioFormat {
    /// All selectable formats, in dropdown order
    pub const ALL: [AudioFormat; 3] = [AudioFormat::Mp3, AudioFormat::M4a, AudioFormat::Wav];

    /// yt-dlp `--audio-format` value
    pub fn as_str(&self) -> &'static str {
        match self {
            AudioFormat::Mp3 => "mp3",
            AudioFormat::M4a => "m4a",
            AudioFormat::Wav => "wav",
        }
    }

    /// wav containers cannot carry embedded art; embedding is skipped for them
    pub fn supports_cover_art(&self) -> bool {
        matches!(self, AudioFormat::Mp3 | AudioFormat::M4a)
    }
}

impl fmt::Display for AudioFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the worker needs for one download, captured from the UI
/// fields at trigger time. Immutable once built; moved into the worker.
#[derive(Debug, Clone)]
pub struct DownloadRequest {
    /// Trimmed YouTube video or playlist URL
    pub url: String,
    /// Target audio format for the transcode step
    pub format: AudioFormat,
    /// Embed the video thumbnail as cover art (mp3/m4a only)
    pub embed_thumbnail: bool,
}

/// Progress reported while one download runs
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressEvent {
    /// Raw download in flight with a known total size
    Downloading { fraction: f32, label: String },
    /// Raw download done; yt-dlp post-processing (transcode/embed) still running
    Finished,
}

/// Single channel type carried from the worker task to the UI thread.
/// All `Progress` messages for a request precede its one `Done`.
#[derive(Debug, Clone)]
pub enum WorkerMessage {
    Progress(ProgressEvent),
    Done(Result<String, String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_strings() {
        assert_eq!(AudioFormat::Mp3.as_str(), "mp3");
        assert_eq!(AudioFormat::M4a.to_string(), "m4a");
        assert_eq!(AudioFormat::Wav.to_string(), "wav");
    }

    #[test]
    fn cover_art_support() {
        assert!(AudioFormat::Mp3.supports_cover_art());
        assert!(AudioFormat::M4a.supports_cover_art());
        assert!(!AudioFormat::Wav.supports_cover_art());
    }
}

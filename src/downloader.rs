use std::process::Stdio;

use thiserror::Error;
use tokio::{
    io::{AsyncBufReadExt, BufReader},
    process::Command,
    sync::mpsc::UnboundedSender,
};
use tracing::{debug, info, warn};

use crate::model::{DownloadRequest, WorkerMessage};
use crate::progress;

/// Fixed output directory, relative to the process working directory
pub const DOWNLOAD_DIR: &str = "downloads";

/// Marker yt-dlp puts in front of its error lines on stderr
const ERROR_MARKER: &str = "ERROR:";

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("could not create '{DOWNLOAD_DIR}' directory: {0}")]
    OutputDir(std::io::Error),
    #[error("could not start yt-dlp: {0}")]
    SpawnFailed(std::io::Error),
    #[error("{0}")]
    ToolFailed(String),
}

/// Builds the yt-dlp argument bundle for one request: best audio stream,
/// title-templated output name, transcode to the requested format at 192k,
/// and optionally thumbnail download + embedding. The thumbnail is fetched
/// whenever embedding was asked for, but actually embedded only into
/// formats whose container supports cover art (wav silently skips it).
pub fn build_args(request: &DownloadRequest) -> Vec<String> {
    let mut args = vec![
        "-f".to_owned(),
        "bestaudio/best".to_owned(),
        "-x".to_owned(),
        "--audio-format".to_owned(),
        request.format.as_str().to_owned(),
        "--audio-quality".to_owned(),
        "192K".to_owned(),
    ];

    if request.embed_thumbnail {
        args.push("--write-thumbnail".to_owned());
        if request.format.supports_cover_art() {
            args.push("--embed-thumbnail".to_owned());
        }
    }

    args.push("--newline".to_owned());
    args.push("--progress-template".to_owned());
    args.push(progress::TEMPLATE.to_owned());

    args.push("-o".to_owned());
    args.push(format!("{}/%(title)s.%(ext)s", DOWNLOAD_DIR));
    args.push(request.url.clone());
    args
}

/// Trims a failure down to its user-facing text: everything after the last
/// "ERROR:" marker, or the raw message when the marker is absent. The marker
/// split is a heuristic over yt-dlp's free-form output and is kept as-is.
pub fn extract_error_message(raw: &str) -> String {
    match raw.rfind(ERROR_MARKER) {
        Some(pos) => raw[pos + ERROR_MARKER.len()..].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// Runs one download to completion on the worker task. Streams progress
/// events over `tx` while yt-dlp runs, then sends exactly one terminal
/// `WorkerMessage::Done` - on every exit path, success or failure.
pub async fn spawn_download(request: DownloadRequest, tx: UnboundedSender<WorkerMessage>) {
    let result = run(&request, &tx).await.map_err(|e| {
        warn!(url = %request.url, error = %e, "download failed");
        extract_error_message(&e.to_string())
    });
    let _ = tx.send(WorkerMessage::Done(result));
}

async fn run(
    request: &DownloadRequest,
    tx: &UnboundedSender<WorkerMessage>,
) -> Result<String, DownloadError> {
    std::fs::create_dir_all(DOWNLOAD_DIR).map_err(DownloadError::OutputDir)?;

    let args = build_args(request);
    info!(url = %request.url, format = %request.format, "starting yt-dlp");

    let mut child = Command::new("yt-dlp")
        .args(&args)
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .spawn()
        .map_err(DownloadError::SpawnFailed)?;

    // Progress template lines arrive on stdout; errors accumulate on stderr.
    let stdout = child.stdout.take();
    let stderr = child.stderr.take();

    let stderr_task = tokio::spawn(async move {
        let mut collected = String::new();
        if let Some(err) = stderr {
            let mut lines = BufReader::new(err).lines();
            while let Ok(Some(line)) = lines.next_line().await {
                debug!("yt-dlp stderr: {}", line);
                collected.push_str(&line);
                collected.push('\n');
            }
        }
        collected
    });

    if let Some(out) = stdout {
        let mut lines = BufReader::new(out).lines();
        while let Ok(Some(line)) = lines.next_line().await {
            if let Some(event) = progress::parse_progress_line(&line) {
                let _ = tx.send(WorkerMessage::Progress(event));
            }
        }
    }

    let status = child
        .wait()
        .await
        .map_err(|e| DownloadError::ToolFailed(e.to_string()))?;
    let stderr_text = stderr_task.await.unwrap_or_default();

    if status.success() {
        info!(url = %request.url, "download finished");
        Ok(format!("Download completed in '{}'!", DOWNLOAD_DIR))
    } else {
        Err(DownloadError::ToolFailed(stderr_text))
    }
}

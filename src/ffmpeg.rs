/// Startup status of the external transcoding tool
pub struct ToolStatus {
    pub ok: bool,
    pub message: String,
}

/// Looks up ffmpeg on the host PATH. Absence is a normal outcome reported
/// as a warning; downloads are still attempted without it.
pub fn check() -> ToolStatus {
    match which::which("ffmpeg") {
        Ok(_) => ToolStatus {
            ok: true,
            message: "FFmpeg found.".to_string(),
        },
        Err(_) => ToolStatus {
            ok: false,
            message: "FFmpeg not found. Conversion may fail.".to_string(),
        },
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_never_panics_and_reports_a_message() {
        let status = check();
        assert!(!status.message.is_empty());
        if status.ok {
            assert_eq!(status.message, "FFmpeg found.");
        } else {
            assert_eq!(status.message, "FFmpeg not found. Conversion may fail.");
        }
    }
}

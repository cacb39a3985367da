use crate::model::ProgressEvent;

/// Prefix yt-dlp is told to put on every progress line (see downloader.rs).
pub const TEMPLATE_PREFIX: &str = "progress:";

/// Template passed to yt-dlp's `--progress-template`. Fields that are not
/// known yet render as "NA", which simply fails the numeric parse below.
pub const TEMPLATE: &str = "progress:%(progress.status)s|%(progress.downloaded_bytes)s|%(progress.total_bytes)s|%(progress.total_bytes_estimate)s";

/// Parses one yt-dlp stdout line into a progress event.
///
/// Only templated lines count; everything else yt-dlp prints is ignored.
/// While downloading, an event is produced only when a total size is known
/// (exact total preferred over the estimate) - with no total the previous
/// UI value is simply kept. The "finished" status marks the end of the raw
/// download; transcoding/embedding may still be running after it.
pub fn parse_progress_line(line: &str) -> Option<ProgressEvent> {
    let rest = line.strip_prefix(TEMPLATE_PREFIX)?;
    let mut fields = rest.trim().split('|');
    let status = fields.next()?;
    match status {
        "downloading" => {
            let downloaded = parse_bytes(fields.next())?;
            let total = parse_bytes(fields.next());
            let estimate = parse_bytes(fields.next());
            let total = total.or(estimate)?;
            if total <= 0.0 {
                return None;
            }
            let fraction = (downloaded / total) as f32;
            let label = format!("{}%", (fraction * 100.0) as u32);
            Some(ProgressEvent::Downloading { fraction, label })
        }
        "finished" => Some(ProgressEvent::Finished),
        _ => None,
    }
}

// yt-dlp renders byte counts as integers or floats depending on the field
fn parse_bytes(field: Option<&str>) -> Option<f64> {
    field?.trim().parse::<f64>().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn downloading_with_exact_total() {
        let event = parse_progress_line("progress:downloading|50|100|NA");
        assert_eq!(
            event,
            Some(ProgressEvent::Downloading {
                fraction: 0.5,
                label: "50%".to_string()
            })
        );
    }

    #[test]
    fn downloading_prefers_exact_total_over_estimate() {
        let event = parse_progress_line("progress:downloading|25|100|200");
        match event {
            Some(ProgressEvent::Downloading { fraction, label }) => {
                assert_eq!(fraction, 0.25);
                assert_eq!(label, "25%");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn downloading_falls_back_to_estimate() {
        let event = parse_progress_line("progress:downloading|42|NA|100");
        match event {
            Some(ProgressEvent::Downloading { fraction, label }) => {
                assert_eq!(fraction, 0.42);
                assert_eq!(label, "42%");
            }
            other => panic!("unexpected event: {:?}", other),
        }
    }

    #[test]
    fn downloading_without_total_emits_nothing() {
        assert_eq!(parse_progress_line("progress:downloading|50|NA|NA"), None);
    }

    #[test]
    fn finished_is_indeterminate() {
        assert_eq!(
            parse_progress_line("progress:finished|100|100|NA"),
            Some(ProgressEvent::Finished)
        );
    }

    #[test]
    fn non_template_lines_are_ignored() {
        assert_eq!(parse_progress_line("[ExtractAudio] Destination: x.mp3"), None);
        assert_eq!(parse_progress_line(""), None);
    }

    #[test]
    fn fractional_byte_counts_parse() {
        // total_bytes_estimate is a float field in yt-dlp
        let event = parse_progress_line("progress:downloading|512|NA|1024.0");
        assert_eq!(
            event,
            Some(ProgressEvent::Downloading {
                fraction: 0.5,
                label: "50%".to_string()
            })
        );
    }
}

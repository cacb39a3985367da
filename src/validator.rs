use once_cell::sync::Lazy;
use regex::Regex;

// Accepted shapes: optional scheme, optional www., youtube/youtu/
// youtube-nocookie host with .com/.be TLD, one of the known path forms,
// then an 11+ character id bounded by & = % ?
static YOUTUBE_URL: Lazy<Regex> = Lazy::new(|| {
    Regex::new(
        r"^(https?://)?(www\.)?(youtube|youtu|youtube-nocookie)\.(com|be)/(watch\?v=|embed/|v/|playlist\?list=|.+\?v=)?([^&=%\?]{11,})",
    )
    .unwrap()
});

/// True iff the trimmed input looks like a YouTube video or playlist URL.
/// Pure and deterministic; empty input is invalid.
pub fn is_valid_youtube_url(input: &str) -> bool {
    let trimmed = input.trim();
    !trimmed.is_empty() && YOUTUBE_URL.is_match(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejects_non_urls() {
        assert!(!is_valid_youtube_url(""));
        assert!(!is_valid_youtube_url("   "));
        assert!(!is_valid_youtube_url("not a url"));
        assert!(!is_valid_youtube_url("abc"));
        assert!(!is_valid_youtube_url("http://example.com"));
    }

    #[test]
    fn accepts_watch_urls() {
        assert!(is_valid_youtube_url("https://www.youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("http://youtube.com/watch?v=dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("www.youtube.com/watch?v=dQw4w9WgXcQ"));
    }

    #[test]
    fn accepts_short_embed_and_nocookie_urls() {
        assert!(is_valid_youtube_url("https://youtu.be/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("https://www.youtube.com/embed/dQw4w9WgXcQ"));
        assert!(is_valid_youtube_url("https://www.youtube-nocookie.com/v/dQw4w9WgXcQ"));
    }

    #[test]
    fn accepts_playlist_urls() {
        assert!(is_valid_youtube_url(
            "https://www.youtube.com/playlist?list=PLFgquLnL59alCl_2TQvOiD5Vgm1hCaGSI"
        ));
    }

    #[test]
    fn rejects_short_identifiers() {
        assert!(!is_valid_youtube_url("https://www.youtube.com/watch?v=short"));
    }

    #[test]
    fn trims_surrounding_whitespace() {
        assert!(is_valid_youtube_url("  https://youtu.be/dQw4w9WgXcQ  "));
    }
}

//! Video URL validation
//!
//! Pure pattern matching, no network. A URL is accepted when it carries a
//! recognizable watch/share/embed/shorts path and an 11-character video id.

use regex::Regex;
use std::fmt;
use std::sync::OnceLock;

/// An 11-character YouTube video identifier
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct VideoId(String);

impl VideoId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for VideoId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

fn video_url_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    RE.get_or_init(|| {
        Regex::new(
            r"^https?://(?:(?:www\.|m\.|music\.)?youtube\.com/(?:watch\?(?:[^#]*&)?v=|embed/|shorts/|live/)|youtu\.be/)([A-Za-z0-9_-]{11})(?:[?&#/].*)?$",
        )
        .unwrap()
    })
}

/// Extract the video id from a watch/share/embed/shorts link.
///
/// Returns `None` for anything that does not look like a video URL,
/// including empty strings and ids of the wrong length.
pub fn parse_video_url(url: &str) -> Option<VideoId> {
    let captures = video_url_regex().captures(url.trim())?;
    Some(VideoId(captures.get(1)?.as_str().to_string()))
}

/// True when the string is a recognizable video URL
pub fn is_video_url(url: &str) -> bool {
    parse_video_url(url).is_some()
}

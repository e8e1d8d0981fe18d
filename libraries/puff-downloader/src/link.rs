//! Source link helpers: host check, cover art, titles.

use regex::Regex;
use std::sync::OnceLock;

/// Cover used when no video id can be found in the link
pub const PLACEHOLDER_COVER_URL: &str =
    "https://via.placeholder.com/500x500/FF6600/FFFFFF?text=Puff+Muzik";

/// Whether `link` points at a supported video host
pub fn is_supported_link(link: &str) -> bool {
    let link = link.trim();
    !link.is_empty() && (link.contains("youtube.com") || link.contains("youtu.be"))
}

/// 11-character video id embedded in a link (`v=<id>` or `/<id>`)
pub fn extract_video_id(link: &str) -> Option<&str> {
    static VIDEO_ID: OnceLock<Option<Regex>> = OnceLock::new();

    let re = VIDEO_ID
        .get_or_init(|| Regex::new(r"(?:v=|/)([\w-]{11})").ok())
        .as_ref()?;
    re.captures(link)?.get(1).map(|m| m.as_str())
}

/// Cover image for a link, or the placeholder
pub fn cover_url_for(link: &str) -> String {
    match extract_video_id(link) {
        Some(id) => format!("https://img.youtube.com/vi/{id}/maxresdefault.jpg"),
        None => PLACEHOLDER_COVER_URL.to_string(),
    }
}

/// Audio rendition link derived from a video transport link
pub fn secondary_audio_url(video_link: &str) -> String {
    video_link.replacen("/video/", "/audio/", 1)
}

/// Display title: the backend file name without a `.mp3`/`.mp4` suffix
pub fn title_from_filename(file_name: &str) -> String {
    let lower = file_name.to_ascii_lowercase();
    if lower.ends_with(".mp3") || lower.ends_with(".mp4") {
        file_name[..file_name.len() - 4].to_string()
    } else {
        file_name.to_string()
    }
}

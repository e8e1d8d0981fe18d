//! Disk usage of downloaded media

use puff_core::Track;
use serde::Serialize;
use std::path::Path;
use tracing::debug;

/// Disk usage summary
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StorageInfo {
    /// Bytes used by all media files that still exist on disk
    pub used_bytes: u64,
    /// Number of tracks in the collection
    pub track_count: usize,
}

pub(crate) async fn measure(tracks: &[Track]) -> StorageInfo {
    let mut used_bytes = 0;
    for track in tracks {
        for path in track.media_files() {
            used_bytes += file_size(path).await;
        }
    }

    StorageInfo {
        used_bytes,
        track_count: tracks.len(),
    }
}

async fn file_size(path: &Path) -> u64 {
    match tokio::fs::metadata(path).await {
        Ok(meta) => meta.len(),
        Err(e) => {
            debug!(path = %path.display(), error = %e, "Skipping media file in usage total");
            0
        }
    }
}

/// Format a byte count for display (`B`, `KB`, `MB`, `GB`)
pub fn format_bytes(bytes: u64) -> String {
    const UNITS: [&str; 4] = ["B", "KB", "MB", "GB"];

    if bytes == 0 {
        return "0 B".to_string();
    }

    let mut value = bytes as f64;
    let mut unit = 0;
    while value >= 1024.0 && unit < UNITS.len() - 1 {
        value /= 1024.0;
        unit += 1;
    }

    let rounded = (value * 100.0).round() / 100.0;
    format!("{} {}", rounded, UNITS[unit])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_bytes_units() {
        assert_eq!(format_bytes(0), "0 B");
        assert_eq!(format_bytes(512), "512 B");
        assert_eq!(format_bytes(1024), "1 KB");
        assert_eq!(format_bytes(1536), "1.5 KB");
        assert_eq!(format_bytes(5 * 1024 * 1024), "5 MB");
        assert_eq!(format_bytes(3 * 1024 * 1024 * 1024), "3 GB");
    }

    #[test]
    fn format_bytes_caps_at_gigabytes() {
        assert_eq!(format_bytes(2048 * 1024 * 1024 * 1024), "2048 GB");
    }
}

//! Streaming file downloads.

use crate::error::{AcquireError, Result};
use crate::types::DownloadProgress;
use futures_util::StreamExt;
use reqwest::Client;
use std::path::{Path, PathBuf};
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

/// Temporary path a download is written to before it is complete
pub fn part_path(dest: &Path) -> PathBuf {
    let mut name = dest.as_os_str().to_owned();
    name.push(".part");
    PathBuf::from(name)
}

/// Download `url` to `dest`.
///
/// Bytes are streamed into `<dest>.part`, which is renamed to `dest` once the
/// body is complete, so `dest` only ever holds a whole file. The partial file
/// is left behind on failure; callers clean up.
///
/// # Returns
/// Number of bytes written.
pub async fn download_file<F>(
    http: &Client,
    url: &str,
    dest: &Path,
    cancel: &CancellationToken,
    mut progress_callback: F,
) -> Result<u64>
where
    F: FnMut(DownloadProgress),
{
    debug!(url = %url, dest = %dest.display(), "Downloading file");

    let response = tokio::select! {
        () = cancel.cancelled() => return Err(AcquireError::Cancelled),
        response = http.get(url).send() => response?,
    };

    let status = response.status();
    if !status.is_success() {
        return Err(AcquireError::Download(format!(
            "{} returned HTTP {}",
            url,
            status.as_u16()
        )));
    }

    let total_size = response.content_length();

    if let Some(parent) = dest.parent() {
        tokio::fs::create_dir_all(parent).await?;
    }

    let part = part_path(dest);
    let mut file = File::create(&part).await?;
    let mut downloaded: u64 = 0;
    let mut stream = response.bytes_stream();

    loop {
        let chunk = tokio::select! {
            () = cancel.cancelled() => return Err(AcquireError::Cancelled),
            chunk = stream.next() => chunk,
        };
        let Some(chunk) = chunk else { break };
        let chunk = chunk.map_err(|e| AcquireError::Download(e.to_string()))?;

        file.write_all(&chunk).await?;
        downloaded += chunk.len() as u64;

        let fraction = total_size
            .filter(|total| *total > 0)
            .map(|total| downloaded as f32 / total as f32)
            .unwrap_or(0.0);

        progress_callback(DownloadProgress {
            bytes_received: downloaded,
            bytes_total: total_size,
            fraction,
        });
    }

    if let Some(expected) = total_size {
        if downloaded < expected {
            return Err(AcquireError::Download(format!(
                "connection closed after {downloaded} of {expected} bytes"
            )));
        }
    }

    file.flush().await?;
    drop(file);
    tokio::fs::rename(&part, dest).await?;

    info!(dest = %dest.display(), size = downloaded, "File downloaded");

    Ok(downloaded)
}

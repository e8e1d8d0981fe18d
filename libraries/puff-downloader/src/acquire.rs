//! Acquisition coordinator: link in, stored-ready `Track` out.

use crate::client::ConverterClient;
use crate::download::{download_file, part_path};
use crate::error::{AcquireError, Result};
use crate::link::{cover_url_for, is_supported_link, secondary_audio_url, title_from_filename};
use crate::progress::ProgressBlender;
use crate::types::{AcquireKind, AcquireProgress, AcquireRequest, Phase};
use puff_core::{Track, TrackId};
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use tokio_util::sync::CancellationToken;
use tracing::{debug, error, info, warn};

/// Prefix of every downloaded media file
pub const FILE_PREFIX: &str = "puff_music_";

/// Runs acquisition jobs into one download directory.
///
/// Jobs are independent: several can run at once, each with its own
/// cancellation token. Track ids are random UUIDs so concurrent jobs never
/// share file names.
#[derive(Debug, Clone)]
pub struct AcquisitionCoordinator {
    client: ConverterClient,
    download_dir: PathBuf,
}

impl AcquisitionCoordinator {
    pub fn new(client: ConverterClient, download_dir: impl Into<PathBuf>) -> Self {
        Self {
            client,
            download_dir: download_dir.into(),
        }
    }

    pub fn download_dir(&self) -> &Path {
        &self.download_dir
    }

    /// Audio file path for a track id
    pub fn audio_path(&self, id: &TrackId) -> PathBuf {
        self.download_dir.join(format!("{FILE_PREFIX}{id}.mp3"))
    }

    /// Video file path for a track id
    pub fn video_path(&self, id: &TrackId) -> PathBuf {
        self.download_dir.join(format!("{FILE_PREFIX}{id}.mp4"))
    }

    /// Convert and download `request.link`.
    ///
    /// Progress goes to `on_progress` as a single 0–100 value that never
    /// decreases and ends at exactly 100 on success. The returned track is
    /// not persisted; saving it is the caller's job.
    ///
    /// On any failure, or when `cancel` fires, every file this job created
    /// is removed and no track is returned.
    pub async fn acquire<F>(
        &self,
        request: &AcquireRequest,
        cancel: &CancellationToken,
        mut on_progress: F,
    ) -> Result<Track>
    where
        F: FnMut(AcquireProgress),
    {
        let mut blender = ProgressBlender::new(request.kind.is_video());
        let mut created = Vec::new();

        match self
            .run(request, cancel, &mut blender, &mut created, &mut on_progress)
            .await
        {
            Ok(track) => {
                on_progress(AcquireProgress {
                    phase: Phase::Done,
                    percent: blender.finish(),
                });
                info!(track_id = %track.id, title = %track.title, "Acquisition complete");
                Ok(track)
            }
            Err(e) => {
                remove_files(&created).await;
                on_progress(AcquireProgress {
                    phase: Phase::Failed,
                    percent: blender.current(),
                });
                if matches!(e, AcquireError::Cancelled) {
                    info!(link = %request.link, "Acquisition cancelled");
                } else {
                    error!(link = %request.link, error = %e, "Acquisition failed");
                }
                Err(e)
            }
        }
    }

    async fn run<F>(
        &self,
        request: &AcquireRequest,
        cancel: &CancellationToken,
        blender: &mut ProgressBlender,
        created: &mut Vec<PathBuf>,
        on_progress: &mut F,
    ) -> Result<Track>
    where
        F: FnMut(AcquireProgress),
    {
        if !is_supported_link(&request.link) {
            return Err(AcquireError::InvalidLink(request.link.clone()));
        }

        on_progress(AcquireProgress {
            phase: Phase::Converting,
            percent: blender.current(),
        });

        let conversion = tokio::select! {
            () = cancel.cancelled() => return Err(AcquireError::Cancelled),
            conversion = self.client.convert(&request.link, request.kind) => conversion?,
        };

        let id = TrackId::generate();
        let audio_path = self.audio_path(&id);
        debug!(track_id = %id, kind = ?request.kind, "Starting downloads");

        let primary_path = match request.kind {
            AcquireKind::Audio => audio_path.clone(),
            AcquireKind::Video { .. } => self.video_path(&id),
        };

        track_files(created, &primary_path);
        download_file(
            self.client.http(),
            &conversion.link,
            &primary_path,
            cancel,
            |p| {
                on_progress(AcquireProgress {
                    phase: Phase::FetchingPrimary,
                    percent: blender.primary(p.fraction),
                });
            },
        )
        .await?;
        blender.primary(1.0);

        let title = title_from_filename(&conversion.file_name);
        let cover_url = cover_url_for(&request.link);

        let track = match request.kind {
            AcquireKind::Audio => Track::new(id, title, audio_path).with_cover(cover_url),
            AcquireKind::Video { quality } => {
                let audio_url = secondary_audio_url(&conversion.link);
                track_files(created, &audio_path);

                let fetched = download_file(
                    self.client.http(),
                    &audio_url,
                    &audio_path,
                    cancel,
                    |p| {
                        on_progress(AcquireProgress {
                            phase: Phase::FetchingSecondary,
                            percent: blender.secondary(p.fraction),
                        });
                    },
                )
                .await;

                match fetched {
                    Ok(_) => {}
                    Err(AcquireError::Cancelled) => return Err(AcquireError::Cancelled),
                    Err(e) => return Err(AcquireError::SecondaryFetch(e.to_string())),
                }

                Track::new(id, title, audio_path)
                    .with_cover(cover_url)
                    .with_video(primary_path, quality.as_str())
            }
        };

        Ok(track)
    }
}

fn track_files(created: &mut Vec<PathBuf>, dest: &Path) {
    created.push(part_path(dest));
    created.push(dest.to_path_buf());
}

async fn remove_files(paths: &[PathBuf]) {
    for path in paths {
        match tokio::fs::remove_file(path).await {
            Ok(()) => debug!(path = %path.display(), "Removed file from failed job"),
            Err(e) if e.kind() == ErrorKind::NotFound => {}
            Err(e) => warn!(path = %path.display(), error = %e, "Failed to remove file"),
        }
    }
}

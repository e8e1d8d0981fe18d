//! Puff - music library and downloader
use anyhow::Context;
use clap::{Parser, Subcommand};
use puff_cli::{config::PuffConfig, App};
use puff_core::{PlaylistId, QualityTier, Track, TrackId};
use puff_downloader::{CancellationToken, Phase};
use puff_storage::format_bytes;
use std::io::Write;
use std::path::PathBuf;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "puff")]
#[command(about = "Download music from video links and manage your library", long_about = None)]
struct Cli {
    /// Configuration file path (default: ./puff.toml if present)
    #[arg(short, long, global = true, env = "PUFF_CONFIG")]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Convert a link and download it into the library
    Download {
        /// Video link (youtube.com or youtu.be)
        link: String,
        /// Also keep the video rendition
        #[arg(long)]
        video: bool,
        /// Video quality (1080p, 720p, 480p, 360p)
        #[arg(short, long, requires = "video")]
        quality: Option<QualityTier>,
    },
    /// List downloaded tracks, newest first
    List,
    /// Delete a track and its files
    Delete {
        /// Track ID
        id: String,
    },
    /// Toggle a track's favorite status
    Favorite {
        /// Track ID
        id: String,
    },
    /// List playlists
    Playlists,
    /// Manage a playlist
    Playlist {
        #[command(subcommand)]
        action: PlaylistAction,
    },
    /// Show disk usage of downloaded media
    Storage,
    /// Forget every track, favorite and playlist (files stay on disk)
    Clear {
        /// Confirm
        #[arg(long)]
        yes: bool,
    },
    /// List available video qualities
    Qualities,
}

#[derive(Subcommand)]
enum PlaylistAction {
    /// Create a playlist
    Create {
        name: String,
        /// Cover image URL
        #[arg(long)]
        cover: Option<String>,
    },
    /// Add a track to a playlist
    Add { playlist: String, track: String },
    /// Remove a track from a playlist
    Remove { playlist: String, track: String },
    /// Delete a playlist
    Delete { playlist: String },
    /// Show a playlist's tracks
    Show { playlist: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let config = PuffConfig::load(cli.config.as_deref())?;

    // Initialize tracing (stderr, so command output stays clean)
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.logging.filter.clone().into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    if let Commands::Qualities = cli.command {
        for tier in QualityTier::available() {
            println!("{:<6} {}", tier.as_str(), tier.label());
        }
        return Ok(());
    }

    let app = App::open(config).await?;

    match cli.command {
        Commands::Download {
            link,
            video,
            quality,
        } => download(&app, &link, video, quality).await?,
        Commands::List => list(&app).await?,
        Commands::Delete { id } => {
            let track = app.library.delete_track(&TrackId::new(id)).await?;
            println!("Deleted \"{}\"", track.title);
        }
        Commands::Favorite { id } => {
            let id = TrackId::new(id);
            if app.library.track(&id).await?.is_none() {
                anyhow::bail!("Track not found: {id}");
            }
            if app.library.toggle_favorite(&id).await? {
                println!("Added to favorites");
            } else {
                println!("Removed from favorites");
            }
        }
        Commands::Playlists => {
            for playlist in app.library.playlists().await? {
                println!(
                    "{}  {} ({} tracks)",
                    playlist.id,
                    playlist.name,
                    playlist.len()
                );
            }
        }
        Commands::Playlist { action } => playlist(&app, action).await?,
        Commands::Storage => {
            let info = app.library.storage_info().await?;
            println!(
                "{} tracks, {} used",
                info.track_count,
                format_bytes(info.used_bytes)
            );
        }
        Commands::Clear { yes } => {
            if !yes {
                anyhow::bail!("Refusing to clear the library without --yes");
            }
            app.library.clear().await?;
            println!("Library cleared");
        }
        Commands::Qualities => {}
    }

    Ok(())
}

async fn download(
    app: &App,
    link: &str,
    video: bool,
    quality: Option<QualityTier>,
) -> anyhow::Result<()> {
    let cancel = CancellationToken::new();

    // Ctrl-C cancels the job; the coordinator removes partial files
    let signal = {
        let cancel = cancel.clone();
        tokio::spawn(async move {
            if tokio::signal::ctrl_c().await.is_ok() {
                cancel.cancel();
            }
        })
    };

    let result = app
        .download(link, video, quality, &cancel, |progress| {
            if matches!(progress.phase, Phase::FetchingPrimary | Phase::FetchingSecondary) {
                eprint!("\r{:>5.1}%", progress.percent);
                let _ = std::io::stderr().flush();
            }
        })
        .await;
    signal.abort();
    eprintln!();

    let track = result.context("Download failed")?;
    println!("Saved \"{}\" ({})", track.title, track.id);
    Ok(())
}

async fn list(app: &App) -> anyhow::Result<()> {
    let favorites = app.library.favorites().await?;
    for track in app.library.tracks().await? {
        println!("{}", describe(&track, favorites.contains(&track.id)));
    }
    Ok(())
}

async fn playlist(app: &App, action: PlaylistAction) -> anyhow::Result<()> {
    let library = &app.library;

    match action {
        PlaylistAction::Create { name, cover } => {
            let playlist = library.create_playlist(&name, cover).await?;
            println!("Created \"{}\" ({})", playlist.name, playlist.id);
        }
        PlaylistAction::Add { playlist, track } => {
            let added = library
                .add_to_playlist(&PlaylistId::new(playlist), &TrackId::new(track))
                .await?;
            println!("{}", if added { "Added" } else { "Already in playlist" });
        }
        PlaylistAction::Remove { playlist, track } => {
            let removed = library
                .remove_from_playlist(&PlaylistId::new(playlist), &TrackId::new(track))
                .await?;
            println!("{}", if removed { "Removed" } else { "Not in playlist" });
        }
        PlaylistAction::Delete { playlist } => {
            library.delete_playlist(&PlaylistId::new(playlist)).await?;
            println!("Playlist deleted");
        }
        PlaylistAction::Show { playlist } => {
            let id = PlaylistId::new(playlist);
            let favorites = library.favorites().await?;
            for track in library.playlist_tracks(&id).await? {
                println!("{}", describe(&track, favorites.contains(&track.id)));
            }
        }
    }

    Ok(())
}

fn describe(track: &Track, favorite: bool) -> String {
    let mut line = format!("{}  {}", track.id, track.title);
    if let Some(quality) = &track.video_quality {
        line.push_str(&format!("  [video {quality}]"));
    }
    if favorite {
        line.push_str("  *");
    }
    line
}

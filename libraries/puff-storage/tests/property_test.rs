//! Property-based tests for the favorites collections

use proptest::prelude::*;
use puff_core::{PlaylistId, Track, TrackId};
use puff_storage::Library;
use std::path::PathBuf;

fn run<F: std::future::Future>(future: F) -> F::Output {
    tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()
        .expect("runtime")
        .block_on(future)
}

async fn seeded_library() -> Library {
    let library = Library::in_memory();
    for i in 0..5 {
        let track = Track::new(
            TrackId::new(i.to_string()),
            format!("Track {i}"),
            PathBuf::from(format!("/tmp/{i}.mp3")),
        );
        library.save_track(track).await.unwrap();
    }
    library
}

proptest! {
    /// Any toggle sequence keeps the favorites set and the favorites
    /// playlist in agreement, and toggling every id once more undoes the
    /// parity of each id.
    #[test]
    fn favorites_playlist_stays_in_sync(toggles in prop::collection::vec(0usize..5, 0..30)) {
        run(async {
            let library = seeded_library().await;

            let mut expected = [false; 5];
            for i in &toggles {
                let now = library.toggle_favorite(&TrackId::new(i.to_string())).await.unwrap();
                expected[*i] = !expected[*i];
                prop_assert_eq!(now, expected[*i]);
            }

            let favorites = library.favorites().await.unwrap();
            let playlist_ids = library
                .playlist(&PlaylistId::favorites())
                .await
                .unwrap()
                .map(|p| p.track_ids)
                .unwrap_or_default();
            prop_assert_eq!(&favorites, &playlist_ids);

            for (i, fav) in expected.iter().enumerate() {
                prop_assert_eq!(favorites.contains(&TrackId::new(i.to_string())), *fav);
            }
            Ok(())
        })?;
    }

    /// Toggling one track twice restores the favorites set and every
    /// playlist. The only lasting trace is the favorites playlist itself,
    /// which the first add creates and which stays as an empty mirror.
    #[test]
    fn double_toggle_restores_collections(
        prefix in prop::collection::vec(0usize..5, 0..20),
        target in 0usize..5,
    ) {
        run(async {
            let library = seeded_library().await;
            for i in &prefix {
                library.toggle_favorite(&TrackId::new(i.to_string())).await.unwrap();
            }
            let favorites_before = library.favorites().await.unwrap();
            let playlists_before = library.playlists().await.unwrap();

            let id = TrackId::new(target.to_string());
            library.toggle_favorite(&id).await.unwrap();
            library.toggle_favorite(&id).await.unwrap();

            prop_assert_eq!(library.favorites().await.unwrap(), favorites_before);

            let playlists_after = library.playlists().await.unwrap();
            if playlists_before.iter().any(|p| p.id.is_favorites()) {
                prop_assert_eq!(playlists_after, playlists_before);
            } else {
                let (favorites, others): (Vec<_>, Vec<_>) = playlists_after
                    .into_iter()
                    .partition(|p| p.id.is_favorites());
                prop_assert_eq!(others, playlists_before);
                prop_assert_eq!(favorites.len(), 1);
                prop_assert!(favorites[0].is_empty());
            }
            Ok(())
        })?;
    }
}

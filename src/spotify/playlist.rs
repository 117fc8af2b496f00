use std::sync::Arc;

use futures::{StreamExt, stream};

use crate::{
    Error, Res, success,
    types::{CreatePlaylistRequest, PlaylistResult, Song},
    utils, warning,
};

use super::SpotifyApi;

/// Track searches in flight at once. Results keep the song order.
pub const SEARCH_CONCURRENCY: usize = 4;

/// Spotify accepts at most this many URIs per add-tracks call.
pub const ADD_TRACKS_BATCH: usize = 100;

/// Creates playlists from song lists.
#[derive(Clone)]
pub struct PlaylistMaterializer {
    api: Arc<dyn SpotifyApi>,
    open_url: String,
}

impl PlaylistMaterializer {
    pub fn new(api: Arc<dyn SpotifyApi>, open_url: impl Into<String>) -> Self {
        PlaylistMaterializer {
            api,
            open_url: open_url.into(),
        }
    }

    /// Creates a private playlist for `mood` holding every song that resolves
    /// to a Spotify track.
    ///
    /// Songs without a search hit are skipped. A playlist where nothing
    /// resolved is created empty and still returned. Failures while adding
    /// tracks are logged and do not change the result.
    ///
    /// # Errors
    ///
    /// Fails only when the user lookup or the playlist creation fails.
    pub async fn materialize(
        &self,
        access_token: &str,
        songs: &[Song],
        mood: &str,
    ) -> Res<PlaylistResult> {
        let user_id = self.api.current_user_id(access_token).await?;

        let request = CreatePlaylistRequest {
            name: utils::playlist_name(mood),
            description: utils::playlist_description(mood),
            public: false,
        };
        let playlist = self
            .api
            .create_playlist(access_token, &user_id, &request)
            .await?;

        let uris = self.resolve_tracks(access_token, songs).await;

        for chunk in uris.chunks(ADD_TRACKS_BATCH) {
            if let Err(e) = self.api.add_tracks(access_token, &playlist.id, chunk).await {
                warning!("Failed to add tracks to playlist {}: {}", playlist.id, e);
            }
        }

        let url = utils::playlist_url(&self.open_url, &playlist.id);
        success!(
            "Created playlist '{}' with {}/{} tracks: {}",
            request.name,
            uris.len(),
            songs.len(),
            url
        );

        Ok(PlaylistResult {
            id: playlist.id,
            url,
            tracks_resolved: uris.len(),
        })
    }

    async fn resolve_tracks(&self, access_token: &str, songs: &[Song]) -> Vec<String> {
        // futures are built up front so the stream holds no borrowing closure
        let searches: Vec<_> = songs
            .iter()
            .map(|song| self.resolve(access_token, song))
            .collect();

        stream::iter(searches)
            .buffered(SEARCH_CONCURRENCY)
            .collect::<Vec<Option<String>>>()
            .await
            .into_iter()
            .flatten()
            .collect()
    }

    async fn resolve(&self, access_token: &str, song: &Song) -> Option<String> {
        let query = song.search_query();
        match self.api.search_track(access_token, &query).await {
            Ok(Some(track)) => Some(track.uri),
            Ok(None) => {
                warning!("{}", Error::TrackNotFound(query));
                None
            }
            Err(e) => {
                warning!("Track search for '{}' failed: {}", query, e);
                None
            }
        }
    }
}

//! # Spotify Integration Module
//!
//! Interface to the Spotify accounts service and Web API, limited to what the
//! gateway needs to turn a song list into a playlist.
//!
//! ## Architecture
//!
//! ```text
//! OAuth handshake / HTTP handlers
//!          ↓
//! PlaylistMaterializer (playlist)
//!          ↓
//! SpotifyApi trait ── SpotifyClient (client, reqwest)
//!          ↓
//! Spotify Web API
//! ```
//!
//! Every call takes the user's access token explicitly. Tokens live for one
//! request and are never stored.
//!
//! ## API Coverage
//!
//! - `POST /api/token` - authorization-code exchange
//! - `GET /me` - current user id
//! - `POST /users/{user_id}/playlists` - create a playlist
//! - `GET /search` - resolve a song to a track
//! - `POST /playlists/{playlist_id}/tracks` - add tracks
//!
//! ## Submodules
//!
//! - [`auth`] - authorization URL, token parsing and redaction
//! - [`client`] - the reqwest implementation of [`SpotifyApi`]
//! - [`playlist`] - playlist materialization

pub mod auth;
pub mod client;
pub mod playlist;

use async_trait::async_trait;
use serde_json::Value;

use crate::{
    Res,
    types::{CreatePlaylistRequest, CreatePlaylistResponse, Track},
};

pub use client::SpotifyClient;
pub use playlist::PlaylistMaterializer;

/// Operations the gateway performs against Spotify.
#[async_trait]
pub trait SpotifyApi: Send + Sync {
    /// Exchanges an authorization code and returns the raw token response.
    ///
    /// Provider-side rejections (`invalid_grant`, ...) are returned as `Ok`
    /// with the error body so callers can surface them. Only transport
    /// failures are `Err`.
    async fn exchange_code(&self, code: &str) -> Res<Value>;

    async fn current_user_id(&self, access_token: &str) -> Res<String>;

    async fn create_playlist(
        &self,
        access_token: &str,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse>;

    /// Returns the top track for a free-text query, if any.
    async fn search_track(&self, access_token: &str, query: &str) -> Res<Option<Track>>;

    async fn add_tracks(&self, access_token: &str, playlist_id: &str, uris: &[String]) -> Res<()>;
}

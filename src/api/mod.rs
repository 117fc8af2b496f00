//! # API Module
//!
//! HTTP endpoints of the moodtune gateway.
//!
//! ## Endpoints
//!
//! ### Generation
//!
//! - [`playlist`] - `POST /playlist`: mood text to songs and a mood color.
//!   Always answers 200; generation failures become fallback content.
//!
//! ### Spotify
//!
//! - [`login`] - `GET /login`: redirect to the Spotify authorization page with
//!   the playlist encoded in `state`
//! - [`save_to_spotify`] - `POST /save_to_spotify`: same URL, returned as JSON
//! - [`callback`] - `GET /callback`: completes the handshake and redirects to
//!   the new playlist, or answers `{error, token_info}`
//! - [`spotify_playlist`] - `POST /spotify_playlist`: creates a playlist with a
//!   token the client already holds
//!
//! ### Monitoring
//!
//! - [`health`] - status and version
//!
//! ## State
//!
//! Handlers receive an [`AppState`] through an `Extension` layer. It is built
//! once at startup and only read afterwards.

mod callback;
mod error;
mod health;
mod login;
mod playlist;

use std::sync::Arc;

use axum::{
    http::{StatusCode, header},
    response::{IntoResponse, Response},
};
use reqwest::Client;

use crate::{
    completion::{CompletionClient, OpenAiClient},
    config::{Config, SpotifyConfig},
    generator::PlaylistGenerator,
    oauth::OAuthFlow,
    spotify::{SpotifyApi, SpotifyClient},
};

pub use callback::callback;
pub use error::ApiError;
pub use health::health;
pub use login::{login, save_to_spotify};
pub use playlist::{playlist, spotify_playlist};

#[derive(Clone)]
pub struct AppState {
    pub generator: PlaylistGenerator,
    pub oauth: OAuthFlow,
}

impl AppState {
    /// Wires the real OpenAI and Spotify clients around one shared HTTP client.
    pub fn new(config: &Config) -> Self {
        let http = Client::new();
        let completion = Arc::new(OpenAiClient::new(http.clone(), config));
        let spotify = Arc::new(SpotifyClient::new(http, config.spotify.clone()));
        Self::from_parts(completion, spotify, config.spotify.clone())
    }

    pub fn from_parts(
        completion: Arc<dyn CompletionClient>,
        spotify: Arc<dyn SpotifyApi>,
        spotify_config: SpotifyConfig,
    ) -> Self {
        AppState {
            generator: PlaylistGenerator::new(completion),
            oauth: OAuthFlow::new(spotify_config, spotify),
        }
    }
}

/// `302 Found` redirect.
fn found(location: &str) -> Response {
    (StatusCode::FOUND, [(header::LOCATION, location.to_string())]).into_response()
}

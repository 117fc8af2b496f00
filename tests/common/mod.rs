#![allow(dead_code)]

use std::{
    collections::{HashMap, HashSet},
    sync::Mutex,
    time::Duration,
};

use async_trait::async_trait;
use moodtune::{
    Error, Res,
    completion::{Completion, CompletionClient, CompletionRequest},
    config::SpotifyConfig,
    spotify::SpotifyApi,
    types::{CreatePlaylistRequest, CreatePlaylistResponse, Song, Track},
};
use serde_json::{Value, json};

pub const OPEN_URL: &str = "https://open.spotify.com";

pub fn spotify_config() -> SpotifyConfig {
    SpotifyConfig {
        client_id: "client-123".to_string(),
        client_secret: "secret-456".to_string(),
        redirect_uri: "http://127.0.0.1:8000/callback".to_string(),
        scope: "playlist-modify-public playlist-modify-private user-read-private".to_string(),
        auth_url: "https://accounts.spotify.com/authorize".to_string(),
        token_url: "https://accounts.spotify.com/api/token".to_string(),
        api_url: "https://api.spotify.com/v1".to_string(),
        open_url: OPEN_URL.to_string(),
    }
}

pub fn songs(pairs: &[(&str, &str)]) -> Vec<Song> {
    pairs.iter().map(|(t, a)| Song::new(*t, *a)).collect()
}

/// Scripted completion service. `None` simulates a failed call.
pub struct FakeCompletion {
    pub songs: Option<String>,
    pub color: Option<String>,
    pub requests: Mutex<Vec<CompletionRequest>>,
}

impl FakeCompletion {
    pub fn new(songs: Option<&str>, color: Option<&str>) -> Self {
        FakeCompletion {
            songs: songs.map(str::to_string),
            color: color.map(str::to_string),
            requests: Mutex::new(Vec::new()),
        }
    }

    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }
}

#[async_trait]
impl CompletionClient for FakeCompletion {
    async fn complete(&self, request: CompletionRequest) -> Res<Completion> {
        let is_color = request.messages[0].content.contains("mood_color");
        self.requests.lock().unwrap().push(request);

        let scripted = if is_color { &self.color } else { &self.songs };
        scripted
            .clone()
            .map(|content| Completion { content })
            .ok_or_else(|| Error::upstream("chat completion", "connection refused"))
    }
}

#[derive(Debug, Default)]
pub struct SpotifyCalls {
    pub exchanged_codes: Vec<String>,
    pub tokens_seen: Vec<String>,
    pub created: Vec<(String, CreatePlaylistRequest)>,
    pub searches: Vec<String>,
    pub completed_searches: Vec<String>,
    pub added: Vec<(String, Vec<String>)>,
}

/// In-memory Spotify. Searches resolve through `tracks` (query -> uri) after
/// an optional per-query delay.
pub struct FakeSpotify {
    pub token_response: Option<Value>,
    pub user_id: Option<String>,
    pub tracks: HashMap<String, String>,
    pub search_delays: HashMap<String, Duration>,
    pub failing_searches: HashSet<String>,
    pub fail_add_tracks: bool,
    pub calls: Mutex<SpotifyCalls>,
}

impl Default for FakeSpotify {
    fn default() -> Self {
        FakeSpotify {
            token_response: Some(json!({
                "access_token": "BQC-access",
                "token_type": "Bearer",
                "scope": "playlist-modify-private",
                "expires_in": 3600,
                "refresh_token": "AQD-refresh"
            })),
            user_id: Some("user-1".to_string()),
            tracks: HashMap::new(),
            search_delays: HashMap::new(),
            failing_searches: HashSet::new(),
            fail_add_tracks: false,
            calls: Mutex::new(SpotifyCalls::default()),
        }
    }
}

impl FakeSpotify {
    pub fn with_tracks(tracks: &[(&str, &str)]) -> Self {
        FakeSpotify {
            tracks: tracks
                .iter()
                .map(|(q, uri)| (q.to_string(), uri.to_string()))
                .collect(),
            ..Default::default()
        }
    }
}

#[async_trait]
impl SpotifyApi for FakeSpotify {
    async fn exchange_code(&self, code: &str) -> Res<Value> {
        self.calls
            .lock()
            .unwrap()
            .exchanged_codes
            .push(code.to_string());
        self.token_response
            .clone()
            .ok_or_else(|| Error::upstream("Spotify", "connection reset"))
    }

    async fn current_user_id(&self, access_token: &str) -> Res<String> {
        self.calls
            .lock()
            .unwrap()
            .tokens_seen
            .push(access_token.to_string());
        self.user_id
            .clone()
            .ok_or_else(|| Error::upstream("Spotify", "401 Unauthorized"))
    }

    async fn create_playlist(
        &self,
        _access_token: &str,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        let mut calls = self.calls.lock().unwrap();
        calls.created.push((user_id.to_string(), request.clone()));
        Ok(CreatePlaylistResponse {
            id: format!("playlist-{}", calls.created.len()),
        })
    }

    async fn search_track(&self, _access_token: &str, query: &str) -> Res<Option<Track>> {
        self.calls.lock().unwrap().searches.push(query.to_string());
        if let Some(delay) = self.search_delays.get(query) {
            tokio::time::sleep(*delay).await;
        }
        self.calls
            .lock()
            .unwrap()
            .completed_searches
            .push(query.to_string());
        if self.failing_searches.contains(query) {
            return Err(Error::upstream("Spotify", "502 Bad Gateway"));
        }
        Ok(self.tracks.get(query).map(|uri| Track {
            id: uri.rsplit(':').next().unwrap_or_default().to_string(),
            name: query.to_string(),
            uri: uri.clone(),
        }))
    }

    async fn add_tracks(&self, _access_token: &str, playlist_id: &str, uris: &[String]) -> Res<()> {
        self.calls
            .lock()
            .unwrap()
            .added
            .push((playlist_id.to_string(), uris.to_vec()));
        if self.fail_add_tracks {
            return Err(Error::upstream("Spotify", "500 Internal Server Error"));
        }
        Ok(())
    }
}

use chrono::{DateTime, TimeDelta, Utc};
use serde::{Deserialize, Serialize};
use tabled::Tabled;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Tabled)]
pub struct Song {
    pub title: String,
    pub artist: String,
}

impl Song {
    pub fn new(title: impl Into<String>, artist: impl Into<String>) -> Self {
        Song {
            title: title.into(),
            artist: artist.into(),
        }
    }

    /// Free-text search query used to resolve the song to a track.
    pub fn search_query(&self) -> String {
        format!("{} {}", self.title, self.artist)
    }
}

/// Payload carried through the OAuth redirect in the `state` parameter.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OAuthState {
    pub songs: Vec<Song>,
    pub mood: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlaylistResult {
    pub id: String,
    pub url: String,
    /// Number of songs that resolved to a track.
    pub tracks_resolved: usize,
}

#[derive(Debug, Clone)]
pub struct AccessToken {
    pub access_token: String,
    pub refresh_token: Option<String>,
    pub scope: String,
    pub expires_in: u64,
    pub obtained_at: DateTime<Utc>,
}

impl AccessToken {
    pub fn expires_at(&self) -> DateTime<Utc> {
        self.obtained_at + TimeDelta::seconds(self.expires_in as i64)
    }
}

// HTTP request / response bodies

#[derive(Debug, Clone, Deserialize)]
pub struct MoodRequest {
    pub text: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlaylistResponse {
    pub playlist: Vec<Song>,
    pub mood_color: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoginQuery {
    pub mood: String,
    /// JSON-encoded list of songs.
    pub songs: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct CallbackQuery {
    pub state: Option<String>,
    pub code: Option<String>,
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SpotifyPlaylistRequest {
    pub access_token: String,
    pub songs: Vec<Song>,
    #[serde(default = "default_direct_mood")]
    pub mood: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpotifyPlaylistResponse {
    pub playlist_url: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct SaveToSpotifyRequest {
    pub songs: Vec<Song>,
    #[serde(default = "default_saved_mood")]
    pub mood: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaveToSpotifyResponse {
    pub login_url: String,
}

fn default_direct_mood() -> String {
    "mood".to_string()
}

fn default_saved_mood() -> String {
    "Mood Playlist".to_string()
}

// Spotify Web API bodies

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistRequest {
    pub name: String,
    pub description: String,
    pub public: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreatePlaylistResponse {
    pub id: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResponse {
    #[serde(default)]
    pub tracks: Option<Tracks>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Tracks {
    #[serde(default)]
    pub items: Vec<Track>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Track {
    pub id: String,
    pub name: String,
    pub uri: String,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistRequest {
    pub uris: Vec<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AddTrackToPlaylistResponse {
    pub snapshot_id: String,
}

//! # Playlist Generation
//!
//! Turns mood text into a song list and a mood color by issuing two independent
//! completion requests. Every failure is absorbed:
//!
//! | Failure                         | Result                          |
//! |---------------------------------|---------------------------------|
//! | song request fails              | [`fallback::short_fallback`]    |
//! | song output unusable            | [`fallback::full_fallback`]     |
//! | color request fails             | [`fallback::DEFAULT_MOOD_COLOR`]|
//! | color output is not JSON        | first hex color in the text, else the default |
//!
//! Callers always receive content, never an error.

pub mod fallback;
pub mod prompts;

use std::sync::Arc;

use serde::Deserialize;

use crate::{
    Res,
    completion::{CompletionClient, CompletionRequest, Message},
    extract, info,
    types::Song,
    warning,
};

pub use fallback::DEFAULT_MOOD_COLOR;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedPlaylist {
    pub songs: Vec<Song>,
    /// Always `#RRGGBB`.
    pub mood_color: String,
}

#[derive(Clone)]
pub struct PlaylistGenerator {
    client: Arc<dyn CompletionClient>,
}

#[derive(Debug, Deserialize)]
struct ColorPayload {
    #[serde(default)]
    mood_color: Option<String>,
}

impl PlaylistGenerator {
    pub fn new(client: Arc<dyn CompletionClient>) -> Self {
        PlaylistGenerator { client }
    }

    /// Generates songs and a color for `mood`.
    ///
    /// Blank mood text is not sent upstream; it yields the short fallback list
    /// and the default color.
    pub async fn generate(&self, mood: &str) -> GeneratedPlaylist {
        if mood.trim().is_empty() {
            warning!("Empty mood text, returning fallback playlist");
            return GeneratedPlaylist {
                songs: fallback::short_fallback(),
                mood_color: DEFAULT_MOOD_COLOR.to_string(),
            };
        }

        let (songs, mood_color) = tokio::join!(self.songs(mood), self.color(mood));
        info!(
            "Generated {} songs with color {} for mood '{}'",
            songs.len(),
            mood_color,
            mood
        );

        GeneratedPlaylist { songs, mood_color }
    }

    async fn songs(&self, mood: &str) -> Vec<Song> {
        let request = CompletionRequest {
            messages: vec![Message::user(prompts::songs_prompt(mood))],
            temperature: prompts::SONGS_TEMPERATURE,
        };

        match self.client.complete(request).await {
            Ok(completion) => match parse_songs(&completion.content) {
                Ok(songs) => songs,
                Err(e) => {
                    warning!("Song list parsing failed: {}", e);
                    fallback::full_fallback()
                }
            },
            Err(e) => {
                warning!("Song list request failed: {}", e);
                fallback::short_fallback()
            }
        }
    }

    async fn color(&self, mood: &str) -> String {
        let request = CompletionRequest {
            messages: vec![Message::user(prompts::color_prompt(mood))],
            temperature: prompts::COLOR_TEMPERATURE,
        };

        match self.client.complete(request).await {
            Ok(completion) => parse_color(&completion.content),
            Err(e) => {
                warning!("Mood color request failed: {}", e);
                DEFAULT_MOOD_COLOR.to_string()
            }
        }
    }
}

/// Parses a JSON song array, tolerating a surrounding code fence.
///
/// An empty array is rejected.
pub fn parse_songs(raw: &str) -> Res<Vec<Song>> {
    let songs: Vec<Song> = extract::parse_json(raw, "song list")?;
    if songs.is_empty() {
        return Err(crate::Error::parse("song list", "empty array"));
    }
    Ok(songs)
}

/// Extracts the mood color from model output. Never fails.
///
/// Tries the `mood_color` field of a JSON object first, then any hex color in
/// the raw text, then [`DEFAULT_MOOD_COLOR`].
pub fn parse_color(raw: &str) -> String {
    let from_json = match extract::parse_json::<ColorPayload>(raw, "mood color") {
        Ok(payload) => payload
            .mood_color
            .as_deref()
            .and_then(extract::normalize_hex_color),
        Err(e) => {
            warning!("Mood color parsing failed, scanning text: {}", e);
            None
        }
    };

    from_json
        .or_else(|| extract::find_hex_color(raw))
        .unwrap_or_else(|| {
            warning!("No color found in '{}', using default", raw);
            DEFAULT_MOOD_COLOR.to_string()
        })
}

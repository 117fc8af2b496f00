use axum::{Extension, Json};

use crate::types::{
    MoodRequest, PlaylistResponse, SpotifyPlaylistRequest, SpotifyPlaylistResponse,
};

use super::{ApiError, AppState};

pub async fn playlist(
    Extension(state): Extension<AppState>,
    Json(request): Json<MoodRequest>,
) -> Json<PlaylistResponse> {
    let generated = state.generator.generate(&request.text).await;

    Json(PlaylistResponse {
        playlist: generated.songs,
        mood_color: generated.mood_color,
    })
}

/// Materializes a playlist with a client-supplied access token.
pub async fn spotify_playlist(
    Extension(state): Extension<AppState>,
    Json(request): Json<SpotifyPlaylistRequest>,
) -> Result<Json<SpotifyPlaylistResponse>, ApiError> {
    let result = state
        .oauth
        .materializer()
        .materialize(&request.access_token, &request.songs, &request.mood)
        .await?;

    Ok(Json(SpotifyPlaylistResponse {
        playlist_url: result.url,
    }))
}

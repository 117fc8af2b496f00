use axum::{Extension, Json, extract::Query, response::Response};

use crate::{
    Error, info,
    types::{LoginQuery, SaveToSpotifyRequest, SaveToSpotifyResponse, Song},
};

use super::{ApiError, AppState, found};

/// Redirects to the Spotify login page. `songs` is a JSON-encoded song list.
pub async fn login(
    Extension(state): Extension<AppState>,
    Query(query): Query<LoginQuery>,
) -> Result<Response, ApiError> {
    let songs: Vec<Song> = serde_json::from_str(&query.songs)
        .map_err(|e| Error::InvalidRequest(format!("songs must be a JSON song list: {e}")))?;

    let url = state
        .oauth
        .start()
        .build_login_redirect(&query.mood, &songs)?;
    info!("Redirecting to Spotify login for mood '{}'", query.mood);

    Ok(found(url.as_str()))
}

pub async fn save_to_spotify(
    Extension(state): Extension<AppState>,
    Json(request): Json<SaveToSpotifyRequest>,
) -> Result<Json<SaveToSpotifyResponse>, ApiError> {
    let url = state
        .oauth
        .start()
        .build_login_redirect(&request.mood, &request.songs)?;

    Ok(Json(SaveToSpotifyResponse {
        login_url: url.to_string(),
    }))
}

use async_trait::async_trait;
use reqwest::{Client, Response};
use serde::de::DeserializeOwned;
use serde_json::Value;

use crate::{
    Error, Res,
    config::SpotifyConfig,
    types::{
        AddTrackToPlaylistRequest, AddTrackToPlaylistResponse, CreatePlaylistRequest,
        CreatePlaylistResponse, CurrentUser, SearchResponse, Track,
    },
};

use super::SpotifyApi;

const SERVICE: &str = "Spotify";

/// reqwest-backed [`SpotifyApi`].
pub struct SpotifyClient {
    http: Client,
    config: SpotifyConfig,
}

impl SpotifyClient {
    pub fn new(http: Client, config: SpotifyConfig) -> Self {
        SpotifyClient { http, config }
    }

    fn api(&self, path: &str) -> String {
        format!(
            "{uri}{path}",
            uri = self.config.api_url.trim_end_matches('/'),
            path = path
        )
    }
}

async fn read_json<T: DeserializeOwned>(
    response: reqwest::Result<Response>,
    what: &'static str,
) -> Res<T> {
    let response = response
        .and_then(|r| r.error_for_status())
        .map_err(|e| Error::upstream(SERVICE, e))?;

    response.json::<T>().await.map_err(|e| Error::parse(what, e))
}

#[async_trait]
impl SpotifyApi for SpotifyClient {
    async fn exchange_code(&self, code: &str) -> Res<Value> {
        let res = self
            .http
            .post(&self.config.token_url)
            .form(&[
                ("grant_type", "authorization_code"),
                ("code", code),
                ("redirect_uri", self.config.redirect_uri.as_str()),
                ("client_id", self.config.client_id.as_str()),
                ("client_secret", self.config.client_secret.as_str()),
            ])
            .send()
            .await
            .map_err(|e| Error::upstream(SERVICE, e))?;

        let status = res.status();
        let body = res.text().await.map_err(|e| Error::upstream(SERVICE, e))?;

        Ok(serde_json::from_str(&body).unwrap_or_else(|_| {
            serde_json::json!({
                "status": status.as_u16(),
                "body": body,
            })
        }))
    }

    async fn current_user_id(&self, access_token: &str) -> Res<String> {
        let res = self
            .http
            .get(self.api("/me"))
            .bearer_auth(access_token)
            .send()
            .await;

        let user: CurrentUser = read_json(res, "current user").await?;
        Ok(user.id)
    }

    async fn create_playlist(
        &self,
        access_token: &str,
        user_id: &str,
        request: &CreatePlaylistRequest,
    ) -> Res<CreatePlaylistResponse> {
        let res = self
            .http
            .post(self.api(&format!("/users/{}/playlists", user_id)))
            .bearer_auth(access_token)
            .json(request)
            .send()
            .await;

        read_json(res, "created playlist").await
    }

    async fn search_track(&self, access_token: &str, query: &str) -> Res<Option<Track>> {
        let res = self
            .http
            .get(self.api("/search"))
            .bearer_auth(access_token)
            .query(&[("q", query), ("type", "track"), ("limit", "1")])
            .send()
            .await;

        let search: SearchResponse = read_json(res, "track search").await?;
        Ok(search.tracks.and_then(|t| t.items.into_iter().next()))
    }

    async fn add_tracks(&self, access_token: &str, playlist_id: &str, uris: &[String]) -> Res<()> {
        let res = self
            .http
            .post(self.api(&format!("/playlists/{}/tracks", playlist_id)))
            .bearer_auth(access_token)
            .json(&AddTrackToPlaylistRequest {
                uris: uris.to_vec(),
            })
            .send()
            .await;

        let _: AddTrackToPlaylistResponse = read_json(res, "add tracks").await?;
        Ok(())
    }
}

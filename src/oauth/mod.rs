//! # OAuth Handshake
//!
//! Authorization-code flow against Spotify, carrying the generated playlist
//! through the redirect in the `state` parameter.
//!
//! ```text
//! AwaitingLogin ──build_login_redirect──▶ AwaitingCallback ──handle_callback──▶ Completed
//! ```
//!
//! The gateway keeps no session: the login request and the callback arrive as
//! separate HTTP requests, so the callback side starts a handshake with
//! [`OAuthFlow::resume`]. The state only carries payload data; it is not an
//! anti-forgery nonce and is not checked against anything.

pub mod state;

use std::sync::Arc;

use reqwest::Url;
use serde::Serialize;
use serde_json::Value;

use crate::{
    Error, Res,
    config::SpotifyConfig,
    info,
    spotify::{PlaylistMaterializer, SpotifyApi, auth},
    types::{OAuthState, PlaylistResult, Song},
    warning,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandshakeStage {
    AwaitingLogin,
    AwaitingCallback,
    Completed,
}

/// Failure of the callback step, with the token response for diagnostics.
#[derive(Debug)]
pub struct CallbackError {
    pub error: Error,
    /// Raw token-exchange response with credentials redacted.
    pub token_info: Value,
}

#[derive(Debug, Serialize)]
pub struct CallbackErrorBody {
    pub error: String,
    pub token_info: Value,
}

impl CallbackError {
    fn new(error: Error, token_info: &Value) -> Self {
        CallbackError {
            error,
            token_info: auth::redact(token_info),
        }
    }

    pub fn body(&self) -> CallbackErrorBody {
        CallbackErrorBody {
            error: self.error.to_string(),
            token_info: self.token_info.clone(),
        }
    }
}

/// Shared, read-only pieces of the handshake.
#[derive(Clone)]
pub struct OAuthFlow {
    config: Arc<SpotifyConfig>,
    api: Arc<dyn SpotifyApi>,
    materializer: PlaylistMaterializer,
}

impl OAuthFlow {
    pub fn new(config: SpotifyConfig, api: Arc<dyn SpotifyApi>) -> Self {
        let materializer = PlaylistMaterializer::new(Arc::clone(&api), config.open_url.clone());
        OAuthFlow {
            config: Arc::new(config),
            api,
            materializer,
        }
    }

    pub fn materializer(&self) -> &PlaylistMaterializer {
        &self.materializer
    }

    /// Starts a new handshake in [`HandshakeStage::AwaitingLogin`].
    pub fn start(&self) -> Handshake<'_> {
        Handshake {
            flow: self,
            stage: HandshakeStage::AwaitingLogin,
        }
    }

    /// Picks up a handshake whose login redirect was issued by an earlier request.
    pub fn resume(&self) -> Handshake<'_> {
        Handshake {
            flow: self,
            stage: HandshakeStage::AwaitingCallback,
        }
    }
}

pub struct Handshake<'a> {
    flow: &'a OAuthFlow,
    stage: HandshakeStage,
}

impl Handshake<'_> {
    pub fn stage(&self) -> HandshakeStage {
        self.stage
    }

    /// Builds the authorization URL carrying `{songs, mood}` as state.
    pub fn build_login_redirect(&mut self, mood: &str, songs: &[Song]) -> Res<Url> {
        let encoded = state::encode(&OAuthState {
            songs: songs.to_vec(),
            mood: mood.to_string(),
        })?;
        let url = auth::authorize_url(&self.flow.config, Some(&encoded))?;

        self.stage = HandshakeStage::AwaitingCallback;
        Ok(url)
    }

    /// Exchanges `code`, decodes `state` and materializes the playlist.
    ///
    /// The exchange runs before the state is decoded, so a malformed state
    /// still reports what the token endpoint answered.
    pub async fn handle_callback(
        &mut self,
        code: &str,
        state: &str,
    ) -> Result<PlaylistResult, CallbackError> {
        if self.stage == HandshakeStage::Completed {
            return Err(CallbackError::new(
                Error::InvalidRequest("handshake already completed".to_string()),
                &Value::Null,
            ));
        }

        let token_info = match self.flow.api.exchange_code(code).await {
            Ok(token_info) => token_info,
            Err(e) => {
                warning!("Token exchange failed: {}", e);
                let token_info = serde_json::json!({ "error": e.to_string() });
                return Err(CallbackError::new(
                    Error::TokenExchangeFailed {
                        token_info: token_info.clone(),
                    },
                    &token_info,
                ));
            }
        };

        let Some(token) = auth::parse_token(&token_info) else {
            warning!("Token exchange returned no access token");
            return Err(CallbackError::new(
                Error::TokenExchangeFailed {
                    token_info: auth::redact(&token_info),
                },
                &token_info,
            ));
        };

        info!(
            "Spotify token granted for scope '{}' (expires {}, refreshable: {})",
            token.scope,
            token.expires_at().format("%H:%M:%S UTC"),
            token.refresh_token.is_some()
        );

        let payload = state::decode(state).map_err(|e| {
            warning!("Callback state rejected: {}", e);
            CallbackError::new(e, &token_info)
        })?;

        info!(
            "Creating playlist for mood '{}' with {} songs",
            payload.mood,
            payload.songs.len()
        );
        let result = self
            .flow
            .materializer
            .materialize(&token.access_token, &payload.songs, &payload.mood)
            .await
            .map_err(|e| CallbackError::new(e, &token_info))?;

        self.stage = HandshakeStage::Completed;
        Ok(result)
    }
}

//! Configuration management for the moodtune gateway.
//!
//! Values come from environment variables and `.env` files and are read exactly
//! once at startup into a [`Config`]. The resulting value is shared read-only by
//! every request handler.
//!
//! Lookup order:
//! 1. Environment variables (highest priority)
//! 2. `.env` file in the local data directory
//! 3. `.env` file in the working directory
//! 4. Application defaults (where applicable)

use std::{env, path::PathBuf};

use crate::{Error, Res};

pub const DEFAULT_SERVER_ADDRESS: &str = "127.0.0.1:8000";
pub const DEFAULT_OPENAI_API_URL: &str = "https://api.openai.com/v1";
pub const DEFAULT_OPENAI_MODEL: &str = "gpt-4o-mini";
pub const DEFAULT_SPOTIFY_AUTH_URL: &str = "https://accounts.spotify.com/authorize";
pub const DEFAULT_SPOTIFY_TOKEN_URL: &str = "https://accounts.spotify.com/api/token";
pub const DEFAULT_SPOTIFY_API_URL: &str = "https://api.spotify.com/v1";
pub const DEFAULT_SPOTIFY_OPEN_URL: &str = "https://open.spotify.com";
pub const DEFAULT_SPOTIFY_SCOPE: &str =
    "playlist-modify-public playlist-modify-private user-read-private";

/// Loads environment variables from `.env` files.
///
/// Creates the platform-specific local data directory if needed and loads
/// `moodtune/.env` from it, then a `.env` in the working directory. Neither file
/// is required. Variables already present in the environment are never
/// overwritten.
///
/// # Directory Structure
///
/// - Linux: `~/.local/share/moodtune/.env`
/// - macOS: `~/Library/Application Support/moodtune/.env`
/// - Windows: `%LOCALAPPDATA%/moodtune/.env`
///
/// # Errors
///
/// Returns an error string if the data directory cannot be created or an
/// existing `.env` file cannot be parsed.
pub async fn load_env() -> Result<(), String> {
    let mut path = dirs::data_local_dir().unwrap_or_else(|| PathBuf::from("."));
    path.push("moodtune/.env");
    if let Some(parent) = path.parent() {
        async_fs::create_dir_all(parent)
            .await
            .map_err(|e| e.to_string())?;
    }

    if path.is_file() {
        dotenv::from_path(&path).map_err(|e| e.to_string())?;
    }

    match dotenv::dotenv() {
        Ok(_) => Ok(()),
        Err(e) if e.not_found() => Ok(()),
        Err(e) => Err(e.to_string()),
    }
}

/// Process-wide configuration, immutable after startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Address and port the gateway binds to, e.g. `127.0.0.1:8000`.
    pub server_addr: String,
    /// Origins allowed by CORS. Empty means any origin.
    pub allowed_origins: Vec<String>,
    pub openai_api_key: String,
    /// Base URL of the chat-completion API, without `/chat/completions`.
    pub openai_api_url: String,
    pub openai_model: String,
    pub spotify: SpotifyConfig,
}

/// Spotify application credentials and endpoints.
#[derive(Debug, Clone)]
pub struct SpotifyConfig {
    pub client_id: String,
    /// Sent to the token endpoint only; never logged or returned to clients.
    pub client_secret: String,
    /// Must match the redirect URI registered with the Spotify application.
    pub redirect_uri: String,
    pub scope: String,
    pub auth_url: String,
    pub token_url: String,
    pub api_url: String,
    /// Base of browsable playlist links.
    pub open_url: String,
}

impl Config {
    /// Reads the configuration from the process environment.
    ///
    /// # Errors
    ///
    /// Returns [`Error::MissingConfig`] naming the first required variable that
    /// is unset or empty: `OPENAI_API_KEY`, `SPOTIFY_CLIENT_ID`,
    /// `SPOTIFY_CLIENT_SECRET` or `SPOTIFY_REDIRECT_URI`.
    pub fn from_env() -> Res<Self> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Res<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let value = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());
        let required = |key: &'static str| value(key).ok_or(Error::MissingConfig(key));
        let optional = |key: &str, default: &str| value(key).unwrap_or_else(|| default.to_string());

        let allowed_origins = value("ALLOWED_ORIGINS")
            .map(|origins| {
                origins
                    .split(',')
                    .map(|o| o.trim().trim_end_matches('/').to_string())
                    .filter(|o| !o.is_empty())
                    .collect()
            })
            .unwrap_or_default();

        Ok(Config {
            server_addr: optional("SERVER_ADDRESS", DEFAULT_SERVER_ADDRESS),
            allowed_origins,
            openai_api_key: required("OPENAI_API_KEY")?,
            openai_api_url: optional("OPENAI_API_URL", DEFAULT_OPENAI_API_URL),
            openai_model: optional("OPENAI_MODEL", DEFAULT_OPENAI_MODEL),
            spotify: SpotifyConfig {
                client_id: required("SPOTIFY_CLIENT_ID")?,
                client_secret: required("SPOTIFY_CLIENT_SECRET")?,
                redirect_uri: required("SPOTIFY_REDIRECT_URI")?,
                scope: optional("SPOTIFY_API_AUTH_SCOPE", DEFAULT_SPOTIFY_SCOPE),
                auth_url: optional("SPOTIFY_API_AUTH_URL", DEFAULT_SPOTIFY_AUTH_URL),
                token_url: optional("SPOTIFY_API_TOKEN_URL", DEFAULT_SPOTIFY_TOKEN_URL),
                api_url: optional("SPOTIFY_API_URL", DEFAULT_SPOTIFY_API_URL),
                open_url: optional("SPOTIFY_OPEN_URL", DEFAULT_SPOTIFY_OPEN_URL),
            },
        })
    }
}

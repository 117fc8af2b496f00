use chrono::Utc;
use reqwest::Url;
use serde_json::Value;

use crate::{Error, Res, config::SpotifyConfig, types::AccessToken};

const REDACTED: &str = "[redacted]";

/// Builds the Spotify authorization URL.
///
/// `state` is added verbatim as the `state` query value (the URL encoder
/// escapes it once more for transport; Spotify hands back the original string).
pub fn authorize_url(config: &SpotifyConfig, state: Option<&str>) -> Res<Url> {
    let mut params = vec![
        ("response_type", "code"),
        ("client_id", config.client_id.as_str()),
        ("scope", config.scope.as_str()),
        ("redirect_uri", config.redirect_uri.as_str()),
    ];
    if let Some(state) = state {
        params.push(("state", state));
    }

    Url::parse_with_params(&config.auth_url, &params)
        .map_err(|e| Error::InvalidRequest(format!("invalid authorization url: {e}")))
}

/// Reads an [`AccessToken`] from a token response.
///
/// Returns `None` unless the response carries a non-empty `access_token`.
pub fn parse_token(token_info: &Value) -> Option<AccessToken> {
    let access_token = token_info["access_token"].as_str().filter(|t| !t.is_empty())?;

    Some(AccessToken {
        access_token: access_token.to_string(),
        refresh_token: token_info["refresh_token"].as_str().map(str::to_string),
        scope: token_info["scope"].as_str().unwrap_or_default().to_string(),
        expires_in: token_info["expires_in"].as_u64().unwrap_or(3600),
        obtained_at: Utc::now(),
    })
}

/// Copy of a token response that is safe to return to clients.
pub fn redact(token_info: &Value) -> Value {
    let mut redacted = token_info.clone();
    if let Some(object) = redacted.as_object_mut() {
        for key in ["access_token", "refresh_token"] {
            if let Some(value) = object.get_mut(key) {
                *value = Value::String(REDACTED.to_string());
            }
        }
    }
    redacted
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn config() -> SpotifyConfig {
        SpotifyConfig {
            client_id: "client-123".to_string(),
            client_secret: "secret".to_string(),
            redirect_uri: "http://127.0.0.1:8000/callback".to_string(),
            scope: "playlist-modify-private user-read-private".to_string(),
            auth_url: "https://accounts.spotify.com/authorize".to_string(),
            token_url: "https://accounts.spotify.com/api/token".to_string(),
            api_url: "https://api.spotify.com/v1".to_string(),
            open_url: "https://open.spotify.com".to_string(),
        }
    }

    #[test]
    fn test_authorize_url_params() {
        let url = authorize_url(&config(), Some("%7B%22a%22%7D")).unwrap();
        let pairs: Vec<(String, String)> = url.query_pairs().into_owned().collect();

        assert_eq!(url.host_str(), Some("accounts.spotify.com"));
        assert!(pairs.contains(&("response_type".into(), "code".into())));
        assert!(pairs.contains(&("client_id".into(), "client-123".into())));
        assert!(pairs.contains(&(
            "scope".into(),
            "playlist-modify-private user-read-private".into()
        )));
        assert!(pairs.contains(&(
            "redirect_uri".into(),
            "http://127.0.0.1:8000/callback".into()
        )));
        assert!(pairs.contains(&("state".into(), "%7B%22a%22%7D".into())));
        assert!(!url.as_str().contains("secret"));
    }

    #[test]
    fn test_parse_token() {
        let token = parse_token(&json!({
            "access_token": "BQC",
            "token_type": "Bearer",
            "scope": "user-read-private",
            "expires_in": 3600,
            "refresh_token": "AQD"
        }))
        .unwrap();

        assert_eq!(token.access_token, "BQC");
        assert_eq!(token.refresh_token.as_deref(), Some("AQD"));
        assert_eq!(token.expires_in, 3600);
        assert_eq!((token.expires_at() - token.obtained_at).num_seconds(), 3600);

        assert!(parse_token(&json!({"error": "invalid_grant"})).is_none());
        assert!(parse_token(&json!({"access_token": ""})).is_none());
    }

    #[test]
    fn test_redact() {
        let redacted = redact(&json!({"access_token": "BQC", "scope": "x"}));
        assert_eq!(redacted, json!({"access_token": REDACTED, "scope": "x"}));
        assert_eq!(redact(&json!("plain")), json!("plain"));
    }
}

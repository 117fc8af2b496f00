use serde_json::Value;
use thiserror::Error;

/// Errors raised while generating playlists or talking to Spotify.
///
/// Generation failures never leave the generator: they are logged and replaced
/// with fallback content. Everything on the OAuth and materialization path is
/// surfaced to the caller.
#[derive(Debug, Error)]
pub enum Error {
    #[error("call to {service} failed: {message}")]
    UpstreamCallFailed {
        service: &'static str,
        message: String,
    },

    #[error("could not parse {what}: {message}")]
    ResponseParseFailed { what: &'static str, message: String },

    #[error("malformed OAuth state: {0}")]
    MalformedState(String),

    #[error("token exchange did not return an access token")]
    TokenExchangeFailed { token_info: Value },

    /// Non-fatal: the song is left out of the playlist.
    #[error("no track found for query '{0}'")]
    TrackNotFound(String),

    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0} must be set")]
    MissingConfig(&'static str),

    #[error("invalid value for {0}: {1}")]
    InvalidConfig(&'static str, String),

    #[error(transparent)]
    Io(#[from] std::io::Error),
}

impl Error {
    pub fn upstream(service: &'static str, err: impl std::fmt::Display) -> Self {
        Error::UpstreamCallFailed {
            service,
            message: err.to_string(),
        }
    }

    pub fn parse(what: &'static str, err: impl std::fmt::Display) -> Self {
        Error::ResponseParseFailed {
            what,
            message: err.to_string(),
        }
    }
}

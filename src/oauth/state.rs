//! Codec for the OAuth `state` parameter.
//!
//! The state is compact JSON, percent-encoded so it survives as a single query
//! value. The provider echoes it back untouched; the gateway is the only party
//! that reads it.

use std::borrow::Cow;

use crate::{Error, Res, types::OAuthState};

pub fn encode(state: &OAuthState) -> Res<String> {
    let json = serde_json::to_string(state)
        .map_err(|e| Error::MalformedState(format!("cannot serialize state: {e}")))?;
    Ok(urlencoding::encode(&json).into_owned())
}

/// Decodes a state produced by [`encode`].
///
/// # Errors
///
/// [`Error::MalformedState`] if the value is not valid percent-encoded UTF-8 or
/// does not hold a `{songs, mood}` object.
pub fn decode(encoded: &str) -> Res<OAuthState> {
    let json: Cow<'_, str> = urlencoding::decode(encoded)
        .map_err(|e| Error::MalformedState(format!("invalid percent-encoding: {e}")))?;
    serde_json::from_str(&json).map_err(|e| Error::MalformedState(format!("invalid payload: {e}")))
}

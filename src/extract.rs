//! Best-effort extraction of structured data from model output.
//!
//! Completion models are asked for bare JSON but regularly wrap it in markdown
//! fences or surround it with prose. The helpers here recover what they can and
//! report failure with `None` or an error, leaving the fallback policy to the
//! caller.

use std::sync::LazyLock;

use regex::Regex;
use serde::de::DeserializeOwned;

use crate::{Error, Res};

static HASHED_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"#([0-9A-Fa-f]{6})").expect("valid regex"));

static BARE_HEX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\b([0-9A-Fa-f]{6})\b").expect("valid regex"));

static STRICT_COLOR: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^#?([0-9A-Fa-f]{6})$").expect("valid regex"));

/// Removes a leading and a trailing markdown code fence.
///
/// The opening fence may carry a language tag (```` ```json ````). Text without
/// fences is returned trimmed and otherwise unchanged.
pub fn strip_code_fence(raw: &str) -> &str {
    let mut text = raw.trim();

    if let Some(rest) = text.strip_prefix("```") {
        // drop the language tag up to the end of the fence line
        text = match rest.find(['\n', '[', '{']) {
            Some(idx) if rest[..idx].trim().chars().all(|c| c.is_ascii_alphanumeric()) => {
                &rest[idx..]
            }
            _ => rest,
        };
        text = text.trim_start();
    }

    if let Some(rest) = text.strip_suffix("```") {
        text = rest.trim_end();
    }

    text
}

/// Parses JSON after stripping code fences.
pub fn parse_json<T: DeserializeOwned>(raw: &str, what: &'static str) -> Res<T> {
    serde_json::from_str(strip_code_fence(raw)).map_err(|e| Error::parse(what, e))
}

/// Normalizes a color value to `#RRGGBB`, keeping the digit case.
///
/// Accepts the six hex digits with or without a leading `#`.
pub fn normalize_hex_color(value: &str) -> Option<String> {
    STRICT_COLOR
        .captures(value.trim())
        .map(|caps| format!("#{}", &caps[1]))
}

/// Finds the first hex color anywhere in free text.
///
/// A `#`-prefixed run of six hex digits wins over a bare one. A bare run must
/// stand alone as a word so ordinary words or longer numbers do not match.
pub fn find_hex_color(text: &str) -> Option<String> {
    HASHED_HEX
        .captures(text)
        .or_else(|| BARE_HEX.captures(text))
        .map(|caps| format!("#{}", &caps[1]))
}

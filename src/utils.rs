/// Marker appended to every generated playlist name.
pub const PLAYLIST_NAME_SUFFIX: &str = "Playlist 🎧";

/// Capitalizes the first letter of every word and lowercases the rest.
///
/// A word starts after any non-alphabetic character, so `"rainy-day blues"`
/// becomes `"Rainy-Day Blues"` and `"don't"` becomes `"Don'T"`.
pub fn title_case(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    let mut prev_is_alpha = false;

    for c in text.chars() {
        if c.is_alphabetic() {
            if prev_is_alpha {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            prev_is_alpha = true;
        } else {
            out.push(c);
            prev_is_alpha = false;
        }
    }

    out
}

pub fn playlist_name(mood: &str) -> String {
    format!("{} {}", title_case(mood), PLAYLIST_NAME_SUFFIX)
}

pub fn playlist_description(mood: &str) -> String {
    format!("AI-generated playlist for the mood: {}", mood)
}

pub fn playlist_url(open_url: &str, playlist_id: &str) -> String {
    format!(
        "{base}/playlist/{id}",
        base = open_url.trim_end_matches('/'),
        id = playlist_id
    )
}

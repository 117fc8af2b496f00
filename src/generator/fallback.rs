use crate::types::Song;

/// Color used whenever no usable color comes back from the model.
pub const DEFAULT_MOOD_COLOR: &str = "#E5E7EB";

/// Returned when the song request itself fails.
pub fn short_fallback() -> Vec<Song> {
    placeholders(5)
}

/// Returned when the song request succeeds but its output cannot be used.
pub fn full_fallback() -> Vec<Song> {
    placeholders(10)
}

fn placeholders(count: usize) -> Vec<Song> {
    (1..=count)
        .map(|i| Song::new(format!("Fallback Song {i}"), format!("Fallback Artist {i}")))
        .collect()
}

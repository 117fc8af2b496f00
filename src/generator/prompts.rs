pub const SONGS_TEMPERATURE: f32 = 0.8;
pub const COLOR_TEMPERATURE: f32 = 0.5;

pub fn songs_prompt(mood: &str) -> String {
    let example = (1..=10)
        .map(|i| format!(r#"  {{"title": "Song{i}", "artist": "Artist{i}"}}"#))
        .collect::<Vec<_>>()
        .join(",\n");

    format!(
        "The user is feeling: '{mood}'.\n\
         Suggest a random number of **niche, fresh songs** that match this mood. \
         Make sure the number of songs in the playlist is greater than **ten**.\n\
         Avoid mainstream hits; focus on music the user is unlikely to have heard before.\n\
         Return ONLY a JSON array of objects like:\n[\n{example}\n]"
    )
}

pub fn color_prompt(mood: &str) -> String {
    format!(
        "The user is feeling: '{mood}'.\n\
         Return a single JSON object with a HEX color that best represents this mood.\n\
         Example: {{\"mood_color\": \"#A1B2C3\"}}\n\
         Return only valid JSON, no extra text."
    )
}

// Prompt template and response schema for commute playlists
//
// The instruction and the declared output schema together pin the model to
// the exact list shape the rest of the app renders: 7 songs, 5 Korean and
// 2 international, each with a reason and a YouTube search link.

use serde_json::{json, Value};

pub const KOREAN_SONG_COUNT: usize = 5;
pub const GLOBAL_SONG_COUNT: usize = 2;
pub const TOTAL_SONG_COUNT: usize = KOREAN_SONG_COUNT + GLOBAL_SONG_COUNT;

/// Build the natural-language instruction for a theme.
pub fn build_recommendation_prompt(theme: &str) -> String {
    format!(
        r#"Recommend {total} songs for a daily commute based on the theme: "{theme}".
Constraints:
1. Exactly {korean} songs must be Korean (K-POP/K-Indie/K-Ballad).
2. Exactly {global} songs must be International (Pop/Rock/Jazz/etc).
3. Provide a brief reason for each choice suitable for subway/bus travel.
4. Generate a YouTube search link for each (format: https://www.youtube.com/results?search_query=Artist+Song+Title)."#,
        total = TOTAL_SONG_COUNT,
        korean = KOREAN_SONG_COUNT,
        global = GLOBAL_SONG_COUNT,
        theme = theme,
    )
}

/// The structured-output schema declared to the model.
/// Mirrors `RecommendationResponse` / `Song` field for field.
pub fn recommendation_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "date": { "type": "STRING" },
            "theme": { "type": "STRING" },
            "songs": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "title": { "type": "STRING" },
                        "artist": { "type": "STRING" },
                        "category": { "type": "STRING", "enum": ["K-POP", "GLOBAL"] },
                        "reason": { "type": "STRING" },
                        "youtubeUrl": { "type": "STRING" }
                    },
                    "required": ["title", "artist", "category", "reason", "youtubeUrl"]
                }
            }
        },
        "required": ["date", "theme", "songs"]
    })
}

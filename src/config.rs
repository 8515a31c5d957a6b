use std::env;

use tracing::info;

// The event-category enumeration is festival configuration, not business
// logic: the eligibility query only asks "is this student assigned to at
// least one of these". Override with EVENT_CATEGORIES (comma separated).
const DEFAULT_EVENT_CATEGORIES: &[&str] = &[
    "classical_vocal_solo",
    "classical_instrumental_percussion",
    "classical_instrumental_non_percussion",
    "light_vocal_solo",
    "western_vocal_solo",
    "group_song_indian",
    "group_song_western",
    "folk_orchestra",
    "folk_tribal_dance",
    "classical_dance_solo",
    "one_act_play",
    "skit",
    "mime",
    "mimicry",
    "quiz",
    "debate",
    "elocution",
    "collage",
    "rangoli",
    "cartooning",
    "installation",
    "poster_making",
    "clay_modelling",
    "on_spot_painting",
];

#[derive(Clone)]
pub struct Config {
    pub event_categories: Vec<String>,
    pub final_approval_timeout_ms: u64,
}

impl Config {
    pub fn load() -> Self {
        let event_categories = match env::var("EVENT_CATEGORIES") {
            Ok(raw) => {
                let parsed: Vec<String> = raw
                    .split(',')
                    .map(|s| s.trim().to_string())
                    .filter(|s| !s.is_empty())
                    .collect();
                if parsed.is_empty() {
                    default_event_categories()
                } else {
                    parsed
                }
            }
            Err(_) => default_event_categories(),
        };

        let final_approval_timeout_ms = env::var("FINAL_APPROVAL_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
            .unwrap_or(15_000);

        info!(
            categories = event_categories.len(),
            timeout_ms = final_approval_timeout_ms,
            "config_loaded"
        );

        Self {
            event_categories,
            final_approval_timeout_ms,
        }
    }
}

fn default_event_categories() -> Vec<String> {
    DEFAULT_EVENT_CATEGORIES
        .iter()
        .map(|s| s.to_string())
        .collect()
}

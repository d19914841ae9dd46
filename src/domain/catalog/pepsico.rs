use super::{AudioFormatEntry, Catalog, LanguageEntry, ProductEntry};

fn product(name: &str, launch_year: u16, tone: &str) -> ProductEntry {
    ProductEntry {
        name: name.to_string(),
        launch_year,
        tone: tone.to_string(),
    }
}

fn format(label: &str, duration_seconds: u32) -> AudioFormatEntry {
    AudioFormatEntry {
        label: label.to_string(),
        duration_seconds,
    }
}

fn language(label: &str, language_code: &str, voice_name: &str) -> LanguageEntry {
    LanguageEntry {
        label: label.to_string(),
        language_code: language_code.to_string(),
        voice_name: voice_name.to_string(),
    }
}

impl Catalog {
    /// The controlled PepsiCo catalog the studio ships with
    pub fn pepsico() -> Self {
        Catalog::new(
            vec![
                product("Pepsi", 1893, "bold, refreshing, confident"),
                product("Gatorade", 1965, "performance-driven, motivational, credible"),
                product("Lay's", 1932, "joyful, warm, social"),
                product("Doritos", 1964, "bold, playful, energetic"),
            ],
            [
                "Brand Origin Story",
                "How It's Made",
                "Lifestyle & Social Moments",
                "Party & Celebration",
                "Food Pairing & Recipes",
                "Sports & Performance",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            vec![
                format("Radio 15s", 15),
                format("Radio 30s", 30),
                format("Spotify Ad 30s", 30),
                format("Spotify Ad 60s", 60),
                format("Podcast Mid-roll 45s", 45),
            ],
            vec![
                language("English (US)", "en-US", "en-US-Neural2-D"),
                language("Spanish (LATAM)", "es-US", "es-US-Neural2-B"),
                language("Portuguese (BR)", "pt-BR", "pt-BR-Neural2-B"),
            ],
        )
    }
}

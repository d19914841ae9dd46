use crate::domain::catalog::ResolvedAd;
use regex::Regex;
use std::sync::LazyLock;

static WHITESPACE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\s+").unwrap());

/// Brand-safety rules included in every prompt
pub const BRAND_SAFETY_RULES: &[&str] = &[
    "Target adult consumers only",
    "No health, medical, or nutritional claims",
    "No exaggeration or false claims",
    "Script must sound natural when spoken",
    "Avoid slang unless brand-appropriate",
    "Do NOT use emojis",
    "Do NOT include titles or formatting",
    "Respect the time limit strictly",
];

pub const FINAL_DIRECTIVE: &str =
    "Output only the final script text, with no preamble and no markdown.";

/// Compose the copywriting instruction for the generation service.
///
/// A non-blank campaign context becomes one extra instruction line; the
/// output-only directive always comes last.
pub fn build_marketing_prompt(ad: &ResolvedAd, campaign_context: Option<&str>) -> String {
    let mut prompt = String::new();

    prompt.push_str("You are a senior brand copywriter working at PepsiCo.\n\n");
    prompt.push_str("Create a professional audio marketing script.\n\n");

    prompt.push_str(&format!("Product: {}\n", ad.product));
    prompt.push_str(&format!("Launch year: {}\n", ad.launch_year));
    prompt.push_str(&format!("Brand voice: {}\n", ad.tone));
    if let Some(story_mode) = &ad.story_mode {
        prompt.push_str(&format!("Story type: {}\n", story_mode));
    }
    prompt.push_str(&format!("Target duration: {} seconds\n", ad.duration_seconds));
    prompt.push_str(&format!("Language: {}\n", ad.language));

    prompt.push_str("\nRules:\n");
    for rule in BRAND_SAFETY_RULES {
        prompt.push_str(&format!("- {}\n", rule));
    }

    if let Some(context) = campaign_context.map(single_line).filter(|c| !c.is_empty()) {
        prompt.push_str(&format!("\nCampaign context: {}\n", context));
    }

    prompt.push('\n');
    prompt.push_str(FINAL_DIRECTIVE);
    prompt
}

fn single_line(text: &str) -> String {
    WHITESPACE.replace_all(text, " ").trim().to_string()
}

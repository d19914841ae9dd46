use serde::{Deserialize, Serialize};

pub mod pepsico;

/// A product the studio is allowed to advertise
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ProductEntry {
    pub name: String,
    pub launch_year: u16,
    /// Brand voice handed to the copywriter, e.g. "bold, refreshing, confident"
    pub tone: String,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct AudioFormatEntry {
    pub label: String,
    pub duration_seconds: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LanguageEntry {
    pub label: String,
    pub language_code: String,
    pub voice_name: String,
}

/// Every parameter the pipeline needs, resolved from user-facing labels
#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedAd {
    pub product: String,
    pub tone: String,
    pub launch_year: u16,
    pub story_mode: Option<String>,
    pub duration_seconds: u32,
    pub language: String,
    pub language_code: String,
    pub voice_name: String,
}

/// Closed choices offered by the form
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CatalogOptions {
    pub products: Vec<String>,
    pub story_modes: Vec<String>,
    pub audio_formats: Vec<String>,
    pub languages: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CatalogError {
    #[error("unknown {kind} {label:?}")]
    Unknown { kind: &'static str, label: String },
}

/// Immutable lookup tables, built once at startup and shared by reference
#[derive(Debug, Clone)]
pub struct Catalog {
    products: Vec<ProductEntry>,
    story_modes: Vec<String>,
    audio_formats: Vec<AudioFormatEntry>,
    languages: Vec<LanguageEntry>,
}

impl Catalog {
    pub fn new(
        products: Vec<ProductEntry>,
        story_modes: Vec<String>,
        audio_formats: Vec<AudioFormatEntry>,
        languages: Vec<LanguageEntry>,
    ) -> Self {
        Self {
            products,
            story_modes,
            audio_formats,
            languages,
        }
    }

    pub fn products(&self) -> &[ProductEntry] {
        &self.products
    }

    pub fn story_modes(&self) -> &[String] {
        &self.story_modes
    }

    pub fn audio_formats(&self) -> &[AudioFormatEntry] {
        &self.audio_formats
    }

    pub fn languages(&self) -> &[LanguageEntry] {
        &self.languages
    }

    pub fn options(&self) -> CatalogOptions {
        CatalogOptions {
            products: self.products.iter().map(|p| p.name.clone()).collect(),
            story_modes: self.story_modes.clone(),
            audio_formats: self.audio_formats.iter().map(|f| f.label.clone()).collect(),
            languages: self.languages.iter().map(|l| l.label.clone()).collect(),
        }
    }

    /// Resolve form labels into pipeline parameters.
    ///
    /// The form only offers catalog keys, so an unknown label means the caller
    /// bypassed it; that is reported rather than guessed around.
    pub fn resolve(
        &self,
        product: &str,
        story_mode: Option<&str>,
        audio_format: &str,
        language: &str,
    ) -> Result<ResolvedAd, CatalogError> {
        let product = self
            .products
            .iter()
            .find(|p| p.name == product)
            .ok_or_else(|| unknown("product", product))?;

        // A cleared form field arrives as an empty string
        let story_mode = match story_mode.filter(|m| !m.trim().is_empty()) {
            Some(mode) => Some(
                self.story_modes
                    .iter()
                    .find(|m| m.as_str() == mode)
                    .cloned()
                    .ok_or_else(|| unknown("story mode", mode))?,
            ),
            None => None,
        };

        let format = self
            .audio_formats
            .iter()
            .find(|f| f.label == audio_format)
            .ok_or_else(|| unknown("audio format", audio_format))?;

        let language = self
            .languages
            .iter()
            .find(|l| l.label == language)
            .ok_or_else(|| unknown("language", language))?;

        Ok(ResolvedAd {
            product: product.name.clone(),
            tone: product.tone.clone(),
            launch_year: product.launch_year,
            story_mode,
            duration_seconds: format.duration_seconds,
            language: language.label.clone(),
            language_code: language.language_code.clone(),
            voice_name: language.voice_name.clone(),
        })
    }
}

fn unknown(kind: &'static str, label: &str) -> CatalogError {
    CatalogError::Unknown {
        kind,
        label: label.to_string(),
    }
}

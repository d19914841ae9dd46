pub mod audio_store;
pub mod gemini_script_repository;
pub mod google_speech_repository;
pub mod provider_error;
pub mod script_repository;
pub mod speech_repository;

pub use audio_store::AudioStore;
pub use gemini_script_repository::{GeminiScriptRepository, GenerationSettings};
pub use google_speech_repository::GoogleSpeechRepository;
pub use provider_error::ProviderError;
pub use script_repository::ScriptRepository;
pub use speech_repository::{SpeechRepository, VoiceSelection};

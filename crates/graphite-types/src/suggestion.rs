//! Suggestion payloads exchanged with the text-generation provider.

use serde::{Deserialize, Serialize};

/// A drafted quest idea. Never persisted automatically.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct QuestSuggestion {
    pub title: String,
    pub description: String,
}

/// Sampling parameters sent with every generation request.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct GenerationParameters {
    /// Maximum length of the generated sequence (prompt included).
    pub max_length: u32,
    pub temperature: f64,
    /// Nucleus-sampling threshold.
    pub top_p: f64,
}

impl Default for GenerationParameters {
    fn default() -> Self {
        Self {
            max_length: 100,
            temperature: 0.9,
            top_p: 0.95,
        }
    }
}

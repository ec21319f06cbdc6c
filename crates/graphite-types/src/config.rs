//! Bot configuration types.
//!
//! `BotConfig` represents the top-level `config.toml` in the data directory.
//! Credentials never live here; they come from the environment.

use serde::{Deserialize, Serialize};

use crate::suggestion::GenerationParameters;

/// Top-level configuration for the Graphite Quest bot.
///
/// Loaded from `~/.graphite/config.toml`. All fields have sensible defaults.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BotConfig {
    /// Quests shown per `/quest list` page.
    #[serde(default = "default_page_size")]
    pub page_size: u32,

    /// Register slash commands for this guild only (instant availability).
    /// Global registration is used when unset.
    #[serde(default)]
    pub guild_id: Option<u64>,

    #[serde(default)]
    pub suggestion: SuggestionConfig,
}

fn default_page_size() -> u32 {
    5
}

impl Default for BotConfig {
    fn default() -> Self {
        Self {
            page_size: default_page_size(),
            guild_id: None,
            suggestion: SuggestionConfig::default(),
        }
    }
}

/// Settings for the outbound text-generation service.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SuggestionConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,

    #[serde(default = "default_model")]
    pub model: String,

    #[serde(default = "default_max_length")]
    pub max_length: u32,

    #[serde(default = "default_temperature")]
    pub temperature: f64,

    #[serde(default = "default_top_p")]
    pub top_p: f64,

    /// Transport-level timeout for one generation call.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,
}

fn default_base_url() -> String {
    "https://api-inference.huggingface.co".to_string()
}

fn default_model() -> String {
    "gpt2".to_string()
}

fn default_max_length() -> u32 {
    GenerationParameters::default().max_length
}

fn default_temperature() -> f64 {
    GenerationParameters::default().temperature
}

fn default_top_p() -> f64 {
    GenerationParameters::default().top_p
}

fn default_timeout_secs() -> u64 {
    15
}

impl SuggestionConfig {
    pub fn parameters(&self) -> GenerationParameters {
        GenerationParameters {
            max_length: self.max_length,
            temperature: self.temperature,
            top_p: self.top_p,
        }
    }
}

impl Default for SuggestionConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            max_length: default_max_length(),
            temperature: default_temperature(),
            top_p: default_top_p(),
            timeout_secs: default_timeout_secs(),
        }
    }
}

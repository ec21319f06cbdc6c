//! Quest suggestions via an external text-generation service.
//!
//! - `SuggestionProvider`: port implemented by HTTP adapters in graphite-infra
//! - `prompt`: deterministic prompt template
//! - `format`: deterministic post-processing into title/description
//!
//! Suggestions are read-only with respect to the quest store: nothing here
//! persists anything.

pub mod format;
pub mod prompt;
pub mod provider;

use graphite_types::error::SuggestionError;
use graphite_types::suggestion::{GenerationParameters, QuestSuggestion};

use self::provider::SuggestionProvider;

/// Drafts quest ideas from a theme.
pub struct SuggestionService<P: SuggestionProvider> {
    provider: P,
    params: GenerationParameters,
}

impl<P: SuggestionProvider> SuggestionService<P> {
    pub fn new(provider: P, params: GenerationParameters) -> Self {
        Self { provider, params }
    }

    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// One generation call, no retries.
    #[tracing::instrument(name = "suggest", skip(self), fields(provider = %self.provider.name()))]
    pub async fn suggest(&self, theme: &str) -> Result<QuestSuggestion, SuggestionError> {
        let prompt = prompt::build_prompt(theme);
        let raw = self.provider.generate(&prompt, &self.params).await?;
        tracing::debug!(chars = raw.chars().count(), "generation received");
        Ok(format::suggestion_from_generated(&raw, &prompt))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::MockProvider;

    #[tokio::test]
    async fn test_suggest_formats_generation() {
        let prompt = prompt::build_prompt("caves");
        let raw = format!("{prompt} Find the Lost Gem. Explore the cave. Bring a lamp");
        let svc = SuggestionService::new(MockProvider::ok(&raw), GenerationParameters::default());

        let suggestion = svc.suggest("caves").await.unwrap();
        assert_eq!(suggestion.title, "Find the Lost Gem");
        assert_eq!(suggestion.description, "Explore the cave. Bring a lamp.");
        assert_eq!(svc.provider().calls(), 1);
    }

    #[tokio::test]
    async fn test_suggest_propagates_provider_errors() {
        let svc = SuggestionService::new(MockProvider::unconfigured(), GenerationParameters::default());
        assert!(matches!(
            svc.suggest("caves").await,
            Err(SuggestionError::Configuration(_))
        ));

        let svc = SuggestionService::new(MockProvider::unavailable(), GenerationParameters::default());
        assert!(matches!(
            svc.suggest("caves").await,
            Err(SuggestionError::ProviderUnavailable(_))
        ));
    }
}

//! SuggestionProvider trait definition.

use graphite_types::error::SuggestionError;
use graphite_types::suggestion::GenerationParameters;

/// Trait for text-generation backends used to draft quest ideas.
///
/// Implementations live in graphite-infra (e.g., `HuggingFaceProvider`).
/// One call per `/quest suggest`; implementations must not retry.
pub trait SuggestionProvider: Send + Sync {
    /// Human-readable provider name, used in logs.
    fn name(&self) -> &str;

    /// Generate raw text for `prompt`.
    ///
    /// Returns `SuggestionError::Configuration` without touching the network
    /// when no credential is configured, and
    /// `SuggestionError::ProviderUnavailable` when the service cannot be
    /// reached or answers with a non-success status.
    fn generate(
        &self,
        prompt: &str,
        params: &GenerationParameters,
    ) -> impl std::future::Future<Output = Result<String, SuggestionError>> + Send;
}

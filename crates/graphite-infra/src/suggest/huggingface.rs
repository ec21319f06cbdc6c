//! HuggingFaceProvider -- concrete [`SuggestionProvider`] for the Hugging Face
//! Inference API text-generation endpoint.
//!
//! Sends `POST {base_url}/models/{model}` with a bearer token and the
//! sampling parameters, and returns the first `generated_text`. Exactly one
//! request per call; failures are reported, never retried.
//!
//! The API key is wrapped in [`secrecy::SecretString`] and is never logged
//! or included in `Debug` output.

use std::time::Duration;

use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize};

use graphite_core::suggest::provider::SuggestionProvider;
use graphite_types::config::SuggestionConfig;
use graphite_types::error::SuggestionError;
use graphite_types::suggestion::GenerationParameters;

/// Hugging Face text-generation provider.
///
/// Built even when no API key is configured so the bot can start; every
/// call then fails fast with `SuggestionError::Configuration`.
pub struct HuggingFaceProvider {
    client: reqwest::Client,
    api_key: Option<SecretString>,
    base_url: String,
    model: String,
}

#[derive(Debug, Serialize)]
struct GenerationRequest<'a> {
    inputs: &'a str,
    parameters: RequestParameters,
    options: RequestOptions,
}

#[derive(Debug, Serialize)]
struct RequestParameters {
    max_length: u32,
    temperature: f64,
    top_p: f64,
    do_sample: bool,
}

#[derive(Debug, Serialize)]
struct RequestOptions {
    wait_for_model: bool,
}

#[derive(Debug, Deserialize)]
struct GeneratedText {
    #[serde(default)]
    generated_text: String,
}

/// The endpoint answers with a list; some deployments return a bare object.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum GenerationResponse {
    Batch(Vec<GeneratedText>),
    Single(GeneratedText),
}

impl GenerationResponse {
    fn into_text(self) -> String {
        match self {
            GenerationResponse::Batch(items) => items
                .into_iter()
                .next()
                .map(|g| g.generated_text)
                .unwrap_or_default(),
            GenerationResponse::Single(g) => g.generated_text,
        }
    }
}

impl HuggingFaceProvider {
    /// Create a provider from configuration and an optional API key.
    pub fn new(api_key: Option<SecretString>, config: &SuggestionConfig) -> Result<Self, SuggestionError> {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| SuggestionError::Configuration(format!("failed to create HTTP client: {e}")))?;

        Ok(Self {
            client,
            api_key: api_key.filter(|key| !key.expose_secret().trim().is_empty()),
            base_url: config.base_url.trim_end_matches('/').to_string(),
            model: config.model.clone(),
        })
    }

    /// Whether an API key is available.
    pub fn is_configured(&self) -> bool {
        self.api_key.is_some()
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    fn url(&self) -> String {
        format!("{}/models/{}", self.base_url, self.model)
    }
}

impl SuggestionProvider for HuggingFaceProvider {
    fn name(&self) -> &str {
        "huggingface"
    }

    async fn generate(
        &self,
        prompt: &str,
        params: &GenerationParameters,
    ) -> Result<String, SuggestionError> {
        let Some(api_key) = &self.api_key else {
            return Err(SuggestionError::Configuration(
                "HUGGINGFACE_API_KEY is not set".to_string(),
            ));
        };

        let body = GenerationRequest {
            inputs: prompt,
            parameters: RequestParameters {
                max_length: params.max_length,
                temperature: params.temperature,
                top_p: params.top_p,
                do_sample: true,
            },
            options: RequestOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(self.url())
            .bearer_auth(api_key.expose_secret())
            .json(&body)
            .send()
            .await
            .map_err(|e| SuggestionError::ProviderUnavailable(format!("HTTP request failed: {e}")))?;

        let status = response.status();
        if !status.is_success() {
            let error_body = response.text().await.unwrap_or_default();
            return Err(SuggestionError::ProviderUnavailable(format!(
                "HTTP {status}: {error_body}"
            )));
        }

        let parsed: GenerationResponse = response.json().await.map_err(|e| {
            SuggestionError::ProviderUnavailable(format!("failed to parse response: {e}"))
        })?;

        Ok(parsed.into_text())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockito::Matcher;
    use serde_json::json;

    fn config_for(base_url: &str) -> SuggestionConfig {
        SuggestionConfig {
            base_url: base_url.to_string(),
            timeout_secs: 5,
            ..SuggestionConfig::default()
        }
    }

    fn key() -> Option<SecretString> {
        Some(SecretString::from("hf_test_key".to_string()))
    }

    #[tokio::test]
    async fn test_generate_sends_parameters_and_returns_text() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gpt2")
            .match_header("authorization", "Bearer hf_test_key")
            .match_body(Matcher::PartialJson(json!({
                "inputs": "Quest:",
                "parameters": { "max_length": 100, "temperature": 0.9, "top_p": 0.95 }
            })))
            .with_status(200)
            .with_header("content-type", "application/json")
            .with_body(r#"[{"generated_text": "Quest: Find the gem. Search the cave."}]"#)
            .create_async()
            .await;

        let provider = HuggingFaceProvider::new(key(), &config_for(&server.url())).unwrap();
        let text = provider
            .generate("Quest:", &GenerationParameters::default())
            .await
            .unwrap();

        assert_eq!(text, "Quest: Find the gem. Search the cave.");
        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_generate_accepts_single_object_and_empty_batch() {
        let mut server = mockito::Server::new_async().await;
        let _single = server
            .mock("POST", "/models/gpt2")
            .with_status(200)
            .with_body(r#"{"generated_text": "Hello there"}"#)
            .create_async()
            .await;

        let provider = HuggingFaceProvider::new(key(), &config_for(&server.url())).unwrap();
        let text = provider
            .generate("x", &GenerationParameters::default())
            .await
            .unwrap();
        assert_eq!(text, "Hello there");

        let mut server = mockito::Server::new_async().await;
        let _empty = server
            .mock("POST", "/models/gpt2")
            .with_status(200)
            .with_body("[]")
            .create_async()
            .await;

        let provider = HuggingFaceProvider::new(key(), &config_for(&server.url())).unwrap();
        let text = provider
            .generate("x", &GenerationParameters::default())
            .await
            .unwrap();
        assert!(text.is_empty());
    }

    #[tokio::test]
    async fn test_non_success_status_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gpt2")
            .with_status(503)
            .with_body(r#"{"error": "Model gpt2 is currently loading"}"#)
            .create_async()
            .await;

        let provider = HuggingFaceProvider::new(key(), &config_for(&server.url())).unwrap();
        let err = provider
            .generate("x", &GenerationParameters::default())
            .await
            .unwrap_err();

        match err {
            SuggestionError::ProviderUnavailable(msg) => assert!(msg.contains("503")),
            other => panic!("expected ProviderUnavailable, got: {other}"),
        }
    }

    #[tokio::test]
    async fn test_malformed_body_is_unavailable() {
        let mut server = mockito::Server::new_async().await;
        let _mock = server
            .mock("POST", "/models/gpt2")
            .with_status(200)
            .with_body("not json")
            .create_async()
            .await;

        let provider = HuggingFaceProvider::new(key(), &config_for(&server.url())).unwrap();
        let err = provider
            .generate("x", &GenerationParameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SuggestionError::ProviderUnavailable(_)));
    }

    #[tokio::test]
    async fn test_missing_key_fails_without_request() {
        let mut server = mockito::Server::new_async().await;
        let mock = server
            .mock("POST", "/models/gpt2")
            .expect(0)
            .create_async()
            .await;

        for api_key in [None, Some(SecretString::from("  ".to_string()))] {
            let provider = HuggingFaceProvider::new(api_key, &config_for(&server.url())).unwrap();
            assert!(!provider.is_configured());
            let err = provider
                .generate("x", &GenerationParameters::default())
                .await
                .unwrap_err();
            assert!(matches!(err, SuggestionError::Configuration(_)));
        }

        mock.assert_async().await;
    }

    #[tokio::test]
    async fn test_unreachable_service_is_unavailable() {
        // Nothing listens on port 9 (discard) in the test environment.
        let provider = HuggingFaceProvider::new(key(), &config_for("http://127.0.0.1:9")).unwrap();
        let err = provider
            .generate("x", &GenerationParameters::default())
            .await
            .unwrap_err();
        assert!(matches!(err, SuggestionError::ProviderUnavailable(_)));
    }

    #[test]
    fn test_url_trims_trailing_slash() {
        let provider =
            HuggingFaceProvider::new(None, &config_for("https://example.test/")).unwrap();
        assert_eq!(provider.url(), "https://example.test/models/gpt2");
        assert_eq!(provider.model(), "gpt2");
    }
}

//! Ollama generate-endpoint client

use std::time::Duration;

use async_trait::async_trait;
use reqwest::Client;
use serde::{Deserialize, Serialize};
use tracing::{debug, info, instrument, warn};

use crate::config::GenerationConfig;
use crate::error::InferenceError;
use crate::ports::{GenerationRequest, GenerationResponse, InferenceEngine};

/// Generation engine backed by an Ollama server
#[derive(Debug)]
pub struct OllamaGenerationEngine {
    client: Client,
    config: GenerationConfig,
}

impl OllamaGenerationEngine {
    /// Create a new engine
    pub fn new(config: GenerationConfig) -> Result<Self, InferenceError> {
        let client = Client::builder()
            .timeout(Duration::from_millis(config.timeout_ms))
            .build()
            .map_err(|e| InferenceError::ConnectionFailed(e.to_string()))?;

        info!(
            base_url = %config.base_url,
            model = %config.model,
            "Initialized Ollama generation engine"
        );

        Ok(Self { client, config })
    }

    /// Build the API URL for a given endpoint
    fn api_url(&self, endpoint: &str) -> String {
        format!(
            "{}/api/{}",
            self.config.base_url.trim_end_matches('/'),
            endpoint.trim_start_matches('/')
        )
    }
}

/// Ollama-format generate request
#[derive(Debug, Serialize)]
struct OllamaGenerateRequest<'a> {
    model: &'a str,
    prompt: &'a str,
    stream: bool,
}

/// Ollama-format generate response
#[derive(Debug, Deserialize)]
struct OllamaGenerateResponse {
    #[serde(default)]
    model: String,
    response: String,
    #[serde(default)]
    done: bool,
}

#[async_trait]
impl InferenceEngine for OllamaGenerationEngine {
    #[instrument(skip(self, request), fields(model = %self.config.model))]
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, InferenceError> {
        let model = self.config.model.as_str();

        let body = OllamaGenerateRequest {
            model,
            prompt: &request.prompt,
            stream: false,
        };

        debug!(prompt_len = request.prompt.len(), "Sending generate request");

        let response = self
            .client
            .post(self.api_url("generate"))
            .json(&body)
            .send()
            .await
            .map_err(|e| InferenceError::from_reqwest(&e, self.config.timeout_ms))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            warn!(status = %status, body = %body, "Generate request failed");
            return Err(InferenceError::ServerError(format!(
                "Status {status}: {body}"
            )));
        }

        let generated: OllamaGenerateResponse = response
            .json()
            .await
            .map_err(|e| InferenceError::InvalidResponse(e.to_string()))?;

        debug!(
            response_len = generated.response.len(),
            done = generated.done,
            "Generation completed"
        );

        Ok(GenerationResponse {
            content: generated.response,
            model: if generated.model.is_empty() {
                model.to_string()
            } else {
                generated.model
            },
            done: generated.done,
        })
    }

    fn default_model(&self) -> &str {
        &self.config.model
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn default_engine() -> OllamaGenerationEngine {
        OllamaGenerationEngine::new(GenerationConfig::default()).unwrap()
    }

    #[test]
    fn config_creates_correct_urls() {
        let engine = default_engine();

        assert_eq!(
            engine.api_url("generate"),
            "http://localhost:11434/api/generate"
        );
        assert_eq!(engine.api_url("/tags"), "http://localhost:11434/api/tags");
    }

    #[test]
    fn default_model_is_gemma() {
        assert_eq!(default_engine().default_model(), "gemma3:12b");
    }

    #[test]
    fn lite_config_switches_model() {
        let engine = OllamaGenerationEngine::new(GenerationConfig::default().lite()).unwrap();
        assert_eq!(engine.default_model(), "gemma3:4b");
    }

    #[test]
    fn generate_request_serializes_non_streaming() {
        let body = OllamaGenerateRequest {
            model: "m",
            prompt: "p",
            stream: false,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(json["stream"], false);
        assert_eq!(json["model"], "m");
        assert_eq!(json["prompt"], "p");
    }
}

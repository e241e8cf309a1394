//! Generation adapter - Implements GenerationPort using ai_core
//!
//! A request that cannot reach the server triggers one recovery: the
//! generation service is brought up through its `ServiceControlPort` and the
//! request is sent exactly once more.

use std::fmt;
use std::sync::Arc;

use ai_core::{
    GenerationConfig, GenerationRequest, InferenceEngine, InferenceError, OllamaGenerationEngine,
    word_info_prompt,
};
use application::error::ApplicationError;
use application::ports::{GenerationPort, ServiceControlPort};
use async_trait::async_trait;
use tracing::{debug, instrument, warn};

/// Adapter for the Ollama generation service
pub struct GenerationAdapter {
    engine: Arc<dyn InferenceEngine>,
    recovery: Arc<dyn ServiceControlPort>,
}

impl fmt::Debug for GenerationAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GenerationAdapter")
            .field("model", &self.engine.default_model())
            .field("recovery", &self.recovery.service_name())
            .finish()
    }
}

impl GenerationAdapter {
    /// Create an adapter talking to Ollama with the given configuration
    ///
    /// # Errors
    ///
    /// Returns an error if the HTTP client fails to initialize.
    pub fn new(
        config: GenerationConfig,
        recovery: Arc<dyn ServiceControlPort>,
    ) -> Result<Self, ApplicationError> {
        let engine = OllamaGenerationEngine::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_engine(Arc::new(engine), recovery))
    }

    /// Create an adapter around any generation engine
    pub fn with_engine(
        engine: Arc<dyn InferenceEngine>,
        recovery: Arc<dyn ServiceControlPort>,
    ) -> Self {
        Self { engine, recovery }
    }

    async fn send(&self, request: GenerationRequest) -> Result<String, InferenceError> {
        self.engine.generate(request).await.map(|response| response.content)
    }
}

fn generation_error(err: &InferenceError) -> ApplicationError {
    ApplicationError::Generation(err.to_string())
}

#[async_trait]
impl GenerationPort for GenerationAdapter {
    #[instrument(skip(self))]
    async fn generate_word_info(
        &self,
        word: &str,
        language: &str,
    ) -> Result<String, ApplicationError> {
        let request = GenerationRequest::simple(word_info_prompt(word, language));

        match self.send(request.clone()).await {
            Ok(content) => {
                debug!(chars = content.len(), "Generated word information");
                Ok(content)
            },
            Err(e) if e.is_connection_failure() => {
                warn!(error = %e, "Generation service unreachable, restarting it");
                self.recovery.ensure_running().await?;
                self.send(request).await.map_err(|e| generation_error(&e))
            },
            Err(e) => Err(generation_error(&e)),
        }
    }

    fn model_name(&self) -> String {
        self.engine.default_model().to_string()
    }
}

//! Port definitions for the generation engine
//!
//! Defines the trait (port) that generation adapters must implement.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::error::InferenceError;

/// A single-prompt generation request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationRequest {
    /// Prompt text
    pub prompt: String,
}

impl GenerationRequest {
    /// Create a request for the engine's configured model
    pub fn simple(prompt: impl Into<String>) -> Self {
        Self {
            prompt: prompt.into(),
        }
    }
}

/// Completed generation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationResponse {
    /// Generated text, opaque to the engine
    pub content: String,
    /// Model that produced it
    pub model: String,
    /// Whether the server reported the generation as finished
    pub done: bool,
}

/// Port for generation engine implementations
#[async_trait]
pub trait InferenceEngine: Send + Sync {
    /// Generate a complete response (non-streaming)
    async fn generate(
        &self,
        request: GenerationRequest,
    ) -> Result<GenerationResponse, InferenceError>;

    /// Get the current default model
    fn default_model(&self) -> &str;
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn generation_request_simple() {
        let req = GenerationRequest::simple("Hello");
        assert_eq!(req.prompt, "Hello");
    }
}

//! AI Core - Text generation for vocabulary cards
//!
//! Talks to a local Ollama-compatible server through its non-streaming
//! `/api/generate` endpoint and builds the word-information prompt.

pub mod config;
pub mod error;
pub mod ollama;
pub mod ports;
pub mod prompt;

pub use config::GenerationConfig;
pub use error::InferenceError;
pub use ollama::OllamaGenerationEngine;
pub use ports::{GenerationRequest, GenerationResponse, InferenceEngine};
pub use prompt::word_info_prompt;

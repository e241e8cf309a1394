//! Ollama-compatible generation engine implementation
//!
//! Connects to any Ollama-compatible server through `/api/generate`.

mod client;

pub use client::OllamaGenerationEngine;

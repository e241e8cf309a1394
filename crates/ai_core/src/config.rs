//! Configuration for the generation service

use serde::{Deserialize, Serialize};

/// Configuration for the generation client
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GenerationConfig {
    /// Base URL of the Ollama-compatible server
    #[serde(default = "default_base_url")]
    pub base_url: String,

    /// Model used by default
    #[serde(default = "default_model")]
    pub model: String,

    /// Smaller model for machines with less VRAM
    #[serde(default = "default_lite_model")]
    pub lite_model: String,

    /// Request timeout in milliseconds
    #[serde(default = "default_timeout_ms")]
    pub timeout_ms: u64,

    /// Timeout of the liveness probe in milliseconds
    #[serde(default = "default_probe_timeout_ms")]
    pub probe_timeout_ms: u64,
}

fn default_base_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_model() -> String {
    "gemma3:12b".to_string()
}

fn default_lite_model() -> String {
    "gemma3:4b".to_string()
}

const fn default_timeout_ms() -> u64 {
    300_000 // 5 minutes, first load of a large model is slow
}

const fn default_probe_timeout_ms() -> u64 {
    3000
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            model: default_model(),
            lite_model: default_lite_model(),
            timeout_ms: default_timeout_ms(),
            probe_timeout_ms: default_probe_timeout_ms(),
        }
    }
}

impl GenerationConfig {
    /// Switch the default model to the lite one
    #[must_use]
    pub fn lite(mut self) -> Self {
        self.model.clone_from(&self.lite_model);
        self
    }

    /// URL of the lightweight status endpoint used for liveness
    pub fn tags_url(&self) -> String {
        format!("{}/api/tags", self.base_url.trim_end_matches('/'))
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.base_url.is_empty() {
            return Err("Generation base URL must not be empty".to_string());
        }
        if self.model.is_empty() {
            return Err("Generation model must not be empty".to_string());
        }
        if self.timeout_ms == 0 || self.probe_timeout_ms == 0 {
            return Err("Generation timeouts must be greater than 0".to_string());
        }
        Ok(())
    }
}

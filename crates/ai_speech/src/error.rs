//! Speech processing errors

use thiserror::Error;

/// Errors that can occur during speech synthesis
#[derive(Debug, Error)]
pub enum SpeechError {
    /// Synthesis failed
    #[error("Synthesis failed: {0}")]
    SynthesisFailed(String),

    /// Timeout during processing
    #[error("Speech processing timeout after {0}ms")]
    Timeout(u64),

    /// Invalid configuration
    #[error("Configuration error: {0}")]
    Configuration(String),

    /// Voice model file is missing
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Engine not available (not installed or configured)
    #[error("Provider not available: {0}")]
    NotAvailable(String),

    /// Writing the audio file failed
    #[error("Audio output failed: {0}")]
    Output(#[from] std::io::Error),
}

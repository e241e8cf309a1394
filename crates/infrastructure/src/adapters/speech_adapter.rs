//! Speech adapter - Implements SpeechPort using ai_speech

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use ai_speech::{PiperSynthesizer, SpeechConfig, SpeechError, TextToSpeech};
use application::error::ApplicationError;
use application::ports::SpeechPort;
use async_trait::async_trait;
use domain::AudioArtifact;
use tracing::{debug, instrument};

/// Adapter for local speech synthesis
pub struct SpeechAdapter {
    tts: Arc<dyn TextToSpeech>,
}

impl fmt::Debug for SpeechAdapter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SpeechAdapter").finish_non_exhaustive()
    }
}

impl SpeechAdapter {
    /// Create an adapter backed by Piper
    ///
    /// # Errors
    ///
    /// Returns an error if the speech configuration is invalid.
    pub fn piper(config: SpeechConfig) -> Result<Self, ApplicationError> {
        let tts = PiperSynthesizer::new(config)
            .map_err(|e| ApplicationError::Configuration(e.to_string()))?;
        Ok(Self::with_tts(Arc::new(tts)))
    }

    /// Create an adapter around any synthesizer
    pub fn with_tts(tts: Arc<dyn TextToSpeech>) -> Self {
        Self { tts }
    }

    /// Whether the synthesizer can currently run
    pub async fn is_available(&self) -> bool {
        self.tts.is_available().await
    }
}

fn map_speech_error(err: &SpeechError) -> ApplicationError {
    match err {
        SpeechError::Configuration(msg) => ApplicationError::Configuration(msg.clone()),
        other => ApplicationError::Synthesis(other.to_string()),
    }
}

#[async_trait]
impl SpeechPort for SpeechAdapter {
    #[instrument(skip(self, text, destination), fields(destination = %destination.display()))]
    async fn synthesize(
        &self,
        text: &str,
        language_code: &str,
        destination: &Path,
    ) -> Result<AudioArtifact, ApplicationError> {
        self.tts
            .synthesize_to_file(text, language_code, destination)
            .await
            .map_err(|e| map_speech_error(&e))?;

        debug!("Audio synthesized");
        Ok(AudioArtifact::new(destination, text, language_code))
    }
}
